//! 配置加载
//!
//! 优先级 (后者覆盖前者)：
//! 1. 内置默认值
//! 2. `config/default.toml` (可选)
//! 3. `BIRKEN_CONFIG` 指向的文件 (可选)
//! 4. 环境变量 `BIRKEN__<SECTION>__<KEY>`，例如 `BIRKEN__SERVER__PORT=8080`
//!
//! `GEMINI_API_KEY` 作为 `llm.api_key` 的兜底。

use anyhow::{Context, Result};
use birken_agent::config::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use birken_agent::GeminiConfig;
use birken_core::{ensure_not_blank, ensure_range, ensure_that};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub pacing: PacingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// 静态前端目录 (index.html)，不存在时不挂载
    pub static_dir: PathBuf,
}

#[derive(Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

// API Key 不进日志
impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PacingSettings {
    /// 两句之间的等待 (毫秒)，0 表示不等待
    pub sentence_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub dir: PathBuf,
    pub file_prefix: String,
}

impl Settings {
    /// 从默认位置和进程环境变量加载
    pub fn load() -> Result<Self> {
        let extra_file = std::env::var("BIRKEN_CONFIG").ok().map(PathBuf::from);
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::from_sources(Path::new("config/default"), extra_file.as_deref(), env)
    }

    /// 显式指定来源，测试时可以注入环境变量
    pub fn from_sources(
        default_file: &Path,
        extra_file: Option<&Path>,
        env: HashMap<String, String>,
    ) -> Result<Self> {
        let gemini_key = env.get("GEMINI_API_KEY").cloned();

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.static_dir", "static")?
            .set_default("llm.model", DEFAULT_GEMINI_MODEL)?
            .set_default("llm.base_url", DEFAULT_GEMINI_BASE_URL)?
            .set_default("llm.timeout_secs", 60)?
            .set_default("pacing.sentence_delay_ms", 4000)?
            .set_default("logging.dir", "logs")?
            .set_default("logging.file_prefix", "birken.log")?
            .add_source(File::with_name(&default_file.to_string_lossy()).required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let cfg = builder
            .add_source(
                Environment::with_prefix("BIRKEN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.into_iter().collect())),
            )
            .build()
            .context("Failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        if settings.llm.api_key.trim().is_empty() {
            if let Some(key) = gemini_key {
                settings.llm.api_key = key;
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        ensure_that!(self.server.port != 0, "server.port must be non-zero");
        ensure_not_blank!(
            self.llm.api_key,
            "Gemini API key missing: set GEMINI_API_KEY or BIRKEN__LLM__API_KEY"
        );
        ensure_not_blank!(self.llm.model, "llm.model must not be empty");
        ensure_range!(
            self.llm.timeout_secs,
            1,
            600,
            "llm.timeout_secs must be within 1..=600, got {}",
            self.llm.timeout_secs
        );
        Ok(())
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig::new(self.llm.api_key.clone())
            .with_model(self.llm.model.clone())
            .with_base_url(self.llm.base_url.clone())
            .with_timeout(Duration::from_secs(self.llm.timeout_secs))
    }

    pub fn sentence_delay(&self) -> Duration {
        Duration::from_millis(self.pacing.sentence_delay_ms)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load(pairs: &[(&str, &str)]) -> Result<Settings> {
        Settings::from_sources(Path::new("does/not/exist"), None, env(pairs))
    }

    #[test]
    fn defaults_apply_with_gemini_key() {
        let s = load(&[("GEMINI_API_KEY", "abc")]).unwrap();
        assert_eq!(s.server.port, 5000);
        assert_eq!(s.llm.model, "gemini-2.0-flash");
        assert_eq!(s.llm.api_key, "abc");
        assert_eq!(s.sentence_delay(), Duration::from_secs(4));
        assert_eq!(s.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn prefixed_env_overrides_defaults() {
        let s = load(&[
            ("BIRKEN__LLM__API_KEY", "from-prefixed"),
            ("GEMINI_API_KEY", "ignored"),
            ("BIRKEN__SERVER__PORT", "8080"),
            ("BIRKEN__PACING__SENTENCE_DELAY_MS", "0"),
        ])
        .unwrap();
        assert_eq!(s.llm.api_key, "from-prefixed");
        assert_eq!(s.server.port, 8080);
        assert!(s.sentence_delay().is_zero());
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("Gemini API key missing"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = load(&[("GEMINI_API_KEY", "k"), ("BIRKEN__LLM__TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn debug_output_hides_key() {
        let s = load(&[("GEMINI_API_KEY", "top-secret")]).unwrap();
        assert!(!format!("{:?}", s).contains("top-secret"));
    }
}
