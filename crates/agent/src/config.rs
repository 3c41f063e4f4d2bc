use std::time::Duration;

/// --- Prompt 配置中心 ---
/// 编译时加载 crates/agent/prompts/ 下的 Markdown 文件
///
/// 模板里的占位符形如 `{{sentence}}`，由 [`crate::prompts`] 负责填充。
#[derive(Debug, Clone)]
pub struct PromptConfig {
    pub translation_prompt: String,
    /// 只在源语言需要注音时拼进翻译 Prompt 的第 5 个字段
    pub romanization_request: String,
    pub grammar_prompt: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            // 路径是相对于当前 rust 源文件的
            translation_prompt: include_str!("../prompts/translation_prompt_template.md")
                .trim()
                .to_string(),
            romanization_request: include_str!("../prompts/romanization_request_template.md")
                .trim()
                .to_string(),
            grammar_prompt: include_str!("../prompts/grammar_prompt_template.md")
                .trim()
                .to_string(),
        }
    }
}

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// --- Gemini 连接配置 ---
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// 不带路径的根地址，测试时可以指向本地假服务
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// API Key 不能出现在日志里
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompts_are_loaded() {
        let prompts = PromptConfig::default();
        assert!(prompts.translation_prompt.contains("{{sentence}}"));
        assert!(prompts.romanization_request.contains("{{romanization_type}}"));
        assert!(prompts.grammar_prompt.contains("'points' array"));
    }

    #[test]
    fn debug_hides_api_key() {
        let cfg = GeminiConfig::new("secret-key").with_model("gemini-test");
        let printed = format!("{:?}", cfg);
        assert!(!printed.contains("secret-key"));
        assert!(printed.contains("gemini-test"));
    }
}
