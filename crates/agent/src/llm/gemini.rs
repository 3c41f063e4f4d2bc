use crate::config::GeminiConfig;
use crate::llm::ModelBackend;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    // 对应 JSON 中的 "candidates"
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    // 被安全策略拦截时 content 可能缺失
    content: Option<Content>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiResponse {
    /// 路径: candidates[0] -> content -> parts[*] -> text，多个 part 直接拼接
    fn into_text(self) -> Result<String> {
        let candidate = self
            .candidates
            .and_then(|c| c.into_iter().next())
            .context("Gemini response has no candidates")?;

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            return Err(anyhow::anyhow!(
                "Response JSON structure mismatch: no text in first candidate (finishReason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ));
        }
        Ok(text)
    }
}

// ==========================================
// Gemini Backend
// ==========================================

pub struct GeminiBackend {
    model: String,
    endpoint: String,
    client: reqwest::Client,
}

impl GeminiBackend {
    /// 根据配置创建 Gemini 实例
    ///
    /// API Key 放在 `x-goog-api-key` Header 里，不拼进 URL。
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let base = url::Url::parse(&config.base_url)
            .with_context(|| format!("Invalid Gemini base url: {}", config.base_url))?;
        let endpoint = base
            .join(&format!("v1beta/models/{}:generateContent", config.model))
            .context("Failed to build Gemini endpoint")?
            .to_string();

        let mut headers = header::HeaderMap::new();
        let mut key = header::HeaderValue::from_str(&config.api_key)
            .context("Invalid characters in Gemini API key")?;
        // 标记为敏感信息，日志中不打印
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("Failed to build reqwest client")?;

        Ok(Self {
            model: config.model.clone(),
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    async fn chat(&self, system_prompt: &str, user_input: &str) -> Result<String> {
        // 1. 构建请求 Body
        // system_prompt 为空时不带 system_instruction，有些模型不接受空的 parts
        let mut request_body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": user_input }]
            }]
        });
        if !system_prompt.trim().is_empty() {
            request_body["system_instruction"] = json!({
                "parts": [{ "text": system_prompt }]
            });
        }

        // 2. 发送异步请求
        tracing::debug!("Sending request to Gemini model: {}", self.model);
        let res = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        // 3. 检查 HTTP 状态码
        if !res.status().is_success() {
            let status = res.status();
            let error_text = res.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Gemini API Error: Status {}, Body: {}",
                status,
                error_text
            ));
        }

        // 4. 解析 JSON 响应并提取文本
        let response_data: GeminiResponse = res
            .json()
            .await
            .context("Failed to deserialize Gemini response JSON")?;

        response_data.into_text()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
