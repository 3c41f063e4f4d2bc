use anyhow::Result;
use async_trait::async_trait;
pub mod gemini;

/// 模型后端抽象接口 (ModelBackend)
///
/// 该 Trait 定义了与大语言模型 (LLM) 进行交互的通用行为。
///
/// # 线程安全
/// 该 Trait 继承了 `Send + Sync`，实现者可以放进 `Arc<dyn ModelBackend>`，
/// 由 Axum 的共享状态在所有请求之间共用。
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// 执行一次对话请求，等待完整的文本响应
    ///
    /// # 参数 (Arguments)
    ///
    /// * `system_prompt` - 系统提示词，可以为空字符串 (此时不发送 system instruction)
    /// * `user_input` - 用户输入，这里就是拼好的翻译/语法 Prompt
    ///
    /// # 返回值 (Returns)
    ///
    /// * `Ok(String)` - 模型生成的原始文本 (可能带 Markdown 代码块)
    /// * `Err(anyhow::Error)` - 网络失败、API Key 无效、响应结构不对等
    async fn chat(&self, system_prompt: &str, user_input: &str) -> Result<String>;

    /// 模型名称，仅用于日志
    fn model_name(&self) -> &str;
}
