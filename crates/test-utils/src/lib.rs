//! 测试专用工具，只作为 dev-dependency 引入，不进生产二进制

use anyhow::Result;
use async_trait::async_trait;
use birken_agent::ModelBackend;
use std::collections::VecDeque;
use std::sync::Mutex;

/// 按脚本依次返回预设回复的模型后端 (离线测试用)
///
/// 每次 `chat` 弹出一条回复；脚本用完后返回错误。收到的 Prompt 会被记录下来。
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()))
    }

    pub fn fail(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()))
    }

    fn push(self, entry: Result<String, String>) -> Self {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(entry);
        self
    }

    /// 目前为止收到的所有 user prompt
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn chat(&self, _system_prompt: &str, user_input: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(user_input.to_string());

        let next = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("scripted backend has no reply left")),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
