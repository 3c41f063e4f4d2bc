use crate::config::PromptConfig;
use crate::llm::ModelBackend;
use crate::parse::{fallback_grammar_points, parse_grammar, parse_model_json};
use crate::prompts;
use birken_core::{split_into_sentences, GrammarExplanation, Language, SentenceTranslation};
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// 两次模型调用之间的默认间隔，防止触发 API 限流
pub const DEFAULT_PACING: Duration = Duration::from_secs(4);

pub const GRAMMAR_UNAVAILABLE: &str = "Unable to generate grammar explanation. Please try again.";

// --- Builder 实现 ---

/// `Translator` 的构建器。
pub struct TranslatorBuilder {
    llm: Arc<dyn ModelBackend>,
    prompts: PromptConfig,
    pacing: Duration,
}

impl TranslatorBuilder {
    pub fn new(llm: Arc<dyn ModelBackend>) -> Self {
        Self {
            llm,
            prompts: PromptConfig::default(),
            pacing: DEFAULT_PACING,
        }
    }

    /// 替换默认的 Prompt 配置
    pub fn with_prompts(mut self, prompts: PromptConfig) -> Self {
        self.prompts = prompts;
        self
    }

    /// 句子之间的等待时间，`Duration::ZERO` 表示不等待
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn build(self) -> Translator {
        Translator {
            llm: self.llm,
            prompts: Arc::new(self.prompts),
            pacing: self.pacing,
        }
    }
}

// --- Translator 实现 ---

/// Birkenbihl 翻译服务
///
/// 所有公开方法都不返回错误：模型或解析失败时给出占位结果，
/// 保证流式输出里每个句子都有一行。
#[derive(Clone)]
pub struct Translator {
    llm: Arc<dyn ModelBackend>,
    prompts: Arc<PromptConfig>,
    pacing: Duration,
}

struct TextStream {
    translator: Translator,
    sentences: VecDeque<String>,
    source: Language,
    target: Language,
    started: bool,
}

impl Translator {
    pub fn builder(llm: Arc<dyn ModelBackend>) -> TranslatorBuilder {
        TranslatorBuilder::new(llm)
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// 翻译单个句子
    pub async fn translate_sentence(
        &self,
        sentence: &str,
        source: &Language,
        target: &Language,
    ) -> SentenceTranslation {
        let needs_romanization = source.romanization().is_some();
        let prompt = prompts::translation_prompt(&self.prompts, sentence, source, target);

        let raw = match self.llm.chat("", &prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(
                    "[{}] Error processing sentence '{}': {:#}",
                    self.llm.model_name(),
                    sentence,
                    e
                );
                return SentenceTranslation::failed(sentence, needs_romanization);
            }
        };

        match parse_model_json::<SentenceTranslation>(&raw) {
            Ok(mut translation) => {
                // 模型偶尔会漏掉 original，用输入补上
                if translation.original.trim().is_empty() {
                    translation.original = sentence.to_string();
                }
                translation
            }
            Err(e) => {
                tracing::warn!("Failed to parse translation: {}. Raw response: {}", e, raw);
                SentenceTranslation::unavailable(sentence, needs_romanization)
            }
        }
    }

    /// 生成语法讲解
    pub async fn explain_grammar(
        &self,
        sentence: &str,
        source: &Language,
        target: &Language,
    ) -> GrammarExplanation {
        let prompt = prompts::grammar_prompt(&self.prompts, sentence, source, target);

        let raw = match self.llm.chat("", &prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Error generating grammar explanation: {:#}", e);
                return GrammarExplanation {
                    points: vec![GRAMMAR_UNAVAILABLE.into()],
                    error: Some(format!("Error: {:#}", e)),
                    ..Default::default()
                };
            }
        };

        match parse_grammar(&raw) {
            Ok(explanation) => explanation,
            Err(e) => {
                tracing::warn!(
                    "Error parsing grammar explanation JSON: {}. Raw response: {}",
                    e,
                    raw
                );
                fallback_grammar_points(&raw, &e)
            }
        }
    }

    /// 切句后逐句翻译，按原文顺序产出
    ///
    /// 流是惰性的：只有被拉取时才调用模型，丢弃流 (客户端断开) 后不再发请求。
    /// 第一句立即处理，之后每句之前等待 `pacing`。
    pub fn translate_text(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> impl Stream<Item = SentenceTranslation> + Send + 'static {
        let sentences: VecDeque<String> = split_into_sentences(text, &source)
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();

        tracing::info!(
            "Translating {} sentence(s) {} -> {}",
            sentences.len(),
            source,
            target
        );

        let state = TextStream {
            translator: self.clone(),
            sentences,
            source,
            target,
            started: false,
        };

        stream::unfold(state, |mut st| async move {
            let sentence = st.sentences.pop_front()?;
            if st.started && !st.translator.pacing.is_zero() {
                tokio::time::sleep(st.translator.pacing).await;
            }
            st.started = true;

            let result = st
                .translator
                .translate_sentence(&sentence, &st.source, &st.target)
                .await;
            Some((result, st))
        })
    }
}
