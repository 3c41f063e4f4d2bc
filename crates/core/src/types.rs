// crates/core/src/types.rs
use crate::language::Language;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const TRANSLATION_UNAVAILABLE: &str = "Translation unavailable";
pub const TRANSLATION_FAILED: &str = "Error processing translation";
pub const ROMANIZATION_UNAVAILABLE: &str = "Romanization unavailable";

/// 单句的 Birkenbihl 翻译结果 (流式返回中的一行)
///
/// 已知字段宽松解析：类型不对不会让整条回复作废 (见 [`lenient`])。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SentenceTranslation {
    /// 原句
    #[serde(default, deserialize_with = "lenient::string")]
    pub original: String,

    /// 逐词直译，保持原句语序 (Birkenbihl 的 "解码")
    #[serde(default, deserialize_with = "lenient::string")]
    pub word_by_word: String,

    /// 通顺意译
    #[serde(default, deserialize_with = "lenient::string")]
    pub fluent_translation: String,

    /// 单词 -> 译文，按模型给出的顺序
    #[serde(default, deserialize_with = "lenient::word_map")]
    pub word_translations: Map<String, Value>,

    /// 注音 (仅中日韩)
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub romanization: Option<String>,

    /// 模型额外返回的字段，原样透传
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SentenceTranslation {
    /// 模型回复无法解析时的占位结果
    pub fn unavailable(sentence: &str, needs_romanization: bool) -> Self {
        Self::placeholder(sentence, TRANSLATION_UNAVAILABLE, needs_romanization)
    }

    /// 模型调用本身失败时的占位结果
    pub fn failed(sentence: &str, needs_romanization: bool) -> Self {
        Self::placeholder(sentence, TRANSLATION_FAILED, needs_romanization)
    }

    fn placeholder(sentence: &str, message: &str, needs_romanization: bool) -> Self {
        Self {
            original: sentence.to_string(),
            word_by_word: message.to_string(),
            fluent_translation: message.to_string(),
            word_translations: Map::new(),
            romanization: needs_romanization.then(|| ROMANIZATION_UNAVAILABLE.to_string()),
            extra: Map::new(),
        }
    }
}

/// 语法讲解
///
/// `points` 一般是字符串，但模型也可能给出对象 (概念 + 解释)，原样保留。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GrammarExplanation {
    #[serde(default, deserialize_with = "lenient::points")]
    pub points: Vec<Value>,

    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GrammarExplanation {
    /// 顶层直接是数组时，当作要点列表
    pub fn from_points(points: Vec<Value>) -> Self {
        Self {
            points,
            ..Default::default()
        }
    }
}

/// 模型输出的宽松反序列化
///
/// LLM 不保证字段类型：`null` 当缺省值，字符串数组用空格拼接，
/// 其余非字符串值转成 JSON 文本。
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::{Map, Value};

    fn text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Array(items) if items.iter().all(Value::is_string) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            other => Some(other.to_string()),
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(text(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(text(Value::deserialize(d)?))
    }

    /// 对象原样使用；`[{"je": "I"}, {"mange": "eat"}]` 这种数组合并成一个对象
    pub fn word_map<'de, D: Deserializer<'de>>(d: D) -> Result<Map<String, Value>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Object(map) => map,
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .flatten()
                .collect(),
            _ => Map::new(),
        })
    }

    pub fn points<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Value>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => Vec::new(),
            Value::Array(items) => items,
            other => vec![other],
        })
    }
}

/// `POST /process` 请求体
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub text: Option<String>,
    #[serde(default = "default_source")]
    pub source_lang: Language,
    #[serde(default = "default_target")]
    pub target_lang: Language,
}

/// `POST /grammar-explanation` 请求体
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarRequest {
    pub sentence: Option<String>,
    #[serde(default = "default_source")]
    pub source_lang: Language,
    #[serde(default = "default_target")]
    pub target_lang: Language,
}

fn default_source() -> Language {
    Language::DEFAULT_SOURCE
}

fn default_target() -> Language {
    Language::DEFAULT_TARGET
}
