// crates/core/src/language.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::EnumString;

/// 语言代码 (ISO 639-1)
///
/// 已知语言有固定的英文名称；未知代码原样保留 (`Other`)，
/// 拼到 Prompt 里时直接使用代码本身。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    En,
    Fr,
    Es,
    De,
    It,
    Ja,
    Ru,
    Zh,
    Ar,
    Pt,
    Hi,
    Ko,
    #[strum(default)]
    Other(String),
}

impl Language {
    /// 默认源语言 (法语)
    pub const DEFAULT_SOURCE: Language = Language::Fr;
    /// 默认目标语言 (英语)
    pub const DEFAULT_TARGET: Language = Language::En;

    /// 解析语言代码，永不失败
    ///
    /// 精确匹配小写代码：`"ZH"` 不是中文，按未知代码原样保留。
    pub fn parse(code: &str) -> Self {
        // strum(default) 保证这里不会返回 Err
        Language::from_str(code).unwrap_or_else(|_| Language::Other(code.to_string()))
    }

    pub fn code(&self) -> &str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Es => "es",
            Language::De => "de",
            Language::It => "it",
            Language::Ja => "ja",
            Language::Ru => "ru",
            Language::Zh => "zh",
            Language::Ar => "ar",
            Language::Pt => "pt",
            Language::Hi => "hi",
            Language::Ko => "ko",
            Language::Other(code) => code,
        }
    }

    /// 给 LLM 看的语言名称
    pub fn display_name(&self) -> &str {
        match self {
            Language::En => "English",
            Language::Fr => "French",
            Language::Es => "Spanish",
            Language::De => "German",
            Language::It => "Italian",
            Language::Ja => "Japanese",
            Language::Ru => "Russian",
            Language::Zh => "Chinese",
            Language::Ar => "Arabic",
            Language::Pt => "Portuguese",
            Language::Hi => "Hindi",
            Language::Ko => "Korean",
            Language::Other(code) => code,
        }
    }

    /// 中日韩：句末标点不要求后跟空格，且需要注音
    pub fn is_east_asian(&self) -> bool {
        matches!(self, Language::Zh | Language::Ja | Language::Ko)
    }

    /// 注音方案 (拼音 / 罗马字 / 韩语罗马化)
    pub fn romanization(&self) -> Option<&'static str> {
        match self {
            Language::Zh => Some("pinyin"),
            Language::Ja => Some("romaji"),
            Language::Ko => Some("romanized Korean"),
            _ => None,
        }
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::parse(&code)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.code().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
