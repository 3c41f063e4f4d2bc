//! LLM 回复的解析与修复
//!
//! 模型经常把 JSON 包在 Markdown 代码块里，有时前后还带解释文字。
//! 这里先找 ```` ```json ```` 代码块，找不到再把整段文本当 JSON 解析。

use birken_core::{BirkenError, GrammarExplanation};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;

fn fenced_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // 语言标记可选；代码块内容必须独占几行
        Regex::new(r"(?s)```(?:json)?\n(.*?)\n```").expect("fenced block regex is valid")
    })
}

/// 取出第一个 Markdown 代码块的内容
pub fn extract_json_block(text: &str) -> Option<&str> {
    fenced_block_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 把模型回复解析成结构化类型
pub fn parse_model_json<T: DeserializeOwned>(text: &str) -> Result<T, BirkenError> {
    let payload = extract_json_block(text).unwrap_or_else(|| text.trim());
    Ok(serde_json::from_str(payload)?)
}

/// 解析语法讲解
///
/// 顶层是对象时按 `GrammarExplanation` 读，顶层是数组时整体当作要点；
/// 其他情况 (标量、不是 JSON) 返回错误，由调用方走兜底。
pub fn parse_grammar(text: &str) -> Result<GrammarExplanation, BirkenError> {
    match parse_model_json::<Value>(text)? {
        Value::Array(points) => Ok(GrammarExplanation::from_points(points)),
        obj @ Value::Object(_) => Ok(serde_json::from_value(obj)?),
        other => Err(BirkenError::ParseError(format!(
            "expected a JSON object or array, got {}",
            other
        ))),
    }
}

/// 语法讲解的兜底：按空行切段，每段作为一个要点
pub fn fallback_grammar_points(raw: &str, err: &BirkenError) -> GrammarExplanation {
    GrammarExplanation {
        points: raw
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| Value::String(p.to_string()))
            .collect(),
        error: Some(err.to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use birken_core::SentenceTranslation;
    use serde_json::Value;

    #[test]
    fn extracts_json_fence() {
        let raw = "Here you go:\n```json\n{\"a\": 1}\n```\nEnjoy.";
        assert_eq!(extract_json_block(raw), Some("{\"a\": 1}"));
    }

    #[test]
    fn extracts_untagged_fence() {
        let raw = "```\n{\"points\": []}\n```";
        assert_eq!(extract_json_block(raw), Some("{\"points\": []}"));
    }

    #[test]
    fn takes_first_fence_only() {
        let raw = "```json\n{\"first\": true}\n```\n```json\n{\"second\": true}\n```";
        let v: Value = parse_model_json(raw).unwrap();
        assert_eq!(v["first"], true);
    }

    #[test]
    fn other_language_tags_are_not_treated_as_json_fences() {
        // ```python 不匹配，退回整段解析 -> 失败
        let raw = "```python\nprint(1)\n```";
        assert!(extract_json_block(raw).is_none());
        assert!(parse_model_json::<Value>(raw).is_err());
    }

    #[test]
    fn bare_json_is_parsed_directly() {
        let raw = "  {\"original\":\"Je mange\",\"wordByWord\":\"I eat\"}\n";
        let t: SentenceTranslation = parse_model_json(raw).unwrap();
        assert_eq!(t.original, "Je mange");
        assert_eq!(t.word_by_word, "I eat");
        assert!(t.fluent_translation.is_empty());
    }

    #[test]
    fn prose_is_a_parse_error() {
        let err = parse_model_json::<Value>("Sorry, I cannot help.").unwrap_err();
        assert!(matches!(err, BirkenError::ParseError(_)));
    }

    #[test]
    fn grammar_accepts_object_points_and_bare_arrays() {
        let raw = "```json\n{\"points\":[{\"concept\":\"Subject\",\"explanation\":\"first\"}]}\n```";
        let g = parse_grammar(raw).unwrap();
        assert_eq!(g.points[0]["explanation"], "first");

        let g = parse_grammar(r#"["**Subject** first", "**Verb** second"]"#).unwrap();
        assert_eq!(g.points, vec!["**Subject** first", "**Verb** second"]);
        assert_eq!(g.error, None);
    }

    #[test]
    fn grammar_scalar_is_a_parse_error() {
        let err = parse_grammar("42").unwrap_err();
        assert!(matches!(err, BirkenError::ParseError(_)));
        assert!(err.to_string().contains("expected a JSON object or array"));
    }

    #[test]
    fn grammar_fallback_splits_on_blank_lines() {
        let raw = "**Subject** comes first.\n\n  \n\n**Verb** agrees.\n\n";
        let err = BirkenError::ParseError("expected value".into());
        let g = fallback_grammar_points(raw, &err);
        assert_eq!(g.points, vec!["**Subject** comes first.", "**Verb** agrees."]);
        assert_eq!(g.error.as_deref(), Some("Error parsing response: expected value"));
    }
}
