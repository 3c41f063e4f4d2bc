// crates/core/src/segment.rs
//! 按标点切句
//!
//! 切分规则与语言相关：
//! * 中日韩：每个句末标点之后都断开，不要求空格
//! * 其他语言：句末标点 `.` `!` `?` 之后必须跟空白才断开，空白被吃掉
//!
//! 超长片段 (> [`MAX_SENTENCE_CHARS`] 个字符) 会再按逗号/分号切一次。

use crate::language::Language;

/// 单句最大字符数，超过则按次级标点再切
pub const MAX_SENTENCE_CHARS: usize = 200;

const CJK_TERMINATORS: &[char] = &['。', '！', '？', '…', '．', '；', '!', '?', '.'];
const WESTERN_TERMINATORS: &[char] = &['.', '!', '?'];
const SECONDARY_BREAKS: &[char] = &[',', ';', '，', '；'];

/// 把一段文本切成句子列表
///
/// 返回的句子不做 trim，只去掉切分时吃掉的空白；空白片段会被丢弃。
pub fn split_into_sentences(text: &str, language: &Language) -> Vec<String> {
    let pieces = if language.is_east_asian() {
        split_after(text, CJK_TERMINATORS, false)
    } else {
        split_on_whitespace_after(text, WESTERN_TERMINATORS)
    };

    let mut result = Vec::with_capacity(pieces.len());
    for piece in pieces {
        if piece.chars().count() > MAX_SENTENCE_CHARS {
            result.extend(
                split_after(&piece, SECONDARY_BREAKS, true)
                    .into_iter()
                    .filter(|s| !s.trim().is_empty()),
            );
        } else if !piece.trim().is_empty() {
            result.push(piece);
        }
    }
    result
}

/// 在每个分隔符之后断开，分隔符留在前一段
///
/// `eat_whitespace` 为 true 时，分隔符后面紧跟的空白一并丢弃。
fn split_after(text: &str, separators: &[char], eat_whitespace: bool) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if separators.contains(&c) {
            pieces.push(std::mem::take(&mut current));
            if eat_whitespace {
                while chars.next_if(|n| n.is_whitespace()).is_some() {}
            }
        }
    }
    pieces.push(current);
    pieces
}

/// 只在 "终止符 + 空白" 处断开，空白段整体丢弃
fn split_on_whitespace_after(text: &str, terminators: &[char]) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let at_break = terminators.contains(&c) && chars.peek().is_some_and(|n| n.is_whitespace());
        if at_break {
            while chars.next_if(|n| n.is_whitespace()).is_some() {}
            pieces.push(std::mem::take(&mut current));
        }
    }
    pieces.push(current);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fr() -> Language {
        Language::Fr
    }

    #[test]
    fn western_splits_on_terminator_followed_by_space() {
        let out = split_into_sentences("Je mange. Tu bois!  Il dort? Oui", &fr());
        assert_eq!(out, vec!["Je mange.", "Tu bois!", "Il dort?", "Oui"]);
    }

    #[test]
    fn western_keeps_abbreviation_like_dots_without_space() {
        let out = split_into_sentences("Il est 3.14 heures. Bien.", &fr());
        assert_eq!(out, vec!["Il est 3.14 heures.", "Bien."]);
    }

    #[test]
    fn western_newline_counts_as_whitespace() {
        let out = split_into_sentences("Bonjour.\nAu revoir.", &fr());
        assert_eq!(out, vec!["Bonjour.", "Au revoir."]);
    }

    #[test]
    fn leading_whitespace_is_not_trimmed() {
        let out = split_into_sentences("  Salut. Ça va?", &fr());
        assert_eq!(out, vec!["  Salut.", "Ça va?"]);
    }

    #[test]
    fn cjk_splits_after_every_terminator() {
        let out = split_into_sentences("我吃苹果。你呢？好！", &Language::Zh);
        assert_eq!(out, vec!["我吃苹果。", "你呢？", "好！"]);
    }

    #[test]
    fn cjk_terminator_run_breaks_after_each_mark() {
        let out = split_into_sentences("本当？！そうです。", &Language::Ja);
        assert_eq!(out, vec!["本当？", "！", "そうです。"]);
    }

    #[test]
    fn cjk_drops_whitespace_only_pieces() {
        let out = split_into_sentences("안녕하세요. \n", &Language::Ko);
        assert_eq!(out, vec!["안녕하세요."]);
    }

    #[test]
    fn blank_input_yields_nothing() {
        assert!(split_into_sentences("", &fr()).is_empty());
        assert!(split_into_sentences("   \n\t", &Language::Zh).is_empty());
    }

    #[test]
    fn long_piece_is_broken_on_commas_and_semicolons() {
        let clause = "a".repeat(90);
        let text = format!("{clause}, {clause}; {clause}");
        assert!(text.chars().count() > MAX_SENTENCE_CHARS);

        let out = split_into_sentences(&text, &fr());
        assert_eq!(
            out,
            vec![format!("{clause},"), format!("{clause};"), clause.clone()]
        );
    }

    #[test]
    fn exactly_max_chars_is_kept_whole() {
        let text = format!("{}, {}.", "a".repeat(100), "b".repeat(97));
        assert_eq!(text.chars().count(), MAX_SENTENCE_CHARS);
        assert_eq!(split_into_sentences(&text, &fr()), vec![text]);
    }

    #[test]
    fn one_char_over_max_is_split() {
        let text = format!("{}, {}.", "a".repeat(100), "b".repeat(98));
        assert_eq!(text.chars().count(), MAX_SENTENCE_CHARS + 1);
        assert_eq!(
            split_into_sentences(&text, &fr()),
            vec![format!("{},", "a".repeat(100)), format!("{}.", "b".repeat(98))]
        );
    }

    #[test]
    fn long_piece_uses_fullwidth_breaks_too() {
        let clause = "字".repeat(120);
        let text = format!("{clause}，{clause}");
        let out = split_into_sentences(&text, &Language::Zh);
        assert_eq!(out, vec![format!("{clause}，"), clause.clone()]);
    }

    #[test]
    fn length_is_counted_in_chars_not_bytes() {
        // 150 个汉字 = 450 字节，但不超过 200 字符，不应再切
        let text = format!("{}，{}", "字".repeat(75), "字".repeat(74));
        let out = split_into_sentences(&text, &Language::Zh);
        assert_eq!(out, vec![text]);
    }
}
