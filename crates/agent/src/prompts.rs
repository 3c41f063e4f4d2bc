use crate::config::PromptConfig;
use birken_core::Language;

/// 翻译 Prompt：源语言是中日韩时追加注音字段
pub fn translation_prompt(
    prompts: &PromptConfig,
    sentence: &str,
    source: &Language,
    target: &Language,
) -> String {
    let romanization_request = source
        .romanization()
        .map(|kind| prompts.romanization_request.replace("{{romanization_type}}", kind))
        .unwrap_or_default();

    fill(&prompts.translation_prompt, source, target)
        .replace("{{romanization_request}}", &romanization_request)
        // 句子最后替换，避免用户输入里的 {{...}} 被当成占位符
        .replace("{{sentence}}", sentence)
}

/// 语法讲解 Prompt
pub fn grammar_prompt(
    prompts: &PromptConfig,
    sentence: &str,
    source: &Language,
    target: &Language,
) -> String {
    fill(&prompts.grammar_prompt, source, target).replace("{{sentence}}", sentence)
}

fn fill(template: &str, source: &Language, target: &Language) -> String {
    template
        .replace("{{source_language}}", source.display_name())
        .replace("{{target_language}}", target.display_name())
}
