pub mod config;
pub mod llm;
pub mod parse;
pub mod prompts;
pub mod translator;

pub use config::{GeminiConfig, PromptConfig};
pub use llm::gemini::GeminiBackend;
pub use llm::ModelBackend;
pub use translator::{Translator, TranslatorBuilder};
