//! 所有 handler 共享的应用状态

use birken_agent::Translator;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub translator: Translator,
}

impl AppState {
    pub fn new(translator: Translator) -> Self {
        Self { translator }
    }
}

pub type SharedState = Arc<AppState>;
