pub mod error;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod settings;
pub mod state;
