pub mod error;
pub mod language;
pub mod segment;
pub mod types;
pub mod validate;

// 导出让外部使用
pub use error::*;
pub use language::*;
pub use segment::*;
pub use types::*;
