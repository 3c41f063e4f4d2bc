pub mod grammar;
pub mod process;
pub mod system;
