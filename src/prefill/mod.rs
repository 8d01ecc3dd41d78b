pub mod config;
pub mod providers;
pub mod resolver;
pub mod types;

pub use config::*;
pub use providers::*;
pub use resolver::*;
pub use types::*;
