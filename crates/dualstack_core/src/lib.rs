pub mod config;
pub mod error_handler;
pub mod logging;

pub use config::DualstackConfig;
pub use error_handler::{DualstackError, ErrorCategory};
