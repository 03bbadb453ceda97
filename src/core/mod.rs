//! Core utilities: configuration, errors, logging and rate limiting

pub mod config;
pub mod error;
pub mod logging;
pub mod rate_limiter;

// Re-exports for convenience
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_startup_configuration};
