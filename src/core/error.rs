//! Startup error type. Anything that fails before the processing loop
//! starts ends up here and exits the binary with status 1.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),
}
