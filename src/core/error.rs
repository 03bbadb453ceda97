use thiserror::Error;

/// Errors raised by the bot outside the conversation engine
///
/// Transport, session and configuration failures are converted to this enum
/// so the handler tree can log them uniformly. The engine itself is
/// infallible: bad input becomes a re-prompt, not an error.
///
/// ```no_run
/// use paywizard::core::error::{AppError, AppResult};
///
/// fn require_token(token: &str) -> AppResult<()> {
///     if token.is_empty() {
///         return Err(AppError::Config("BOT_TOKEN is empty".to_string()));
///     }
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors (failed sends, webhook setup)
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Dialogue storage errors
    #[error("Session error: {0}")]
    Session(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything bubbling up from `anyhow` contexts
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result carrying an [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

impl From<teloxide::dispatching::dialogue::InMemStorageError> for AppError {
    fn from(err: teloxide::dispatching::dialogue::InMemStorageError) -> Self {
        AppError::Session(err.to_string())
    }
}
