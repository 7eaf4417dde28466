use thiserror::Error;

/// Failures on the generation-backend boundary. Every variant is caught
/// inside the composer and degrades to canned fallback content; none of
/// them ever reaches the interactive loop.
#[derive(Error, Debug)]
pub enum SpinError {
    #[error("transport failure: {0}")] Transport(String),
    #[error("provider failure: {0}")] Provider(String),
    #[error("validation failure: {0}")] Validation(String),
}

impl From<reqwest::Error> for SpinError {
    fn from(e: reqwest::Error) -> Self {
        SpinError::Transport(e.to_string())
    }
}
