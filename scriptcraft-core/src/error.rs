use thiserror::Error;

/// Rejections raised before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("invalid request: unknown content kind {0:?}")]
    UnknownContentKind(String),
    #[error("invalid request: unknown tone {0:?}")]
    UnknownTone(String),
    #[error("invalid request: topic must not be empty")]
    EmptyTopic,
}
