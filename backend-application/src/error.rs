use backend_domain::DexParseError;
use thiserror::Error;

/// Application failure classes. Parse errors are user-input class and carry
/// the typed segment/field context; storage and wiring failures stay
/// infrastructure class and propagate the underlying error unchanged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Parse(#[from] DexParseError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
