/// Shared error type used across all AriVa crates.
///
/// Every failure that crosses the dispatch boundary is one of these five
/// kinds. Handlers translate collaborator failures into the taxonomy before
/// returning, so no other error shape reaches a caller.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid params: {field}: {message}")]
    InvalidParams { field: String, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("unknown method: {0}")]
    UnknownMethod(String),

    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable kind tag carried in the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParams { .. } => "InvalidParams",
            Self::NotFound(_) => "NotFound",
            Self::Unauthorized(_) => "Unauthorized",
            Self::UnknownMethod(_) => "UnknownMethod",
            Self::ResourceExhausted(_) => "ResourceExhausted",
        }
    }

    /// The offending parameter, when the failure names one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidParams { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Build an `InvalidParams` error naming the offending field.
    pub fn invalid_params(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParams {
            field: field.into(),
            message: message.into(),
        }
    }
}
