pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status. Displays as the server-supplied message only.
    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Sign in required")]
    Unauthenticated,

    #[error("You've already applied for this position")]
    AlreadyApplied(i64),

    #[error("No job selected")]
    NoActiveApplication,
}

impl Error {
    /// Text suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(errors) => crate::utils::validation::first_message(errors),
            Error::Network(_) => "Network error, please check your connection".to_string(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request { status, .. } => Some(*status),
            Error::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
