use thiserror::Error;

/// Shown for every failure that never produced an application-level reply.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Used when the server answers `success: false` without saying why.
pub const DEFAULT_REJECTION_MESSAGE: &str = "An error occurred. Please try again.";

/// Input problems detected locally. Raising one of these never issues a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a job title or keyword")]
    EmptyQuery,

    #[error("Password does not meet requirements")]
    PasswordPolicy,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("A search is already in progress")]
    SearchInFlight,

    #[error("Request a reset code before choosing a new password")]
    MissingResetEmail,
}

/// Failures of a request that did reach for the network.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The server answered `{success: false, message}`. The message is rendered verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RequestError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        RequestError::Rejected {
            status,
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string()),
        }
    }

    pub fn transport(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        RequestError::Transport(error.into())
    }

    /// The text a user sees for this failure.
    pub fn user_message(&self) -> String {
        match self {
            RequestError::Rejected { message, .. } => message.clone(),
            RequestError::Transport(e) => {
                tracing::error!("Transport error: {e}");
                NETWORK_ERROR_MESSAGE.to_string()
            }
            RequestError::Decode(e) => {
                tracing::error!("Could not decode server reply: {e}");
                NETWORK_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(error: reqwest::Error) -> Self {
        RequestError::Transport(Box::new(error))
    }
}

/// Error type returned by page controller actions.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl ClientError {
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(e) => e.to_string(),
            ClientError::Request(e) => e.user_message(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_is_verbatim() {
        let err = RequestError::rejected(401, Some("Not authenticated".into()));
        assert_eq!(err.user_message(), "Not authenticated");
    }

    #[test]
    fn test_rejected_without_message_uses_fallback() {
        let err = RequestError::rejected(400, None);
        assert_eq!(err.user_message(), DEFAULT_REJECTION_MESSAGE);
        let err = RequestError::rejected(400, Some("  ".into()));
        assert_eq!(err.user_message(), DEFAULT_REJECTION_MESSAGE);
    }

    #[test]
    fn test_transport_uses_generic_message() {
        let err = ClientError::from(RequestError::transport("connection refused"));
        assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
        assert!(!err.is_validation());
    }

    #[test]
    fn test_decode_uses_generic_message() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = RequestError::from(json_err);
        assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn test_validation_message() {
        let err = ClientError::from(ValidationError::EmptyQuery);
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "Please enter a job title or keyword");
    }
}
