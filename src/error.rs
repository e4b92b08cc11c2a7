// src/error.rs
use thiserror::Error;

/// Shown when the service rejects a request without a usable `error` field
pub const GENERIC_SERVICE_ERROR: &str = "Error parsing resume";
/// Shown when no usable response came back
pub const NETWORK_ERROR: &str = "Network error";

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("service returned {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("response body is not JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(Box::new(e))
    }
}

impl ServiceError {
    /// Text shown to the user; transport details stay in the log
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport(_) | Self::MalformedBody(_) => NETWORK_ERROR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let rejected = ServiceError::Rejected {
            status: 400,
            message: "Unsupported file type".to_string(),
        };
        assert_eq!(rejected.user_message(), "Unsupported file type");

        let transport = ServiceError::Transport("connection refused".into());
        assert_eq!(transport.user_message(), NETWORK_ERROR);

        let malformed: ServiceError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert_eq!(malformed.user_message(), NETWORK_ERROR);
    }
}
