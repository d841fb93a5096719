//! Transport-level failures of the job API.

use thiserror::Error;
use vt_core::TryOnError;

use crate::schemas::ErrorBody;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The remote answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never completed: timeout, refused connection, aborted body.
    #[error("{message}")]
    Network { message: String, timed_out: bool },

    /// The remote answered 2xx with a body the client cannot use.
    #[error("Invalid response from processing service: {0}")]
    Decode(String),
}

impl ClientError {
    /// Build an error from a non-success response, preferring the body's
    /// `error` field as the message.
    pub async fn from_response(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ClientError::from_status_body(status, &body)
    }

    pub fn from_status_body(status: u16, body: &str) -> ClientError {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {}", status));

        ClientError::Http { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// The remote's way of saying it does not accept async submissions.
    pub fn is_async_unsupported(&self) -> bool {
        self.status() == Some(400)
    }

    pub fn into_submission(self) -> TryOnError {
        TryOnError::Submission(self.to_string())
    }

    pub fn into_status_check(self) -> TryOnError {
        TryOnError::StatusCheck(self.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ClientError::Http {
                status: status.as_u16(),
                message: format!("Request failed with status code {}", status.as_u16()),
            };
        }

        if err.is_timeout() {
            ClientError::Network {
                message: "The request timed out".to_string(),
                timed_out: true,
            }
        } else if err.is_connect() {
            ClientError::Network {
                message: "Could not connect to the processing service".to_string(),
                timed_out: false,
            }
        } else if err.is_decode() {
            ClientError::Decode(err.without_url().to_string())
        } else {
            ClientError::Network {
                message: err.without_url().to_string(),
                timed_out: false,
            }
        }
    }
}
