use thiserror::Error;

pub type Result<T> = std::result::Result<T, TryOnError>;

/// Failures surfaced to the caller of a try-on call.
///
/// `Display` is the one user-facing message for the call. Transport details
/// are flattened into that message before a value of this type is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TryOnError {
    /// An input image could not be read or encoded.
    #[error("Failed to read image: {0}")]
    Encoding(String),

    /// The remote rejected the job, or could not be reached, at submit time.
    #[error("{0}")]
    Submission(String),

    /// The remote could not be reached while polling a job.
    #[error("{0}")]
    StatusCheck(String),

    /// The job failed, finished malformed, or ran out of polling attempts.
    #[error("{0}")]
    Processing(String),

    /// A network deadline elapsed on the blocking request path.
    #[error("{0}")]
    Timeout(String),
}

pub const MALFORMED_COMPLETION: &str =
    "Malformed completion: the job finished without a result image URL";
pub const PROCESSING_TIMEOUT: &str =
    "Processing timeout: the job did not finish in time. Please try again";
pub const PROCESSING_FAILED: &str = "Processing failed";
pub const SYNC_TIMEOUT: &str =
    "Request timed out. Please try again with smaller images";

impl TryOnError {
    pub fn malformed_completion() -> Self {
        Self::Processing(MALFORMED_COMPLETION.to_string())
    }

    pub fn processing_timeout() -> Self {
        Self::Processing(PROCESSING_TIMEOUT.to_string())
    }

    /// Job-reported failure, falling back to a generic message when the
    /// remote gave no reason.
    pub fn job_failed(reason: Option<String>) -> Self {
        match reason.filter(|r| !r.trim().is_empty()) {
            Some(reason) => Self::Processing(reason),
            None => Self::Processing(PROCESSING_FAILED.to_string()),
        }
    }

    pub fn sync_timeout() -> Self {
        Self::Timeout(SYNC_TIMEOUT.to_string())
    }
}
