use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Processing,
    Completed,
    Failed,
}

impl JobState {
    /// Only `processing` reports progress; `completed` and `failed` never
    /// transition again for a given job id.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Processing)
    }
}

/// Returned by an async-mode submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobSubmission {
    pub job_id: String,
    pub status: JobState,
    #[serde(default)]
    pub message: String,
}

/// One observation of a job's state on the remote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub job_id: String,
    pub status: JobState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
}

impl JobStatus {
    pub fn processing(job_id: impl Into<String>, progress: Option<f32>) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobState::Processing,
            image_url: None,
            error: None,
            progress,
        }
    }

    pub fn completed(job_id: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobState::Completed,
            image_url,
            error: None,
            progress: Some(100.0),
        }
    }

    pub fn failed(job_id: impl Into<String>, error: Option<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobState::Failed,
            image_url: None,
            error,
            progress: None,
        }
    }

    /// The result URL, if present and non-empty.
    pub fn result_url(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// The single successful outcome of a try-on call, whichever path produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    #[serde(default)]
    pub message: String,
    pub image_url: String,
}

impl ProcessResult {
    pub fn new(message: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            image_url: image_url.into(),
        }
    }
}
