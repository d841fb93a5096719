//! The job lifecycle as an explicit state machine.
//!
//! Transitions are pure functions of the current phase and one remote
//! answer, so each one can be checked without a server or a clock.

use vt_core::{JobState, JobStatus, JobSubmission, ProcessResult, TryOnError};

use crate::error::ClientError;
use crate::schemas::SyncResponse;

pub const SUCCESS_MESSAGE: &str = "Image processed successfully";

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Submitting,
    /// `attempt` counts the status checks already made for `job_id`.
    Polling { job_id: String, attempt: u32 },
    SyncFallback,
    Completed(ProcessResult),
    Failed(TryOnError),
    TimedOut { job_id: String, attempts: u32 },
}

impl Phase {
    pub fn name(&self) -> &str {
        match self {
            Self::Submitting => "submitting",
            Self::Polling { .. } => "polling",
            Self::SyncFallback => "sync_fallback",
            Self::Completed(_) => "completed",
            Self::Failed(_) => "failed",
            Self::TimedOut { .. } => "timed_out",
        }
    }

    pub fn after_submit(result: Result<JobSubmission, ClientError>) -> Phase {
        match result {
            Ok(submission) => Phase::Polling {
                job_id: submission.job_id,
                attempt: 0,
            },
            Err(err) if err.is_async_unsupported() => Phase::SyncFallback,
            Err(err) => Phase::Failed(err.into_submission()),
        }
    }

    /// Advance a polling phase by one observed status.
    ///
    /// Any other phase is returned unchanged.
    pub fn after_poll(self, status: &JobStatus, max_attempts: u32) -> Phase {
        let Phase::Polling { job_id, attempt } = self else {
            return self;
        };

        match status.status {
            JobState::Completed => match status.result_url() {
                Some(url) => Phase::Completed(ProcessResult::new(SUCCESS_MESSAGE, url)),
                None => Phase::Failed(TryOnError::malformed_completion()),
            },
            JobState::Failed => Phase::Failed(TryOnError::job_failed(status.error.clone())),
            JobState::Processing => next_attempt(job_id, attempt, max_attempts),
        }
    }

    /// Count a status check that got no answer against the attempt budget.
    pub fn after_missed_poll(self, max_attempts: u32) -> Phase {
        match self {
            Phase::Polling { job_id, attempt } => next_attempt(job_id, attempt, max_attempts),
            other => other,
        }
    }

    pub fn after_sync(self, result: Result<SyncResponse, ClientError>) -> Phase {
        if !matches!(self, Phase::SyncFallback) {
            return self;
        }

        match result {
            Ok(resp) => {
                let url = resp
                    .image_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty());
                let Some(url) = url else {
                    return Phase::Failed(TryOnError::malformed_completion());
                };

                let message = resp
                    .message
                    .as_deref()
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .unwrap_or(SUCCESS_MESSAGE);
                Phase::Completed(ProcessResult::new(message, url))
            }
            Err(err) if err.is_network() => Phase::Failed(TryOnError::sync_timeout()),
            Err(err) => Phase::Failed(err.into_submission()),
        }
    }
}

fn next_attempt(job_id: String, attempt: u32, max_attempts: u32) -> Phase {
    let attempt = attempt + 1;
    if attempt >= max_attempts {
        Phase::TimedOut {
            job_id,
            attempts: attempt,
        }
    } else {
        Phase::Polling { job_id, attempt }
    }
}
