use std::sync::Arc;

use async_trait::async_trait;
use vt_core::{EncodedImage, JobStatus, JobSubmission};

use crate::error::ClientError;
use crate::schemas::SyncResponse;

/// Request/response exchanges with the remote try-on service.
///
/// Every method is a single stateless request; retries and sequencing
/// belong to the orchestrator.
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Submit a job in async mode.
    async fn submit(
        &self,
        user: &EncodedImage,
        outfit: &EncodedImage,
    ) -> Result<JobSubmission, ClientError>;

    async fn check_status(&self, job_id: &str) -> Result<JobStatus, ClientError>;

    /// Run the whole transformation in one blocking request.
    async fn process_sync(
        &self,
        user: &EncodedImage,
        outfit: &EncodedImage,
    ) -> Result<SyncResponse, ClientError>;
}

#[async_trait]
impl<T: JobApi + ?Sized> JobApi for Arc<T> {
    async fn submit(
        &self,
        user: &EncodedImage,
        outfit: &EncodedImage,
    ) -> Result<JobSubmission, ClientError> {
        (**self).submit(user, outfit).await
    }

    async fn check_status(&self, job_id: &str) -> Result<JobStatus, ClientError> {
        (**self).check_status(job_id).await
    }

    async fn process_sync(
        &self,
        user: &EncodedImage,
        outfit: &EncodedImage,
    ) -> Result<SyncResponse, ClientError> {
        (**self).process_sync(user, outfit).await
    }
}
