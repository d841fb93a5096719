use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use vt_core::{EncodedImage, JobStatus, JobSubmission};

use crate::api::JobApi;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::schemas::{SyncResponse, TryOnRequest};

/// [`JobApi`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpJobClient {
    client: Client,
    config: ClientConfig,
}

impl HttpJobClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    async fn post(
        &self,
        user: &EncodedImage,
        outfit: &EncodedImage,
        async_mode: bool,
        timeout: Duration,
    ) -> Result<Response, ClientError> {
        let request_body = TryOnRequest::new(user, outfit, async_mode);

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request_body)
            .timeout(timeout)
            .send()
            .await?;

        Ok(response)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::from_response(response).await);
    }

    Ok(response.json().await?)
}

#[async_trait]
impl JobApi for HttpJobClient {
    async fn submit(
        &self,
        user: &EncodedImage,
        outfit: &EncodedImage,
    ) -> Result<JobSubmission, ClientError> {
        let payload_len = user.encoded_len() + outfit.encoded_len();
        debug!(payload_len, "submitting async job");

        let response = self
            .post(user, outfit, true, self.config.submit_timeout)
            .await?;
        let submission: JobSubmission = read_json(response).await?;

        if submission.job_id.trim().is_empty() {
            return Err(ClientError::Decode("submission has no job id".into()));
        }

        info!(job_id = %submission.job_id, "job accepted");
        Ok(submission)
    }

    async fn check_status(&self, job_id: &str) -> Result<JobStatus, ClientError> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("jobId", job_id)])
            .timeout(self.config.status_timeout)
            .send()
            .await?;

        read_json(response).await
    }

    async fn process_sync(
        &self,
        user: &EncodedImage,
        outfit: &EncodedImage,
    ) -> Result<SyncResponse, ClientError> {
        let response = self
            .post(user, outfit, false, self.config.sync_timeout)
            .await?;

        read_json(response).await
    }
}
