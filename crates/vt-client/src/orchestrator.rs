//! Drives one try-on job from submission to a single outcome.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::future::try_join;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;
use vt_core::encoder::encode_source;
use vt_core::progress::clamp_progress;
use vt_core::{EncodedImage, ImageSource, ProcessResult, ProgressSink, TryOnError};

use crate::api::JobApi;
use crate::clock::{Clock, TokioClock};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::HttpJobClient;
use crate::phase::Phase;

pub struct Orchestrator<A, C = TokioClock> {
    api: A,
    clock: C,
    config: ClientConfig,
    sync_only: bool,
}

impl Orchestrator<HttpJobClient> {
    pub fn http(config: ClientConfig) -> Result<Self, ClientError> {
        let api = HttpJobClient::new(config.clone())?;
        Ok(Self::new(api, config))
    }
}

impl<A: JobApi> Orchestrator<A> {
    pub fn new(api: A, config: ClientConfig) -> Self {
        Self {
            api,
            clock: TokioClock,
            config,
            sync_only: false,
        }
    }
}

impl<A: JobApi, C: Clock> Orchestrator<A, C> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Orchestrator<A, C2> {
        Orchestrator {
            api: self.api,
            clock,
            config: self.config,
            sync_only: self.sync_only,
        }
    }

    /// Skip async submission and go straight to the blocking request.
    pub fn sync_only(mut self, sync_only: bool) -> Self {
        self.sync_only = sync_only;
        self
    }

    /// Encode both images and run the job to a single outcome.
    ///
    /// A successful result always carries a non-empty image URL. Every
    /// failure is flattened into one [`TryOnError`] whose `Display` is the
    /// message to show.
    pub async fn process_images(
        &self,
        user: Arc<dyn ImageSource>,
        outfit: Arc<dyn ImageSource>,
        progress: Option<&dyn ProgressSink>,
    ) -> Result<ProcessResult, TryOnError> {
        async move {
            let (user, outfit) = try_join(encode_blocking(user), encode_blocking(outfit)).await?;
            self.drive(&user, &outfit, progress).await
        }
        .instrument(call_span())
        .await
    }

    /// Run the job for images that are already encoded.
    pub async fn process_encoded(
        &self,
        user: &EncodedImage,
        outfit: &EncodedImage,
        progress: Option<&dyn ProgressSink>,
    ) -> Result<ProcessResult, TryOnError> {
        self.drive(user, outfit, progress)
            .instrument(call_span())
            .await
    }

    async fn drive(
        &self,
        user: &EncodedImage,
        outfit: &EncodedImage,
        progress: Option<&dyn ProgressSink>,
    ) -> Result<ProcessResult, TryOnError> {
        let mut missed_polls = 0;
        let mut phase = if self.sync_only {
            Phase::SyncFallback
        } else {
            Phase::Submitting
        };

        loop {
            debug!(phase = phase.name(), "advancing job");

            phase = match phase {
                Phase::Submitting => {
                    let next = Phase::after_submit(self.api.submit(user, outfit).await);
                    if next == Phase::SyncFallback {
                        info!("remote rejected async mode, retrying as a blocking request");
                    }
                    next
                }
                polling @ Phase::Polling { .. } => {
                    self.poll_once(polling, &mut missed_polls, progress).await
                }
                Phase::SyncFallback => {
                    Phase::SyncFallback.after_sync(self.api.process_sync(user, outfit).await)
                }
                Phase::Completed(result) => {
                    info!(image_url = %result.image_url, "job completed");
                    return Ok(result);
                }
                Phase::Failed(err) => {
                    warn!(error = %err, "job failed");
                    return Err(err);
                }
                Phase::TimedOut { job_id, attempts } => {
                    warn!(%job_id, attempts, "job still processing after the last attempt");
                    return Err(TryOnError::processing_timeout());
                }
            };
        }
    }

    async fn poll_once(
        &self,
        phase: Phase,
        missed_polls: &mut u32,
        progress: Option<&dyn ProgressSink>,
    ) -> Phase {
        let max_attempts = self.config.max_attempts.max(1);
        let Phase::Polling { job_id, attempt } = &phase else {
            return phase;
        };
        let attempt = *attempt;

        if attempt > 0 {
            self.clock.sleep(self.config.poll_interval).await;
        }

        match self.api.check_status(job_id).await {
            Ok(status) => {
                debug!(
                    %job_id,
                    attempt,
                    status = ?status.status,
                    progress = ?status.progress,
                    "polled job"
                );
                if status.status.is_active() {
                    if let (Some(sink), Some(value)) = (progress, status.progress) {
                        notify(sink, value);
                    }
                }
                phase.after_poll(&status, max_attempts)
            }
            Err(err) if err.is_network() && *missed_polls < self.config.status_retries => {
                *missed_polls += 1;
                warn!(%job_id, attempt, error = %err, "status check failed, will retry");
                phase.after_missed_poll(max_attempts)
            }
            Err(err) => Phase::Failed(err.into_status_check()),
        }
    }
}

fn call_span() -> tracing::Span {
    info_span!("process_images", call_id = %Uuid::new_v4())
}

async fn encode_blocking(source: Arc<dyn ImageSource>) -> Result<EncodedImage, TryOnError> {
    tokio::task::spawn_blocking(move || encode_source(source.as_ref()))
        .await
        .map_err(|e| TryOnError::Encoding(format!("encoder task failed: {}", e)))?
}

fn notify(sink: &dyn ProgressSink, value: f32) {
    let value = clamp_progress(value);
    if panic::catch_unwind(AssertUnwindSafe(|| sink.observe(value))).is_err() {
        warn!(progress = value, "progress sink panicked, ignoring");
    }
}
