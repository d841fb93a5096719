/// Receives progress updates for a running job, as a percentage in `[0, 100]`.
///
/// Called synchronously from the polling task, at most once per poll tick.
/// Implementations should return quickly.
pub trait ProgressSink: Send + Sync {
    fn observe(&self, progress: f32);
}

impl<F> ProgressSink for F
where
    F: Fn(f32) + Send + Sync,
{
    fn observe(&self, progress: f32) {
        self(progress)
    }
}

pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    }
}

/// Coarse phases shown to a user while a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Analyzing,
    Processing,
    Finalizing,
}

impl Stage {
    pub fn from_progress(progress: f32) -> Self {
        let progress = clamp_progress(progress);
        if progress < 33.0 {
            Self::Analyzing
        } else if progress < 66.0 {
            Self::Processing
        } else {
            Self::Finalizing
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Analyzing => "Analyzing photos",
            Self::Processing => "AI processing",
            Self::Finalizing => "Finalizing result",
        }
    }
}
