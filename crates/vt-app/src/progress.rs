use std::sync::Mutex;

use tracing::{debug, info};
use vt_core::{ProgressSink, Stage};

/// Logs each stage once as a job's progress crosses into it.
#[derive(Debug, Default)]
pub struct StageProgress {
    stage: Mutex<Option<Stage>>,
}

impl StageProgress {
    pub fn current(&self) -> Option<Stage> {
        self.stage.lock().map(|s| *s).unwrap_or(None)
    }
}

impl ProgressSink for StageProgress {
    fn observe(&self, progress: f32) {
        debug!(progress, "job progress");

        let next = Stage::from_progress(progress);
        let Ok(mut stage) = self.stage.lock() else {
            return;
        };

        if stage.is_none_or(|s| next > s) {
            info!(stage = next.label(), progress, "{}...", next.label());
            *stage = Some(next);
        }
    }
}
