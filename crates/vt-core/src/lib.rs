pub mod encoder;
pub mod error;
pub mod job;
pub mod media_type;
pub mod progress;
pub mod source;

pub use encoder::EncodedImage;
pub use error::{Result, TryOnError};
pub use job::{JobState, JobStatus, JobSubmission, ProcessResult};
pub use progress::{ProgressSink, Stage};
pub use source::{ImageSource, InMemoryImage};
