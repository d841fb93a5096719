pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod phase;
pub mod schemas;

pub use api::JobApi;
pub use clock::{Clock, TokioClock};
pub use config::ClientConfig;
pub use error::ClientError;
pub use http::HttpJobClient;
pub use orchestrator::Orchestrator;
pub use phase::Phase;
