//! Facetag runner library.
//!
//! Wires the vision pipeline and the content catalog into a frame loop
//! driven by a recorded landmark session.

pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod metrics;
pub mod replay;
pub mod session;

pub use config::RunnerConfig;
pub use error::{RunnerError, RunnerResult};
pub use executor::{FrameExecutor, Observation, PipelineStatus, RunSummary};
pub use logging::SessionLogger;
pub use replay::{RecordedFrame, RecordedSession, ReplayDriver, ReplayPoses};
pub use session::run_session;
