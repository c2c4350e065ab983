//! Prometheus metrics for the frame loop.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::error::{RunnerError, RunnerResult};

/// Install the Prometheus recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> RunnerResult<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| RunnerError::config_error(format!("failed to install metrics recorder: {e}")))
}

/// Metric names as constants for consistency.
pub mod names {
    pub const FRAMES_PROCESSED_TOTAL: &str = "facetag_frames_processed_total";
    pub const FRAMES_SKIPPED_TOTAL: &str = "facetag_frames_skipped_total";
    pub const CONTENT_SWITCHES_TOTAL: &str = "facetag_content_switches_total";
    pub const FRAME_DURATION_SECONDS: &str = "facetag_frame_duration_seconds";
}

/// Why a frame produced no outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoFace,
    PoseError,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoFace => "no_face",
            SkipReason::PoseError => "pose_error",
        }
    }
}

/// Record a processed frame and how long it took.
pub fn record_frame_processed(duration_secs: f64) {
    counter!(names::FRAMES_PROCESSED_TOTAL).increment(1);
    histogram!(names::FRAME_DURATION_SECONDS).record(duration_secs);
}

pub fn record_frame_skipped(reason: SkipReason) {
    let labels = [("reason", reason.as_str().to_string())];
    counter!(names::FRAMES_SKIPPED_TOTAL, &labels).increment(1);
}

/// Record a content switch, labelled by how the entry was matched.
pub fn record_content_switch(match_kind: &str) {
    let labels = [("match", match_kind.to_string())];
    counter!(names::CONTENT_SWITCHES_TOTAL, &labels).increment(1);
}
