//! Error types for landmark processing.

use facetag_models::LandmarkError;
use thiserror::Error;

/// Result type for vision operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Errors that can occur while acquiring or validating landmarks.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Pose source failed: {0}")]
    PoseSourceFailed(String),

    #[error("Frame source failed: {0}")]
    FrameSourceFailed(String),

    #[error("Invalid landmarks: {0}")]
    InvalidLandmarks(#[from] LandmarkError),
}

impl VisionError {
    /// Create a pose source failure error.
    pub fn pose_source_failed(message: impl Into<String>) -> Self {
        Self::PoseSourceFailed(message.into())
    }

    /// Create a frame source failure error.
    pub fn frame_source_failed(message: impl Into<String>) -> Self {
        Self::FrameSourceFailed(message.into())
    }
}
