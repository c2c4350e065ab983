//! Threshold classification of face features into discrete states.

use facetag_models::{EyeState, FaceFeatures, FaceState, HeadState, MouthState};

/// Mouth counts as open strictly above this ratio.
pub const MOUTH_OPEN_THRESHOLD: f64 = 0.30;

/// Eyes count as closed strictly below this ratio.
pub const EYES_CLOSED_THRESHOLD: f64 = 0.18;

/// Resting pitch of a camera-facing head; subtracted before thresholding.
pub const PITCH_BIAS: f64 = 0.20;

/// Adjusted pitch strictly below this is "up".
pub const HEAD_UP_THRESHOLD: f64 = -0.03;

/// Adjusted pitch strictly above this is "down".
pub const HEAD_DOWN_THRESHOLD: f64 = 0.10;

pub fn classify_mouth(mouth_open_ratio: f64) -> MouthState {
    if mouth_open_ratio > MOUTH_OPEN_THRESHOLD {
        MouthState::Open
    } else {
        MouthState::Closed
    }
}

pub fn classify_eyes(eye_open_ratio: f64) -> EyeState {
    if eye_open_ratio < EYES_CLOSED_THRESHOLD {
        EyeState::Closed
    } else {
        EyeState::Open
    }
}

/// Classify raw pitch. Yaw and roll are not classified.
pub fn classify_head(pitch: f64) -> HeadState {
    let adjusted = pitch - PITCH_BIAS;
    if adjusted < HEAD_UP_THRESHOLD {
        HeadState::Up
    } else if adjusted > HEAD_DOWN_THRESHOLD {
        HeadState::Down
    } else {
        HeadState::Neutral
    }
}

pub fn classify_face(features: &FaceFeatures) -> FaceState {
    FaceState {
        mouth: classify_mouth(features.mouth_open_ratio),
        eyes: classify_eyes(features.eye_open_ratio),
        head: classify_head(features.head.pitch),
    }
}
