//! Per-frame processing: landmarks in, stabilized tags out.

use std::time::Duration;

use facetag_models::{
    ActiveTagSet, FaceFeatures, FaceLandmarks, FaceState, HandGestureResult, HandLandmarks,
};
use serde::Serialize;

use crate::face_state::classify_face;
use crate::features::extract_face_features;
use crate::hand_gesture::classify_hands;
use crate::stabilizer::{StabilizerConfig, StabilizerState};
use crate::tags::aggregate_tags;

/// Landmarks captured for one frame.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    /// Time since session start
    pub timestamp: Duration,
    pub face: Option<FaceLandmarks>,
    pub hands: Vec<HandLandmarks>,
}

impl FrameSnapshot {
    pub fn new(timestamp: Duration, face: Option<FaceLandmarks>, hands: Vec<HandLandmarks>) -> Self {
        Self {
            timestamp,
            face,
            hands,
        }
    }
}

/// Everything derived from a processed frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutcome {
    pub timestamp: Duration,
    pub features: FaceFeatures,
    pub face_state: FaceState,
    pub hands: HandGestureResult,
    /// Tags for this frame before debouncing
    pub raw_tags: ActiveTagSet,
    pub stable_tags: ActiveTagSet,
    /// The stable set moved on this frame
    pub stable_changed: bool,
}

/// Process one frame against the previous stabilizer state.
///
/// A frame without a face yields no outcome and returns the state unchanged.
pub fn process_frame(
    snapshot: &FrameSnapshot,
    mut state: StabilizerState,
    config: &StabilizerConfig,
) -> (Option<FrameOutcome>, StabilizerState) {
    let Some(face) = snapshot.face.as_ref() else {
        return (None, state);
    };
    let now = snapshot.timestamp;

    let features = extract_face_features(face);
    let face_state = classify_face(&features);
    let hands = classify_hands(&snapshot.hands, Some(face));

    let eyes_closed_held = state.observe_eyes(face_state.eyes, now, config);
    let raw_tags = aggregate_tags(&face_state, &hands, eyes_closed_held);
    let stable_changed = state.observe_tags(&raw_tags, now, config);

    let outcome = FrameOutcome {
        timestamp: now,
        features,
        face_state,
        hands,
        raw_tags,
        stable_tags: state.stable_tags.clone(),
        stable_changed,
    };
    (Some(outcome), state)
}

/// Owns stabilizer state across frames.
#[derive(Debug, Clone, Default)]
pub struct FramePipeline {
    config: StabilizerConfig,
    state: StabilizerState,
}

impl FramePipeline {
    pub fn new(config: StabilizerConfig) -> Self {
        Self {
            config,
            state: StabilizerState::new(),
        }
    }

    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }

    pub fn state(&self) -> &StabilizerState {
        &self.state
    }

    pub fn process(&mut self, snapshot: &FrameSnapshot) -> Option<FrameOutcome> {
        let state = std::mem::take(&mut self.state);
        let (outcome, state) = process_frame(snapshot, state, &self.config);
        self.state = state;
        outcome
    }
}
