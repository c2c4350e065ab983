//! Landmark processing for facetag.
//!
//! This crate turns per-frame face and hand landmarks into a stabilized set
//! of descriptive tags:
//! - geometric feature extraction ([`features`])
//! - face state thresholds ([`face_state`])
//! - the hand gesture cascade ([`hand_gesture`])
//! - tag aggregation ([`tags`]) and temporal stabilization ([`stabilizer`])
//!
//! [`pipeline::process_frame`] chains them for one frame. Frame delivery and
//! pose inference sit behind the traits in [`source`].

pub mod error;
pub mod face_state;
pub mod features;
pub mod hand_gesture;
pub mod pipeline;
pub mod source;
pub mod stabilizer;
pub mod synthetic;
pub mod tags;


pub use error::{VisionError, VisionResult};
pub use face_state::classify_face;
pub use features::{extract_face_features, hand_scale, joint_angle, Finger, HandGeometry};
pub use hand_gesture::{classify_hands, GestureRule, GESTURE_CASCADE, MAX_HANDS};
pub use pipeline::{process_frame, FrameOutcome, FramePipeline, FrameSnapshot};
pub use source::{capture_snapshot, CapturedFrame, FrameDriver, PoseSource};
pub use stabilizer::{StabilizerConfig, StabilizerState};
pub use tags::aggregate_tags;
