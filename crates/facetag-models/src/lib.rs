//! Shared data models for the facetag pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Normalized 2D points and fixed-index landmark sets (face mesh, hands)
//! - Per-frame face features and discrete face states
//! - Hand gesture results
//! - The closed tag vocabulary and active tag sets
//! - Content catalog entries

pub mod content;
pub mod face;
pub mod gesture;
pub mod landmarks;
pub mod point;
pub mod tag;

// Re-export common types
pub use content::{catalog_schema, ContentEntry};
pub use face::{EyeState, FaceFeatures, FaceState, HeadPose, HeadState, MouthState};
pub use gesture::{ArmsState, Gesture, HandGestureResult};
pub use landmarks::{face_index, hand_index, FaceLandmarks, HandLandmarks, LandmarkError};
pub use point::Point2D;
pub use tag::{ActiveTagSet, Tag, TagParseError};
