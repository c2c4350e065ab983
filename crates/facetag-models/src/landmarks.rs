//! Fixed-index landmark sets for one detected face or hand.
//!
//! # Face layout (MediaPipe face mesh, 468 points; 478 with refined irises)
//!
//! Only the indices in [`face_index`] are read by the classifiers.
//!
//! # Hand layout (21 points)
//!
//! - 0: Wrist
//! - 1-4: Thumb CMC, MCP, IP, TIP
//! - 5-8: Index MCP, PIP, DIP, TIP
//! - 9-12: Middle MCP, PIP, DIP, TIP
//! - 13-16: Ring MCP, PIP, DIP, TIP
//! - 17-20: Pinky MCP, PIP, DIP, TIP
//!
//! A missing detection is represented by the absence of a set, never by a
//! zero-filled one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::point::Point2D;

/// Face mesh indices used by feature extraction.
pub mod face_index {
    /// Minimum number of points in a face mesh.
    pub const COUNT: usize = 468;

    pub const LEFT_EYE_INNER: usize = 133;
    pub const LEFT_EYE_OUTER: usize = 33;
    pub const LEFT_EYE_TOP: usize = 159;
    pub const LEFT_EYE_BOTTOM: usize = 145;

    pub const RIGHT_EYE_INNER: usize = 362;
    pub const RIGHT_EYE_OUTER: usize = 263;
    pub const RIGHT_EYE_TOP: usize = 386;
    pub const RIGHT_EYE_BOTTOM: usize = 374;

    pub const MOUTH_LEFT: usize = 78;
    pub const MOUTH_RIGHT: usize = 308;
    pub const MOUTH_TOP: usize = 13;
    pub const MOUTH_BOTTOM: usize = 14;

    pub const LEFT_EYEBROW: usize = 105;
    pub const RIGHT_EYEBROW: usize = 334;

    pub const NOSE_TIP: usize = 1;
    pub const CHIN: usize = 152;
    pub const FOREHEAD: usize = 10;
}

/// Hand landmark indices.
pub mod hand_index {
    /// Exact number of points in a hand set.
    pub const COUNT: usize = 21;

    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Errors raised when building a landmark set from raw points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LandmarkError {
    #[error("Face landmark set needs at least {expected} points, got {actual}")]
    FaceTooShort { expected: usize, actual: usize },

    #[error("Hand landmark set needs exactly {expected} points, got {actual}")]
    HandWrongLength { expected: usize, actual: usize },

    #[error("Landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

fn check_finite(points: &[Point2D]) -> Result<(), LandmarkError> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(LandmarkError::NonFinite { index }),
        None => Ok(()),
    }
}

/// Face mesh landmarks for one detected face.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2D>", into = "Vec<Point2D>")]
pub struct FaceLandmarks {
    points: Vec<Point2D>,
}

impl FaceLandmarks {
    /// Build a face set, validating length and coordinates.
    pub fn new(points: Vec<Point2D>) -> Result<Self, LandmarkError> {
        if points.len() < face_index::COUNT {
            return Err(LandmarkError::FaceTooShort {
                expected: face_index::COUNT,
                actual: points.len(),
            });
        }
        check_finite(&points)?;
        Ok(Self { points })
    }

    /// Point at a face mesh index.
    ///
    /// Indices from [`face_index`] are always in range.
    #[inline]
    pub fn point(&self, index: usize) -> Point2D {
        self.points[index]
    }

    /// All points in mesh order.
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn chin(&self) -> Point2D {
        self.point(face_index::CHIN)
    }

    /// Midpoint of the inner upper and lower lip.
    pub fn mouth_center(&self) -> Point2D {
        self.point(face_index::MOUTH_TOP)
            .midpoint(&self.point(face_index::MOUTH_BOTTOM))
    }
}

impl TryFrom<Vec<Point2D>> for FaceLandmarks {
    type Error = LandmarkError;

    fn try_from(points: Vec<Point2D>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<FaceLandmarks> for Vec<Point2D> {
    fn from(face: FaceLandmarks) -> Self {
        face.points
    }
}

/// 21-point landmarks for one detected hand.
///
/// No left/right identity is implied; the order of hands within a frame is
/// whatever the pose source produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2D>", into = "Vec<Point2D>")]
pub struct HandLandmarks {
    points: [Point2D; hand_index::COUNT],
}

impl HandLandmarks {
    /// Build a hand set, validating length and coordinates.
    pub fn new(points: Vec<Point2D>) -> Result<Self, LandmarkError> {
        check_finite(&points)?;
        let actual = points.len();
        let points: [Point2D; hand_index::COUNT] =
            points
                .try_into()
                .map_err(|_| LandmarkError::HandWrongLength {
                    expected: hand_index::COUNT,
                    actual,
                })?;
        Ok(Self { points })
    }

    /// Build a hand set from a fixed array.
    pub fn from_array(points: [Point2D; hand_index::COUNT]) -> Result<Self, LandmarkError> {
        check_finite(&points)?;
        Ok(Self { points })
    }

    #[inline]
    pub fn point(&self, index: usize) -> Point2D {
        self.points[index]
    }

    pub fn points(&self) -> &[Point2D; hand_index::COUNT] {
        &self.points
    }

    pub fn wrist(&self) -> Point2D {
        self.point(hand_index::WRIST)
    }

    /// Midpoint of the wrist and the middle-finger MCP joint.
    pub fn center(&self) -> Point2D {
        self.wrist().midpoint(&self.point(hand_index::MIDDLE_MCP))
    }
}

impl TryFrom<Vec<Point2D>> for HandLandmarks {
    type Error = LandmarkError;

    fn try_from(points: Vec<Point2D>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<HandLandmarks> for Vec<Point2D> {
    fn from(hand: HandLandmarks) -> Self {
        hand.points.to_vec()
    }
}
