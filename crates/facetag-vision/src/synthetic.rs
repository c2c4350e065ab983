//! Synthetic landmark builders.
//!
//! Produce geometrically plausible faces and hands with exact feature
//! values, for fixtures, demos and recordings without a camera.

use facetag_models::{
    face_index, hand_index, FaceLandmarks, HandLandmarks, LandmarkError, Point2D,
};

/// Half-width of each eye along the corner line.
const EYE_HALF_WIDTH: f64 = 0.03;
/// Half-width of the mouth along the corner line.
const MOUTH_HALF_WIDTH: f64 = 0.05;
const EYE_LINE_Y: f64 = 0.40;
const LEFT_EYE_X: f64 = 0.41;
const RIGHT_EYE_X: f64 = 0.59;
const MOUTH_Y: f64 = 0.60;
const BROW_Y: f64 = 0.35;
const FOREHEAD_Y: f64 = 0.25;
const CHIN_Y: f64 = 0.75;

/// Builds a front-facing face mesh centered at x = 0.5.
#[derive(Debug, Clone, Copy)]
pub struct FaceBuilder {
    mouth_ratio: f64,
    eye_ratio: f64,
    yaw: f64,
    pitch: f64,
}

impl Default for FaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceBuilder {
    /// Resting face: mouth closed, eyes open, head neutral.
    pub fn new() -> Self {
        Self {
            mouth_ratio: 0.1,
            eye_ratio: 0.3,
            yaw: 0.0,
            pitch: 0.2,
        }
    }

    pub fn mouth_ratio(mut self, ratio: f64) -> Self {
        self.mouth_ratio = ratio;
        self
    }

    pub fn eye_ratio(mut self, ratio: f64) -> Self {
        self.eye_ratio = ratio;
        self
    }

    pub fn yaw(mut self, yaw: f64) -> Self {
        self.yaw = yaw;
        self
    }

    /// Raw pitch, before the resting bias is removed.
    pub fn pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn build(&self) -> Result<FaceLandmarks, LandmarkError> {
        let mut points = vec![Point2D::new(0.5, 0.5); face_index::COUNT];

        let lid = self.eye_ratio * EYE_HALF_WIDTH;
        for (center_x, inner, outer, top, bottom, inner_sign) in [
            (
                LEFT_EYE_X,
                face_index::LEFT_EYE_INNER,
                face_index::LEFT_EYE_OUTER,
                face_index::LEFT_EYE_TOP,
                face_index::LEFT_EYE_BOTTOM,
                1.0,
            ),
            (
                RIGHT_EYE_X,
                face_index::RIGHT_EYE_INNER,
                face_index::RIGHT_EYE_OUTER,
                face_index::RIGHT_EYE_TOP,
                face_index::RIGHT_EYE_BOTTOM,
                -1.0,
            ),
        ] {
            points[inner] = Point2D::new(center_x + inner_sign * EYE_HALF_WIDTH, EYE_LINE_Y);
            points[outer] = Point2D::new(center_x - inner_sign * EYE_HALF_WIDTH, EYE_LINE_Y);
            points[top] = Point2D::new(center_x, EYE_LINE_Y - lid);
            points[bottom] = Point2D::new(center_x, EYE_LINE_Y + lid);
        }

        let lip = self.mouth_ratio * MOUTH_HALF_WIDTH;
        points[face_index::MOUTH_LEFT] = Point2D::new(0.5 - MOUTH_HALF_WIDTH, MOUTH_Y);
        points[face_index::MOUTH_RIGHT] = Point2D::new(0.5 + MOUTH_HALF_WIDTH, MOUTH_Y);
        points[face_index::MOUTH_TOP] = Point2D::new(0.5, MOUTH_Y - lip);
        points[face_index::MOUTH_BOTTOM] = Point2D::new(0.5, MOUTH_Y + lip);

        points[face_index::LEFT_EYEBROW] = Point2D::new(LEFT_EYE_X, BROW_Y);
        points[face_index::RIGHT_EYEBROW] = Point2D::new(RIGHT_EYE_X, BROW_Y);
        points[face_index::FOREHEAD] = Point2D::new(0.5, FOREHEAD_Y);
        points[face_index::CHIN] = Point2D::new(0.5, CHIN_Y);

        let eye_span = RIGHT_EYE_X - LEFT_EYE_X;
        let face_height = CHIN_Y - FOREHEAD_Y;
        points[face_index::NOSE_TIP] = Point2D::new(
            0.5 + self.yaw * eye_span,
            EYE_LINE_Y + self.pitch * face_height,
        );

        FaceLandmarks::new(points)
    }
}

/// Canned hand poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandShape {
    OpenPalm,
    Fist,
    ThumbsUp,
    IndexPoint,
    MiddleFinger,
}

impl HandShape {
    fn thumb_extended(&self) -> bool {
        matches!(self, HandShape::OpenPalm | HandShape::ThumbsUp)
    }

    /// Extension of index, middle, ring, pinky.
    fn fingers_extended(&self) -> [bool; 4] {
        match self {
            HandShape::OpenPalm => [true; 4],
            HandShape::Fist | HandShape::ThumbsUp => [false; 4],
            HandShape::IndexPoint => [true, false, false, false],
            HandShape::MiddleFinger => [false, true, false, false],
        }
    }
}

/// MCP x-offsets for index, middle, ring, pinky. Index to pinky spans 0.1.
const MCP_OFFSETS: [f64; 4] = [-0.05, -0.017, 0.017, 0.05];
const MCP_Y: f64 = -0.10;

/// Build an upright hand with its wrist at `wrist`.
///
/// Image y grows downward, so "up" offsets are negative.
pub fn hand(shape: HandShape, wrist: Point2D) -> Result<HandLandmarks, LandmarkError> {
    let at = |dx: f64, dy: f64| Point2D::new(wrist.x + dx, wrist.y + dy);
    let mut points = [wrist; hand_index::COUNT];

    points[hand_index::THUMB_CMC] = at(-0.04, -0.02);
    points[hand_index::THUMB_MCP] = at(-0.07, -0.05);
    points[hand_index::THUMB_IP] = at(-0.08, -0.09);
    points[hand_index::THUMB_TIP] = if shape.thumb_extended() {
        at(-0.08, -0.13)
    } else {
        at(-0.03, -0.08)
    };

    let bases = [
        hand_index::INDEX_MCP,
        hand_index::MIDDLE_MCP,
        hand_index::RING_MCP,
        hand_index::PINKY_MCP,
    ];
    for ((mcp, dx), extended) in bases
        .into_iter()
        .zip(MCP_OFFSETS)
        .zip(shape.fingers_extended())
    {
        // Joints of one finger are consecutive: MCP, PIP, DIP, TIP.
        points[mcp] = at(dx, MCP_Y);
        if extended {
            points[mcp + 1] = at(dx, MCP_Y - 0.04);
            points[mcp + 2] = at(dx, MCP_Y - 0.07);
            points[mcp + 3] = at(dx, MCP_Y - 0.10);
        } else {
            points[mcp + 1] = at(dx, MCP_Y - 0.03);
            points[mcp + 2] = at(dx, MCP_Y + 0.02);
            points[mcp + 3] = at(dx, MCP_Y + 0.06);
        }
    }

    HandLandmarks::from_array(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_builder_valid() {
        let face = FaceBuilder::new().build().unwrap();
        assert_eq!(face.points().len(), face_index::COUNT);
        assert_eq!(face.chin(), Point2D::new(0.5, CHIN_Y));
    }

    #[test]
    fn test_non_finite_input_rejected() {
        assert!(FaceBuilder::new().mouth_ratio(f64::NAN).build().is_err());
        assert!(hand(HandShape::Fist, Point2D::new(f64::INFINITY, 0.5)).is_err());
    }

    #[test]
    fn test_hand_wrist_placement() {
        let h = hand(HandShape::OpenPalm, Point2D::new(0.3, 0.7)).unwrap();
        assert_eq!(h.wrist(), Point2D::new(0.3, 0.7));
        assert!(h.point(hand_index::MIDDLE_TIP).y < h.point(hand_index::MIDDLE_MCP).y);
    }
}
