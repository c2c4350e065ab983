//! Geometric feature extraction from raw landmark sets.
//!
//! Everything here is pure. Degenerate geometry (coincident points, zero-width
//! eyes) never produces NaN: denominators are guarded and the inverse cosine
//! argument is clamped.

use facetag_models::{face_index, hand_index, FaceFeatures, FaceLandmarks, HandLandmarks, HeadPose, Point2D};

/// Lower bound for the index-MCP to pinky-MCP hand scale.
///
/// Keeps distance thresholds sane when the hand is seen nearly edge-on.
pub const MIN_HAND_SCALE: f64 = 0.1;

/// `numerator / denominator`, or 0 when the denominator vanishes.
#[inline]
fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Replace an exactly-zero denominator with 1.
#[inline]
fn or_one(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}

struct EyeCorners {
    inner: usize,
    outer: usize,
    top: usize,
    bottom: usize,
}

const LEFT_EYE: EyeCorners = EyeCorners {
    inner: face_index::LEFT_EYE_INNER,
    outer: face_index::LEFT_EYE_OUTER,
    top: face_index::LEFT_EYE_TOP,
    bottom: face_index::LEFT_EYE_BOTTOM,
};

const RIGHT_EYE: EyeCorners = EyeCorners {
    inner: face_index::RIGHT_EYE_INNER,
    outer: face_index::RIGHT_EYE_OUTER,
    top: face_index::RIGHT_EYE_TOP,
    bottom: face_index::RIGHT_EYE_BOTTOM,
};

impl EyeCorners {
    fn openness(&self, face: &FaceLandmarks) -> f64 {
        let open = face.point(self.top).distance(&face.point(self.bottom));
        let width = face.point(self.inner).distance(&face.point(self.outer));
        safe_ratio(open, width)
    }

    fn center(&self, face: &FaceLandmarks) -> Point2D {
        face.point(self.inner).midpoint(&face.point(self.outer))
    }
}

/// Compute per-frame face features.
pub fn extract_face_features(face: &FaceLandmarks) -> FaceFeatures {
    let eye_open_ratio = (LEFT_EYE.openness(face) + RIGHT_EYE.openness(face)) / 2.0;

    let mouth_open = face
        .point(face_index::MOUTH_TOP)
        .distance(&face.point(face_index::MOUTH_BOTTOM));
    let mouth_width = face
        .point(face_index::MOUTH_LEFT)
        .distance(&face.point(face_index::MOUTH_RIGHT));
    let mouth_open_ratio = safe_ratio(mouth_open, mouth_width);

    let left_brow = face
        .point(face_index::LEFT_EYEBROW)
        .distance(&face.point(face_index::LEFT_EYE_TOP));
    let right_brow = face
        .point(face_index::RIGHT_EYEBROW)
        .distance(&face.point(face_index::RIGHT_EYE_TOP));
    let eyebrow_raise = (left_brow + right_brow) / 2.0;

    FaceFeatures {
        mouth_open_ratio,
        eye_open_ratio,
        eyebrow_raise,
        head: head_pose(face),
    }
}

/// Estimate yaw/pitch/roll from the eye line, nose tip and face height.
pub fn head_pose(face: &FaceLandmarks) -> HeadPose {
    let left = LEFT_EYE.center(face);
    let right = RIGHT_EYE.center(face);

    let eye_dx = right.x - left.x;
    let eye_dy = right.y - left.y;
    let roll = eye_dy.atan2(eye_dx);

    let eye_mid = left.midpoint(&right);
    let nose = face.point(face_index::NOSE_TIP);
    let face_height = face.point(face_index::CHIN).y - face.point(face_index::FOREHEAD).y;

    HeadPose {
        yaw: (nose.x - eye_mid.x) / or_one(eye_dx).abs(),
        pitch: (nose.y - eye_mid.y) / or_one(face_height),
        roll,
    }
}

/// Angle in degrees at `joint` between the rays to `a` and `b`.
///
/// Returns 0 when either ray has zero length.
pub fn joint_angle(a: Point2D, joint: Point2D, b: Point2D) -> f64 {
    let (v1x, v1y) = (a.x - joint.x, a.y - joint.y);
    let (v2x, v2y) = (b.x - joint.x, b.y - joint.y);
    let mag1 = v1x.hypot(v1y);
    let mag2 = v2x.hypot(v2y);
    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }
    let cosine = ((v1x * v2x + v1y * v2y) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

/// A digit of the hand, with the joints the classifiers read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// The four non-thumb fingers.
    pub const LONG: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// Base joint. For the thumb this is its MCP.
    pub fn mcp(&self) -> usize {
        match self {
            Finger::Thumb => hand_index::THUMB_MCP,
            Finger::Index => hand_index::INDEX_MCP,
            Finger::Middle => hand_index::MIDDLE_MCP,
            Finger::Ring => hand_index::RING_MCP,
            Finger::Pinky => hand_index::PINKY_MCP,
        }
    }

    /// Middle joint. For the thumb this is its IP joint.
    pub fn pip(&self) -> usize {
        match self {
            Finger::Thumb => hand_index::THUMB_IP,
            Finger::Index => hand_index::INDEX_PIP,
            Finger::Middle => hand_index::MIDDLE_PIP,
            Finger::Ring => hand_index::RING_PIP,
            Finger::Pinky => hand_index::PINKY_PIP,
        }
    }

    pub fn tip(&self) -> usize {
        match self {
            Finger::Thumb => hand_index::THUMB_TIP,
            Finger::Index => hand_index::INDEX_TIP,
            Finger::Middle => hand_index::MIDDLE_TIP,
            Finger::Ring => hand_index::RING_TIP,
            Finger::Pinky => hand_index::PINKY_TIP,
        }
    }
}

/// Scale-normalized geometry queries over one hand.
#[derive(Debug, Clone, Copy)]
pub struct HandGeometry<'a> {
    hand: &'a HandLandmarks,
    scale: f64,
}

impl<'a> HandGeometry<'a> {
    pub fn new(hand: &'a HandLandmarks) -> Self {
        Self {
            hand,
            scale: hand_scale(hand),
        }
    }

    pub fn hand(&self) -> &'a HandLandmarks {
        self.hand
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn tip_to_wrist(&self, finger: Finger) -> f64 {
        self.hand.point(finger.tip()).distance(&self.hand.wrist())
    }

    /// Tip above its middle joint and far enough from the wrist.
    pub fn is_extended(&self, finger: Finger, factor: f64) -> bool {
        let tip = self.hand.point(finger.tip());
        let pip = self.hand.point(finger.pip());
        tip.y < pip.y && self.tip_to_wrist(finger) > self.scale * factor
    }

    /// Tip pulled in close to the wrist.
    pub fn is_folded(&self, finger: Finger, factor: f64) -> bool {
        self.tip_to_wrist(finger) < self.scale * factor
    }

    /// Angle at the middle joint in degrees (180 = straight).
    pub fn angle(&self, finger: Finger) -> f64 {
        joint_angle(
            self.hand.point(finger.mcp()),
            self.hand.point(finger.pip()),
            self.hand.point(finger.tip()),
        )
    }
}

/// Index-MCP to pinky-MCP distance, floored at [`MIN_HAND_SCALE`].
pub fn hand_scale(hand: &HandLandmarks) -> f64 {
    hand.point(hand_index::INDEX_MCP)
        .distance(&hand.point(hand_index::PINKY_MCP))
        .max(MIN_HAND_SCALE)
}
