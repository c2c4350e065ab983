//! Hand gesture classification.
//!
//! Per-hand shape predicates feed an ordered rule cascade; the first rule
//! satisfied by any present hand decides the gesture. Cross-hand predicates
//! (clasped hands) use the first two hands in detection order, which carries
//! no left/right meaning.

use facetag_models::{
    hand_index, ArmsState, FaceLandmarks, Gesture, HandGestureResult, HandLandmarks,
};

use crate::features::{Finger, HandGeometry};

/// Hands beyond this count are ignored.
pub const MAX_HANDS: usize = 2;

const THUMB_EXTENDED_FACTOR: f64 = 0.75;
const THUMBS_UP_FOLDED_FACTOR: f64 = 0.90;
const POINT_EXTENDED_FACTOR: f64 = 0.55;
const POINT_STRAIGHT_DEGREES: f64 = 160.0;
const POINT_BENT_DEGREES: f64 = 135.0;
const POINT_FOLDED_FACTOR: f64 = 1.10;
const PUNCH_FOLDED_FACTOR: f64 = 0.85;

const CHIN_REST_DISTANCE: f64 = 0.08;
const HANDS_CLASPED_DISTANCE: f64 = 0.12;
const INDEX_CLASPED_DISTANCE: f64 = 0.08;
const NEAR_MOUTH_DISTANCE: f64 = 0.14;

/// Offset below the chin where the shoulder line sits.
const SHOULDER_OFFSET: f64 = 0.12;
/// The shoulder line never drops below this.
const SHOULDER_LINE_MAX: f64 = 0.95;

pub fn is_thumbs_up(geo: &HandGeometry<'_>) -> bool {
    geo.is_extended(Finger::Thumb, THUMB_EXTENDED_FACTOR)
        && Finger::LONG
            .iter()
            .all(|&f| geo.is_folded(f, THUMBS_UP_FOLDED_FACTOR))
}

/// One long finger straight and extended, the other three curled.
fn is_single_finger(geo: &HandGeometry<'_>, raised: Finger) -> bool {
    let extended = geo.is_extended(raised, POINT_EXTENDED_FACTOR)
        && geo.angle(raised) > POINT_STRAIGHT_DEGREES;
    extended
        && Finger::LONG.iter().filter(|&&f| f != raised).all(|&f| {
            geo.angle(f) < POINT_BENT_DEGREES || geo.is_folded(f, POINT_FOLDED_FACTOR)
        })
}

pub fn is_index_point(geo: &HandGeometry<'_>) -> bool {
    is_single_finger(geo, Finger::Index)
}

pub fn is_middle_finger(geo: &HandGeometry<'_>) -> bool {
    is_single_finger(geo, Finger::Middle)
}

/// All four long fingers folded; the thumb is unconstrained.
pub fn is_punch(geo: &HandGeometry<'_>) -> bool {
    Finger::LONG
        .iter()
        .all(|&f| geo.is_folded(f, PUNCH_FOLDED_FACTOR))
}

pub fn is_chin_rest(hand: &HandLandmarks, face: &FaceLandmarks) -> bool {
    hand.center().distance(&face.chin()) < CHIN_REST_DISTANCE
}

pub fn is_hands_clasped(a: &HandLandmarks, b: &HandLandmarks) -> bool {
    a.center().distance(&b.center()) < HANDS_CLASPED_DISTANCE
}

pub fn is_index_clasped(a: &HandLandmarks, b: &HandLandmarks) -> bool {
    a.point(hand_index::INDEX_TIP)
        .distance(&b.point(hand_index::INDEX_TIP))
        < INDEX_CLASPED_DISTANCE
}

/// Wrist and middle MCP both above the shoulder line.
pub fn is_raised_arm(hand: &HandLandmarks, face: &FaceLandmarks) -> bool {
    let shoulder_y = (face.chin().y + SHOULDER_OFFSET).min(SHOULDER_LINE_MAX);
    hand.wrist().y < shoulder_y && hand.point(hand_index::MIDDLE_MCP).y < shoulder_y
}

const NEAR_MOUTH_POINTS: [usize; 6] = [
    hand_index::WRIST,
    hand_index::THUMB_TIP,
    hand_index::INDEX_TIP,
    hand_index::MIDDLE_TIP,
    hand_index::RING_TIP,
    hand_index::PINKY_TIP,
];

pub fn is_hand_near_mouth(hand: &HandLandmarks, face: &FaceLandmarks) -> bool {
    let mouth = face.mouth_center();
    NEAR_MOUTH_POINTS
        .iter()
        .map(|&i| hand.point(i).distance(&mouth))
        .fold(f64::INFINITY, f64::min)
        < NEAR_MOUTH_DISTANCE
}

/// A step of the gesture cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureRule {
    ChinRest,
    MiddleFinger,
    /// Resolves to double or single thumbs depending on how many hands match.
    Thumbs,
    IndexFinger,
    Punch,
}

/// Rules in priority order.
pub const GESTURE_CASCADE: [GestureRule; 5] = [
    GestureRule::ChinRest,
    GestureRule::MiddleFinger,
    GestureRule::Thumbs,
    GestureRule::IndexFinger,
    GestureRule::Punch,
];

impl GestureRule {
    /// Evaluate this rule against all present hands.
    pub fn evaluate(&self, hands: &[HandGeometry<'_>], face: Option<&FaceLandmarks>) -> Option<Gesture> {
        match self {
            GestureRule::ChinRest => {
                let face = face?;
                hands
                    .iter()
                    .any(|g| is_chin_rest(g.hand(), face))
                    .then_some(Gesture::ChinRest)
            }
            GestureRule::MiddleFinger => hands
                .iter()
                .any(is_middle_finger)
                .then_some(Gesture::MiddleFinger),
            GestureRule::Thumbs => match hands.iter().filter(|g| is_thumbs_up(g)).count() {
                0 => None,
                1 => Some(Gesture::ThumbsUp),
                _ => Some(Gesture::DoubleThumbs),
            },
            GestureRule::IndexFinger => hands
                .iter()
                .any(is_index_point)
                .then_some(Gesture::IndexFinger),
            GestureRule::Punch => hands.iter().any(is_punch).then_some(Gesture::Punch),
        }
    }
}

/// Classify up to [`MAX_HANDS`] hands, optionally relative to a face.
///
/// Face-relative predicates (chin rest, raised arms, near mouth) are false
/// when no face is given.
pub fn classify_hands(hands: &[HandLandmarks], face: Option<&FaceLandmarks>) -> HandGestureResult {
    let hands = &hands[..hands.len().min(MAX_HANDS)];
    let geometry: Vec<HandGeometry<'_>> = hands.iter().map(HandGeometry::new).collect();

    let gesture = GESTURE_CASCADE
        .iter()
        .find_map(|rule| rule.evaluate(&geometry, face))
        .unwrap_or(Gesture::None);

    let (hands_clasped, hands_clasped_index) = match hands {
        [a, b, ..] => (is_hands_clasped(a, b), is_index_clasped(a, b)),
        _ => (false, false),
    };

    let (arms, hand_near_mouth) = match face {
        Some(face) => {
            let raised = hands.iter().filter(|h| is_raised_arm(h, face)).count();
            let near = hands.iter().any(|h| is_hand_near_mouth(h, face));
            (ArmsState::from_count(raised), near)
        }
        None => (ArmsState::None, false),
    };

    HandGestureResult {
        gesture,
        arms,
        hand_near_mouth,
        hands_clasped,
        hands_clasped_index,
    }
}
