//! Hand gesture classification results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The single gesture label resolved for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    #[default]
    None,
    ChinRest,
    MiddleFinger,
    DoubleThumbs,
    ThumbsUp,
    IndexFinger,
    Punch,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::None => "none",
            Gesture::ChinRest => "chin_rest",
            Gesture::MiddleFinger => "middle_finger",
            Gesture::DoubleThumbs => "double_thumbs",
            Gesture::ThumbsUp => "thumbs_up",
            Gesture::IndexFinger => "index_finger",
            Gesture::Punch => "punch",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How many arms are raised above the shoulder line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArmsState {
    #[default]
    None,
    One,
    Both,
}

impl ArmsState {
    /// Map a raised-arm count onto the three buckets.
    pub fn from_count(raised: usize) -> Self {
        match raised {
            0 => ArmsState::None,
            1 => ArmsState::One,
            _ => ArmsState::Both,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArmsState::None => "none",
            ArmsState::One => "one",
            ArmsState::Both => "both",
        }
    }
}

impl fmt::Display for ArmsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-frame hand classification output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandGestureResult {
    pub gesture: Gesture,
    pub arms: ArmsState,
    pub hand_near_mouth: bool,
    pub hands_clasped: bool,
    pub hands_clasped_index: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arms_from_count() {
        assert_eq!(ArmsState::from_count(0), ArmsState::None);
        assert_eq!(ArmsState::from_count(1), ArmsState::One);
        assert_eq!(ArmsState::from_count(2), ArmsState::Both);
        assert_eq!(ArmsState::from_count(3), ArmsState::Both);
    }

    #[test]
    fn test_default_result_is_idle() {
        let result = HandGestureResult::default();
        assert_eq!(result.gesture, Gesture::None);
        assert_eq!(result.arms, ArmsState::None);
        assert!(!result.hand_near_mouth);
        assert!(!result.hands_clasped);
        assert!(!result.hands_clasped_index);
    }

    #[test]
    fn test_gesture_serde_names() {
        assert_eq!(
            serde_json::to_string(&Gesture::DoubleThumbs).unwrap(),
            "\"double_thumbs\""
        );
        assert_eq!(Gesture::ChinRest.to_string(), "chin_rest");
    }
}
