//! Face features and discrete face states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Head orientation estimate.
///
/// `yaw` and `pitch` are unitless ratios, `roll` is in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadPose {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// Geometric face features computed fresh for each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceFeatures {
    /// Vertical lip gap over mouth width
    pub mouth_open_ratio: f64,
    /// Vertical eyelid gap over eye width, averaged over both eyes
    pub eye_open_ratio: f64,
    /// Mean eyebrow-to-upper-eyelid distance
    pub eyebrow_raise: f64,
    pub head: HeadPose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouthState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadState {
    Up,
    Down,
    Neutral,
}

impl MouthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MouthState::Open => "open",
            MouthState::Closed => "closed",
        }
    }
}

impl EyeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EyeState::Open => "open",
            EyeState::Closed => "closed",
        }
    }
}

impl HeadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadState::Up => "up",
            HeadState::Down => "down",
            HeadState::Neutral => "neutral",
        }
    }
}

impl fmt::Display for MouthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for EyeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for HeadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discrete face state for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceState {
    pub mouth: MouthState,
    pub eyes: EyeState,
    pub head: HeadState,
}

impl fmt::Display for FaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mouth {}, eyes {}, head {}",
            self.mouth, self.eyes, self.head
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_serialization() {
        let state = FaceState {
            mouth: MouthState::Open,
            eyes: EyeState::Closed,
            head: HeadState::Neutral,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"mouth":"open","eyes":"closed","head":"neutral"}"#);
    }

    #[test]
    fn test_state_display() {
        let state = FaceState {
            mouth: MouthState::Closed,
            eyes: EyeState::Open,
            head: HeadState::Up,
        };
        assert_eq!(state.to_string(), "mouth closed, eyes open, head up");
    }
}
