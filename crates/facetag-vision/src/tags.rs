//! Folding face and hand states into an active tag set.

use facetag_models::{
    ActiveTagSet, ArmsState, EyeState, FaceState, Gesture, HandGestureResult, HeadState,
    MouthState, Tag,
};

fn mouth_tag(mouth: MouthState) -> Tag {
    match mouth {
        MouthState::Open => Tag::MouthOpen,
        MouthState::Closed => Tag::MouthClosed,
    }
}

fn head_tag(head: HeadState) -> Tag {
    match head {
        HeadState::Up => Tag::HeadUp,
        HeadState::Down => Tag::HeadDown,
        HeadState::Neutral => Tag::HeadNeutral,
    }
}

fn arms_tag(arms: ArmsState) -> Tag {
    match arms {
        ArmsState::None => Tag::ArmsNone,
        ArmsState::One => Tag::ArmsUpOne,
        ArmsState::Both => Tag::ArmsUpTwo,
    }
}

pub fn gesture_tag(gesture: Gesture) -> Tag {
    match gesture {
        Gesture::None => Tag::HandNone,
        Gesture::ChinRest => Tag::HandChin,
        Gesture::MiddleFinger => Tag::HandMiddleFinger,
        Gesture::DoubleThumbs => Tag::HandDoubleThumbs,
        Gesture::ThumbsUp => Tag::HandThumbsUp,
        Gesture::IndexFinger => Tag::HandIndexFinger,
        Gesture::Punch => Tag::HandPunch,
    }
}

/// Build the tag set for one frame.
///
/// `eyes_closed_held` is the stabilizer's verdict; the raw eye state only
/// decides `neutral`. So a blink shorter than the hold reports `eyes_open`
/// but suppresses `neutral` for its duration.
pub fn aggregate_tags(
    face: &FaceState,
    hands: &HandGestureResult,
    eyes_closed_held: bool,
) -> ActiveTagSet {
    let mut tags = ActiveTagSet::new();

    tags.insert(mouth_tag(face.mouth));
    tags.insert(if eyes_closed_held {
        Tag::EyesClosed
    } else {
        Tag::EyesOpen
    });
    tags.insert(head_tag(face.head));
    tags.insert(arms_tag(hands.arms));
    tags.insert(gesture_tag(hands.gesture));

    if hands.hand_near_mouth {
        tags.insert(Tag::HandNearMouth);
    }
    if hands.hands_clasped {
        tags.insert(Tag::HandsClasped);
    }
    if hands.hands_clasped_index {
        tags.insert(Tag::HandsClaspedIndex);
    }

    let neutral = face.mouth == MouthState::Closed
        && face.eyes == EyeState::Open
        && face.head == HeadState::Neutral
        && hands.arms == ArmsState::None
        && hands.gesture == Gesture::None;
    if neutral {
        tags.insert(Tag::Neutral);
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(mouth: MouthState, eyes: EyeState, head: HeadState) -> FaceState {
        FaceState { mouth, eyes, head }
    }

    #[test]
    fn test_open_mouth_no_hands() {
        let tags = aggregate_tags(
            &face(MouthState::Open, EyeState::Open, HeadState::Neutral),
            &HandGestureResult::default(),
            false,
        );
        let expected: ActiveTagSet = [
            Tag::MouthOpen,
            Tag::EyesOpen,
            Tag::HeadNeutral,
            Tag::ArmsNone,
            Tag::HandNone,
        ]
        .into_iter()
        .collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn test_resting_face_is_neutral() {
        let tags = aggregate_tags(
            &face(MouthState::Closed, EyeState::Open, HeadState::Neutral),
            &HandGestureResult::default(),
            false,
        );
        assert!(tags.contains(Tag::Neutral));
        assert_eq!(tags.len(), 6);
    }

    #[test]
    fn test_raw_closed_eyes_suppress_neutral() {
        let tags = aggregate_tags(
            &face(MouthState::Closed, EyeState::Closed, HeadState::Neutral),
            &HandGestureResult::default(),
            false,
        );
        assert!(tags.contains(Tag::EyesOpen));
        assert!(!tags.contains(Tag::Neutral));
    }

    #[test]
    fn test_held_eyes_closed() {
        let tags = aggregate_tags(
            &face(MouthState::Closed, EyeState::Closed, HeadState::Up),
            &HandGestureResult::default(),
            true,
        );
        assert!(tags.contains(Tag::EyesClosed));
        assert!(!tags.contains(Tag::EyesOpen));
        assert!(tags.contains(Tag::HeadUp));
    }

    #[test]
    fn test_hand_flags() {
        let hands = HandGestureResult {
            gesture: Gesture::DoubleThumbs,
            arms: ArmsState::Both,
            hand_near_mouth: true,
            hands_clasped: true,
            hands_clasped_index: true,
        };
        let tags = aggregate_tags(
            &face(MouthState::Closed, EyeState::Open, HeadState::Neutral),
            &hands,
            false,
        );
        for tag in [
            Tag::HandDoubleThumbs,
            Tag::ArmsUpTwo,
            Tag::HandNearMouth,
            Tag::HandsClasped,
            Tag::HandsClaspedIndex,
        ] {
            assert!(tags.contains(tag), "{tag}");
        }
        assert!(!tags.contains(Tag::Neutral));
    }

    #[test]
    fn test_exactly_one_per_group() {
        let groups: [&[Tag]; 5] = [
            &[Tag::MouthOpen, Tag::MouthClosed],
            &[Tag::EyesOpen, Tag::EyesClosed],
            &[Tag::HeadUp, Tag::HeadDown, Tag::HeadNeutral],
            &[Tag::ArmsNone, Tag::ArmsUpOne, Tag::ArmsUpTwo],
            &[
                Tag::HandNone,
                Tag::HandChin,
                Tag::HandMiddleFinger,
                Tag::HandDoubleThumbs,
                Tag::HandThumbsUp,
                Tag::HandIndexFinger,
                Tag::HandPunch,
            ],
        ];
        let tags = aggregate_tags(
            &face(MouthState::Open, EyeState::Closed, HeadState::Down),
            &HandGestureResult {
                gesture: Gesture::Punch,
                arms: ArmsState::One,
                ..Default::default()
            },
            true,
        );
        for group in groups {
            assert_eq!(group.iter().filter(|t| tags.contains(**t)).count(), 1);
        }
    }
}
