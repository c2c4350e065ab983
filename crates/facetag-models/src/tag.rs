//! The closed tag vocabulary and per-frame tag sets.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An atomic label describing one aspect of the current face/hand state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    MouthOpen,
    MouthClosed,
    EyesOpen,
    EyesClosed,
    HeadUp,
    HeadDown,
    HeadNeutral,
    ArmsNone,
    ArmsUpOne,
    ArmsUpTwo,
    HandNone,
    HandChin,
    HandMiddleFinger,
    HandDoubleThumbs,
    HandThumbsUp,
    HandIndexFinger,
    HandPunch,
    HandNearMouth,
    HandsClasped,
    HandsClaspedIndex,
    Neutral,
}

impl Tag {
    /// Every tag in the vocabulary.
    pub const ALL: &'static [Tag] = &[
        Tag::MouthOpen,
        Tag::MouthClosed,
        Tag::EyesOpen,
        Tag::EyesClosed,
        Tag::HeadUp,
        Tag::HeadDown,
        Tag::HeadNeutral,
        Tag::ArmsNone,
        Tag::ArmsUpOne,
        Tag::ArmsUpTwo,
        Tag::HandNone,
        Tag::HandChin,
        Tag::HandMiddleFinger,
        Tag::HandDoubleThumbs,
        Tag::HandThumbsUp,
        Tag::HandIndexFinger,
        Tag::HandPunch,
        Tag::HandNearMouth,
        Tag::HandsClasped,
        Tag::HandsClaspedIndex,
        Tag::Neutral,
    ];

    /// Wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::MouthOpen => "mouth_open",
            Tag::MouthClosed => "mouth_closed",
            Tag::EyesOpen => "eyes_open",
            Tag::EyesClosed => "eyes_closed",
            Tag::HeadUp => "head_up",
            Tag::HeadDown => "head_down",
            Tag::HeadNeutral => "head_neutral",
            Tag::ArmsNone => "arms_none",
            Tag::ArmsUpOne => "arms_up_one",
            Tag::ArmsUpTwo => "arms_up_two",
            Tag::HandNone => "hand_none",
            Tag::HandChin => "hand_chin",
            Tag::HandMiddleFinger => "hand_middle_finger",
            Tag::HandDoubleThumbs => "hand_double_thumbs",
            Tag::HandThumbsUp => "hand_thumbs_up",
            Tag::HandIndexFinger => "hand_index_finger",
            Tag::HandPunch => "hand_punch",
            Tag::HandNearMouth => "hand_near_mouth",
            Tag::HandsClasped => "hands_clasped",
            Tag::HandsClaspedIndex => "hands_clasped_index",
            Tag::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tag {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| TagParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown tag: {0}")]
pub struct TagParseError(String);

/// The set of tags asserted for a frame.
///
/// Membership only: two sets built in different insertion orders are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ActiveTagSet(BTreeSet<Tag>);

impl ActiveTagSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Set holding only [`Tag::Neutral`].
    pub fn neutral() -> Self {
        [Tag::Neutral].into_iter().collect()
    }

    /// Add a tag; returns false if it was already present.
    pub fn insert(&mut self, tag: Tag) -> bool {
        self.0.insert(tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.0.contains(&tag)
    }

    /// True when every tag in `required` is a member.
    pub fn contains_all(&self, required: &[Tag]) -> bool {
        required.iter().all(|tag| self.0.contains(tag))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tags in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Tag> {
        self.iter().collect()
    }
}

impl FromIterator<Tag> for ActiveTagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Tag> for ActiveTagSet {
    fn extend<I: IntoIterator<Item = Tag>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl fmt::Display for ActiveTagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Tag::as_str).collect();
        write!(f, "{}", names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip_names() {
        for tag in Tag::ALL {
            assert_eq!(tag.as_str().parse::<Tag>().unwrap(), *tag);
            assert_eq!(
                serde_json::to_string(tag).unwrap(),
                format!("\"{}\"", tag.as_str())
            );
        }
        assert_eq!(Tag::ALL.len(), 21);
    }

    #[test]
    fn test_tag_parse_unknown() {
        assert!("smiling".parse::<Tag>().is_err());
        assert!("MOUTH_OPEN".parse::<Tag>().is_err());
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a: ActiveTagSet = [Tag::MouthOpen, Tag::HandPunch].into_iter().collect();
        let b: ActiveTagSet = [Tag::HandPunch, Tag::MouthOpen].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_contains_all() {
        let set: ActiveTagSet = [Tag::MouthOpen, Tag::EyesOpen, Tag::HandNone]
            .into_iter()
            .collect();
        assert!(set.contains_all(&[Tag::MouthOpen, Tag::HandNone]));
        assert!(set.contains_all(&[]));
        assert!(!set.contains_all(&[Tag::MouthOpen, Tag::Neutral]));
    }

    #[test]
    fn test_set_display_and_serde() {
        let set: ActiveTagSet = [Tag::Neutral, Tag::ArmsNone].into_iter().collect();
        assert_eq!(set.to_string(), "arms_none,neutral");
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"["arms_none","neutral"]"#
        );
    }
}
