//! Content catalog entries.

use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tag::{ActiveTagSet, Tag};

/// A piece of selectable content and the tags it requires.
///
/// Catalog documents written by hand use `tags`/`url`; the longer
/// `requiredTags`/`resourceRef` spellings are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContentEntry {
    /// Tags that must all be active for this entry to match
    #[serde(rename = "tags", alias = "requiredTags", alias = "required_tags")]
    pub required_tags: Vec<Tag>,

    /// Location of the content, absolute or relative to the catalog
    #[serde(rename = "url", alias = "resourceRef", alias = "resource_ref")]
    pub resource_ref: String,

    /// Human-readable caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ContentEntry {
    pub fn new(required_tags: Vec<Tag>, resource_ref: impl Into<String>) -> Self {
        Self {
            required_tags,
            resource_ref: resource_ref.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Every required tag is present in `active`.
    pub fn matches(&self, active: &ActiveTagSet) -> bool {
        active.contains_all(&self.required_tags)
    }

    /// Entry is a designated fallback for otherwise unmatched states.
    pub fn is_neutral(&self) -> bool {
        self.required_tags.contains(&Tag::Neutral)
    }

    /// Label for display, falling back to the resource reference.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.resource_ref)
    }
}

/// JSON schema for a whole catalog document (an array of entries).
pub fn catalog_schema() -> RootSchema {
    schemars::schema_for!(Vec<ContentEntry>)
}
