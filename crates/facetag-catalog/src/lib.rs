//! Content catalog for facetag.
//!
//! Loads a JSON catalog of tag-annotated content once at startup (over
//! HTTP or from disk) and picks entries matching the active tag set.

pub mod catalog;
pub mod client;
pub mod error;
pub mod matcher;

pub use catalog::{CatalogLocation, ContentCatalog};
pub use client::{CatalogClient, CatalogClientConfig};
pub use error::{CatalogError, CatalogResult};
pub use matcher::{Candidates, ContentMatcher, MatchKind, Selection};
