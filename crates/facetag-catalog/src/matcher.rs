//! Tag-based content selection.

use facetag_models::{ActiveTagSet, ContentEntry};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::catalog::ContentCatalog;

/// Which rule produced a candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Entries whose required tags are all active
    Exact,
    /// Nothing matched; entries tagged `neutral`
    NeutralFallback,
    /// Nothing matched and no neutral entries; the whole catalog
    AnyFallback,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::NeutralFallback => "neutral_fallback",
            MatchKind::AnyFallback => "any_fallback",
        }
    }
}

/// Candidate entries for a tag set.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    pub kind: MatchKind,
    pub entries: Vec<&'a ContentEntry>,
}

/// A picked entry and the rule that made it a candidate.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub kind: MatchKind,
    pub entry: &'a ContentEntry,
}

/// Picks catalog content for the active tags.
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    catalog: ContentCatalog,
}

impl ContentMatcher {
    pub fn new(catalog: ContentCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// Resolve candidates: exact matches, else neutral entries, else all.
    ///
    /// Empty only when the catalog is empty.
    pub fn candidates(&self, active: &ActiveTagSet) -> Candidates<'_> {
        let entries = self.catalog.entries();

        let exact: Vec<&ContentEntry> = entries.iter().filter(|e| e.matches(active)).collect();
        if !exact.is_empty() {
            return Candidates {
                kind: MatchKind::Exact,
                entries: exact,
            };
        }

        let neutral: Vec<&ContentEntry> = entries.iter().filter(|e| e.is_neutral()).collect();
        if !neutral.is_empty() {
            return Candidates {
                kind: MatchKind::NeutralFallback,
                entries: neutral,
            };
        }

        Candidates {
            kind: MatchKind::AnyFallback,
            entries: entries.iter().collect(),
        }
    }

    /// Uniform pick among the candidates, reporting which rule matched.
    pub fn select_with<R: Rng + ?Sized>(
        &self,
        active: &ActiveTagSet,
        rng: &mut R,
    ) -> Option<Selection<'_>> {
        let candidates = self.candidates(active);
        let entry = candidates.entries.choose(rng).copied()?;
        Some(Selection {
            kind: candidates.kind,
            entry,
        })
    }

    /// Uniform pick among the candidates using `rng`.
    pub fn pick_with<R: Rng + ?Sized>(
        &self,
        active: &ActiveTagSet,
        rng: &mut R,
    ) -> Option<&ContentEntry> {
        self.select_with(active, rng).map(|s| s.entry)
    }

    /// Uniform pick using the thread-local generator.
    pub fn pick(&self, active: &ActiveTagSet) -> Option<&ContentEntry> {
        let mut rng = rand::rng();
        self.pick_with(active, &mut rng)
    }
}
