//! The immutable content catalog and where it came from.

use std::fmt;
use std::path::{Path, PathBuf};

use facetag_models::ContentEntry;
use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Where a catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    /// `http://` or `https://`
    Remote(Url),
    /// `file://` URL or bare filesystem path
    Local(PathBuf),
}

impl CatalogLocation {
    /// Parse a catalog URI.
    ///
    /// Anything without an `http`, `https` or `file` scheme is treated as a
    /// filesystem path.
    pub fn parse(uri: &str) -> CatalogResult<Self> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(CatalogError::invalid_uri("empty catalog URI"));
        }

        match Url::parse(uri) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Remote(url)),
                "file" => url
                    .to_file_path()
                    .map(Self::Local)
                    .map_err(|_| CatalogError::invalid_uri(format!("not a local file URL: {uri}"))),
                // Single-letter schemes are Windows drive letters.
                scheme if scheme.len() == 1 => Ok(Self::Local(PathBuf::from(uri))),
                scheme => Err(CatalogError::invalid_uri(format!(
                    "unsupported scheme '{scheme}' in {uri}"
                ))),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Self::Local(PathBuf::from(uri))),
            Err(e) => Err(CatalogError::invalid_uri(format!("{uri}: {e}"))),
        }
    }

    /// Resolve a resource reference found inside the catalog.
    ///
    /// Absolute URLs pass through. Relative references are joined onto the
    /// catalog URL or the catalog file's directory.
    pub fn resolve(&self, reference: &str) -> String {
        match Url::parse(reference) {
            Ok(url) if url.scheme().len() > 1 => return url.to_string(),
            _ => {}
        }

        match self {
            Self::Remote(base) => base
                .join(reference)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| reference.to_string()),
            Self::Local(path) => {
                let dir = path.parent().unwrap_or_else(|| Path::new(""));
                dir.join(reference).to_string_lossy().into_owned()
            }
        }
    }
}

impl fmt::Display for CatalogLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Content entries loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    entries: Vec<ContentEntry>,
}

impl ContentCatalog {
    pub fn new(entries: Vec<ContentEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog document, resolving relative references against
    /// `location`.
    pub fn from_json(bytes: &[u8], location: &CatalogLocation) -> CatalogResult<Self> {
        let mut entries: Vec<ContentEntry> = serde_json::from_slice(bytes)?;
        for entry in &mut entries {
            entry.resource_ref = location.resolve(&entry.resource_ref);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
