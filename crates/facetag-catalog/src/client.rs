//! Catalog loader for remote and local documents.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::catalog::{CatalogLocation, ContentCatalog};
use crate::error::{CatalogError, CatalogResult};

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Catalog URI: http(s) URL, file URL or path
    pub uri: String,
    /// Request timeout for remote catalogs
    pub timeout: Duration,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            uri: "./catalog.json".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl CatalogClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            uri: std::env::var("FACETAG_CATALOG_URI")
                .unwrap_or_else(|_| "./catalog.json".to_string()),
            timeout: Duration::from_secs(
                std::env::var("FACETAG_CATALOG_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}

/// Fetches and parses the content catalog. Failures are not retried.
pub struct CatalogClient {
    http: Client,
    config: CatalogClientConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogClientConfig) -> CatalogResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(CatalogError::Network)?;

        Ok(Self { http, config })
    }

    pub fn from_env() -> CatalogResult<Self> {
        Self::new(CatalogClientConfig::from_env())
    }

    pub fn config(&self) -> &CatalogClientConfig {
        &self.config
    }

    /// Load the configured catalog.
    pub async fn load(&self) -> CatalogResult<ContentCatalog> {
        self.load_from(&self.config.uri).await
    }

    /// Load a catalog from an explicit URI.
    pub async fn load_from(&self, uri: &str) -> CatalogResult<ContentCatalog> {
        let location = CatalogLocation::parse(uri)?;
        let bytes = match &location {
            CatalogLocation::Remote(url) => self.fetch(url.as_str()).await?,
            CatalogLocation::Local(path) => {
                debug!("Reading catalog from {}", path.display());
                tokio::fs::read(path).await?
            }
        };

        let catalog = ContentCatalog::from_json(&bytes, &location)?;
        info!(
            source = %location,
            entries = catalog.len(),
            "Loaded content catalog"
        );
        Ok(catalog)
    }

    async fn fetch(&self, url: &str) -> CatalogResult<Vec<u8>> {
        debug!("Fetching catalog from {}", url);

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::request_failed(format!(
                "catalog server returned {}: {}",
                status, body
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facetag_models::Tag;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DOC: &str = r#"[
        {"tags": ["neutral"], "url": "img/calm.png", "label": "Calm"},
        {"tags": ["mouth_open", "hand_punch"], "url": "img/rage.png"}
    ]"#;

    fn client() -> CatalogClient {
        CatalogClient::new(CatalogClientConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_load_remote() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/memes/catalog.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DOC))
            .expect(1)
            .mount(&server)
            .await;

        let uri = format!("{}/memes/catalog.json", server.uri());
        let catalog = client().load_from(&uri).await.unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.entries()[0].resource_ref,
            format!("{}/memes/img/calm.png", server.uri())
        );
        assert_eq!(
            catalog.entries()[1].required_tags,
            vec![Tag::MouthOpen, Tag::HandPunch]
        );
    }

    #[tokio::test]
    async fn test_remote_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
            .mount(&server)
            .await;

        let err = client()
            .load_from(&format!("{}/catalog.json", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::RequestFailed(ref m) if m.contains("404")));
    }

    #[tokio::test]
    async fn test_remote_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client()
            .load_from(&format!("{}/catalog.json", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[tokio::test]
    async fn test_load_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("catalog.json");
        let mut file = std::fs::File::create(&file_path).unwrap();
        file.write_all(DOC.as_bytes()).unwrap();

        let catalog = client()
            .load_from(file_path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.entries()[0].resource_ref,
            dir.path().join("img/calm.png").to_string_lossy()
        );
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = client()
            .load_from(missing.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
