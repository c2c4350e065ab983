//! Runner configuration.

use std::path::PathBuf;

use facetag_catalog::CatalogClientConfig;
use facetag_vision::StabilizerConfig;

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Catalog location and fetch timeout
    pub catalog: CatalogClientConfig,
    /// JSON-lines landmark recording to replay
    pub recording_path: PathBuf,
    /// Sleep until each frame's timestamp instead of replaying at full speed
    pub realtime: bool,
    /// Eyes-closed hold and tag debounce
    pub stabilizer: StabilizerConfig,
    /// Install the Prometheus recorder
    pub metrics_enabled: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogClientConfig::default(),
            recording_path: PathBuf::from("./session.jsonl"),
            realtime: false,
            stabilizer: StabilizerConfig::default(),
            metrics_enabled: false,
        }
    }
}

impl RunnerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            catalog: CatalogClientConfig::from_env(),
            recording_path: std::env::var("FACETAG_RECORDING_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./session.jsonl")),
            realtime: env_flag("FACETAG_REALTIME"),
            stabilizer: StabilizerConfig::from_env(),
            metrics_enabled: env_flag("FACETAG_METRICS"),
        }
    }
}

/// `true`/`1`/`yes`/`on`, case-insensitive. Anything else is false.
fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes" | "on"))
        .unwrap_or(false)
}
