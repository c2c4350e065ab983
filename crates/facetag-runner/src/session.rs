//! Session startup: load the catalog and recording, then run the loop.

use std::future::Future;

use facetag_catalog::{CatalogClient, ContentCatalog, ContentMatcher};
use tokio::sync::watch;

use crate::config::RunnerConfig;
use crate::error::{RunnerError, RunnerResult};
use crate::executor::{FrameExecutor, Observation, RunSummary};
use crate::replay::RecordedSession;

async fn load_inputs(config: &RunnerConfig) -> RunnerResult<(ContentCatalog, RecordedSession)> {
    let client = CatalogClient::new(config.catalog.clone())?;
    let catalog = client.load().await?;
    let session = RecordedSession::load(&config.recording_path).await?;
    Ok((catalog, session))
}

/// Replay the configured recording against the configured catalog.
///
/// Startup failures publish a single `failed` observation and are returned
/// without retry.
pub async fn run_session<F>(
    config: &RunnerConfig,
    observations: watch::Sender<Observation>,
    shutdown: F,
) -> RunnerResult<RunSummary>
where
    F: Future<Output = ()>,
{
    let (catalog, session) = match load_inputs(config).await {
        Ok(inputs) => inputs,
        Err(e) => {
            observations.send_replace(Observation::failed(e.to_string()));
            return Err(e);
        }
    };

    if session.is_empty() {
        let err = RunnerError::config_error(format!(
            "recording {} has no frames",
            config.recording_path.display()
        ));
        observations.send_replace(Observation::failed(err.to_string()));
        return Err(err);
    }

    let (driver, poses) = session.into_replay(config.realtime);
    FrameExecutor::new(
        driver,
        poses,
        ContentMatcher::new(catalog),
        config.stabilizer,
        observations,
    )
    .run(shutdown)
    .await
}
