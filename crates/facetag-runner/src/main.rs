//! Facetag binary: replay a landmark recording and select content.

use anyhow::Context;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use facetag_runner::metrics::init_metrics;
use facetag_runner::{run_session, Observation, RunnerConfig};

fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("facetag=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting facetag");

    let config = RunnerConfig::from_env();
    info!("Runner config: {:?}", config);

    // One frame at a time; no worker threads needed.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to build runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(config)) {
        error!("{:#}", e);
        std::process::exit(1);
    }

    info!("Facetag shutdown complete");
}

async fn run(config: RunnerConfig) -> anyhow::Result<()> {
    let metrics = if config.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    let (observations, latest) = watch::channel(Observation::starting());
    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
    };

    let summary = run_session(&config, observations, shutdown)
        .await
        .context("Session failed")?;

    info!(
        frames_processed = summary.frames_processed,
        frames_skipped = summary.frames_skipped,
        content_switches = summary.content_switches,
        tags = %summary.final_tags,
        "Session summary"
    );
    if let Some(content) = &latest.borrow().content {
        info!("Final content: {} ({})", content.display_label(), content.resource_ref);
    }

    if let Some(handle) = metrics {
        info!("Metrics snapshot:\n{}", handle.render());
    }

    Ok(())
}
