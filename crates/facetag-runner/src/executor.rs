//! Frame loop executor.
//!
//! Pulls frames one at a time, runs pose inference (face first, then hands),
//! classifies and stabilizes synchronously, and swaps the selected content
//! only when the stable tag set changes. Observers read the latest
//! [`Observation`] from a watch channel.

use std::future::Future;
use std::time::{Duration, Instant};

use facetag_catalog::ContentMatcher;
use facetag_models::{ActiveTagSet, ContentEntry, FaceFeatures, FaceState, HandGestureResult};
use facetag_vision::{
    capture_snapshot, CapturedFrame, FrameDriver, FrameOutcome, FramePipeline, PoseSource,
    StabilizerConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::RunnerResult;
use crate::logging::SessionLogger;
use crate::metrics::{self, SkipReason};

/// Lifecycle of the frame loop as seen by observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineStatus {
    Starting,
    Tracking,
    Failed { message: String },
    Finished,
}

/// Latest published view of the pipeline.
///
/// Frames without a face publish nothing, so the previous observation
/// stays current.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub status: PipelineStatus,
    pub frame: Option<u64>,
    pub timestamp: Option<Duration>,
    pub features: Option<FaceFeatures>,
    pub face_state: Option<FaceState>,
    pub hands: Option<HandGestureResult>,
    pub stable_tags: ActiveTagSet,
    pub content: Option<ContentEntry>,
}

impl Observation {
    pub fn starting() -> Self {
        Self {
            status: PipelineStatus::Starting,
            frame: None,
            timestamp: None,
            features: None,
            face_state: None,
            hands: None,
            stable_tags: ActiveTagSet::neutral(),
            content: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: PipelineStatus::Failed {
                message: message.into(),
            },
            ..Self::starting()
        }
    }

    fn tracking(frame: u64, outcome: &FrameOutcome, content: Option<ContentEntry>) -> Self {
        Self {
            status: PipelineStatus::Tracking,
            frame: Some(frame),
            timestamp: Some(outcome.timestamp),
            features: Some(outcome.features),
            face_state: Some(outcome.face_state),
            hands: Some(outcome.hands),
            stable_tags: outcome.stable_tags.clone(),
            content,
        }
    }
}

/// Counters for a finished run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames_processed: u64,
    pub frames_skipped: u64,
    pub content_switches: u64,
    pub final_tags: ActiveTagSet,
    pub content: Option<ContentEntry>,
}

/// Drives frames through the pipeline and the content matcher.
pub struct FrameExecutor<D, P> {
    driver: D,
    source: P,
    pipeline: FramePipeline,
    matcher: ContentMatcher,
    rng: StdRng,
    logger: SessionLogger,
    observations: watch::Sender<Observation>,
    current: Option<ContentEntry>,
}

impl<D, P> FrameExecutor<D, P>
where
    D: FrameDriver,
    P: PoseSource,
{
    /// Create an executor publishing to `observations`.
    pub fn new(
        driver: D,
        source: P,
        matcher: ContentMatcher,
        config: StabilizerConfig,
        observations: watch::Sender<Observation>,
    ) -> Self {
        let logger = SessionLogger::new(driver.name());
        Self {
            driver,
            source,
            pipeline: FramePipeline::new(config),
            matcher,
            rng: StdRng::from_rng(&mut rand::rng()),
            logger,
            observations,
            current: None,
        }
    }

    /// Replace the content picker's random source.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<Observation> {
        self.observations.subscribe()
    }

    pub fn session_id(&self) -> &str {
        self.logger.session_id()
    }

    /// Run until the driver is exhausted or `shutdown` resolves.
    ///
    /// A driver failure publishes a `failed` status and is returned. Pose
    /// failures on individual frames only skip that frame.
    pub async fn run<F>(mut self, shutdown: F) -> RunnerResult<RunSummary>
    where
        F: Future<Output = ()>,
    {
        self.logger.log_start(&format!(
            "driver={} poses={} catalog_entries={}",
            self.driver.name(),
            self.source.name(),
            self.matcher.catalog().len()
        ));

        let mut summary = RunSummary::default();
        let initial = self.pipeline.state().stable_tags.clone();
        self.switch_content(0, &initial, &mut summary);
        self.observations.send_replace(Observation {
            content: self.current.clone(),
            ..Observation::starting()
        });

        tokio::pin!(shutdown);
        loop {
            let next = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                next = self.driver.next_frame() => Some(next),
            };
            let Some(next) = next else {
                info!(session_id = %self.logger.session_id(), "Shutdown requested");
                break;
            };

            let frame = match next {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(e) => {
                    let message = e.to_string();
                    self.logger.log_error(&message);
                    self.observations.send_replace(Observation {
                        content: self.current.clone(),
                        ..Observation::failed(message)
                    });
                    return Err(e.into());
                }
            };

            self.handle_frame(&frame, &mut summary).await;
        }

        summary.final_tags = self.pipeline.state().stable_tags.clone();
        summary.content = self.current.clone();
        self.observations.send_modify(|obs| obs.status = PipelineStatus::Finished);
        self.logger.log_completion(&format!(
            "processed={} skipped={} switches={}",
            summary.frames_processed, summary.frames_skipped, summary.content_switches
        ));
        Ok(summary)
    }

    async fn handle_frame(&mut self, frame: &CapturedFrame, summary: &mut RunSummary) {
        let started = Instant::now();

        let snapshot = match capture_snapshot(&self.source, frame).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.logger.log_skipped_frame(frame.index, &e.to_string());
                metrics::record_frame_skipped(SkipReason::PoseError);
                summary.frames_skipped += 1;
                return;
            }
        };

        let Some(outcome) = self.pipeline.process(&snapshot) else {
            debug!(frame = frame.index, "No face detected, frame skipped");
            metrics::record_frame_skipped(SkipReason::NoFace);
            summary.frames_skipped += 1;
            return;
        };
        summary.frames_processed += 1;

        if outcome.stable_changed {
            self.switch_content(frame.index, &outcome.stable_tags, summary);
        }

        self.logger.log_frame(frame.index, &outcome.raw_tags);
        self.observations.send_replace(Observation::tracking(
            frame.index,
            &outcome,
            self.current.clone(),
        ));
        metrics::record_frame_processed(started.elapsed().as_secs_f64());
    }

    fn switch_content(&mut self, frame: u64, tags: &ActiveTagSet, summary: &mut RunSummary) {
        let Some(selection) = self.matcher.select_with(tags, &mut self.rng) else {
            debug!(frame, "Catalog is empty, no content selected");
            return;
        };

        self.logger.log_content_switch(frame, tags, selection.entry);
        metrics::record_content_switch(selection.kind.as_str());
        self.current = Some(selection.entry.clone());
        summary.content_switches += 1;
    }
}
