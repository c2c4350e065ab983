//! Full sessions: catalog load, replay, classification, content selection.

use std::path::Path;
use std::time::Duration;

use facetag_models::{ContentEntry, Point2D, Tag};
use facetag_runner::{
    run_session, Observation, PipelineStatus, RecordedFrame, RecordedSession, RunnerConfig,
    RunnerError,
};
use facetag_vision::synthetic::{hand, FaceBuilder, HandShape};
use tempfile::TempDir;
use tokio::sync::watch;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_entries() -> Vec<ContentEntry> {
    vec![
        ContentEntry::new(vec![Tag::Neutral], "img/calm.png").with_label("Calm"),
        ContentEntry::new(vec![Tag::MouthOpen], "img/shout.png"),
        ContentEntry::new(vec![Tag::EyesClosed], "img/sleep.png"),
        ContentEntry::new(vec![Tag::HandDoubleThumbs], "img/approve.png"),
    ]
}

/// Frames every 30 ms from `start` (inclusive) to `end` (exclusive).
fn span(start: u64, end: u64, face: Option<FaceBuilder>, hands: &[HandShape]) -> Vec<RecordedFrame> {
    (start..end)
        .step_by(30)
        .map(|t_ms| RecordedFrame {
            t_ms,
            face: face.map(|f| f.build().unwrap()),
            hands: hands
                .iter()
                .enumerate()
                .map(|(i, &shape)| hand(shape, Point2D::new(0.2 + 0.6 * i as f64, 0.95)).unwrap())
                .collect(),
        })
        .collect()
}

struct Fixture {
    dir: TempDir,
    config: RunnerConfig,
}

async fn fixture(frames: Vec<RecordedFrame>) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("catalog.json");
    let recording_path = dir.path().join("session.jsonl");

    tokio::fs::write(&catalog_path, serde_json::to_vec(&catalog_entries()).unwrap())
        .await
        .unwrap();
    RecordedSession::new(frames)
        .save(&recording_path)
        .await
        .unwrap();

    let mut config = RunnerConfig::default();
    config.catalog.uri = catalog_path.to_string_lossy().into_owned();
    config.recording_path = recording_path;
    Fixture { dir, config }
}

fn resolved(dir: &Path, reference: &str) -> String {
    dir.join(reference).to_string_lossy().into_owned()
}

#[tokio::test]
async fn test_blink_does_not_reach_content() {
    let mut frames = span(0, 300, Some(FaceBuilder::new()), &[]);
    frames.extend(span(300, 600, Some(FaceBuilder::new().mouth_ratio(0.5)), &[]));
    frames.extend(span(600, 750, Some(FaceBuilder::new().eye_ratio(0.05)), &[]));
    frames.extend(span(750, 900, Some(FaceBuilder::new()), &[]));
    let total = frames.len() as u64;
    let fx = fixture(frames).await;

    let (tx, rx) = watch::channel(Observation::starting());
    let summary = run_session(&fx.config, tx, std::future::pending())
        .await
        .unwrap();

    assert_eq!(summary.frames_processed, total);
    assert_eq!(summary.frames_skipped, 0);
    // Initial pick, resting, open mouth, blink (neutral suppressed), resting.
    assert_eq!(summary.content_switches, 5);
    assert!(summary.final_tags.contains(Tag::Neutral));
    assert!(!summary.final_tags.contains(Tag::EyesClosed));

    let last = rx.borrow().clone();
    assert_eq!(last.status, PipelineStatus::Finished);
    assert_eq!(
        last.content.unwrap().resource_ref,
        resolved(fx.dir.path(), "img/calm.png")
    );
}

#[tokio::test]
async fn test_long_eye_closure_selects_sleep() {
    let mut frames = span(0, 90, Some(FaceBuilder::new()), &[]);
    frames.extend(span(90, 450, Some(FaceBuilder::new().eye_ratio(0.05)), &[]));
    let fx = fixture(frames).await;

    let (tx, rx) = watch::channel(Observation::starting());
    let summary = run_session(&fx.config, tx, std::future::pending())
        .await
        .unwrap();

    assert!(summary.final_tags.contains(Tag::EyesClosed));
    assert_eq!(
        summary.content.unwrap().resource_ref,
        resolved(fx.dir.path(), "img/sleep.png")
    );
    let last = rx.borrow().clone();
    assert_eq!(last.face_state.unwrap().eyes.as_str(), "closed");
}

#[tokio::test]
async fn test_faceless_frames_are_skipped() {
    let mut frames = span(0, 90, Some(FaceBuilder::new()), &[HandShape::ThumbsUp, HandShape::ThumbsUp]);
    frames.extend(span(90, 300, None, &[HandShape::Fist]));
    let fx = fixture(frames).await;

    let (tx, rx) = watch::channel(Observation::starting());
    let summary = run_session(&fx.config, tx, std::future::pending())
        .await
        .unwrap();

    assert_eq!(summary.frames_processed, 3);
    assert_eq!(summary.frames_skipped, 7);
    assert!(summary.final_tags.contains(Tag::HandDoubleThumbs));

    let last = rx.borrow().clone();
    assert_eq!(last.frame, Some(2));
    assert_eq!(last.timestamp, Some(Duration::from_millis(60)));
    assert_eq!(
        last.content.unwrap().resource_ref,
        resolved(fx.dir.path(), "img/approve.png")
    );
}

#[tokio::test]
async fn test_remote_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/content/catalog.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_entries()))
        .expect(1)
        .mount(&server)
        .await;

    let mut fx = fixture(span(0, 120, Some(FaceBuilder::new().mouth_ratio(0.6)), &[])).await;
    fx.config.catalog.uri = format!("{}/content/catalog.json", server.uri());

    let (tx, _rx) = watch::channel(Observation::starting());
    let summary = run_session(&fx.config, tx, std::future::pending())
        .await
        .unwrap();

    assert_eq!(
        summary.content.unwrap().resource_ref,
        format!("{}/content/img/shout.png", server.uri())
    );
}

#[tokio::test]
async fn test_missing_catalog_fails_startup() {
    let mut fx = fixture(span(0, 60, Some(FaceBuilder::new()), &[])).await;
    fx.config.catalog.uri = fx.dir.path().join("missing.json").to_string_lossy().into_owned();

    let (tx, rx) = watch::channel(Observation::starting());
    let err = run_session(&fx.config, tx, std::future::pending())
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::Catalog(_)));
    assert!(matches!(rx.borrow().status, PipelineStatus::Failed { .. }));
}

#[tokio::test]
async fn test_malformed_recording_fails_startup() {
    let fx = fixture(vec![]).await;
    tokio::fs::write(&fx.config.recording_path, "{\"t_ms\": 0}\nnot json\n")
        .await
        .unwrap();

    let (tx, rx) = watch::channel(Observation::starting());
    let err = run_session(&fx.config, tx, std::future::pending())
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::RecordingParse { line: 2, .. }));
    let status = rx.borrow().status.clone();
    match status {
        PipelineStatus::Failed { message } => assert!(message.contains("line 2")),
        other => panic!("expected failed status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_recording_fails_startup() {
    let fx = fixture(vec![]).await;
    let (tx, _rx) = watch::channel(Observation::starting());
    let err = run_session(&fx.config, tx, std::future::pending())
        .await
        .unwrap_err();
    assert!(matches!(err, RunnerError::ConfigError(_)));
}
