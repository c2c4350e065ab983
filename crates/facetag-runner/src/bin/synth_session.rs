//! Write a scripted landmark recording, and optionally a matching catalog.
//!
//! Usage: `synth-session [recording.jsonl] [catalog.json]`

use std::path::PathBuf;

use facetag_models::{ContentEntry, Point2D, Tag};
use facetag_runner::{RecordedFrame, RecordedSession, RunnerConfig};
use facetag_vision::synthetic::{hand, FaceBuilder, HandShape};

/// Frame period of the script, roughly 30 fps.
const FRAME_MS: u64 = 33;

/// One scripted segment: face, hands, duration.
struct Segment {
    face: Option<FaceBuilder>,
    hands: Vec<(HandShape, Point2D)>,
    millis: u64,
}

fn script() -> Vec<Segment> {
    let low_left = Point2D::new(0.2, 0.95);
    let low_right = Point2D::new(0.8, 0.95);
    vec![
        Segment {
            face: Some(FaceBuilder::new()),
            hands: vec![],
            millis: 1000,
        },
        Segment {
            face: Some(FaceBuilder::new().mouth_ratio(0.5)),
            hands: vec![],
            millis: 1000,
        },
        Segment {
            face: Some(FaceBuilder::new()),
            hands: vec![(HandShape::ThumbsUp, low_left), (HandShape::ThumbsUp, low_right)],
            millis: 1000,
        },
        Segment {
            face: None,
            hands: vec![],
            millis: 300,
        },
        Segment {
            face: Some(FaceBuilder::new().eye_ratio(0.05)),
            hands: vec![],
            millis: 600,
        },
        Segment {
            face: Some(FaceBuilder::new().mouth_ratio(0.5)),
            hands: vec![(HandShape::Fist, Point2D::new(0.5, 0.8))],
            millis: 1000,
        },
        Segment {
            face: Some(FaceBuilder::new().pitch(0.05)),
            hands: vec![(HandShape::IndexPoint, low_right)],
            millis: 1000,
        },
    ]
}

fn build_session() -> anyhow::Result<RecordedSession> {
    let mut frames = Vec::new();
    let mut t_ms = 0;
    for segment in script() {
        let end = t_ms + segment.millis;
        while t_ms < end {
            let face = segment.face.map(|f| f.build()).transpose()?;
            let hands = segment
                .hands
                .iter()
                .map(|&(shape, wrist)| hand(shape, wrist))
                .collect::<Result<Vec<_>, _>>()?;
            frames.push(RecordedFrame { t_ms, face, hands });
            t_ms += FRAME_MS;
        }
    }
    Ok(RecordedSession::new(frames))
}

fn sample_catalog() -> Vec<ContentEntry> {
    vec![
        ContentEntry::new(vec![Tag::Neutral], "img/calm.png").with_label("Calm"),
        ContentEntry::new(vec![Tag::MouthOpen], "img/shout.png").with_label("Shouting"),
        ContentEntry::new(vec![Tag::HandDoubleThumbs], "img/approve.png").with_label("Approves"),
        ContentEntry::new(vec![Tag::EyesClosed], "img/sleep.png").with_label("Sleeping"),
        ContentEntry::new(vec![Tag::MouthOpen, Tag::HandChin], "img/gasp.png").with_label("Gasp"),
        ContentEntry::new(vec![Tag::HandIndexFinger, Tag::HeadUp], "img/idea.png")
            .with_label("Idea"),
    ]
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let recording = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| RunnerConfig::from_env().recording_path);

    let session = build_session()?;
    session.save(&recording).await?;
    println!(
        "synth-session: wrote {} frames to {}",
        session.len(),
        recording.display()
    );

    if let Some(catalog) = args.next().map(PathBuf::from) {
        let json = serde_json::to_string_pretty(&sample_catalog())?;
        tokio::fs::write(&catalog, json).await?;
        println!("synth-session: wrote catalog to {}", catalog.display());
    }
    Ok(())
}
