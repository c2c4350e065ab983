//! Recorded landmark sessions.
//!
//! A recording is JSON lines, one frame per line:
//!
//! ```text
//! {"t_ms": 0, "face": [[0.5, 0.5], ...], "hands": [[[0.4, 0.9], ...]]}
//! {"t_ms": 33, "face": null, "hands": []}
//! ```
//!
//! Landmark sets are validated while parsing, so a short hand or a NaN
//! coordinate fails the load with the offending line number.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use facetag_models::{FaceLandmarks, HandLandmarks};
use facetag_vision::{CapturedFrame, FrameDriver, PoseSource, VisionError, VisionResult};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::debug;

use crate::error::{RunnerError, RunnerResult};

/// One line of a recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Milliseconds since session start
    pub t_ms: u64,
    #[serde(default)]
    pub face: Option<FaceLandmarks>,
    #[serde(default)]
    pub hands: Vec<HandLandmarks>,
}

impl RecordedFrame {
    pub fn timestamp(&self) -> Duration {
        Duration::from_millis(self.t_ms)
    }
}

/// A fully loaded recording.
#[derive(Debug, Clone, Default)]
pub struct RecordedSession {
    frames: Vec<RecordedFrame>,
}

impl RecordedSession {
    pub fn new(frames: Vec<RecordedFrame>) -> Self {
        Self { frames }
    }

    /// Parse JSON lines. Blank lines are ignored; line numbers are 1-based.
    pub fn parse(text: &str) -> RunnerResult<Self> {
        let mut frames = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let frame = serde_json::from_str(line).map_err(|source| RunnerError::RecordingParse {
                line: idx + 1,
                source,
            })?;
            frames.push(frame);
        }
        Ok(Self { frames })
    }

    pub async fn load(path: &Path) -> RunnerResult<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        let session = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            frames = session.frames.len(),
            "Loaded recording"
        );
        Ok(session)
    }

    /// Serialize back to JSON lines.
    pub fn to_jsonl(&self) -> RunnerResult<String> {
        let mut out = String::new();
        for frame in &self.frames {
            let line = serde_json::to_string(frame)
                .map_err(|e| RunnerError::config_error(format!("unserializable frame: {e}")))?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }

    pub async fn save(&self, path: &Path) -> RunnerResult<()> {
        tokio::fs::write(path, self.to_jsonl()?).await?;
        Ok(())
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Split into a frame driver and a pose source over the same frames.
    pub fn into_replay(self, realtime: bool) -> (ReplayDriver, ReplayPoses) {
        let frames = Arc::new(self.frames);
        (
            ReplayDriver {
                frames: Arc::clone(&frames),
                cursor: 0,
                realtime,
                started: None,
                last: Duration::ZERO,
            },
            ReplayPoses { frames },
        )
    }
}

/// Delivers recorded frames in order, optionally paced by their timestamps.
///
/// Timestamps must not decrease; the stabilizer measures holds from them.
#[derive(Debug)]
pub struct ReplayDriver {
    frames: Arc<Vec<RecordedFrame>>,
    cursor: usize,
    realtime: bool,
    started: Option<Instant>,
    last: Duration,
}

#[async_trait]
impl FrameDriver for ReplayDriver {
    async fn next_frame(&mut self) -> VisionResult<Option<CapturedFrame>> {
        let Some(frame) = self.frames.get(self.cursor) else {
            return Ok(None);
        };
        let captured = CapturedFrame {
            index: self.cursor as u64,
            timestamp: frame.timestamp(),
        };
        if captured.timestamp < self.last {
            return Err(VisionError::frame_source_failed(format!(
                "frame {} at {}ms precedes previous frame at {}ms",
                captured.index,
                frame.t_ms,
                self.last.as_millis()
            )));
        }
        self.last = captured.timestamp;
        self.cursor += 1;

        if self.realtime {
            let started = *self.started.get_or_insert_with(Instant::now);
            tokio::time::sleep_until(started + captured.timestamp).await;
        }
        Ok(Some(captured))
    }

    fn name(&self) -> &'static str {
        "replay"
    }
}

/// Serves recorded landmarks for frames delivered by [`ReplayDriver`].
#[derive(Debug, Clone)]
pub struct ReplayPoses {
    frames: Arc<Vec<RecordedFrame>>,
}

impl ReplayPoses {
    fn frame(&self, frame: &CapturedFrame) -> VisionResult<&RecordedFrame> {
        usize::try_from(frame.index)
            .ok()
            .and_then(|i| self.frames.get(i))
            .ok_or_else(|| {
                VisionError::pose_source_failed(format!("no recorded frame {}", frame.index))
            })
    }
}

#[async_trait]
impl PoseSource for ReplayPoses {
    async fn face_landmarks(&self, frame: &CapturedFrame) -> VisionResult<Option<FaceLandmarks>> {
        Ok(self.frame(frame)?.face.clone())
    }

    async fn hand_landmarks(&self, frame: &CapturedFrame) -> VisionResult<Vec<HandLandmarks>> {
        Ok(self.frame(frame)?.hands.clone())
    }

    fn name(&self) -> &'static str {
        "replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facetag_models::Point2D;
    use facetag_vision::synthetic::{hand, FaceBuilder, HandShape};

    fn sample() -> RecordedSession {
        RecordedSession::new(vec![
            RecordedFrame {
                t_ms: 0,
                face: Some(FaceBuilder::new().build().unwrap()),
                hands: vec![hand(HandShape::Fist, Point2D::new(0.3, 0.9)).unwrap()],
            },
            RecordedFrame {
                t_ms: 33,
                face: None,
                hands: vec![],
            },
        ])
    }

    #[test]
    fn test_jsonl_round_trip() {
        let text = sample().to_jsonl().unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().contains(r#""face":null"#));

        let parsed = RecordedSession::parse(&text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed.frames()[0].face.is_some());
        assert_eq!(parsed.frames()[0].hands.len(), 1);
        assert_eq!(parsed.frames()[1].timestamp(), Duration::from_millis(33));
    }

    #[test]
    fn test_parse_skips_blank_lines_and_defaults() {
        let parsed = RecordedSession::parse("\n{\"t_ms\": 5}\n\n").unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed.frames()[0].face.is_none());
        assert!(parsed.frames()[0].hands.is_empty());
    }

    #[test]
    fn test_parse_reports_line() {
        let bad_hand = format!(
            "{{\"t_ms\": 0}}\n{{\"t_ms\": 33, \"hands\": [{}]}}",
            serde_json::to_string(&vec![[0.1, 0.1]; 20]).unwrap()
        );
        match RecordedSession::parse(&bad_hand) {
            Err(RunnerError::RecordingParse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_replay_drives_frames() {
        let (mut driver, poses) = sample().into_replay(false);

        let first = driver.next_frame().await.unwrap().unwrap();
        assert_eq!(first.index, 0);
        assert!(poses.face_landmarks(&first).await.unwrap().is_some());
        assert_eq!(poses.hand_landmarks(&first).await.unwrap().len(), 1);

        let second = driver.next_frame().await.unwrap().unwrap();
        assert_eq!(second.timestamp, Duration::from_millis(33));
        assert!(poses.face_landmarks(&second).await.unwrap().is_none());

        assert!(driver.next_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_backwards_timestamp_fails_driver() {
        let mut frames = sample().frames().to_vec();
        frames.push(RecordedFrame {
            t_ms: 10,
            face: None,
            hands: vec![],
        });
        let (mut driver, _) = RecordedSession::new(frames).into_replay(false);
        driver.next_frame().await.unwrap();
        driver.next_frame().await.unwrap();

        let err = driver.next_frame().await.unwrap_err();
        assert!(matches!(err, VisionError::FrameSourceFailed(_)));
        assert!(err.to_string().contains("frame 2 at 10ms"));
    }

    #[tokio::test]
    async fn test_unknown_frame_is_pose_error() {
        let (_, poses) = sample().into_replay(false);
        let frame = CapturedFrame {
            index: 99,
            timestamp: Duration::ZERO,
        };
        assert!(poses.face_landmarks(&frame).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_pacing() {
        let (mut driver, _) = sample().into_replay(true);
        let start = Instant::now();
        driver.next_frame().await.unwrap();
        driver.next_frame().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(33));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        sample().save(&path).await.unwrap();
        let loaded = RecordedSession::load(&path).await.unwrap();
        assert_eq!(loaded.len(), 2);
    }
}
