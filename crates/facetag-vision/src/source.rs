//! Capability traits for frame delivery and pose inference.
//!
//! These keep the classification core independent of any camera or model
//! backend. A recorded session, a live camera bridge, or a test fixture can
//! implement them.

use std::time::Duration;

use async_trait::async_trait;
use facetag_models::{FaceLandmarks, HandLandmarks};

use crate::error::VisionResult;
use crate::pipeline::FrameSnapshot;

/// Handle for one delivered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedFrame {
    /// Zero-based position in the stream
    pub index: u64,
    /// Monotonic time since session start
    pub timestamp: Duration,
}

/// Delivers frames one at a time.
#[async_trait]
pub trait FrameDriver: Send {
    /// Next frame, or `None` at end of stream.
    async fn next_frame(&mut self) -> VisionResult<Option<CapturedFrame>>;

    /// Driver name for logging.
    fn name(&self) -> &'static str;
}

/// Produces landmarks for a delivered frame.
#[async_trait]
pub trait PoseSource: Send + Sync {
    /// Zero or one face.
    async fn face_landmarks(&self, frame: &CapturedFrame) -> VisionResult<Option<FaceLandmarks>>;

    /// Zero or more hands, in detection order.
    async fn hand_landmarks(&self, frame: &CapturedFrame) -> VisionResult<Vec<HandLandmarks>>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}

/// Run face inference, then hand inference, for one frame.
pub async fn capture_snapshot<P>(source: &P, frame: &CapturedFrame) -> VisionResult<FrameSnapshot>
where
    P: PoseSource + ?Sized,
{
    let face = source.face_landmarks(frame).await?;
    let hands = source.hand_landmarks(frame).await?;
    Ok(FrameSnapshot::new(frame.timestamp, face, hands))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VisionError;
    use crate::synthetic::{hand, FaceBuilder, HandShape};
    use facetag_models::Point2D;
    use std::sync::Mutex;

    struct ScriptedSource {
        calls: Mutex<Vec<&'static str>>,
        fail_hands: bool,
    }

    #[async_trait]
    impl PoseSource for ScriptedSource {
        async fn face_landmarks(&self, _frame: &CapturedFrame) -> VisionResult<Option<FaceLandmarks>> {
            self.calls.lock().unwrap().push("face");
            Ok(Some(FaceBuilder::new().build()?))
        }

        async fn hand_landmarks(&self, _frame: &CapturedFrame) -> VisionResult<Vec<HandLandmarks>> {
            self.calls.lock().unwrap().push("hands");
            if self.fail_hands {
                return Err(VisionError::pose_source_failed("hand model unavailable"));
            }
            Ok(vec![hand(HandShape::Fist, Point2D::new(0.3, 0.9))?])
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn frame() -> CapturedFrame {
        CapturedFrame {
            index: 3,
            timestamp: Duration::from_millis(99),
        }
    }

    #[tokio::test]
    async fn test_face_before_hands() {
        let source = ScriptedSource {
            calls: Mutex::new(Vec::new()),
            fail_hands: false,
        };
        let snapshot = capture_snapshot(&source, &frame()).await.unwrap();
        assert_eq!(*source.calls.lock().unwrap(), vec!["face", "hands"]);
        assert_eq!(snapshot.timestamp, Duration::from_millis(99));
        assert!(snapshot.face.is_some());
        assert_eq!(snapshot.hands.len(), 1);
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        let source = ScriptedSource {
            calls: Mutex::new(Vec::new()),
            fail_hands: true,
        };
        let err = capture_snapshot(&source, &frame()).await.unwrap_err();
        assert!(matches!(err, VisionError::PoseSourceFailed(_)));
    }
}
