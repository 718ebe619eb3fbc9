/// Unified detector interface for the surveillance pipeline
///
/// The actual detector (a pretrained DNN) lives outside this crate; the
/// pipeline only needs per-frame detections through this trait.
use crate::error::Result;
use crate::types::{Detection, ImageData};
use std::collections::VecDeque;

/// Common interface for object detectors
pub trait ObjectDetector: Send {
    /// Detect objects in a single frame
    fn detect(&mut self, frame: &ImageData) -> Result<Vec<Detection>>;

    /// Detector name (for logging/debugging)
    fn name(&self) -> &str;
}

/// Drop detections below the confidence threshold or outside the target
/// class allow-list, preserving input order.
pub fn filter_detections(detections: Vec<Detection>, min_confidence: f32) -> Vec<Detection> {
    detections
        .into_iter()
        .filter(|det| det.confidence >= min_confidence && det.class.is_target())
        .collect()
}

/// Scripted detector that replays pre-canned per-frame detections.
/// Used in tests and examples in place of a real model.
pub struct ScriptedDetector {
    frames: VecDeque<Vec<Detection>>,
}

impl ScriptedDetector {
    pub fn new<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Vec<Detection>>,
    {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Frames left to replay
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl ObjectDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &ImageData) -> Result<Vec<Detection>> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoundingBox, ImageFormat, ObjectClass};

    fn det(class: ObjectClass, confidence: f32) -> Detection {
        Detection::new(BoundingBox::new(0, 0, 10, 10), class, confidence)
    }

    #[test]
    fn test_filter_drops_low_confidence_and_non_targets() {
        let detections = vec![
            det(ObjectClass::Car, 0.9),
            det(ObjectClass::Car, 0.3),
            det(ObjectClass::Dog, 0.9),
            det(ObjectClass::Person, 0.5),
        ];

        let kept = filter_detections(detections, 0.5);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].class, ObjectClass::Car);
        assert_eq!(kept[1].class, ObjectClass::Person);
    }

    #[test]
    fn test_scripted_detector_replays_then_runs_dry() {
        let mut detector = ScriptedDetector::new(vec![vec![det(ObjectClass::Car, 0.9)], vec![]]);
        let frame = ImageData::new(vec![0u8; 12], 2, 2, ImageFormat::RGB);

        assert_eq!(detector.detect(&frame).unwrap().len(), 1);
        assert!(detector.detect(&frame).unwrap().is_empty());
        assert!(detector.detect(&frame).unwrap().is_empty());
    }
}
