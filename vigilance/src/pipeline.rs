//! Per-frame processing pipeline
//!
//! Owns the single process-lifetime tracker and drives it once per frame:
//! detections are filtered, reduced to rectangles, associated by the
//! tracker, correlated back to the frame's detection list, and plate-bearing
//! tracks are routed through the plate recognizer and sink.

use crate::detector::{filter_detections, ObjectDetector};
use crate::error::Result;
use crate::plate::{normalize_plate, PlateRecognizer};
use crate::sink::{PlateRecord, PlateSink};
use crate::types::{BoundingBox, Detection, ImageData, ObjectClass};
use centroidtrack::{CentroidTracker, ObjectId, Rect, TrackedObject, TrackerConfig};
use serde::{Deserialize, Serialize};

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum detector confidence to consider a detection
    pub confidence_threshold: f32,
    /// Consecutive missed frames a tracked object survives
    pub max_missed_frames: u32,
    /// Maximum centroid distance (pixels) for a valid match
    pub max_match_distance: f32,
    /// Reconcile both unmatched sides every frame instead of the
    /// count-based asymmetric policy
    pub symmetric_reconciliation: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            max_missed_frames: 40,
            max_match_distance: 50.0,
            symmetric_reconciliation: false,
        }
    }
}

impl PipelineConfig {
    fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            max_missed_frames: self.max_missed_frames,
            max_match_distance: self.max_match_distance,
            symmetric_reconciliation: self.symmetric_reconciliation,
        }
    }
}

/// One live track in a frame report. `class` and `bbox` are present only
/// when the track was matched or registered this frame; a coasting track
/// carries its last known centroid and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackReport {
    pub id: ObjectId,
    pub centroid: (i32, i32),
    pub missed_frames: u32,
    pub class: Option<ObjectClass>,
    pub bbox: Option<BoundingBox>,
    /// Plate recognized on this track this frame, normalized
    pub plate: Option<String>,
}

/// Structured result of processing one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    pub tracks: Vec<TrackReport>,
    /// Detections produced by the detector before filtering
    pub detections: usize,
    /// Plates newly stored this frame
    pub plates_recorded: u32,
}

/// Source of frames for the run loop (camera, video file, test script)
pub trait FrameSource: Send {
    /// Next frame, or `None` when the stream is exhausted
    fn next_frame(&mut self) -> Result<Option<ImageData>>;
}

/// Totals for a full run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub frames_processed: u64,
    pub frames_skipped: u64,
    pub plates_recorded: u64,
}

/// Consecutive capture failures tolerated before the run loop gives up
const MAX_CONSECUTIVE_CAPTURE_FAILURES: u32 = 30;

/// Frame-by-frame surveillance pipeline
pub struct FramePipeline {
    config: PipelineConfig,
    tracker: CentroidTracker,
    detector: Box<dyn ObjectDetector>,
    recognizer: Box<dyn PlateRecognizer>,
    sink: Box<dyn PlateSink>,
}

impl FramePipeline {
    pub fn new(
        config: PipelineConfig,
        detector: Box<dyn ObjectDetector>,
        recognizer: Box<dyn PlateRecognizer>,
        sink: Box<dyn PlateSink>,
    ) -> Self {
        log::info!(
            "Creating pipeline: detector={}, recognizer={}, confidence_threshold={:.2}, max_missed_frames={}, max_match_distance={:.1}",
            detector.name(),
            recognizer.name(),
            config.confidence_threshold,
            config.max_missed_frames,
            config.max_match_distance
        );
        let tracker = CentroidTracker::new(config.tracker_config());
        Self {
            config,
            tracker,
            detector,
            recognizer,
            sink,
        }
    }

    /// Process one frame: detect, filter, track, correlate, read plates.
    pub fn process_frame(&mut self, frame: &ImageData) -> Result<FrameReport> {
        let detections = self.detector.detect(frame)?;
        let total = detections.len();
        let filtered = filter_detections(detections, self.config.confidence_threshold);

        let rects: Vec<Rect> = filtered.iter().map(|det| det.bbox.to_rect()).collect();
        let objects: Vec<(ObjectId, TrackedObject)> = self
            .tracker
            .update(&rects)
            .iter()
            .map(|(id, object)| (*id, *object))
            .collect();

        let mut plates_recorded = 0;
        let mut tracks = Vec::with_capacity(objects.len());
        for (id, object) in objects {
            let mut report = TrackReport {
                id,
                centroid: (object.centroid.x, object.centroid.y),
                missed_frames: object.missed_frames,
                class: None,
                bbox: None,
                plate: None,
            };

            // Identities map back to detections through the same frame's
            // rectangle list, in the order the centroids were computed.
            // Coasting objects have no detection this frame.
            if object.missed_frames == 0 {
                if let Some(idx) = rects.iter().position(|r| r.centroid() == object.centroid) {
                    let detection = &filtered[idx];
                    report.class = Some(detection.class);
                    report.bbox = Some(detection.bbox);

                    if detection.class.bears_plate() {
                        match self.read_plate(frame, detection) {
                            Ok(Some(plate)) => {
                                let record = PlateRecord {
                                    object_id: id,
                                    label: detection.class,
                                    plate: plate.clone(),
                                };
                                if self.sink.insert(&record)? {
                                    log::info!(
                                        "recorded plate {} for object {} ({})",
                                        plate,
                                        id,
                                        detection.class
                                    );
                                    plates_recorded += 1;
                                }
                                report.plate = Some(plate);
                            }
                            Ok(None) => {}
                            Err(err) => {
                                log::warn!("plate recognition failed for object {}: {}", id, err);
                            }
                        }
                    }
                }
            }

            tracks.push(report);
        }

        Ok(FrameReport {
            tracks,
            detections: total,
            plates_recorded,
        })
    }

    /// Crop the detection box and run the recognizer over it
    fn read_plate(&mut self, frame: &ImageData, detection: &Detection) -> Result<Option<String>> {
        let Some(region) = frame.crop(&detection.bbox) else {
            return Ok(None);
        };
        let Some(raw) = self.recognizer.recognize(&region)? else {
            return Ok(None);
        };
        let plate = normalize_plate(&raw);
        if plate.is_empty() {
            return Ok(None);
        }
        Ok(Some(plate))
    }

    /// Pull frames from `source` until exhaustion. A failed capture or a
    /// failed frame is logged and skipped.
    pub fn run(&mut self, source: &mut dyn FrameSource) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut consecutive_capture_failures = 0;

        loop {
            let frame = match source.next_frame() {
                Ok(Some(frame)) => {
                    consecutive_capture_failures = 0;
                    frame
                }
                Ok(None) => break,
                Err(err) => {
                    consecutive_capture_failures += 1;
                    summary.frames_skipped += 1;
                    log::warn!("frame capture failed, skipping: {}", err);
                    if consecutive_capture_failures >= MAX_CONSECUTIVE_CAPTURE_FAILURES {
                        log::error!(
                            "{} consecutive capture failures, stopping run",
                            consecutive_capture_failures
                        );
                        break;
                    }
                    continue;
                }
            };

            match self.process_frame(&frame) {
                Ok(report) => {
                    summary.frames_processed += 1;
                    summary.plates_recorded += u64::from(report.plates_recorded);
                }
                Err(err) => {
                    summary.frames_skipped += 1;
                    log::warn!("frame processing failed, skipping: {}", err);
                }
            }
        }

        log::info!(
            "run finished: {} frames processed, {} skipped, {} plates recorded",
            summary.frames_processed,
            summary.frames_skipped,
            summary.plates_recorded
        );
        Ok(summary)
    }

    /// The tracker owned by this pipeline
    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::ScriptedDetector;
    use crate::plate::ScriptedRecognizer;
    use crate::sink::MemoryPlateSink;
    use crate::types::ImageFormat;
    use std::collections::VecDeque;

    fn blank_frame() -> ImageData {
        ImageData::new(vec![0u8; 100 * 100 * 3], 100, 100, ImageFormat::RGB)
    }

    fn car(x1: i32, y1: i32, x2: i32, y2: i32) -> Detection {
        Detection::new(BoundingBox::new(x1, y1, x2, y2), ObjectClass::Car, 0.9)
    }

    fn pipeline_with(
        frames: Vec<Vec<Detection>>,
        responses: Vec<Option<String>>,
    ) -> (FramePipeline, MemoryPlateSink) {
        let sink = MemoryPlateSink::new();
        let pipeline = FramePipeline::new(
            PipelineConfig::default(),
            Box::new(ScriptedDetector::new(frames)),
            Box::new(ScriptedRecognizer::new(responses)),
            Box::new(sink.clone()),
        );
        (pipeline, sink)
    }

    #[test]
    fn test_pipeline_tracks_and_records_plate() {
        let (mut pipeline, sink) = pipeline_with(
            vec![
                vec![car(10, 10, 50, 50)],
                vec![car(14, 12, 54, 52)],
            ],
            vec![Some("AB 123".to_string()), Some("AB 123".to_string())],
        );

        let report = pipeline.process_frame(&blank_frame()).unwrap();
        assert_eq!(report.tracks.len(), 1);
        assert_eq!(report.tracks[0].id, 0);
        assert_eq!(report.tracks[0].plate, Some("AB123".to_string()));
        assert_eq!(report.plates_recorded, 1);

        // Same plate on the same identity next frame: reported but not
        // stored again
        let report = pipeline.process_frame(&blank_frame()).unwrap();
        assert_eq!(report.tracks[0].id, 0);
        assert_eq!(report.tracks[0].plate, Some("AB123".to_string()));
        assert_eq!(report.plates_recorded, 0);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.records()[0].plate, "AB123");
        assert_eq!(sink.records()[0].object_id, 0);
    }

    #[test]
    fn test_coasting_track_reports_centroid_only() {
        let (mut pipeline, _sink) = pipeline_with(
            vec![vec![car(10, 10, 50, 50)], vec![]],
            vec![None, None],
        );

        pipeline.process_frame(&blank_frame()).unwrap();
        let report = pipeline.process_frame(&blank_frame()).unwrap();

        assert_eq!(report.tracks.len(), 1);
        let track = &report.tracks[0];
        assert_eq!(track.missed_frames, 1);
        assert_eq!(track.centroid, (30, 30));
        assert!(track.class.is_none());
        assert!(track.bbox.is_none());
        assert!(track.plate.is_none());
    }

    #[test]
    fn test_non_plate_classes_skip_recognition() {
        let person = Detection::new(BoundingBox::new(10, 10, 50, 50), ObjectClass::Person, 0.9);
        let (mut pipeline, sink) = pipeline_with(
            vec![vec![person]],
            vec![Some("GHOST".to_string())],
        );

        let report = pipeline.process_frame(&blank_frame()).unwrap();
        assert_eq!(report.tracks[0].class, Some(ObjectClass::Person));
        assert!(report.tracks[0].plate.is_none());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_low_confidence_detections_are_ignored() {
        let weak = Detection::new(BoundingBox::new(10, 10, 50, 50), ObjectClass::Car, 0.2);
        let (mut pipeline, _sink) = pipeline_with(vec![vec![weak]], vec![]);

        let report = pipeline.process_frame(&blank_frame()).unwrap();
        assert_eq!(report.detections, 1);
        assert!(report.tracks.is_empty());
        assert!(pipeline.tracker().is_empty());
    }

    #[test]
    fn test_two_tracks_correlate_to_their_own_boxes() {
        let (mut pipeline, _sink) = pipeline_with(
            vec![
                vec![car(0, 0, 20, 20), car(200, 200, 240, 240)],
                vec![car(2, 2, 22, 22), car(203, 201, 243, 241)],
            ],
            vec![None, None, None, None],
        );

        pipeline.process_frame(&blank_frame()).unwrap();
        let report = pipeline.process_frame(&blank_frame()).unwrap();

        assert_eq!(report.tracks.len(), 2);
        assert_eq!(report.tracks[0].bbox, Some(BoundingBox::new(2, 2, 22, 22)));
        assert_eq!(
            report.tracks[1].bbox,
            Some(BoundingBox::new(203, 201, 243, 241))
        );
    }

    struct FlakySource {
        script: VecDeque<Result<Option<ImageData>>>,
    }

    impl FrameSource for FlakySource {
        fn next_frame(&mut self) -> Result<Option<ImageData>> {
            self.script.pop_front().unwrap_or(Ok(None))
        }
    }

    #[test]
    fn test_run_skips_failed_captures() {
        let (mut pipeline, sink) = pipeline_with(
            vec![
                vec![car(10, 10, 50, 50)],
                vec![car(14, 12, 54, 52)],
            ],
            vec![Some("AB 123".to_string()), None],
        );

        let mut source = FlakySource {
            script: VecDeque::from(vec![
                Ok(Some(blank_frame())),
                Err(crate::error::VigilanceError::capture("camera glitch")),
                Ok(Some(blank_frame())),
                Ok(None),
            ]),
        };

        let summary = pipeline.run(&mut source).unwrap();
        assert_eq!(summary.frames_processed, 2);
        assert_eq!(summary.frames_skipped, 1);
        assert_eq!(summary.plates_recorded, 1);
        assert_eq!(sink.len(), 1);
    }
}
