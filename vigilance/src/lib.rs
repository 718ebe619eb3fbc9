//! Surveillance pipeline around the centroid tracker
//!
//! Wires the external collaborators of a live-video surveillance system
//! (object detector, plate recognizer, plate store, frame source) to the
//! tracking core: per frame, detections are filtered, associated to stable
//! identities, and plate-bearing tracks are read and persisted. The
//! collaborators themselves stay behind traits; this crate ships scripted
//! stand-ins for tests and examples.

pub mod detector;
pub mod error;
pub mod pipeline;
pub mod plate;
pub mod sink;
pub mod types;

pub use detector::{filter_detections, ObjectDetector, ScriptedDetector};
pub use error::{Result, VigilanceError};
pub use pipeline::{
    FramePipeline, FrameReport, FrameSource, PipelineConfig, RunSummary, TrackReport,
};
pub use plate::{normalize_plate, PlateRecognizer, ScriptedRecognizer};
pub use sink::{MemoryPlateSink, PlateRecord, PlateSink, SqlitePlateSink};
pub use types::{BoundingBox, Detection, ImageData, ImageFormat, ObjectClass};

/// Initialize the surveillance library
/// This function should be called once before constructing a pipeline
pub fn init() {
    log::info!("Surveillance pipeline library initialized");
}

/// Get library version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
