/// Synthetic surveillance run
///
/// Replays a short scripted scene (a car driving through, a pedestrian
/// walking) against the full pipeline with scripted detector/recognizer
/// stand-ins, then prints the per-run summary and the stored plates.
///
/// Usage:
///   cargo run --example watch_synthetic
use std::collections::VecDeque;
use vigilance::{
    BoundingBox, Detection, FramePipeline, FrameSource, ImageData, ImageFormat, MemoryPlateSink,
    ObjectClass, PipelineConfig, Result, ScriptedDetector, ScriptedRecognizer,
};

struct ScriptedSource {
    frames: VecDeque<ImageData>,
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Option<ImageData>> {
        Ok(self.frames.pop_front())
    }
}

fn blank_frame() -> ImageData {
    ImageData::new(vec![0u8; 600 * 400 * 3], 600, 400, ImageFormat::RGB)
}

fn car(x: i32) -> Detection {
    Detection::new(BoundingBox::new(x, 150, x + 80, 200), ObjectClass::Car, 0.92)
}

fn person(y: i32) -> Detection {
    Detection::new(BoundingBox::new(40, y, 70, y + 60), ObjectClass::Person, 0.71)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    vigilance::init();

    // A car drives left to right while a pedestrian walks down the edge;
    // the detector misses the car entirely on frame 4
    let scripted_frames = vec![
        vec![car(100), person(50)],
        vec![car(130), person(58)],
        vec![car(160), person(66)],
        vec![person(74)],
        vec![car(190), person(82)],
        vec![car(220)],
    ];

    // The plate becomes readable once the car is close enough
    let plate_responses = vec![
        None,
        None,
        Some("AB 123 CD".to_string()),
        Some("AB 123 CD".to_string()),
        Some("AB 123 CD".to_string()),
    ];

    let sink = MemoryPlateSink::new();
    let mut pipeline = FramePipeline::new(
        PipelineConfig::default(),
        Box::new(ScriptedDetector::new(scripted_frames)),
        Box::new(ScriptedRecognizer::new(plate_responses)),
        Box::new(sink.clone()),
    );

    let mut source = ScriptedSource {
        frames: (0..6).map(|_| blank_frame()).collect(),
    };

    let summary = pipeline.run(&mut source)?;
    println!("summary: {}", serde_json::to_string_pretty(&summary)?);

    println!("\nstored plates:");
    for record in sink.records() {
        println!(
            "  object {} ({}): {}",
            record.object_id,
            record.label.name(),
            record.plate
        );
    }

    println!("\nlive objects at end of run:");
    for (id, object) in pipeline.tracker().objects() {
        println!(
            "  object {} at {} (missed {} frames)",
            id, object.centroid, object.missed_frames
        );
    }

    Ok(())
}
