use centroidtrack::{CentroidTracker, Rect, TrackerConfig};

fn main() {
    println!("Tracking two objects across a short synthetic sequence...");

    let mut tracker = CentroidTracker::new(TrackerConfig::default());

    // Frame 1: two objects appear
    let frame1 = vec![Rect::new(10, 10, 50, 50), Rect::new(200, 200, 240, 240)];
    let objects = tracker.update(&frame1);
    println!("Frame 1: {} objects registered", objects.len());
    for (id, object) in objects {
        println!("  object {} at {}", id, object.centroid);
    }

    // Frame 2: both move slightly
    let frame2 = vec![Rect::new(14, 12, 54, 52), Rect::new(205, 196, 245, 236)];
    let objects = tracker.update(&frame2);
    println!("\nFrame 2: identities survive the motion");
    for (id, object) in objects {
        println!("  object {} at {}", id, object.centroid);
    }

    // Frame 3: the second object is missed by the detector
    let frame3 = vec![Rect::new(18, 14, 58, 54)];
    let objects = tracker.update(&frame3);
    println!("\nFrame 3: one detection only");
    for (id, object) in objects {
        println!(
            "  object {} at {} (missed {} frames)",
            id, object.centroid, object.missed_frames
        );
    }

    // Frame 4: the second object reappears and a newcomer enters
    let frame4 = vec![
        Rect::new(22, 16, 62, 56),
        Rect::new(208, 198, 248, 238),
        Rect::new(400, 50, 440, 90),
    ];
    let objects = tracker.update(&frame4);
    println!("\nFrame 4: a newcomer gets a fresh id");
    for (id, object) in objects {
        println!(
            "  object {} at {} (missed {} frames)",
            id, object.centroid, object.missed_frames
        );
    }
}
