//! Pure Rust centroid-based tracking library
//!
//! This crate provides a deterministic single-frame-distance tracker:
//! detections are reduced to centroids and associated frame-to-frame by
//! greedy nearest-centroid assignment, with survival/expiry semantics for
//! missed detections. There is no motion prediction and no appearance
//! re-identification.
//!
//! ```rust
//! use centroidtrack::{CentroidTracker, Rect, TrackerConfig};
//!
//! let mut tracker = CentroidTracker::new(TrackerConfig::default());
//! let objects = tracker.update(&[Rect::new(0, 0, 10, 10)]);
//! assert_eq!(objects[&0].centroid, centroidtrack::Centroid::new(5, 5));
//! ```

pub mod assignment;
pub mod centroid;
pub mod tracker;

pub use assignment::{assign_by_proximity, AssignmentResult};
pub use centroid::{distances, Centroid, Rect};
pub use tracker::{CentroidTracker, ObjectId, TrackedObject, TrackerConfig};
