//! Centroid tracker: frame-to-frame identity association with
//! survival/expiry semantics
//!
//! Detections are reduced to integer centroids and greedily matched to the
//! nearest live object. Objects survive missed frames up to a configurable
//! limit, then expire permanently; identities are never reused.

use crate::assignment::assign_by_proximity;
use crate::centroid::{distances, Centroid, Rect};
use std::collections::BTreeMap;

/// Stable identity of a tracked object, unique for the process lifetime
pub type ObjectId = u32;

/// Tracker configuration
#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    /// Consecutive missed frames an object survives before removal
    pub max_missed_frames: u32,
    /// Maximum centroid distance (pixels) for a valid match
    pub max_match_distance: f32,
    /// Reconcile both unmatched objects and unmatched detections every
    /// frame. With the default (false) only one side is reconciled, chosen
    /// by comparing object count against detection count, so detections
    /// rejected by the distance gate are silently dropped whenever objects
    /// are not outnumbered.
    pub symmetric_reconciliation: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_missed_frames: 40,
            max_match_distance: 50.0,
            symmetric_reconciliation: false,
        }
    }
}

/// A live tracked object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedObject {
    /// Current position, updated on every successful match
    pub centroid: Centroid,
    /// Consecutive update calls without a match; 0 after registration or
    /// a successful match
    pub missed_frames: u32,
}

/// Greedy nearest-centroid multi-object tracker
///
/// Objects are keyed by monotonically increasing id in a `BTreeMap`, so
/// ascending-key iteration is registration order.
#[derive(Debug, Clone, Default)]
pub struct CentroidTracker {
    config: TrackerConfig,
    next_id: ObjectId,
    objects: BTreeMap<ObjectId, TrackedObject>,
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            next_id: 0,
            objects: BTreeMap::new(),
        }
    }

    /// Register a brand-new object for an unmatched detection
    fn register(&mut self, centroid: Centroid) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.insert(
            id,
            TrackedObject {
                centroid,
                missed_frames: 0,
            },
        );
        log::debug!("registered object {} at {}", id, centroid);
        id
    }

    /// Permanently remove an object
    fn deregister(&mut self, id: ObjectId) {
        self.objects.remove(&id);
        log::debug!("deregistered object {}", id);
    }

    /// Age an unmatched object, removing it once the miss limit is exceeded
    fn mark_missed(&mut self, id: ObjectId) {
        let Some(object) = self.objects.get_mut(&id) else {
            return;
        };
        object.missed_frames += 1;
        if object.missed_frames > self.config.max_missed_frames {
            self.deregister(id);
        }
    }

    /// Process one frame of detections and return the live objects.
    ///
    /// With no detections every object ages (and may expire). With no live
    /// objects every detection registers. Otherwise detections are greedily
    /// matched to the nearest object within `max_match_distance`, then the
    /// leftovers are reconciled: unmatched objects age when objects are at
    /// least as numerous as detections, unmatched detections register when
    /// detections outnumber objects.
    pub fn update(&mut self, rects: &[Rect]) -> &BTreeMap<ObjectId, TrackedObject> {
        if rects.is_empty() {
            let ids: Vec<ObjectId> = self.objects.keys().copied().collect();
            for id in ids {
                self.mark_missed(id);
            }
            return &self.objects;
        }

        let input_centroids: Vec<Centroid> = rects.iter().map(Rect::centroid).collect();

        if self.objects.is_empty() {
            for centroid in &input_centroids {
                self.register(*centroid);
            }
            return &self.objects;
        }

        // Snapshot ids and positions in registration order; row i of the
        // distance matrix stays aligned with ids[i]
        let ids: Vec<ObjectId> = self.objects.keys().copied().collect();
        let object_centroids: Vec<Centroid> =
            self.objects.values().map(|o| o.centroid).collect();

        let dist = distances(&object_centroids, &input_centroids);
        let result = assign_by_proximity(dist.view(), self.config.max_match_distance);

        for &(row, col) in &result.matches {
            let object = self
                .objects
                .get_mut(&ids[row])
                .expect("matched row refers to a live object");
            object.centroid = input_centroids[col];
            object.missed_frames = 0;
        }

        if self.config.symmetric_reconciliation {
            for &row in &result.unused_rows {
                self.mark_missed(ids[row]);
            }
            for &col in &result.unused_cols {
                self.register(input_centroids[col]);
            }
        } else if object_centroids.len() >= input_centroids.len() {
            for &row in &result.unused_rows {
                self.mark_missed(ids[row]);
            }
        } else {
            for &col in &result.unused_cols {
                self.register(input_centroids[col]);
            }
        }

        &self.objects
    }

    /// Live objects in registration order
    pub fn objects(&self) -> &BTreeMap<ObjectId, TrackedObject> {
        &self.objects
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
