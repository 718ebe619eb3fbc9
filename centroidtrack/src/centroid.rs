//! Rectangle and centroid operations, plus pairwise distance matrices

use ndarray::prelude::*;
use num::cast;
use rayon::prelude::*;
use std::fmt;

/// Axis-aligned detection rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Integer midpoint of the rectangle
    pub fn centroid(&self) -> Centroid {
        Centroid {
            x: (self.x1 + self.x2) / 2,
            y: (self.y1 + self.y2) / 2,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Integer 2D position of a tracked object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Centroid {
    pub x: i32,
    pub y: i32,
}

impl Centroid {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another centroid
    pub fn distance_to(&self, other: &Centroid) -> f32 {
        let dx: f32 = cast(self.x - other.x).unwrap();
        let dy: f32 = cast(self.y - other.y).unwrap();
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Centroid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compute the pairwise distance matrix between tracked centroids and
/// detection centroids with parallel processing.
/// Returns: (n_tracked, n_detections) distance matrix
pub fn distances(tracked: &[Centroid], detections: &[Centroid]) -> Array2<f32> {
    let n_tracked = tracked.len();
    let n_dets = detections.len();

    if n_tracked == 0 || n_dets == 0 {
        return Array2::zeros((n_tracked, n_dets));
    }

    let dist_data: Vec<f32> = tracked
        .par_iter()
        .flat_map(|existing| {
            detections
                .iter()
                .map(|new| existing.distance_to(new))
                .collect::<Vec<_>>()
        })
        .collect();

    Array2::from_shape_vec((n_tracked, n_dets), dist_data).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_centroid_of_rect() {
        let rect = Rect::new(0, 0, 10, 10);
        assert_eq!(rect.centroid(), Centroid::new(5, 5));
    }

    #[test]
    fn test_centroid_truncates_odd_sums() {
        let rect = Rect::new(0, 0, 11, 7);
        assert_eq!(rect.centroid(), Centroid::new(5, 3));
    }

    #[test]
    fn test_distance() {
        let a = Centroid::new(0, 0);
        let b = Centroid::new(3, 4);
        assert_abs_diff_eq!(a.distance_to(&b), 5.0, epsilon = 0.0001);
    }

    #[test]
    fn test_distance_matrix_shape_and_values() {
        let tracked = vec![Centroid::new(0, 0), Centroid::new(10, 0)];
        let dets = vec![Centroid::new(0, 0), Centroid::new(0, 5), Centroid::new(10, 0)];
        let d = distances(&tracked, &dets);

        assert_eq!(d.shape(), &[2, 3]);
        assert_abs_diff_eq!(d[[0, 0]], 0.0, epsilon = 0.0001);
        assert_abs_diff_eq!(d[[0, 1]], 5.0, epsilon = 0.0001);
        assert_abs_diff_eq!(d[[1, 2]], 0.0, epsilon = 0.0001);
        assert_abs_diff_eq!(d[[1, 0]], 10.0, epsilon = 0.0001);
    }

    #[test]
    fn test_distance_matrix_empty() {
        let d = distances(&[], &[Centroid::new(1, 1)]);
        assert_eq!(d.shape(), &[0, 1]);
    }
}
