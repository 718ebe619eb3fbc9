/// Greedy nearest-centroid assignment between tracked objects and detections
///
/// Rows of the distance matrix are existing objects, columns are new
/// detections. Rows are resolved in ascending order of their best available
/// distance, so the most confident candidate match wins any contested column.
use ndarray::ArrayView2;

/// Result of the greedy proximity assignment
#[derive(Debug, Clone)]
pub struct AssignmentResult {
    /// Accepted matches as (row, column) pairs
    pub matches: Vec<(usize, usize)>,
    /// Rows that did not receive a match
    pub unused_rows: Vec<usize>,
    /// Columns that did not receive a match
    pub unused_cols: Vec<usize>,
}

/// Greedily assign columns to rows by smallest distance.
///
/// Each row's candidate is the first column achieving that row's minimum.
/// Rows are processed in ascending order of that minimum (ties broken by row
/// index). A candidate is skipped when its row or column was already consumed
/// by an earlier, closer match, and rejected outright when the distance
/// exceeds `max_distance`.
pub fn assign_by_proximity(dist: ArrayView2<f32>, max_distance: f32) -> AssignmentResult {
    let n_rows = dist.nrows();
    let n_cols = dist.ncols();

    if n_rows == 0 || n_cols == 0 {
        return AssignmentResult {
            matches: Vec::new(),
            unused_rows: (0..n_rows).collect(),
            unused_cols: (0..n_cols).collect(),
        };
    }

    // (row, best distance, column achieving it); first minimum wins
    let mut candidates: Vec<(usize, f32, usize)> = (0..n_rows)
        .map(|row| {
            let mut best_col = 0;
            let mut best = dist[[row, 0]];
            for col in 1..n_cols {
                if dist[[row, col]] < best {
                    best = dist[[row, col]];
                    best_col = col;
                }
            }
            (row, best, best_col)
        })
        .collect();

    // Stable sort keeps row-index order for equal distances
    candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut used_rows = vec![false; n_rows];
    let mut used_cols = vec![false; n_cols];
    let mut matches = Vec::new();

    for (row, best, col) in candidates {
        if used_rows[row] || used_cols[col] {
            continue;
        }
        if best > max_distance {
            continue;
        }
        used_rows[row] = true;
        used_cols[col] = true;
        matches.push((row, col));
    }

    let unused_rows: Vec<usize> = (0..n_rows).filter(|&r| !used_rows[r]).collect();
    let unused_cols: Vec<usize> = (0..n_cols).filter(|&c| !used_cols[c]).collect();

    AssignmentResult {
        matches,
        unused_rows,
        unused_cols,
    }
}
