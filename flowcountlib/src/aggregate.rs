//! Multi-unit aggregation and ranking.

use std::cmp::Ordering;

use crate::score::score;
use crate::stats::{ConstructCounts, ProjectStats, UnitStats};

/// Merge per-unit results into a project total and rank units by complexity.
///
/// The aggregate's primitive counters are the sums over all units; its
/// derived score is recomputed from those sums rather than assembled from
/// per-unit scores, so score rounding happens exactly once. Units are sorted
/// descending by their individual complexity; the sort is stable, so equal
/// scores keep the caller's scan order.
pub fn aggregate(units: Vec<UnitStats>) -> ProjectStats {
    let mut total = ConstructCounts::new();
    for unit in &units {
        total += unit.counts;
    }
    let total = score(total);

    let mut units = units;
    units.sort_by(|a, b| {
        b.complexity
            .partial_cmp(&a.complexity)
            .unwrap_or(Ordering::Equal)
    });

    ProjectStats { units, total }
}
