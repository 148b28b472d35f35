//! Bucketed distributions and the median-bucket reduction.
//!
//! Bucket `i` covers `[buckets[i], buckets[i + 1])`. The canonical layout has
//! one more boundary than counts. A layout with exactly as many boundaries as
//! counts is accepted too; its last bucket is open towards `+inf`.

use crate::error::{ProbeError, Result};

/// Distribution snapshot read from a registry. Built fresh per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Float64Histogram {
    /// Per-bucket occurrence counts (not cumulative).
    pub counts: Vec<u64>,
    /// Ascending bucket boundaries.
    pub buckets: Vec<f64>,
}

impl Float64Histogram {
    pub fn new(counts: Vec<u64>, buckets: Vec<f64>) -> Self {
        Self { counts, buckets }
    }

    /// Sum of all bucket counts (saturating).
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    /// Approximate median: the upper boundary of the first bucket whose
    /// running count reaches `total / 2` (integer division).
    ///
    /// This is a coarse bucket pick, not an interpolated median.
    pub fn median_bucket(&self) -> Result<f64> {
        if self.counts.is_empty() {
            return Err(ProbeError::Internal("histogram has no buckets".into()));
        }
        let n = self.counts.len();
        if self.buckets.len() != n + 1 && self.buckets.len() != n {
            return Err(ProbeError::Internal(format!(
                "histogram has {} boundaries for {} buckets",
                self.buckets.len(),
                n
            )));
        }

        let threshold = self.total() / 2;
        let mut running = 0u64;
        for (i, count) in self.counts.iter().enumerate() {
            running = running.saturating_add(*count);
            if running >= threshold {
                return Ok(self.upper_bound(i));
            }
        }

        Err(ProbeError::Internal(
            "median bucket walk never reached its threshold".into(),
        ))
    }

    fn upper_bound(&self, i: usize) -> f64 {
        self.buckets.get(i + 1).copied().unwrap_or(f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_fixture_picks_twenty() {
        let h = Float64Histogram::new(vec![2, 2, 4], vec![0.0, 10.0, 20.0]);
        assert_eq!(h.total(), 8);
        assert_eq!(h.median_bucket().ok(), Some(20.0));
    }

    #[test]
    fn canonical_layout_uses_upper_boundary() {
        // total 10, threshold 5: running 1, 4, 9 -> bucket 2 -> [2, 3)
        let h = Float64Histogram::new(vec![1, 3, 5, 1], vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(h.median_bucket().ok(), Some(3.0));
    }

    #[test]
    fn threshold_truncates() {
        // total 3, threshold 1 -> first bucket already reaches it
        let h = Float64Histogram::new(vec![1, 1, 1], vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(h.median_bucket().ok(), Some(1.0));
    }

    #[test]
    fn all_zero_counts_pick_first_bucket() {
        let h = Float64Histogram::new(vec![0, 0], vec![f64::NEG_INFINITY, 0.5, f64::INFINITY]);
        assert_eq!(h.median_bucket().ok(), Some(0.5));
    }

    #[test]
    fn open_last_bucket_is_infinite() {
        let h = Float64Histogram::new(vec![0, 0, 7], vec![0.0, 1.0, 2.0]);
        assert_eq!(h.median_bucket().ok(), Some(f64::INFINITY));
    }

    #[test]
    fn empty_histogram_is_a_defect() {
        let h = Float64Histogram::new(vec![], vec![0.0]);
        assert!(matches!(h.median_bucket(), Err(ProbeError::Internal(_))));
    }

    #[test]
    fn mismatched_layout_is_a_defect() {
        let h = Float64Histogram::new(vec![1, 2], vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(h.median_bucket(), Err(ProbeError::Internal(_))));
    }

    #[test]
    fn saturating_total_still_converges() {
        let h = Float64Histogram::new(vec![u64::MAX, u64::MAX], vec![0.0, 1.0, 2.0]);
        assert_eq!(h.total(), u64::MAX);
        assert_eq!(h.median_bucket().ok(), Some(1.0));
    }
}
