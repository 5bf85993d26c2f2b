//! Summary statistics over per-line character counts.

extern crate alloc;

use alloc::vec::Vec;

/// Summary of one measured line-length sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStats {
    /// Greatest line length.
    pub max: usize,
    /// Median line length; half-integral when the sequence has an even
    /// number of lines.
    pub median: f64,
}

/// Computes max and median over `lengths`.
///
/// Returns `None` iff `lengths` is empty: a container with no measurable
/// text has no stats rather than zero-valued ones. Pure and insensitive to
/// input order: the lengths are treated as a multiset.
///
/// ```rust
/// use line_gauge::compute_stats;
///
/// let stats = compute_stats(&[5, 1, 9]).expect("non-empty input");
/// assert_eq!(stats.max, 9);
/// assert_eq!(stats.median, 5.0);
/// assert!(compute_stats(&[]).is_none());
/// ```
pub fn compute_stats(lengths: &[usize]) -> Option<LineStats> {
    if lengths.is_empty() {
        return None;
    }
    let mut sorted: Vec<usize> = lengths.to_vec();
    sorted.sort_unstable();
    let max = *sorted.last()?;
    let median = median_of_sorted(&sorted)?;
    Some(LineStats { max, median })
}

fn median_of_sorted(sorted: &[usize]) -> Option<f64> {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted.get(mid).map(|&v| v as f64)
    } else {
        let lo = *sorted.get(mid.checked_sub(1)?)?;
        let hi = *sorted.get(mid)?;
        Some((lo as f64 + hi as f64) / 2.0)
    }
}
