//! Time-difference histograms of coincidence pairs.

use super::matcher::CoincidencePairs;
use ndarray::Array1;
use thiserror::Error;

/// Default number of ΔT bins, matching the digitizer's start/stop histogram.
pub const DEFAULT_BINS: usize = 8192;

/// Smallest ΔT bin width the digitizer software produces, in nanoseconds.
pub const MIN_BIN_WIDTH_NS: f64 = 0.045;

/// Errors raised for unusable histogram settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HistogramError {
    #[error("histogram needs at least one bin")]
    NoBins,
    #[error("invalid histogram range: min={min}, max={max}")]
    InvalidRange { min: f64, max: f64 },
}

/// Convert picosecond pairs to stop-minus-start differences in nanoseconds.
pub fn delta_ns(pairs: &CoincidencePairs) -> Array1<f64> {
    pairs
        .iter()
        .map(|(start, stop)| (stop - start) as f64 * 1e-3)
        .collect()
}

/// Equal-width histogram over `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaHistogram {
    /// Bin edges, `bins + 1` values.
    pub edges: Array1<f64>,
    /// Counts per bin.
    pub counts: Array1<u64>,
}

impl DeltaHistogram {
    /// Bin `values` into `bins` equal bins over `[min, max]`.
    ///
    /// When the requested width, rounded to 1 ps with ties to even, is
    /// finer than `min_bin_width`, the upper edge is moved to
    /// `min + bins * min_bin_width`. A range that is still empty after
    /// that is widened to `[min - 0.5, max + 0.5]`. The last bin includes
    /// its right edge; out-of-range and NaN values are ignored. A value
    /// equal to an inner edge goes to the bin starting at that edge.
    pub fn compute(
        values: &[f64],
        mut min: f64,
        mut max: f64,
        bins: usize,
        min_bin_width: f64,
    ) -> Result<Self, HistogramError> {
        if bins == 0 {
            return Err(HistogramError::NoBins);
        }
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(HistogramError::InvalidRange { min, max });
        }

        let width = round_decimals((max - min) / bins as f64, 3);
        if width < min_bin_width {
            let widened = min + bins as f64 * min_bin_width;
            log::warn!(
                "ΔT bin width {:.3} ns below {:.3} ns; raising upper edge from {} to {}",
                width,
                min_bin_width,
                max,
                widened
            );
            max = widened;
        }
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let mut edges = Array1::linspace(min, max, bins + 1);
        edges[bins] = max;
        let mut counts = Array1::<u64>::zeros(bins);
        let scale = bins as f64 / (max - min);

        for &v in values {
            if !(v >= min && v <= max) {
                continue;
            }
            // The scaled index can be off by one next to an edge.
            let mut idx = (((v - min) * scale) as usize).min(bins - 1);
            if v < edges[idx] {
                idx -= 1;
            } else if idx + 1 < bins && v >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        Ok(Self { edges, counts })
    }

    /// Bin with the default bin count and minimum width.
    pub fn with_defaults(values: &[f64], min: f64, max: f64) -> Result<Self, HistogramError> {
        Self::compute(values, min, max, DEFAULT_BINS, MIN_BIN_WIDTH_NS)
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Total number of binned values.
    pub fn total(&self) -> u64 {
        self.counts.sum()
    }

    /// Centre of each bin.
    pub fn centers(&self) -> Array1<f64> {
        let n = self.bins();
        (0..n)
            .map(|i| 0.5 * (self.edges[i] + self.edges[i + 1]))
            .collect()
    }
}

/// Round to `decimals` places the way the decimal value of `x` rounds,
/// with exact ties going to the even digit.
fn round_decimals(x: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, x).parse().unwrap_or(x)
}
