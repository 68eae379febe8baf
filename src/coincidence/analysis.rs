//! End-to-end ΔT spectrum from two raw event lists.

use super::histogram::{delta_ns, DeltaHistogram, HistogramError, DEFAULT_BINS, MIN_BIN_WIDTH_NS};
use super::matcher::{tof, CoincidencePairs};
use crate::data::{Channel, EventList, InputError, Window};
use ndarray::Array1;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Histogram(#[from] HistogramError),
}

/// Inclusive energy gate in ADC channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyCut {
    pub low: u16,
    pub high: u16,
}

impl Default for EnergyCut {
    fn default() -> Self {
        Self {
            low: 0,
            high: u16::MAX,
        }
    }
}

/// Settings for a start/stop ΔT measurement.
#[derive(Debug, Clone)]
pub struct TofAnalysis {
    /// Gate on the start channel.
    pub start_cut: EnergyCut,
    /// Gate on the stop channel.
    pub stop_cut: EnergyCut,
    /// Coincidence window in timestamp units.
    pub window: i64,
    /// Lower histogram edge in ns.
    pub min_ns: f64,
    /// Upper histogram edge in ns.
    pub max_ns: f64,
    pub bins: usize,
    pub min_bin_width_ns: f64,
}

impl Default for TofAnalysis {
    fn default() -> Self {
        Self {
            start_cut: EnergyCut::default(),
            stop_cut: EnergyCut::default(),
            window: 100_000,
            min_ns: -100.0,
            max_ns: 100.0,
            bins: DEFAULT_BINS,
            min_bin_width_ns: MIN_BIN_WIDTH_NS,
        }
    }
}

/// Result of a ΔT measurement.
#[derive(Debug, Clone)]
pub struct TofSpectrum {
    pub pairs: CoincidencePairs,
    /// Stop minus start, in ns.
    pub delta_ns: Array1<f64>,
    pub histogram: DeltaHistogram,
}

impl TofAnalysis {
    /// Gate both channels, match coincidences and histogram the ΔT.
    pub fn run(&self, start: &EventList, stop: &EventList) -> Result<TofSpectrum, AnalysisError> {
        let window = Window::new(self.window)?;

        let start = start
            .unfiltered()
            .energy_cut(self.start_cut.low, self.start_cut.high)
            .timestamps(Channel::Start)?;
        let stop = stop
            .unfiltered()
            .energy_cut(self.stop_cut.low, self.stop_cut.high)
            .timestamps(Channel::Stop)?;

        let pairs = tof(&start, &stop, window);
        log::debug!(
            "{} start and {} stop events after gating, {} coincidences",
            start.len(),
            stop.len(),
            pairs.len()
        );

        let delta = delta_ns(&pairs);
        let histogram = DeltaHistogram::compute(
            delta.as_slice().unwrap_or_default(),
            self.min_ns,
            self.max_ns,
            self.bins,
            self.min_bin_width_ns,
        )?;

        Ok(TofSpectrum {
            pairs,
            delta_ns: delta,
            histogram,
        })
    }
}
