//! Coincidence matching and ΔT spectra.

pub mod analysis;
pub mod histogram;
pub mod matcher;
pub mod segment;

pub use analysis::{AnalysisError, EnergyCut, TofAnalysis, TofSpectrum};
pub use histogram::{delta_ns, DeltaHistogram, HistogramError, DEFAULT_BINS, MIN_BIN_WIDTH_NS};
pub use matcher::{match_pairs, tof, CoincidencePairs};
pub use segment::{match_pairs_segmented, plan_segments, Segment};
