//! tofrs - time-of-flight coincidence binding.
//!
//! This crate exposes a single native callable, `TOF`, to dynamically
//! typed callers:
//!
//! - A binding layer that declares `TOF(array_start, array_stop, window)`,
//!   binds positional and keyword arguments, and forwards them untouched
//!   to an injected native function
//! - A default native function matching start/stop timestamp channels
//!   within a coincidence window, in parallel using rayon
//! - ΔT histograms and energy-gated analysis on top of the matcher
//! - FFI layer for C callers and a Python module (feature `python`)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  Python `wrap.TOF`  │  C (tofrs.h)  │
//! └─────────────────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────┐
//! │  BindingModule  (signature, values) │
//! └─────────────────────────────────────┘
//!                   │ NativeFunction
//!                   ▼
//! ┌─────────────────────────────────────┐
//! │  ┌───────────┐  ┌───────────────┐  │
//! │  │  Matcher  │  │   Histogram   │  │
//! │  └───────────┘  └───────────────┘  │
//! │  ┌───────────────────────────────┐  │
//! │  │  Runtime (rayon worker pool)  │  │
//! │  └───────────────────────────────┘  │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Python Usage
//!
//! ```python
//! import wrap
//! start, stop = wrap.TOF(ch0_stamps, ch1_stamps, 100_000)
//! ```
//!
//! # FFI Usage
//!
//! ```c
//! TofRuntime *runtime;
//! tof_runtime_create(NULL, &runtime);
//!
//! CCoincidencePairs pairs;
//! tof_coincidence(runtime, start, start_len, stop, stop_len, window, &pairs);
//! tof_pairs_free(&pairs);
//!
//! tof_runtime_free(runtime);
//! ```

pub mod binding;
pub mod coincidence;
pub mod data;
pub mod ffi;
pub mod logging;
pub mod runtime;

// Re-export commonly used items
pub use binding::{BindingModule, CallError, NativeFunction, SignatureStyle, TofModule, Value};
pub use coincidence::{match_pairs, CoincidencePairs, DeltaHistogram, TofAnalysis, TofSpectrum};
pub use data::{Channel, EventList, InputError, Timestamps, Window};
pub use runtime::{Runtime, RuntimeConfig, TofJob};

// Re-export FFI types for cbindgen
pub use ffi::coincidence::*;
pub use ffi::runtime::*;
pub use ffi::types::*;
