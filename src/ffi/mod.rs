//! FFI (Foreign Function Interface) layer.
//!
//! C-compatible functions callable from Python via cffi or from any
//! language with C FFI, plus the native Python module behind the
//! `python` feature.

pub mod coincidence;
#[cfg(feature = "python")]
pub mod python;
pub mod runtime;
pub mod types;

pub use coincidence::*;
pub use runtime::*;
pub use types::*;
