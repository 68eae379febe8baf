//! C-compatible type definitions for FFI.

use crate::coincidence::CoincidencePairs;
use crate::data::InputError;

/// Result status codes for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TofStatus {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer was passed.
    NullPointer = 1,
    /// Invalid argument.
    InvalidArgument = 2,
    /// A timestamp array is not sorted.
    Unsorted = 3,
    /// Runtime error.
    RuntimeError = 4,
}

impl From<&InputError> for TofStatus {
    fn from(e: &InputError) -> Self {
        match e {
            InputError::Unsorted { .. } => TofStatus::Unsorted,
            InputError::NegativeWindow(_) => TofStatus::InvalidArgument,
        }
    }
}

/// C-compatible matched pairs, two arrays of `len` stamps.
///
/// Must be released with `tof_pairs_free`.
#[repr(C)]
#[derive(Debug)]
pub struct CCoincidencePairs {
    pub start: *mut i64,
    pub stop: *mut i64,
    pub len: usize,
    pub capacity: usize,
}

impl CCoincidencePairs {
    /// An empty value safe to pass to `tof_pairs_free`.
    pub fn empty() -> Self {
        Self {
            start: std::ptr::null_mut(),
            stop: std::ptr::null_mut(),
            len: 0,
            capacity: 0,
        }
    }

    /// Hand ownership of the pair buffers to C.
    pub fn from_pairs(pairs: CoincidencePairs) -> Self {
        let CoincidencePairs { start, stop } = pairs;
        // Equal capacities let one field describe both buffers on free.
        let mut start = start.into_boxed_slice().into_vec();
        let mut stop = stop.into_boxed_slice().into_vec();

        let len = start.len();
        let capacity = start.capacity();
        debug_assert_eq!(capacity, stop.capacity());

        let out = Self {
            start: start.as_mut_ptr(),
            stop: stop.as_mut_ptr(),
            len,
            capacity,
        };
        std::mem::forget(start);
        std::mem::forget(stop);
        out
    }
}
