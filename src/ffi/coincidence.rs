//! FFI functions for coincidence matching.

use super::runtime::RuntimeHandle;
use super::types::{CCoincidencePairs, TofStatus};

/// Borrow a C array, allowing null for empty input.
unsafe fn slice_or_empty<'a>(data: *const i64, len: usize) -> Option<&'a [i64]> {
    if len == 0 {
        Some(&[])
    } else if data.is_null() {
        None
    } else {
        Some(std::slice::from_raw_parts(data, len))
    }
}

/// Match start and stop timestamps within `window`.
///
/// # Safety
/// Runtime handle must be valid. Arrays must hold `*_len` elements (they
/// may be null when the length is 0). Caller must free the result with
/// `tof_pairs_free`.
#[no_mangle]
pub unsafe extern "C" fn tof_coincidence(
    runtime: RuntimeHandle,
    array_start: *const i64,
    start_len: usize,
    array_stop: *const i64,
    stop_len: usize,
    window: i64,
    out_pairs: *mut CCoincidencePairs,
) -> TofStatus {
    if runtime.is_null() || out_pairs.is_null() {
        return TofStatus::NullPointer;
    }

    let (start, stop) = match (
        slice_or_empty(array_start, start_len),
        slice_or_empty(array_stop, stop_len),
    ) {
        (Some(a), Some(b)) => (a, b),
        _ => return TofStatus::NullPointer,
    };

    let rt = &*runtime;
    match rt.tof(start.to_vec(), stop.to_vec(), window) {
        Ok(pairs) => {
            *out_pairs = CCoincidencePairs::from_pairs(pairs);
            TofStatus::Ok
        }
        Err(e) => {
            log::debug!("tof_coincidence rejected input: {}", e);
            *out_pairs = CCoincidencePairs::empty();
            TofStatus::from(&e)
        }
    }
}

/// Free matched pairs.
///
/// # Safety
/// Pairs must have been filled by tof_coincidence or be zeroed.
#[no_mangle]
pub unsafe extern "C" fn tof_pairs_free(pairs: *mut CCoincidencePairs) {
    if pairs.is_null() {
        return;
    }

    let p = &*pairs;
    if p.capacity > 0 {
        if !p.start.is_null() {
            let _ = Vec::from_raw_parts(p.start, p.len, p.capacity);
        }
        if !p.stop.is_null() {
            let _ = Vec::from_raw_parts(p.stop, p.len, p.capacity);
        }
    }

    *pairs = CCoincidencePairs::empty();
}
