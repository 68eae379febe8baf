//! FFI functions for Runtime management.

use super::types::TofStatus;
use crate::binding::SignatureStyle;
use crate::runtime::{Runtime, RuntimeConfig};

/// Opaque handle to a Runtime.
pub type RuntimeHandle = *mut Runtime;

/// Configuration for creating a runtime.
#[repr(C)]
#[derive(Debug, Clone, Default)]
pub struct CRuntimeConfig {
    /// Number of worker threads (0 = auto-detect).
    pub worker_count: usize,
    /// Sequential cutoff in events (0 = default).
    pub min_chunk_len: usize,
}

impl From<CRuntimeConfig> for RuntimeConfig {
    fn from(c: CRuntimeConfig) -> Self {
        let defaults = RuntimeConfig::default();
        RuntimeConfig {
            worker_count: if c.worker_count == 0 {
                num_cpus::get()
            } else {
                c.worker_count
            },
            min_chunk_len: if c.min_chunk_len == 0 {
                defaults.min_chunk_len
            } else {
                c.min_chunk_len
            },
            // C callers always pass arguments positionally.
            signature: SignatureStyle::Positional,
        }
    }
}

/// Create a new runtime.
///
/// # Safety
/// out_handle must be a valid pointer. config may be null for defaults.
#[no_mangle]
pub unsafe extern "C" fn tof_runtime_create(
    config: *const CRuntimeConfig,
    out_handle: *mut RuntimeHandle,
) -> TofStatus {
    if out_handle.is_null() {
        return TofStatus::NullPointer;
    }

    let cfg = if config.is_null() {
        CRuntimeConfig::default().into()
    } else {
        (*config).clone().into()
    };

    match Runtime::new(cfg) {
        Ok(runtime) => {
            *out_handle = Box::into_raw(Box::new(runtime));
            TofStatus::Ok
        }
        Err(e) => {
            log::error!("{}", e);
            TofStatus::RuntimeError
        }
    }
}

/// Free a runtime handle.
///
/// # Safety
/// Handle must be valid or null.
#[no_mangle]
pub unsafe extern "C" fn tof_runtime_free(handle: RuntimeHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Get the number of worker threads, or 0 for a null handle.
///
/// # Safety
/// Handle must be valid or null.
#[no_mangle]
pub unsafe extern "C" fn tof_runtime_worker_count(handle: RuntimeHandle) -> usize {
    if handle.is_null() {
        return 0;
    }
    (*handle).config().worker_count
}
