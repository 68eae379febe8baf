//! Binding layer exposing `TOF` to dynamically typed callers.
//!
//! [`BindingModule`] owns the export declaration and argument binding;
//! the work itself is delegated to a [`NativeFunction`]. [`TofModule`]
//! wires it to the coincidence matcher.

pub mod module;
pub mod native;
pub mod signature;
pub mod value;

pub use module::{BindingModule, CallError, NativeFunction};
pub use native::{NativeError, TofModule, TofNative};
pub use signature::{BoundArgs, ExportSpec, SignatureError, SignatureStyle, TOF_NAME, TOF_PARAMS};
pub use value::{FromValue, IntoValue, Value, ValueError};
