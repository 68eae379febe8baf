//! The binding module: one exported callable forwarding to a native function.

use super::signature::{ExportSpec, SignatureError, SignatureStyle};
use super::value::Value;
use thiserror::Error;

/// The native capability behind `TOF`.
///
/// Implementations receive the three arguments exactly as the caller
/// passed them and own all interpretation of their meaning.
pub trait NativeFunction: Send + Sync {
    type Error;

    fn invoke(&self, array_start: Value, array_stop: Value, window: Value) -> Result<Value, Self::Error>;
}

impl<F, E> NativeFunction for F
where
    F: Fn(Value, Value, Value) -> Result<Value, E> + Send + Sync,
{
    type Error = E;

    fn invoke(&self, array_start: Value, array_stop: Value, window: Value) -> Result<Value, E> {
        self(array_start, array_stop, window)
    }
}

/// Failure of a call through the binding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError<E> {
    /// The arguments did not fit the export's signature.
    #[error(transparent)]
    Signature(#[from] SignatureError),
    /// The native function failed; carries its error untouched.
    #[error("{0}")]
    Native(E),
}

/// A module exposing exactly one callable, `TOF`.
pub struct BindingModule<F> {
    spec: ExportSpec,
    native: F,
}

impl<F: NativeFunction> BindingModule<F> {
    /// Bind `native` under `TOF` with named parameters.
    pub fn new(native: F) -> Self {
        Self::with_style(native, SignatureStyle::Named)
    }

    pub fn with_style(native: F, style: SignatureStyle) -> Self {
        Self {
            spec: ExportSpec::tof(style),
            native,
        }
    }

    /// Names of all exported callables.
    pub fn names(&self) -> Vec<&'static str> {
        vec![self.spec.name]
    }

    /// Look up an export by name.
    pub fn get(&self, name: &str) -> Option<&ExportSpec> {
        (self.spec.name == name).then_some(&self.spec)
    }

    pub fn spec(&self) -> &ExportSpec {
        &self.spec
    }

    pub fn native(&self) -> &F {
        &self.native
    }

    /// Call `TOF` with host arguments.
    ///
    /// The native function runs once per successful binding and its
    /// result or error is returned as is.
    pub fn call(
        &self,
        positional: Vec<Value>,
        keywords: Vec<(String, Value)>,
    ) -> Result<Value, CallError<F::Error>> {
        let args = self.spec.bind(positional, keywords)?;
        self.native
            .invoke(args.array_start, args.array_stop, args.window)
            .map_err(CallError::Native)
    }
}
