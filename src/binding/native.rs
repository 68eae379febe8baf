//! Default native `TOF`: coincidence matching on the runtime's pool.

use super::module::{BindingModule, NativeFunction};
use super::value::{FromValue, IntoValue, Value, ValueError};
use crate::data::InputError;
use crate::runtime::{Runtime, RuntimeConfig, RuntimeError};
use std::sync::Arc;
use thiserror::Error;

/// Errors signalled by the default native `TOF`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NativeError {
    #[error("argument '{parameter}': {source}")]
    Argument {
        parameter: &'static str,
        #[source]
        source: ValueError,
    },
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Binding module wired to the coincidence matcher.
pub type TofModule = BindingModule<TofNative>;

/// Coincidence matcher exposed as the native `TOF`.
///
/// Takes two int64 timestamp arrays and an integer window; returns the
/// matched `(start, stop)` arrays.
#[derive(Clone)]
pub struct TofNative {
    runtime: Arc<Runtime>,
}

impl TofNative {
    pub fn new(runtime: Arc<Runtime>) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }
}

fn arg<T: FromValue>(parameter: &'static str, value: Value) -> Result<T, NativeError> {
    T::from_value(value).map_err(|source| NativeError::Argument { parameter, source })
}

impl NativeFunction for TofNative {
    type Error = NativeError;

    fn invoke(&self, array_start: Value, array_stop: Value, window: Value) -> Result<Value, NativeError> {
        let start: Vec<i64> = arg("array_start", array_start)?;
        let stop: Vec<i64> = arg("array_stop", array_stop)?;
        let window: i64 = arg("window", window)?;

        log::debug!(
            "TOF called with {} start, {} stop events, window {}",
            start.len(),
            stop.len(),
            window
        );

        let pairs = self.runtime.tof(start, stop, window)?;
        log::debug!("TOF matched {} pairs", pairs.len());

        Ok(pairs.into_value())
    }
}

impl TofModule {
    /// Build the default module from a runtime configuration.
    pub fn from_config(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let style = config.signature;
        let runtime = Arc::new(Runtime::new(config)?);
        Ok(BindingModule::with_style(TofNative::new(runtime), style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{CallError, SignatureStyle};

    fn module(style: SignatureStyle) -> TofModule {
        TofModule::from_config(RuntimeConfig {
            worker_count: 2,
            min_chunk_len: 64,
            signature: style,
        })
        .unwrap()
    }

    #[test]
    fn test_tof_by_keyword() {
        let m = module(SignatureStyle::Named);
        let result = m
            .call(
                Vec::new(),
                vec![
                    ("array_start".into(), Value::IntArray(vec![0, 100, 200])),
                    ("array_stop".into(), Value::IntArray(vec![4, 250])),
                    ("window".into(), Value::Int(5)),
                ],
            )
            .unwrap();

        assert_eq!(
            result,
            Value::Tuple(vec![Value::IntArray(vec![0]), Value::IntArray(vec![4])])
        );
    }

    #[test]
    fn test_tof_accepts_integral_floats() {
        let m = module(SignatureStyle::Positional);
        let result = m
            .call(
                vec![
                    Value::FloatArray(vec![10.0]),
                    Value::IntArray(vec![12]),
                    Value::Float(2.0),
                ],
                Vec::new(),
            )
            .unwrap();

        assert_eq!(
            result,
            Value::Tuple(vec![Value::IntArray(vec![10]), Value::IntArray(vec![12])])
        );
    }

    #[test]
    fn test_argument_errors_name_the_parameter() {
        let m = module(SignatureStyle::Named);
        let err = m
            .call(
                vec![Value::IntArray(vec![]), Value::Int(3), Value::Int(1)],
                Vec::new(),
            )
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "argument 'array_stop': expected int array, found int"
        );
    }

    #[test]
    fn test_matcher_errors_pass_through() {
        let m = module(SignatureStyle::Named);
        let err = m
            .call(
                vec![Value::IntArray(vec![]), Value::IntArray(vec![]), Value::Int(-1)],
                Vec::new(),
            )
            .unwrap_err();

        assert_eq!(err, CallError::Native(NativeError::Input(InputError::NegativeWindow(-1))));
    }
}
