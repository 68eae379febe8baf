//! Python extension module `wrap`, exposing `TOF`.
//!
//! ```python
//! import wrap
//! start, stop = wrap.TOF(array_start=ch0, array_stop=ch1, window=100_000)
//! ```

use crate::binding::{CallError, SignatureStyle, TofModule, Value};
use crate::logging::init_logging;
use crate::runtime::RuntimeConfig;
use numpy::{IntoPyArray, PyReadonlyArray1};
use pyo3::exceptions::{PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyLong, PyTuple};
use std::sync::OnceLock;

static MODULE: OnceLock<TofModule> = OnceLock::new();

/// Convert a Python argument into a binding value.
fn to_value(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_none() {
        return Ok(Value::None);
    }
    if let Ok(arr) = obj.extract::<PyReadonlyArray1<'_, i64>>() {
        return Ok(Value::IntArray(arr.as_array().to_vec()));
    }
    if let Ok(arr) = obj.extract::<PyReadonlyArray1<'_, f64>>() {
        return Ok(Value::FloatArray(arr.as_array().to_vec()));
    }
    if obj.is_instance_of::<PyBool>() {
        return Err(PyTypeError::new_err("bool is not a valid TOF argument"));
    }
    if obj.is_instance_of::<PyLong>() {
        return Ok(Value::Int(obj.extract()?));
    }
    if obj.is_instance_of::<PyFloat>() {
        return Ok(Value::Float(obj.extract()?));
    }
    // Lists and arrays of other dtypes.
    if let Ok(v) = obj.extract::<Vec<i64>>() {
        return Ok(Value::IntArray(v));
    }
    if let Ok(v) = obj.extract::<Vec<f64>>() {
        return Ok(Value::FloatArray(v));
    }
    if let Ok(t) = obj.downcast::<PyTuple>() {
        return t.iter().map(|item| to_value(&item)).collect::<PyResult<Vec<_>>>().map(Value::Tuple);
    }

    Err(PyTypeError::new_err(format!(
        "unsupported argument type: {}",
        obj.get_type()
    )))
}

/// Convert a binding value back into a Python object.
fn to_py(py: Python<'_>, value: Value) -> PyObject {
    match value {
        Value::None => py.None(),
        Value::Int(i) => i.into_py(py),
        Value::Float(f) => f.into_py(py),
        Value::IntArray(v) => v.into_pyarray_bound(py).into_py(py),
        Value::FloatArray(v) => v.into_pyarray_bound(py).into_py(py),
        Value::Tuple(items) => {
            let items: Vec<PyObject> = items.into_iter().map(|v| to_py(py, v)).collect();
            PyTuple::new_bound(py, items).into_py(py)
        }
    }
}

/// Map a failed call onto the Python exception a caller expects.
fn call_error_to_py<E: std::fmt::Display>(err: CallError<E>) -> PyErr {
    match err {
        CallError::Signature(e) => PyTypeError::new_err(e.to_string()),
        CallError::Native(e) => PyValueError::new_err(e.to_string()),
    }
}

fn call_tof(py: Python<'_>, args: &Bound<'_, PyTuple>, kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<PyObject> {
    let module = MODULE
        .get()
        .ok_or_else(|| PyRuntimeError::new_err("wrap module is not initialised"))?;

    let positional = args
        .iter()
        .map(|arg| to_value(&arg))
        .collect::<PyResult<Vec<_>>>()?;

    let keywords = match kwargs {
        Some(kwargs) => kwargs
            .iter()
            .map(|(k, v)| Ok((k.extract::<String>()?, to_value(&v)?)))
            .collect::<PyResult<Vec<_>>>()?,
        None => Vec::new(),
    };

    py.allow_threads(|| module.call(positional, keywords))
        .map(|value| to_py(py, value))
        .map_err(call_error_to_py)
}

/// Match coincident start/stop timestamps.
///
/// `array_start` and `array_stop` are sorted int64 timestamp arrays,
/// `window` the largest accepted separation. Returns the matched
/// `(start, stop)` arrays.
#[pyfunction]
#[pyo3(
    name = "TOF",
    signature = (*args, **kwargs),
    text_signature = "(array_start, array_stop, window)"
)]
fn tof_named(py: Python<'_>, args: &Bound<'_, PyTuple>, kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<PyObject> {
    call_tof(py, args, kwargs)
}

/// Match coincident start/stop timestamps.
///
/// Arguments are positional only. Returns the matched `(start, stop)`
/// arrays.
#[pyfunction]
#[pyo3(
    name = "TOF",
    signature = (*args, **kwargs),
    text_signature = "(array_start, array_stop, window, /)"
)]
fn tof_positional(py: Python<'_>, args: &Bound<'_, PyTuple>, kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<PyObject> {
    call_tof(py, args, kwargs)
}

/// Register the `TOF` variant advertising `style`.
fn add_tof(m: &Bound<'_, PyModule>, style: SignatureStyle) -> PyResult<()> {
    match style {
        SignatureStyle::Named => m.add_function(wrap_pyfunction!(tof_named, m)?),
        SignatureStyle::Positional => m.add_function(wrap_pyfunction!(tof_positional, m)?),
    }
}

#[pymodule]
fn wrap(m: &Bound<'_, PyModule>) -> PyResult<()> {
    init_logging();

    if MODULE.get().is_none() {
        let config = RuntimeConfig::from_env().map_err(|e| PyValueError::new_err(e.to_string()))?;
        let module = TofModule::from_config(config).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        let _ = MODULE.set(module);
    }

    let style = MODULE.get().map(|module| module.spec().style).unwrap_or_default();
    add_tof(m, style)
}
