//! CpxError exception hierarchy.
//!
//! `CpxError` is the base exception; `CpxDtypeError` covers array dtype
//! and width problems caught before any native call. Native failures are
//! raised as `CpxError` carrying the historical "CPLEX error (code):
//! description" message.

use std::ffi::CStr;
use std::os::raw::c_char;

use pyo3::exceptions::PyException;
use pyo3::prelude::*;

use cpx_sys as ffi;

pyo3::create_exception!(
    cpx,
    CpxError,
    PyException,
    "Base exception for all CPLEX binding errors."
);

pyo3::create_exception!(
    cpx,
    CpxDtypeError,
    CpxError,
    "Array has the wrong dtype or element width."
);

/// Raises `CpxError` for a non-zero native status, with the description
/// fetched from the native library when it has one.
pub fn native_err(env: ffi::CpxEnvPtr, code: ffi::CpxInt) -> PyErr {
    let mut buffer = [0 as c_char; ffi::CPXMESSAGEBUFSIZE];
    // SAFETY: buffer meets the documented minimum size; the returned
    // pointer, when non-null, aliases the NUL-terminated buffer.
    let described = unsafe {
        let ptr = ffi::CPXgeterrorstring(env, code, buffer.as_mut_ptr());
        if ptr.is_null() {
            None
        } else {
            Some(CStr::from_ptr(ptr).to_string_lossy().trim().to_string())
        }
    };
    match described {
        Some(text) if !text.is_empty() => {
            CpxError::new_err(format!("CPLEX error ({}): {}", code, text))
        }
        _ => CpxError::new_err("Generic CPLEX error."),
    }
}

/// Register the exception types on the module.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add("CpxError", py.get_type::<CpxError>())?;
    m.add("CpxDtypeError", py.get_type::<CpxDtypeError>())?;
    Ok(())
}
