//! Opaque handle wrappers for the native environment and problem.
//!
//! The scripting surface keeps the historical explicit lifecycle:
//! `closeCPLEX` and `freeprob` release the native objects, and every
//! other call checks for a released handle instead of dereferencing a
//! dangling pointer.

use pyo3::prelude::*;

use cpx_sys as ffi;

use crate::errors::CpxError;

/// A CPLEX environment handle.
#[pyclass(name = "Env", unsendable)]
pub struct PyEnv {
    pub(crate) raw: ffi::CpxEnvPtr,
}

impl PyEnv {
    /// The raw pointer, or an error if the environment was closed.
    pub(crate) fn ptr(&self) -> PyResult<ffi::CpxEnvPtr> {
        if self.raw.is_null() {
            return Err(CpxError::new_err("environment has been closed"));
        }
        Ok(self.raw)
    }
}

#[pymethods]
impl PyEnv {
    fn __repr__(&self) -> String {
        if self.raw.is_null() {
            "Env(closed)".to_string()
        } else {
            "Env(open)".to_string()
        }
    }
}

/// A CPLEX problem handle.
#[pyclass(name = "Prob", unsendable)]
pub struct PyProb {
    pub(crate) raw: ffi::CpxLpPtr,
}

impl PyProb {
    /// The raw pointer, or an error if the problem was freed.
    pub(crate) fn ptr(&self) -> PyResult<ffi::CpxLpPtr> {
        if self.raw.is_null() {
            return Err(CpxError::new_err("problem has been freed"));
        }
        Ok(self.raw)
    }
}

#[pymethods]
impl PyProb {
    fn __repr__(&self) -> String {
        if self.raw.is_null() {
            "Prob(freed)".to_string()
        } else {
            "Prob(active)".to_string()
        }
    }
}

/// Register the handle classes on the module.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEnv>()?;
    m.add_class::<PyProb>()?;
    Ok(())
}
