//! Environment handle: native session lifecycle and parameters.
//!
//! This module contains unsafe code for interacting with the C library.
#![allow(unsafe_code)]

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use tracing::{debug, warn};

use cpx_sys::{self as ffi, CpxEnvPtr, CpxInt};

use crate::error::{Error, Result};
use crate::problem::Problem;

/// Translates a non-zero native status into [`Error::Native`].
///
/// The description comes from `CPXgeterrorstring`; the library returns
/// NULL for codes it cannot describe, in which case a generic message is
/// substituted.
pub(crate) fn native_error(env: CpxEnvPtr, code: CpxInt) -> Error {
    let mut buffer = [0 as c_char; ffi::CPXMESSAGEBUFSIZE];
    let described = unsafe {
        let ptr = ffi::CPXgeterrorstring(env, code, buffer.as_mut_ptr());
        if ptr.is_null() {
            None
        } else {
            Some(CStr::from_ptr(ptr).to_string_lossy().trim().to_string())
        }
    };
    let message = match described {
        Some(text) if !text.is_empty() => text,
        _ => String::from("Generic CPLEX error."),
    };
    Error::Native { code, message }
}

/// Runs a native call and translates a non-zero status into an error
/// return from the enclosing function.
macro_rules! cpx_call {
    ($env:expr, $call:expr) => {{
        let status = unsafe { $call };
        if status != 0 {
            return Err($crate::env::native_error($env, status));
        }
    }};
}
pub(crate) use cpx_call;

/// A licensed native session.
///
/// Problems are created from an environment and borrow it, so every
/// problem is freed before the session closes. Dropping the environment
/// closes the session; use [`Environment::close`] when the release
/// status matters.
#[derive(Debug)]
pub struct Environment {
    raw: CpxEnvPtr,
}

// The native environment may be moved across threads as long as it is
// used from one thread at a time, which `&mut`/ownership already
// enforces host-side. No `Sync`: the raw pointer keeps that out.
unsafe impl Send for Environment {}

impl Environment {
    /// Opens a native session.
    pub fn open() -> Result<Self> {
        crate::init();
        let mut status: CpxInt = 0;
        let raw = unsafe { ffi::CPXopenCPLEX(&raw mut status) };
        if raw.is_null() {
            warn!(
                component = "cplex",
                operation = "open_env",
                status = "error",
                status_code = status,
                "CPXopenCPLEX returned no environment"
            );
            return Err(native_error(std::ptr::null_mut(), status));
        }
        debug!(
            component = "cplex",
            operation = "open_env",
            status = "success",
            "Opened CPLEX environment"
        );
        Ok(Environment { raw })
    }

    pub(crate) fn raw(&self) -> CpxEnvPtr {
        self.raw
    }

    /// Creates a problem object owned by this environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` contains an interior NUL or the native
    /// call fails.
    pub fn create_problem<'env>(&'env self, name: &str) -> Result<Problem<'env>> {
        let c_name = CString::new(name).map_err(|_| Error::InvalidName {
            field: "problem name",
        })?;
        let mut status: CpxInt = 0;
        let raw = unsafe { ffi::CPXcreateprob(self.raw, &raw mut status, c_name.as_ptr()) };
        if raw.is_null() {
            warn!(
                component = "cplex",
                operation = "create_problem",
                status = "error",
                status_code = status,
                name,
                "CPXcreateprob returned no problem"
            );
            return Err(native_error(self.raw, status));
        }
        debug!(
            component = "cplex",
            operation = "create_problem",
            status = "success",
            name,
            "Created problem"
        );
        Ok(Problem::from_raw(self, raw))
    }

    /// Sets an integer parameter.
    pub fn set_int_param(&self, param: CpxInt, value: CpxInt) -> Result<()> {
        cpx_call!(self.raw, ffi::CPXsetintparam(self.raw, param, value));
        debug!(
            component = "cplex",
            operation = "set_int_param",
            status = "success",
            param,
            value,
            "Set integer parameter"
        );
        Ok(())
    }

    /// Sets a floating-point parameter.
    pub fn set_dbl_param(&self, param: CpxInt, value: f64) -> Result<()> {
        cpx_call!(self.raw, ffi::CPXsetdblparam(self.raw, param, value));
        debug!(
            component = "cplex",
            operation = "set_dbl_param",
            status = "success",
            param,
            value,
            "Set floating-point parameter"
        );
        Ok(())
    }

    /// Reads back the current value of an integer parameter.
    pub fn int_param(&self, param: CpxInt) -> Result<CpxInt> {
        let mut value: CpxInt = 0;
        cpx_call!(
            self.raw,
            ffi::CPXgetintparam(self.raw, param, &raw mut value)
        );
        Ok(value)
    }

    /// Closes the session, reporting the native release status.
    ///
    /// Dropping the environment also closes it; this consuming form is
    /// for callers that need to observe a close failure.
    pub fn close(self) -> Result<()> {
        let mut raw = self.raw;
        std::mem::forget(self);
        let status = unsafe { ffi::CPXcloseCPLEX(&raw mut raw) };
        if status != 0 {
            return Err(native_error(std::ptr::null_mut(), status));
        }
        debug!(
            component = "cplex",
            operation = "close_env",
            status = "success",
            "Closed CPLEX environment"
        );
        Ok(())
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        let status = unsafe { ffi::CPXcloseCPLEX(&raw mut self.raw) };
        if status != 0 {
            warn!(
                component = "cplex",
                operation = "close_env",
                status = "error",
                status_code = status,
                "CPXcloseCPLEX failed during drop"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_close() {
        let env = Environment::open().expect("failed to open environment");
        env.close().expect("failed to close environment");
    }

    #[test]
    fn test_unknown_param_is_native_error() {
        let env = Environment::open().expect("failed to open environment");
        let err = env.set_int_param(-1, 0).unwrap_err();
        assert_eq!(err.code(), "CPLEX_NATIVE");
    }

    #[test]
    fn test_problem_name_with_nul_rejected() {
        let env = Environment::open().expect("failed to open environment");
        let err = env.create_problem("bad\0name").unwrap_err();
        assert_eq!(err.code(), "NAME_INTERIOR_NUL");
    }
}
