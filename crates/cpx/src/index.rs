//! Index-width checking for arrays that cross the C boundary.
//!
//! Callers tend to hold indices in whatever integer type their own data
//! pipeline produced. The native library only understands `c_int`, so
//! every index array is width-checked before any native call; a mismatch
//! aborts the operation without touching native state.

use std::mem;

use tracing::warn;

use cpx_sys::CpxInt;

use crate::error::{Error, Result};

mod sealed {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// Integer types accepted for index arrays.
///
/// Sealed: only `i32` and `i64` make sense as index carriers, and only
/// the type whose width matches the native integer passes the check.
pub trait IndexValue: sealed::Sealed + Copy {
    fn as_native(self) -> CpxInt;
}

impl IndexValue for i32 {
    fn as_native(self) -> CpxInt {
        self
    }
}

impl IndexValue for i64 {
    fn as_native(self) -> CpxInt {
        self as CpxInt
    }
}

/// Verifies that `I` has the native integer width.
pub(crate) fn check_index_width<I: IndexValue>(array: &'static str) -> Result<()> {
    let got = mem::size_of::<I>();
    let expected = mem::size_of::<CpxInt>();
    if got != expected {
        warn!(
            component = "cplex",
            operation = "check_index_width",
            status = "error",
            array,
            got,
            expected,
            "Index array width does not match native integer width"
        );
        return Err(Error::IndexWidth {
            array,
            got,
            expected,
        });
    }
    Ok(())
}

/// Copies an already width-checked index array into native form.
pub(crate) fn to_native<I: IndexValue>(values: &[I]) -> Vec<CpxInt> {
    values.iter().map(|v| v.as_native()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i32_passes_width_check() {
        assert!(check_index_width::<i32>("indices").is_ok());
    }

    #[test]
    fn test_i64_fails_width_check() {
        let err = check_index_width::<i64>("indices").unwrap_err();
        match err {
            Error::IndexWidth {
                array,
                got,
                expected,
            } => {
                assert_eq!(array, "indices");
                assert_eq!(got, 8);
                assert_eq!(expected, mem::size_of::<CpxInt>());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_to_native_copies_values() {
        assert_eq!(to_native(&[3i32, 1, 2]), vec![3, 1, 2]);
    }
}
