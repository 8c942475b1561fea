//! Error types for the shim.

use cpx_sys::CpxInt;

/// Result alias used by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for binding operations.
#[derive(Debug, Clone)]
pub enum Error {
    /// A native call returned a non-zero status.
    Native {
        /// The raw status code the call returned.
        code: CpxInt,
        /// Description obtained from the native library, or a generic
        /// fallback when the library cannot describe the code.
        message: String,
    },
    /// An index array's element width differs from the native integer
    /// width. Raised before the native call; native state is untouched.
    IndexWidth {
        /// Which argument carried the mismatched array.
        array: &'static str,
        /// Element width of the supplied array, in bytes.
        got: usize,
        /// Native integer width, in bytes.
        expected: usize,
    },
    /// A name or filename contains an interior NUL and cannot cross the
    /// C boundary.
    InvalidName {
        /// Which argument carried the name.
        field: &'static str,
    },
    /// The native library reported a problem type this shim does not
    /// dispatch on.
    UnsupportedProblemType(CpxInt),
}

impl Error {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Native { .. } => "CPLEX_NATIVE",
            Error::IndexWidth { .. } => "INDEX_WIDTH_MISMATCH",
            Error::InvalidName { .. } => "NAME_INTERIOR_NUL",
            Error::UnsupportedProblemType(_) => "PROBTYPE_UNSUPPORTED",
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Native { code, message } => {
                write!(f, "[{}] CPLEX error ({}): {}", self.code(), code, message)
            }
            Error::IndexWidth {
                array,
                got,
                expected,
            } => write!(
                f,
                "[{}] index array '{}' has {}-byte elements, native integers are {} bytes",
                self.code(),
                array,
                got,
                expected
            ),
            Error::InvalidName { field } => {
                write!(f, "[{}] {} contains an interior NUL byte", self.code(), field)
            }
            Error::UnsupportedProblemType(raw) => {
                write!(f, "[{}] unsupported problem type code {}", self.code(), raw)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_display_carries_code_and_message() {
        let err = Error::Native {
            code: 1217,
            message: "No solution exists.".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("CPLEX_NATIVE"));
        assert!(msg.contains("(1217)"));
        assert!(msg.contains("No solution exists."));
    }

    #[test]
    fn test_index_width_display() {
        let err = Error::IndexWidth {
            array: "matind",
            got: 8,
            expected: 4,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("INDEX_WIDTH_MISMATCH"));
        assert!(msg.contains("matind"));
        assert!(msg.contains('8'));
        assert!(msg.contains('4'));
    }

    #[test]
    fn test_invalid_name_display() {
        let err = Error::InvalidName { field: "filename" };
        let msg = format!("{}", err);
        assert!(msg.contains("NAME_INTERIOR_NUL"));
        assert!(msg.contains("filename"));
    }

    #[test]
    fn test_error_code() {
        assert_eq!(
            Error::Native {
                code: 0,
                message: String::new()
            }
            .code(),
            "CPLEX_NATIVE"
        );
        assert_eq!(Error::UnsupportedProblemType(42).code(), "PROBTYPE_UNSUPPORTED");
    }
}
