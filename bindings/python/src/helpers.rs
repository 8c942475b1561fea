//! Buffer extraction helpers.
//!
//! Index arrays must arrive as int32 and value arrays as float64; any
//! other dtype (notably int64 indices from default numpy integers) is
//! rejected here, before a native call can misread the memory.

use pyo3::buffer::PyBuffer;
use pyo3::prelude::*;

use crate::errors::CpxDtypeError;

/// Extract a 1D buffer from a Python object.
pub fn extract_buffer_1d<T>(obj: &Bound<'_, PyAny>, name: &str, dtype: &str) -> PyResult<Vec<T>>
where
    T: pyo3::buffer::Element + Copy,
{
    let buffer = PyBuffer::<T>::get(obj).map_err(|_| {
        CpxDtypeError::new_err(format!("{name} must be a numpy array with dtype {dtype}"))
    })?;
    if buffer.dimensions() != 1 {
        return Err(CpxDtypeError::new_err(format!("{name} must be a 1D array")));
    }
    let slice = buffer
        .as_slice(obj.py())
        .ok_or_else(|| CpxDtypeError::new_err(format!("{name} must be a contiguous array")))?;
    Ok(slice.iter().map(|cell| cell.get()).collect())
}

/// Extract a native-width index array (int32).
pub fn extract_indices(obj: &Bound<'_, PyAny>, name: &str) -> PyResult<Vec<i32>> {
    extract_buffer_1d::<i32>(obj, name, "int32")
}

/// Extract a float64 value array.
pub fn extract_f64(obj: &Bound<'_, PyAny>, name: &str) -> PyResult<Vec<f64>> {
    extract_buffer_1d::<f64>(obj, name, "float64")
}

/// Validate a constraint-sense / type string and return its bytes.
pub fn extract_bytes(value: &str, name: &str, allowed: &[u8]) -> PyResult<Vec<u8>> {
    let bytes = value.as_bytes().to_vec();
    if let Some(&bad) = bytes.iter().find(|b| !allowed.contains(b)) {
        return Err(CpxDtypeError::new_err(format!(
            "{name} contains invalid character '{}'",
            bad as char
        )));
    }
    Ok(bytes)
}
