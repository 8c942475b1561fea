//! Python bindings for the CPLEX callable library using PyO3.
//!
//! The module mirrors the historical scripting surface: free functions
//! named after the native entry points, opaque `Env`/`Prob` handles, and
//! numpy arrays for bulk data. Index arrays must be int32 and value
//! arrays float64; dtype mismatches raise `CpxDtypeError` before any
//! native call.
#![allow(unsafe_code)]

mod errors;
mod handles;
mod helpers;

use pyo3::prelude::*;

use cpx_sys as ffi;

use errors::native_err;
use handles::{PyEnv, PyProb};
use helpers::{extract_bytes, extract_f64, extract_indices};

const SENSE_CHARS: &[u8] = b"LGER";
const BOUND_CHARS: &[u8] = b"LUB";
const CTYPE_CHARS: &[u8] = b"CBIS";
const SOS_CHARS: &[u8] = b"12";

fn check(env: ffi::CpxEnvPtr, status: ffi::CpxInt) -> PyResult<()> {
    if status != 0 {
        return Err(native_err(env, status));
    }
    Ok(())
}

fn optional_ptr(values: Option<&Vec<f64>>) -> *const f64 {
    values.map_or(std::ptr::null(), |v| v.as_ptr())
}

fn char_ptr(bytes: &[u8]) -> *const std::os::raw::c_char {
    bytes.as_ptr() as *const std::os::raw::c_char
}

#[pyfunction]
#[pyo3(name = "openCPLEX")]
fn open_cplex() -> PyResult<PyEnv> {
    let mut status: ffi::CpxInt = 0;
    let raw = unsafe { ffi::CPXopenCPLEX(&raw mut status) };
    if raw.is_null() {
        return Err(native_err(std::ptr::null_mut(), status));
    }
    Ok(PyEnv { raw })
}

#[pyfunction]
#[pyo3(name = "closeCPLEX")]
fn close_cplex(mut env: PyRefMut<'_, PyEnv>) -> PyResult<()> {
    let mut handle = env.ptr()?;
    let status = unsafe { ffi::CPXcloseCPLEX(&raw mut handle) };
    check(std::ptr::null_mut(), status)?;
    env.raw = std::ptr::null_mut();
    Ok(())
}

#[pyfunction]
fn createprob(env: PyRef<'_, PyEnv>, name: &str) -> PyResult<PyProb> {
    let env_ptr = env.ptr()?;
    let c_name = std::ffi::CString::new(name)
        .map_err(|_| errors::CpxError::new_err("problem name contains a NUL byte"))?;
    let mut status: ffi::CpxInt = 0;
    let raw = unsafe { ffi::CPXcreateprob(env_ptr, &raw mut status, c_name.as_ptr()) };
    if raw.is_null() {
        return Err(native_err(env_ptr, status));
    }
    Ok(PyProb { raw })
}

#[pyfunction]
fn freeprob(env: PyRef<'_, PyEnv>, mut prob: PyRefMut<'_, PyProb>) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let mut handle = prob.ptr()?;
    let status = unsafe { ffi::CPXfreeprob(env_ptr, &raw mut handle) };
    check(env_ptr, status)?;
    prob.raw = std::ptr::null_mut();
    Ok(())
}

#[pyfunction]
fn writeprob(env: PyRef<'_, PyEnv>, prob: PyRef<'_, PyProb>, filename: &str) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let c_name = std::ffi::CString::new(filename)
        .map_err(|_| errors::CpxError::new_err("filename contains a NUL byte"))?;
    let status =
        unsafe { ffi::CPXwriteprob(env_ptr, lp, c_name.as_ptr(), std::ptr::null()) };
    check(env_ptr, status)
}

#[pyfunction]
fn setintparam(env: PyRef<'_, PyEnv>, param: i32, value: i32) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let status = unsafe { ffi::CPXsetintparam(env_ptr, param, value) };
    check(env_ptr, status)
}

#[pyfunction]
fn setdblparam(env: PyRef<'_, PyEnv>, param: i32, value: f64) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let status = unsafe { ffi::CPXsetdblparam(env_ptr, param, value) };
    check(env_ptr, status)
}

#[pyfunction]
fn getintparam(env: PyRef<'_, PyEnv>, param: i32) -> PyResult<i32> {
    let env_ptr = env.ptr()?;
    let mut value: ffi::CpxInt = 0;
    let status = unsafe { ffi::CPXgetintparam(env_ptr, param, &raw mut value) };
    check(env_ptr, status)?;
    Ok(value)
}

#[pyfunction]
#[pyo3(signature = (env, prob, objsen, obj, rhs, sense, matbeg, matcnt, matind, matval, lb, ub, rngval=None))]
#[allow(clippy::too_many_arguments)]
fn copylp(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    objsen: i32,
    obj: &Bound<'_, PyAny>,
    rhs: &Bound<'_, PyAny>,
    sense: &str,
    matbeg: &Bound<'_, PyAny>,
    matcnt: &Bound<'_, PyAny>,
    matind: &Bound<'_, PyAny>,
    matval: &Bound<'_, PyAny>,
    lb: &Bound<'_, PyAny>,
    ub: &Bound<'_, PyAny>,
    rngval: Option<&Bound<'_, PyAny>>,
) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let obj = extract_f64(obj, "obj")?;
    let rhs = extract_f64(rhs, "rhs")?;
    let sense = extract_bytes(sense, "sense", SENSE_CHARS)?;
    let matbeg = extract_indices(matbeg, "matbeg")?;
    let matcnt = extract_indices(matcnt, "matcnt")?;
    let matind = extract_indices(matind, "matind")?;
    let matval = extract_f64(matval, "matval")?;
    let lb = extract_f64(lb, "lb")?;
    let ub = extract_f64(ub, "ub")?;
    let rngval = rngval.map(|v| extract_f64(v, "rngval")).transpose()?;
    let status = unsafe {
        ffi::CPXcopylp(
            env_ptr,
            lp,
            obj.len() as ffi::CpxInt,
            rhs.len() as ffi::CpxInt,
            objsen,
            obj.as_ptr(),
            rhs.as_ptr(),
            char_ptr(&sense),
            matbeg.as_ptr(),
            matcnt.as_ptr(),
            matind.as_ptr(),
            matval.as_ptr(),
            lb.as_ptr(),
            ub.as_ptr(),
            optional_ptr(rngval.as_ref()),
        )
    };
    check(env_ptr, status)
}

#[pyfunction]
#[pyo3(signature = (env, prob, obj, lb, ub, ctype=None))]
fn newcols(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    obj: &Bound<'_, PyAny>,
    lb: &Bound<'_, PyAny>,
    ub: &Bound<'_, PyAny>,
    ctype: Option<&str>,
) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let obj = extract_f64(obj, "obj")?;
    let lb = extract_f64(lb, "lb")?;
    let ub = extract_f64(ub, "ub")?;
    let ctype = ctype
        .map(|t| extract_bytes(t, "ctype", CTYPE_CHARS))
        .transpose()?;
    let status = unsafe {
        ffi::CPXnewcols(
            env_ptr,
            lp,
            obj.len() as ffi::CpxInt,
            obj.as_ptr(),
            lb.as_ptr(),
            ub.as_ptr(),
            ctype.as_ref().map_or(std::ptr::null(), |t| char_ptr(t)),
            std::ptr::null_mut(),
        )
    };
    check(env_ptr, status)
}

#[pyfunction]
#[pyo3(signature = (env, prob, rhs, sense, rngval=None))]
fn newrows(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    rhs: &Bound<'_, PyAny>,
    sense: &str,
    rngval: Option<&Bound<'_, PyAny>>,
) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let rhs = extract_f64(rhs, "rhs")?;
    let sense = extract_bytes(sense, "sense", SENSE_CHARS)?;
    let rngval = rngval.map(|v| extract_f64(v, "rngval")).transpose()?;
    let status = unsafe {
        ffi::CPXnewrows(
            env_ptr,
            lp,
            rhs.len() as ffi::CpxInt,
            rhs.as_ptr(),
            char_ptr(&sense),
            optional_ptr(rngval.as_ref()),
            std::ptr::null_mut(),
        )
    };
    check(env_ptr, status)
}

#[pyfunction]
#[allow(clippy::too_many_arguments)]
fn addrows(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    ccnt: i32,
    rhs: &Bound<'_, PyAny>,
    sense: &str,
    rmatbeg: &Bound<'_, PyAny>,
    rmatind: &Bound<'_, PyAny>,
    rmatval: &Bound<'_, PyAny>,
) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let rhs = extract_f64(rhs, "rhs")?;
    let sense = extract_bytes(sense, "sense", SENSE_CHARS)?;
    let rmatbeg = extract_indices(rmatbeg, "rmatbeg")?;
    let rmatind = extract_indices(rmatind, "rmatind")?;
    let rmatval = extract_f64(rmatval, "rmatval")?;
    let status = unsafe {
        ffi::CPXaddrows(
            env_ptr,
            lp,
            ccnt,
            rhs.len() as ffi::CpxInt,
            rmatval.len() as ffi::CpxInt,
            rhs.as_ptr(),
            char_ptr(&sense),
            rmatbeg.as_ptr(),
            rmatind.as_ptr(),
            rmatval.as_ptr(),
            std::ptr::null_mut(),
            std::ptr::null_mut(),
        )
    };
    check(env_ptr, status)
}

#[pyfunction]
fn delrows(env: PyRef<'_, PyEnv>, prob: PyRef<'_, PyProb>, begin: i32, end: i32) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let status = unsafe { ffi::CPXdelrows(env_ptr, lp, begin, end) };
    check(env_ptr, status)
}

#[pyfunction]
fn chgobj(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    indices: &Bound<'_, PyAny>,
    values: &Bound<'_, PyAny>,
) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let indices = extract_indices(indices, "indices")?;
    let values = extract_f64(values, "values")?;
    let status = unsafe {
        ffi::CPXchgobj(
            env_ptr,
            lp,
            indices.len() as ffi::CpxInt,
            indices.as_ptr(),
            values.as_ptr(),
        )
    };
    check(env_ptr, status)
}

#[pyfunction]
fn chgcoef(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    i: i32,
    j: i32,
    value: f64,
) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let status = unsafe { ffi::CPXchgcoef(env_ptr, lp, i, j, value) };
    check(env_ptr, status)
}

#[pyfunction]
fn chgcoeflist(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    rows: &Bound<'_, PyAny>,
    cols: &Bound<'_, PyAny>,
    values: &Bound<'_, PyAny>,
) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let rows = extract_indices(rows, "rows")?;
    let cols = extract_indices(cols, "cols")?;
    let values = extract_f64(values, "values")?;
    let status = unsafe {
        ffi::CPXchgcoeflist(
            env_ptr,
            lp,
            values.len() as ffi::CpxInt,
            rows.as_ptr(),
            cols.as_ptr(),
            values.as_ptr(),
        )
    };
    check(env_ptr, status)
}

#[pyfunction]
fn chgbds(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    indices: &Bound<'_, PyAny>,
    lu: &str,
    bd: &Bound<'_, PyAny>,
) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let indices = extract_indices(indices, "indices")?;
    let lu = extract_bytes(lu, "lu", BOUND_CHARS)?;
    let bd = extract_f64(bd, "bd")?;
    let status = unsafe {
        ffi::CPXchgbds(
            env_ptr,
            lp,
            indices.len() as ffi::CpxInt,
            indices.as_ptr(),
            char_ptr(&lu),
            bd.as_ptr(),
        )
    };
    check(env_ptr, status)
}

#[pyfunction]
fn copyctype(env: PyRef<'_, PyEnv>, prob: PyRef<'_, PyProb>, ctype: &str) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let ctype = extract_bytes(ctype, "ctype", CTYPE_CHARS)?;
    let status = unsafe { ffi::CPXcopyctype(env_ptr, lp, char_ptr(&ctype)) };
    check(env_ptr, status)
}

#[pyfunction]
fn copyquad(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    qmatbeg: &Bound<'_, PyAny>,
    qmatcnt: &Bound<'_, PyAny>,
    qmatind: &Bound<'_, PyAny>,
    qmatval: &Bound<'_, PyAny>,
) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let qmatbeg = extract_indices(qmatbeg, "qmatbeg")?;
    let qmatcnt = extract_indices(qmatcnt, "qmatcnt")?;
    let qmatind = extract_indices(qmatind, "qmatind")?;
    let qmatval = extract_f64(qmatval, "qmatval")?;
    let status = unsafe {
        ffi::CPXcopyquad(
            env_ptr,
            lp,
            qmatbeg.as_ptr(),
            qmatcnt.as_ptr(),
            qmatind.as_ptr(),
            qmatval.as_ptr(),
        )
    };
    check(env_ptr, status)
}

#[pyfunction]
fn addsos(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    sostype: &str,
    sosbeg: &Bound<'_, PyAny>,
    sosind: &Bound<'_, PyAny>,
    soswt: &Bound<'_, PyAny>,
) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let sostype = extract_bytes(sostype, "sostype", SOS_CHARS)?;
    let sosbeg = extract_indices(sosbeg, "sosbeg")?;
    let sosind = extract_indices(sosind, "sosind")?;
    let soswt = extract_f64(soswt, "soswt")?;
    let status = unsafe {
        ffi::CPXaddsos(
            env_ptr,
            lp,
            sostype.len() as ffi::CpxInt,
            soswt.len() as ffi::CpxInt,
            char_ptr(&sostype),
            sosbeg.as_ptr(),
            sosind.as_ptr(),
            soswt.as_ptr(),
            std::ptr::null_mut(),
        )
    };
    check(env_ptr, status)
}

/// Deletes the SOS sets flagged with 1; returns the remapping array the
/// native call writes back (new index per surviving set, -1 if deleted).
#[pyfunction]
fn delsetsos(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    delset: &Bound<'_, PyAny>,
) -> PyResult<Vec<i32>> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let mut delset = extract_indices(delset, "delset")?;
    let status = unsafe { ffi::CPXdelsetsos(env_ptr, lp, delset.as_mut_ptr()) };
    check(env_ptr, status)?;
    Ok(delset)
}

#[pyfunction]
fn copymipstart(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    indices: &Bound<'_, PyAny>,
    values: &Bound<'_, PyAny>,
) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let indices = extract_indices(indices, "indices")?;
    let values = extract_f64(values, "values")?;
    let status = unsafe {
        ffi::CPXcopymipstart(
            env_ptr,
            lp,
            indices.len() as ffi::CpxInt,
            indices.as_ptr(),
            values.as_ptr(),
        )
    };
    check(env_ptr, status)
}

#[pyfunction]
fn copybase(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    cstat: &Bound<'_, PyAny>,
    rstat: &Bound<'_, PyAny>,
) -> PyResult<()> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let cstat = extract_indices(cstat, "cstat")?;
    let rstat = extract_indices(rstat, "rstat")?;
    let status = unsafe { ffi::CPXcopybase(env_ptr, lp, cstat.as_ptr(), rstat.as_ptr()) };
    check(env_ptr, status)
}

fn optimize_inner(env: ffi::CpxEnvPtr, lp: ffi::CpxLpPtr) -> PyResult<()> {
    let ptype = unsafe { ffi::CPXgetprobtype(env, lp) };
    let status = match ptype {
        ffi::CPXPROB_MILP | ffi::CPXPROB_FIXEDMILP | ffi::CPXPROB_MIQP => unsafe {
            ffi::CPXmipopt(env, lp)
        },
        ffi::CPXPROB_QP => unsafe { ffi::CPXqpopt(env, lp) },
        _ => unsafe { ffi::CPXlpopt(env, lp) },
    };
    check(env, status)
}

#[pyfunction]
fn lpopt(env: PyRef<'_, PyEnv>, prob: PyRef<'_, PyProb>) -> PyResult<()> {
    optimize_inner(env.ptr()?, prob.ptr()?)
}

#[pyfunction]
fn mipopt(env: PyRef<'_, PyEnv>, prob: PyRef<'_, PyProb>) -> PyResult<()> {
    optimize_inner(env.ptr()?, prob.ptr()?)
}

#[pyfunction]
fn qpopt(env: PyRef<'_, PyEnv>, prob: PyRef<'_, PyProb>) -> PyResult<()> {
    optimize_inner(env.ptr()?, prob.ptr()?)
}

fn is_mip(env: ffi::CpxEnvPtr, lp: ffi::CpxLpPtr) -> bool {
    matches!(
        unsafe { ffi::CPXgetprobtype(env, lp) },
        ffi::CPXPROB_MILP | ffi::CPXPROB_FIXEDMILP | ffi::CPXPROB_MIQP
    )
}

type RangeGetter =
    unsafe extern "C" fn(ffi::CpxEnvPtr, ffi::CpxLpPtr, *mut f64, ffi::CpxInt, ffi::CpxInt) -> ffi::CpxInt;

fn fetch_range(
    env: ffi::CpxEnvPtr,
    lp: ffi::CpxLpPtr,
    begin: Option<i32>,
    end: Option<i32>,
    full: ffi::CpxInt,
    getter: RangeGetter,
) -> PyResult<Vec<f64>> {
    let begin = begin.unwrap_or(0);
    let end = match end {
        Some(end) => end,
        None if full == 0 => return Ok(Vec::new()),
        None => full - 1,
    };
    let len = if end < begin { 0 } else { (end - begin + 1) as usize };
    let mut values = vec![0.0; len];
    let status = unsafe { getter(env, lp, values.as_mut_ptr(), begin, end) };
    check(env, status)?;
    Ok(values)
}

#[pyfunction]
#[pyo3(signature = (env, prob, begin=None, end=None))]
fn getx(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    begin: Option<i32>,
    end: Option<i32>,
) -> PyResult<Vec<f64>> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let getter: RangeGetter = if is_mip(env_ptr, lp) {
        ffi::CPXgetmipx
    } else {
        ffi::CPXgetx
    };
    let full = unsafe { ffi::CPXgetnumcols(env_ptr, lp) };
    fetch_range(env_ptr, lp, begin, end, full, getter)
}

#[pyfunction]
#[pyo3(signature = (env, prob, begin=None, end=None))]
fn getmipx(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    begin: Option<i32>,
    end: Option<i32>,
) -> PyResult<Vec<f64>> {
    getx(env, prob, begin, end)
}

#[pyfunction]
#[pyo3(signature = (env, prob, begin=None, end=None))]
fn getslack(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    begin: Option<i32>,
    end: Option<i32>,
) -> PyResult<Vec<f64>> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let full = unsafe { ffi::CPXgetnumrows(env_ptr, lp) };
    fetch_range(env_ptr, lp, begin, end, full, ffi::CPXgetslack)
}

#[pyfunction]
#[pyo3(signature = (env, prob, begin=None, end=None))]
fn getpi(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    begin: Option<i32>,
    end: Option<i32>,
) -> PyResult<Vec<f64>> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let full = unsafe { ffi::CPXgetnumrows(env_ptr, lp) };
    fetch_range(env_ptr, lp, begin, end, full, ffi::CPXgetpi)
}

#[pyfunction]
#[pyo3(signature = (env, prob, begin=None, end=None))]
fn getdj(
    env: PyRef<'_, PyEnv>,
    prob: PyRef<'_, PyProb>,
    begin: Option<i32>,
    end: Option<i32>,
) -> PyResult<Vec<f64>> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let full = unsafe { ffi::CPXgetnumcols(env_ptr, lp) };
    fetch_range(env_ptr, lp, begin, end, full, ffi::CPXgetdj)
}

#[pyfunction]
fn getobjval(env: PyRef<'_, PyEnv>, prob: PyRef<'_, PyProb>) -> PyResult<f64> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let mut value: f64 = 0.0;
    let status = if is_mip(env_ptr, lp) {
        unsafe { ffi::CPXgetmipobjval(env_ptr, lp, &raw mut value) }
    } else {
        unsafe { ffi::CPXgetobjval(env_ptr, lp, &raw mut value) }
    };
    check(env_ptr, status)?;
    Ok(value)
}

#[pyfunction]
fn getmipobjval(env: PyRef<'_, PyEnv>, prob: PyRef<'_, PyProb>) -> PyResult<f64> {
    getobjval(env, prob)
}

#[pyfunction]
fn getstat(env: PyRef<'_, PyEnv>, prob: PyRef<'_, PyProb>) -> PyResult<i32> {
    Ok(unsafe { ffi::CPXgetstat(env.ptr()?, prob.ptr()?) })
}

#[pyfunction]
fn getbase(env: PyRef<'_, PyEnv>, prob: PyRef<'_, PyProb>) -> PyResult<(Vec<i32>, Vec<i32>)> {
    let env_ptr = env.ptr()?;
    let lp = prob.ptr()?;
    let num_cols = unsafe { ffi::CPXgetnumcols(env_ptr, lp) };
    let num_rows = unsafe { ffi::CPXgetnumrows(env_ptr, lp) };
    let mut cstat = vec![0 as ffi::CpxInt; num_cols as usize];
    let mut rstat = vec![0 as ffi::CpxInt; num_rows as usize];
    let status =
        unsafe { ffi::CPXgetbase(env_ptr, lp, cstat.as_mut_ptr(), rstat.as_mut_ptr()) };
    check(env_ptr, status)?;
    Ok((cstat, rstat))
}

/// The CPLEX binding module.
#[pymodule]
fn cpx(m: &Bound<'_, PyModule>) -> PyResult<()> {
    errors::register(m)?;
    handles::register(m)?;

    m.add_function(wrap_pyfunction!(open_cplex, m)?)?;
    m.add_function(wrap_pyfunction!(close_cplex, m)?)?;
    m.add_function(wrap_pyfunction!(createprob, m)?)?;
    m.add_function(wrap_pyfunction!(freeprob, m)?)?;
    m.add_function(wrap_pyfunction!(writeprob, m)?)?;
    m.add_function(wrap_pyfunction!(setintparam, m)?)?;
    m.add_function(wrap_pyfunction!(setdblparam, m)?)?;
    m.add_function(wrap_pyfunction!(getintparam, m)?)?;
    m.add_function(wrap_pyfunction!(copylp, m)?)?;
    m.add_function(wrap_pyfunction!(newcols, m)?)?;
    m.add_function(wrap_pyfunction!(newrows, m)?)?;
    m.add_function(wrap_pyfunction!(addrows, m)?)?;
    m.add_function(wrap_pyfunction!(delrows, m)?)?;
    m.add_function(wrap_pyfunction!(chgobj, m)?)?;
    m.add_function(wrap_pyfunction!(chgcoef, m)?)?;
    m.add_function(wrap_pyfunction!(chgcoeflist, m)?)?;
    m.add_function(wrap_pyfunction!(chgbds, m)?)?;
    m.add_function(wrap_pyfunction!(copyctype, m)?)?;
    m.add_function(wrap_pyfunction!(copyquad, m)?)?;
    m.add_function(wrap_pyfunction!(addsos, m)?)?;
    m.add_function(wrap_pyfunction!(delsetsos, m)?)?;
    m.add_function(wrap_pyfunction!(copymipstart, m)?)?;
    m.add_function(wrap_pyfunction!(copybase, m)?)?;
    m.add_function(wrap_pyfunction!(lpopt, m)?)?;
    m.add_function(wrap_pyfunction!(mipopt, m)?)?;
    m.add_function(wrap_pyfunction!(qpopt, m)?)?;
    m.add_function(wrap_pyfunction!(getx, m)?)?;
    m.add_function(wrap_pyfunction!(getmipx, m)?)?;
    m.add_function(wrap_pyfunction!(getslack, m)?)?;
    m.add_function(wrap_pyfunction!(getpi, m)?)?;
    m.add_function(wrap_pyfunction!(getdj, m)?)?;
    m.add_function(wrap_pyfunction!(getobjval, m)?)?;
    m.add_function(wrap_pyfunction!(getmipobjval, m)?)?;
    m.add_function(wrap_pyfunction!(getstat, m)?)?;
    m.add_function(wrap_pyfunction!(getbase, m)?)?;

    // Native constants the scripting surface needs for parameters,
    // senses, and statuses.
    m.add("CPX_MIN", ffi::CPX_MIN)?;
    m.add("CPX_MAX", ffi::CPX_MAX)?;
    m.add("CPX_INFBOUND", ffi::CPX_INFBOUND)?;
    m.add("CPX_ON", ffi::CPX_ON)?;
    m.add("CPX_OFF", ffi::CPX_OFF)?;
    m.add("CPX_PARAM_SCRIND", ffi::CPX_PARAM_SCRIND)?;
    m.add("CPX_PARAM_DATACHECK", ffi::CPX_PARAM_DATACHECK)?;
    m.add("CPX_PARAM_ITLIM", ffi::CPX_PARAM_ITLIM)?;
    m.add("CPX_PARAM_TILIM", ffi::CPX_PARAM_TILIM)?;
    m.add("CPX_PARAM_THREADS", ffi::CPX_PARAM_THREADS)?;
    m.add("CPX_PARAM_EPGAP", ffi::CPX_PARAM_EPGAP)?;
    m.add("CPX_STAT_OPTIMAL", ffi::CPX_STAT_OPTIMAL)?;
    m.add("CPX_STAT_UNBOUNDED", ffi::CPX_STAT_UNBOUNDED)?;
    m.add("CPX_STAT_INFEASIBLE", ffi::CPX_STAT_INFEASIBLE)?;
    m.add("CPXMIP_OPTIMAL", ffi::CPXMIP_OPTIMAL)?;
    m.add("CPXMIP_OPTIMAL_TOL", ffi::CPXMIP_OPTIMAL_TOL)?;
    m.add("CPXMIP_INFEASIBLE", ffi::CPXMIP_INFEASIBLE)?;

    Ok(())
}
