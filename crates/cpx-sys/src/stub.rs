//! Bookkeeping implementation of the CPLEX callable surface.
//!
//! Every `CPX*` symbol the extern block declares is defined here when the
//! `stub` feature is on. Handles are boxed Rust structs behind the opaque
//! pointers; model data is recorded exactly as passed in and "solving"
//! fabricates a deterministic solution (each column parked at the bound
//! its objective coefficient favors, slacks derived from the recorded
//! matrix). This is bookkeeping for exercising the marshaling layer, not
//! an optimizer.

use std::collections::BTreeMap;
use std::ffi::CStr;
use std::fmt::Write as _;
use std::slice;

use libc::{c_char, c_double, c_int};

use crate::constants::*;
use crate::{CpxEnvPtr, CpxLpPtr};

struct StubEnv {
    int_params: BTreeMap<c_int, c_int>,
    dbl_params: BTreeMap<c_int, c_double>,
}

#[derive(Clone)]
struct StubSolution {
    status: c_int,
    objval: c_double,
    x: Vec<c_double>,
    slack: Vec<c_double>,
    pi: Vec<c_double>,
    dj: Vec<c_double>,
    cstat: Vec<c_int>,
    rstat: Vec<c_int>,
}

struct StubSos {
    sostype: u8,
    indices: Vec<c_int>,
    weights: Vec<c_double>,
}

struct StubProb {
    name: String,
    objsense: c_int,
    obj: Vec<c_double>,
    lb: Vec<c_double>,
    ub: Vec<c_double>,
    ctype: Option<Vec<u8>>,
    rhs: Vec<c_double>,
    sense: Vec<u8>,
    rngval: Vec<c_double>,
    coefs: BTreeMap<(c_int, c_int), c_double>,
    qmat: BTreeMap<(c_int, c_int), c_double>,
    sos: Vec<StubSos>,
    mip_start: Vec<(c_int, c_double)>,
    start_cstat: Vec<c_int>,
    start_rstat: Vec<c_int>,
    solution: Option<StubSolution>,
}

impl StubProb {
    fn new(name: String) -> Self {
        StubProb {
            name,
            objsense: CPX_MIN,
            obj: Vec::new(),
            lb: Vec::new(),
            ub: Vec::new(),
            ctype: None,
            rhs: Vec::new(),
            sense: Vec::new(),
            rngval: Vec::new(),
            coefs: BTreeMap::new(),
            qmat: BTreeMap::new(),
            sos: Vec::new(),
            mip_start: Vec::new(),
            start_cstat: Vec::new(),
            start_rstat: Vec::new(),
            solution: None,
        }
    }

    fn numcols(&self) -> c_int {
        self.obj.len() as c_int
    }

    fn numrows(&self) -> c_int {
        self.rhs.len() as c_int
    }

    fn probtype(&self) -> c_int {
        let quadratic = !self.qmat.is_empty();
        let integral = self
            .ctype
            .as_ref()
            .map(|t| t.iter().any(|&c| c != CPX_CONTINUOUS))
            .unwrap_or(false)
            || !self.sos.is_empty();
        match (quadratic, integral) {
            (false, false) => CPXPROB_LP,
            (false, true) => CPXPROB_MILP,
            (true, false) => CPXPROB_QP,
            (true, true) => CPXPROB_MIQP,
        }
    }

    fn is_mip(&self) -> bool {
        matches!(self.probtype(), CPXPROB_MILP | CPXPROB_MIQP)
    }

    /// Parks every column at the bound its objective coefficient favors and
    /// derives the row activity from the recorded coefficients.
    fn solve(&mut self) {
        let n = self.obj.len();
        let m = self.rhs.len();
        let minimize = self.objsense != CPX_MAX;

        let mut x = vec![0.0; n];
        let mut cstat = vec![CPX_AT_LOWER; n];
        for j in 0..n {
            let toward_lower = if minimize {
                self.obj[j] >= 0.0
            } else {
                self.obj[j] < 0.0
            };
            let (bound, stat) = if toward_lower {
                (self.lb[j], CPX_AT_LOWER)
            } else {
                (self.ub[j], CPX_AT_UPPER)
            };
            if bound.abs() >= CPX_INFBOUND {
                x[j] = 0.0;
                cstat[j] = CPX_FREE_SUPER;
            } else {
                x[j] = bound;
                cstat[j] = stat;
            }
        }

        let mut activity = vec![0.0; m];
        for (&(i, j), &v) in &self.coefs {
            activity[i as usize] += v * x[j as usize];
        }
        let slack: Vec<c_double> = (0..m).map(|i| self.rhs[i] - activity[i]).collect();

        let mut objval = 0.0;
        for j in 0..n {
            objval += self.obj[j] * x[j];
        }
        for (&(i, j), &v) in &self.qmat {
            objval += 0.5 * v * x[i as usize] * x[j as usize];
        }

        let status = if self.is_mip() {
            CPXMIP_OPTIMAL
        } else {
            CPX_STAT_OPTIMAL
        };
        self.solution = Some(StubSolution {
            status,
            objval,
            x,
            slack,
            pi: vec![0.0; m],
            dj: self.obj.clone(),
            cstat,
            rstat: vec![CPX_BASIC; m],
        });
    }
}

unsafe fn env_ref<'a>(env: CpxEnvPtr) -> Option<&'a mut StubEnv> {
    (env as *mut StubEnv).as_mut()
}

unsafe fn prob_ref<'a>(lp: CpxLpPtr) -> Option<&'a mut StubProb> {
    (lp as *mut StubProb).as_mut()
}

unsafe fn opt_slice<'a, T>(ptr: *const T, len: usize) -> Option<&'a [T]> {
    if ptr.is_null() {
        None
    } else {
        Some(slice::from_raw_parts(ptr, len))
    }
}

fn known_int_param(which: c_int) -> bool {
    matches!(
        which,
        CPX_PARAM_ITLIM | CPX_PARAM_SCRIND | CPX_PARAM_DATACHECK | CPX_PARAM_THREADS
    )
}

fn known_dbl_param(which: c_int) -> bool {
    matches!(which, CPX_PARAM_TILIM | CPX_PARAM_EPGAP)
}

fn int_param_default(which: c_int) -> c_int {
    match which {
        CPX_PARAM_ITLIM => c_int::MAX,
        _ => 0,
    }
}

fn error_description(errcode: c_int) -> Option<&'static str> {
    match errcode {
        CPXERR_NO_MEMORY => Some("Out of memory."),
        CPXERR_NULL_POINTER => Some("Null pointer for required data."),
        CPXERR_BAD_PARAM_NUM => Some("Parameter number out of range."),
        CPXERR_NOT_ONE_PROBLEM => Some("Not one problem."),
        CPXERR_INDEX_RANGE => Some("Index is outside range of valid values."),
        CPXERR_NEGATIVE_SURPLUS => Some("Insufficient array length."),
        CPXERR_NO_SOLN => Some("No solution exists."),
        CPXERR_FAIL_OPEN_WRITE => Some("Could not open file for writing."),
        CPXERR_BAD_FILETYPE => Some("Invalid file type."),
        CPXERR_NOT_MIP => Some("Not a mixed-integer problem."),
        _ => None,
    }
}

#[no_mangle]
pub unsafe extern "C" fn CPXopenCPLEX(status_p: *mut c_int) -> CpxEnvPtr {
    if !status_p.is_null() {
        *status_p = 0;
    }
    let env = Box::new(StubEnv {
        int_params: BTreeMap::new(),
        dbl_params: BTreeMap::new(),
    });
    Box::into_raw(env) as CpxEnvPtr
}

#[no_mangle]
pub unsafe extern "C" fn CPXcloseCPLEX(env_p: *mut CpxEnvPtr) -> c_int {
    if env_p.is_null() || (*env_p).is_null() {
        return CPXERR_NULL_POINTER;
    }
    drop(Box::from_raw(*env_p as *mut StubEnv));
    *env_p = std::ptr::null_mut();
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXgeterrorstring(
    _env: CpxEnvPtr,
    errcode: c_int,
    buffer: *mut c_char,
) -> *const c_char {
    let description = match error_description(errcode) {
        Some(d) => d,
        None => return std::ptr::null(),
    };
    let message = format!("CPLEX Error  {}: {}\n", errcode, description);
    let bytes = message.as_bytes();
    let n = bytes.len().min(CPXMESSAGEBUFSIZE - 1);
    std::ptr::copy_nonoverlapping(bytes.as_ptr() as *const c_char, buffer, n);
    *buffer.add(n) = 0;
    buffer
}

#[no_mangle]
pub unsafe extern "C" fn CPXsetintparam(
    env: CpxEnvPtr,
    whichparam: c_int,
    newvalue: c_int,
) -> c_int {
    let env = match env_ref(env) {
        Some(e) => e,
        None => return CPXERR_NULL_POINTER,
    };
    if !known_int_param(whichparam) {
        return CPXERR_BAD_PARAM_NUM;
    }
    env.int_params.insert(whichparam, newvalue);
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXsetdblparam(
    env: CpxEnvPtr,
    whichparam: c_int,
    newvalue: c_double,
) -> c_int {
    let env = match env_ref(env) {
        Some(e) => e,
        None => return CPXERR_NULL_POINTER,
    };
    if !known_dbl_param(whichparam) {
        return CPXERR_BAD_PARAM_NUM;
    }
    env.dbl_params.insert(whichparam, newvalue);
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetintparam(
    env: CpxEnvPtr,
    whichparam: c_int,
    value_p: *mut c_int,
) -> c_int {
    let env = match env_ref(env) {
        Some(e) => e,
        None => return CPXERR_NULL_POINTER,
    };
    if !known_int_param(whichparam) {
        return CPXERR_BAD_PARAM_NUM;
    }
    if value_p.is_null() {
        return CPXERR_NULL_POINTER;
    }
    *value_p = env
        .int_params
        .get(&whichparam)
        .copied()
        .unwrap_or_else(|| int_param_default(whichparam));
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXcreateprob(
    env: CpxEnvPtr,
    status_p: *mut c_int,
    probname: *const c_char,
) -> CpxLpPtr {
    if env.is_null() {
        if !status_p.is_null() {
            *status_p = CPXERR_NULL_POINTER;
        }
        return std::ptr::null_mut();
    }
    let name = if probname.is_null() {
        String::new()
    } else {
        CStr::from_ptr(probname).to_string_lossy().into_owned()
    };
    if !status_p.is_null() {
        *status_p = 0;
    }
    Box::into_raw(Box::new(StubProb::new(name))) as CpxLpPtr
}

#[no_mangle]
pub unsafe extern "C" fn CPXfreeprob(env: CpxEnvPtr, lp_p: *mut CpxLpPtr) -> c_int {
    if env.is_null() || lp_p.is_null() || (*lp_p).is_null() {
        return CPXERR_NULL_POINTER;
    }
    drop(Box::from_raw(*lp_p as *mut StubProb));
    *lp_p = std::ptr::null_mut();
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXwriteprob(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    filename: *const c_char,
    filetype: *const c_char,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    if filename.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let path = CStr::from_ptr(filename).to_string_lossy().into_owned();
    let format = if filetype.is_null() {
        // Format comes from the filename extension when no type is given.
        match path.rsplit('.').next().map(|e| e.to_ascii_uppercase()) {
            Some(ext) => ext,
            None => return CPXERR_BAD_FILETYPE,
        }
    } else {
        CStr::from_ptr(filetype)
            .to_string_lossy()
            .to_ascii_uppercase()
    };
    if !matches!(format.as_str(), "LP" | "MPS" | "SAV" | "RLP" | "REW") {
        return CPXERR_BAD_FILETYPE;
    }
    match std::fs::write(&path, render_lp_text(prob)) {
        Ok(()) => 0,
        Err(_) => CPXERR_FAIL_OPEN_WRITE,
    }
}

/// Minimal LP-format rendering of the recorded model.
fn render_lp_text(prob: &StubProb) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\\Problem name: {}", prob.name);
    let _ = writeln!(
        out,
        "{}",
        if prob.objsense == CPX_MAX {
            "Maximize"
        } else {
            "Minimize"
        }
    );
    let mut obj_line = String::from(" obj:");
    for (j, &c) in prob.obj.iter().enumerate() {
        if c != 0.0 {
            let _ = write!(obj_line, " {:+} x{}", c, j + 1);
        }
    }
    let _ = writeln!(out, "{}", obj_line);
    let _ = writeln!(out, "Subject To");
    for i in 0..prob.rhs.len() {
        let mut line = format!(" c{}:", i + 1);
        for (&(row, col), &v) in &prob.coefs {
            if row as usize == i {
                let _ = write!(line, " {:+} x{}", v, col + 1);
            }
        }
        let rel = match prob.sense[i] {
            b'L' => "<=",
            b'G' => ">=",
            b'R' => ">=",
            _ => "=",
        };
        let _ = writeln!(out, "{} {} {}", line, rel, prob.rhs[i]);
    }
    let _ = writeln!(out, "Bounds");
    for j in 0..prob.obj.len() {
        let _ = writeln!(out, " {} <= x{} <= {}", prob.lb[j], j + 1, prob.ub[j]);
    }
    let _ = writeln!(out, "End");
    out
}

#[no_mangle]
pub unsafe extern "C" fn CPXcopylp(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    numcols: c_int,
    numrows: c_int,
    objsense: c_int,
    objective: *const c_double,
    rhs: *const c_double,
    sense: *const c_char,
    matbeg: *const c_int,
    matcnt: *const c_int,
    matind: *const c_int,
    matval: *const c_double,
    lb: *const c_double,
    ub: *const c_double,
    rngval: *const c_double,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    if numcols < 0 || numrows < 0 {
        return CPXERR_INDEX_RANGE;
    }
    let n = numcols as usize;
    let m = numrows as usize;

    prob.objsense = objsense;
    prob.obj = opt_slice(objective, n).map(<[_]>::to_vec).unwrap_or_else(|| vec![0.0; n]);
    prob.rhs = opt_slice(rhs, m).map(<[_]>::to_vec).unwrap_or_else(|| vec![0.0; m]);
    prob.sense = opt_slice(sense, m)
        .map(|s| s.iter().map(|&c| c as u8).collect())
        .unwrap_or_else(|| vec![b'E'; m]);
    prob.lb = opt_slice(lb, n).map(<[_]>::to_vec).unwrap_or_else(|| vec![0.0; n]);
    prob.ub = opt_slice(ub, n)
        .map(<[_]>::to_vec)
        .unwrap_or_else(|| vec![CPX_INFBOUND; n]);
    prob.rngval = opt_slice(rngval, m).map(<[_]>::to_vec).unwrap_or_else(|| vec![0.0; m]);

    prob.coefs.clear();
    if n > 0 {
        let beg = match opt_slice(matbeg, n) {
            Some(b) => b,
            None => return CPXERR_NULL_POINTER,
        };
        let cnt = match opt_slice(matcnt, n) {
            Some(c) => c,
            None => return CPXERR_NULL_POINTER,
        };
        for j in 0..n {
            let (start, count) = (beg[j], cnt[j]);
            if start < 0 || count < 0 {
                return CPXERR_INDEX_RANGE;
            }
            for k in 0..count {
                let pos = (start + k) as usize;
                let row = *matind.add(pos);
                let val = *matval.add(pos);
                if row < 0 || row >= numrows {
                    return CPXERR_INDEX_RANGE;
                }
                prob.coefs.insert((row, j as c_int), val);
            }
        }
    }
    prob.solution = None;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXnewcols(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    ccnt: c_int,
    obj: *const c_double,
    lb: *const c_double,
    ub: *const c_double,
    xctype: *const c_char,
    _colname: *mut *mut c_char,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    if ccnt < 0 {
        return CPXERR_INDEX_RANGE;
    }
    let k = ccnt as usize;
    let obj = opt_slice(obj, k).map(<[_]>::to_vec).unwrap_or_else(|| vec![0.0; k]);
    let lb = opt_slice(lb, k).map(<[_]>::to_vec).unwrap_or_else(|| vec![0.0; k]);
    let ub = opt_slice(ub, k)
        .map(<[_]>::to_vec)
        .unwrap_or_else(|| vec![CPX_INFBOUND; k]);
    prob.obj.extend(obj);
    prob.lb.extend(lb);
    prob.ub.extend(ub);
    if let Some(types) = opt_slice(xctype, k) {
        let existing = prob.numcols() as usize - k;
        let ctype = prob
            .ctype
            .get_or_insert_with(|| vec![CPX_CONTINUOUS; existing]);
        ctype.extend(types.iter().map(|&c| c as u8));
    } else if let Some(ctype) = prob.ctype.as_mut() {
        ctype.extend(std::iter::repeat(CPX_CONTINUOUS).take(k));
    }
    prob.solution = None;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXnewrows(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    rcnt: c_int,
    rhs: *const c_double,
    sense: *const c_char,
    rngval: *const c_double,
    _rowname: *mut *mut c_char,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    if rcnt < 0 {
        return CPXERR_INDEX_RANGE;
    }
    let k = rcnt as usize;
    let rhs = opt_slice(rhs, k).map(<[_]>::to_vec).unwrap_or_else(|| vec![0.0; k]);
    let sense: Vec<u8> = opt_slice(sense, k)
        .map(|s| s.iter().map(|&c| c as u8).collect())
        .unwrap_or_else(|| vec![b'E'; k]);
    let rngval = opt_slice(rngval, k).map(<[_]>::to_vec).unwrap_or_else(|| vec![0.0; k]);
    prob.rhs.extend(rhs);
    prob.sense.extend(sense);
    prob.rngval.extend(rngval);
    prob.solution = None;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXaddrows(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    ccnt: c_int,
    rcnt: c_int,
    nzcnt: c_int,
    rhs: *const c_double,
    sense: *const c_char,
    rmatbeg: *const c_int,
    rmatind: *const c_int,
    rmatval: *const c_double,
    colname: *mut *mut c_char,
    _rowname: *mut *mut c_char,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    if ccnt < 0 || rcnt < 0 || nzcnt < 0 {
        return CPXERR_INDEX_RANGE;
    }
    let status = CPXnewcols(
        env,
        lp,
        ccnt,
        std::ptr::null(),
        std::ptr::null(),
        std::ptr::null(),
        std::ptr::null(),
        colname,
    );
    if status != 0 {
        return status;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    append_rows(prob, rcnt, nzcnt, rhs, sense, rmatbeg, rmatind, rmatval)
}

unsafe fn append_rows(
    prob: &mut StubProb,
    rcnt: c_int,
    nzcnt: c_int,
    rhs: *const c_double,
    sense: *const c_char,
    rmatbeg: *const c_int,
    rmatind: *const c_int,
    rmatval: *const c_double,
) -> c_int {
    let k = rcnt as usize;
    let nz = nzcnt as usize;
    let base_row = prob.numrows();
    let rhs = opt_slice(rhs, k).map(<[_]>::to_vec).unwrap_or_else(|| vec![0.0; k]);
    let sense: Vec<u8> = opt_slice(sense, k)
        .map(|s| s.iter().map(|&c| c as u8).collect())
        .unwrap_or_else(|| vec![b'E'; k]);
    let beg = match opt_slice(rmatbeg, k) {
        Some(b) => b,
        None => return CPXERR_NULL_POINTER,
    };
    let ind = match opt_slice(rmatind, nz) {
        Some(i) => i,
        None => return CPXERR_NULL_POINTER,
    };
    let val = match opt_slice(rmatval, nz) {
        Some(v) => v,
        None => return CPXERR_NULL_POINTER,
    };
    let numcols = prob.numcols();
    for r in 0..k {
        let start = beg[r];
        let end = if r + 1 < k { beg[r + 1] } else { nzcnt };
        if start < 0 || end < start || end > nzcnt {
            return CPXERR_INDEX_RANGE;
        }
        for pos in start..end {
            let col = ind[pos as usize];
            if col < 0 || col >= numcols {
                return CPXERR_INDEX_RANGE;
            }
            prob.coefs
                .insert((base_row + r as c_int, col), val[pos as usize]);
        }
    }
    prob.rhs.extend(rhs);
    prob.sense.extend(sense);
    prob.rngval.extend(std::iter::repeat(0.0).take(k));
    prob.solution = None;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXdelrows(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    begin: c_int,
    end: c_int,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    if begin < 0 || end < begin || end >= prob.numrows() {
        return CPXERR_INDEX_RANGE;
    }
    let (b, e) = (begin as usize, end as usize);
    prob.rhs.drain(b..=e);
    prob.sense.drain(b..=e);
    prob.rngval.drain(b..=e);
    let deleted = (e - b + 1) as c_int;
    let old = std::mem::take(&mut prob.coefs);
    for ((row, col), v) in old {
        if row < begin {
            prob.coefs.insert((row, col), v);
        } else if row > end {
            prob.coefs.insert((row - deleted, col), v);
        }
    }
    prob.solution = None;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXchgobj(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    cnt: c_int,
    indices: *const c_int,
    values: *const c_double,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    if cnt < 0 {
        return CPXERR_INDEX_RANGE;
    }
    let k = cnt as usize;
    let (ind, val) = match (opt_slice(indices, k), opt_slice(values, k)) {
        (Some(i), Some(v)) => (i, v),
        _ => return CPXERR_NULL_POINTER,
    };
    for t in 0..k {
        let j = ind[t];
        if j < 0 || j >= prob.numcols() {
            return CPXERR_INDEX_RANGE;
        }
        prob.obj[j as usize] = val[t];
    }
    prob.solution = None;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXchgcoef(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    i: c_int,
    j: c_int,
    newvalue: c_double,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    // Row -1 addresses the objective, column -1 the right-hand side.
    match (i, j) {
        (-1, col) => {
            if col < 0 || col >= prob.numcols() {
                return CPXERR_INDEX_RANGE;
            }
            prob.obj[col as usize] = newvalue;
        }
        (row, -1) => {
            if row < 0 || row >= prob.numrows() {
                return CPXERR_INDEX_RANGE;
            }
            prob.rhs[row as usize] = newvalue;
        }
        (row, col) => {
            if row < 0 || row >= prob.numrows() || col < 0 || col >= prob.numcols() {
                return CPXERR_INDEX_RANGE;
            }
            if newvalue == 0.0 {
                prob.coefs.remove(&(row, col));
            } else {
                prob.coefs.insert((row, col), newvalue);
            }
        }
    }
    prob.solution = None;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXchgcoeflist(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    numcoefs: c_int,
    rowlist: *const c_int,
    collist: *const c_int,
    vallist: *const c_double,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    if numcoefs < 0 {
        return CPXERR_INDEX_RANGE;
    }
    let k = numcoefs as usize;
    let (rows, cols, vals) = match (
        opt_slice(rowlist, k),
        opt_slice(collist, k),
        opt_slice(vallist, k),
    ) {
        (Some(r), Some(c), Some(v)) => (r, c, v),
        _ => return CPXERR_NULL_POINTER,
    };
    for t in 0..k {
        let status = CPXchgcoef(env, lp, rows[t], cols[t], vals[t]);
        if status != 0 {
            return status;
        }
    }
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXchgbds(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    cnt: c_int,
    indices: *const c_int,
    lu: *const c_char,
    bd: *const c_double,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    if cnt < 0 {
        return CPXERR_INDEX_RANGE;
    }
    let k = cnt as usize;
    let (ind, lu, bd) = match (opt_slice(indices, k), opt_slice(lu, k), opt_slice(bd, k)) {
        (Some(i), Some(l), Some(b)) => (i, l, b),
        _ => return CPXERR_NULL_POINTER,
    };
    for t in 0..k {
        let j = ind[t];
        if j < 0 || j >= prob.numcols() {
            return CPXERR_INDEX_RANGE;
        }
        let j = j as usize;
        match lu[t] as u8 {
            b'L' => prob.lb[j] = bd[t],
            b'U' => prob.ub[j] = bd[t],
            b'B' => {
                prob.lb[j] = bd[t];
                prob.ub[j] = bd[t];
            }
            _ => return CPXERR_INDEX_RANGE,
        }
    }
    prob.solution = None;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXcopyctype(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    xctype: *const c_char,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    let n = prob.numcols() as usize;
    let types = match opt_slice(xctype, n) {
        Some(t) => t,
        None => return CPXERR_NULL_POINTER,
    };
    let types: Vec<u8> = types.iter().map(|&c| c as u8).collect();
    if types.iter().any(|&c| {
        !matches!(c, CPX_CONTINUOUS | CPX_BINARY | CPX_INTEGER | CPX_SEMICONT)
    }) {
        return CPXERR_INDEX_RANGE;
    }
    prob.ctype = Some(types);
    prob.solution = None;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXcopyquad(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    qmatbeg: *const c_int,
    qmatcnt: *const c_int,
    qmatind: *const c_int,
    qmatval: *const c_double,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    let n = prob.numcols() as usize;
    let (beg, cnt) = match (opt_slice(qmatbeg, n), opt_slice(qmatcnt, n)) {
        (Some(b), Some(c)) => (b, c),
        _ => return CPXERR_NULL_POINTER,
    };
    if qmatind.is_null() || qmatval.is_null() {
        return CPXERR_NULL_POINTER;
    }
    prob.qmat.clear();
    for j in 0..n {
        let (start, count) = (beg[j], cnt[j]);
        if start < 0 || count < 0 {
            return CPXERR_INDEX_RANGE;
        }
        for k in 0..count {
            let pos = (start + k) as usize;
            let row = *qmatind.add(pos);
            if row < 0 || row >= prob.numcols() {
                return CPXERR_INDEX_RANGE;
            }
            prob.qmat.insert((row, j as c_int), *qmatval.add(pos));
        }
    }
    prob.solution = None;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXaddsos(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    numsos: c_int,
    numsosnz: c_int,
    sostype: *const c_char,
    sosbeg: *const c_int,
    sosind: *const c_int,
    soswt: *const c_double,
    _sosname: *mut *mut c_char,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    if numsos < 0 || numsosnz < 0 {
        return CPXERR_INDEX_RANGE;
    }
    let k = numsos as usize;
    let nz = numsosnz as usize;
    let (types, beg, ind, wt) = match (
        opt_slice(sostype, k),
        opt_slice(sosbeg, k),
        opt_slice(sosind, nz),
        opt_slice(soswt, nz),
    ) {
        (Some(t), Some(b), Some(i), Some(w)) => (t, b, i, w),
        _ => return CPXERR_NULL_POINTER,
    };
    for s in 0..k {
        let stype = types[s] as u8;
        if !matches!(stype, CPX_TYPE_SOS1 | CPX_TYPE_SOS2) {
            return CPXERR_INDEX_RANGE;
        }
        let start = beg[s];
        let end = if s + 1 < k { beg[s + 1] } else { numsosnz };
        if start < 0 || end < start || end > numsosnz {
            return CPXERR_INDEX_RANGE;
        }
        let mut indices = Vec::with_capacity((end - start) as usize);
        let mut weights = Vec::with_capacity((end - start) as usize);
        for pos in start..end {
            let col = ind[pos as usize];
            if col < 0 || col >= prob.numcols() {
                return CPXERR_INDEX_RANGE;
            }
            indices.push(col);
            weights.push(wt[pos as usize]);
        }
        prob.sos.push(StubSos {
            sostype: stype,
            indices,
            weights,
        });
    }
    prob.solution = None;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXdelsetsos(env: CpxEnvPtr, lp: CpxLpPtr, delset: *mut c_int) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    if delset.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let k = prob.sos.len();
    let flags = slice::from_raw_parts_mut(delset, k);
    let mut kept = Vec::with_capacity(k);
    let mut next = 0 as c_int;
    for (s, sos) in std::mem::take(&mut prob.sos).into_iter().enumerate() {
        if flags[s] == 1 {
            flags[s] = -1;
        } else {
            flags[s] = next;
            next += 1;
            kept.push(sos);
        }
    }
    prob.sos = kept;
    prob.solution = None;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXcopymipstart(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    cnt: c_int,
    indices: *const c_int,
    values: *const c_double,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    if cnt < 0 {
        return CPXERR_INDEX_RANGE;
    }
    let k = cnt as usize;
    let (ind, val) = match (opt_slice(indices, k), opt_slice(values, k)) {
        (Some(i), Some(v)) => (i, v),
        _ => return CPXERR_NULL_POINTER,
    };
    let mut start = Vec::with_capacity(k);
    for t in 0..k {
        let j = ind[t];
        if j < 0 || j >= prob.numcols() {
            return CPXERR_INDEX_RANGE;
        }
        start.push((j, val[t]));
    }
    prob.mip_start = start;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXcopybase(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    cstat: *const c_int,
    rstat: *const c_int,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    let n = prob.numcols() as usize;
    let m = prob.numrows() as usize;
    let (cs, rs) = match (opt_slice(cstat, n), opt_slice(rstat, m)) {
        (Some(c), Some(r)) => (c, r),
        _ => return CPXERR_NULL_POINTER,
    };
    if cs
        .iter()
        .chain(rs.iter())
        .any(|&s| !matches!(s, CPX_AT_LOWER | CPX_BASIC | CPX_AT_UPPER | CPX_FREE_SUPER))
    {
        return CPXERR_INDEX_RANGE;
    }
    prob.start_cstat = cs.to_vec();
    prob.start_rstat = rs.to_vec();
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXlpopt(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    prob.solve();
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXqpopt(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int {
    CPXlpopt(env, lp)
}

#[no_mangle]
pub unsafe extern "C" fn CPXmipopt(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    if !prob.is_mip() {
        return CPXERR_NOT_MIP;
    }
    prob.solve();
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetprobtype(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int {
    if env.is_null() {
        return -1;
    }
    match prob_ref(lp) {
        Some(p) => p.probtype(),
        None => -1,
    }
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetnumcols(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int {
    if env.is_null() {
        return 0;
    }
    match prob_ref(lp) {
        Some(p) => p.numcols(),
        None => 0,
    }
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetnumrows(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int {
    if env.is_null() {
        return 0;
    }
    match prob_ref(lp) {
        Some(p) => p.numrows(),
        None => 0,
    }
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetstat(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int {
    if env.is_null() {
        return 0;
    }
    match prob_ref(lp) {
        Some(p) => p.solution.as_ref().map(|s| s.status).unwrap_or(0),
        None => 0,
    }
}

unsafe fn copy_range(
    lp: CpxLpPtr,
    out: *mut c_double,
    begin: c_int,
    end: c_int,
    limit: impl Fn(&StubProb) -> c_int,
    field: impl Fn(&StubSolution) -> &[c_double],
) -> c_int {
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    let sol = match prob.solution.as_ref() {
        Some(s) => s,
        None => return CPXERR_NO_SOLN,
    };
    if begin < 0 || end < begin || end >= limit(prob) {
        return CPXERR_INDEX_RANGE;
    }
    if out.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let values = field(sol);
    let count = (end - begin + 1) as usize;
    std::ptr::copy_nonoverlapping(values[begin as usize..].as_ptr(), out, count);
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetx(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    x: *mut c_double,
    begin: c_int,
    end: c_int,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    copy_range(lp, x, begin, end, |p| p.numcols(), |s| &s.x)
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetmipx(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    x: *mut c_double,
    begin: c_int,
    end: c_int,
) -> c_int {
    CPXgetx(env, lp, x, begin, end)
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetslack(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    slack: *mut c_double,
    begin: c_int,
    end: c_int,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    copy_range(lp, slack, begin, end, |p| p.numrows(), |s| &s.slack)
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetpi(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    pi: *mut c_double,
    begin: c_int,
    end: c_int,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    copy_range(lp, pi, begin, end, |p| p.numrows(), |s| &s.pi)
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetdj(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    dj: *mut c_double,
    begin: c_int,
    end: c_int,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    copy_range(lp, dj, begin, end, |p| p.numcols(), |s| &s.dj)
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetobjval(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    objval_p: *mut c_double,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    let sol = match prob.solution.as_ref() {
        Some(s) => s,
        None => return CPXERR_NO_SOLN,
    };
    if objval_p.is_null() {
        return CPXERR_NULL_POINTER;
    }
    *objval_p = sol.objval;
    0
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetmipobjval(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    objval_p: *mut c_double,
) -> c_int {
    CPXgetobjval(env, lp, objval_p)
}

#[no_mangle]
pub unsafe extern "C" fn CPXgetbase(
    env: CpxEnvPtr,
    lp: CpxLpPtr,
    cstat: *mut c_int,
    rstat: *mut c_int,
) -> c_int {
    if env.is_null() {
        return CPXERR_NULL_POINTER;
    }
    let prob = match prob_ref(lp) {
        Some(p) => p,
        None => return CPXERR_NULL_POINTER,
    };
    let sol = match prob.solution.as_ref() {
        Some(s) => s,
        None => return CPXERR_NO_SOLN,
    };
    if cstat.is_null() || rstat.is_null() {
        return CPXERR_NULL_POINTER;
    }
    std::ptr::copy_nonoverlapping(sol.cstat.as_ptr(), cstat, sol.cstat.len());
    std::ptr::copy_nonoverlapping(sol.rstat.as_ptr(), rstat, sol.rstat.len());
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_strings_cover_surfaced_codes() {
        for code in [
            CPXERR_NO_SOLN,
            CPXERR_INDEX_RANGE,
            CPXERR_BAD_PARAM_NUM,
            CPXERR_FAIL_OPEN_WRITE,
        ] {
            assert!(error_description(code).is_some(), "code {code}");
        }
        assert!(error_description(987_654).is_none());
    }

    #[test]
    fn solve_parks_columns_at_favored_bounds() {
        let mut prob = StubProb::new("t".into());
        prob.obj = vec![1.0, -2.0];
        prob.lb = vec![0.0, 0.0];
        prob.ub = vec![10.0, 10.0];
        prob.rhs = vec![4.0];
        prob.sense = vec![b'L'];
        prob.rngval = vec![0.0];
        prob.coefs.insert((0, 0), 1.0);
        prob.coefs.insert((0, 1), 1.0);
        prob.solve();
        let sol = prob.solution.as_ref().unwrap();
        assert_eq!(sol.status, CPX_STAT_OPTIMAL);
        assert_eq!(sol.x, vec![0.0, 10.0]);
        assert_eq!(sol.objval, -20.0);
        assert_eq!(sol.slack, vec![-6.0]);
    }

    #[test]
    fn probtype_tracks_ctype_and_quad() {
        let mut prob = StubProb::new("t".into());
        prob.obj = vec![0.0; 2];
        prob.lb = vec![0.0; 2];
        prob.ub = vec![1.0; 2];
        assert_eq!(prob.probtype(), CPXPROB_LP);
        prob.ctype = Some(vec![CPX_CONTINUOUS, CPX_INTEGER]);
        assert_eq!(prob.probtype(), CPXPROB_MILP);
        prob.qmat.insert((0, 0), 2.0);
        assert_eq!(prob.probtype(), CPXPROB_MIQP);
        prob.ctype = None;
        assert_eq!(prob.probtype(), CPXPROB_QP);
    }
}
