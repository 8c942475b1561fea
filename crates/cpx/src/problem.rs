//! Problem handle: model construction, solving, and file output.
//!
//! This module contains unsafe code for interacting with the C library.
#![allow(unsafe_code)]

use std::ffi::CString;
use std::os::raw::c_char;

use tracing::{debug, trace, warn};

use cpx_sys::{self as ffi, CpxInt, CpxLpPtr};

use crate::env::{cpx_call, native_error, Environment};
use crate::error::{Error, Result};
use crate::index::{check_index_width, to_native, IndexValue};
use crate::probtype::{ObjectiveSense, ProblemType};

/// A problem object borrowed from an [`Environment`].
///
/// The borrow makes use-after-close unrepresentable: the environment
/// cannot be dropped or consumed while any of its problems is alive.
/// Dropping the problem frees it natively; [`Problem::free`] is the
/// consuming form for callers that need the release status.
#[derive(Debug)]
pub struct Problem<'env> {
    env: &'env Environment,
    raw: CpxLpPtr,
}

fn optional_ptr(values: Option<&[f64]>) -> *const f64 {
    values.map_or(std::ptr::null(), <[f64]>::as_ptr)
}

fn char_ptr(values: &[u8]) -> *const c_char {
    values.as_ptr() as *const c_char
}

impl<'env> Problem<'env> {
    pub(crate) fn from_raw(env: &'env Environment, raw: CpxLpPtr) -> Self {
        Problem { env, raw }
    }

    pub(crate) fn raw(&self) -> CpxLpPtr {
        self.raw
    }

    pub(crate) fn env_raw(&self) -> ffi::CpxEnvPtr {
        self.env.raw()
    }

    /// Replaces the entire model with a linear program in sparse column
    /// form. Column and row counts are taken from `obj` and `rhs`.
    ///
    /// On a native failure the model may be partially populated; the
    /// native library defines what a failed copy leaves behind.
    #[allow(clippy::too_many_arguments)]
    pub fn copy_lp<I: IndexValue>(
        &mut self,
        objsense: ObjectiveSense,
        obj: &[f64],
        rhs: &[f64],
        sense: &[u8],
        matbeg: &[I],
        matcnt: &[I],
        matind: &[I],
        matval: &[f64],
        lb: &[f64],
        ub: &[f64],
        rngval: Option<&[f64]>,
    ) -> Result<()> {
        check_index_width::<I>("matbeg")?;
        let matbeg = to_native(matbeg);
        let matcnt = to_native(matcnt);
        let matind = to_native(matind);
        trace!(
            component = "cplex",
            operation = "copy_lp",
            status = "success",
            num_cols = obj.len(),
            num_rows = rhs.len(),
            nonzeros = matval.len(),
            "Copying linear program"
        );
        cpx_call!(
            self.env_raw(),
            ffi::CPXcopylp(
                self.env_raw(),
                self.raw,
                obj.len() as CpxInt,
                rhs.len() as CpxInt,
                objsense.to_raw(),
                obj.as_ptr(),
                rhs.as_ptr(),
                char_ptr(sense),
                matbeg.as_ptr(),
                matcnt.as_ptr(),
                matind.as_ptr(),
                matval.as_ptr(),
                lb.as_ptr(),
                ub.as_ptr(),
                optional_ptr(rngval),
            )
        );
        Ok(())
    }

    /// Appends columns. `ctype` marks integrality per column and may be
    /// omitted for continuous columns.
    pub fn new_cols(
        &mut self,
        obj: &[f64],
        lb: &[f64],
        ub: &[f64],
        ctype: Option<&[u8]>,
    ) -> Result<()> {
        trace!(
            component = "cplex",
            operation = "new_cols",
            status = "success",
            count = obj.len(),
            "Adding columns"
        );
        cpx_call!(
            self.env_raw(),
            ffi::CPXnewcols(
                self.env_raw(),
                self.raw,
                obj.len() as CpxInt,
                obj.as_ptr(),
                lb.as_ptr(),
                ub.as_ptr(),
                ctype.map_or(std::ptr::null(), |t| char_ptr(t)),
                std::ptr::null_mut(),
            )
        );
        Ok(())
    }

    /// Appends empty rows; coefficients come later through the
    /// coefficient-change operations.
    pub fn new_rows(&mut self, rhs: &[f64], sense: &[u8], rngval: Option<&[f64]>) -> Result<()> {
        trace!(
            component = "cplex",
            operation = "new_rows",
            status = "success",
            count = rhs.len(),
            "Adding rows"
        );
        cpx_call!(
            self.env_raw(),
            ffi::CPXnewrows(
                self.env_raw(),
                self.raw,
                rhs.len() as CpxInt,
                rhs.as_ptr(),
                char_ptr(sense),
                optional_ptr(rngval),
                std::ptr::null_mut(),
            )
        );
        Ok(())
    }

    /// Appends rows with coefficients in sparse row form, creating `ccnt`
    /// new columns first.
    ///
    /// On a native failure the model may hold some of the new rows; the
    /// native library defines what a failed batch leaves behind.
    pub fn add_rows<I: IndexValue>(
        &mut self,
        ccnt: CpxInt,
        rhs: &[f64],
        sense: &[u8],
        rmatbeg: &[I],
        rmatind: &[I],
        rmatval: &[f64],
    ) -> Result<()> {
        check_index_width::<I>("rmatbeg")?;
        let rmatbeg = to_native(rmatbeg);
        let rmatind = to_native(rmatind);
        trace!(
            component = "cplex",
            operation = "add_rows",
            status = "success",
            new_cols = ccnt,
            new_rows = rhs.len(),
            nonzeros = rmatval.len(),
            "Adding rows with coefficients"
        );
        cpx_call!(
            self.env_raw(),
            ffi::CPXaddrows(
                self.env_raw(),
                self.raw,
                ccnt,
                rhs.len() as CpxInt,
                rmatval.len() as CpxInt,
                rhs.as_ptr(),
                char_ptr(sense),
                rmatbeg.as_ptr(),
                rmatind.as_ptr(),
                rmatval.as_ptr(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
            )
        );
        Ok(())
    }

    /// Deletes the inclusive row range `[begin, end]`.
    pub fn del_rows(&mut self, begin: CpxInt, end: CpxInt) -> Result<()> {
        trace!(
            component = "cplex",
            operation = "del_rows",
            status = "success",
            begin,
            end,
            "Deleting rows"
        );
        cpx_call!(
            self.env_raw(),
            ffi::CPXdelrows(self.env_raw(), self.raw, begin, end)
        );
        Ok(())
    }

    /// Changes objective coefficients for the listed columns.
    pub fn chg_obj<I: IndexValue>(&mut self, indices: &[I], values: &[f64]) -> Result<()> {
        check_index_width::<I>("indices")?;
        let indices = to_native(indices);
        cpx_call!(
            self.env_raw(),
            ffi::CPXchgobj(
                self.env_raw(),
                self.raw,
                indices.len() as CpxInt,
                indices.as_ptr(),
                values.as_ptr(),
            )
        );
        Ok(())
    }

    /// Changes a single matrix coefficient. Row `-1` addresses the
    /// objective, column `-1` the right-hand side.
    pub fn chg_coef(&mut self, row: CpxInt, col: CpxInt, value: f64) -> Result<()> {
        cpx_call!(
            self.env_raw(),
            ffi::CPXchgcoef(self.env_raw(), self.raw, row, col, value)
        );
        Ok(())
    }

    /// Changes a list of matrix coefficients given as (row, col, value)
    /// triples split across three parallel arrays.
    ///
    /// On a native failure some triples may already be applied.
    pub fn chg_coef_list<I: IndexValue>(
        &mut self,
        rows: &[I],
        cols: &[I],
        values: &[f64],
    ) -> Result<()> {
        check_index_width::<I>("rowlist")?;
        let rows = to_native(rows);
        let cols = to_native(cols);
        trace!(
            component = "cplex",
            operation = "chg_coef_list",
            status = "success",
            count = values.len(),
            "Changing coefficient list"
        );
        cpx_call!(
            self.env_raw(),
            ffi::CPXchgcoeflist(
                self.env_raw(),
                self.raw,
                values.len() as CpxInt,
                rows.as_ptr(),
                cols.as_ptr(),
                values.as_ptr(),
            )
        );
        Ok(())
    }

    /// Changes bounds for the listed columns. `lu` holds one of `b'L'`,
    /// `b'U'`, `b'B'` per entry (lower, upper, both).
    pub fn chg_bds<I: IndexValue>(&mut self, indices: &[I], lu: &[u8], bd: &[f64]) -> Result<()> {
        check_index_width::<I>("indices")?;
        let indices = to_native(indices);
        cpx_call!(
            self.env_raw(),
            ffi::CPXchgbds(
                self.env_raw(),
                self.raw,
                indices.len() as CpxInt,
                indices.as_ptr(),
                char_ptr(lu),
                bd.as_ptr(),
            )
        );
        Ok(())
    }

    /// Assigns a type to every column (`b'C'`, `b'B'`, `b'I'`, `b'S'`),
    /// converting the model to a MIP.
    pub fn copy_ctype(&mut self, ctype: &[u8]) -> Result<()> {
        debug!(
            component = "cplex",
            operation = "copy_ctype",
            status = "success",
            count = ctype.len(),
            "Setting column types"
        );
        cpx_call!(
            self.env_raw(),
            ffi::CPXcopyctype(self.env_raw(), self.raw, char_ptr(ctype))
        );
        Ok(())
    }

    /// Installs the quadratic objective matrix in sparse column form.
    pub fn copy_quad<I: IndexValue>(
        &mut self,
        qmatbeg: &[I],
        qmatcnt: &[I],
        qmatind: &[I],
        qmatval: &[f64],
    ) -> Result<()> {
        check_index_width::<I>("qmatbeg")?;
        let qmatbeg = to_native(qmatbeg);
        let qmatcnt = to_native(qmatcnt);
        let qmatind = to_native(qmatind);
        debug!(
            component = "cplex",
            operation = "copy_quad",
            status = "success",
            nonzeros = qmatval.len(),
            "Setting quadratic objective"
        );
        cpx_call!(
            self.env_raw(),
            ffi::CPXcopyquad(
                self.env_raw(),
                self.raw,
                qmatbeg.as_ptr(),
                qmatcnt.as_ptr(),
                qmatind.as_ptr(),
                qmatval.as_ptr(),
            )
        );
        Ok(())
    }

    /// Adds special ordered sets in grouped sparse form. `sostype` holds
    /// `b'1'` or `b'2'` per set.
    pub fn add_sos<I: IndexValue>(
        &mut self,
        sostype: &[u8],
        sosbeg: &[I],
        sosind: &[I],
        soswt: &[f64],
    ) -> Result<()> {
        check_index_width::<I>("sosbeg")?;
        let sosbeg = to_native(sosbeg);
        let sosind = to_native(sosind);
        trace!(
            component = "cplex",
            operation = "add_sos",
            status = "success",
            sets = sostype.len(),
            members = soswt.len(),
            "Adding special ordered sets"
        );
        cpx_call!(
            self.env_raw(),
            ffi::CPXaddsos(
                self.env_raw(),
                self.raw,
                sostype.len() as CpxInt,
                soswt.len() as CpxInt,
                char_ptr(sostype),
                sosbeg.as_ptr(),
                sosind.as_ptr(),
                soswt.as_ptr(),
                std::ptr::null_mut(),
            )
        );
        Ok(())
    }

    /// Deletes the sets flagged with `1` in `delstat`. On return each
    /// entry holds the set's new index, or `-1` if it was deleted.
    pub fn del_set_sos(&mut self, delstat: &mut [CpxInt]) -> Result<()> {
        cpx_call!(
            self.env_raw(),
            ffi::CPXdelsetsos(self.env_raw(), self.raw, delstat.as_mut_ptr())
        );
        Ok(())
    }

    /// Supplies starting values for the listed columns to seed the MIP
    /// search.
    pub fn copy_mip_start<I: IndexValue>(&mut self, indices: &[I], values: &[f64]) -> Result<()> {
        check_index_width::<I>("indices")?;
        let indices = to_native(indices);
        debug!(
            component = "cplex",
            operation = "copy_mip_start",
            status = "success",
            count = values.len(),
            "Copying MIP start"
        );
        cpx_call!(
            self.env_raw(),
            ffi::CPXcopymipstart(
                self.env_raw(),
                self.raw,
                indices.len() as CpxInt,
                indices.as_ptr(),
                values.as_ptr(),
            )
        );
        Ok(())
    }

    /// Installs a simplex starting basis (column and row statuses).
    pub fn copy_base(&mut self, cstat: &[CpxInt], rstat: &[CpxInt]) -> Result<()> {
        debug!(
            component = "cplex",
            operation = "copy_base",
            status = "success",
            cols = cstat.len(),
            rows = rstat.len(),
            "Copying starting basis"
        );
        cpx_call!(
            self.env_raw(),
            ffi::CPXcopybase(self.env_raw(), self.raw, cstat.as_ptr(), rstat.as_ptr())
        );
        Ok(())
    }

    /// Classification of the problem as the native library reports it.
    pub fn problem_type(&self) -> Result<ProblemType> {
        let raw = unsafe { ffi::CPXgetprobtype(self.env_raw(), self.raw) };
        ProblemType::from_raw(raw)
    }

    /// Solves the problem with the optimizer matching its type.
    ///
    /// Non-optimal termination is not an error; query
    /// [`solution_status`](Problem::solution_status) afterward.
    pub fn optimize(&mut self) -> Result<()> {
        let ptype = self.problem_type()?;
        debug!(
            component = "cplex",
            operation = "optimize",
            status = "success",
            ?ptype,
            num_cols = self.num_cols(),
            num_rows = self.num_rows(),
            "Optimizing"
        );
        let env = self.env_raw();
        match ptype {
            ProblemType::Linear => cpx_call!(env, ffi::CPXlpopt(env, self.raw)),
            ProblemType::Quadratic => cpx_call!(env, ffi::CPXqpopt(env, self.raw)),
            ProblemType::MixedInteger | ProblemType::MixedIntegerQuadratic => {
                cpx_call!(env, ffi::CPXmipopt(env, self.raw))
            }
        }
        Ok(())
    }

    /// Writes the model to `filename`; the native library chooses the
    /// format from the file extension (LP, MPS, SAV, ...).
    pub fn write(&self, filename: &str) -> Result<()> {
        let c_name = CString::new(filename).map_err(|_| Error::InvalidName { field: "filename" })?;
        debug!(
            component = "cplex",
            operation = "write_problem",
            status = "success",
            filename,
            "Writing problem file"
        );
        cpx_call!(
            self.env_raw(),
            ffi::CPXwriteprob(self.env_raw(), self.raw, c_name.as_ptr(), std::ptr::null())
        );
        Ok(())
    }

    /// Frees the problem, reporting the native release status.
    ///
    /// Dropping the problem also frees it; this consuming form is for
    /// callers that need to observe a failure.
    pub fn free(self) -> Result<()> {
        let env = self.env_raw();
        let mut raw = self.raw;
        std::mem::forget(self);
        let status = unsafe { ffi::CPXfreeprob(env, &raw mut raw) };
        if status != 0 {
            return Err(native_error(env, status));
        }
        Ok(())
    }
}

impl Drop for Problem<'_> {
    fn drop(&mut self) {
        let status = unsafe { ffi::CPXfreeprob(self.env_raw(), &raw mut self.raw) };
        if status != 0 {
            warn!(
                component = "cplex",
                operation = "free_problem",
                status = "error",
                status_code = status,
                "CPXfreeprob failed during drop"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_free() {
        let env = Environment::open().expect("failed to open environment");
        let prob = env.create_problem("lifecycle").expect("failed to create problem");
        assert_eq!(prob.num_cols(), 0);
        assert_eq!(prob.num_rows(), 0);
        prob.free().expect("failed to free problem");
    }

    #[test]
    fn test_fresh_problem_is_linear() {
        let env = Environment::open().expect("failed to open environment");
        let prob = env.create_problem("fresh").expect("failed to create problem");
        assert_eq!(prob.problem_type().unwrap(), ProblemType::Linear);
    }

    #[test]
    fn test_copy_ctype_converts_to_mip() {
        let env = Environment::open().expect("failed to open environment");
        let mut prob = env.create_problem("mip").expect("failed to create problem");
        prob.new_cols(&[1.0, 1.0], &[0.0, 0.0], &[1.0, 1.0], None)
            .expect("failed to add columns");
        prob.copy_ctype(b"CI").expect("failed to set column types");
        assert_eq!(prob.problem_type().unwrap(), ProblemType::MixedInteger);
    }

    #[test]
    fn test_wide_indices_rejected_before_native_call() {
        let env = Environment::open().expect("failed to open environment");
        let mut prob = env.create_problem("wide").expect("failed to create problem");
        prob.new_cols(&[1.0], &[0.0], &[1.0], None)
            .expect("failed to add columns");
        let err = prob.chg_obj(&[0i64], &[2.0]).unwrap_err();
        assert_eq!(err.code(), "INDEX_WIDTH_MISMATCH");
    }

    #[test]
    fn test_del_rows_out_of_range_is_native_error() {
        let env = Environment::open().expect("failed to open environment");
        let mut prob = env.create_problem("rows").expect("failed to create problem");
        let err = prob.del_rows(0, 3).unwrap_err();
        assert_eq!(err.code(), "CPLEX_NATIVE");
    }
}
