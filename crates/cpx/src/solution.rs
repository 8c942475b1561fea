//! Solution extraction: primal/dual arrays, objective, status, basis.
//!
//! This module contains unsafe code for interacting with the C library.
#![allow(unsafe_code)]

use cpx_sys::{self as ffi, CpxEnvPtr, CpxInt, CpxLpPtr};

use crate::env::cpx_call;
use crate::error::Result;
use crate::problem::Problem;

/// An inclusive, contiguous index range `[begin, end]`.
///
/// Extraction operations take `Option<Span>`; `None` means the full
/// column or row range of the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub begin: CpxInt,
    pub end: CpxInt,
}

impl Span {
    pub fn new(begin: CpxInt, end: CpxInt) -> Self {
        Span { begin, end }
    }

    /// Number of elements the range covers.
    pub fn len(&self) -> usize {
        if self.end < self.begin {
            0
        } else {
            (self.end - self.begin + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The raw native solution status, returned verbatim.
///
/// The shim never branches on this value; compare it against the
/// `CPX_STAT_*` / `CPXMIP_*` constants in `cpx_sys`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SolutionStatus(CpxInt);

impl SolutionStatus {
    pub fn raw(self) -> CpxInt {
        self.0
    }
}

impl From<SolutionStatus> for CpxInt {
    fn from(status: SolutionStatus) -> CpxInt {
        status.0
    }
}

type RangeGetter = unsafe extern "C" fn(CpxEnvPtr, CpxLpPtr, *mut f64, CpxInt, CpxInt) -> CpxInt;

impl Problem<'_> {
    /// Number of columns currently in the problem.
    pub fn num_cols(&self) -> CpxInt {
        unsafe { ffi::CPXgetnumcols(self.env_raw(), self.raw()) }
    }

    /// Number of rows currently in the problem.
    pub fn num_rows(&self) -> CpxInt {
        unsafe { ffi::CPXgetnumrows(self.env_raw(), self.raw()) }
    }

    /// Raw status of the last optimization, `0` if none ran.
    pub fn solution_status(&self) -> SolutionStatus {
        SolutionStatus(unsafe { ffi::CPXgetstat(self.env_raw(), self.raw()) })
    }

    fn fetch_range(&self, span: Option<Span>, full: CpxInt, getter: RangeGetter) -> Result<Vec<f64>> {
        let span = match span {
            Some(span) => span,
            None if full == 0 => return Ok(Vec::new()),
            None => Span::new(0, full - 1),
        };
        let mut values = vec![0.0; span.len()];
        cpx_call!(
            self.env_raw(),
            getter(
                self.env_raw(),
                self.raw(),
                values.as_mut_ptr(),
                span.begin,
                span.end,
            )
        );
        Ok(values)
    }

    /// Primal variable values over a column range.
    pub fn primal_values(&self, span: Option<Span>) -> Result<Vec<f64>> {
        let getter: RangeGetter = if self.problem_type()?.is_mip() {
            ffi::CPXgetmipx
        } else {
            ffi::CPXgetx
        };
        self.fetch_range(span, self.num_cols(), getter)
    }

    /// Row slack values over a row range.
    pub fn slack_values(&self, span: Option<Span>) -> Result<Vec<f64>> {
        self.fetch_range(span, self.num_rows(), ffi::CPXgetslack)
    }

    /// Dual values (shadow prices) over a row range.
    pub fn dual_values(&self, span: Option<Span>) -> Result<Vec<f64>> {
        self.fetch_range(span, self.num_rows(), ffi::CPXgetpi)
    }

    /// Reduced costs over a column range.
    pub fn reduced_costs(&self, span: Option<Span>) -> Result<Vec<f64>> {
        self.fetch_range(span, self.num_cols(), ffi::CPXgetdj)
    }

    /// Objective value of the current solution.
    pub fn objective_value(&self) -> Result<f64> {
        let mut value: f64 = 0.0;
        let env = self.env_raw();
        if self.problem_type()?.is_mip() {
            cpx_call!(env, ffi::CPXgetmipobjval(env, self.raw(), &raw mut value));
        } else {
            cpx_call!(env, ffi::CPXgetobjval(env, self.raw(), &raw mut value));
        }
        Ok(value)
    }

    /// Basis statuses for all columns and rows, as a pair of arrays.
    pub fn basis(&self) -> Result<(Vec<CpxInt>, Vec<CpxInt>)> {
        let mut cstat = vec![0 as CpxInt; self.num_cols() as usize];
        let mut rstat = vec![0 as CpxInt; self.num_rows() as usize];
        cpx_call!(
            self.env_raw(),
            ffi::CPXgetbase(
                self.env_raw(),
                self.raw(),
                cstat.as_mut_ptr(),
                rstat.as_mut_ptr(),
            )
        );
        Ok((cstat, rstat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        assert_eq!(Span::new(0, 0).len(), 1);
        assert_eq!(Span::new(2, 5).len(), 4);
        assert_eq!(Span::new(3, 2).len(), 0);
        assert!(Span::new(3, 2).is_empty());
    }

    #[test]
    fn test_status_is_transparent() {
        let env = crate::Environment::open().expect("failed to open environment");
        let prob = env.create_problem("status").expect("failed to create problem");
        assert_eq!(prob.solution_status().raw(), 0);
    }
}
