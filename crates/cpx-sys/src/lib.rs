//! Raw FFI bindings for the CPLEX callable library.
//!
//! These definitions mirror the subset of `ilcplex/cplex.h` that the safe
//! layer wraps. Nothing here is validated; every function trusts the caller
//! to supply pointers and counts that agree.
//!
//! With the default `stub` feature the symbols are provided by the
//! bookkeeping implementation in [`stub`], which records model data and
//! fabricates deterministic solutions so the marshaling layer can be
//! exercised without a CPLEX install. Disable `stub` and enable
//! `link-native` to resolve against a real installation instead.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(unsafe_code)]

use libc::{c_char, c_double, c_int, c_void};

mod constants;
#[cfg(feature = "stub")]
pub mod stub;

pub use constants::*;

/// Native integer type used for every index and count argument.
pub type CpxInt = c_int;

/// A pointer to the opaque CPLEX environment structure.
pub type CpxEnvPtr = *mut c_void;

/// A pointer to an opaque CPLEX problem (LP) structure.
pub type CpxLpPtr = *mut c_void;

#[cfg_attr(feature = "link-native", link(name = "cplex"))]
extern "C" {
    // Environment lifecycle.
    pub fn CPXopenCPLEX(status_p: *mut c_int) -> CpxEnvPtr;
    pub fn CPXcloseCPLEX(env_p: *mut CpxEnvPtr) -> c_int;
    pub fn CPXgeterrorstring(env: CpxEnvPtr, errcode: c_int, buffer: *mut c_char)
        -> *const c_char;

    // Parameters.
    pub fn CPXsetintparam(env: CpxEnvPtr, whichparam: c_int, newvalue: c_int) -> c_int;
    pub fn CPXsetdblparam(env: CpxEnvPtr, whichparam: c_int, newvalue: c_double) -> c_int;
    pub fn CPXgetintparam(env: CpxEnvPtr, whichparam: c_int, value_p: *mut c_int) -> c_int;

    // Problem lifecycle.
    pub fn CPXcreateprob(
        env: CpxEnvPtr,
        status_p: *mut c_int,
        probname: *const c_char,
    ) -> CpxLpPtr;
    pub fn CPXfreeprob(env: CpxEnvPtr, lp_p: *mut CpxLpPtr) -> c_int;
    pub fn CPXwriteprob(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        filename: *const c_char,
        filetype: *const c_char,
    ) -> c_int;

    // Model construction.
    pub fn CPXcopylp(
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
    ) -> c_int;
    pub fn CPXnewcols(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        ccnt: c_int,
        obj: *const c_double,
        lb: *const c_double,
        ub: *const c_double,
        xctype: *const c_char,
        colname: *mut *mut c_char,
    ) -> c_int;
    pub fn CPXnewrows(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        rcnt: c_int,
        rhs: *const c_double,
        sense: *const c_char,
        rngval: *const c_double,
        rowname: *mut *mut c_char,
    ) -> c_int;
    pub fn CPXaddrows(
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
        rowname: *mut *mut c_char,
    ) -> c_int;
    pub fn CPXdelrows(env: CpxEnvPtr, lp: CpxLpPtr, begin: c_int, end: c_int) -> c_int;
    pub fn CPXchgobj(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        cnt: c_int,
        indices: *const c_int,
        values: *const c_double,
    ) -> c_int;
    pub fn CPXchgcoef(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        i: c_int,
        j: c_int,
        newvalue: c_double,
    ) -> c_int;
    pub fn CPXchgcoeflist(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        numcoefs: c_int,
        rowlist: *const c_int,
        collist: *const c_int,
        vallist: *const c_double,
    ) -> c_int;
    pub fn CPXchgbds(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        cnt: c_int,
        indices: *const c_int,
        lu: *const c_char,
        bd: *const c_double,
    ) -> c_int;
    pub fn CPXcopyctype(env: CpxEnvPtr, lp: CpxLpPtr, xctype: *const c_char) -> c_int;
    pub fn CPXcopyquad(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        qmatbeg: *const c_int,
        qmatcnt: *const c_int,
        qmatind: *const c_int,
        qmatval: *const c_double,
    ) -> c_int;
    pub fn CPXaddsos(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        numsos: c_int,
        numsosnz: c_int,
        sostype: *const c_char,
        sosbeg: *const c_int,
        sosind: *const c_int,
        soswt: *const c_double,
        sosname: *mut *mut c_char,
    ) -> c_int;
    pub fn CPXdelsetsos(env: CpxEnvPtr, lp: CpxLpPtr, delset: *mut c_int) -> c_int;
    pub fn CPXcopymipstart(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        cnt: c_int,
        indices: *const c_int,
        values: *const c_double,
    ) -> c_int;
    pub fn CPXcopybase(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        cstat: *const c_int,
        rstat: *const c_int,
    ) -> c_int;

    // Solving.
    pub fn CPXlpopt(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int;
    pub fn CPXqpopt(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int;
    pub fn CPXmipopt(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int;

    // Queries.
    pub fn CPXgetprobtype(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int;
    pub fn CPXgetnumcols(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int;
    pub fn CPXgetnumrows(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int;
    pub fn CPXgetstat(env: CpxEnvPtr, lp: CpxLpPtr) -> c_int;
    pub fn CPXgetx(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        x: *mut c_double,
        begin: c_int,
        end: c_int,
    ) -> c_int;
    pub fn CPXgetmipx(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        x: *mut c_double,
        begin: c_int,
        end: c_int,
    ) -> c_int;
    pub fn CPXgetslack(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        slack: *mut c_double,
        begin: c_int,
        end: c_int,
    ) -> c_int;
    pub fn CPXgetpi(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        pi: *mut c_double,
        begin: c_int,
        end: c_int,
    ) -> c_int;
    pub fn CPXgetdj(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        dj: *mut c_double,
        begin: c_int,
        end: c_int,
    ) -> c_int;
    pub fn CPXgetobjval(env: CpxEnvPtr, lp: CpxLpPtr, objval_p: *mut c_double) -> c_int;
    pub fn CPXgetmipobjval(env: CpxEnvPtr, lp: CpxLpPtr, objval_p: *mut c_double) -> c_int;
    pub fn CPXgetbase(
        env: CpxEnvPtr,
        lp: CpxLpPtr,
        cstat: *mut c_int,
        rstat: *mut c_int,
    ) -> c_int;
}
