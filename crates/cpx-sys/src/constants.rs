//! Constants from `ilcplex/cplex.h` used by the wrapped surface.

use libc::c_int;

/// Value CPLEX treats as infinity in bound arrays.
pub const CPX_INFBOUND: f64 = 1.0e+20;

/// Objective sense: minimize.
pub const CPX_MIN: c_int = 1;
/// Objective sense: maximize.
pub const CPX_MAX: c_int = -1;

// Problem types reported by CPXgetprobtype.
pub const CPXPROB_LP: c_int = 0;
pub const CPXPROB_MILP: c_int = 1;
pub const CPXPROB_FIXEDMILP: c_int = 3;
pub const CPXPROB_QP: c_int = 5;
pub const CPXPROB_MIQP: c_int = 7;

// Continuous solution status codes.
pub const CPX_STAT_OPTIMAL: c_int = 1;
pub const CPX_STAT_UNBOUNDED: c_int = 2;
pub const CPX_STAT_INFEASIBLE: c_int = 3;
pub const CPX_STAT_ABORT_IT_LIM: c_int = 10;
pub const CPX_STAT_ABORT_TIME_LIM: c_int = 11;

// Mixed-integer solution status codes.
pub const CPXMIP_OPTIMAL: c_int = 101;
pub const CPXMIP_OPTIMAL_TOL: c_int = 102;
pub const CPXMIP_INFEASIBLE: c_int = 103;
pub const CPXMIP_UNBOUNDED: c_int = 118;
pub const CPXMIP_INForUNBD: c_int = 119;

// Parameter numbers.
pub const CPX_PARAM_ITLIM: c_int = 1020;
pub const CPX_PARAM_SCRIND: c_int = 1035;
pub const CPX_PARAM_TILIM: c_int = 1039;
pub const CPX_PARAM_DATACHECK: c_int = 1056;
pub const CPX_PARAM_THREADS: c_int = 1067;
pub const CPX_PARAM_EPGAP: c_int = 2009;

pub const CPX_ON: c_int = 1;
pub const CPX_OFF: c_int = 0;

// Basis status values for columns and rows.
pub const CPX_AT_LOWER: c_int = 0;
pub const CPX_BASIC: c_int = 1;
pub const CPX_AT_UPPER: c_int = 2;
pub const CPX_FREE_SUPER: c_int = 3;

// Variable types for CPXcopyctype / CPXnewcols.
pub const CPX_CONTINUOUS: u8 = b'C';
pub const CPX_BINARY: u8 = b'B';
pub const CPX_INTEGER: u8 = b'I';
pub const CPX_SEMICONT: u8 = b'S';

// Special ordered set types.
pub const CPX_TYPE_SOS1: u8 = b'1';
pub const CPX_TYPE_SOS2: u8 = b'2';

/// Minimum buffer size `CPXgeterrorstring` requires.
pub const CPXMESSAGEBUFSIZE: usize = 1024;

// Error codes surfaced by the wrapped calls.
pub const CPXERR_BAD_PARAM_NUM: c_int = 1013;
pub const CPXERR_INDEX_RANGE: c_int = 1200;
pub const CPXERR_NO_SOLN: c_int = 1217;
pub const CPXERR_FAIL_OPEN_WRITE: c_int = 1422;
pub const CPXERR_BAD_FILETYPE: c_int = 1424;
pub const CPXERR_NO_MEMORY: c_int = 1001;
pub const CPXERR_NULL_POINTER: c_int = 1004;
pub const CPXERR_NEGATIVE_SURPLUS: c_int = 1207;
pub const CPXERR_NOT_ONE_PROBLEM: c_int = 1023;
pub const CPXERR_NOT_MIP: c_int = 3003;
