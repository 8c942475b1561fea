//! Safe shim over the CPLEX callable library.
//!
//! This crate marshals arguments, invokes one native entry point per
//! operation, and translates status codes into structured errors. All
//! solving happens inside the wrapped library; nothing here implements an
//! algorithm.
//!
//! The handle hierarchy follows the native one: an [`Environment`] owns
//! the licensed session, and each [`Problem`] borrows its environment so
//! a problem can never outlive it. Both release their native resources on
//! drop; `close`/`free` are available when the release status matters.

use std::sync::Once;

use tracing::debug;

pub mod env;
pub mod error;
pub mod index;
pub mod probtype;
pub mod problem;
pub mod solution;

pub use env::Environment;
pub use error::{Error, Result};
pub use index::IndexValue;
pub use probtype::{ObjectiveSense, ProblemType};
pub use problem::Problem;
pub use solution::{SolutionStatus, Span};

static INIT: Once = Once::new();

/// Process-wide one-time bootstrap.
///
/// Idempotent; [`Environment::open`] calls this implicitly, so explicit
/// calls are only useful to control when the log line is emitted.
pub fn init() {
    INIT.call_once(|| {
        debug!(
            component = "cplex",
            operation = "init",
            status = "success",
            "CPLEX binding initialized"
        );
    });
}
