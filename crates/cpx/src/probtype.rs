//! Problem-type and objective-sense classification.

use cpx_sys::{self as ffi, CpxInt};

use crate::error::{Error, Result};

/// Objective sense for optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    /// Minimize the objective.
    Minimize,
    /// Maximize the objective.
    Maximize,
}

impl ObjectiveSense {
    pub(crate) fn to_raw(self) -> CpxInt {
        match self {
            ObjectiveSense::Minimize => ffi::CPX_MIN,
            ObjectiveSense::Maximize => ffi::CPX_MAX,
        }
    }
}

/// Classification of a problem as the native library reports it.
///
/// Solve dispatch is driven entirely by this tag: linear problems go to
/// the LP optimizer, quadratic ones to the QP optimizer, and any problem
/// with integrality restrictions to the MIP optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType {
    /// Continuous linear program.
    Linear,
    /// Continuous quadratic program.
    Quadratic,
    /// Linear program with integrality restrictions.
    MixedInteger,
    /// Quadratic program with integrality restrictions.
    MixedIntegerQuadratic,
}

impl ProblemType {
    /// Maps a raw `CPXgetprobtype` code onto the tagged classification.
    pub(crate) fn from_raw(raw: CpxInt) -> Result<Self> {
        match raw {
            ffi::CPXPROB_LP => Ok(ProblemType::Linear),
            ffi::CPXPROB_QP => Ok(ProblemType::Quadratic),
            ffi::CPXPROB_MILP | ffi::CPXPROB_FIXEDMILP => Ok(ProblemType::MixedInteger),
            ffi::CPXPROB_MIQP => Ok(ProblemType::MixedIntegerQuadratic),
            other => Err(Error::UnsupportedProblemType(other)),
        }
    }

    /// Whether this type carries integrality restrictions.
    pub fn is_mip(self) -> bool {
        matches!(
            self,
            ProblemType::MixedInteger | ProblemType::MixedIntegerQuadratic
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_known_codes() {
        assert_eq!(
            ProblemType::from_raw(ffi::CPXPROB_LP).unwrap(),
            ProblemType::Linear
        );
        assert_eq!(
            ProblemType::from_raw(ffi::CPXPROB_MILP).unwrap(),
            ProblemType::MixedInteger
        );
        assert_eq!(
            ProblemType::from_raw(ffi::CPXPROB_FIXEDMILP).unwrap(),
            ProblemType::MixedInteger
        );
        assert_eq!(
            ProblemType::from_raw(ffi::CPXPROB_QP).unwrap(),
            ProblemType::Quadratic
        );
        assert_eq!(
            ProblemType::from_raw(ffi::CPXPROB_MIQP).unwrap(),
            ProblemType::MixedIntegerQuadratic
        );
    }

    #[test]
    fn test_from_raw_unknown_code() {
        let err = ProblemType::from_raw(99).unwrap_err();
        assert_eq!(err.code(), "PROBTYPE_UNSUPPORTED");
    }

    #[test]
    fn test_is_mip() {
        assert!(!ProblemType::Linear.is_mip());
        assert!(!ProblemType::Quadratic.is_mip());
        assert!(ProblemType::MixedInteger.is_mip());
        assert!(ProblemType::MixedIntegerQuadratic.is_mip());
    }

    #[test]
    fn test_sense_to_raw() {
        assert_eq!(ObjectiveSense::Minimize.to_raw(), ffi::CPX_MIN);
        assert_eq!(ObjectiveSense::Maximize.to_raw(), ffi::CPX_MAX);
    }
}
