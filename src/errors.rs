//! Crate-wide error type for the OWLQN optimizer.
//!
//! All fallible operations in this crate return [`OwlqnResult<T>`]. Variants
//! carry the offending value and, where useful, a static reason string so
//! callers can report precise diagnostics without string formatting on the
//! happy path.

/// Crate-wide result alias for optimizer operations.
pub type OwlqnResult<T> = Result<T, OwlqnError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OwlqnError {
    // ---- Gradient ----
    /// Implies that finite differences should be used.
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite.
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Objective ----
    /// Objective returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Starting point ----
    /// The starting point must have dimension >= 1.
    EmptyPoint,

    /// Starting-point coordinates need to be finite.
    InvalidPoint {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// L1 strength must be finite and non-negative.
    InvalidL1Strength {
        value: f64,
        reason: &'static str,
    },

    // ---- OwlqnOptions ----
    /// History size needs to be at least 1.
    InvalidHistorySize {
        size: usize,
        reason: &'static str,
    },
    /// Sufficient-decrease coefficient must lie in (0, 1).
    InvalidLineSearchAlpha {
        alpha: f64,
        reason: &'static str,
    },
    /// Backtracking shrink factor must lie in (0, 1).
    InvalidLineSearchBeta {
        beta: f64,
        reason: &'static str,
    },
    /// Gradient-norm tolerance needs to be positive and finite.
    InvalidMinGradNorm {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// Maximum backtracking steps needs to be positive.
    InvalidMaxBacktracks {
        max_backtracks: usize,
        reason: &'static str,
    },

    // ---- Line search ----
    /// Backtracking exhausted its shrink budget without an acceptable step.
    LineSearchFailed {
        backtracks: usize,
        step_size: f64,
    },
}

impl std::error::Error for OwlqnError {}

impl std::fmt::Display for OwlqnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OwlqnError::GradientNotImplemented => {
                write!(f, "Analytic gradient not implemented")
            }
            OwlqnError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OwlqnError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- Objective ----
            OwlqnError::NonFiniteCost { value } => {
                write!(f, "Non-finite objective value: {value}")
            }

            // ---- Starting point ----
            OwlqnError::EmptyPoint => {
                write!(f, "Starting point must have dimension >= 1")
            }
            OwlqnError::InvalidPoint { index, value, reason } => {
                write!(f, "Invalid starting point at index {index}: {value}: {reason}")
            }
            OwlqnError::InvalidL1Strength { value, reason } => {
                write!(f, "Invalid L1 strength {value}: {reason}")
            }

            // ---- OwlqnOptions ----
            OwlqnError::InvalidHistorySize { size, reason } => {
                write!(f, "Invalid history size {size}: {reason}")
            }
            OwlqnError::InvalidLineSearchAlpha { alpha, reason } => {
                write!(f, "Invalid line-search alpha {alpha}: {reason}")
            }
            OwlqnError::InvalidLineSearchBeta { beta, reason } => {
                write!(f, "Invalid line-search beta {beta}: {reason}")
            }
            OwlqnError::InvalidMinGradNorm { tol, reason } => {
                write!(f, "Invalid gradient-norm tolerance {tol}: {reason}")
            }
            OwlqnError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OwlqnError::InvalidMaxBacktracks { max_backtracks, reason } => {
                write!(f, "Invalid maximum backtracks {max_backtracks}: {reason}")
            }

            // ---- Line search ----
            OwlqnError::LineSearchFailed { backtracks, step_size } => {
                write!(
                    f,
                    "Line search failed to find an acceptable step after {backtracks} \
                     backtracks (last step size {step_size:e})"
                )
            }
        }
    }
}
