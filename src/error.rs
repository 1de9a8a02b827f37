use std::error::Error;
use std::fmt::{self, Display};

/// Result type of fitting and evaluation operations.
pub type SplineResult<T> = Result<T, SplineError>;

/// Errors reported by spline fitting and evaluation.
///
/// Each failure condition is a distinct variant; invalid input is never
/// coerced into a nearby valid value.
#[derive(Debug, Clone, PartialEq)]
pub enum SplineError {
    /// x, y or weights contain NaN or infinity while finiteness checking
    /// was requested.
    NonFiniteInput,

    /// x values are not strictly increasing.
    NotStrictlyIncreasing { index: usize },

    /// x, y and weights lengths disagree.
    LengthMismatch {
        x: usize,
        y: usize,
        weights: Option<usize>,
    },

    /// Fit interval bounds are malformed or do not enclose the samples.
    InvalidBounds { lo: f64, hi: f64 },

    /// Degree outside `[1, 5]`, or too few points for the requested degree.
    InvalidDegree { degree: usize, points: usize },

    /// Smoothing factor is negative.
    InvalidSmoothing { smoothing: f64 },

    /// Extrapolation mode value is not one of the enumerated modes.
    UnknownExtrapolationMode { mode: String },

    /// Evaluation point lies outside the spline domain under the `Raise`
    /// extrapolation mode.
    OutOfDomain { point: f64, min: f64, max: f64 },

    /// Operation is not defined for this spline, e.g. root finding on a
    /// non-cubic spline.
    UnsupportedOperation { operation: String },

    /// The linear system solve for the spline coefficients failed.
    Solver { message: String },
}

impl Display for SplineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteInput => {
                write!(f, "x and y arrays must not contain NaNs or infs")
            }
            Self::NotStrictlyIncreasing { index } => {
                write!(f, "x must be strictly increasing (violated at index {})", index)
            }
            Self::LengthMismatch {
                x,
                y,
                weights: Some(w),
            } => {
                write!(
                    f,
                    "x, y, and weights should have a same length (got {}, {}, {})",
                    x, y, w
                )
            }
            Self::LengthMismatch { x, y, weights: None } => {
                write!(f, "x and y should have a same length (got {}, {})", x, y)
            }
            Self::InvalidBounds { lo, hi } => {
                write!(
                    f,
                    "bounds [{}, {}] must satisfy lo < hi and enclose the sample range",
                    lo, hi
                )
            }
            Self::InvalidDegree { degree, points } => {
                if (1..=5).contains(degree) {
                    write!(
                        f,
                        "at least {} points are required for a degree {} fit (got {})",
                        degree + 1,
                        degree,
                        points
                    )
                } else {
                    write!(f, "degree should be 1 <= k <= 5 (got {})", degree)
                }
            }
            Self::InvalidSmoothing { smoothing } => {
                write!(f, "smoothing factor should be >= 0.0 (got {})", smoothing)
            }
            Self::UnknownExtrapolationMode { mode } => {
                write!(f, "unknown extrapolation mode {}", mode)
            }
            Self::OutOfDomain { point, min, max } => {
                write!(
                    f,
                    "point {} is outside the spline domain [{}, {}]",
                    point, min, max
                )
            }
            Self::UnsupportedOperation { operation } => {
                write!(f, "unsupported operation: {}", operation)
            }
            Self::Solver { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl Error for SplineError {}
