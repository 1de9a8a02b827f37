//! Library of interpolating univariate B-splines. A fit of degree 1 to 5
//! passes exactly through every sample point; the fitted spline supports
//! evaluation with configurable extrapolation, derivatives, antiderivatives,
//! definite integrals and cubic root finding.
//!
//! # Example
//! ```
//! use assert_approx_eq::assert_approx_eq;
//! use interp_spline::Fitter;
//!
//! let x = vec![0.0, 1.0, 2.0, 3.0];
//! let y = vec![1.0, -1.0, 0.5, 2.0];
//! let spline = Fitter::new(3).fit(&x, &y).unwrap().into_spline();
//!
//! assert_approx_eq!(-1.0, spline.value(1.0).unwrap(), 1e-9);
//! assert_approx_eq!(0.5, spline.value(2.0).unwrap(), 1e-9);
//! ```

mod basis;
mod cubic;
mod error;
mod extrapolation;
mod fit;
mod spline;
mod sweep;

pub use error::{SplineError, SplineResult};
pub use extrapolation::Extrapolation;
pub use fit::{refit, FitOutcome, Fitter};
pub use spline::Spline;
pub use sweep::{order_sweep, OrderFit, SWEEP_DEGREES};
