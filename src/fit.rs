use nalgebra::{DMatrix, DVector};

use crate::basis;
use crate::error::{SplineError, SplineResult};
use crate::extrapolation::Extrapolation;
use crate::spline::Spline;

/// Relative residual above which a solved fit is classified as degenerate.
const DEGENERATE_RESIDUAL: f64 = 1e-8;

/// Outcome of a fit: the solved spline, tagged with whether the residual
/// stayed within interpolation precision.
///
/// `Degenerate` signals numerically degraded but structurally valid input
/// (e.g. nearly coincident abscissas); the spline is still usable.
#[derive(Debug, Clone, PartialEq)]
pub enum FitOutcome {
    Fitted(Spline),
    Degenerate(Spline),
}

impl FitOutcome {
    pub fn spline(&self) -> &Spline {
        match self {
            Self::Fitted(spline) | Self::Degenerate(spline) => spline,
        }
    }

    pub fn into_spline(self) -> Spline {
        match self {
            Self::Fitted(spline) | Self::Degenerate(spline) => spline,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate(_))
    }
}

/// Builder for interpolating spline fits.
///
/// A fit of degree `k` through `m >= k+1` samples with strictly increasing
/// abscissas produces a spline passing exactly through every sample.
/// # Example
/// ```
/// use assert_approx_eq::assert_approx_eq;
/// use interp_spline::Fitter;
///
/// let x = vec![0.0, 1.0, 2.0, 3.0];
/// let y = vec![1.0, -1.0, 0.5, 2.0];
/// let spline = Fitter::new(3).fit(&x, &y).unwrap().into_spline();
///
/// assert_approx_eq!(-1.0, spline.value(1.0).unwrap(), 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Fitter {
    degree: usize,
    weights: Option<Vec<f64>>,
    bounds: Option<(f64, f64)>,
    extrapolation: Extrapolation,
    check_finite: bool,
}

impl Fitter {
    pub fn new(degree: usize) -> Self {
        Fitter {
            degree,
            weights: None,
            bounds: None,
            extrapolation: Extrapolation::default(),
            check_finite: false,
        }
    }

    /// Sample weights. Retained for the smoothing variant of the fit; an
    /// exact interpolation reproduces the samples regardless of weighting.
    pub fn weights(mut self, weights: &[f64]) -> Self {
        self.weights = Some(weights.to_vec());
        self
    }

    /// Fit interval boundaries. Defaults to the sample range; wider bounds
    /// extend the spline domain beyond the outermost samples.
    pub fn bounds(mut self, lo: f64, hi: f64) -> Self {
        self.bounds = Some((lo, hi));
        self
    }

    /// Extrapolation mode stored on the fitted spline.
    pub fn extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Reject non-finite values in x, y and weights before fitting.
    pub fn check_finite(mut self, check_finite: bool) -> Self {
        self.check_finite = check_finite;
        self
    }

    /// Fits an interpolating spline through `(x, y)`.
    ///
    /// Validation runs before any numeric work; every rejected condition
    /// maps to its own [SplineError] variant and no partial spline is
    /// returned.
    /// # Errors
    /// - [SplineError::NonFiniteInput] when finiteness checking is on and
    ///   any input value is NaN or infinite,
    /// - [SplineError::NotStrictlyIncreasing] unless `x[i] < x[i+1]`,
    /// - [SplineError::LengthMismatch] when x, y or weights lengths differ,
    /// - [SplineError::InvalidBounds] for bounds that are non-finite,
    ///   reversed, or do not enclose the samples,
    /// - [SplineError::InvalidDegree] for a degree outside `[1, 5]` or
    ///   fewer than `degree + 1` samples,
    /// - [SplineError::Solver] when the collocation system is singular.
    pub fn fit(&self, x: &[f64], y: &[f64]) -> SplineResult<FitOutcome> {
        if self.check_finite {
            let weights_finite = self
                .weights
                .as_ref()
                .map_or(true, |weights| weights.iter().all(|w| w.is_finite()));
            if !x.iter().all(|v| v.is_finite())
                || !y.iter().all(|v| v.is_finite())
                || !weights_finite
            {
                return Err(SplineError::NonFiniteInput);
            }
        }

        if let Some(position) = x.windows(2).position(|pair| !(pair[0] < pair[1])) {
            return Err(SplineError::NotStrictlyIncreasing {
                index: position + 1,
            });
        }

        if x.len() != y.len() {
            return Err(SplineError::LengthMismatch {
                x: x.len(),
                y: y.len(),
                weights: None,
            });
        }
        if let Some(weights) = &self.weights {
            if weights.len() != x.len() {
                return Err(SplineError::LengthMismatch {
                    x: x.len(),
                    y: y.len(),
                    weights: Some(weights.len()),
                });
            }
        }

        if let Some((lo, hi)) = self.bounds {
            let encloses = !x.is_empty() && lo <= x[0] && hi >= x[x.len() - 1];
            if !lo.is_finite() || !hi.is_finite() || lo >= hi || !encloses {
                return Err(SplineError::InvalidBounds { lo, hi });
            }
        }

        if !(1..=5).contains(&self.degree) || x.len() < self.degree + 1 {
            return Err(SplineError::InvalidDegree {
                degree: self.degree,
                points: x.len(),
            });
        }

        let (lo, hi) = self.bounds.unwrap_or((x[0], x[x.len() - 1]));
        let k = self.degree;
        let m = x.len();
        let t = basis::interpolating_knots(x, k, lo, hi);

        let mut matrix = DMatrix::<f64>::zeros(m, m);
        let mut rhs = DVector::<f64>::zeros(m);
        for (row, (&xi, &yi)) in x.iter().zip(y).enumerate() {
            let span = basis::find_span(&t, k, xi);
            let values = basis::basis_values(&t, k, span, xi);
            for (j, &value) in values.iter().enumerate() {
                matrix[(row, span - k + j)] = value;
            }
            rhs[row] = yi;
        }

        let solution = match matrix.lu().solve(&rhs) {
            Some(solution) => solution,
            None => {
                return Err(SplineError::Solver {
                    message: "error while solving the collocation system".to_string(),
                })
            }
        };
        let c: Vec<f64> = solution.iter().copied().collect();

        let spline = Spline::from_parts(t, c, k, self.extrapolation);
        let fitted = spline.evaluate_with(x, 0, Some(Extrapolation::Extrapolate))?;
        let residual: f64 = fitted
            .iter()
            .zip(y)
            .map(|(value, sample)| (value - sample) * (value - sample))
            .sum();
        let spline = spline.with_residual(residual);

        let reference = y.iter().map(|v| v * v).sum::<f64>().max(f64::EPSILON);
        if residual / reference > DEGENERATE_RESIDUAL {
            Ok(FitOutcome::Degenerate(spline))
        } else {
            Ok(FitOutcome::Fitted(spline))
        }
    }
}

/// Refits against new data with a changed smoothing factor, returning a new
/// spline instead of rewriting the existing one.
///
/// Only the zero-smoothing, exact-interpolation path is available; the
/// spline's degree and extrapolation mode carry over.
/// # Errors
/// - [SplineError::InvalidSmoothing] for a negative smoothing factor,
/// - [SplineError::UnsupportedOperation] for a positive one,
/// - any fit error for the new data.
pub fn refit(x: &[f64], y: &[f64], spline: &Spline, smoothing: f64) -> SplineResult<FitOutcome> {
    if !(smoothing >= 0.0) {
        return Err(SplineError::InvalidSmoothing { smoothing });
    }
    if smoothing > 0.0 {
        return Err(SplineError::UnsupportedOperation {
            operation: "smoothing fits are not supported; only exact interpolation".to_string(),
        });
    }

    Fitter::new(spline.degree())
        .extrapolation(spline.extrapolation())
        .fit(x, y)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::Rng;

    use super::*;

    #[test]
    fn fit_reproduces_samples_for_each_degree() {
        let x = vec![0.0, 0.8, 1.7, 3.0, 4.2, 5.5, 6.1, 7.4, 8.0];
        let y = vec![1.0, -2.5, 0.3, 4.0, 3.1, -1.0, 2.2, 0.0, 5.5];

        for degree in 1..=5 {
            let spline = Fitter::new(degree).fit(&x, &y).unwrap().into_spline();
            let values = spline.evaluate(&x).unwrap();
            for (value, sample) in values.iter().zip(&y) {
                assert_approx_eq!(sample, value, 1e-9);
            }
        }
    }

    #[test]
    fn fit_reproduces_random_samples() {
        let mut rng = rand::thread_rng();
        let x: Vec<f64> = (0..12).map(|i| i as f64 + rng.gen_range(0.0..0.5)).collect();

        for degree in [1, 2, 3] {
            let y: Vec<f64> = (0..12).map(|_| rng.gen_range(-10.0..10.0)).collect();
            let spline = Fitter::new(degree).fit(&x, &y).unwrap().into_spline();
            let values = spline.evaluate(&x).unwrap();
            for (value, sample) in values.iter().zip(&y) {
                assert_approx_eq!(sample, value, 1e-8);
            }
        }
    }

    #[test]
    fn quadratic_fit_reproduces_a_parabola_between_samples() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();
        let spline = Fitter::new(2).fit(&x, &y).unwrap().into_spline();

        for i in 0..=40 {
            let point = 0.1 * i as f64;
            assert_approx_eq!(point * point, spline.value(point).unwrap(), 1e-9);
        }
    }

    #[test]
    fn duplicate_abscissas_are_rejected() {
        let result = Fitter::new(1).fit(&[1.0, 1.0, 2.0], &[0.0, 1.0, 2.0]);

        assert_eq!(
            Err(SplineError::NotStrictlyIncreasing { index: 1 }),
            result
        );
    }

    #[test]
    fn decreasing_abscissas_are_rejected() {
        let result = Fitter::new(1).fit(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0]);

        assert_eq!(
            Err(SplineError::NotStrictlyIncreasing { index: 2 }),
            result
        );
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let result = Fitter::new(1).fit(&[1.0, 2.0, 3.0], &[1.0, 2.0]);

        assert_eq!(
            Err(SplineError::LengthMismatch {
                x: 3,
                y: 2,
                weights: None,
            }),
            result
        );
    }

    #[test]
    fn weight_length_mismatch_is_rejected() {
        let result = Fitter::new(1)
            .weights(&[1.0, 1.0])
            .fit(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);

        assert_eq!(
            Err(SplineError::LengthMismatch {
                x: 3,
                y: 3,
                weights: Some(2),
            }),
            result
        );
    }

    #[test]
    fn non_finite_input_is_rejected_when_checked() {
        let x = vec![0.0, 1.0, 2.0];
        let y = vec![0.0, f64::NAN, 2.0];

        let checked = Fitter::new(1).check_finite(true).fit(&x, &y);
        assert_eq!(Err(SplineError::NonFiniteInput), checked);

        // finiteness of y is not enforced without the flag
        assert!(Fitter::new(1).fit(&x, &y).is_ok());
    }

    #[test]
    fn malformed_bounds_are_rejected() {
        let x = vec![0.0, 1.0, 2.0];
        let y = vec![0.0, 1.0, 2.0];

        let reversed = Fitter::new(1).bounds(3.0, -1.0).fit(&x, &y);
        assert_eq!(
            Err(SplineError::InvalidBounds { lo: 3.0, hi: -1.0 }),
            reversed
        );

        let not_enclosing = Fitter::new(1).bounds(0.5, 2.0).fit(&x, &y);
        assert_eq!(
            Err(SplineError::InvalidBounds { lo: 0.5, hi: 2.0 }),
            not_enclosing
        );
    }

    #[test]
    fn wider_bounds_extend_the_domain() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![0.0, 1.0, 2.0, 3.0];
        let spline = Fitter::new(1)
            .bounds(-1.0, 5.0)
            .fit(&x, &y)
            .unwrap()
            .into_spline();

        assert_eq!((-1.0, 5.0), spline.domain());
        let values = spline.evaluate(&x).unwrap();
        for (value, sample) in values.iter().zip(&y) {
            assert_approx_eq!(sample, value, 1e-9);
        }
    }

    #[test]
    fn degree_outside_range_is_rejected() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = vec![0.0; 7];

        for degree in [0, 6] {
            let result = Fitter::new(degree).fit(&x, &y);
            assert_eq!(
                Err(SplineError::InvalidDegree { degree, points: 7 }),
                result
            );
        }
    }

    #[test]
    fn insufficient_points_for_degree_are_rejected() {
        let result = Fitter::new(3).fit(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]);

        assert_eq!(
            Err(SplineError::InvalidDegree {
                degree: 3,
                points: 3,
            }),
            result
        );
    }

    #[test]
    fn clean_fit_is_not_degenerate() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![1.0, 2.0, 0.5, -1.0];

        let outcome = Fitter::new(3).fit(&x, &y).unwrap();

        assert!(!outcome.is_degenerate());
        assert_eq!(3, outcome.spline().degree());
    }

    #[test]
    fn weights_do_not_change_an_exact_interpolation() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![1.0, 2.0, 0.5, -1.0];

        let plain = Fitter::new(3).fit(&x, &y).unwrap().into_spline();
        let weighted = Fitter::new(3)
            .weights(&[1.0, 5.0, 0.1, 2.0])
            .fit(&x, &y)
            .unwrap()
            .into_spline();

        for i in 0..=30 {
            let point = 0.1 * i as f64;
            assert_approx_eq!(
                plain.value(point).unwrap(),
                weighted.value(point).unwrap(),
                1e-12
            );
        }
    }

    #[test]
    fn refit_validates_the_smoothing_factor() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![1.0, 2.0, 0.5, -1.0];
        let spline = Fitter::new(3).fit(&x, &y).unwrap().into_spline();

        assert_eq!(
            Err(SplineError::InvalidSmoothing { smoothing: -1.0 }),
            refit(&x, &y, &spline, -1.0)
        );
        assert!(matches!(
            refit(&x, &y, &spline, 0.5),
            Err(SplineError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn refit_with_zero_smoothing_reinterpolates() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![1.0, 2.0, 0.5, -1.0];
        let spline = Fitter::new(2)
            .extrapolation(Extrapolation::Const)
            .fit(&x, &y)
            .unwrap()
            .into_spline();

        let shifted: Vec<f64> = y.iter().map(|v| v + 1.0).collect();
        let refitted = refit(&x, &shifted, &spline, 0.0).unwrap().into_spline();

        assert_eq!(2, refitted.degree());
        assert_eq!(Extrapolation::Const, refitted.extrapolation());
        assert_approx_eq!(3.0, refitted.value(1.0).unwrap(), 1e-9);
    }
}
