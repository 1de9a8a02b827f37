use crate::basis;
use crate::cubic;
use crate::error::{SplineError, SplineResult};
use crate::extrapolation::Extrapolation;

/// Fitted univariate B-spline.
///
/// A value of this type is immutable; [Spline::derivative] and
/// [Spline::antiderivative] produce new splines instead of modifying the
/// receiver, so a spline can be evaluated concurrently without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    t: Vec<f64>,
    c: Vec<f64>,
    k: usize,
    ext: Extrapolation,
    residual: f64,
}

impl Spline {
    pub(crate) fn from_parts(t: Vec<f64>, c: Vec<f64>, k: usize, ext: Extrapolation) -> Self {
        Spline {
            t,
            c,
            k,
            ext,
            residual: 0.0,
        }
    }

    pub(crate) fn with_residual(mut self, residual: f64) -> Self {
        self.residual = residual;
        self
    }

    pub fn degree(&self) -> usize {
        self.k
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.ext
    }

    /// Fitted domain `[t[k], t[n-k-1]]`.
    pub fn domain(&self) -> (f64, f64) {
        (self.t[self.k], self.t[self.t.len() - self.k - 1])
    }

    /// Knot sequence with the duplicated boundary knots stripped.
    pub fn knots(&self) -> &[f64] {
        &self.t[self.k..self.t.len() - self.k]
    }

    /// Active B-spline coefficients.
    pub fn coefficients(&self) -> &[f64] {
        &self.c
    }

    /// Sum of squared residuals of the fit. Approximately zero for an
    /// interpolating spline.
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// Spline value at a single point under the stored extrapolation mode.
    pub fn value(&self, x: f64) -> SplineResult<f64> {
        let values = self.evaluate_with(std::slice::from_ref(&x), 0, None)?;
        Ok(values[0])
    }

    /// Spline values at `points` under the stored extrapolation mode.
    pub fn evaluate(&self, points: &[f64]) -> SplineResult<Vec<f64>> {
        self.evaluate_with(points, 0, None)
    }

    /// Values of the `derivative_order`-th derivative at `points`.
    ///
    /// A `mode` override applies to this call only; `None` uses the mode
    /// stored at fit time. Derivative orders above the degree evaluate to
    /// zero. Empty input returns an empty result.
    /// # Errors
    /// [SplineError::OutOfDomain] for points outside the domain under the
    /// [Extrapolation::Raise] mode.
    pub fn evaluate_with(
        &self,
        points: &[f64],
        derivative_order: usize,
        mode: Option<Extrapolation>,
    ) -> SplineResult<Vec<f64>> {
        if points.is_empty() {
            return Ok(Vec::new());
        }

        let mode = mode.unwrap_or(self.ext);
        let (lo, hi) = self.domain();
        let reduced = if derivative_order > 0 {
            Some(self.derivative(derivative_order))
        } else {
            None
        };
        let target = reduced.as_ref().unwrap_or(self);

        let mut results = Vec::with_capacity(points.len());
        for &point in points {
            if point >= lo && point <= hi {
                results.push(target.point_value(point));
                continue;
            }
            match mode {
                Extrapolation::Extrapolate => results.push(target.point_value(point)),
                Extrapolation::Zeros => results.push(0.0),
                Extrapolation::Raise => {
                    return Err(SplineError::OutOfDomain {
                        point,
                        min: lo,
                        max: hi,
                    })
                }
                Extrapolation::Const => results.push(target.point_value(point.clamp(lo, hi))),
            }
        }
        Ok(results)
    }

    /// Definite integral over `[a, b]`.
    ///
    /// The spline is taken as identically zero outside its domain, so the
    /// integration limits clamp to the domain boundaries. Swapped limits
    /// negate the result.
    pub fn integrate(&self, a: f64, b: f64) -> f64 {
        let (lo, hi) = self.domain();
        let antiderivative = self.antiderivative(1);
        antiderivative.point_value(b.clamp(lo, hi)) - antiderivative.point_value(a.clamp(lo, hi))
    }

    /// New spline representing the `order`-th derivative.
    ///
    /// The degree drops by `order`, flooring at zero with vanishing
    /// coefficients. A stored [Extrapolation::Const] mode downgrades to
    /// [Extrapolation::Zeros]; other modes carry over.
    pub fn derivative(&self, order: usize) -> Spline {
        let mut t = self.t.clone();
        let mut c = self.c.clone();
        let mut k = self.k;

        for _ in 0..order {
            if k == 0 {
                for coefficient in c.iter_mut() {
                    *coefficient = 0.0;
                }
                break;
            }
            let mut next = Vec::with_capacity(c.len() - 1);
            for i in 0..c.len() - 1 {
                let dt = t[i + k + 1] - t[i + 1];
                if dt > 0.0 {
                    next.push(k as f64 * (c[i + 1] - c[i]) / dt);
                } else {
                    next.push(0.0);
                }
            }
            t = t[1..t.len() - 1].to_vec();
            c = next;
            k -= 1;
        }

        let ext = if order > 0 && self.ext == Extrapolation::Const {
            Extrapolation::Zeros
        } else {
            self.ext
        };
        Spline::from_parts(t, c, k, ext)
    }

    /// New spline representing the `order`-th antiderivative, of degree
    /// `k + order`, with the same extrapolation mode.
    pub fn antiderivative(&self, order: usize) -> Spline {
        let mut t = self.t.clone();
        let mut c = self.c.clone();
        let mut k = self.k;

        for _ in 0..order {
            let mut next = Vec::with_capacity(c.len() + 1);
            let mut accumulated = 0.0;
            next.push(0.0);
            for i in 0..c.len() {
                accumulated += c[i] * (t[i + k + 1] - t[i]) / (k + 1) as f64;
                next.push(accumulated);
            }

            let mut padded = Vec::with_capacity(t.len() + 2);
            padded.push(t[0]);
            padded.extend_from_slice(&t);
            padded.push(t[t.len() - 1]);

            t = padded;
            c = next;
            k += 1;
        }

        Spline::from_parts(t, c, k, self.ext)
    }

    /// All derivative orders `0..=k` evaluated at one point.
    /// # Errors
    /// [SplineError::OutOfDomain] when `x` lies outside the domain.
    pub fn derivatives_at(&self, x: f64) -> SplineResult<Vec<f64>> {
        let (lo, hi) = self.domain();
        if !(x >= lo && x <= hi) {
            return Err(SplineError::OutOfDomain {
                point: x,
                min: lo,
                max: hi,
            });
        }

        let mut orders = Vec::with_capacity(self.k + 1);
        orders.push(self.point_value(x));
        let mut current: Option<Spline> = None;
        for _ in 1..=self.k {
            let next = current.as_ref().unwrap_or(self).derivative(1);
            orders.push(next.point_value(x));
            current = Some(next);
        }
        Ok(orders)
    }

    /// Roots of a cubic spline inside its domain, ascending, deduplicated
    /// across shared span boundaries.
    /// # Errors
    /// [SplineError::UnsupportedOperation] for splines of any other degree.
    pub fn roots(&self) -> SplineResult<Vec<f64>> {
        if self.k != 3 {
            return Err(SplineError::UnsupportedOperation {
                operation: "finding roots is unsupported for non-cubic splines".to_string(),
            });
        }

        let (lo, hi) = self.domain();
        let tolerance = 1e-8 * (hi - lo).max(1.0);
        let first_derivative = self.derivative(1);
        let second_derivative = first_derivative.derivative(1);
        let third_derivative = second_derivative.derivative(1);

        let mut found = Vec::new();
        for span in self.k..self.t.len() - self.k - 1 {
            let (left, right) = (self.t[span], self.t[span + 1]);
            if right <= left {
                continue;
            }

            // each span is one cubic polynomial; expand it exactly about
            // the span midpoint
            let mid = 0.5 * (left + right);
            let d0 = self.point_value(mid);
            let d1 = first_derivative.point_value(mid);
            let d2 = second_derivative.point_value(mid);
            let d3 = third_derivative.point_value(mid);

            for offset in cubic::real_roots(d3 / 6.0, d2 / 2.0, d1, d0) {
                let root = mid + offset;
                if root >= left - tolerance && root <= right + tolerance {
                    found.push(root.clamp(lo, hi));
                }
            }
        }

        found.sort_by(f64::total_cmp);
        found.dedup_by(|second, first| (*second - *first).abs() <= tolerance);
        Ok(found)
    }

    fn point_value(&self, x: f64) -> f64 {
        let span = basis::find_span(&self.t, self.k, x);
        let values = basis::basis_values(&self.t, self.k, span, x);

        let first = span - self.k;
        values
            .iter()
            .enumerate()
            .map(|(j, value)| value * self.c[first + j])
            .sum()
    }
}
