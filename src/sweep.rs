use crate::error::SplineResult;
use crate::fit::Fitter;
use crate::spline::Spline;

/// Degrees fitted by [order_sweep].
pub const SWEEP_DEGREES: [usize; 3] = [1, 2, 3];

/// One fitted order of a sweep: the spline, its value at the query point,
/// and the sample sequence with the query point spliced in at its sorted
/// position, ready for plotting.
#[derive(Debug, Clone)]
pub struct OrderFit {
    pub degree: usize,
    pub value: f64,
    pub curve: Vec<(f64, f64)>,
    pub spline: Spline,
}

/// Fits interpolating splines of degree 1, 2 and 3 through the same samples
/// and reports the interpolated value at `x_new` for each.
///
/// The returned curves carry `(x_new, value)` inserted at its sorted
/// position, so a query below the first sample lands at the front instead
/// of being unreachable.
/// # Errors
/// Any fit error; at least 4 samples are required for the cubic order.
pub fn order_sweep(x: &[f64], y: &[f64], x_new: f64) -> SplineResult<Vec<OrderFit>> {
    let mut fits = Vec::with_capacity(SWEEP_DEGREES.len());

    for degree in SWEEP_DEGREES {
        let spline = Fitter::new(degree).fit(x, y)?.into_spline();
        let value = spline.value(x_new)?;

        let mut curve: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
        let position = x.partition_point(|&sample| sample < x_new);
        curve.insert(position, (x_new, value));

        fits.push(OrderFit {
            degree,
            value,
            curve,
            spline,
        });
    }
    Ok(fits)
}
