//! B-spline knot construction and basis evaluation shared by fitting and
//! evaluation.

/// Builds the knot vector for strict interpolation of `x` with degree `k`.
///
/// Boundary knots of multiplicity `k+1` sit at `lo` and `hi`. Interior knots
/// are the data points themselves for odd degrees and interval midpoints for
/// even degrees, which keeps the collocation system square and satisfies the
/// Schoenberg-Whitney conditions.
pub(crate) fn interpolating_knots(x: &[f64], k: usize, lo: f64, hi: f64) -> Vec<f64> {
    let m = x.len();
    let mut t = Vec::with_capacity(m + k + 1);

    t.extend(std::iter::repeat(lo).take(k + 1));
    if k % 2 == 1 {
        let offset = (k + 1) / 2;
        for j in 0..m - k - 1 {
            t.push(x[j + offset]);
        }
    } else {
        let offset = k / 2;
        for j in 0..m - k - 1 {
            t.push(0.5 * (x[j + offset] + x[j + offset + 1]));
        }
    }
    t.extend(std::iter::repeat(hi).take(k + 1));
    t
}

/// Index of the knot span containing `x`, clamped to `[k, n-k-2]`.
///
/// Clamping keeps points outside the domain on the boundary spans, so the
/// ordinary de Boor recurrence extends the boundary polynomials for them.
pub(crate) fn find_span(t: &[f64], k: usize, x: f64) -> usize {
    let last = t.len() - k - 2;
    if x >= t[last + 1] {
        return last;
    }
    if x <= t[k] {
        return k;
    }
    t.partition_point(|&knot| knot <= x)
        .saturating_sub(1)
        .clamp(k, last)
}

/// Values of the `k+1` basis functions that are nonzero on `span`,
/// evaluated at `x` with the Cox-de Boor recurrence.
///
/// Entry `j` is the value of basis function `span - k + j`. The recurrence
/// only divides by knot differences spanning the nonempty interval
/// `[t[span], t[span+1]]`, so no denominator can vanish.
pub(crate) fn basis_values(t: &[f64], k: usize, span: usize, x: f64) -> Vec<f64> {
    let mut values = vec![0.0; k + 1];
    let mut left = vec![0.0; k + 1];
    let mut right = vec![0.0; k + 1];

    values[0] = 1.0;
    for j in 1..=k {
        left[j] = x - t[span + 1 - j];
        right[j] = t[span + j] - x;

        let mut saved = 0.0;
        for r in 0..j {
            let temp = values[r] / (right[r + 1] + left[j - r]);
            values[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        values[j] = saved;
    }
    values
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn odd_degree_knots_sit_on_data_points() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

        let t1 = interpolating_knots(&x, 1, 0.0, 6.0);
        assert_eq!(
            vec![0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 6.0],
            t1
        );

        let t3 = interpolating_knots(&x, 3, 0.0, 6.0);
        assert_eq!(
            vec![0.0, 0.0, 0.0, 0.0, 2.0, 3.0, 4.0, 6.0, 6.0, 6.0, 6.0],
            t3
        );
    }

    #[test]
    fn even_degree_knots_sit_on_midpoints() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0];

        let t2 = interpolating_knots(&x, 2, 0.0, 4.0);
        assert_eq!(vec![0.0, 0.0, 0.0, 1.5, 2.5, 4.0, 4.0, 4.0], t2);
    }

    #[test]
    fn minimal_point_count_leaves_no_interior_knots() {
        let x = vec![0.0, 1.0, 2.0, 3.0];

        let t3 = interpolating_knots(&x, 3, 0.0, 3.0);
        assert_eq!(vec![0.0, 0.0, 0.0, 0.0, 3.0, 3.0, 3.0, 3.0], t3);
    }

    #[test]
    fn span_search_is_clamped_to_valid_spans() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let t = interpolating_knots(&x, 3, 0.0, 6.0);

        assert_eq!(3, find_span(&t, 3, -2.0));
        assert_eq!(3, find_span(&t, 3, 0.0));
        assert_eq!(3, find_span(&t, 3, 1.5));
        assert_eq!(4, find_span(&t, 3, 2.0));
        assert_eq!(6, find_span(&t, 3, 5.9));
        assert_eq!(6, find_span(&t, 3, 6.0));
        assert_eq!(6, find_span(&t, 3, 9.0));
    }

    #[test]
    fn basis_values_sum_to_one_inside_the_domain() {
        let x = vec![0.0, 0.7, 1.9, 3.0, 4.2, 5.5, 6.0];

        for k in 1..=5 {
            let t = interpolating_knots(&x, k, 0.0, 6.0);
            for i in 0..=60 {
                let point = 0.1 * i as f64;
                let span = find_span(&t, k, point);
                let values = basis_values(&t, k, span, point);

                assert_eq!(k + 1, values.len());
                let sum: f64 = values.iter().sum();
                assert_approx_eq!(1.0, sum, 1e-12);
            }
        }
    }

    #[test]
    fn linear_basis_is_a_hat_function() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let t = interpolating_knots(&x, 1, 0.0, 3.0);

        let span = find_span(&t, 1, 0.25);
        let values = basis_values(&t, 1, span, 0.25);
        assert_approx_eq!(0.75, values[0], 1e-12);
        assert_approx_eq!(0.25, values[1], 1e-12);
    }
}
