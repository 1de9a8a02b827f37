//! Real roots of cubic polynomials in closed form.

use std::f64::consts::PI;

const EPS: f64 = 1e-12;

/// Real roots of `c3*u^3 + c2*u^2 + c1*u + c0`, ascending and deduplicated.
///
/// Vanishing leading coefficients degrade to the quadratic and linear cases.
/// An identically zero polynomial reports no isolated roots.
pub(crate) fn real_roots(c3: f64, c2: f64, c1: f64, c0: f64) -> Vec<f64> {
    let scale = c3.abs().max(c2.abs()).max(c1.abs()).max(c0.abs());
    if scale == 0.0 {
        return Vec::new();
    }
    if c3.abs() <= EPS * scale {
        return quadratic_roots(c2, c1, c0, scale);
    }

    let a = c2 / c3;
    let b = c1 / c3;
    let c = c0 / c3;

    // depressed form v^3 + p*v + q with u = v - a/3
    let shift = a / 3.0;
    let p = b - a * a / 3.0;
    let q = 2.0 * a * a * a / 27.0 - a * b / 3.0 + c;

    let half_q = 0.5 * q;
    let third_p = p / 3.0;
    let disc = half_q * half_q + third_p * third_p * third_p;
    let disc_tol = EPS * (half_q * half_q + (third_p * third_p * third_p).abs());

    let mut roots = Vec::with_capacity(3);
    if disc > disc_tol {
        let sqrt_disc = disc.sqrt();
        let v = (-half_q + sqrt_disc).cbrt() + (-half_q - sqrt_disc).cbrt();
        roots.push(v - shift);
    } else if disc < -disc_tol {
        let radius = (-third_p).sqrt();
        let phi = (-half_q / (radius * radius * radius)).clamp(-1.0, 1.0).acos();
        for i in 0..3 {
            let v = 2.0 * radius * ((phi + 2.0 * PI * i as f64) / 3.0).cos();
            roots.push(v - shift);
        }
    } else if p.abs() <= EPS * (1.0 + a * a) {
        // triple root
        roots.push(-shift);
    } else {
        roots.push(3.0 * q / p - shift);
        roots.push(-1.5 * q / p - shift);
    }

    for root in roots.iter_mut() {
        polish(c3, c2, c1, c0, root);
    }
    roots.sort_by(f64::total_cmp);
    roots.dedup_by(|second, first| (*second - *first).abs() <= 1e-8 * (1.0 + first.abs()));
    roots
}

fn quadratic_roots(c2: f64, c1: f64, c0: f64, scale: f64) -> Vec<f64> {
    if c2.abs() <= EPS * scale {
        if c1.abs() <= EPS * scale {
            return Vec::new();
        }
        return vec![-c0 / c1];
    }

    let disc = c1 * c1 - 4.0 * c2 * c0;
    if disc < 0.0 {
        return Vec::new();
    }
    if disc == 0.0 {
        return vec![-c1 / (2.0 * c2)];
    }

    // the larger-magnitude root first, its cofactor second
    let q = -0.5 * (c1 + c1.signum() * disc.sqrt());
    let mut roots = vec![q / c2, c0 / q];
    roots.sort_by(f64::total_cmp);
    roots
}

/// One short Newton pass tightening a closed-form root.
fn polish(c3: f64, c2: f64, c1: f64, c0: f64, root: &mut f64) {
    for _ in 0..2 {
        let u = *root;
        let value = ((c3 * u + c2) * u + c1) * u + c0;
        let slope = (3.0 * c3 * u + 2.0 * c2) * u + c1;
        if slope.abs() <= f64::MIN_POSITIVE {
            return;
        }
        let step = value / slope;
        if !step.is_finite() {
            return;
        }
        *root = u - step;
    }
}
