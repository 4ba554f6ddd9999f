//! Chebyshev series: Clenshaw evaluation and interpolation at Chebyshev nodes.
//!
//! All series are on the normalised interval `s ∈ [-1, 1]`; callers map
//! their time span onto it.

use std::f64::consts::PI;

/// Evaluate `Σ c_k T_k(s)` with the Clenshaw recurrence.
pub fn clenshaw(coeffs: &[f64], s: f64) -> f64 {
    let Some((&c0, rest)) = coeffs.split_first() else {
        return 0.0;
    };
    let two_s = 2.0 * s;
    let (mut b1, mut b2) = (0.0, 0.0);
    for &c in rest.iter().rev() {
        let b = two_s * b1 - b2 + c;
        b2 = b1;
        b1 = b;
    }
    s * b1 - b2 + c0
}

/// Evaluate `Σ c_k T_k'(s)`, the derivative with respect to `s`.
///
/// Forward recurrence on `T_k` and `T_k' = 2 T_{k-1} + 2s T_{k-1}' - T_{k-2}'`.
pub fn clenshaw_derivative(coeffs: &[f64], s: f64) -> f64 {
    if coeffs.len() < 2 {
        return 0.0;
    }
    let two_s = 2.0 * s;
    let (mut t_km2, mut t_km1) = (1.0, s);
    let (mut dt_km2, mut dt_km1) = (0.0, 1.0);
    let mut sum = coeffs[1];
    for &c in &coeffs[2..] {
        let t_k = two_s * t_km1 - t_km2;
        let dt_k = 2.0 * t_km1 + two_s * dt_km1 - dt_km2;
        sum += c * dt_k;
        (t_km2, t_km1) = (t_km1, t_k);
        (dt_km2, dt_km1) = (dt_km1, dt_k);
    }
    sum
}

/// The `n` Chebyshev-Gauss nodes `cos(π (k + ½) / n)`, in decreasing order.
pub fn chebyshev_nodes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|k| (PI * (k as f64 + 0.5) / n as f64).cos())
        .collect()
}

/// Interpolating coefficients from samples taken at [`chebyshev_nodes`].
///
/// `values[k]` must be the function at node `k`. The resulting series is
/// exact at every node.
pub fn coefficients_from_nodes(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let nf = n as f64;
    (0..n)
        .map(|j| {
            let sum: f64 = values
                .iter()
                .enumerate()
                .map(|(k, v)| v * (PI * j as f64 * (k as f64 + 0.5) / nf).cos())
                .sum();
            let scale = if j == 0 { 1.0 / nf } else { 2.0 / nf };
            scale * sum
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-13;

    #[test]
    fn empty_and_constant() {
        assert_eq!(clenshaw(&[], 0.3), 0.0);
        assert!((clenshaw(&[4.5], -0.9) - 4.5).abs() < EPS);
        assert_eq!(clenshaw_derivative(&[4.5], 0.2), 0.0);
    }

    #[test]
    fn cubic_matches_closed_form() {
        // T_3(s) = 4s^3 - 3s, T_3'(s) = 12s^2 - 3
        let c = [0.5, -1.0, 2.0, 0.75];
        for s in [-1.0, -0.3, 0.0, 0.6, 1.0] {
            let t2 = 2.0 * s * s - 1.0;
            let t3 = 4.0 * s * s * s - 3.0 * s;
            let v = c[0] + c[1] * s + c[2] * t2 + c[3] * t3;
            let dv = c[1] + c[2] * 4.0 * s + c[3] * (12.0 * s * s - 3.0);
            assert!((clenshaw(&c, s) - v).abs() < EPS);
            assert!((clenshaw_derivative(&c, s) - dv).abs() < EPS);
        }
    }

    #[test]
    fn interpolation_reproduces_polynomial() {
        let f = |s: f64| 3.0 - 2.0 * s + 0.5 * s * s * s;
        let nodes = chebyshev_nodes(6);
        let values: Vec<f64> = nodes.iter().map(|&s| f(s)).collect();
        let coeffs = coefficients_from_nodes(&values);
        for s in [-0.95, -0.2, 0.4, 0.99] {
            assert!((clenshaw(&coeffs, s) - f(s)).abs() < 1e-12);
        }
        // Degree 3 input: higher coefficients vanish.
        assert!(coeffs[4].abs() < 1e-12 && coeffs[5].abs() < 1e-12);
    }

    #[test]
    fn interpolation_of_sine_converges() {
        let nodes = chebyshev_nodes(18);
        let values: Vec<f64> = nodes.iter().map(|&s| (3.0 * s).sin()).collect();
        let coeffs = coefficients_from_nodes(&values);
        for i in 0..=20 {
            let s = -1.0 + i as f64 * 0.1;
            assert!((clenshaw(&coeffs, s) - (3.0 * s).sin()).abs() < 1e-9);
            assert!((clenshaw_derivative(&coeffs, s) - 3.0 * (3.0 * s).cos()).abs() < 1e-7);
        }
    }
}
