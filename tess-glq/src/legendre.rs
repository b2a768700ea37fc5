//! Legendre polynomial evaluation
//!
//! The three-term recurrence used by the quadrature root-finder and the
//! closed-form weight formula.

/// Evaluate the Legendre polynomial P_n(x) and its derivative P'_n(x).
///
/// Uses the stable three-term recurrence:
/// ```text
/// n P_n(x) = (2n-1) x P_{n-1}(x) - (n-1) P_{n-2}(x)
/// ```
/// and the derivative relation:
/// ```text
/// (x² - 1) P'_n(x) = n (x P_n(x) - P_{n-1}(x))
/// ```
///
/// At the endpoints x = ±1 the derivative relation degenerates and the
/// special value `P'_n(±1) = (±1)^{n+1} n(n+1)/2` is used instead.
pub fn legendre_p_and_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }

    let mut p_prev = 1.0; // P_{k-1}
    let mut p = x; // P_k
    for k in 2..=n {
        let k_f64 = k as f64;
        let p_next = ((2.0 * k_f64 - 1.0) * x * p - (k_f64 - 1.0) * p_prev) / k_f64;
        p_prev = p;
        p = p_next;
    }

    let n_f64 = n as f64;
    let x2_minus_1 = x * x - 1.0;
    let dp = if x2_minus_1.abs() < 1e-14 {
        let sign: f64 = if x > 0.0 { 1.0 } else { -1.0 };
        sign.powi(n as i32 + 1) * n_f64 * (n_f64 + 1.0) / 2.0
    } else {
        n_f64 * (x * p - p_prev) / x2_minus_1
    };

    (p, dp)
}

/// Evaluate the single Legendre polynomial Pₙ(x).
pub fn legendre_p(n: usize, x: f64) -> f64 {
    legendre_p_and_derivative(n, x).0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_low_orders() {
        let x = 0.6;
        assert!((legendre_p(0, x) - 1.0).abs() < EPSILON);
        assert!((legendre_p(1, x) - x).abs() < EPSILON);
        let p2 = (3.0 * x * x - 1.0) / 2.0;
        assert!((legendre_p(2, x) - p2).abs() < EPSILON);
        let p3 = (5.0 * x * x * x - 3.0 * x) / 2.0;
        assert!((legendre_p(3, x) - p3).abs() < EPSILON);
    }

    #[test]
    fn test_value_at_endpoints() {
        // P_n(1) = 1, P_n(-1) = (-1)^n
        for n in 0..12 {
            assert!((legendre_p(n, 1.0) - 1.0).abs() < 1e-10, "P_{}(1)", n);
            let expected = if n % 2 == 0 { 1.0 } else { -1.0 };
            assert!(
                (legendre_p(n, -1.0) - expected).abs() < 1e-10,
                "P_{}(-1)",
                n
            );
        }
    }

    #[test]
    fn test_derivative_low_orders() {
        let x = -0.3;
        let (_, dp1) = legendre_p_and_derivative(1, x);
        assert!((dp1 - 1.0).abs() < EPSILON);
        let (_, dp2) = legendre_p_and_derivative(2, x);
        assert!((dp2 - 3.0 * x).abs() < EPSILON);
        let (_, dp3) = legendre_p_and_derivative(3, x);
        assert!((dp3 - (15.0 * x * x - 3.0) / 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_derivative_at_endpoints() {
        // P'_n(±1) = (±1)^{n+1} n(n+1)/2
        for n in 1..8 {
            let expected = (n * (n + 1)) as f64 / 2.0;
            let (_, dp) = legendre_p_and_derivative(n, 1.0);
            assert!((dp - expected).abs() < 1e-10, "P'_{}(1)", n);
            let (_, dp) = legendre_p_and_derivative(n, -1.0);
            let sign = if n % 2 == 0 { -1.0 } else { 1.0 };
            assert!((dp - sign * expected).abs() < 1e-10, "P'_{}(-1)", n);
        }
    }
}
