use dalitz_core::{Complex, Real};

/// Squared breakup momentum of `R → a b` in the rest frame of `R`:
/// `(M² − (m_a + m_b)²)(M² − (m_a − m_b)²) / (4 M²)`.
///
/// Negative below threshold.
pub fn p2<T: Real>(m2_parent: T, m_a: T, m_b: T) -> T {
    let sum = m_a + m_b;
    let diff = m_a - m_b;
    (m2_parent - sum * sum) * (m2_parent - diff * diff) / (T::from_f64(4.0) * m2_parent)
}

/// Breakup momentum continued below threshold: `(√p², 0)` for `p² ≥ 0`,
/// otherwise `(0, √−p²)`.
pub fn complex_p<T: Real>(m2_parent: T, m_a: T, m_b: T) -> Complex<T> {
    let q2 = p2(m2_parent, m_a, m_b);
    if q2 >= T::zero() {
        Complex::new(q2.sqrt(), T::zero())
    } else {
        Complex::new(T::zero(), (-q2).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_decay_reduces_to_quarter_mass_minus_daughter() {
        let m = 0.13957_f64;
        let m2 = 0.77_f64 * 0.77;
        assert!((p2(m2, m, m) - (m2 / 4.0 - m * m)).abs() < 1e-15);
    }

    #[test]
    fn below_threshold_momentum_is_imaginary() {
        let k = 0.49368_f64;
        let q = complex_p(0.9_f64, k, k);
        assert_eq!(q.re, 0.0);
        assert!(q.im > 0.0);
        let q2 = p2(0.9, k, k);
        assert!((q.im * q.im + q2).abs() < 1e-15);
    }
}
