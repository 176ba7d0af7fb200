use dalitz_core::{Real, Wave};

use crate::breakup::p2;

/// Blatt-Weisskopf barrier factor for `R → a b` with orbital momentum `l`.
///
/// With `z = p²(m2_parent, m_a, m_b) · r²`:
/// `S → 1`, `P → √(2z / (z + 1))`, `D → √(13z² / ((z − 3)² + 9z))`.
/// Callers always use the ratio of two independent evaluations.
pub fn blatt_weisskopf<T: Real>(l: Wave, r2: T, m2_parent: T, m_a: T, m_b: T) -> T {
    let z = p2(m2_parent, m_a, m_b) * r2;
    match l {
        Wave::S => T::one(),
        Wave::P => (T::from_f64(2.0) * z / (z + T::one())).sqrt(),
        Wave::D => {
            let shifted = z - T::from_f64(3.0);
            (T::from_f64(13.0) * z * z / (shifted * shifted + T::from_f64(9.0) * z)).sqrt()
        }
    }
}
