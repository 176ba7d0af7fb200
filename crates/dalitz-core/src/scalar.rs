//! Numeric scalar contract used by every formula in the engine.
//!
//! Formula code never names a concrete floating point type. It is written
//! against [`Real`], which `f32`, `f64` and the forward-mode [`Dual`] number
//! implement, so an external fitter can obtain analytic gradients by
//! instantiating the same code with a derivative-carrying scalar.

use core::cmp::Ordering;
use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

/// Arithmetic contract required by the amplitude formulas.
pub trait Real:
    Copy
    + Debug
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Lifts a plain constant into the scalar type.
    fn from_f64(value: f64) -> Self;

    /// Returns the primal (value) part as `f64`.
    fn to_f64(self) -> f64;

    /// Principal square root. Negative input yields a non-finite value.
    fn sqrt(self) -> Self;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Whether every component of the scalar is finite.
    fn is_finite(self) -> bool;

    /// Integer power by repeated multiplication.
    fn powi(self, exp: u32) -> Self {
        let mut acc = Self::one();
        for _ in 0..exp {
            acc = acc * self;
        }
        acc
    }

    /// Square of the value.
    fn square(self) -> Self {
        self * self
    }
}

impl Real for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    #[inline]
    fn powi(self, exp: u32) -> Self {
        f64::powi(self, exp as i32)
    }
}

impl Real for f32 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }

    #[inline]
    fn powi(self, exp: u32) -> Self {
        f32::powi(self, exp as i32)
    }
}

/// Forward-mode dual number `re + eps·ε` with `ε² = 0`.
///
/// Ordering compares the value part only, which matches how the formulas use
/// comparisons (kinematic gates). Equality compares both parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Dual {
    /// Value part.
    pub re: f64,
    /// Derivative part.
    pub eps: f64,
}

impl Dual {
    /// Creates a dual number from its value and derivative parts.
    pub const fn new(re: f64, eps: f64) -> Self {
        Self { re, eps }
    }

    /// Seeds an independent variable (derivative one).
    pub const fn variable(re: f64) -> Self {
        Self { re, eps: 1.0 }
    }

    /// Creates a constant (derivative zero).
    pub const fn constant(re: f64) -> Self {
        Self { re, eps: 0.0 }
    }
}

impl PartialOrd for Dual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.re.partial_cmp(&other.re)
    }
}

impl Add for Dual {
    type Output = Dual;

    fn add(self, rhs: Dual) -> Dual {
        Dual::new(self.re + rhs.re, self.eps + rhs.eps)
    }
}

impl Sub for Dual {
    type Output = Dual;

    fn sub(self, rhs: Dual) -> Dual {
        Dual::new(self.re - rhs.re, self.eps - rhs.eps)
    }
}

impl Mul for Dual {
    type Output = Dual;

    fn mul(self, rhs: Dual) -> Dual {
        Dual::new(self.re * rhs.re, self.eps * rhs.re + self.re * rhs.eps)
    }
}

impl Div for Dual {
    type Output = Dual;

    fn div(self, rhs: Dual) -> Dual {
        let denom = rhs.re * rhs.re;
        Dual::new(
            self.re / rhs.re,
            (self.eps * rhs.re - self.re * rhs.eps) / denom,
        )
    }
}

impl Neg for Dual {
    type Output = Dual;

    fn neg(self) -> Dual {
        Dual::new(-self.re, -self.eps)
    }
}

impl Zero for Dual {
    fn zero() -> Self {
        Dual::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.re == 0.0 && self.eps == 0.0
    }
}

impl One for Dual {
    fn one() -> Self {
        Dual::constant(1.0)
    }
}

impl Real for Dual {
    fn from_f64(value: f64) -> Self {
        Dual::constant(value)
    }

    fn to_f64(self) -> f64 {
        self.re
    }

    fn sqrt(self) -> Self {
        let root = self.re.sqrt();
        Dual::new(root, self.eps / (2.0 * root))
    }

    fn abs(self) -> Self {
        if self.re < 0.0 {
            -self
        } else {
            self
        }
    }

    fn is_finite(self) -> bool {
        self.re.is_finite() && self.eps.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_powi_matches_repeated_product() {
        let x = Dual::variable(1.5);
        let cubed = x.powi(3);
        assert!((cubed.re - 3.375).abs() < 1e-12);
        assert!((cubed.eps - 3.0 * 1.5 * 1.5).abs() < 1e-12);
    }

    #[test]
    fn ordering_ignores_derivative_part() {
        let a = Dual::new(1.0, 5.0);
        let b = Dual::new(2.0, -5.0);
        assert!(a < b);
        assert!(Dual::new(1.0, 0.0) <= Dual::new(1.0, 3.0));
    }
}
