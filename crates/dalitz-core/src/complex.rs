//! Complex numbers as an explicit `(re, im)` pair over a [`Real`] scalar.
//!
//! The field order is fixed: `re` first, `im` second, in memory, in
//! serialized form and in every flattened output.

use core::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::scalar::Real;

/// Complex scalar over a generic real type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Complex<T> {
    /// Real part.
    pub re: T,
    /// Imaginary part.
    pub im: T,
}

impl<T: Real> Complex<T> {
    /// Builds a complex number from its real and imaginary parts.
    #[inline]
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }

    /// Purely real value.
    #[inline]
    pub fn from_real(re: T) -> Self {
        Self::new(re, T::zero())
    }

    /// Additive identity.
    #[inline]
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }

    /// Multiplicative identity `1 + 0i`.
    #[inline]
    pub fn one() -> Self {
        Self::new(T::one(), T::zero())
    }

    /// Imaginary unit `0 + 1i`.
    #[inline]
    pub fn one_i() -> Self {
        Self::new(T::zero(), T::one())
    }

    /// Squared modulus `re² + im²`.
    #[inline]
    pub fn abs2(self) -> T {
        self.re * self.re + self.im * self.im
    }

    /// Complex conjugate.
    #[inline]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Multiplicative inverse. A zero input yields non-finite parts.
    #[inline]
    pub fn inverse(self) -> Self {
        let norm = self.abs2();
        Self::new(self.re / norm, -self.im / norm)
    }

    /// Multiplies both parts by a real factor.
    #[inline]
    pub fn scale(self, factor: T) -> Self {
        Self::new(self.re * factor, self.im * factor)
    }

    /// Whether both parts are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    /// Converts the pair to `f64` parts, dropping any derivative information.
    pub fn to_f64(self) -> Complex<f64> {
        Complex {
            re: self.re.to_f64(),
            im: self.im.to_f64(),
        }
    }
}

impl<T: Real> Add for Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn add(self, rhs: Complex<T>) -> Complex<T> {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl<T: Real> Sub for Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn sub(self, rhs: Complex<T>) -> Complex<T> {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl<T: Real> Mul for Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn mul(self, rhs: Complex<T>) -> Complex<T> {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.im * rhs.re + self.re * rhs.im,
        )
    }
}

impl<T: Real> Mul<T> for Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn mul(self, rhs: T) -> Complex<T> {
        self.scale(rhs)
    }
}

impl<T: Real> Neg for Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn neg(self) -> Complex<T> {
        Complex::new(-self.re, -self.im)
    }
}

/// Element-wise product of two complex vectors, truncated to the shorter one.
pub fn elementwise_mul<T: Real>(lhs: &[Complex<T>], rhs: &[Complex<T>]) -> Vec<Complex<T>> {
    lhs.iter().zip(rhs).map(|(a, b)| *a * *b).collect()
}

/// Sum of a complex vector.
pub fn sum<T: Real>(values: &[Complex<T>]) -> Complex<T> {
    values
        .iter()
        .fold(Complex::zero(), |acc, value| acc + *value)
}

/// Coherent sum `Σ aᵢ·bᵢ`.
pub fn dot<T: Real>(lhs: &[Complex<T>], rhs: &[Complex<T>]) -> Complex<T> {
    lhs.iter()
        .zip(rhs)
        .fold(Complex::zero(), |acc, (a, b)| acc + *a * *b)
}
