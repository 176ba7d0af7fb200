use dalitz_core::Real;

/// Collinear Lorentz boost with velocity `v = p / E` of the moving frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boost<T> {
    velocity: T,
    gamma: T,
}

impl<T: Real> Boost<T> {
    /// Boost into the rest frame of a system with momentum `momentum` and
    /// energy `energy`.
    ///
    /// Returns `None` when `|v| ≥ 1` or the velocity is not finite.
    pub fn from_momentum(momentum: T, energy: T) -> Option<Self> {
        let velocity = momentum / energy;
        let beta2 = velocity * velocity;
        if !velocity.is_finite() || !(beta2 < T::one()) {
            return None;
        }
        let gamma = T::one() / (T::one() - beta2).sqrt();
        Some(Self { velocity, gamma })
    }

    /// Transforms `(p, E)` to `(γ(p + E·v), γ(E + p·v))`.
    pub fn apply(&self, momentum: T, energy: T) -> (T, T) {
        (
            self.gamma * (momentum + energy * self.velocity),
            self.gamma * (energy + momentum * self.velocity),
        )
    }

    /// Frame velocity.
    pub fn velocity(&self) -> T {
        self.velocity
    }

    /// Lorentz factor.
    pub fn gamma(&self) -> T {
        self.gamma
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_mass_is_preserved() {
        let boost = Boost::from_momentum(0.4_f64, 1.0).expect("subluminal");
        let (p, e) = (0.3_f64, (0.3_f64 * 0.3 + 0.14 * 0.14).sqrt());
        let (p2, e2) = boost.apply(p, e);
        assert!(((e2 * e2 - p2 * p2) - (e * e - p * p)).abs() < 1e-12);
    }

    #[test]
    fn light_speed_is_rejected() {
        assert!(Boost::from_momentum(1.0_f64, 1.0).is_none());
        assert!(Boost::from_momentum(1.0_f64, 0.0).is_none());
    }
}
