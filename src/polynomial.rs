use num_bigint::BigInt;
use num_traits::Zero;
use thiserror::Error;
use zeroize::Zeroize;

use crate::functions::{random_mod, FunctionError};

#[derive(Error, Debug)]
pub enum PolynomialError {
    #[error("random coefficient generation failed: {0}")]
    RandomCoefficient(#[from] FunctionError),
}

/// A polynomial used to secret-share the decryption exponent.
///
/// `coefficients[0]` is the constant term; the secret shares are the
/// evaluations at `1, ..., l`. Coefficients are wiped on drop.
pub struct Polynomial {
    coefficients: Vec<BigInt>,
}

impl Polynomial {
    /// Creates a polynomial of the given degree whose constant term is
    /// `constant_term` and whose remaining coefficients are uniform in
    /// `[0, modulus)`.
    pub fn random(
        degree: usize,
        constant_term: BigInt,
        modulus: &BigInt,
    ) -> Result<Self, PolynomialError> {
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(constant_term);
        for _ in 0..degree {
            coefficients.push(random_mod(modulus)?);
        }
        Ok(Polynomial { coefficients })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Evaluates the polynomial at `x` with Horner's method.
    pub fn evaluate(&self, x: &BigInt) -> BigInt {
        let mut y = BigInt::zero();
        for coefficient in self.coefficients.iter().rev() {
            y = y * x + coefficient;
        }
        y
    }
}

impl Zeroize for Polynomial {
    fn zeroize(&mut self) {
        for coefficient in &mut self.coefficients {
            *coefficient = BigInt::zero();
        }
    }
}

impl Drop for Polynomial {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn constant_term_is_preserved() {
        let modulus = BigInt::from(1_000_003);
        let poly = Polynomial::random(4, BigInt::from(42), &modulus).unwrap();
        assert_eq!(poly.degree(), 4);
        assert_eq!(poly.evaluate(&BigInt::zero()), BigInt::from(42));
    }

    #[test]
    fn degree_zero_is_the_constant() {
        let modulus = BigInt::from(97);
        let poly = Polynomial::random(0, BigInt::from(7), &modulus).unwrap();
        assert_eq!(poly.evaluate(&BigInt::from(12345)), BigInt::from(7));
    }

    #[test]
    fn evaluation_matches_horner_by_hand() {
        // f(x) = 3 + 2x + x^2
        let poly = Polynomial {
            coefficients: vec![BigInt::from(3), BigInt::from(2), BigInt::one()],
        };
        assert_eq!(poly.evaluate(&BigInt::from(5)), BigInt::from(38));
        assert_eq!(poly.evaluate(&BigInt::from(-1)), BigInt::from(2));
    }

    #[test]
    fn zeroize_clears_coefficients() {
        let modulus = BigInt::from(1_000_003);
        let mut poly = Polynomial::random(3, BigInt::from(99), &modulus).unwrap();
        poly.zeroize();
        assert_eq!(poly.evaluate(&BigInt::from(17)), BigInt::zero());
    }
}
