//! The dealer ceremony: safe-prime modulus, secret-sharing polynomial,
//! verification values, and the `l` key shares.

use std::sync::Arc;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Pow};
use thiserror::Error;

use crate::functions::{
    factorial, generate_safe_primes, is_probable_prime, random_int, FunctionError,
};
use crate::key_share::KeyShare;
use crate::polynomial::{Polynomial, PolynomialError};
use crate::pub_key::PublicKey;

#[derive(Error, Debug)]
pub enum KeyGenError {
    #[error("bit size {0} is too small, need at least 64")]
    BitSizeTooSmall(usize),
    #[error("s must be at least 1")]
    InvalidS,
    #[error("l must be greater than 1, got {0}")]
    InvalidL(u8),
    #[error("k must be in [{min}, {max}], got {got}")]
    KOutOfRange { got: u8, min: u8, max: u8 },
    #[error("supplied primes do not form a valid modulus")]
    InvalidPrimes,
    #[error("randomness failure: {0}")]
    Random(#[from] FunctionError),
    #[error("share polynomial generation failed: {0}")]
    Polynomial(#[from] PolynomialError),
}

/// A safe-prime set `p = 2p' + 1`, `q = 2q' + 1` supplied by the caller
/// instead of being freshly generated. Used for reproducible keys.
#[derive(Debug, Clone)]
pub struct FixedParams {
    p: BigInt,
    p1: BigInt,
    q: BigInt,
    q1: BigInt,
}

impl FixedParams {
    pub fn new(p: BigInt, p1: BigInt, q: BigInt, q1: BigInt) -> Self {
        FixedParams { p, p1, q, q1 }
    }

    /// Checks that all four values are probable primes and that the
    /// safe-prime relations hold.
    pub fn validate(&self) -> bool {
        self.p == BigInt::from(2) * &self.p1 + BigInt::one()
            && self.q == BigInt::from(2) * &self.q1 + BigInt::one()
            && is_probable_prime(&self.p)
            && is_probable_prime(&self.p1)
            && is_probable_prime(&self.q)
            && is_probable_prime(&self.q1)
    }
}

/// Generates a threshold key set: a public key over a fresh safe-prime
/// modulus of `bit_size` bits and `l` key shares, any `k` of which decrypt.
pub fn generate_key(
    bit_size: usize,
    s: u8,
    l: u8,
    k: u8,
) -> Result<(Arc<PublicKey>, Vec<KeyShare>), KeyGenError> {
    check_parameters(bit_size, s, l, k)?;
    let p_size = (bit_size + 1) / 2;
    let q_size = bit_size - p_size;

    let (p, p1) = generate_safe_primes(p_size)?;
    let (q, q1) = loop {
        let (q, q1) = generate_safe_primes(q_size)?;
        if p != q && p != q1 && q != p1 {
            break (q, q1);
        }
    };

    generate_key_from_primes(bit_size, s, l, k, &FixedParams { p, p1, q, q1 })
}

/// Runs the dealer ceremony on a caller-supplied safe-prime set.
///
/// The dealer is trusted: `params` is not re-validated here. Callers holding
/// primes of unknown provenance should check [`FixedParams::validate`] first.
pub fn generate_key_from_primes(
    bit_size: usize,
    s: u8,
    l: u8,
    k: u8,
    params: &FixedParams,
) -> Result<(Arc<PublicKey>, Vec<KeyShare>), KeyGenError> {
    check_parameters(bit_size, s, l, k)?;

    let n = &params.p * &params.q;
    let m = &params.p1 * &params.q1;
    let n_to_s = Pow::pow(&n, u32::from(s));
    let n_to_s_plus_one = Pow::pow(&n, u32::from(s) + 1);
    let n_to_s_m = &n_to_s * &m;

    // d = 0 mod m and d = 1 mod n^s, so the Lagrange-combined exponent kills
    // the randomness component and leaves the plaintext exponent intact.
    let m_inv = m.modinv(&n_to_s).ok_or(KeyGenError::InvalidPrimes)?;
    let d = &m * &m_inv;

    let poly = Polynomial::random(usize::from(k) - 1, d, &n_to_s_m)?;
    let secrets: Vec<BigInt> = (1..=u64::from(l))
        .map(|i| poly.evaluate(&BigInt::from(i)).mod_floor(&n_to_s_m))
        .collect();

    // Shoup heuristic: the square of a random unit generates the
    // quadratic-residue subgroup with overwhelming probability.
    let v = loop {
        let r = random_int(4 * bit_size)?;
        if r.gcd(&n).is_one() {
            break r.modpow(&BigInt::from(2), &n_to_s_plus_one);
        }
    };

    let delta = factorial(u64::from(l));
    let four_delta_squared = BigInt::from(4) * &delta * &delta;
    let constant = four_delta_squared
        .modinv(&n_to_s)
        .ok_or(KeyGenError::InvalidPrimes)?;

    let vi = secrets
        .iter()
        .map(|si| v.modpow(&(&delta * si), &n_to_s_plus_one))
        .collect();

    let pub_key = Arc::new(PublicKey::new(n, s, l, k, v, vi, delta, constant));
    let key_shares = secrets
        .into_iter()
        .enumerate()
        .map(|(i, si)| KeyShare::new(Arc::clone(&pub_key), (i + 1) as u8, si))
        .collect();

    Ok((pub_key, key_shares))
}

fn check_parameters(bit_size: usize, s: u8, l: u8, k: u8) -> Result<(), KeyGenError> {
    if bit_size < 64 {
        return Err(KeyGenError::BitSizeTooSmall(bit_size));
    }
    if s < 1 {
        return Err(KeyGenError::InvalidS);
    }
    if l <= 1 {
        return Err(KeyGenError::InvalidL(l));
    }
    let min = l / 2 + 1;
    if k < min || k > l {
        return Err(KeyGenError::KOutOfRange { got: k, min, max: l });
    }
    Ok(())
}
