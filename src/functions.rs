use num_bigint::{BigInt, Sign};
use num_traits::One;
use rand::rngs::OsRng;
use rand::RngCore;
use rug::{integer::IsPrime, integer::Order, rand::RandState, Integer};
use thiserror::Error;

/// Rounds of Miller-Rabin applied to every primality check.
pub(crate) const MILLER_RABIN_ROUNDS: u32 = 40;

#[derive(Error, Debug)]
pub enum FunctionError {
    #[error("random source failed: {0}")]
    RandomSource(String),
    #[error("requested bit length must be positive")]
    InvalidBitLength,
    #[error("sampling bound must be positive")]
    NonPositiveBound,
}

/// Returns a uniform random integer in `[0, 2^bits)`.
pub fn random_int(bits: usize) -> Result<BigInt, FunctionError> {
    if bits == 0 {
        return Err(FunctionError::InvalidBitLength);
    }
    let byte_len = (bits + 7) / 8;
    let mut bytes = vec![0u8; byte_len];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| FunctionError::RandomSource(e.to_string()))?;
    bytes[0] &= 0xff_u8 >> (8 * byte_len - bits);
    Ok(BigInt::from_bytes_be(Sign::Plus, &bytes))
}

/// Returns a uniform random integer in `[0, n)` by rejection sampling.
pub fn random_mod(n: &BigInt) -> Result<BigInt, FunctionError> {
    if n.sign() != Sign::Plus {
        return Err(FunctionError::NonPositiveBound);
    }
    let bits = n.bits() as usize;
    loop {
        let candidate = random_int(bits)?;
        if &candidate < n {
            return Ok(candidate);
        }
    }
}

/// Generates a safe-prime pair `(p, p')` with `p = 2p' + 1`, both probable
/// primes, and `p` of exactly `bit_len` bits.
///
/// `p'` is drawn as a random probable prime of `bit_len - 1` bits; the
/// candidate `p` is kept only if it passes Miller-Rabin as well.
pub fn generate_safe_primes(bit_len: usize) -> Result<(BigInt, BigInt), FunctionError> {
    if bit_len < 3 {
        return Err(FunctionError::InvalidBitLength);
    }
    let bit_len = u32::try_from(bit_len).map_err(|_| FunctionError::InvalidBitLength)?;

    let mut seed = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut seed)
        .map_err(|e| FunctionError::RandomSource(e.to_string()))?;
    let mut rand_state = RandState::new();
    rand_state.seed(&Integer::from_digits(&seed, Order::Msf));

    loop {
        let mut candidate: Integer = Integer::random_bits(bit_len - 1, &mut rand_state).into();
        candidate.set_bit(bit_len - 2, true);
        let q = candidate.next_prime();
        let p = Integer::from(&q * 2) + 1;
        if p.significant_bits() == bit_len
            && p.is_probably_prime(MILLER_RABIN_ROUNDS) != IsPrime::No
        {
            return Ok((integer_to_bigint(&p), integer_to_bigint(&q)));
        }
    }
}

/// Miller-Rabin test on a non-negative big integer.
pub(crate) fn is_probable_prime(n: &BigInt) -> bool {
    let (sign, bytes) = n.to_bytes_be();
    if sign == Sign::Minus {
        return false;
    }
    Integer::from_digits(&bytes, Order::Msf).is_probably_prime(MILLER_RABIN_ROUNDS) != IsPrime::No
}

/// `n!` as a big integer.
pub fn factorial(n: u64) -> BigInt {
    let mut acc = BigInt::one();
    for i in 2..=n {
        acc *= BigInt::from(i);
    }
    acc
}

/// `base^exponent mod modulus` where the exponent may be negative, in which
/// case the base must be invertible modulo `modulus`.
pub(crate) fn mod_pow_signed(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> Option<BigInt> {
    if exponent.sign() == Sign::Minus {
        let inverse = base.modinv(modulus)?;
        Some(inverse.modpow(&-exponent, modulus))
    } else {
        Some(base.modpow(exponent, modulus))
    }
}

fn integer_to_bigint(x: &Integer) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &x.to_digits::<u8>(Order::Msf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    const TEST_BITLEN: usize = 256;

    #[test]
    fn random_int_values_differ() {
        let a = random_int(TEST_BITLEN).expect("first draw failed");
        let b = random_int(TEST_BITLEN).expect("second draw failed");
        assert_ne!(a, b);
    }

    #[test]
    fn random_int_respects_bit_length() {
        for bits in [1, 7, 8, 9, 63, 64, 65, TEST_BITLEN] {
            let r = random_int(bits).expect("draw failed");
            assert!(r.bits() as usize <= bits, "{} bits exceeds {}", r.bits(), bits);
        }
    }

    #[test]
    fn random_int_rejects_zero_bits() {
        assert!(matches!(random_int(0), Err(FunctionError::InvalidBitLength)));
    }

    #[test]
    fn random_mod_stays_below_bound() {
        let n = BigInt::from(12345678901234567890u64);
        for _ in 0..32 {
            let r = random_mod(&n).expect("draw failed");
            assert!(r >= BigInt::zero() && r < n);
        }
    }

    #[test]
    fn random_mod_rejects_non_positive_bound() {
        assert!(matches!(
            random_mod(&BigInt::zero()),
            Err(FunctionError::NonPositiveBound)
        ));
        assert!(matches!(
            random_mod(&BigInt::from(-5)),
            Err(FunctionError::NonPositiveBound)
        ));
    }

    #[test]
    fn safe_primes_have_expected_structure() {
        let (p, q) = generate_safe_primes(64).expect("generation failed");
        assert_eq!(p, &q * BigInt::from(2) + BigInt::one());
        assert_eq!(p.bits(), 64);
        assert!(is_probable_prime(&p));
        assert!(is_probable_prime(&q));
    }

    #[test]
    fn factorial_small_values() {
        assert_eq!(factorial(0), BigInt::one());
        assert_eq!(factorial(1), BigInt::one());
        assert_eq!(factorial(5), BigInt::from(120));
        assert_eq!(factorial(10), BigInt::from(3628800));
    }

    #[test]
    fn mod_pow_signed_handles_negative_exponents() {
        let modulus = BigInt::from(101);
        let base = BigInt::from(7);
        let direct = base.modpow(&BigInt::from(13), &modulus);
        let inverse_path =
            mod_pow_signed(&direct, &BigInt::from(-1), &modulus).expect("not invertible");
        assert_eq!((direct * inverse_path) % &modulus, BigInt::one());

        let positive = mod_pow_signed(&base, &BigInt::from(13), &modulus).unwrap();
        assert_eq!(positive, base.modpow(&BigInt::from(13), &modulus));
    }
}
