use std::collections::HashSet;

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Pow, Zero};
use thiserror::Error;

use crate::decryption_share::DecryptionShare;
use crate::functions::{mod_pow_signed, random_mod, FunctionError};
use crate::zk_proof::{challenge, EncryptZK, MulZK};

#[derive(Error, Debug)]
pub enum PubKeyError {
    #[error("ciphertext list is empty")]
    EmptyCiphertextList,
    #[error("{0} is out of range")]
    OutOfRange(&'static str),
    #[error("insufficient decryption shares: got {got}, need {needed}")]
    InsufficientShares { got: usize, needed: u8 },
    #[error("decryption share index {0} appears more than once")]
    DuplicateShare(u8),
    #[error("randomness failure: {0}")]
    Random(#[from] FunctionError),
    #[error("value is not invertible modulo n^(s+1)")]
    NotInvertible,
}

/// Modulus-derived quantities computed once at key construction.
#[derive(Debug, Clone)]
struct Cached {
    n_plus_one: BigInt,
    n_minus_one: BigInt,
    s_plus_one: BigInt,
    n_to_s: BigInt,
    n_to_s_plus_one: BigInt,
}

impl Cached {
    fn new(n: &BigInt, s: u8) -> Self {
        Cached {
            n_plus_one: n + BigInt::one(),
            n_minus_one: n - BigInt::one(),
            s_plus_one: BigInt::from(s) + BigInt::one(),
            n_to_s: Pow::pow(n, u32::from(s)),
            n_to_s_plus_one: Pow::pow(n, u32::from(s) + 1),
        }
    }
}

/// The public half of a threshold Paillier key.
///
/// Immutable after construction and safe to share across threads; all
/// derived quantities are computed eagerly by [`PublicKey::new`].
#[derive(Debug, Clone)]
pub struct PublicKey {
    pub n: BigInt,
    pub s: u8,
    pub l: u8,
    pub k: u8,
    pub v: BigInt,
    pub vi: Vec<BigInt>,
    pub delta: BigInt,
    pub constant: BigInt,
    cached: Cached,
}

impl PublicKey {
    /// Assembles a public key from dealer outputs. `vi` must hold exactly
    /// `l` verification values, indexed by share number minus one.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n: BigInt,
        s: u8,
        l: u8,
        k: u8,
        v: BigInt,
        vi: Vec<BigInt>,
        delta: BigInt,
        constant: BigInt,
    ) -> Self {
        let cached = Cached::new(&n, s);
        PublicKey {
            n,
            s,
            l,
            k,
            v,
            vi,
            delta,
            constant,
            cached,
        }
    }

    pub fn n_plus_one(&self) -> &BigInt {
        &self.cached.n_plus_one
    }

    pub fn n_minus_one(&self) -> &BigInt {
        &self.cached.n_minus_one
    }

    pub fn s_plus_one(&self) -> &BigInt {
        &self.cached.s_plus_one
    }

    pub fn n_to_s(&self) -> &BigInt {
        &self.cached.n_to_s
    }

    pub fn n_to_s_plus_one(&self) -> &BigInt {
        &self.cached.n_to_s_plus_one
    }

    /// Encrypts `message` with fresh randomness, returning the ciphertext
    /// together with the randomness used.
    pub fn encrypt(&self, message: &BigInt) -> Result<(BigInt, BigInt), PubKeyError> {
        let r = self.random_mod_n_to_s_plus_one_star()?;
        let c = self.encrypt_fixed(message, &r)?;
        Ok((c, r))
    }

    /// Encrypts `message` with the caller-supplied randomness `r`:
    /// `c = (n+1)^message * r^{n^s} mod n^(s+1)`.
    pub fn encrypt_fixed(&self, message: &BigInt, r: &BigInt) -> Result<BigInt, PubKeyError> {
        let n_plus_one = self.n_plus_one();
        let n_to_s = self.n_to_s();
        let n_to_s_plus_one = self.n_to_s_plus_one();

        if r.sign() != Sign::Plus || r >= n_to_s_plus_one {
            return Err(PubKeyError::OutOfRange("encryption randomness"));
        }

        let reduced = message.mod_floor(n_to_s_plus_one);
        let n_plus_one_to_m = n_plus_one.modpow(&reduced, n_to_s_plus_one);
        let r_to_n_to_s = r.modpow(n_to_s, n_to_s_plus_one);
        Ok((n_plus_one_to_m * r_to_n_to_s) % n_to_s_plus_one)
    }

    pub fn encrypt_with_proof(
        &self,
        message: &BigInt,
    ) -> Result<(BigInt, EncryptZK), PubKeyError> {
        let r = self.random_mod_n_to_s_plus_one_star()?;
        self.encrypt_fixed_with_proof(message, &r)
    }

    pub fn encrypt_fixed_with_proof(
        &self,
        message: &BigInt,
        r: &BigInt,
    ) -> Result<(BigInt, EncryptZK), PubKeyError> {
        let c = self.encrypt_fixed(message, r)?;
        let proof = self.encrypt_proof(message, &c, r)?;
        Ok((c, proof))
    }

    /// Homomorphic addition: the product of the ciphertexts encrypts the sum
    /// of the plaintexts modulo `n^s`. Requires at least one ciphertext, each
    /// in `(0, n^(s+1))`.
    pub fn add(&self, ciphertexts: &[BigInt]) -> Result<BigInt, PubKeyError> {
        if ciphertexts.is_empty() {
            return Err(PubKeyError::EmptyCiphertextList);
        }
        let n_to_s_plus_one = self.n_to_s_plus_one();
        let mut product = BigInt::one();
        for c in ciphertexts {
            if c.sign() != Sign::Plus || c >= n_to_s_plus_one {
                return Err(PubKeyError::OutOfRange("ciphertext"));
            }
            product = product * c % n_to_s_plus_one;
        }
        Ok(product)
    }

    /// Homomorphic multiplication by the plaintext constant `alpha`,
    /// rerandomized with a fresh unit. Returns the product ciphertext and
    /// the rerandomizer.
    pub fn multiply(&self, c: &BigInt, alpha: &BigInt) -> Result<(BigInt, BigInt), PubKeyError> {
        let gamma = self.random_mod_n_to_s_plus_one_star()?;
        let product = self.multiply_fixed(c, alpha, &gamma)?;
        Ok((product, gamma))
    }

    /// `multiply` with a caller-supplied rerandomizer. Rerandomization is not
    /// optional: `c^alpha` by itself leaks `alpha` to anyone holding `c`.
    pub fn multiply_fixed(
        &self,
        c: &BigInt,
        alpha: &BigInt,
        gamma: &BigInt,
    ) -> Result<BigInt, PubKeyError> {
        let n_to_s_plus_one = self.n_to_s_plus_one();
        if c.sign() != Sign::Plus || c >= n_to_s_plus_one {
            return Err(PubKeyError::OutOfRange("ciphertext"));
        }
        let reduced = alpha.mod_floor(self.n_to_s());
        let raised = c.modpow(&reduced, n_to_s_plus_one);
        self.re_rand(&raised, gamma)
    }

    /// Multiplies a fresh encryption of zero into `c`, refreshing its
    /// randomness without changing the plaintext.
    pub fn re_rand(&self, c: &BigInt, r: &BigInt) -> Result<BigInt, PubKeyError> {
        let zero_encryption = self.encrypt_fixed(&BigInt::zero(), r)?;
        self.add(&[c.clone(), zero_encryption])
    }

    pub fn multiply_with_proof(
        &self,
        c: &BigInt,
        alpha: &BigInt,
    ) -> Result<(BigInt, MulZK), PubKeyError> {
        let alpha = alpha.mod_floor(self.n_to_s());
        let (d, gamma) = self.multiply(c, &alpha)?;
        let alpha_rand = self.random_mod_n_to_s_plus_one_star()?;
        let c_alpha = self.encrypt_fixed(&alpha, &alpha_rand)?;
        let proof = self.multiply_proof(c, &c_alpha, &d, &alpha, &alpha_rand, &gamma)?;
        Ok((d, proof))
    }

    /// Recombines at least `k` decryption shares into the plaintext.
    ///
    /// Only the first `k` shares take part; extras are ignored. The scaled
    /// Lagrange coefficients are computed exactly over the integers, with the
    /// factorial `delta` clearing every denominator.
    pub fn combine_shares(&self, shares: &[DecryptionShare]) -> Result<BigInt, PubKeyError> {
        let needed = usize::from(self.k);
        if shares.len() < needed {
            return Err(PubKeyError::InsufficientShares {
                got: shares.len(),
                needed: self.k,
            });
        }
        let shares = &shares[..needed];

        let mut seen = HashSet::new();
        for share in shares {
            if !seen.insert(share.index) {
                return Err(PubKeyError::DuplicateShare(share.index));
            }
        }

        let n_to_s_plus_one = self.n_to_s_plus_one();
        let two_delta = BigInt::from(2) * &self.delta;
        let mut c_prime = BigInt::one();
        for share in shares {
            if share.ci.sign() == Sign::Minus || &share.ci >= n_to_s_plus_one {
                return Err(PubKeyError::OutOfRange("decryption share"));
            }
            // 2*delta * prod_{j != i} (-j) / (i - j), exact over the integers.
            let mut numerator = two_delta.clone();
            let mut denominator = BigInt::one();
            for other in shares {
                if other.index != share.index {
                    numerator *= BigInt::from(-i64::from(other.index));
                    denominator *= BigInt::from(i64::from(share.index) - i64::from(other.index));
                }
            }
            let lambda = numerator / denominator;
            let ci_to_lambda = mod_pow_signed(&share.ci, &lambda, n_to_s_plus_one)
                .ok_or(PubKeyError::NotInvertible)?;
            c_prime = c_prime * ci_to_lambda % n_to_s_plus_one;
        }

        let exponent = self.dlog_n_plus_one(&c_prime)?;
        Ok((exponent * &self.constant).mod_floor(self.n_to_s()))
    }

    /// Proof of knowledge of the plaintext and randomness behind `c`.
    pub fn encrypt_proof(
        &self,
        message: &BigInt,
        c: &BigInt,
        r: &BigInt,
    ) -> Result<EncryptZK, PubKeyError> {
        let n_plus_one = self.n_plus_one();
        let n_to_s = self.n_to_s();
        let n_to_s_plus_one = self.n_to_s_plus_one();

        let reduced = message.mod_floor(n_to_s);
        let x = self.random_mod_n_to_s()?;
        let u = self.random_mod_n_to_s_plus_one_star()?;

        let n_plus_one_to_x = n_plus_one.modpow(&x, n_to_s_plus_one);
        let u_to_n_to_s = u.modpow(n_to_s, n_to_s_plus_one);
        let b = (n_plus_one_to_x * u_to_n_to_s) % n_to_s_plus_one;

        let e = challenge(&[c, &b]);

        let blinded = &x + &e * reduced;
        let w = blinded.mod_floor(n_to_s);
        let t = blinded.div_floor(n_to_s);

        let r_to_e = r.modpow(&e, n_to_s_plus_one);
        let n_plus_one_to_t = n_plus_one.modpow(&t, n_to_s_plus_one);
        let z = u * r_to_e % n_to_s_plus_one * n_plus_one_to_t % n_to_s_plus_one;

        Ok(EncryptZK { b, w, z })
    }

    /// Proof that `d` multiplies `ca` by the constant encrypted in `c_alpha`.
    /// `alpha_rand` is the randomness of `c_alpha` and `gamma` the
    /// rerandomizer of `d`.
    pub fn multiply_proof(
        &self,
        ca: &BigInt,
        c_alpha: &BigInt,
        d: &BigInt,
        alpha: &BigInt,
        alpha_rand: &BigInt,
        gamma: &BigInt,
    ) -> Result<MulZK, PubKeyError> {
        let n_plus_one = self.n_plus_one();
        let n_to_s = self.n_to_s();
        let n_to_s_plus_one = self.n_to_s_plus_one();

        if ca.sign() != Sign::Plus || ca >= n_to_s_plus_one {
            return Err(PubKeyError::OutOfRange("ciphertext"));
        }
        if c_alpha.sign() != Sign::Plus || c_alpha >= n_to_s_plus_one {
            return Err(PubKeyError::OutOfRange("constant ciphertext"));
        }

        let reduced = alpha.mod_floor(n_to_s);
        let x = self.random_mod_n_to_s()?;
        let u = self.random_mod_n_to_s_plus_one_star()?;
        let v = self.random_mod_n_to_s_plus_one_star()?;

        let ca_to_x = ca.modpow(&x, n_to_s_plus_one);
        let v_to_n_to_s = v.modpow(n_to_s, n_to_s_plus_one);
        let a = (ca_to_x * v_to_n_to_s) % n_to_s_plus_one;

        let n_plus_one_to_x = n_plus_one.modpow(&x, n_to_s_plus_one);
        let u_to_n_to_s = u.modpow(n_to_s, n_to_s_plus_one);
        let b = (n_plus_one_to_x * u_to_n_to_s) % n_to_s_plus_one;

        let e = challenge(&[ca, c_alpha, d, &a, &b]);

        let blinded = &x + &e * reduced;
        let w = blinded.mod_floor(n_to_s);
        let t = blinded.div_floor(n_to_s);

        let alpha_rand_to_e = alpha_rand.modpow(&e, n_to_s_plus_one);
        let n_plus_one_to_t = n_plus_one.modpow(&t, n_to_s_plus_one);
        let z = u * alpha_rand_to_e % n_to_s_plus_one * n_plus_one_to_t % n_to_s_plus_one;

        let ca_to_t = ca.modpow(&t, n_to_s_plus_one);
        let gamma_to_e = gamma.modpow(&e, n_to_s_plus_one);
        let y = v * ca_to_t % n_to_s_plus_one * gamma_to_e % n_to_s_plus_one;

        Ok(MulZK {
            c_alpha: c_alpha.clone(),
            a,
            b,
            w,
            y,
            z,
        })
    }

    /// Uniform draw from `[0, n^s)`.
    pub fn random_mod_n_to_s(&self) -> Result<BigInt, PubKeyError> {
        Ok(random_mod(self.n_to_s())?)
    }

    /// Uniform draw from `[1, n^(s+1) - 1]`. All but a negligible fraction of
    /// these are units modulo `n^(s+1)`.
    pub fn random_mod_n_to_s_plus_one_star(&self) -> Result<BigInt, PubKeyError> {
        let bound = self.n_to_s_plus_one() - BigInt::one();
        Ok(random_mod(&bound)? + BigInt::one())
    }

    /// Recovers `E mod n^s` from `a = (n+1)^E mod n^(s+1)`.
    ///
    /// Peels one power of `n` per round, correcting with the binomial terms
    /// of `(1+n)^E`. For `s = 1` this is exactly `(a - 1) / n`.
    fn dlog_n_plus_one(&self, a: &BigInt) -> Result<BigInt, PubKeyError> {
        let n = &self.n;
        let one = BigInt::one();
        let mut acc = BigInt::zero();
        for j in 1..=u32::from(self.s) {
            let n_to_j = Pow::pow(n, j);
            let n_to_j_plus_one = Pow::pow(n, j + 1);
            let mut t1 = (a.mod_floor(&n_to_j_plus_one) - &one) / n;
            let mut t2 = acc.clone();
            let mut k_factorial = BigInt::one();
            for k in 2..=j {
                acc -= &one;
                t2 = (&t2 * &acc).mod_floor(&n_to_j);
                k_factorial *= BigInt::from(k);
                let k_factorial_inv = k_factorial
                    .modinv(&n_to_j)
                    .ok_or(PubKeyError::NotInvertible)?;
                let n_to_k_minus_one = Pow::pow(n, k - 1);
                t1 = (t1 - &t2 * n_to_k_minus_one * k_factorial_inv).mod_floor(&n_to_j);
            }
            acc = t1;
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::{generate_key_from_primes, FixedParams};
    use crate::key_share::KeyShare;
    use std::sync::Arc;

    fn test_key(s: u8, l: u8, k: u8) -> (Arc<PublicKey>, Vec<KeyShare>) {
        let params = FixedParams::new(
            BigInt::from(9924990728928558299u64),
            BigInt::from(4962495364464279149u64),
            BigInt::from(10606719818417103119u64),
            BigInt::from(5303359909208551559u64),
        );
        generate_key_from_primes(128, s, l, k, &params).expect("keygen failed")
    }

    fn decrypt(pk: &PublicKey, shares: &[KeyShare], c: &BigInt) -> BigInt {
        let partials: Vec<_> = shares[..usize::from(pk.k)]
            .iter()
            .map(|share| share.partial_decrypt(c).unwrap())
            .collect();
        pk.combine_shares(&partials).unwrap()
    }

    #[test]
    fn encrypt_then_threshold_decrypt() {
        let (pk, shares) = test_key(1, 5, 3);
        let message = BigInt::from(123456789);
        let (c, _) = pk.encrypt(&message).unwrap();
        assert_eq!(decrypt(&pk, &shares, &c), message);
    }

    #[test]
    fn encrypt_then_threshold_decrypt_s2() {
        let (pk, shares) = test_key(2, 5, 3);
        // Larger than n, still well inside n^2.
        let message = pk.n.clone() + BigInt::from(987654321);
        let (c, _) = pk.encrypt(&message).unwrap();
        assert_eq!(decrypt(&pk, &shares, &c), message);
    }

    #[test]
    fn encrypt_fixed_is_deterministic() {
        let (pk, _) = test_key(1, 3, 2);
        let message = BigInt::from(42);
        let r = pk.random_mod_n_to_s_plus_one_star().unwrap();
        let c1 = pk.encrypt_fixed(&message, &r).unwrap();
        let c2 = pk.encrypt_fixed(&message, &r).unwrap();
        assert_eq!(c1, c2);
    }

    #[test]
    fn encrypt_fixed_rejects_bad_randomness() {
        let (pk, _) = test_key(1, 3, 2);
        let message = BigInt::from(42);
        assert!(matches!(
            pk.encrypt_fixed(&message, &BigInt::zero()),
            Err(PubKeyError::OutOfRange(_))
        ));
        let too_big = pk.n_to_s_plus_one().clone();
        assert!(pk.encrypt_fixed(&message, &too_big).is_err());
    }

    #[test]
    fn negative_messages_wrap_modulo_n_to_s() {
        let (pk, shares) = test_key(1, 5, 3);
        let (c, _) = pk.encrypt(&BigInt::from(-37)).unwrap();
        assert_eq!(decrypt(&pk, &shares, &c), pk.n_to_s() - BigInt::from(37));
    }

    #[test]
    fn add_is_homomorphic() {
        let (pk, shares) = test_key(1, 5, 3);
        let (c1, _) = pk.encrypt(&BigInt::from(1111)).unwrap();
        let (c2, _) = pk.encrypt(&BigInt::from(2222)).unwrap();
        let (c3, _) = pk.encrypt(&BigInt::from(3333)).unwrap();
        let sum = pk.add(&[c1, c2, c3]).unwrap();
        assert_eq!(decrypt(&pk, &shares, &sum), BigInt::from(6666));
    }

    #[test]
    fn add_rejects_empty_and_out_of_range() {
        let (pk, _) = test_key(1, 3, 2);
        assert!(matches!(pk.add(&[]), Err(PubKeyError::EmptyCiphertextList)));

        let (c, _) = pk.encrypt(&BigInt::from(1)).unwrap();
        let too_big = pk.n_to_s_plus_one() + BigInt::one();
        assert!(matches!(
            pk.add(&[c.clone(), too_big]),
            Err(PubKeyError::OutOfRange(_))
        ));
        assert!(matches!(
            pk.add(&[BigInt::zero(), c.clone()]),
            Err(PubKeyError::OutOfRange(_))
        ));
        assert!(matches!(
            pk.add(&[BigInt::from(-3), c]),
            Err(PubKeyError::OutOfRange(_))
        ));
    }

    #[test]
    fn multiply_scales_the_plaintext() {
        let (pk, shares) = test_key(1, 5, 3);
        let (c, _) = pk.encrypt(&BigInt::from(12)).unwrap();
        let (product, _) = pk.multiply(&c, &BigInt::from(25)).unwrap();
        assert_eq!(decrypt(&pk, &shares, &product), BigInt::from(300));
    }

    #[test]
    fn multiply_rerandomizes() {
        let (pk, _) = test_key(1, 3, 2);
        let alpha = BigInt::from(25);
        let (c, _) = pk.encrypt(&BigInt::from(12)).unwrap();
        let bare = c.modpow(&alpha, pk.n_to_s_plus_one());
        let (product, _) = pk.multiply(&c, &alpha).unwrap();
        assert_ne!(product, bare);
    }

    #[test]
    fn multiply_fixed_matches_multiply_with_same_gamma() {
        let (pk, _) = test_key(1, 3, 2);
        let (c, _) = pk.encrypt(&BigInt::from(12)).unwrap();
        let (product, gamma) = pk.multiply(&c, &BigInt::from(7)).unwrap();
        let replay = pk.multiply_fixed(&c, &BigInt::from(7), &gamma).unwrap();
        assert_eq!(product, replay);
    }

    #[test]
    fn re_rand_preserves_the_plaintext() {
        let (pk, shares) = test_key(1, 5, 3);
        let (c, _) = pk.encrypt(&BigInt::from(555)).unwrap();
        let r = pk.random_mod_n_to_s_plus_one_star().unwrap();
        let refreshed = pk.re_rand(&c, &r).unwrap();
        assert_ne!(refreshed, c);
        assert_eq!(decrypt(&pk, &shares, &refreshed), BigInt::from(555));
    }

    #[test]
    fn combine_requires_k_distinct_shares() {
        let (pk, shares) = test_key(1, 5, 3);
        let (c, _) = pk.encrypt(&BigInt::from(9)).unwrap();
        let partials: Vec<_> = shares
            .iter()
            .map(|share| share.partial_decrypt(&c).unwrap())
            .collect();

        assert!(matches!(
            pk.combine_shares(&partials[..2]),
            Err(PubKeyError::InsufficientShares { got: 2, needed: 3 })
        ));

        let duplicated = vec![partials[0].clone(), partials[1].clone(), partials[0].clone()];
        assert!(matches!(
            pk.combine_shares(&duplicated),
            Err(PubKeyError::DuplicateShare(1))
        ));
    }

    #[test]
    fn combine_ignores_shares_beyond_k() {
        let (pk, shares) = test_key(1, 5, 3);
        let (c, _) = pk.encrypt(&BigInt::from(31337)).unwrap();
        let mut partials: Vec<_> = shares
            .iter()
            .map(|share| share.partial_decrypt(&c).unwrap())
            .collect();
        // Corrupt a share past the threshold; it must not be consulted.
        partials[4].ci = BigInt::from(12345);
        assert_eq!(pk.combine_shares(&partials).unwrap(), BigInt::from(31337));
    }

    #[test]
    fn any_k_subset_decrypts() {
        let (pk, shares) = test_key(1, 5, 3);
        let message = BigInt::from(777);
        let (c, _) = pk.encrypt(&message).unwrap();
        let partials: Vec<_> = shares
            .iter()
            .map(|share| share.partial_decrypt(&c).unwrap())
            .collect();
        for subset in [[0, 1, 2], [2, 3, 4], [0, 2, 4], [4, 1, 3]] {
            let chosen: Vec<_> = subset.iter().map(|&i| partials[i].clone()).collect();
            assert_eq!(pk.combine_shares(&chosen).unwrap(), message, "{subset:?}");
        }
    }

    #[test]
    fn random_draws_are_in_range() {
        let (pk, _) = test_key(2, 3, 2);
        for _ in 0..16 {
            let x = pk.random_mod_n_to_s().unwrap();
            assert!(x.sign() != Sign::Minus && &x < pk.n_to_s());
            let r = pk.random_mod_n_to_s_plus_one_star().unwrap();
            assert!(r.sign() == Sign::Plus && &r < pk.n_to_s_plus_one());
        }
    }

    #[test]
    fn cached_values_are_consistent() {
        let (pk, _) = test_key(2, 3, 2);
        assert_eq!(pk.n_plus_one(), &(&pk.n + BigInt::one()));
        assert_eq!(pk.n_minus_one(), &(&pk.n - BigInt::one()));
        assert_eq!(pk.s_plus_one(), &BigInt::from(3));
        assert_eq!(pk.n_to_s(), &(&pk.n * &pk.n));
        assert_eq!(pk.n_to_s_plus_one(), &(&pk.n * &pk.n * &pk.n));
    }

    #[test]
    fn two_encryptions_differ_but_agree_up_to_randomness() {
        let (pk, _) = test_key(1, 3, 2);
        let message = BigInt::from(42);
        let (c1, r1) = pk.encrypt(&message).unwrap();
        let (c2, r2) = pk.encrypt(&message).unwrap();
        assert_ne!(c1, c2);

        let n_to_s_plus_one = pk.n_to_s_plus_one();
        let c1_inv = c1.modinv(n_to_s_plus_one).unwrap();
        let quotient = c2 * c1_inv % n_to_s_plus_one;
        let r1_inv = r1.modinv(n_to_s_plus_one).unwrap();
        let ratio = r2 * r1_inv % n_to_s_plus_one;
        assert_eq!(quotient, ratio.modpow(pk.n_to_s(), n_to_s_plus_one));
    }
}
