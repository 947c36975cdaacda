//! Non-interactive zero-knowledge proofs for encryption, multiplication by a
//! constant, and partial decryption. Each is the Fiat-Shamir transformation of
//! a three-move sigma protocol; the challenge is the full SHA-256 digest of
//! the minimal big-endian encodings of the protocol inputs, in a fixed order.

use num_bigint::{BigInt, Sign};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::decryption_share::DecryptionShare;
use crate::functions::mod_pow_signed;
use crate::pub_key::PublicKey;

#[derive(Error, Debug)]
pub enum ZKProofError {
    #[error("zero-knowledge proof verification failed")]
    VerificationFailed,
}

/// Proof of knowledge of `(m, r)` such that `c = (n+1)^m * r^{n^s}`.
#[derive(Debug, Clone)]
pub struct EncryptZK {
    pub b: BigInt,
    pub w: BigInt,
    pub z: BigInt,
}

/// Proof that `d` is a rerandomized multiplication of `ca` by the plaintext
/// encrypted in `c_alpha`.
#[derive(Debug, Clone)]
pub struct MulZK {
    pub c_alpha: BigInt,
    pub a: BigInt,
    pub b: BigInt,
    pub w: BigInt,
    pub y: BigInt,
    pub z: BigInt,
}

/// Proof that a decryption share was raised to the same secret exponent that
/// the public verification value `vi` commits to.
#[derive(Debug, Clone)]
pub struct DecryptShareZK {
    pub v: BigInt,
    pub vi: BigInt,
    pub e: BigInt,
    pub z: BigInt,
}

/// SHA-256 over the minimal big-endian representation of each input,
/// interpreted as a non-negative integer.
pub(crate) fn challenge(inputs: &[&BigInt]) -> BigInt {
    let mut hash = Sha256::new();
    for input in inputs {
        hash.update(&input.to_bytes_be().1);
    }
    BigInt::from_bytes_be(Sign::Plus, &hash.finalize())
}

/// `x` is in the multiplicative range `[1, modulus)`.
fn in_star(x: &BigInt, modulus: &BigInt) -> bool {
    x.sign() == Sign::Plus && x < modulus
}

/// `x` is in the additive range `[0, modulus)`.
fn in_range(x: &BigInt, modulus: &BigInt) -> bool {
    x.sign() != Sign::Minus && x < modulus
}

impl EncryptZK {
    /// Checks `(n+1)^w * z^{n^s} = b * c^e mod n^(s+1)` with the challenge
    /// recomputed from `(c, b)`.
    pub fn verify(&self, pk: &PublicKey, c: &BigInt) -> Result<(), ZKProofError> {
        let n_plus_one = pk.n_plus_one();
        let n_to_s = pk.n_to_s();
        let n_to_s_plus_one = pk.n_to_s_plus_one();

        if !in_star(c, n_to_s_plus_one)
            || !in_star(&self.b, n_to_s_plus_one)
            || !in_star(&self.z, n_to_s_plus_one)
            || !in_range(&self.w, n_to_s)
        {
            return Err(ZKProofError::VerificationFailed);
        }

        let e = challenge(&[c, &self.b]);

        let n_plus_one_to_w = n_plus_one.modpow(&self.w, n_to_s_plus_one);
        let z_to_n_to_s = self.z.modpow(n_to_s, n_to_s_plus_one);
        let left = (n_plus_one_to_w * z_to_n_to_s) % n_to_s_plus_one;

        let c_to_e = c.modpow(&e, n_to_s_plus_one);
        let right = (&self.b * c_to_e) % n_to_s_plus_one;

        if left != right {
            return Err(ZKProofError::VerificationFailed);
        }
        Ok(())
    }
}

impl MulZK {
    /// Checks both relations of the multiplication proof against the original
    /// ciphertext `ca` and the multiplication result `d`.
    pub fn verify(&self, pk: &PublicKey, d: &BigInt, ca: &BigInt) -> Result<(), ZKProofError> {
        let n_plus_one = pk.n_plus_one();
        let n_to_s = pk.n_to_s();
        let n_to_s_plus_one = pk.n_to_s_plus_one();

        if !in_star(ca, n_to_s_plus_one)
            || !in_star(d, n_to_s_plus_one)
            || !in_star(&self.c_alpha, n_to_s_plus_one)
            || !in_star(&self.a, n_to_s_plus_one)
            || !in_star(&self.b, n_to_s_plus_one)
            || !in_star(&self.y, n_to_s_plus_one)
            || !in_star(&self.z, n_to_s_plus_one)
            || !in_range(&self.w, n_to_s)
        {
            return Err(ZKProofError::VerificationFailed);
        }

        let e = challenge(&[ca, &self.c_alpha, d, &self.a, &self.b]);

        // (n+1)^w * z^{n^s} = b * c_alpha^e
        let n_plus_one_to_w = n_plus_one.modpow(&self.w, n_to_s_plus_one);
        let z_to_n_to_s = self.z.modpow(n_to_s, n_to_s_plus_one);
        let left = (n_plus_one_to_w * z_to_n_to_s) % n_to_s_plus_one;
        let c_alpha_to_e = self.c_alpha.modpow(&e, n_to_s_plus_one);
        let right = (&self.b * c_alpha_to_e) % n_to_s_plus_one;
        if left != right {
            return Err(ZKProofError::VerificationFailed);
        }

        // ca^w * y^{n^s} = a * d^e
        let ca_to_w = ca.modpow(&self.w, n_to_s_plus_one);
        let y_to_n_to_s = self.y.modpow(n_to_s, n_to_s_plus_one);
        let left = (ca_to_w * y_to_n_to_s) % n_to_s_plus_one;
        let d_to_e = d.modpow(&e, n_to_s_plus_one);
        let right = (&self.a * d_to_e) % n_to_s_plus_one;
        if left != right {
            return Err(ZKProofError::VerificationFailed);
        }
        Ok(())
    }
}

impl DecryptShareZK {
    /// Reconstructs the prover's commitments from `(z, e)` and checks that
    /// hashing them reproduces the challenge `e`.
    pub fn verify(
        &self,
        pk: &PublicKey,
        c: &BigInt,
        ds: &DecryptionShare,
    ) -> Result<(), ZKProofError> {
        let n_to_s_plus_one = pk.n_to_s_plus_one();

        if ds.index < 1 || ds.index > pk.l {
            return Err(ZKProofError::VerificationFailed);
        }
        let vi = &pk.vi[usize::from(ds.index) - 1];
        // The embedded verification values must be the public ones.
        if self.v != pk.v || &self.vi != vi {
            return Err(ZKProofError::VerificationFailed);
        }
        if !in_star(c, n_to_s_plus_one)
            || !in_star(&ds.ci, n_to_s_plus_one)
            || self.z.sign() == Sign::Minus
            || self.e.sign() == Sign::Minus
            || self.e.bits() > 256
        {
            return Err(ZKProofError::VerificationFailed);
        }

        let c_to_4 = c.modpow(&BigInt::from(4), n_to_s_plus_one);
        let ci_to_2 = ds.ci.modpow(&BigInt::from(2), n_to_s_plus_one);

        let minus_two_e = -(&self.e * BigInt::from(2));
        let ci_to_minus_2e = mod_pow_signed(&ds.ci, &minus_two_e, n_to_s_plus_one)
            .ok_or(ZKProofError::VerificationFailed)?;
        let a = (c_to_4.modpow(&self.z, n_to_s_plus_one) * ci_to_minus_2e) % n_to_s_plus_one;

        let vi_to_minus_e = mod_pow_signed(vi, &-&self.e, n_to_s_plus_one)
            .ok_or(ZKProofError::VerificationFailed)?;
        let b = (pk.v.modpow(&self.z, n_to_s_plus_one) * vi_to_minus_e) % n_to_s_plus_one;

        let e = challenge(&[&a, &b, &c_to_4, &ci_to_2]);
        if e != self.e {
            return Err(ZKProofError::VerificationFailed);
        }
        Ok(())
    }
}
