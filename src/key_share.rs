use std::sync::Arc;

use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use thiserror::Error;
use zeroize::Zeroize;

use crate::decryption_share::DecryptionShare;
use crate::functions::{random_int, FunctionError};
use crate::pub_key::PublicKey;
use crate::zk_proof::{challenge, DecryptShareZK};

#[derive(Error, Debug)]
pub enum KeyShareError {
    #[error("ciphertext is out of range [0, n^(s+1))")]
    CiphertextOutOfRange,
    #[error("share index {0} has no verification value")]
    InvalidIndex(u8),
    #[error("randomness failure: {0}")]
    Random(#[from] FunctionError),
}

/// One share of the threshold decryption key, held by the party with the
/// given index (starting at 1). The secret scalar is wiped on drop.
#[derive(Debug, Clone)]
pub struct KeyShare {
    pub_key: Arc<PublicKey>,
    index: u8,
    si: BigInt,
}

impl KeyShare {
    pub fn new(pub_key: Arc<PublicKey>, index: u8, si: BigInt) -> Self {
        KeyShare { pub_key, index, si }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn public_key(&self) -> &Arc<PublicKey> {
        &self.pub_key
    }

    /// Computes this party's decryption share
    /// `c_i = c^{2 * delta * s_i} mod n^(s+1)`.
    pub fn partial_decrypt(&self, c: &BigInt) -> Result<DecryptionShare, KeyShareError> {
        let n_to_s_plus_one = self.pub_key.n_to_s_plus_one();
        if c.sign() == Sign::Minus || c >= n_to_s_plus_one {
            return Err(KeyShareError::CiphertextOutOfRange);
        }
        let exponent = BigInt::from(2) * &self.pub_key.delta * &self.si;
        let ci = c.modpow(&exponent, n_to_s_plus_one);
        Ok(DecryptionShare {
            index: self.index,
            ci,
        })
    }

    pub fn partial_decrypt_with_proof(
        &self,
        c: &BigInt,
    ) -> Result<(DecryptionShare, DecryptShareZK), KeyShareError> {
        let ds = self.partial_decrypt(c)?;
        let proof = self.partial_decrypt_proof(c, &ds)?;
        Ok((ds, proof))
    }

    /// Proof of equality of discrete logs: `c_i^2` to base `c^4` and `vi` to
    /// base `v` share the exponent `delta * s_i`.
    pub fn partial_decrypt_proof(
        &self,
        c: &BigInt,
        ds: &DecryptionShare,
    ) -> Result<DecryptShareZK, KeyShareError> {
        let pk = &self.pub_key;
        let n_to_s_plus_one = pk.n_to_s_plus_one();

        // Wide enough that z = delta*s_i*e + r statistically hides the share.
        let num_bits = (usize::from(pk.s) + 2) * usize::from(pk.k) + 256;
        let r = random_int(num_bits)?;

        let c_to_4 = c.modpow(&BigInt::from(4), n_to_s_plus_one);
        let a = c_to_4.modpow(&r, n_to_s_plus_one);
        let b = pk.v.modpow(&r, n_to_s_plus_one);
        let ci_to_2 = ds.ci.modpow(&BigInt::from(2), n_to_s_plus_one);

        let e = challenge(&[&a, &b, &c_to_4, &ci_to_2]);

        // Over the integers; never reduced.
        let z = &pk.delta * &self.si * &e + &r;

        let vi = usize::from(self.index)
            .checked_sub(1)
            .and_then(|i| pk.vi.get(i))
            .cloned()
            .ok_or(KeyShareError::InvalidIndex(self.index))?;

        Ok(DecryptShareZK {
            v: pk.v.clone(),
            vi,
            e,
            z,
        })
    }
}

impl Zeroize for KeyShare {
    fn zeroize(&mut self) {
        self.si = BigInt::zero();
    }
}

impl Drop for KeyShare {
    fn drop(&mut self) {
        self.zeroize();
    }
}
