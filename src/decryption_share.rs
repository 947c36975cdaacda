use num_bigint::BigInt;

/// The partial decryption `c_i = c^{2 * delta * s_i} mod n^(s+1)` produced by
/// the share-holder with the given index. Contains no secret material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptionShare {
    pub index: u8,
    pub ci: BigInt,
}
