//! Threshold Paillier cryptosystem with the Damgård-Jurik generalization.
//!
//! The secret key is split among `l` share-holders so that any `k` of them
//! can decrypt cooperatively while fewer than `k` learn nothing. Plaintexts
//! live in `Z_{n^s}` and ciphertexts in `Z*_{n^(s+1)}`; ciphertexts add
//! homomorphically and multiply by plaintext constants, and every
//! probabilistic operation can emit a non-interactive zero-knowledge proof
//! of correctness that third parties verify against the public key alone.
//!
//! Based on
//! [Damgård and Jurik, 2001](https://people.csail.mit.edu/rivest/voting/papers/DamgardJurikNielsen-AGeneralizationOfPailliersPublicKeySystemWithApplicationsToElectronicVoting.pdf).
//!
//! # Example
//! ```no_run
//! use damgard_jurik::generate_key;
//! use num_bigint::BigInt;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (pub_key, shares) = generate_key(512, 1, 5, 3)?;
//!
//! let (ciphertext, _) = pub_key.encrypt(&BigInt::from(42))?;
//! let partials = shares[..3]
//!     .iter()
//!     .map(|share| share.partial_decrypt(&ciphertext))
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(pub_key.combine_shares(&partials)?, BigInt::from(42));
//! # Ok(())
//! # }
//! ```

pub mod decryption_share;
pub mod functions;
pub mod key_share;
pub mod keygen;
pub mod polynomial;
pub mod pub_key;
pub mod zk_proof;

pub use decryption_share::DecryptionShare;
pub use key_share::{KeyShare, KeyShareError};
pub use keygen::{generate_key, generate_key_from_primes, FixedParams, KeyGenError};
pub use pub_key::{PubKeyError, PublicKey};
pub use zk_proof::{DecryptShareZK, EncryptZK, MulZK, ZKProofError};
