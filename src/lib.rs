#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![deny(unused_mut)]

//! seed24 moves ed25519 keys between OpenSSH private key files and 24 word seed phrases. The
//! phrase encodes the 32 byte ed25519 seed plus one checksum byte using the BIP-39 English
//! wordlist, so a key can be written down on paper and restored later.

pub mod base64;
pub mod dictionary;
pub mod error;
pub mod keyfile;
pub mod keypair;
pub mod openssh;
pub mod phrase;
pub mod wordlist;

pub use error::{Error, Result};

use userspace_rng::random256;

/// Seed is the 32 byte ed25519 private key seed. It is the secret half of an OpenSSH ed25519
/// key and the value that a seed phrase encodes.
pub type Seed = [u8; 32];

/// random_seed will generate a new random seed using secure userspace entropy from the
/// userspace-random crate.
pub fn random_seed() -> Seed {
    let mut seed: Seed = [0u8; 32];
    let rand_bytes = random256();
    seed.copy_from_slice(&rand_bytes[..32]);
    seed
}
