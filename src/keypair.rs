#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![deny(unused_mut)]

//! keypair contains helper functions for using keypairs derived from seeds.

use ed25519_dalek::{Keypair, PublicKey, SecretKey};

use crate::phrase::seed_phrase_to_seed;
use crate::wordlist::WordlistSource;
use crate::{Error, Result, Seed};

/// keypair_from_seed produces the ed25519 keypair whose secret key is the 32 byte seed. This is
/// the same expansion OpenSSH performs, so the keypair matches the key the seed came from.
pub fn keypair_from_seed(seed: &Seed) -> Result<Keypair> {
    let secret = SecretKey::from_bytes(seed).map_err(|e| Error::KeyDerivation(e.to_string()))?;
    let public = PublicKey::from(&secret);
    Ok(Keypair { secret, public })
}

/// keypair_from_seed_phrase verifies a seed phrase and derives its keypair. No key material is
/// derived unless every word is known and the checksum matches.
pub fn keypair_from_seed_phrase<W: WordlistSource + ?Sized>(
    phrase: &str,
    wordlist: &W,
) -> Result<Keypair> {
    let seed = seed_phrase_to_seed(phrase, wordlist)?;
    keypair_from_seed(&seed)
}
