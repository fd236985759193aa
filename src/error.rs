#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! error defines the failures that can occur while encoding or restoring a key. Every error is
//! terminal; nothing in the crate retries.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result is the result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error enumerates everything that can go wrong between a key file and a seed phrase.
#[derive(Debug, Error)]
pub enum Error {
    /// The input key file does not exist.
    #[error("key file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input key file exists but could not be read.
    #[error("failed to read key file {}: {source}", .path.display())]
    FileUnreadable {
        /// Path of the key file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The key file does not contain a recognizable ed25519 private key.
    #[error("malformed key file: {0}")]
    MalformedKeyFile(String),

    /// The key file uses a cipher, KDF or key type other than unencrypted ed25519.
    #[error("unsupported key format: {0}")]
    UnsupportedKeyFormat(String),

    /// Base64 input violates the alphabet or length contract.
    #[error("invalid base64 encoding: {0}")]
    InvalidEncoding(String),

    /// A seed phrase did not have exactly 24 words.
    #[error("expected 24 words, got {0}")]
    WrongWordCount(usize),

    /// A seed phrase contained a word that is not in the wordlist.
    #[error("unknown word: {0}")]
    UnknownWord(String),

    /// The checksum byte of a seed phrase does not match its seed.
    #[error("checksum mismatch, the seed phrase was probably mistyped")]
    ChecksumMismatch,

    /// The ed25519 primitive rejected the seed.
    #[error("failed to derive ed25519 keypair: {0}")]
    KeyDerivation(String),

    /// An output file could not be created, written or restricted.
    #[error("failed to write {}: {source}", .path.display())]
    OutputWriteFailure {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An external wordlist could not be loaded or is not a valid 2048 word list.
    #[error("wordlist unavailable: {0}")]
    WordlistUnavailable(String),
}
