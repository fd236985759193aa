#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]

//! keyfile moves keys between disk and seed phrases. Reading turns an OpenSSH private key file
//! into a seed phrase; restoring turns a seed phrase into a private key file and its `.pub`
//! companion. The private key file is created owner read/write only.

use std::env;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ed25519_dalek::Keypair;
use tracing::{debug, info, warn};
use zeroize::Zeroize;

use crate::keypair::keypair_from_seed_phrase;
use crate::openssh::{armor, build_private_key_blob, extract_seed, public_key_line};
use crate::phrase::seed_to_seed_phrase;
use crate::wordlist::WordlistSource;
use crate::{Error, Result, Seed};

/// PRIVATE_KEY_MODE is the permission mode of a restored private key file.
pub const PRIVATE_KEY_MODE: u32 = 0o600;

/// PUBLIC_KEY_MODE is the permission mode of a restored public key file.
pub const PUBLIC_KEY_MODE: u32 = 0o644;

/// default_key_path is `$HOME/.ssh/id_ed25519`, or None when HOME is not set.
pub fn default_key_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(".ssh").join("id_ed25519"))
}

/// public_key_path is the path of the `.pub` file that accompanies a private key file.
pub fn public_key_path(private_key_path: &Path) -> PathBuf {
    let mut path = OsString::from(private_key_path.as_os_str());
    path.push(".pub");
    PathBuf::from(path)
}

/// read_seed reads an OpenSSH private key file and extracts its ed25519 seed.
pub fn read_seed(path: &Path) -> Result<Seed> {
    debug!(path = %path.display(), "reading key file");
    let mut text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::FileUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let seed = extract_seed(&text);
    text.zeroize();
    seed
}

/// key_file_to_seed_phrase reads a private key file and returns its 24 word seed phrase.
pub fn key_file_to_seed_phrase<W: WordlistSource + ?Sized>(
    path: &Path,
    wordlist: &W,
) -> Result<String> {
    let mut seed = read_seed(path)?;
    let phrase = seed_to_seed_phrase(&seed, wordlist);
    seed.zeroize();
    Ok(phrase)
}

/// restore_key_files checks a seed phrase and writes its keypair to `outfile` and
/// `outfile.pub`. Nothing is written unless the phrase is valid. Returns the path of the public
/// key file.
pub fn restore_key_files<W: WordlistSource + ?Sized>(
    outfile: &Path,
    phrase: &str,
    wordlist: &W,
) -> Result<PathBuf> {
    let keypair = keypair_from_seed_phrase(phrase, wordlist)?;
    write_key_files(outfile, &keypair)
}

/// write_key_files writes a keypair as an OpenSSH private key file and public key file. If
/// either write fails, neither file is left behind. Returns the path of the public key file.
pub fn write_key_files(outfile: &Path, keypair: &Keypair) -> Result<PathBuf> {
    let mut secret = keypair.to_bytes();
    let mut blob = build_private_key_blob(keypair.public.as_bytes(), &secret);
    secret.zeroize();
    let mut private_text = armor(&blob);
    blob.zeroize();

    let result = write_file(outfile, private_text.as_bytes(), PRIVATE_KEY_MODE);
    private_text.zeroize();
    result?;
    info!(path = %outfile.display(), "wrote private key");

    let pub_path = public_key_path(outfile);
    let public_text = public_key_line(keypair.public.as_bytes());
    if let Err(e) = write_file(&pub_path, public_text.as_bytes(), PUBLIC_KEY_MODE) {
        remove_partial(outfile);
        return Err(e);
    }
    info!(path = %pub_path.display(), "wrote public key");
    Ok(pub_path)
}

// write_file creates or truncates `path` with `mode` and writes `contents`. The mode is applied
// at creation and again before writing, so a file that already existed with wider permissions
// is narrowed before it holds any key material. A file that was opened but not fully written is
// removed.
fn write_file(path: &Path, contents: &[u8], mode: u32) -> Result<()> {
    let failure = |source: io::Error| Error::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    let mut file = options.open(path).map_err(failure)?;

    let written = restrict(&file, mode)
        .and_then(|()| file.write_all(contents))
        .and_then(|()| file.sync_all());
    if let Err(source) = written {
        drop(file);
        remove_partial(path);
        return Err(failure(source));
    }
    Ok(())
}

#[cfg(unix)]
fn restrict(file: &fs::File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn restrict(_file: &fs::File, _mode: u32) -> io::Result<()> {
    Ok(())
}

fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "failed to remove partially written file");
    }
}
