//! seed24 command line tool.
//!
//! `seed24 [<keyfile>]` prints the 24 word seed phrase of an OpenSSH ed25519 private key.
//! `seed24 restore <outfile> <words>...` writes the key back out from its seed phrase.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use seed24::keyfile::{default_key_path, key_file_to_seed_phrase, restore_key_files};
use seed24::wordlist::{English, Wordlist, WordlistSource};
use seed24::Error;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroize;

/// Convert an OpenSSH ed25519 private key to and from a 24 word seed phrase
#[derive(Parser)]
#[command(name = "seed24")]
#[command(version)]
#[command(long_about = None)]
struct Cli {
    /// OpenSSH private key to encode [default: $HOME/.ssh/id_ed25519]
    keyfile: Option<PathBuf>,

    /// File with the 2048 word list to use instead of the built in BIP-39 English list
    #[arg(long, global = true, env = "SEED24_WORDLIST")]
    wordlist: Option<PathBuf>,

    /// The logging level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "SEED24_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a private key file and its .pub file from a seed phrase
    Restore {
        /// Path of the private key file to write; the public key goes to <OUTFILE>.pub
        outfile: PathBuf,

        /// The 24 words of the seed phrase, read from standard input when omitted
        words: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().ok();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    // Standard output carries the seed phrase, so logs go to standard error.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let wordlist: Box<dyn WordlistSource> = match &cli.wordlist {
        Some(path) => Box::new(Wordlist::load(path)?),
        None => {
            debug!("using the built in English wordlist");
            Box::new(English)
        }
    };

    match cli.command {
        Some(Commands::Restore { outfile, words }) => {
            cmd_restore(&outfile, &words, wordlist.as_ref())
        }
        None => cmd_encode(cli.keyfile, wordlist.as_ref()),
    }
}

fn cmd_encode(keyfile: Option<PathBuf>, wordlist: &dyn WordlistSource) -> Result<()> {
    let path = keyfile
        .or_else(default_key_path)
        .ok_or_else(|| Error::FileNotFound(PathBuf::from("$HOME/.ssh/id_ed25519")))?;
    let mut phrase = key_file_to_seed_phrase(&path, wordlist)?;
    let printed = print_line(&phrase);
    phrase.zeroize();
    printed
}

fn cmd_restore(outfile: &Path, words: &[String], wordlist: &dyn WordlistSource) -> Result<()> {
    // Words may arrive as separate arguments, as one quoted argument, or on standard input.
    let mut phrase = if words.is_empty() {
        debug!("reading seed phrase from standard input");
        let stdin = io::stdin();
        if stdin.is_terminal() {
            eprint!("enter seed phrase: ");
        }
        let mut line = String::new();
        stdin
            .read_line(&mut line)
            .map_err(|e| anyhow!("failed to read seed phrase from standard input: {}", e))?;
        line
    } else {
        words.join(" ")
    };

    let result = restore_key_files(outfile, &phrase, wordlist);
    phrase.zeroize();
    let pub_path = result?;
    print_line(&format!(
        "wrote {} and {}",
        outfile.display(),
        pub_path.display()
    ))
}

// print_line writes to standard output without panicking when the reader has gone away.
fn print_line(line: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", line)
        .and_then(|()| out.flush())
        .map_err(|e| anyhow!("failed to write to standard output: {}", e))
}
