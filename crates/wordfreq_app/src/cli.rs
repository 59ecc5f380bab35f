use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use wordfreq_core::{CharClassNormalizer, DelimiterSet, FreqError, FreqResult};
use wordfreq_engine::{CountSettings, DEFAULT_CHUNK_SIZE};

#[derive(Debug, Parser)]
#[command(
    name = "wordfreq",
    version,
    about = "Stream a text file and report its most frequent words"
)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Silence all log output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Count normalized tokens and print the top K.
    Top(TopArgs),
    /// Print the first raw tokens and the total token count.
    Tokens(TokensArgs),
    /// Print the byte count of a file, optionally echoing it to stdout.
    Bytes(BytesArgs),
}

#[derive(Debug, Args)]
pub struct DelimiterArgs {
    /// Bytes that split tokens. Understands \s \t \n \r \\ escapes.
    #[arg(short, long, value_name = "BYTES")]
    pub delimiters: Option<String>,
}

impl DelimiterArgs {
    pub fn to_set(&self) -> FreqResult<DelimiterSet> {
        match &self.delimiters {
            Some(raw) => DelimiterSet::from_bytes(&unescape(raw)?),
            None => Ok(DelimiterSet::default()),
        }
    }
}

#[derive(Debug, Args)]
pub struct TopArgs {
    /// Input file, or `-` for stdin.
    pub path: PathBuf,

    /// Number of entries to report.
    #[arg(short = 'k', long = "top", default_value_t = 10)]
    pub top: usize,

    #[command(flatten)]
    pub delimiters: DelimiterArgs,

    /// Do not fold ASCII letters to lowercase.
    #[arg(long)]
    pub keep_case: bool,

    /// Drop digits instead of keeping them.
    #[arg(long)]
    pub drop_digits: bool,

    /// Extra ASCII punctuation to keep in tokens, e.g. "-".
    #[arg(long, value_name = "CHARS")]
    pub keep: Option<String>,

    /// ASCII punctuation to strip even if kept by default, e.g. "'".
    #[arg(long, value_name = "CHARS")]
    pub drop: Option<String>,

    /// Read size in bytes.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

impl TopArgs {
    pub fn settings(&self) -> FreqResult<CountSettings> {
        let mut normalizer = CharClassNormalizer::default()
            .fold_case(!self.keep_case)
            .keep_digits(!self.drop_digits);
        if let Some(extra) = &self.keep {
            normalizer = normalizer.keep_punctuation(extra.as_bytes())?;
        }
        if let Some(dropped) = &self.drop {
            normalizer = normalizer.drop_punctuation(dropped.as_bytes())?;
        }
        let settings = CountSettings::default()
            .with_delimiters(self.delimiters.to_set()?)
            .with_normalizer(normalizer)
            .with_top_k(self.top)
            .with_chunk_size(self.chunk_size);
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Args)]
pub struct TokensArgs {
    /// Input file, or `-` for stdin.
    pub path: PathBuf,

    /// How many tokens to print.
    #[arg(short, long, default_value_t = 20)]
    pub limit: u64,

    #[command(flatten)]
    pub delimiters: DelimiterArgs,
}

#[derive(Debug, Args)]
pub struct BytesArgs {
    pub path: PathBuf,

    /// Echo the file to stdout before the count.
    #[arg(long)]
    pub print: bool,
}

/// Expands the small escape set accepted on the command line.
fn unescape(spec: &str) -> FreqResult<Vec<u8>> {
    let mut out = Vec::with_capacity(spec.len());
    let mut bytes = spec.bytes();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        let escaped = match bytes.next() {
            Some(b's') => b' ',
            Some(b't') => b'\t',
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b'\\') => b'\\',
            Some(other) => {
                return Err(FreqError::invalid_argument(format!(
                    "unknown escape \\{} in delimiters",
                    char::from(other)
                )))
            }
            None => {
                return Err(FreqError::invalid_argument(
                    "delimiters end with a lone backslash",
                ))
            }
        };
        out.push(escaped);
    }
    Ok(out)
}
