use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use wordfreq_core::{FreqError, FreqResult, IoOp};
use wordfreq_engine::{copy_bytes, count_bytes, count_reader, dump_tokens, Report, Tokenizer};
use wordfreq_logging::{wf_debug, wf_info};

use crate::cli::{BytesArgs, Command, TokensArgs, TopArgs};

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Top(args) => run_top(&args),
        Command::Tokens(args) => run_tokens(&args),
        Command::Bytes(args) => run_bytes(&args),
    }
}

fn run_top(args: &TopArgs) -> Result<()> {
    let settings = args.settings().context("invalid options")?;
    let label = source_label(&args.path);
    wf_debug!("settings for {}: {:?}", label, settings);

    let input = open_input(&args.path)?;
    let summary = count_reader(input, &settings)
        .map_err(|err| attach_path(err, &args.path))
        .with_context(|| format!("counting words in {label}"))?;

    let report = Report::from_summary(label, &summary, settings.top_k);
    let stdout = io::stdout();
    report
        .write_to(&mut stdout.lock())
        .context("printing the report")?;
    Ok(())
}

fn run_tokens(args: &TokensArgs) -> Result<()> {
    let delimiters = args.delimiters.to_set().context("invalid options")?;
    let label = source_label(&args.path);

    let tokenizer =
        Tokenizer::new(open_input(&args.path)?, delimiters).context("preparing the tokenizer")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let total = dump_tokens(tokenizer, args.limit, &mut out)
        .map_err(|err| attach_path(err, &args.path))
        .with_context(|| format!("tokenizing {label}"))?;
    writeln!(out, "Total tokens: {total}")
        .map_err(|e| FreqError::io(IoOp::Write, e))
        .context("printing the token count")?;
    Ok(())
}

fn run_bytes(args: &BytesArgs) -> Result<()> {
    let label = source_label(&args.path);
    let input = open_input(&args.path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let counted = if args.print {
        copy_bytes(input, &mut out)
    } else {
        count_bytes(input)
    };
    let total = counted
        .map_err(|err| attach_path(err, &args.path))
        .with_context(|| format!("reading {label}"))?;

    wf_info!("{} bytes in {}", total, label);
    let separator = if args.print { "\n" } else { "" };
    writeln!(out, "{separator}bytes = {total}")
        .and_then(|()| out.flush())
        .map_err(|e| FreqError::io(IoOp::Write, e))
        .context("printing the byte count")?;
    Ok(())
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn source_label(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn open_input(path: &Path) -> FreqResult<Box<dyn Read>> {
    if is_stdin(path) {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).map_err(|e| FreqError::io_at(IoOp::Open, path, e))?;
    Ok(Box::new(file))
}

/// Read failures name the input; write failures concern stdout and keep no path.
fn attach_path(err: FreqError, path: &Path) -> FreqError {
    let read_failure = matches!(err, FreqError::Io { op: IoOp::Read, .. });
    if read_failure && !is_stdin(path) {
        err.with_path(path)
    } else {
        err
    }
}
