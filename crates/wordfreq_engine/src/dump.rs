use std::io::{Read, Write};

use wordfreq_core::{FreqError, FreqResult, IoOp};

use crate::Tokenizer;

/// Writes the first `limit` raw tokens as `TOK: <token>` lines and returns
/// the total number of tokens in the stream. Tokens are printed lossily as
/// UTF-8.
pub fn dump_tokens<R: Read, W: Write>(
    tokenizer: Tokenizer<R>,
    limit: u64,
    out: &mut W,
) -> FreqResult<u64> {
    let mut seen = 0u64;
    tokenizer.for_each_token(|token| {
        seen += 1;
        if seen <= limit {
            writeln!(out, "TOK: {}", String::from_utf8_lossy(token))
                .map_err(|e| FreqError::io(IoOp::Write, e))?;
        }
        Ok::<(), FreqError>(())
    })?;
    out.flush().map_err(|e| FreqError::io(IoOp::Write, e))?;
    Ok(seen)
}
