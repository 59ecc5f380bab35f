//! Streaming tokenizer over any byte source.
//!
//! Input is pulled in fixed-size chunks and only the token currently being
//! assembled is buffered, so memory stays bounded by the chunk size plus the
//! longest token seen, whatever the input length.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use wordfreq_core::{DelimiterSet, FreqError, FreqResult, IoOp};
use wordfreq_logging::{wf_debug, wf_warn};

pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// First allocation for the token accumulator; it doubles from here.
const INITIAL_TOKEN_CAPACITY: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenizeStats {
    pub bytes_read: u64,
    pub tokens: u64,
}

/// Lazy, lending sequence of raw tokens.
///
/// Each token is a maximal non-empty run of non-delimiter bytes, yielded in
/// stream order. A token borrows the tokenizer's accumulator and is only
/// valid until the next call. The sequence is finite and cannot be restarted;
/// after an error it is fused and yields `Ok(None)`.
pub struct Tokenizer<R> {
    reader: R,
    origin: Option<PathBuf>,
    delimiters: DelimiterSet,
    chunk: Vec<u8>,
    pos: usize,
    filled: usize,
    token: Vec<u8>,
    lent: bool,
    done: bool,
    stats: TokenizeStats,
}

impl Tokenizer<File> {
    /// Opens `path` for binary reading. Fails before any token is produced if
    /// the file cannot be opened.
    pub fn open(path: impl AsRef<Path>, delimiters: DelimiterSet) -> FreqResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FreqError::io_at(IoOp::Open, path, e))?;
        wf_debug!("tokenizing {:?}", path);
        let mut tokenizer = Self::new(file, delimiters)?;
        tokenizer.origin = Some(path.to_path_buf());
        Ok(tokenizer)
    }
}

impl<R: Read> Tokenizer<R> {
    pub fn new(reader: R, delimiters: DelimiterSet) -> FreqResult<Self> {
        Self::build(reader, delimiters, DEFAULT_CHUNK_SIZE)
    }

    /// Like [`Tokenizer::new`] with an explicit read size. Any size of at
    /// least one byte yields the same tokens.
    pub fn with_chunk_size(
        reader: R,
        delimiters: DelimiterSet,
        chunk_size: usize,
    ) -> FreqResult<Self> {
        if chunk_size == 0 {
            return Err(FreqError::invalid_argument("chunk size must be at least 1"));
        }
        Self::build(reader, delimiters, chunk_size)
    }

    fn build(reader: R, delimiters: DelimiterSet, chunk_size: usize) -> FreqResult<Self> {
        let mut chunk = Vec::new();
        chunk
            .try_reserve_exact(chunk_size)
            .map_err(|_| FreqError::out_of_memory("allocating the read buffer"))?;
        chunk.resize(chunk_size, 0);
        Ok(Self {
            reader,
            origin: None,
            delimiters,
            chunk,
            pos: 0,
            filled: 0,
            token: Vec::new(),
            lent: false,
            done: false,
            stats: TokenizeStats::default(),
        })
    }

    /// Advances to the next raw token.
    pub fn next_token(&mut self) -> FreqResult<Option<&[u8]>> {
        if self.lent {
            self.token.clear();
            self.lent = false;
        }
        match self.scan() {
            Ok(true) => {
                self.lent = true;
                self.stats.tokens += 1;
                Ok(Some(self.token.as_slice()))
            }
            Ok(false) => Ok(None),
            Err(err) => {
                self.release();
                let err = match &self.origin {
                    Some(path) => err.with_path(path.clone()),
                    None => err,
                };
                wf_warn!("tokenizer stopped after {} tokens: {}", self.stats.tokens, err);
                Err(err)
            }
        }
    }

    /// Feeds every remaining token to `handler`. A handler error stops the
    /// pass at once and is returned unchanged.
    pub fn for_each_token<E, F>(mut self, mut handler: F) -> Result<TokenizeStats, E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
        E: From<FreqError>,
    {
        while let Some(token) = self.next_token()? {
            handler(token)?;
        }
        Ok(self.stats)
    }

    pub fn stats(&self) -> TokenizeStats {
        self.stats
    }

    /// Returns `true` once a complete token sits in the accumulator.
    fn scan(&mut self) -> FreqResult<bool> {
        while !self.done {
            while self.pos < self.filled {
                let window = &self.chunk[self.pos..self.filled];
                let delimiters = &self.delimiters;
                match window.iter().position(|&b| delimiters.contains(b)) {
                    Some(offset) => {
                        append(&mut self.token, &window[..offset])?;
                        self.pos += offset + 1;
                        if !self.token.is_empty() {
                            return Ok(true);
                        }
                    }
                    None => {
                        append(&mut self.token, window)?;
                        self.pos = self.filled;
                    }
                }
            }
            if !self.refill()? {
                self.done = true;
                return Ok(!self.token.is_empty());
            }
        }
        Ok(false)
    }

    fn refill(&mut self) -> FreqResult<bool> {
        loop {
            match self.reader.read(&mut self.chunk) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    self.pos = 0;
                    self.filled = n;
                    self.stats.bytes_read += n as u64;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(FreqError::io(IoOp::Read, e)),
            }
        }
    }

    /// Drops the buffers and fuses the sequence. The partial token is lost.
    fn release(&mut self) {
        self.done = true;
        self.lent = false;
        self.token = Vec::new();
        self.chunk = Vec::new();
        self.pos = 0;
        self.filled = 0;
    }
}

/// Appends `bytes`, doubling capacity from [`INITIAL_TOKEN_CAPACITY`].
fn append(token: &mut Vec<u8>, bytes: &[u8]) -> FreqResult<()> {
    let oom = || FreqError::out_of_memory("growing the token buffer");
    let needed = token.len().checked_add(bytes.len()).ok_or_else(oom)?;
    if needed > token.capacity() {
        let capacity = doubled_capacity(token.capacity(), needed)?;
        token
            .try_reserve_exact(capacity - token.len())
            .map_err(|_| oom())?;
    }
    token.extend_from_slice(bytes);
    Ok(())
}

/// Smallest capacity reachable by doubling from `current` (at least
/// [`INITIAL_TOKEN_CAPACITY`]) that holds `needed` bytes.
fn doubled_capacity(current: usize, needed: usize) -> FreqResult<usize> {
    let mut capacity = current.max(INITIAL_TOKEN_CAPACITY);
    while capacity < needed {
        capacity = capacity
            .checked_mul(2)
            .ok_or_else(|| FreqError::out_of_memory("growing the token buffer"))?;
    }
    Ok(capacity)
}

/// Opens `path` and feeds each raw token to `handler`.
pub fn stream_tokens<E, F>(
    path: impl AsRef<Path>,
    delimiters: DelimiterSet,
    handler: F,
) -> Result<TokenizeStats, E>
where
    F: FnMut(&[u8]) -> Result<(), E>,
    E: From<FreqError>,
{
    Tokenizer::open(path, delimiters)?.for_each_token(handler)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_doubles_from_initial_capacity() {
        let mut token = Vec::new();
        append(&mut token, b"a").unwrap();
        assert_eq!(token.capacity(), INITIAL_TOKEN_CAPACITY);

        append(&mut token, &[b'x'; 127]).unwrap();
        assert_eq!(token.capacity(), INITIAL_TOKEN_CAPACITY);

        append(&mut token, b"y").unwrap();
        assert_eq!(token.capacity(), 2 * INITIAL_TOKEN_CAPACITY);

        append(&mut token, &[b'z'; 600]).unwrap();
        assert_eq!(token.capacity(), 8 * INITIAL_TOKEN_CAPACITY);
        assert_eq!(token.len(), 729);
    }

    #[test]
    fn doubled_capacity_rounds_up_by_powers_of_two() {
        assert_eq!(doubled_capacity(0, 1).unwrap(), INITIAL_TOKEN_CAPACITY);
        assert_eq!(doubled_capacity(0, 300).unwrap(), 4 * INITIAL_TOKEN_CAPACITY);
        assert_eq!(doubled_capacity(256, 257).unwrap(), 512);
    }

    #[test]
    fn doubled_capacity_overflow_is_out_of_memory() {
        let err = doubled_capacity(INITIAL_TOKEN_CAPACITY, usize::MAX / 2 + 2).unwrap_err();
        assert!(matches!(err, FreqError::OutOfMemory { .. }), "{err:?}");
    }

    #[test]
    fn accumulator_keeps_capacity_between_tokens() {
        let input = format!("{} b", "a".repeat(300));
        let mut tokenizer = Tokenizer::new(input.as_bytes(), DelimiterSet::whitespace()).unwrap();
        assert_eq!(tokenizer.next_token().unwrap().map(<[u8]>::len), Some(300));
        assert_eq!(tokenizer.next_token().unwrap(), Some(&b"b"[..]));
        assert!(tokenizer.token.capacity() >= 300);
    }
}
