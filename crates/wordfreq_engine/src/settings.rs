use wordfreq_core::{CharClassNormalizer, DelimiterSet, FreqError, FreqResult};

use crate::DEFAULT_CHUNK_SIZE;

/// Knobs for one counting pass.
#[derive(Debug, Clone)]
pub struct CountSettings {
    /// Bytes that split tokens.
    pub delimiters: DelimiterSet,
    pub normalizer: CharClassNormalizer,
    /// Number of entries in the report.
    pub top_k: usize,
    /// Read size; does not affect results.
    pub chunk_size: usize,
}

impl Default for CountSettings {
    fn default() -> Self {
        Self {
            delimiters: DelimiterSet::default(),
            normalizer: CharClassNormalizer::default(),
            top_k: 10,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl CountSettings {
    pub fn with_delimiters(mut self, delimiters: DelimiterSet) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn with_normalizer(mut self, normalizer: CharClassNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn validate(&self) -> FreqResult<()> {
        if self.chunk_size == 0 {
            return Err(FreqError::invalid_argument("chunk size must be at least 1"));
        }
        Ok(())
    }
}
