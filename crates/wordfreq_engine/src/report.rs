use std::fmt;
use std::io::Write;

use wordfreq_core::{FreqError, FreqResult, FrequencyEntry, IoOp};

use crate::CountSummary;

/// Human-readable top-K listing for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub source: String,
    pub requested: usize,
    pub ranked: Vec<FrequencyEntry>,
    pub total_tokens: u64,
    pub distinct_tokens: usize,
}

impl Report {
    pub fn from_summary(source: impl Into<String>, summary: &CountSummary, k: usize) -> Self {
        Self {
            source: source.into(),
            requested: k,
            ranked: summary.top_k(k),
            total_tokens: summary.counted_tokens(),
            distinct_tokens: summary.distinct_tokens(),
        }
    }

    /// Writes the whole report and flushes `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> FreqResult<()> {
        write!(out, "{self}").map_err(|e| FreqError::io(IoOp::Write, e))?;
        out.flush().map_err(|e| FreqError::io(IoOp::Write, e))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Top {} words in {}:", self.requested, self.source)?;
        for (rank, entry) in self.ranked.iter().enumerate() {
            writeln!(f, "{:>2}) {:<20} {}", rank + 1, entry.token, entry.count)?;
        }
        writeln!(
            f,
            "Total tokens: {}, distinct: {}",
            self.total_tokens, self.distinct_tokens
        )
    }
}
