use std::fs::File;
use std::io::Read;
use std::path::Path;

use wordfreq_core::{FreqError, FreqResult, FrequencyEntry, FrequencyTable, IoOp, Normalizer};
use wordfreq_logging::{wf_debug, wf_info};

use crate::{CountSettings, Tokenizer};

/// Outcome of one counting pass. The table is finished and read-only from
/// here on.
#[derive(Debug, Clone)]
pub struct CountSummary {
    pub table: FrequencyTable,
    pub bytes_read: u64,
    /// Raw tokens produced by the tokenizer.
    pub raw_tokens: u64,
    /// Raw tokens that normalized to an empty key and were skipped.
    pub discarded_tokens: u64,
}

impl CountSummary {
    /// Tokens that made it into the table; equals the table total.
    pub fn counted_tokens(&self) -> u64 {
        self.table.total()
    }

    pub fn distinct_tokens(&self) -> usize {
        self.table.len()
    }

    pub fn top_k(&self, k: usize) -> Vec<FrequencyEntry> {
        self.table.top_k(k)
    }
}

/// Runs the pass: tokenize, normalize, count.
///
/// Any error aborts the pass and the partially built table is dropped.
pub fn count_tokens<R, N>(tokenizer: Tokenizer<R>, normalizer: &N) -> FreqResult<CountSummary>
where
    R: Read,
    N: Normalizer + ?Sized,
{
    let mut table = FrequencyTable::new();
    let mut canonical = String::new();
    let mut discarded_tokens = 0u64;

    let stats = tokenizer.for_each_token(|raw| {
        canonical.clear();
        normalizer.normalize_into(raw, &mut canonical);
        if canonical.is_empty() {
            discarded_tokens += 1;
            return Ok(());
        }
        table.increment(&canonical).map(drop)
    })?;

    wf_info!(
        "counted {} tokens ({} distinct, {} discarded) from {} bytes",
        table.total(),
        table.len(),
        discarded_tokens,
        stats.bytes_read
    );
    Ok(CountSummary {
        table,
        bytes_read: stats.bytes_read,
        raw_tokens: stats.tokens,
        discarded_tokens,
    })
}

pub fn count_reader<R: Read>(reader: R, settings: &CountSettings) -> FreqResult<CountSummary> {
    settings.validate()?;
    let tokenizer =
        Tokenizer::with_chunk_size(reader, settings.delimiters.clone(), settings.chunk_size)?;
    count_tokens(tokenizer, &settings.normalizer)
}

pub fn count_file(path: impl AsRef<Path>, settings: &CountSettings) -> FreqResult<CountSummary> {
    let path = path.as_ref();
    wf_debug!("counting pass over {:?} with {:?}", path, settings);
    let file = File::open(path).map_err(|e| FreqError::io_at(IoOp::Open, path, e))?;
    count_reader(file, settings).map_err(|err| err.with_path(path))
}
