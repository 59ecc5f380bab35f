//! Wordfreq core: pure data structures for counting and ranking tokens.
mod delimiters;
mod error;
mod normalize;
mod rank;
mod table;

pub use delimiters::{DelimiterSet, DEFAULT_DELIMITERS};
pub use error::{FreqError, FreqResult, IoOp};
pub use normalize::{CharClassNormalizer, Normalizer};
pub use rank::{top_k, FrequencyEntry};
pub use table::{djb2, FrequencyTable, INITIAL_BUCKETS};
