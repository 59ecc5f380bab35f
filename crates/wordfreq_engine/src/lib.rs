//! Wordfreq engine: streaming tokenizer, counting pass and report output.
mod bytes;
mod count;
mod dump;
mod report;
mod settings;
mod tokenizer;

pub use bytes::{copy_bytes, count_bytes, count_file_bytes, print_file};
pub use count::{count_file, count_reader, count_tokens, CountSummary};
pub use dump::dump_tokens;
pub use report::Report;
pub use settings::CountSettings;
pub use tokenizer::{stream_tokens, TokenizeStats, Tokenizer, DEFAULT_CHUNK_SIZE};
