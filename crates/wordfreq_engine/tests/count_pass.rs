use std::io::{self, Read};
use std::sync::Once;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use wordfreq_core::{
    CharClassNormalizer, DelimiterSet, FreqError, FrequencyEntry, IoOp, Normalizer,
};
use wordfreq_engine::{count_file, count_reader, count_tokens, CountSettings, Tokenizer};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(wordfreq_logging::initialize_for_tests);
}

fn sentence_settings() -> CountSettings {
    CountSettings::default().with_delimiters(DelimiterSet::from_bytes(b" \t\r\n.").unwrap())
}

#[test]
fn counts_the_cat_sentence() {
    init_logging();
    let summary = count_reader(&b"the Cat sat on the MAT."[..], &sentence_settings()).unwrap();

    assert_eq!(summary.raw_tokens, 6);
    assert_eq!(summary.counted_tokens(), 6);
    assert_eq!(summary.distinct_tokens(), 5);
    assert_eq!(summary.table.get("the"), Some(2));
    assert_eq!(summary.table.get("mat"), Some(1));
    assert_eq!(summary.table.get("Cat"), None);
    assert_eq!(
        summary.top_k(3),
        vec![
            FrequencyEntry::new("the", 2),
            FrequencyEntry::new("cat", 1),
            FrequencyEntry::new("mat", 1),
        ]
    );
}

#[test]
fn delimiter_only_input_counts_nothing() {
    init_logging();
    let summary = count_reader(&b"   ...   "[..], &sentence_settings()).unwrap();
    assert_eq!(summary.raw_tokens, 0);
    assert!(summary.table.is_empty());
    assert!(summary.top_k(10).is_empty());
}

#[test]
fn punctuation_tokens_are_discarded() {
    init_logging();
    let settings = CountSettings::default().with_delimiters(DelimiterSet::whitespace());
    let summary = count_reader(&b"hello && world ### hello"[..], &settings).unwrap();
    assert_eq!(summary.raw_tokens, 5);
    assert_eq!(summary.discarded_tokens, 2);
    assert_eq!(summary.counted_tokens(), 3);
}

#[test]
fn large_k_returns_every_entry_once() {
    init_logging();
    let summary = count_reader(&b"b a b c"[..], &sentence_settings()).unwrap();
    assert_eq!(
        summary.top_k(100),
        vec![
            FrequencyEntry::new("b", 2),
            FrequencyEntry::new("a", 1),
            FrequencyEntry::new("c", 1),
        ]
    );
}

#[test]
fn chunk_size_does_not_change_counts() {
    init_logging();
    let text = "It's a truth universally acknowledged, that a single man in possession \
                of a good fortune, must be in want of a wife.";
    let big = count_reader(text.as_bytes(), &CountSettings::default()).unwrap();
    let tiny =
        count_reader(text.as_bytes(), &CountSettings::default().with_chunk_size(1)).unwrap();
    assert_eq!(big.top_k(100), tiny.top_k(100));
    assert_eq!(big.table.get("a"), Some(4));
    assert_eq!(big.table.get("it's"), Some(1));
}

#[test]
fn custom_normalizer_is_honoured() {
    init_logging();
    let normalizer = CharClassNormalizer::default().fold_case(false);
    let tokenizer = Tokenizer::new(&b"Word word WORD"[..], DelimiterSet::whitespace()).unwrap();
    let summary = count_tokens(tokenizer, &normalizer).unwrap();
    assert_eq!(summary.distinct_tokens(), 3);
}

#[test]
fn normalizer_can_be_a_trait_object() {
    struct Upper;
    impl Normalizer for Upper {
        fn normalize_into(&self, raw: &[u8], out: &mut String) {
            out.extend(raw.iter().map(|b| char::from(b.to_ascii_uppercase())));
        }
    }
    let normalizer: &dyn Normalizer = &Upper;
    let tokenizer = Tokenizer::new(&b"ab Ab"[..], DelimiterSet::whitespace()).unwrap();
    let summary = count_tokens(tokenizer, normalizer).unwrap();
    assert_eq!(summary.table.get("AB"), Some(2));
}

#[test]
fn read_failure_aborts_the_pass() {
    init_logging();
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("bad sector"))
        }
    }
    let err = count_reader(Broken, &CountSettings::default()).unwrap_err();
    assert!(matches!(err, FreqError::Io { op: IoOp::Read, .. }));
}

#[test]
fn zero_chunk_size_is_an_invalid_argument() {
    let settings = CountSettings::default().with_chunk_size(0);
    let err = count_reader(&b"x"[..], &settings).unwrap_err();
    assert!(matches!(err, FreqError::InvalidArgument(_)));
}

#[test]
fn oversized_chunk_is_out_of_memory() {
    init_logging();
    let settings = CountSettings::default().with_chunk_size(usize::MAX);
    let err = count_reader(&b"a b"[..], &settings).unwrap_err();
    assert!(matches!(err, FreqError::OutOfMemory { .. }), "{err:?}");
}

#[test]
fn count_file_reads_from_disk() {
    init_logging();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("book.txt");
    std::fs::write(&path, "Tick tock; tick TOCK!\ntick").unwrap();

    let summary = count_file(&path, &CountSettings::default()).unwrap();
    assert_eq!(summary.bytes_read, 26);
    assert_eq!(
        summary.top_k(2),
        vec![FrequencyEntry::new("tick", 3), FrequencyEntry::new("tock", 2)]
    );
}

#[test]
fn count_file_reports_missing_path() {
    init_logging();
    let dir = tempfile::TempDir::new().unwrap();
    let err = count_file(dir.path().join("nope.txt"), &CountSettings::default()).unwrap_err();
    assert!(matches!(err, FreqError::Io { op: IoOp::Open, .. }));
    assert!(err.to_string().contains("nope.txt"));
}

proptest! {
    #[test]
    fn table_total_equals_non_empty_canonical_tokens(text in "[A-Za-z0-9' .,!?\n-]{0,300}") {
        let settings = CountSettings::default();
        let summary = count_reader(text.as_bytes(), &settings).unwrap();

        let expected = text
            .as_bytes()
            .split(|b| settings.delimiters.contains(*b))
            .filter(|raw| !raw.is_empty())
            .filter(|raw| !settings.normalizer.normalize(raw).is_empty())
            .count() as u64;

        prop_assert_eq!(summary.counted_tokens(), expected);
        prop_assert_eq!(summary.table.iter().map(|(_, c)| c).sum::<u64>(), expected);
        prop_assert_eq!(summary.raw_tokens, expected + summary.discarded_tokens);
    }
}
