use crate::{FreqError, FreqResult};

/// Maps a raw token to its canonical counting key.
pub trait Normalizer {
    /// Appends the canonical form of `raw` to `out`. The caller clears `out`
    /// between tokens and discards empty results.
    fn normalize_into(&self, raw: &[u8], out: &mut String);

    fn normalize(&self, raw: &[u8]) -> String {
        let mut out = String::with_capacity(raw.len());
        self.normalize_into(raw, &mut out);
        out
    }
}

/// Byte-class filter over ASCII.
///
/// The default policy lowercases ASCII letters and keeps only `a-z`, `0-9`
/// and the apostrophe. Every other byte, including all non-ASCII bytes, is
/// dropped without replacement. Case folding, digits and extra punctuation
/// are configurable; the output is always ASCII.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClassNormalizer {
    fold_case: bool,
    keep: [bool; 128],
}

impl CharClassNormalizer {
    /// Keeps letters only, folding case. Use the builder methods to add
    /// digits or punctuation.
    pub fn letters_only() -> Self {
        let mut keep = [false; 128];
        for b in b'a'..=b'z' {
            keep[usize::from(b)] = true;
        }
        for b in b'A'..=b'Z' {
            keep[usize::from(b)] = true;
        }
        Self {
            fold_case: true,
            keep,
        }
    }

    pub fn fold_case(mut self, fold: bool) -> Self {
        self.fold_case = fold;
        self
    }

    pub fn keep_digits(mut self, keep: bool) -> Self {
        for b in b'0'..=b'9' {
            self.keep[usize::from(b)] = keep;
        }
        self
    }

    /// Additionally keeps the given ASCII punctuation bytes.
    pub fn keep_punctuation(mut self, extra: &[u8]) -> FreqResult<Self> {
        for &b in extra {
            if !b.is_ascii_punctuation() {
                return Err(FreqError::invalid_argument(format!(
                    "cannot keep {:?}: only ASCII punctuation may be added",
                    char::from(b)
                )));
            }
            self.keep[usize::from(b)] = true;
        }
        Ok(self)
    }

    /// Drops previously kept punctuation, e.g. the default apostrophe.
    pub fn drop_punctuation(mut self, bytes: &[u8]) -> FreqResult<Self> {
        for &b in bytes {
            if !b.is_ascii_punctuation() {
                return Err(FreqError::invalid_argument(format!(
                    "cannot drop {:?}: only ASCII punctuation may be removed",
                    char::from(b)
                )));
            }
            self.keep[usize::from(b)] = false;
        }
        Ok(self)
    }

    #[inline]
    fn map_byte(&self, byte: u8) -> Option<u8> {
        if !byte.is_ascii() {
            return None;
        }
        let b = if self.fold_case {
            byte.to_ascii_lowercase()
        } else {
            byte
        };
        self.keep[usize::from(b)].then_some(b)
    }
}

impl Default for CharClassNormalizer {
    fn default() -> Self {
        let mut keep = [false; 128];
        for b in (b'a'..=b'z').chain(b'A'..=b'Z').chain(b'0'..=b'9') {
            keep[usize::from(b)] = true;
        }
        keep[usize::from(b'\'')] = true;
        Self {
            fold_case: true,
            keep,
        }
    }
}

impl Normalizer for CharClassNormalizer {
    fn normalize_into(&self, raw: &[u8], out: &mut String) {
        out.extend(raw.iter().filter_map(|&b| self.map_byte(b)).map(char::from));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_lowercases_and_filters() {
        let n = CharClassNormalizer::default();
        assert_eq!(n.normalize(b"Don't!"), "don't");
        assert_eq!(n.normalize(b"R2-D2"), "r2d2");
        assert_eq!(n.normalize(b"MAT."), "mat");
    }

    #[test]
    fn punctuation_only_token_is_empty() {
        let n = CharClassNormalizer::default();
        assert_eq!(n.normalize(b"--&&--"), "");
    }

    #[test]
    fn non_ascii_bytes_are_dropped() {
        let n = CharClassNormalizer::default();
        assert_eq!(n.normalize("caf\u{e9}".as_bytes()), "caf");
    }

    #[test]
    fn case_folding_can_be_disabled() {
        let n = CharClassNormalizer::default().fold_case(false);
        assert_eq!(n.normalize(b"MiXeD"), "MiXeD");
    }

    #[test]
    fn letters_only_drops_digits_and_apostrophe() {
        let n = CharClassNormalizer::letters_only();
        assert_eq!(n.normalize(b"it's-42nd"), "itsnd");
    }

    #[test]
    fn extra_punctuation_is_validated() {
        let n = CharClassNormalizer::default()
            .keep_punctuation(b"-")
            .unwrap();
        assert_eq!(n.normalize(b"Well-Known"), "well-known");
        assert!(CharClassNormalizer::default().keep_punctuation(b"x").is_err());
    }

    #[test]
    fn apostrophe_can_be_dropped() {
        let n = CharClassNormalizer::default().drop_punctuation(b"'").unwrap();
        assert_eq!(n.normalize(b"can't"), "cant");
        assert!(CharClassNormalizer::default().drop_punctuation(b"e").is_err());
    }

    #[test]
    fn normalize_into_appends() {
        let n = CharClassNormalizer::default();
        let mut out = String::from("x");
        n.normalize_into(b"Y", &mut out);
        assert_eq!(out, "xy");
    }
}
