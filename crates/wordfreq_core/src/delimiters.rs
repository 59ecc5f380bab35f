use std::fmt;

use crate::{FreqError, FreqResult};

/// Whitespace plus common punctuation.
pub const DEFAULT_DELIMITERS: &[u8] = b" \t\r\n*.()[]/!,;:\"?<>-|\\_+=~`{}";

/// Set of separator bytes with O(1) membership.
#[derive(Clone, PartialEq, Eq)]
pub struct DelimiterSet {
    table: [bool; 256],
}

impl DelimiterSet {
    /// Builds a set from the given bytes. Duplicates are harmless; an empty
    /// input is rejected.
    pub fn from_bytes(bytes: &[u8]) -> FreqResult<Self> {
        if bytes.is_empty() {
            return Err(FreqError::invalid_argument("delimiter set is empty"));
        }
        let mut table = [false; 256];
        for &b in bytes {
            table[usize::from(b)] = true;
        }
        Ok(Self { table })
    }

    /// ASCII whitespace only: space, tab, CR, LF, form feed, vertical tab.
    pub fn whitespace() -> Self {
        let mut table = [false; 256];
        for b in [b' ', b'\t', b'\r', b'\n', 0x0c, 0x0b] {
            table[usize::from(b)] = true;
        }
        Self { table }
    }

    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        self.table[usize::from(byte)]
    }

    pub fn len(&self) -> usize {
        self.table.iter().filter(|&&d| d).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Member bytes in ascending order.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|&b| self.contains(b))
    }
}

impl Default for DelimiterSet {
    fn default() -> Self {
        let mut table = [false; 256];
        for &b in DEFAULT_DELIMITERS {
            table[usize::from(b)] = true;
        }
        Self { table }
    }
}

impl fmt::Debug for DelimiterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<_> = self.bytes().map(std::ascii::escape_default).collect();
        f.debug_set()
            .entries(members.iter().map(|e| e.to_string()))
            .finish()
    }
}
