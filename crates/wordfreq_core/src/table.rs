//! Chained hash table from canonical token to occurrence count.
//!
//! Entries live in an arena and link to the next entry of their bucket by
//! index. The bucket array only holds chain heads, so a resize relinks
//! entries without moving keys.

use wordfreq_logging::wf_trace;

use crate::rank::{select_top, FrequencyEntry};
use crate::{FreqError, FreqResult};

/// Bucket count allocated by the first insert.
pub const INITIAL_BUCKETS: usize = 1024;

/// djb2 string hash: `h = h * 33 + byte`, seeded with 5381, wrapping.
pub fn djb2(bytes: &[u8]) -> u64 {
    bytes.iter().fold(5381u64, |h, &b| {
        h.wrapping_shl(5).wrapping_add(h).wrapping_add(u64::from(b))
    })
}

#[derive(Debug, Clone)]
struct Slot {
    key: String,
    count: u64,
    hash: u64,
    next: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    buckets: Vec<Option<usize>>,
    entries: Vec<Slot>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `key` and returns its updated count.
    ///
    /// A new key first grows the bucket array if the insert would push the
    /// load factor above 3/4. On `OutOfMemory` the stored entries are left
    /// exactly as they were.
    pub fn increment(&mut self, key: &str) -> FreqResult<u64> {
        let hash = djb2(key.as_bytes());
        if let Some(idx) = self.find(hash, key) {
            let slot = &mut self.entries[idx];
            slot.count += 1;
            self.total += 1;
            return Ok(slot.count);
        }

        self.grow_for_insert()?;
        self.entries
            .try_reserve(1)
            .map_err(|_| FreqError::out_of_memory("growing the frequency table"))?;
        let mut owned = String::new();
        owned
            .try_reserve_exact(key.len())
            .map_err(|_| FreqError::out_of_memory("copying a token into the frequency table"))?;
        owned.push_str(key);

        let bucket = self.bucket_of(hash);
        self.entries.push(Slot {
            key: owned,
            count: 1,
            hash,
            next: self.buckets[bucket],
        });
        self.buckets[bucket] = Some(self.entries.len() - 1);
        self.total += 1;
        Ok(1)
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.find(djb2(key.as_bytes()), key)
            .map(|idx| self.entries[idx].count)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        if self.buckets.is_empty() {
            0.0
        } else {
            self.entries.len() as f64 / self.buckets.len() as f64
        }
    }

    /// All `(key, count)` pairs. The order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|slot| (slot.key.as_str(), slot.count))
    }

    /// Consumes the table, handing over the owned keys.
    pub fn into_entries(self) -> Vec<FrequencyEntry> {
        self.entries
            .into_iter()
            .map(|slot| FrequencyEntry::new(slot.key, slot.count))
            .collect()
    }

    /// The `k` highest counts, ties broken by ascending key. Only the
    /// selected keys are copied.
    pub fn top_k(&self, k: usize) -> Vec<FrequencyEntry> {
        let mut refs: Vec<(&str, u64)> = self.iter().collect();
        select_top(&mut refs, k, |&(key, count)| (key, count));
        refs.into_iter()
            .map(|(key, count)| FrequencyEntry::new(key, count))
            .collect()
    }

    fn find(&self, hash: u64, key: &str) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        let mut cursor = self.buckets[self.bucket_of(hash)];
        while let Some(idx) = cursor {
            let slot = &self.entries[idx];
            if slot.hash == hash && slot.key == key {
                return Some(idx);
            }
            cursor = slot.next;
        }
        None
    }

    #[inline]
    fn bucket_of(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    fn grow_for_insert(&mut self) -> FreqResult<()> {
        let target = bucket_target(self.buckets.len(), self.entries.len() + 1)?;
        if target == self.buckets.len() {
            return Ok(());
        }
        self.rehash(target)
    }

    fn rehash(&mut self, new_count: usize) -> FreqResult<()> {
        let mut heads: Vec<Option<usize>> = Vec::new();
        heads
            .try_reserve_exact(new_count)
            .map_err(|_| FreqError::out_of_memory("allocating hash buckets"))?;
        heads.resize(new_count, None);

        for (idx, slot) in self.entries.iter_mut().enumerate() {
            let bucket = (slot.hash % new_count as u64) as usize;
            slot.next = heads[bucket];
            heads[bucket] = Some(idx);
        }

        wf_trace!(
            "frequency table resized: {} -> {} buckets ({} entries)",
            self.buckets.len(),
            new_count,
            self.entries.len()
        );
        self.buckets = heads;
        Ok(())
    }
}

/// Bucket count that keeps `after` entries at or below a 3/4 load factor:
/// `buckets` itself when it already does, otherwise the first doubling
/// (from [`INITIAL_BUCKETS`] for an empty table) that does.
fn bucket_target(buckets: usize, after: usize) -> FreqResult<usize> {
    let needed = after
        .checked_mul(4)
        .ok_or_else(|| FreqError::out_of_memory("sizing the bucket array"))?;
    let fits = |n: usize| n.checked_mul(3).is_none_or(|cap| cap >= needed);
    if buckets > 0 && fits(buckets) {
        return Ok(buckets);
    }
    let mut count = if buckets == 0 { INITIAL_BUCKETS } else { buckets };
    while !fits(count) {
        count *= 2;
    }
    Ok(count)
}
