use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub token: String,
    pub count: u64,
}

impl FrequencyEntry {
    pub fn new(token: impl Into<String>, count: u64) -> Self {
        Self {
            token: token.into(),
            count,
        }
    }
}

/// Count descending, then token ascending.
fn ranking_order(a: (&str, u64), b: (&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Keeps the `k` best items of `items` in ranking order.
pub(crate) fn select_top<T>(items: &mut Vec<T>, k: usize, view: impl Fn(&T) -> (&str, u64)) {
    if k == 0 {
        items.clear();
        return;
    }
    let cmp = |a: &T, b: &T| ranking_order(view(a), view(b));
    // Keys are unique, so the order is total and partial selection is exact.
    if k < items.len() {
        items.select_nth_unstable_by(k - 1, cmp);
        items.truncate(k);
    }
    items.sort_unstable_by(cmp);
}

/// Returns at most `k` entries, highest count first, ties broken by ascending
/// token. Expects one entry per distinct token.
pub fn top_k<I>(entries: I, k: usize) -> Vec<FrequencyEntry>
where
    I: IntoIterator<Item = FrequencyEntry>,
{
    let mut entries: Vec<FrequencyEntry> = entries.into_iter().collect();
    select_top(&mut entries, k, |e| (e.token.as_str(), e.count));
    entries
}
