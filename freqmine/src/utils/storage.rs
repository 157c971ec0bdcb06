use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Flat storage for many small itemsets plus their support counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsetStorage {
    items: Vec<usize>,
    offsets: Vec<(usize, usize)>,
    supports: Vec<usize>,
}

/// All frequent itemsets of one size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentLevel {
    pub(crate) storage: ItemsetStorage,
    pub itemset_size: usize,
}

/// Per-size buckets of frequent itemsets; bucket `k` holds itemsets of size `k + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequentItemsets {
    levels: Vec<FrequentLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MiningSummary {
    /// Size of the largest frequent itemset, 0 when nothing is frequent.
    pub max_itemset_size: usize,
    pub total_itemsets: usize,
}

impl ItemsetStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `items` sorted and de-duplicated; returns its slot.
    pub fn add_itemset(&mut self, mut items: Vec<usize>, support: usize) -> usize {
        items.sort_unstable();
        items.dedup();

        let start = self.items.len();
        self.items.extend_from_slice(&items);
        self.offsets.push((start, items.len()));
        self.supports.push(support);

        self.offsets.len() - 1
    }

    pub fn get_itemset(&self, idx: usize) -> &[usize] {
        let (start, len) = self.offsets[idx];
        &self.items[start..start + len]
    }

    pub fn support(&self, idx: usize) -> usize {
        self.supports[idx]
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Reorders entries lexicographically by itemset.
    fn sort(&mut self) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_unstable_by(|&a, &b| self.get_itemset(a).cmp(self.get_itemset(b)));

        let mut sorted = ItemsetStorage {
            items: Vec::with_capacity(self.items.len()),
            offsets: Vec::with_capacity(self.offsets.len()),
            supports: Vec::with_capacity(self.supports.len()),
        };
        for idx in order {
            let start = sorted.items.len();
            sorted.items.extend_from_slice(self.get_itemset(idx));
            sorted.offsets.push((start, self.offsets[idx].1));
            sorted.supports.push(self.supports[idx]);
        }
        *self = sorted;
    }
}

impl FrequentLevel {
    pub fn new(itemset_size: usize) -> Self {
        Self {
            storage: ItemsetStorage::new(),
            itemset_size,
        }
    }

    pub fn add_itemset(&mut self, items: Vec<usize>, support: usize) -> usize {
        debug_assert_eq!(items.len(), self.itemset_size);
        self.storage.add_itemset(items, support)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn get_itemset(&self, idx: usize) -> &[usize] {
        self.storage.get_itemset(idx)
    }

    pub fn iter_itemsets(&self) -> impl Iterator<Item = &[usize]> {
        (0..self.storage.len()).map(move |idx| self.get_itemset(idx))
    }

    /// `(items, support)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[usize], usize)> {
        (0..self.storage.len()).map(move |idx| (self.get_itemset(idx), self.storage.support(idx)))
    }

    pub fn support_of(&self, items: &[usize]) -> Option<usize> {
        self.iter().find(|(set, _)| *set == items).map(|(_, support)| support)
    }
}

impl Serialize for FrequentLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Entry<'a> {
            items: &'a [usize],
            support: usize,
        }

        let itemsets: Vec<Entry<'_>> = self.iter().map(|(items, support)| Entry { items, support }).collect();
        let mut state = serializer.serialize_struct("FrequentLevel", 2)?;
        state.serialize_field("itemset_size", &self.itemset_size)?;
        state.serialize_field("itemsets", &itemsets)?;
        state.end()
    }
}

impl FrequentItemsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `items` to the bucket for its size, creating buckets as needed.
    pub fn record(&mut self, mut items: Vec<usize>, support: usize) {
        items.sort_unstable();
        items.dedup();
        let size = items.len();
        if size == 0 {
            return;
        }
        while self.levels.len() < size {
            self.levels.push(FrequentLevel::new(self.levels.len() + 1));
        }
        self.levels[size - 1].add_itemset(items, support);
    }

    /// Bucket `k`, holding itemsets of size `k + 1`.
    pub fn level(&self, k: usize) -> Option<&FrequentLevel> {
        self.levels.get(k)
    }

    /// Non-empty buckets, smallest itemsets first.
    pub fn iter_levels(&self) -> impl Iterator<Item = &FrequentLevel> {
        self.levels.iter().filter(|level| !level.is_empty())
    }

    /// Every itemset with its support, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&[usize], usize)> {
        self.levels.iter().flat_map(|level| level.iter())
    }

    pub fn support_of(&self, items: &[usize]) -> Option<usize> {
        let mut key = items.to_vec();
        key.sort_unstable();
        key.dedup();
        let k = key.len().checked_sub(1)?;
        self.level(k)?.support_of(&key)
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(FrequentLevel::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> MiningSummary {
        MiningSummary {
            max_itemset_size: self.iter_levels().map(|level| level.itemset_size).max().unwrap_or(0),
            total_itemsets: self.len(),
        }
    }

    /// Sorts every bucket and drops trailing empty buckets, so two results
    /// with the same content compare equal.
    pub(crate) fn canonicalize(&mut self) {
        for level in &mut self.levels {
            level.storage.sort();
        }
        while self.levels.last().is_some_and(FrequentLevel::is_empty) {
            self.levels.pop();
        }
    }
}
