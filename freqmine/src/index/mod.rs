//! Item → transaction-id postings, the only view of the data the miners read.

mod builder;


use crate::dataset::Item;
use crate::utils::merge::intersect_sorted;

/// Postings for every item id in `0..=max_item`.
///
/// Each posting list is ascending. Under [`ItemMultiplicity::Collapse`] it is
/// also duplicate-free, so its length is the item's support count.
///
/// [`ItemMultiplicity::Collapse`]: crate::config::ItemMultiplicity::Collapse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: Vec<Vec<usize>>,
    transaction_count: usize,
}

impl InvertedIndex {
    /// Number of item slots, i.e. max observed item id + 1 (0 for an empty dataset).
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    /// Transaction ids containing `item`; empty for ids outside the index.
    pub fn postings(&self, item: Item) -> &[usize] {
        self.postings.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn support(&self, item: Item) -> usize {
        self.postings(item).len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Item, &[usize])> {
        self.postings
            .iter()
            .enumerate()
            .map(|(item, list)| (item, list.as_slice()))
    }

    /// Items whose support reaches `min_count`, with their support, ascending by id.
    pub fn frequent_items(&self, min_count: usize) -> Vec<(Item, usize)> {
        self.iter()
            .filter(|(_, list)| !list.is_empty() && list.len() >= min_count)
            .map(|(item, list)| (item, list.len()))
            .collect()
    }

    /// Transactions containing every item of `items`.
    pub fn cover(&self, items: &[Item]) -> Vec<usize> {
        let Some((&first, rest)) = items.split_first() else {
            return (0..self.transaction_count).collect();
        };
        rest.iter().fold(self.postings(first).to_vec(), |acc, &item| {
            intersect_sorted(&acc, self.postings(item))
        })
    }
}
