use std::collections::HashMap;

use super::tree::{FPTree, PrefixPath, ROOT};
use crate::index::InvertedIndex;

/// Items with support ≥ `min_count`, most frequent first, ties by ascending item id.
pub fn frequent_singles(index: &InvertedIndex, min_count: usize) -> Vec<(usize, usize)> {
    let mut frequent = index.frequent_items(min_count);
    frequent.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    frequent
}

/// Builds the main tree straight from the postings.
///
/// Every transaction keeps a cursor into the tree, starting at the root.
/// Items are visited in `order`; each transaction in an item's posting list
/// moves its cursor one step down along that item. Since all transactions see
/// the items in the same order, shared prefixes land on shared paths.
///
/// A transaction id repeated `m` times in a posting list moves the transaction's
/// first `m` cursors. Cursor `j` follows the items occurring more than `j` times,
/// so every path keeps distinct items and a node's count is the summed smallest
/// multiplicity of the items on its path.
pub fn build_fp_tree(index: &InvertedIndex, order: &[(usize, usize)]) -> FPTree {
    let mut tree = FPTree::new();
    let mut cursors: Vec<Vec<usize>> = vec![Vec::new(); index.transaction_count()];

    for &(item, _) in order {
        for run in index.postings(item).chunk_by(|a, b| a == b) {
            let layers = &mut cursors[run[0]];
            if layers.len() < run.len() {
                layers.resize(run.len(), ROOT);
            }
            for cursor in &mut layers[..run.len()] {
                *cursor = tree.advance(*cursor, item, 1);
            }
        }
    }

    tree
}

/// Builds a projected tree from one item's conditional pattern base.
///
/// Items are re-ranked by their summed count inside `base`; those below
/// `min_count` are left out. Insertion works like [`build_fp_tree`], with one
/// cursor per pattern-base entry and the entry's count as the increment.
pub fn build_conditional_fp_tree(base: &[PrefixPath], min_count: usize) -> FPTree {
    let mut local: HashMap<usize, (usize, Vec<usize>)> = HashMap::new();
    for (entry, path) in base.iter().enumerate() {
        for &item in &path.items {
            let (count, entries) = local.entry(item).or_default();
            *count += path.count;
            entries.push(entry);
        }
    }

    let mut order: Vec<(usize, usize, Vec<usize>)> = local
        .into_iter()
        .filter(|(_, (count, _))| *count >= min_count)
        .map(|(item, (count, entries))| (item, count, entries))
        .collect();
    order.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut tree = FPTree::new();
    let mut cursors = vec![ROOT; base.len()];
    for (item, _, entries) in &order {
        for &entry in entries {
            cursors[entry] = tree.advance(cursors[entry], *item, base[entry].count);
        }
    }

    tree
}
