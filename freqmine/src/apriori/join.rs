use std::collections::HashSet;
use std::ops::Range;

use parking_lot::Mutex;

use super::ItemsetNode;
use crate::utils::merge::{intersect_sorted, union_len, union_sorted};

/// Admitted itemsets of the level under construction.
///
/// `seen` holds the sorted item vector of every node in `nodes`; sorted
/// vectors make the key independent of how the union was discovered.
#[derive(Debug, Default)]
pub(crate) struct LevelSink {
    pub(crate) nodes: Vec<ItemsetNode>,
    seen: HashSet<Vec<usize>>,
}

impl LevelSink {
    /// Check-and-insert for every candidate; the caller holds the lock for the whole merge.
    fn merge(&mut self, candidates: Vec<ItemsetNode>) {
        for node in candidates {
            if self.seen.insert(node.items.clone()) {
                self.nodes.push(node);
            }
        }
    }
}

/// Joins every pair drawn from blocks `a` and `b` of `prev` into candidates of
/// `target_len` items.
///
/// When `a` and `b` are the same block only pairs `x < y` are tried. Candidates
/// are buffered locally and merged into `sink` under one lock acquisition.
pub(crate) fn join_blocks(
    prev: &[ItemsetNode],
    a: Range<usize>,
    b: Range<usize>,
    target_len: usize,
    min_count: usize,
    sink: &Mutex<LevelSink>,
) {
    let same_block = a == b;
    let mut local = Vec::new();

    for x in a {
        let y_start = if same_block { x + 1 } else { b.start };
        for y in y_start..b.end {
            let (left, right) = (&prev[x], &prev[y]);
            if union_len(&left.items, &right.items) != target_len {
                continue;
            }
            let cover = intersect_sorted(&left.cover, &right.cover);
            if cover.len() < min_count {
                continue;
            }
            local.push(ItemsetNode {
                items: union_sorted(&left.items, &right.items),
                cover,
            });
        }
    }

    if !local.is_empty() {
        sink.lock().merge(local);
    }
}
