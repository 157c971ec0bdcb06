//! Level-wise Apriori over an inverted index.
//!
//! Level `k` holds the frequent `(k + 1)`-itemsets together with the ids of the
//! transactions covering them. Each level is produced by joining pairs of the
//! previous level in parallel; a level starts only after the previous one is
//! complete.

mod blocks;
mod join;

#[cfg(test)]
mod tests;

use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::index::InvertedIndex;
use crate::scheduler::{Job, Scheduler};
use crate::utils::FrequentItemsets;

pub use blocks::{block_count, BlockPlan};
use join::{join_blocks, LevelSink};

/// Upper bound on the number of levels built.
pub const MAX_LEVELS: usize = 100;

/// A frequent itemset and the transactions that contain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsetNode {
    /// Ascending, distinct item ids.
    pub items: Vec<usize>,
    /// Ascending transaction ids, the intersection of the members' postings.
    pub cover: Vec<usize>,
}

impl ItemsetNode {
    pub fn support(&self) -> usize {
        self.cover.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AprioriTable {
    levels: Vec<Vec<ItemsetNode>>,
    min_support_count: usize,
}

impl AprioriTable {
    /// Mines every frequent itemset of `index`.
    ///
    /// `fanout` is the number of join tasks each level aims for; `min_count`
    /// below 1 is treated as 1.
    pub fn build<S: Scheduler + ?Sized>(index: &InvertedIndex, min_count: usize, scheduler: &S, fanout: usize) -> Self {
        let min_count = min_count.max(1);
        let start = Instant::now();

        let level0: Vec<ItemsetNode> = index
            .iter()
            .filter(|(_, postings)| !postings.is_empty() && postings.len() >= min_count)
            .map(|(item, postings)| ItemsetNode {
                items: vec![item],
                cover: postings.to_vec(),
            })
            .collect();
        info!(itemsets = level0.len(), min_count, "apriori level 0 built");

        let mut levels = Vec::new();
        if !level0.is_empty() {
            levels.push(level0);
        }

        while let Some(prev) = levels.last() {
            if levels.len() >= MAX_LEVELS {
                warn!(levels = levels.len(), "apriori level cap reached, stopping");
                break;
            }
            let target_len = levels.len() + 1;
            let next = join_level(prev, target_len, min_count, scheduler, fanout);
            info!(
                level = levels.len(),
                from = prev.len(),
                itemsets = next.len(),
                "apriori level built"
            );
            if next.is_empty() {
                break;
            }
            levels.push(next);
        }

        info!(
            levels = levels.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "apriori finished"
        );
        Self {
            levels,
            min_support_count: min_count,
        }
    }

    /// Itemsets of size `k + 1`; empty past the last level.
    pub fn level(&self, k: usize) -> &[ItemsetNode] {
        self.levels.get(k).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn levels(&self) -> &[Vec<ItemsetNode>] {
        &self.levels
    }

    pub fn min_support_count(&self) -> usize {
        self.min_support_count
    }

    pub fn frequent_itemsets(&self) -> FrequentItemsets {
        let mut result = FrequentItemsets::new();
        for node in self.levels.iter().flatten() {
            result.record(node.items.clone(), node.support());
        }
        result.canonicalize();
        result
    }
}

fn join_level<S: Scheduler + ?Sized>(
    prev: &[ItemsetNode],
    target_len: usize,
    min_count: usize,
    scheduler: &S,
    fanout: usize,
) -> Vec<ItemsetNode> {
    let plan = BlockPlan::new(prev.len(), fanout);
    debug!(
        itemsets = prev.len(),
        blocks = plan.blocks(),
        tasks = plan.pairs().count(),
        "planning join"
    );

    let sink = Mutex::new(LevelSink::default());
    let jobs: Vec<Job<'_>> = plan
        .pairs()
        .map(|(i, j)| {
            let sink = &sink;
            let (a, b) = (plan.range(i), plan.range(j));
            Box::new(move || join_blocks(prev, a, b, target_len, min_count, sink)) as Job<'_>
        })
        .collect();
    scheduler.run_batch(jobs);

    let mut nodes = sink.into_inner().nodes;
    nodes.sort_unstable_by(|x, y| x.items.cmp(&y.items));
    nodes
}
