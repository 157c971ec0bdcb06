use std::time::Instant;

use tracing::{debug, info};

use super::builder::{build_conditional_fp_tree, build_fp_tree, frequent_singles};
use super::tree::PrefixPath;
use crate::index::InvertedIndex;
use crate::utils::FrequentItemsets;

/// Mines every frequent itemset of `index` with FP-Growth.
///
/// Runs on the calling thread. The main tree is dropped once mining is done;
/// every projected tree is dropped by the call that built it.
pub fn fp_growth(index: &InvertedIndex, min_count: usize) -> FrequentItemsets {
    let start = Instant::now();
    let mut miner = Miner::new(min_count);

    let singles = frequent_singles(index, miner.min_count);
    info!(items = singles.len(), min_count = miner.min_count, "fp-growth frequent singles");
    for &(item, support) in &singles {
        miner.result.record(vec![item], support);
    }

    if !singles.is_empty() {
        let tree = build_fp_tree(index, &singles);
        info!(nodes = tree.node_count(), "fp-tree built");

        let bases = tree.conditional_pattern_bases();
        let mut suffix = Vec::new();
        for &(item, _) in singles.iter().rev() {
            let Some(base) = bases.get(&item).filter(|base| !base.is_empty()) else {
                continue;
            };
            suffix.push(item);
            miner.mine(base, &mut suffix);
            suffix.pop();
        }
    }

    let mut result = miner.result;
    result.canonicalize();
    info!(
        itemsets = result.len(),
        projected_trees = miner.projected_trees,
        max_depth = miner.max_depth,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "fp-growth finished"
    );
    result
}

struct Miner {
    min_count: usize,
    result: FrequentItemsets,
    projected_trees: usize,
    max_depth: usize,
}

impl Miner {
    fn new(min_count: usize) -> Self {
        Self {
            min_count: min_count.max(1),
            result: FrequentItemsets::new(),
            projected_trees: 0,
            max_depth: 0,
        }
    }

    /// Mines the projected tree of `base`; `suffix` is the itemset `base` was taken for.
    fn mine(&mut self, base: &[PrefixPath], suffix: &mut Vec<usize>) {
        let tree = build_conditional_fp_tree(base, self.min_count);
        self.projected_trees += 1;
        self.max_depth = self.max_depth.max(suffix.len());
        if tree.is_empty() {
            return;
        }
        debug!(suffix = ?suffix, nodes = tree.node_count(), "projected tree");

        let bases = tree.conditional_pattern_bases();
        for (item, support) in tree.item_supports() {
            suffix.push(item);
            self.result.record(suffix.clone(), support);
            if let Some(next) = bases.get(&item).filter(|next| !next.is_empty()) {
                self.mine(next, suffix);
            }
            suffix.pop();
        }
    }
}
