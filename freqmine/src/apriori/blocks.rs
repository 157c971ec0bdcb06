use std::ops::Range;

/// Number of blocks whose unordered pairs, self-pairs included, come closest
/// to `target` tasks. Ties go to fewer blocks.
pub fn block_count(target: usize) -> usize {
    let target = target.max(1);
    let mut best = 1;
    let mut best_diff = target.abs_diff(1);
    let mut blocks: usize = 2;
    loop {
        let pairs = blocks * (blocks + 1) / 2;
        let diff = pairs.abs_diff(target);
        if diff < best_diff {
            best = blocks;
            best_diff = diff;
        }
        if pairs >= target {
            return best;
        }
        blocks += 1;
    }
}

/// Contiguous partition of one level's itemsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPlan {
    len: usize,
    block_len: usize,
    blocks: usize,
}

impl BlockPlan {
    pub fn new(len: usize, target_tasks: usize) -> Self {
        if len == 0 {
            return Self {
                len,
                block_len: 0,
                blocks: 0,
            };
        }
        let wanted = block_count(target_tasks).min(len);
        let block_len = len.div_ceil(wanted);
        Self {
            len,
            block_len,
            blocks: len.div_ceil(block_len),
        }
    }

    pub fn blocks(&self) -> usize {
        self.blocks
    }

    pub fn range(&self, block: usize) -> Range<usize> {
        let start = block * self.block_len;
        start..(start + self.block_len).min(self.len)
    }

    /// Every `(i, j)` with `i <= j`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        let blocks = self.blocks;
        (0..blocks).flat_map(move |i| (i..blocks).map(move |j| (i, j)))
    }
}
