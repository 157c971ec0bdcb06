use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::InvertedIndex;
use crate::config::ItemMultiplicity;
use crate::dataset::{Item, Transaction};
use crate::scheduler::{Job, Scheduler};

impl InvertedIndex {
    /// Builds the index sized to the largest item present in `transactions`.
    pub fn build<S: Scheduler + ?Sized>(
        transactions: &[Transaction],
        scheduler: &S,
        multiplicity: ItemMultiplicity,
    ) -> Self {
        let max_item = transactions.iter().flatten().copied().max();
        Self::build_with_max_item(transactions, max_item, scheduler, multiplicity)
    }

    /// Builds the index over items `0..=max_item`; larger items are dropped.
    ///
    /// Transactions are split into one contiguous block per worker. Each worker
    /// collects and sorts its own postings, then appends them to the shared
    /// index under a single lock. A final per-item sort makes the result
    /// independent of the order workers finished in.
    pub fn build_with_max_item<S: Scheduler + ?Sized>(
        transactions: &[Transaction],
        max_item: Option<Item>,
        scheduler: &S,
        multiplicity: ItemMultiplicity,
    ) -> Self {
        let start = Instant::now();
        let transaction_count = transactions.len();
        let slots = max_item.map_or(0, |m| m + 1);

        if transaction_count == 0 || slots == 0 {
            return Self {
                postings: vec![Vec::new(); slots],
                transaction_count,
            };
        }

        let workers = scheduler.parallelism().clamp(1, transaction_count);
        let block_len = transaction_count.div_ceil(workers);
        debug!(workers, block_len, slots, "indexing transactions");

        let shared = Mutex::new(vec![Vec::new(); slots]);
        let jobs: Vec<Job<'_>> = transactions
            .chunks(block_len)
            .enumerate()
            .map(|(block, chunk)| {
                let shared = &shared;
                let offset = block * block_len;
                Box::new(move || index_block(chunk, offset, slots, shared)) as Job<'_>
            })
            .collect();
        scheduler.run_batch(jobs);

        let mut postings = shared.into_inner();
        for list in &mut postings {
            list.sort_unstable();
            if multiplicity == ItemMultiplicity::Collapse {
                list.dedup();
            }
        }

        info!(
            transactions = transaction_count,
            items = slots,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "inverted index built"
        );
        Self {
            postings,
            transaction_count,
        }
    }
}

fn index_block(chunk: &[Transaction], offset: usize, slots: usize, shared: &Mutex<Vec<Vec<usize>>>) {
    let mut local: Vec<Vec<usize>> = vec![Vec::new(); slots];
    for (i, transaction) in chunk.iter().enumerate() {
        let tid = offset + i;
        for &item in transaction {
            if let Some(list) = local.get_mut(item) {
                list.push(tid);
            }
        }
    }
    for list in &mut local {
        list.sort_unstable();
    }

    let mut postings = shared.lock();
    for (item, list) in local.into_iter().enumerate() {
        if !list.is_empty() {
            postings[item].extend(list);
        }
    }
}
