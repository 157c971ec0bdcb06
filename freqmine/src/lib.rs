//! Frequent itemset mining over an in-memory transaction set.
//!
//! Transactions are turned into an [`InvertedIndex`] once; either engine then
//! mines it:
//!
//! - [`AprioriTable`] grows itemsets level by level with parallel pairwise joins,
//! - [`fp_growth`] builds a prefix tree and recursively mines projected trees.
//!
//! Both produce the same [`FrequentItemsets`] for the same input and threshold.
//!
//! ```
//! use freqmine::{mine, Algorithm, InlineScheduler, MiningConfig};
//!
//! let transactions = vec![vec![1, 2, 3], vec![1, 2], vec![2, 3], vec![1, 3], vec![1, 2, 3]];
//! let config = MiningConfig::new(0.4).with_algorithm(Algorithm::FpGrowth);
//! let result = mine(&transactions, &config, &InlineScheduler);
//! assert_eq!(result.support_of(&[1, 2, 3]), Some(2));
//! ```

pub mod apriori;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fp;
pub mod index;
pub mod scheduler;
pub mod utils;

#[cfg(feature = "python")]
mod python;

use tracing::info;

pub use apriori::{AprioriTable, ItemsetNode};
pub use config::{min_support_count, Algorithm, ItemMultiplicity, MiningConfig};
pub use dataset::{Dataset, Delimiter, Item, ParsePolicy, Transaction};
pub use error::{MiningError, Result};
pub use fp::fp_growth;
pub use index::InvertedIndex;
pub use scheduler::{InlineScheduler, Job, Scheduler, WorkerPool};
pub use utils::{FrequentItemsets, FrequentLevel, MiningSummary};

/// Indexes `transactions` and mines them with the configured algorithm.
pub fn mine<S: Scheduler + ?Sized>(transactions: &[Transaction], config: &MiningConfig, scheduler: &S) -> FrequentItemsets {
    let index = InvertedIndex::build(transactions, scheduler, config.multiplicity);
    mine_index(&index, config, scheduler)
}

/// Mines an already built index with the configured algorithm.
pub fn mine_index<S: Scheduler + ?Sized>(index: &InvertedIndex, config: &MiningConfig, scheduler: &S) -> FrequentItemsets {
    let min_count = config.min_support_count(index.transaction_count());
    info!(
        algorithm = ?config.algorithm,
        threshold = config.support_threshold,
        min_count,
        transactions = index.transaction_count(),
        "mining"
    );
    match config.algorithm {
        Algorithm::Apriori => {
            AprioriTable::build(index, min_count, scheduler, config.resolved_parallelism()).frequent_itemsets()
        }
        Algorithm::FpGrowth => fp_growth(index, min_count),
    }
}
