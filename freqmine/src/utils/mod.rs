pub mod merge;
pub mod storage;

pub use storage::{FrequentItemsets, FrequentLevel, ItemsetStorage, MiningSummary};
