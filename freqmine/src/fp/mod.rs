//! FP-Growth: one prefix tree built from the postings, then recursive mining of
//! projected trees built from conditional pattern bases.

pub mod builder;
pub mod mining;
pub mod tree;

#[cfg(test)]
mod tests;

pub use builder::{build_conditional_fp_tree, build_fp_tree, frequent_singles};
pub use mining::fp_growth;
pub use tree::{FPNode, FPTree, PatternBases, PrefixPath, ROOT};
