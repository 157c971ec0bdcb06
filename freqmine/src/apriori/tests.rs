use super::*;
use crate::config::ItemMultiplicity;
use crate::scheduler::{InlineScheduler, WorkerPool};

fn index_of(transactions: &[Vec<usize>]) -> InvertedIndex {
    InvertedIndex::build(transactions, &InlineScheduler, ItemMultiplicity::Collapse)
}

fn sample() -> InvertedIndex {
    index_of(&[vec![1, 2, 3], vec![1, 2], vec![2, 3], vec![1, 3], vec![1, 2, 3]])
}

fn items_of(level: &[ItemsetNode]) -> Vec<(Vec<usize>, usize)> {
    level.iter().map(|n| (n.items.clone(), n.support())).collect()
}

#[test]
fn test_concrete_scenario() {
    let table = AprioriTable::build(&sample(), 2, &InlineScheduler, 4);

    assert_eq!(items_of(table.level(0)), vec![(vec![1], 4), (vec![2], 4), (vec![3], 4)]);
    assert_eq!(
        items_of(table.level(1)),
        vec![(vec![1, 2], 3), (vec![1, 3], 3), (vec![2, 3], 3)]
    );
    assert_eq!(items_of(table.level(2)), vec![(vec![1, 2, 3], 2)]);
    assert!(table.level(3).is_empty());
    assert_eq!(table.levels().len(), 3);
}

#[test]
fn test_cover_is_intersection_of_postings() {
    let index = sample();
    let table = AprioriTable::build(&index, 2, &InlineScheduler, 4);
    for node in table.levels().iter().flatten() {
        assert_eq!(node.cover, index.cover(&node.items), "itemset {:?}", node.items);
    }
}

#[test]
fn test_worker_pool_matches_inline() {
    let transactions: Vec<Vec<usize>> = (0..300)
        .map(|t| (0..12).filter(|i| (t + i * i) % 3 != 0 || (t % (i + 2)) == 0).collect())
        .collect();
    let index = index_of(&transactions);
    let pool = WorkerPool::new(6).unwrap();

    let inline = AprioriTable::build(&index, 60, &InlineScheduler, 1);
    for fanout in [1, 3, 10, 64] {
        let parallel = AprioriTable::build(&index, 60, &pool, fanout);
        assert_eq!(inline.levels(), parallel.levels(), "fanout {fanout}");
    }
}

#[test]
fn test_no_duplicate_itemsets_in_a_level() {
    let transactions: Vec<Vec<usize>> = (0..50).map(|_| vec![0, 1, 2, 3, 4]).collect();
    let pool = WorkerPool::new(4).unwrap();
    let table = AprioriTable::build(&index_of(&transactions), 1, &pool, 16);

    // every subset of five items is frequent: C(5, k) itemsets per level
    let expected = [5, 10, 10, 5, 1];
    assert_eq!(table.levels().len(), expected.len());
    for (k, &n) in expected.iter().enumerate() {
        let level = table.level(k);
        assert_eq!(level.len(), n);
        let mut keys: Vec<_> = level.iter().map(|n| n.items.clone()).collect();
        keys.dedup();
        assert_eq!(keys.len(), n);
    }
}

#[test]
fn test_empty_index() {
    let table = AprioriTable::build(&InvertedIndex::default(), 1, &InlineScheduler, 4);
    assert!(table.levels().is_empty());
    assert!(table.frequent_itemsets().is_empty());
}

#[test]
fn test_nothing_frequent() {
    let table = AprioriTable::build(&sample(), 5, &InlineScheduler, 4);
    assert!(table.levels().is_empty());
}

#[test]
fn test_zero_min_count_clamped() {
    let index = sample();
    let zero = AprioriTable::build(&index, 0, &InlineScheduler, 4);
    let one = AprioriTable::build(&index, 1, &InlineScheduler, 4);
    assert_eq!(zero.min_support_count(), 1);
    assert_eq!(zero.levels(), one.levels());
}

#[test]
fn test_frequent_itemsets_conversion() {
    let sets = AprioriTable::build(&sample(), 2, &InlineScheduler, 4).frequent_itemsets();
    assert_eq!(sets.len(), 7);
    assert_eq!(sets.support_of(&[3, 1]), Some(3));
    assert_eq!(sets.support_of(&[1, 2, 3]), Some(2));
    assert_eq!(sets.summary().max_itemset_size, 3);
}
