use super::*;
use crate::config::ItemMultiplicity;
use crate::index::InvertedIndex;
use crate::scheduler::InlineScheduler;

fn index_of(transactions: &[Vec<usize>]) -> InvertedIndex {
    InvertedIndex::build(transactions, &InlineScheduler, ItemMultiplicity::Collapse)
}

fn sample() -> InvertedIndex {
    index_of(&[vec![1, 2, 3], vec![1, 2], vec![2, 3], vec![1, 3], vec![1, 2, 3]])
}

/// Walks `items` down from the root, adding `count` along the way.
fn insert_path(tree: &mut FPTree, items: &[usize], count: usize) {
    let mut at = ROOT;
    for &item in items {
        at = tree.advance(at, item, count);
    }
}

fn path(items: &[usize], count: usize) -> PrefixPath {
    PrefixPath {
        items: items.to_vec(),
        count,
    }
}

#[test]
fn test_fp_tree_insert() {
    let mut tree = FPTree::new();

    insert_path(&mut tree, &[1, 2, 3], 1);

    assert!(tree.nodes[ROOT].children.contains_key(&1));
    assert_eq!(tree.header_table.get(&1).unwrap().len(), 1);
    assert_eq!(tree.header_table.get(&2).unwrap().len(), 1);
    assert_eq!(tree.header_table.get(&3).unwrap().len(), 1);

    // shares the 1 → 2 prefix with the first path
    insert_path(&mut tree, &[1, 2, 4], 1);

    let node1 = tree.nodes[ROOT].children[&1];
    assert_eq!(tree.nodes[node1].count, 2);
    assert_eq!(tree.header_table.get(&4).unwrap().len(), 1);
    assert_eq!(tree.node_count(), 4);
}

#[test]
fn test_fp_tree_prefix_paths() {
    // root → 1 → 2 → 3
    //             └→ 4
    let mut tree = FPTree::new();
    insert_path(&mut tree, &[1, 2, 3], 1);
    insert_path(&mut tree, &[1, 2, 4], 1);

    let bases = tree.conditional_pattern_bases();
    assert_eq!(bases[&3], vec![path(&[1, 2], 1)]);
    assert_eq!(bases[&4], vec![path(&[1, 2], 1)]);
    assert_eq!(bases[&2], vec![path(&[1], 2)]);
    // children of the root have an empty prefix
    assert!(!bases.contains_key(&1));
}

#[test]
fn test_frequent_singles_order() {
    let index = index_of(&[vec![5, 1], vec![5, 2], vec![5, 2], vec![1, 9]]);
    assert_eq!(frequent_singles(&index, 2), vec![(5, 3), (1, 2), (2, 2)]);
    assert!(frequent_singles(&index, 4).is_empty());
}

#[test]
fn test_build_fp_tree_shares_prefixes() {
    let index = sample();
    let order = frequent_singles(&index, 2);
    let tree = build_fp_tree(&index, &order);

    assert_eq!(tree.node_count(), 6);
    assert_eq!(tree.support(1), 4);
    assert_eq!(tree.support(2), 4);
    assert_eq!(tree.support(3), 4);
    assert_eq!(
        tree.render(),
        "Level 0: [ROOT]\nLevel 1: [1:4] [2:1]\nLevel 2: [2:3] [3:1] [3:1]\nLevel 3: [3:2]\n"
    );

    let bases = tree.conditional_pattern_bases();
    assert_eq!(bases[&2], vec![path(&[1], 3)]);
    assert_eq!(bases[&3], vec![path(&[1, 2], 2), path(&[1], 1), path(&[2], 1)]);
}

#[test]
fn test_build_conditional_tree() {
    let base = vec![path(&[1, 2], 2), path(&[1], 1)];

    // item 1 sums to 3, item 2 to 2
    let tree = build_conditional_fp_tree(&base, 3);
    assert!(tree.header_table.contains_key(&1));
    assert!(!tree.header_table.contains_key(&2));
    assert_eq!(tree.support(1), 3);

    let tree = build_conditional_fp_tree(&base, 2);
    assert_eq!(tree.item_supports(), vec![(1, 3), (2, 2)]);
    assert_eq!(tree.node_count(), 2);
}

#[test]
fn test_conditional_tree_reorders_locally() {
    // in the parent tree 7 came first, locally 8 is more frequent
    let base = vec![path(&[7, 8], 1), path(&[8], 2)];
    let tree = build_conditional_fp_tree(&base, 1);
    assert_eq!(tree.render(), "Level 0: [ROOT]\nLevel 1: [8:3]\nLevel 2: [7:1]\n");
}

#[test]
fn test_empty_conditional_tree() {
    let tree = build_conditional_fp_tree(&[path(&[1], 1)], 2);
    assert!(tree.is_empty());
    assert!(tree.conditional_pattern_bases().is_empty());
}

#[test]
fn test_fp_growth_concrete_scenario() {
    let result = fp_growth(&sample(), 2);

    let level = |k: usize| -> Vec<(Vec<usize>, usize)> {
        result
            .level(k)
            .map(|l| l.iter().map(|(items, s)| (items.to_vec(), s)).collect())
            .unwrap_or_default()
    };
    assert_eq!(level(0), vec![(vec![1], 4), (vec![2], 4), (vec![3], 4)]);
    assert_eq!(level(1), vec![(vec![1, 2], 3), (vec![1, 3], 3), (vec![2, 3], 3)]);
    assert_eq!(level(2), vec![(vec![1, 2, 3], 2)]);
    assert!(level(3).is_empty());
}

#[test]
fn test_fp_growth_simple() {
    // [[0,1], [0,1,2], [0,2], [1,2]], every item 3/4, every pair 2/4
    let index = index_of(&[vec![0, 1], vec![0, 1, 2], vec![0, 2], vec![1, 2]]);
    let result = fp_growth(&index, 2);

    assert_eq!(result.level(0).unwrap().len(), 3);
    assert_eq!(result.level(1).unwrap().len(), 3);
    assert!(result.level(2).is_none());
    assert_eq!(result.support_of(&[0, 2]), Some(2));
}

#[test]
fn test_fp_growth_empty() {
    assert!(fp_growth(&InvertedIndex::default(), 1).is_empty());
    assert!(fp_growth(&sample(), 5).is_empty());
}

#[test]
fn test_build_fp_tree_layers_repeated_items() {
    // transaction 0 holds 7 three times: one layer {7, 2}, two layers {7}
    let index = InvertedIndex::build(
        &[vec![7, 7, 7, 2], vec![7, 2], vec![2]],
        &InlineScheduler,
        ItemMultiplicity::Preserve,
    );
    let order = frequent_singles(&index, 1);
    assert_eq!(order, vec![(7, 4), (2, 3)]);

    let tree = build_fp_tree(&index, &order);
    assert_eq!(tree.render(), "Level 0: [ROOT]\nLevel 1: [2:1] [7:4]\nLevel 2: [2:2]\n");
    assert_eq!(tree.support(7), 4);
    assert_eq!(tree.support(2), 3);
    assert_eq!(tree.conditional_pattern_bases()[&2], vec![path(&[7], 2)]);
}

#[test]
fn test_fp_growth_repeated_items_use_smallest_multiplicity() {
    let index = InvertedIndex::build(
        &[vec![7, 7, 7, 2], vec![7, 2], vec![2], vec![4, 4, 1], vec![4, 1, 1]],
        &InlineScheduler,
        ItemMultiplicity::Preserve,
    );
    let result = fp_growth(&index, 1);

    assert_eq!(result.support_of(&[7]), Some(4));
    assert_eq!(result.support_of(&[2]), Some(3));
    assert_eq!(result.support_of(&[2, 7]), Some(2));
    assert_eq!(result.support_of(&[4]), Some(3));
    assert_eq!(result.support_of(&[1]), Some(3));
    // min(2, 1) + min(1, 2)
    assert_eq!(result.support_of(&[1, 4]), Some(2));
    assert_eq!(result.level(0).unwrap().len(), 4);
    assert_eq!(result.level(1).unwrap().len(), 2);
    assert!(result.level(2).is_none());
}
