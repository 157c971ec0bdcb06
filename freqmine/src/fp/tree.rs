use std::collections::{HashMap, VecDeque};
use std::fmt::Write;

/// Arena slot of the root node.
pub const ROOT: usize = 0;

#[derive(Debug, Clone)]
pub struct FPNode {
    /// `None` only for the root.
    pub item: Option<usize>,
    pub count: usize,
    /// Item id → arena slot of the child; each child has exactly one parent.
    pub children: HashMap<usize, usize>,
}

/// Items on the way from the root to one node (excluding it), weighted by that node's count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixPath {
    pub items: Vec<usize>,
    pub count: usize,
}

/// Conditional pattern base of every item in a tree.
pub type PatternBases = HashMap<usize, Vec<PrefixPath>>;

/// Prefix tree stored as an arena; nodes live exactly as long as the tree.
#[derive(Debug, Clone)]
pub struct FPTree {
    pub nodes: Vec<FPNode>,
    /// Item id → every arena slot labelled with it.
    pub header_table: HashMap<usize, Vec<usize>>,
}

impl FPNode {
    pub fn new_root() -> Self {
        Self {
            item: None,
            count: 0,
            children: HashMap::new(),
        }
    }

    pub fn new_item(item: usize, count: usize) -> Self {
        Self {
            item: Some(item),
            count,
            children: HashMap::new(),
        }
    }

    fn sorted_children(&self) -> Vec<(usize, usize)> {
        let mut children: Vec<(usize, usize)> = self.children.iter().map(|(&item, &idx)| (item, idx)).collect();
        children.sort_unstable();
        children
    }
}

impl Default for FPTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FPTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![FPNode::new_root()],
            header_table: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[ROOT].children.is_empty()
    }

    /// Nodes excluding the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Moves one step down from `at` along `item`, adding `count` to the child
    /// or creating it. Returns the child's slot.
    pub fn advance(&mut self, at: usize, item: usize, count: usize) -> usize {
        if let Some(&child) = self.nodes[at].children.get(&item) {
            self.nodes[child].count += count;
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(FPNode::new_item(item, count));
        self.nodes[at].children.insert(item, child);
        self.header_table.entry(item).or_default().push(child);
        child
    }

    /// Sum of the counts of all nodes labelled `item`.
    pub fn support(&self, item: usize) -> usize {
        self.header_table
            .get(&item)
            .map_or(0, |slots| slots.iter().map(|&idx| self.nodes[idx].count).sum())
    }

    /// Every item in the tree with its support, most frequent first, ties by item id.
    pub fn item_supports(&self) -> Vec<(usize, usize)> {
        let mut supports: Vec<(usize, usize)> = self
            .header_table
            .keys()
            .map(|&item| (item, self.support(item)))
            .collect();
        supports.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        supports
    }

    /// Walks every root-to-node path once and collects, for each node with a
    /// non-empty prefix, `(prefix, node.count)` under the node's item.
    pub fn conditional_pattern_bases(&self) -> PatternBases {
        let mut bases = PatternBases::new();
        let mut prefix = Vec::new();
        self.collect_bases(ROOT, &mut prefix, &mut bases);
        bases
    }

    fn collect_bases(&self, at: usize, prefix: &mut Vec<usize>, bases: &mut PatternBases) {
        for (item, child) in self.nodes[at].sorted_children() {
            if !prefix.is_empty() {
                bases.entry(item).or_default().push(PrefixPath {
                    items: prefix.clone(),
                    count: self.nodes[child].count,
                });
            }
            prefix.push(item);
            self.collect_bases(child, prefix, bases);
            prefix.pop();
        }
    }

    /// Breadth-first dump, one line per depth: `[ROOT]`, then `[item:count]` nodes.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut queue = VecDeque::from([(ROOT, 0usize)]);
        let mut current_depth = None;

        while let Some((idx, depth)) = queue.pop_front() {
            if current_depth != Some(depth) {
                if current_depth.is_some() {
                    out.push('\n');
                }
                let _ = write!(out, "Level {depth}:");
                current_depth = Some(depth);
            }
            let node = &self.nodes[idx];
            match node.item {
                None => out.push_str(" [ROOT]"),
                Some(item) => {
                    let _ = write!(out, " [{item}:{}]", node.count);
                }
            }
            for (_, child) in node.sorted_children() {
                queue.push_back((child, depth + 1));
            }
        }
        out.push('\n');
        out
    }
}
