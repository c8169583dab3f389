use std::cmp::Reverse;
use std::collections::HashMap;

use crate::mining::basket::BasketMatrix;

/// An itemset meeting the support threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentItemset {
    /// Member item descriptions, sorted lexicographically.
    pub items: Vec<String>,
    /// Fraction of baskets containing every member.
    pub support: f64,
}

/// Mines all frequent itemsets with FP-growth.
///
/// A frequency pass orders items, baskets are compressed into a prefix tree,
/// and itemsets grow through recursively built conditional trees, with no
/// candidate enumeration over the exponential itemset space. The result is
/// sorted by descending support, then items ascending, so identical inputs
/// always produce the identical table.
pub fn mine_frequent_itemsets(basket: &BasketMatrix, min_support: f64) -> Vec<FrequentItemset> {
    let basket_count = basket.basket_count();
    if basket_count == 0 {
        return Vec::new();
    }
    let min_count = minimum_count(min_support, basket_count);

    let mut item_counts = vec![0u64; basket.item_count()];
    for row in basket.baskets() {
        for &item in row {
            item_counts[item] += 1;
        }
    }
    let rank = frequency_rank(&item_counts, min_count);

    let mut tree = FpTree::new();
    for row in basket.baskets() {
        let mut path: Vec<usize> = row
            .iter()
            .copied()
            .filter(|item| rank.contains_key(item))
            .collect();
        path.sort_by_key(|item| rank[item]);
        if !path.is_empty() {
            tree.insert(&path, 1);
        }
    }

    let mut found: Vec<(Vec<usize>, u64)> = Vec::new();
    mine_tree(&tree, &[], min_count, &mut found);

    for (ids, _) in &mut found {
        // Ids follow the lexicographic column order, so ascending ids give
        // lexicographically sorted member lists.
        ids.sort_unstable();
    }
    found.sort_by(|(a_ids, a_count), (b_ids, b_count)| {
        b_count.cmp(a_count).then_with(|| a_ids.cmp(b_ids))
    });

    found
        .into_iter()
        .map(|(ids, count)| FrequentItemset {
            items: ids.iter().map(|&id| basket.items()[id].clone()).collect(),
            support: count as f64 / basket_count as f64,
        })
        .collect()
}

/// Smallest occurrence count whose support clears `min_support`.
///
/// `ceil` alone can overshoot by one when `min_support * n` lands a hair
/// above an integer in floating point (0.07 * 100 = 7.000000000000001),
/// which would wrongly exclude itemsets sitting exactly on the threshold.
fn minimum_count(min_support: f64, basket_count: usize) -> u64 {
    let mut count = (min_support * basket_count as f64).ceil() as u64;
    while count > 1 && (count - 1) as f64 / basket_count as f64 >= min_support {
        count -= 1;
    }
    count.max(1)
}

/// Tree insertion order: descending global count, ties by ascending id.
fn frequency_rank(item_counts: &[u64], min_count: u64) -> HashMap<usize, usize> {
    let mut frequent: Vec<usize> = (0..item_counts.len())
        .filter(|&item| item_counts[item] >= min_count)
        .collect();
    frequent.sort_by_key(|&item| (Reverse(item_counts[item]), item));
    frequent
        .into_iter()
        .enumerate()
        .map(|(rank, item)| (item, rank))
        .collect()
}

struct FpNode {
    item: usize,
    count: u64,
    parent: usize,
    children: HashMap<usize, usize>,
}

/// Prefix tree with a per-item node list for conditional mining.
/// Node 0 is the synthetic root; its item field is never read.
struct FpTree {
    nodes: Vec<FpNode>,
    header: HashMap<usize, Vec<usize>>,
}

impl FpTree {
    fn new() -> Self {
        Self {
            nodes: vec![FpNode {
                item: usize::MAX,
                count: 0,
                parent: 0,
                children: HashMap::new(),
            }],
            header: HashMap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Adds a frequency-ordered path with the given weight.
    fn insert(&mut self, path: &[usize], weight: u64) {
        let mut current = 0;
        for &item in path {
            current = match self.nodes[current].children.get(&item) {
                Some(&child) => {
                    self.nodes[child].count += weight;
                    child
                }
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(FpNode {
                        item,
                        count: weight,
                        parent: current,
                        children: HashMap::new(),
                    });
                    self.nodes[current].children.insert(item, child);
                    self.header.entry(item).or_default().push(child);
                    child
                }
            };
        }
    }

    /// Total occurrences of `item` across the tree.
    fn item_count(&self, item: usize) -> u64 {
        self.header[&item].iter().map(|&n| self.nodes[n].count).sum()
    }

    /// Root-to-parent prefix paths reaching `item`, with their weights.
    fn prefix_paths(&self, item: usize) -> Vec<(Vec<usize>, u64)> {
        let mut paths = Vec::new();
        for &node in &self.header[&item] {
            let weight = self.nodes[node].count;
            let mut path = Vec::new();
            let mut current = self.nodes[node].parent;
            while current != 0 {
                path.push(self.nodes[current].item);
                current = self.nodes[current].parent;
            }
            if !path.is_empty() {
                path.reverse();
                paths.push((path, weight));
            }
        }
        paths
    }
}

fn mine_tree(tree: &FpTree, suffix: &[usize], min_count: u64, found: &mut Vec<(Vec<usize>, u64)>) {
    let mut items: Vec<usize> = tree.header.keys().copied().collect();
    // Least frequent first, the classic growth order; deterministic ties.
    items.sort_by_key(|&item| (tree.item_count(item), Reverse(item)));

    for item in items {
        let count = tree.item_count(item);
        let mut itemset = suffix.to_vec();
        itemset.push(item);
        found.push((itemset.clone(), count));

        let paths = tree.prefix_paths(item);
        let mut conditional_counts: HashMap<usize, u64> = HashMap::new();
        for (path, weight) in &paths {
            for &prefix_item in path {
                *conditional_counts.entry(prefix_item).or_insert(0) += weight;
            }
        }
        conditional_counts.retain(|_, c| *c >= min_count);
        if conditional_counts.is_empty() {
            continue;
        }

        let mut kept: Vec<usize> = conditional_counts.keys().copied().collect();
        kept.sort_by_key(|item| (Reverse(conditional_counts[item]), *item));
        let rank: HashMap<usize, usize> = kept
            .into_iter()
            .enumerate()
            .map(|(rank, item)| (item, rank))
            .collect();

        let mut conditional = FpTree::new();
        for (path, weight) in paths {
            let mut filtered: Vec<usize> = path
                .into_iter()
                .filter(|item| rank.contains_key(item))
                .collect();
            filtered.sort_by_key(|item| rank[item]);
            if !filtered.is_empty() {
                conditional.insert(&filtered, weight);
            }
        }
        if !conditional.is_empty() {
            mine_tree(&conditional, &itemset, min_count, found);
        }
    }
}
