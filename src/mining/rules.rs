use std::cmp::Ordering;
use std::collections::HashMap;

use thiserror::Error;

use crate::mining::fpgrowth::FrequentItemset;
use crate::models::{AssociationRule, DeployedRule};

/// Error types for rule generation
#[derive(Debug, Error)]
pub enum RuleError {
    /// A subset of a frequent itemset was missing from the mined supports.
    /// A miner honoring downward closure never produces this; surfacing it
    /// beats silently dropping rules.
    #[error("support missing for itemset {0:?}")]
    MissingSupport(Vec<String>),
}

/// Generates association rules from frequent itemsets.
///
/// Every itemset of size two or more is split into all non-empty proper
/// antecedent → consequent pairs; each split is scored with support,
/// confidence, and lift, and kept when lift clears `min_lift`. The table is
/// sorted by descending lift, then antecedent, then consequent, which is the
/// order the deployed artifact inherits and serve-time ties fall back to.
pub fn generate_rules(
    itemsets: &[FrequentItemset],
    min_lift: f64,
) -> Result<Vec<AssociationRule>, RuleError> {
    let supports: HashMap<&[String], f64> = itemsets
        .iter()
        .map(|set| (set.items.as_slice(), set.support))
        .collect();

    let mut rules = Vec::new();
    for itemset in itemsets {
        let size = itemset.items.len();
        if size < 2 {
            continue;
        }
        for mask in 1..(1usize << size) - 1 {
            let (antecedent, consequent) = split_by_mask(&itemset.items, mask);
            let antecedent_support = subset_support(&supports, &antecedent)?;
            let consequent_support = subset_support(&supports, &consequent)?;

            let confidence = itemset.support / antecedent_support;
            let lift = itemset.support / (antecedent_support * consequent_support);
            if lift >= min_lift {
                rules.push(AssociationRule {
                    antecedent,
                    consequent,
                    support: itemset.support,
                    confidence,
                    lift,
                });
            }
        }
    }

    rules.sort_by(|a, b| {
        b.lift
            .partial_cmp(&a.lift)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
    Ok(rules)
}

/// Collapses each rule's item sets to a single representative for serving.
///
/// The representative is the first member of the set, and since itemsets are
/// kept lexicographically sorted that is always the lexicographically
/// smallest item, a tie-break that is reproducible across runs.
/// Deliberately lossy: multi-item context is discarded at this boundary and
/// nowhere earlier.
pub fn reduce_for_deployment(rules: &[AssociationRule]) -> Vec<DeployedRule> {
    rules
        .iter()
        .filter_map(|rule| {
            let antecedent = rule.antecedent.first()?;
            let consequent = rule.consequent.first()?;
            Some(DeployedRule::new(
                antecedent.clone(),
                consequent.clone(),
                rule.lift,
            ))
        })
        .collect()
}

fn split_by_mask(items: &[String], mask: usize) -> (Vec<String>, Vec<String>) {
    let mut antecedent = Vec::new();
    let mut consequent = Vec::new();
    for (position, item) in items.iter().enumerate() {
        if mask & (1 << position) != 0 {
            antecedent.push(item.clone());
        } else {
            consequent.push(item.clone());
        }
    }
    (antecedent, consequent)
}

fn subset_support(
    supports: &HashMap<&[String], f64>,
    subset: &[String],
) -> Result<f64, RuleError> {
    supports
        .get(subset)
        .copied()
        .ok_or_else(|| RuleError::MissingSupport(subset.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn itemset(members: &[&str], support: f64) -> FrequentItemset {
        FrequentItemset {
            items: members.iter().map(|m| m.to_string()).collect(),
            support,
        }
    }

    fn weak_pair_itemsets() -> Vec<FrequentItemset> {
        // Mined from invoices {1: {A,B}, 2: {A,B}, 3: {A}, 4: {B}}.
        vec![
            itemset(&["A"], 0.75),
            itemset(&["B"], 0.75),
            itemset(&["A", "B"], 0.5),
        ]
    }

    #[test]
    fn test_lift_below_threshold_is_excluded() {
        // lift = 0.5 / (0.75 * 0.75) ≈ 0.889 for both directions.
        let rules = generate_rules(&weak_pair_itemsets(), 1.0).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_rule_metrics() {
        let rules = generate_rules(&weak_pair_itemsets(), 0.5).unwrap();
        assert_eq!(rules.len(), 2);

        let a_to_b = rules
            .iter()
            .find(|r| r.antecedent == ["A"] && r.consequent == ["B"])
            .unwrap();
        assert_eq!(a_to_b.support, 0.5);
        assert!((a_to_b.confidence - 2.0 / 3.0).abs() < 1e-12);
        assert!((a_to_b.lift - 8.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_splits_enumerated_for_triples() {
        let itemsets = vec![
            itemset(&["X"], 0.75),
            itemset(&["Y"], 0.75),
            itemset(&["Z"], 0.5),
            itemset(&["X", "Y"], 0.75),
            itemset(&["X", "Z"], 0.5),
            itemset(&["Y", "Z"], 0.5),
            itemset(&["X", "Y", "Z"], 0.5),
        ];
        let rules = generate_rules(&itemsets, 0.0).unwrap();
        // 2 splits per pair, 6 splits for the triple.
        assert_eq!(rules.len(), 12);
        assert!(rules
            .iter()
            .any(|r| r.antecedent == ["X", "Y"] && r.consequent == ["Z"]));
        assert!(rules
            .iter()
            .any(|r| r.antecedent == ["Z"] && r.consequent == ["X", "Y"]));
    }

    #[test]
    fn test_missing_subset_support_is_an_error() {
        let itemsets = vec![itemset(&["A", "B"], 0.5), itemset(&["A"], 0.75)];
        let result = generate_rules(&itemsets, 1.0);
        assert!(matches!(result, Err(RuleError::MissingSupport(items)) if items == ["B"]));
    }

    #[test]
    fn test_table_sorted_by_descending_lift_then_sets() {
        let itemsets = vec![
            itemset(&["A"], 0.5),
            itemset(&["B"], 0.5),
            itemset(&["C"], 0.25),
            itemset(&["D"], 0.25),
            itemset(&["A", "B"], 0.5),
            itemset(&["C", "D"], 0.25),
        ];
        let rules = generate_rules(&itemsets, 1.0).unwrap();

        // C↔D lift = 4.0, A↔B lift = 2.0; equal lifts tie-break on sets.
        let order: Vec<(&str, &str)> = rules
            .iter()
            .map(|r| (r.antecedent[0].as_str(), r.consequent[0].as_str()))
            .collect();
        assert_eq!(order, [("C", "D"), ("D", "C"), ("A", "B"), ("B", "A")]);
    }

    #[test]
    fn test_reduce_takes_lexicographically_smallest_member() {
        let rules = vec![AssociationRule {
            antecedent: vec!["HERB MARKER MINT".to_string(), "HERB MARKER THYME".to_string()],
            consequent: vec!["HERB MARKER BASIL".to_string(), "HERB MARKER CHIVES".to_string()],
            support: 0.02,
            confidence: 0.9,
            lift: 18.4,
        }];
        let deployed = reduce_for_deployment(&rules);
        assert_eq!(deployed.len(), 1);
        assert_eq!(deployed[0].antecedent, "HERB MARKER MINT");
        assert_eq!(deployed[0].consequent, "HERB MARKER BASIL");
        assert_eq!(deployed[0].lift, 18.4);
    }

    #[test]
    fn test_reduce_preserves_table_order() {
        let itemsets = vec![
            itemset(&["A"], 0.5),
            itemset(&["B"], 0.5),
            itemset(&["C"], 0.25),
            itemset(&["D"], 0.25),
            itemset(&["A", "B"], 0.5),
            itemset(&["C", "D"], 0.25),
        ];
        let rules = generate_rules(&itemsets, 1.0).unwrap();
        let deployed = reduce_for_deployment(&rules);
        let antecedents: Vec<&str> = deployed.iter().map(|r| r.antecedent.as_str()).collect();
        assert_eq!(antecedents, ["C", "D", "A", "B"]);
    }
}
