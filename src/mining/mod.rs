pub mod basket;
pub mod fpgrowth;
pub mod rules;

pub use basket::{BasketMatrix, NON_PRODUCT_ITEM};
pub use fpgrowth::{mine_frequent_itemsets, FrequentItemset};
pub use rules::{generate_rules, reduce_for_deployment, RuleError};

use crate::models::{AssociationRule, DeployedRule, Transaction};

/// Thresholds for a mining run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningParams {
    /// Minimum fraction of baskets an itemset must appear in.
    pub min_support: f64,
    /// Minimum lift a rule must reach to be retained.
    pub min_lift: f64,
}

impl Default for MiningParams {
    fn default() -> Self {
        Self {
            min_support: 0.01,
            min_lift: 1.0,
        }
    }
}

/// Result of a full training run.
#[derive(Debug)]
pub enum TrainingOutcome {
    /// No itemset met the support threshold. A normal outcome, not a
    /// failure: nothing is deployed and any previous artifact must be left
    /// untouched by the caller.
    NoFrequentItemsets,
    Trained(TrainedRules),
}

/// A trained rules model plus the run statistics worth recording.
#[derive(Debug)]
pub struct TrainedRules {
    /// Full rule table with all metrics and full item sets.
    pub rules: Vec<AssociationRule>,
    /// Serving table, flattened to single representative items.
    pub deployed: Vec<DeployedRule>,
    pub basket_count: usize,
    pub item_count: usize,
    pub itemset_count: usize,
}

/// Runs the mining pipeline over a transaction log: basket construction,
/// FP-growth, rule generation, deployment reduction.
///
/// Note that nonempty itemsets whose rules are all filtered out by the lift
/// threshold still produce a `Trained` outcome with an empty table; the
/// artifact is written (empty) in that case, unlike the no-itemset outcome.
pub fn train(records: &[Transaction], params: &MiningParams) -> Result<TrainingOutcome, RuleError> {
    let matrix = BasketMatrix::from_transactions(records);
    tracing::info!(
        baskets = matrix.basket_count(),
        items = matrix.item_count(),
        "Basket matrix built"
    );

    let itemsets = mine_frequent_itemsets(&matrix, params.min_support);
    if itemsets.is_empty() {
        tracing::warn!(
            min_support = params.min_support,
            "No frequent itemsets at configured support"
        );
        return Ok(TrainingOutcome::NoFrequentItemsets);
    }
    tracing::info!(itemsets = itemsets.len(), "Frequent itemsets mined");

    let rules = generate_rules(&itemsets, params.min_lift)?;
    let deployed = reduce_for_deployment(&rules);
    tracing::info!(
        rules = rules.len(),
        min_lift = params.min_lift,
        "Association rules generated"
    );

    Ok(TrainingOutcome::Trained(TrainedRules {
        rules,
        deployed,
        basket_count: matrix.basket_count(),
        item_count: matrix.item_count(),
        itemset_count: itemsets.len(),
    }))
}
