//! Ranking logic behind the product recommendation endpoint.

use std::cmp::Ordering;

use crate::models::{Recommendation, RuleTable};

/// Maximum number of recommendations returned for a query.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Top recommendations for a product query.
///
/// Matching rows are ranked by descending lift; ties keep their artifact
/// order because the sort is stable. Scores are the rule lift rounded
/// half-away-from-zero to two decimal places.
pub fn top_recommendations(table: &RuleTable, query: &str) -> Vec<Recommendation> {
    let mut hits: Vec<_> = table.matches(query).collect();
    hits.sort_by(|a, b| b.lift.partial_cmp(&a.lift).unwrap_or(Ordering::Equal));
    hits.into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|rule| Recommendation {
            product: rule.consequent.clone(),
            confidence_score: round_score(rule.lift),
        })
        .collect()
}

fn round_score(lift: f64) -> f64 {
    (lift * 100.0).round() / 100.0
}
