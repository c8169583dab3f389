use serde::{Deserialize, Serialize};

/// A mined association rule with its full item sets.
///
/// Antecedent and consequent keep every member item (sorted
/// lexicographically) up to the deployment boundary; only the deployment
/// reducer collapses them to single representatives.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    /// Fraction of baskets containing antecedent and consequent together.
    pub support: f64,
    /// P(consequent | antecedent).
    pub confidence: f64,
    /// Observed joint frequency over the frequency expected under
    /// independence; > 1 indicates positive association.
    pub lift: f64,
}

/// One row of the deployed rules artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeployedRule {
    pub antecedent: String,
    pub consequent: String,
    pub lift: f64,
}

impl DeployedRule {
    pub fn new(antecedent: String, consequent: String, lift: f64) -> Self {
        Self {
            antecedent,
            consequent,
            lift,
        }
    }
}

/// A single product recommendation returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub product: String,
    /// Rule lift rounded to two decimal places.
    pub confidence_score: f64,
}

/// In-memory rules table loaded once at startup.
///
/// Lowercased antecedents are precomputed at construction so the
/// case-insensitive substring scan does not re-lowercase the table on every
/// request. Row order is the artifact order, which serves as the tie-break
/// for equal-lift rules.
#[derive(Debug, Default)]
pub struct RuleTable {
    rows: Vec<DeployedRule>,
    match_keys: Vec<String>,
}

impl RuleTable {
    pub fn new(rows: Vec<DeployedRule>) -> Self {
        let match_keys = rows.iter().map(|r| r.antecedent.to_lowercase()).collect();
        Self { rows, match_keys }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DeployedRule] {
        &self.rows
    }

    /// Rows whose antecedent contains `query`, case-insensitively.
    ///
    /// The match is a deliberately permissive substring test ("Thyme" matches
    /// "HERB MARKER THYME"). Rows with an empty antecedent can never contain
    /// a non-empty query and so are excluded from matching.
    pub fn matches(&self, query: &str) -> impl Iterator<Item = &DeployedRule> + '_ {
        let query = query.to_lowercase();
        self.match_keys
            .iter()
            .zip(self.rows.iter())
            .filter_map(move |(key, row)| key.contains(&query).then_some(row))
    }
}
