pub mod rule;
pub mod segment;
pub mod transaction;

pub use rule::{AssociationRule, DeployedRule, Recommendation, RuleTable};
pub use segment::{CustomerId, SegmentRecord, SegmentTable};
pub use transaction::{Transaction, CANCELLATION_MARKER};
