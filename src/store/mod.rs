pub mod artifacts;
pub mod transactions;

pub use artifacts::read_manifest;
pub use artifacts::read_rules;
pub use artifacts::read_segments;
pub use artifacts::write_manifest;
pub use artifacts::write_rules;
pub use artifacts::write_segments;
pub use artifacts::ArtifactError;
pub use artifacts::RulesManifest;
pub use artifacts::{MANIFEST_FILE, RULES_ARTIFACT, SEGMENTS_ARTIFACT};
pub use transactions::{read_transactions, read_transactions_from};
