use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Customer identifier, the primary key of the segment table.
pub type CustomerId = u32;

/// One row of the segment artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentRecord {
    pub customer_id: CustomerId,
    pub segment: String,
}

/// Keyed index over customer segments, built once at artifact load.
///
/// The artifact contract declares customer ids unique; if an upstream export
/// repeats an id anyway, the last row wins.
#[derive(Debug, Default)]
pub struct SegmentTable {
    index: HashMap<CustomerId, String>,
}

impl SegmentTable {
    pub fn from_records(records: impl IntoIterator<Item = SegmentRecord>) -> Self {
        let index = records
            .into_iter()
            .map(|r| (r.customer_id, r.segment))
            .collect();
        Self { index }
    }

    /// Segment label for a customer, if known.
    pub fn get(&self, customer_id: CustomerId) -> Option<&str> {
        self.index.get(&customer_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
