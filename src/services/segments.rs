//! Customer segment lookup.

use crate::error::{AppError, AppResult};
use crate::models::{CustomerId, SegmentTable};

/// Segment label for a customer, or a not-found error for unknown ids.
pub fn customer_segment(table: &SegmentTable, customer_id: CustomerId) -> AppResult<String> {
    table
        .get(customer_id)
        .map(str::to_string)
        .ok_or_else(|| AppError::NotFound("Customer ID not found".to_string()))
}
