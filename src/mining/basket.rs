use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::Transaction;

/// Item description excluded from the basket columns: a shipping charge that
/// would otherwise dominate co-occurrence counts.
pub const NON_PRODUCT_ITEM: &str = "POSTAGE";

/// Sparse boolean basket matrix.
///
/// Rows are distinct non-cancelled invoices, columns are distinct item
/// descriptions, and a cell is present when the net summed quantity for that
/// (invoice, item) pair is positive. An invoice whose items all net to zero
/// or below still occupies a row of absent cells, so it counts toward the
/// support denominator. Both axes are sorted lexicographically, which makes
/// every downstream ordering deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketMatrix {
    items: Vec<String>,
    invoices: Vec<String>,
    /// Per-row ascending item ids with net quantity > 0.
    baskets: Vec<Vec<usize>>,
}

impl BasketMatrix {
    /// Builds the matrix from a flat transaction log.
    ///
    /// Cancelled invoices are excluded up front; remaining records are
    /// aggregated by (invoice, item) with quantities summed, pivoted, and
    /// booleanized. The known non-product column is pruned from the item
    /// axis without removing the invoices that referenced it.
    pub fn from_transactions(records: &[Transaction]) -> Self {
        let mut net_quantities: BTreeMap<(String, String), i64> = BTreeMap::new();
        for record in records {
            if record.is_cancellation() {
                continue;
            }
            let key = (record.invoice_no.clone(), record.description.clone());
            *net_quantities.entry(key).or_insert(0) += record.quantity;
        }

        let items: Vec<String> = net_quantities
            .keys()
            .filter(|(_, item)| item.as_str() != NON_PRODUCT_ITEM)
            .map(|(_, item)| item.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let item_ids: HashMap<&str, usize> = items
            .iter()
            .enumerate()
            .map(|(id, item)| (item.as_str(), id))
            .collect();

        let invoices: Vec<String> = net_quantities
            .keys()
            .map(|(invoice, _)| invoice.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let rows: HashMap<&str, usize> = invoices
            .iter()
            .enumerate()
            .map(|(row, invoice)| (invoice.as_str(), row))
            .collect();

        let mut baskets = vec![Vec::new(); invoices.len()];
        for ((invoice, item), net_quantity) in &net_quantities {
            if *net_quantity <= 0 {
                continue;
            }
            let Some(&item_id) = item_ids.get(item.as_str()) else {
                continue; // pruned non-product column
            };
            // BTreeMap iteration keeps each row's ids ascending.
            baskets[rows[invoice.as_str()]].push(item_id);
        }

        Self {
            items,
            invoices,
            baskets,
        }
    }

    /// Number of rows, i.e. the support denominator.
    pub fn basket_count(&self) -> usize {
        self.invoices.len()
    }

    /// Number of item columns after pruning.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Column labels, sorted lexicographically; the index is the item id.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Row labels, sorted lexicographically.
    pub fn invoices(&self) -> &[String] {
        &self.invoices
    }

    /// Present item ids per row, each ascending.
    pub fn baskets(&self) -> &[Vec<usize>] {
        &self.baskets
    }

    /// Whether `item` is present in `invoice`. Unknown labels are absent.
    pub fn is_present(&self, invoice: &str, item: &str) -> bool {
        let Some(row) = self.invoices.iter().position(|i| i == invoice) else {
            return false;
        };
        let Some(item_id) = self.items.iter().position(|i| i == item) else {
            return false;
        };
        self.baskets[row].binary_search(&item_id).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(invoice: &str, item: &str, quantity: i64) -> Transaction {
        Transaction::new(invoice.to_string(), item.to_string(), quantity)
    }

    #[test]
    fn test_cancelled_invoices_excluded_case_insensitively() {
        let matrix = BasketMatrix::from_transactions(&[
            record("C12345", "MUG", 2),
            record("c12346", "MUG", 2),
            record("12347", "MUG", 2),
        ]);
        assert_eq!(matrix.basket_count(), 1);
        assert_eq!(matrix.invoices(), ["12347"]);
        assert!(matrix.is_present("12347", "MUG"));
    }

    #[test]
    fn test_quantities_aggregate_per_invoice_and_item() {
        let matrix = BasketMatrix::from_transactions(&[
            record("1", "MUG", 3),
            record("1", "MUG", -1),
            record("1", "PLATE", 1),
        ]);
        assert_eq!(matrix.basket_count(), 1);
        assert!(matrix.is_present("1", "MUG"));
        assert!(matrix.is_present("1", "PLATE"));
    }

    #[test]
    fn test_net_nonpositive_quantity_is_absent() {
        let matrix = BasketMatrix::from_transactions(&[
            record("1", "MUG", 3),
            record("1", "MUG", -6),
            record("1", "PLATE", 0),
            record("2", "MUG", 1),
        ]);
        assert!(!matrix.is_present("1", "MUG"));
        assert!(!matrix.is_present("1", "PLATE"));
        assert!(matrix.is_present("2", "MUG"));
    }

    #[test]
    fn test_all_absent_invoice_still_counts_as_row() {
        let matrix = BasketMatrix::from_transactions(&[
            record("1", "MUG", -3),
            record("2", "MUG", 5),
        ]);
        // Invoice 1 nets negative but remains in the denominator.
        assert_eq!(matrix.basket_count(), 2);
        assert_eq!(matrix.baskets()[0], Vec::<usize>::new());
    }

    #[test]
    fn test_non_product_column_pruned() {
        let matrix = BasketMatrix::from_transactions(&[
            record("1", "MUG", 1),
            record("1", "POSTAGE", 1),
            record("2", "POSTAGE", 1),
        ]);
        assert_eq!(matrix.items(), ["MUG"]);
        assert!(!matrix.is_present("1", "POSTAGE"));
        // Invoice 2 only carried postage; its row survives the prune.
        assert_eq!(matrix.basket_count(), 2);
    }

    #[test]
    fn test_axes_sorted_for_determinism() {
        let matrix = BasketMatrix::from_transactions(&[
            record("20", "PLATE", 1),
            record("10", "MUG", 1),
            record("10", "BOWL", 1),
        ]);
        assert_eq!(matrix.invoices(), ["10", "20"]);
        assert_eq!(matrix.items(), ["BOWL", "MUG", "PLATE"]);
        assert_eq!(matrix.baskets()[0], vec![0, 1]);
    }

    #[test]
    fn test_empty_log_yields_empty_matrix() {
        let matrix = BasketMatrix::from_transactions(&[]);
        assert_eq!(matrix.basket_count(), 0);
        assert_eq!(matrix.item_count(), 0);
    }
}
