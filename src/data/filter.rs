use std::collections::{BTreeMap, BTreeSet};

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Filter predicate: which unique values are selected per column
// ---------------------------------------------------------------------------

/// Columns with this many or more distinct values get no filter widget.
pub const FILTER_CARDINALITY_LIMIT: usize = 20;

/// Per-column selection state: maps column_name → set of selected values.
/// Only categorical columns under the cardinality limit appear here.
pub type FilterState = BTreeMap<String, BTreeSet<CellValue>>;

/// Initialise a [`FilterState`] with all values selected (i.e., show everything)
/// for every filterable categorical column.
pub fn init_filter_state(dataset: &Dataset) -> FilterState {
    dataset
        .unique_values
        .iter()
        .filter(|(_, vals)| vals.len() < FILTER_CARDINALITY_LIMIT)
        .map(|(col, vals)| (col.clone(), vals.clone()))
        .collect()
}

/// Return indices of rows that pass all active filters (AND across columns).
///
/// A row passes a column filter when:
/// * The column is not present in `filters` → passes (no constraint)
/// * The filter set for that column is empty → nothing selected → fails
/// * The row's value for that column is in the selected set → passes
/// * The cell is `Null` → passes only when `Null` is selected
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    (0..dataset.len())
        .filter(|&row| {
            for (col, selected) in filters {
                if selected.is_empty() {
                    // Nothing selected for this column → hide everything
                    return false;
                }
                // Check all unique values are selected → no effective filter
                if let Some(all_vals) = dataset.unique_values.get(col) {
                    if all_vals.is_subset(selected) {
                        continue; // everything selected, no filtering needed
                    }
                }
                let val = dataset.cell(row, col);
                if !selected.contains(val) {
                    return false;
                }
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bytes;

    fn sales() -> Dataset {
        load_bytes(b"Region,Tier,Sales\nEast,A,10\nWest,B,-5\nEast,B,7\n").unwrap()
    }

    #[test]
    fn init_selects_everything() {
        let ds = sales();
        let filters = init_filter_state(&ds);
        assert_eq!(filters.len(), 2);
        assert_eq!(filters["Region"].len(), 2);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn subset_selection_narrows_rows() {
        let ds = sales();
        let mut filters = init_filter_state(&ds);
        filters.insert(
            "Region".into(),
            [CellValue::Text("East".into())].into_iter().collect(),
        );
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 2]);
    }

    #[test]
    fn filters_chain_with_and() {
        let ds = sales();
        let mut filters = init_filter_state(&ds);
        filters.insert(
            "Region".into(),
            [CellValue::Text("East".into())].into_iter().collect(),
        );
        filters.insert(
            "Tier".into(),
            [CellValue::Text("B".into())].into_iter().collect(),
        );
        assert_eq!(filtered_indices(&ds, &filters), vec![2]);
    }

    #[test]
    fn empty_selection_hides_all_rows() {
        let ds = sales();
        let mut filters = init_filter_state(&ds);
        filters.insert("Region".into(), BTreeSet::new());
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn high_cardinality_columns_get_no_filter() {
        let mut csv = String::from("id\n");
        for i in 0..25 {
            csv.push_str(&format!("row{i}\n"));
        }
        let ds = load_bytes(csv.as_bytes()).unwrap();
        assert!(init_filter_state(&ds).is_empty());
    }

    #[test]
    fn selecting_every_value_is_no_constraint() {
        // the Null row passes because the full selection disables the filter
        let ds = load_bytes(b"Region,Sales\nEast,1\n,2\n").unwrap();
        let filters = init_filter_state(&ds);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1]);
    }

    #[test]
    fn null_cells_follow_null_selection() {
        let ds = load_bytes(b"Region,Sales\nEast,1\n,2\nWest,3\n").unwrap();
        let mut filters = init_filter_state(&ds);
        // proper subset without Null → the Null row is hidden
        filters.insert(
            "Region".into(),
            [CellValue::Text("East".into())].into_iter().collect(),
        );
        assert_eq!(filtered_indices(&ds, &filters), vec![0]);

        // adding Null to the subset lets the Null row back in
        filters.insert(
            "Region".into(),
            [CellValue::Text("East".into()), CellValue::Null]
                .into_iter()
                .collect(),
        );
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1]);
    }
}
