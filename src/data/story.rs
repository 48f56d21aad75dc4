use std::collections::BTreeMap;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Story aggregates – pure computations behind the four narrative scenes
// ---------------------------------------------------------------------------

/// Descriptive statistics over the non-null values of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
}

/// Sum of `value_col` per distinct value of `group_col`, over the given rows,
/// sorted ascending by sum.
///
/// Null group cells aggregate under [`CellValue::Null`]; null measure cells
/// contribute nothing but still register their group.
pub fn group_sums(
    dataset: &Dataset,
    rows: &[usize],
    group_col: &str,
    value_col: &str,
) -> Vec<(CellValue, f64)> {
    let mut sums: BTreeMap<CellValue, f64> = BTreeMap::new();
    for &row in rows {
        let group = dataset.cell(row, group_col).clone();
        let entry = sums.entry(group).or_insert(0.0);
        if let Some(v) = dataset.cell(row, value_col).as_f64() {
            *entry += v;
        }
    }
    let mut out: Vec<(CellValue, f64)> = sums.into_iter().collect();
    out.sort_by(|a, b| a.1.total_cmp(&b.1));
    out
}

/// Rows (in order) whose value in `col` is strictly negative.
pub fn negative_rows(dataset: &Dataset, rows: &[usize], col: &str) -> Vec<usize> {
    rows.iter()
        .copied()
        .filter(|&row| matches!(dataset.cell(row, col).as_f64(), Some(v) if v < 0.0))
        .collect()
}

/// Mean / max / min over the non-null values of `col` in the given rows.
/// `None` when no non-null value exists.
pub fn summary(dataset: &Dataset, rows: &[usize], col: &str) -> Option<Summary> {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|&row| dataset.cell(row, col).as_f64())
        .collect();

    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);

    Some(Summary {
        mean,
        max,
        min,
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bytes;

    fn sales() -> Dataset {
        load_bytes(b"Region,Sales\nEast,10\nWest,-5\n").unwrap()
    }

    fn all_rows(ds: &Dataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn group_sums_sort_ascending() {
        let ds = sales();
        let rows = all_rows(&ds);
        let sums = group_sums(&ds, &rows, "Region", "Sales");
        assert_eq!(
            sums,
            vec![
                (CellValue::Text("West".into()), -5.0),
                (CellValue::Text("East".into()), 10.0),
            ]
        );
        // leader is the last entry, trailer the first
        assert_eq!(sums.last().unwrap().0, CellValue::Text("East".into()));
        assert_eq!(sums.first().unwrap().0, CellValue::Text("West".into()));
    }

    #[test]
    fn group_sums_respect_row_subset() {
        let ds = sales();
        let sums = group_sums(&ds, &[0], "Region", "Sales");
        assert_eq!(sums, vec![(CellValue::Text("East".into()), 10.0)]);
    }

    #[test]
    fn null_measure_cells_still_register_the_group() {
        let ds = load_bytes(b"Region,Sales\nEast,\nWest,3\n").unwrap();
        let rows = all_rows(&ds);
        let sums = group_sums(&ds, &rows, "Region", "Sales");
        assert_eq!(
            sums,
            vec![
                (CellValue::Text("East".into()), 0.0),
                (CellValue::Text("West".into()), 3.0),
            ]
        );
    }

    #[test]
    fn negative_rows_finds_exactly_the_conflicts() {
        let ds = sales();
        let rows = all_rows(&ds);
        assert_eq!(negative_rows(&ds, &rows, "Sales"), vec![1]);
    }

    #[test]
    fn negative_rows_empty_when_all_non_negative() {
        let ds = load_bytes(b"v\n0\n1\n2\n").unwrap();
        let rows = all_rows(&ds);
        assert!(negative_rows(&ds, &rows, "v").is_empty());
    }

    #[test]
    fn summary_skips_nulls() {
        let ds = load_bytes(b"v,tag\n,a\n2,b\n4,c\n").unwrap();
        let rows = all_rows(&ds);
        let s = summary(&ds, &rows, "v").unwrap();
        assert_eq!(s.mean, 3.0);
        assert_eq!(s.max, 4.0);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.count, 2);
    }

    #[test]
    fn summary_none_without_values() {
        let ds = sales();
        assert_eq!(summary(&ds, &[], "Sales"), None);
        let rows = all_rows(&ds);
        // categorical column has no numeric values
        assert_eq!(summary(&ds, &rows, "Region"), None);
    }
}
