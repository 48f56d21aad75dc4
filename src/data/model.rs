use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Number(_) => 1,
                Text(_) => 2,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Number(a), Number(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => {
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{v:.0}")
                } else {
                    write!(f, "{v}")
                }
            }
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for plotting / aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Column – one typed column of the table
// ---------------------------------------------------------------------------

/// The resolved type of a column after best-effort numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    /// Every non-empty cell parsed as a number.
    Numeric,
    /// At least one non-empty cell did not parse; kept as text.
    Categorical,
}

impl ColumnClass {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnClass::Numeric => "numeric",
            ColumnClass::Categorical => "categorical",
        }
    }
}

/// A single column: name, resolved class, and one cell per row.
/// A `Numeric` column holds only `Number`/`Null` cells, a `Categorical`
/// column only `Text`/`Null`.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub class: ColumnClass,
    pub values: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed unique-value indices.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All columns, in file order.
    pub columns: Vec<Column>,
    /// Number of rows (every column has exactly this many cells).
    pub row_count: usize,
    /// For each categorical column the sorted set of unique non-null values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl Dataset {
    /// Build the dataset from typed columns, indexing categorical uniques.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let row_count = columns.first().map(|c| c.values.len()).unwrap_or(0);

        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();
        for col in &columns {
            if col.class != ColumnClass::Categorical {
                continue;
            }
            let uniques = unique_values.entry(col.name.clone()).or_default();
            for val in &col.values {
                if !val.is_null() {
                    uniques.insert(val.clone());
                }
            }
        }

        Dataset {
            columns,
            row_count,
            unique_values,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.row_count
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The cell at (row, column name), `Null` if out of range or unknown.
    pub fn cell(&self, row: usize, name: &str) -> &CellValue {
        self.column(name)
            .and_then(|c| c.values.get(row))
            .unwrap_or(&CellValue::Null)
    }

    /// Names of all numeric columns, in file order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.class == ColumnClass::Numeric)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Names of all categorical columns, in file order.
    pub fn categorical_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.class == ColumnClass::Categorical)
            .map(|c| c.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_columns(vec![
            Column {
                name: "Region".into(),
                class: ColumnClass::Categorical,
                values: vec![
                    CellValue::Text("East".into()),
                    CellValue::Text("West".into()),
                    CellValue::Text("East".into()),
                ],
            },
            Column {
                name: "Sales".into(),
                class: ColumnClass::Numeric,
                values: vec![
                    CellValue::Number(10.0),
                    CellValue::Number(-5.0),
                    CellValue::Null,
                ],
            },
        ])
    }

    #[test]
    fn partitions_columns_by_class() {
        let ds = sample();
        assert_eq!(ds.numeric_columns(), vec!["Sales"]);
        assert_eq!(ds.categorical_columns(), vec!["Region"]);
    }

    #[test]
    fn indexes_categorical_uniques_without_nulls() {
        let ds = sample();
        let uniques = &ds.unique_values["Region"];
        assert_eq!(uniques.len(), 2);
        assert!(uniques.contains(&CellValue::Text("East".into())));
        // numeric columns are not indexed
        assert!(!ds.unique_values.contains_key("Sales"));
    }

    #[test]
    fn cell_lookup_is_null_out_of_range() {
        let ds = sample();
        assert_eq!(*ds.cell(0, "Sales"), CellValue::Number(10.0));
        assert_eq!(*ds.cell(99, "Sales"), CellValue::Null);
        assert_eq!(*ds.cell(0, "Nope"), CellValue::Null);
    }

    #[test]
    fn cell_value_ordering_is_total() {
        let mut vals = vec![
            CellValue::Text("b".into()),
            CellValue::Number(2.0),
            CellValue::Null,
            CellValue::Number(-1.0),
            CellValue::Text("a".into()),
        ];
        vals.sort();
        assert_eq!(vals[0], CellValue::Null);
        assert_eq!(vals[1], CellValue::Number(-1.0));
        assert_eq!(vals[4], CellValue::Text("b".into()));
    }
}
