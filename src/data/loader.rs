use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result, bail};
use encoding_rs::WINDOWS_1252;
use thiserror::Error;

use super::model::{CellValue, Column, ColumnClass, Dataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Errors produced while turning raw file bytes into text.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("file is not valid UTF-8 and the Windows-1252 fallback produced replacement characters")]
    Undecodable,
}

/// Load a dataset from a file.  Dispatch by extension.
///
/// Only `.csv` is supported; anything else is an error surfaced to the UI.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let bytes = std::fs::read(path).context("reading CSV file")?;
            load_bytes(&bytes)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Parse an in-memory CSV byte stream into a typed [`Dataset`].
///
/// Decoding tries UTF-8 first and falls back to Windows-1252 (a permissive
/// single-byte superset of Latin-1). Column names are whitespace-trimmed.
/// Every column is then coerced to numeric if all of its non-empty cells
/// parse as numbers; otherwise it stays categorical.
pub fn load_bytes(bytes: &[u8]) -> Result<Dataset> {
    let text = decode(bytes)?;
    parse_csv(&text)
}

// ---------------------------------------------------------------------------
// Decoding: UTF-8 with Windows-1252 fallback
// ---------------------------------------------------------------------------

fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(s));
    }
    log::warn!("file is not valid UTF-8, retrying as Windows-1252");
    let (decoded, _, had_errors) = WINDOWS_1252.decode(bytes);
    if had_errors {
        return Err(DecodeError::Undecodable.into());
    }
    Ok(decoded)
}

// ---------------------------------------------------------------------------
// CSV parsing and per-column numeric coercion
// ---------------------------------------------------------------------------

fn parse_csv(text: &str) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    // Column-major raw cells; short rows are padded with empty strings.
    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        for (col_idx, raw) in raw_columns.iter_mut().enumerate() {
            raw.push(record.get(col_idx).unwrap_or("").to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw_columns)
        .map(|(name, raw)| coerce_column(name, raw))
        .collect();

    Ok(Dataset::from_columns(columns))
}

/// Best-effort numeric coercion of one raw column.
///
/// If every non-empty cell parses as a number the column becomes `Numeric`
/// (empty cells turn into `Null`); a single unparseable token keeps the whole
/// column as text. Failures are silent, they only decide the class.
fn coerce_column(name: String, raw: Vec<String>) -> Column {
    let parsed: Vec<Option<f64>> = raw
        .iter()
        .map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        })
        .collect();

    let all_numeric = raw
        .iter()
        .zip(&parsed)
        .all(|(s, p)| s.trim().is_empty() || p.is_some());

    if all_numeric {
        let values = parsed
            .into_iter()
            .map(|p| p.map_or(CellValue::Null, CellValue::Number))
            .collect();
        Column {
            name,
            class: ColumnClass::Numeric,
            values,
        }
    } else {
        let values = raw
            .into_iter()
            .map(|s| {
                if s.trim().is_empty() {
                    CellValue::Null
                } else {
                    CellValue::Text(s)
                }
            })
            .collect();
        Column {
            name,
            class: ColumnClass::Categorical,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_column_classifies_numeric() {
        let ds = load_bytes(b"a,b\n1,x\n2.5,y\n-3,z\n").unwrap();
        assert_eq!(ds.column("a").unwrap().class, ColumnClass::Numeric);
        assert_eq!(ds.column("b").unwrap().class, ColumnClass::Categorical);
    }

    #[test]
    fn single_bad_token_makes_column_categorical() {
        let ds = load_bytes(b"v\n1\noops\n3\n").unwrap();
        let col = ds.column("v").unwrap();
        assert_eq!(col.class, ColumnClass::Categorical);
        assert_eq!(col.values[0], CellValue::Text("1".into()));
    }

    #[test]
    fn header_whitespace_is_trimmed() {
        let ds = load_bytes(b"  Revenue ,Region\n1,East\n").unwrap();
        let names: Vec<&str> = ds.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Revenue", "Region"]);
    }

    #[test]
    fn empty_cells_become_null_in_numeric_column() {
        let ds = load_bytes(b"n,tag\n1,a\n,b\n3,c\n").unwrap();
        let col = ds.column("n").unwrap();
        assert_eq!(col.class, ColumnClass::Numeric);
        assert_eq!(col.values[1], CellValue::Null);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn windows_1252_fallback_decodes_latin_text() {
        // "café" with 0xE9, invalid as UTF-8
        let bytes = b"name\ncaf\xe9\n";
        let ds = load_bytes(bytes).unwrap();
        assert_eq!(
            ds.column("name").unwrap().values[0],
            CellValue::Text("café".into())
        );
    }

    #[test]
    fn short_rows_pad_with_nulls() {
        let ds = load_bytes(b"a,b\n1,2\n3\n").unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(*ds.cell(1, "b"), CellValue::Null);
    }

    #[test]
    fn non_csv_extension_is_rejected() {
        let err = load_file(Path::new("data.parquet")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn row_and_column_counts_are_exact() {
        let ds = load_bytes(b"a,b,c\n1,2,3\n4,5,6\n").unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.columns.len(), 3);
    }
}
