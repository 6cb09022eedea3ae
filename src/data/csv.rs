//! CSV dataset loading and preprocessing
//!
//! The last column is the label; all other columns are features. `#`
//! comments and blank lines are skipped and a header row is detected
//! automatically. Non-numeric feature columns are treated as categorical
//! and either one-hot expanded (`unfold = true`) or encoded as ordinal
//! category codes (`unfold = false`). Non-numeric labels are mapped to
//! dense integer codes.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::core::{Dataset, RebalanceError, Result};

/// Load a CSV file into a dataset.
///
/// `unfold` selects between the one-hot expanded representation of
/// categorical columns and the raw ordinal-coded one.
pub fn load_dataset<P: AsRef<Path>>(path: P, unfold: bool) -> Result<Dataset> {
    let file = File::open(path).map_err(RebalanceError::IoError)?;
    from_reader(BufReader::new(file), unfold)
}

/// Load a dataset from any buffered reader
pub fn from_reader<R: BufRead>(reader: R, unfold: bool) -> Result<Dataset> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(RebalanceError::IoError)?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<String> = line.split(',').map(|f| f.trim().to_string()).collect();
        if fields.len() < 2 {
            return Err(RebalanceError::ParseError(format!(
                "line has too few fields: {line}"
            )));
        }
        rows.push(fields);
    }

    if rows.is_empty() {
        return Err(RebalanceError::EmptyDataset);
    }

    let width = rows[0].len();
    for row in &rows {
        if row.len() != width {
            return Err(RebalanceError::DimensionMismatch {
                expected: width,
                actual: row.len(),
            });
        }
    }

    if has_header(&rows) {
        debug!("skipping detected header row");
        rows.remove(0);
        if rows.is_empty() {
            return Err(RebalanceError::EmptyDataset);
        }
    }

    let label_col = width - 1;
    let labels = encode_labels(&rows, label_col)?;

    let mut features: Vec<Vec<f64>> = vec![Vec::new(); rows.len()];
    for col in 0..label_col {
        append_column(&rows, col, unfold, &mut features)?;
    }

    Dataset::new(features, labels)
}

/// A first row is a header when some column is numeric in every later row
/// but not in the first, or, lacking any numeric column, when most of the
/// first row's fields are non-numeric words.
fn has_header(rows: &[Vec<String>]) -> bool {
    if rows.len() < 2 {
        return false;
    }

    let width = rows[0].len();
    let mut saw_numeric_column = false;
    for col in 0..width {
        let rest_numeric = rows[1..]
            .iter()
            .all(|row| row[col].parse::<f64>().is_ok());
        if rest_numeric {
            saw_numeric_column = true;
            if rows[0][col].parse::<f64>().is_err() {
                return true;
            }
        }
    }

    if saw_numeric_column {
        return false;
    }

    // All-categorical data: fall back to a word-count heuristic
    let non_numeric = rows[0]
        .iter()
        .filter(|field| field.parse::<f64>().is_err())
        .count();
    non_numeric > width / 2 && rows[1..].iter().all(|row| row != &rows[0])
}

/// Labels parse as integers directly, or get dense codes assigned in sorted
/// order of their distinct textual values.
fn encode_labels(rows: &[Vec<String>], col: usize) -> Result<Vec<i32>> {
    let all_integer = rows.iter().all(|row| row[col].parse::<i32>().is_ok());
    if all_integer {
        return Ok(rows
            .iter()
            .map(|row| row[col].parse::<i32>().unwrap_or_default())
            .collect());
    }

    let categories = distinct_values(rows, col);
    Ok(rows
        .iter()
        .map(|row| category_code(&categories, &row[col]) as i32)
        .collect())
}

/// Append one source column to every feature row, expanding or encoding
/// categorical values as requested.
fn append_column(
    rows: &[Vec<String>],
    col: usize,
    unfold: bool,
    features: &mut [Vec<f64>],
) -> Result<()> {
    let numeric = rows.iter().all(|row| row[col].parse::<f64>().is_ok());

    if numeric {
        for (row, out) in rows.iter().zip(features.iter_mut()) {
            let value = row[col].parse::<f64>().map_err(|_| {
                RebalanceError::ParseError(format!("invalid value in column {col}"))
            })?;
            out.push(value);
        }
        return Ok(());
    }

    let categories = distinct_values(rows, col);
    for (row, out) in rows.iter().zip(features.iter_mut()) {
        let code = category_code(&categories, &row[col]);
        if unfold {
            // One indicator column per category
            for k in 0..categories.len() {
                out.push(if k == code { 1.0 } else { 0.0 });
            }
        } else {
            out.push(code as f64);
        }
    }
    Ok(())
}

fn distinct_values(rows: &[Vec<String>], col: usize) -> Vec<String> {
    let mut values: Vec<String> = rows.iter().map(|row| row[col].clone()).collect();
    values.sort();
    values.dedup();
    values
}

fn category_code(categories: &[String], value: &str) -> usize {
    categories
        .iter()
        .position(|c| c == value)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_numeric_basic() {
        let data = "1.0,2.0,1\n3.0,4.0,0\n";
        let ds = from_reader(Cursor::new(data), true).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dim(), 2);
        assert_eq!(ds.labels(), &[1, 0]);
        assert_eq!(ds.row(0), &[1.0, 2.0]);
    }

    #[test]
    fn test_header_detected_and_skipped() {
        let data = "age,weight,label\n1.0,2.0,1\n3.0,4.0,0\n";
        let ds = from_reader(Cursor::new(data), true).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.labels(), &[1, 0]);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let data = "# comment\n1.0,2.0,1\n\n3.0,4.0,0\n";
        let ds = from_reader(Cursor::new(data), true).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_categorical_unfolded() {
        let data = "red,1.0,0\nblue,2.0,1\nred,3.0,0\n";
        let ds = from_reader(Cursor::new(data), true).unwrap();

        // "blue" and "red" expand into two indicator columns
        assert_eq!(ds.dim(), 3);
        assert_eq!(ds.row(0), &[0.0, 1.0, 1.0]); // red
        assert_eq!(ds.row(1), &[1.0, 0.0, 2.0]); // blue
    }

    #[test]
    fn test_categorical_raw_codes() {
        let data = "red,1.0,0\nblue,2.0,1\nred,3.0,0\n";
        let ds = from_reader(Cursor::new(data), false).unwrap();

        assert_eq!(ds.dim(), 2);
        assert_eq!(ds.row(0), &[1.0, 1.0]); // red -> code 1 (sorted after blue)
        assert_eq!(ds.row(1), &[0.0, 2.0]); // blue -> code 0
    }

    #[test]
    fn test_string_labels_coded() {
        let data = "1.0,yes\n2.0,no\n3.0,yes\n";
        let ds = from_reader(Cursor::new(data), true).unwrap();
        // sorted distinct: [no, yes] -> no = 0, yes = 1
        assert_eq!(ds.labels(), &[1, 0, 1]);
    }

    #[test]
    fn test_empty_input() {
        let result = from_reader(Cursor::new(""), true);
        assert!(matches!(result, Err(RebalanceError::EmptyDataset)));

        let only_comments = from_reader(Cursor::new("# nothing\n"), true);
        assert!(matches!(only_comments, Err(RebalanceError::EmptyDataset)));
    }

    #[test]
    fn test_too_few_fields() {
        let result = from_reader(Cursor::new("1.0\n"), true);
        assert!(matches!(result, Err(RebalanceError::ParseError(_))));
    }

    #[test]
    fn test_ragged_rows() {
        let result = from_reader(Cursor::new("1.0,2.0,1\n1.0,0\n"), true);
        assert!(matches!(
            result,
            Err(RebalanceError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_no_header_when_all_numeric() {
        let data = "1,2,1\n3,4,0\n";
        let ds = from_reader(Cursor::new(data), true).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_unfold_keeps_row_label_pairing() {
        let data = "a,1.0,0\nb,2.0,1\nc,3.0,2\n";
        let unfolded = from_reader(Cursor::new(data), true).unwrap();
        let raw = from_reader(Cursor::new(data), false).unwrap();

        assert_eq!(unfolded.labels(), raw.labels());
        assert_eq!(unfolded.dim(), 4);
        assert_eq!(raw.dim(), 2);
    }
}
