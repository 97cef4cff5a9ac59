use crate::constants::{
    EXPECTED_COUNT_HEADER, EXPECTED_DIFFICULTY_HEADER, EXPECTED_STYLE_HEADER, EXPECTED_TYPE_HEADER,
};
use crate::error::{AllocError, Result};
use crate::matrix::FeasibilityMatrix;
use crate::types::{AnswerStyle, CognitiveType, Difficulty, row_index};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

const EXPECTED_HEADERS: [&str; 4] = [
    EXPECTED_STYLE_HEADER,
    EXPECTED_TYPE_HEADER,
    EXPECTED_DIFFICULTY_HEADER,
    EXPECTED_COUNT_HEADER,
];

/// Reads problem inventory from a CSV file
///
/// # Errors
/// Returns error if file cannot be read or CSV format is invalid
pub fn read_inventory_csv<P: AsRef<Path>>(path: P) -> Result<FeasibilityMatrix> {
    let file = std::fs::File::open(path)?;
    read_inventory_from_reader(file)
}

/// Read CSV with `Style,Type,Difficulty,Count` format.
/// - Repeated (style, type, difficulty) rows are summed
/// - Blank rows are skipped, extra columns are ignored
pub fn read_inventory_from_reader<R: Read>(reader: R) -> Result<FeasibilityMatrix> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    validate_csv_headers(&mut rdr)?;

    let mut feasible = FeasibilityMatrix::default();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2; // CSV rows are 1-indexed, +1 for header

        if rec.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let style: AnswerStyle = parse_label(&rec, 0, row)?;
        let cognitive_type: CognitiveType = parse_label(&rec, 1, row)?;
        let difficulty: Difficulty = parse_label(&rec, 2, row)?;
        let count = parse_count_value(get_column_value(&rec, 3, row)?, row)?;

        feasible.add(row_index(style, cognitive_type), difficulty.column(), count)?;
    }

    debug!(
        "Loaded inventory with {} problems",
        feasible.as_matrix().total()
    );
    Ok(feasible)
}

fn validate_csv_headers<R: Read>(csv_reader: &mut csv::Reader<R>) -> Result<()> {
    let headers = csv_reader
        .headers()
        .map_err(|e| AllocError::CsvHeader(format!("Failed to read headers: {}", e)))?;

    for (index, expected) in EXPECTED_HEADERS.iter().enumerate() {
        let found = headers.get(index).ok_or_else(|| {
            AllocError::CsvHeader(format!("Missing {} column at index {}", expected, index))
        })?;
        if !found.eq_ignore_ascii_case(expected) {
            return Err(AllocError::CsvHeader(format!(
                "Expected '{}' in column {}, found '{}'",
                expected, index, found
            )));
        }
    }
    Ok(())
}

fn parse_label<T: FromStr>(record: &StringRecord, column_index: usize, row: usize) -> Result<T> {
    let label = get_column_value(record, column_index, row)?;
    label.parse().map_err(|_| AllocError::UnknownLabel {
        row,
        label: label.to_string(),
    })
}

fn get_column_value(record: &StringRecord, column_index: usize, row_number: usize) -> Result<&str> {
    record
        .get(column_index)
        .map(str::trim)
        .ok_or_else(|| AllocError::CsvRow {
            row: row_number,
            got: record.len(),
        })
}

fn parse_count_value(count_str: &str, row_number: usize) -> Result<u32> {
    count_str
        .parse()
        .map_err(|parse_error| AllocError::CountParse {
            row: row_number,
            value: count_str.to_string(),
            source: parse_error,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_and_accumulate() {
        let data = "\
Style,Type,Difficulty,Count
Objective,Computation,Highest,3
objective,computation,highest,2
Subjective,Reasoning,Lowest,7

Objective,ProblemSolving,Medium,1
";
        let feasible = read_inventory_from_reader(data.as_bytes()).unwrap();
        assert_eq!(feasible.cap(0, 0), 5);
        assert_eq!(feasible.cap(7, 4), 7);
        assert_eq!(feasible.cap(2, 2), 1);
        assert_eq!(feasible.as_matrix().total(), 13);
    }

    #[test]
    fn test_extra_columns_allowed() {
        let data = "Style,Type,Difficulty,Count,Note\nSubjective,Comprehension,High,4,from bank\n";
        let feasible = read_inventory_from_reader(data.as_bytes()).unwrap();
        assert_eq!(feasible.cap(5, 1), 4);
    }

    #[test]
    fn test_bad_header() {
        let data = "Kind,Type,Difficulty,Count\n";
        let err = read_inventory_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AllocError::CsvHeader(_)));
    }

    #[test]
    fn test_unknown_label_reports_row() {
        let data = "Style,Type,Difficulty,Count\nObjective,Computation,High,1\nObjective,Guessing,High,1\n";
        let err = read_inventory_from_reader(data.as_bytes()).unwrap_err();
        match err {
            AllocError::UnknownLabel { row, label } => {
                assert_eq!(row, 3);
                assert_eq!(label, "Guessing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_count() {
        let data = "Style,Type,Difficulty,Count\nObjective,Computation,High,-2\n";
        let err = read_inventory_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AllocError::CountParse { row: 2, .. }));
    }

    #[test]
    fn test_short_row() {
        let data = "Style,Type,Difficulty,Count\nObjective,Computation,High\n";
        let err = read_inventory_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AllocError::CsvRow { row: 2, got: 3 }));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Style,Type,Difficulty,Count").unwrap();
        writeln!(file, "Subjective,Computation,Low,6").unwrap();

        let feasible = read_inventory_csv(file.path()).unwrap();
        assert_eq!(feasible.cap(4, 3), 6);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_inventory_csv("nonexistent_inventory.csv"),
            Err(AllocError::Io(_))
        ));
    }
}
