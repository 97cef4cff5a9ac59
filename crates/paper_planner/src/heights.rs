use crate::error::{PlannerError, Result};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

/// Item heights in file order from an `Item,Height` CSV.
/// The item column is only a label; order decides placement.
pub fn read_heights_csv<P: AsRef<Path>>(path: P) -> Result<Vec<f32>> {
    let file = std::fs::File::open(path)?;
    read_heights_from_reader(file)
}

pub fn read_heights_from_reader<R: Read>(reader: R) -> Result<Vec<f32>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut heights = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2;
        let raw = rec.get(1).ok_or_else(|| {
            PlannerError::InvalidArgument(format!("row {row}: missing Height column"))
        })?;
        let height: f32 = raw.parse().map_err(|_| {
            PlannerError::InvalidArgument(format!("row {row}: invalid height '{raw}'"))
        })?;
        if !(height >= 0.0) {
            return Err(PlannerError::InvalidArgument(format!(
                "row {row}: height must not be negative, got {height}"
            )));
        }
        heights.push(height);
    }
    Ok(heights)
}
