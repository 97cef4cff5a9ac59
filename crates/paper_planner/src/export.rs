use crate::error::{PlannerError, Result};
use allocator::{Difficulty, Matrix, ProblemRequest, requests_to_json, row_label};
use chrono::Local;
use csv::WriterBuilder;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use strum::IntoEnumIterator;

/// Writes the matrix as `allocation_<timestamp>.csv`, one line per matrix row.
pub fn export_allocation_csv(matrix: &Matrix, output_dir: Option<&Path>) -> Result<PathBuf> {
    let file_path = timestamped_path("allocation", "csv", output_dir)?;
    let file = File::create(&file_path).map_err(|e| PlannerError::CreateFile {
        path: file_path.clone(),
        source: e,
    })?;

    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder = builder.terminator(Terminator::CRLF);
    }
    let mut wtr = builder.from_writer(BufWriter::new(file));

    let mut header = vec!["Style".to_string(), "Type".to_string()];
    header.extend(Difficulty::iter().map(|d| d.to_string()));
    wtr.write_record(&header)?;

    for (row, cells) in matrix.rows().iter().enumerate() {
        let Some((style, cognitive_type)) = row_label(row) else {
            continue;
        };
        let mut record = vec![style.to_string(), cognitive_type.to_string()];
        record.extend(cells.iter().map(u32::to_string));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(file_path)
}

/// Writes the flattened request list as `requests_<timestamp>.json`.
pub fn export_requests_json(
    requests: &[ProblemRequest],
    output_dir: Option<&Path>,
) -> Result<PathBuf> {
    let file_path = timestamped_path("requests", "json", output_dir)?;
    let json = requests_to_json(requests)?;

    let mut file = File::create(&file_path).map_err(|e| PlannerError::CreateFile {
        path: file_path.clone(),
        source: e,
    })?;
    file.write_all(json.as_bytes())?;
    Ok(file_path)
}

fn timestamped_path(prefix: &str, extension: &str, output_dir: Option<&Path>) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = format!("{prefix}_{timestamp}.{extension}");

    match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| PlannerError::CreateDir {
                path: dir.to_path_buf(),
                source: e,
            })?;
            Ok(dir.join(filename))
        }
        None => Ok(filename.into()),
    }
}
