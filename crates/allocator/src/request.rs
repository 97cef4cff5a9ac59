use crate::error::Result;
use crate::matrix::Matrix;
use crate::types::{AnswerStyle, CognitiveType, Difficulty, row_label};
use serde::{Deserialize, Serialize};

/// One line of a paper generation request sent to the search backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRequest {
    pub style: AnswerStyle,
    pub cognitive_type: CognitiveType,
    pub difficulty: Difficulty,
    pub count: u32,
}

/// Flattens the non-zero cells of an allocation, row-major.
pub fn build_requests(matrix: &Matrix) -> Vec<ProblemRequest> {
    let mut requests = Vec::new();
    for (row, cells) in matrix.rows().iter().enumerate() {
        let Some((style, cognitive_type)) = row_label(row) else {
            continue;
        };
        for (col, &count) in cells.iter().enumerate() {
            if count == 0 {
                continue;
            }
            if let Some(difficulty) = Difficulty::from_column(col) {
                requests.push(ProblemRequest {
                    style,
                    cognitive_type,
                    difficulty,
                    count,
                });
            }
        }
    }
    requests
}

pub fn total_count(requests: &[ProblemRequest]) -> u64 {
    requests.iter().map(|r| u64::from(r.count)).sum()
}

pub fn requests_to_json(requests: &[ProblemRequest]) -> Result<String> {
    Ok(serde_json::to_string_pretty(requests)?)
}
