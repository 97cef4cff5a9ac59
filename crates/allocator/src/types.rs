use crate::constants::TYPES_PER_STYLE;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Answer style of a problem. Selects the upper or lower half of the matrix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum AnswerStyle {
    Objective,  // multiple choice
    Subjective, // free response
}

impl AnswerStyle {
    /// Matrix rows owned by this style
    pub fn rows(self) -> Range<usize> {
        let start = self as usize * TYPES_PER_STYLE;
        start..start + TYPES_PER_STYLE
    }
}

/// Learning (cognitive) type of a problem
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum CognitiveType {
    Computation,
    Comprehension,
    ProblemSolving,
    Reasoning,
}

/// Difficulty band. Declaration order is the matrix column order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    Highest,
    High,
    Medium,
    Low,
    Lowest,
}

impl Difficulty {
    pub fn column(self) -> usize {
        self as usize
    }

    pub fn from_column(col: usize) -> Option<Self> {
        Self::iter().nth(col)
    }
}

/// Row index for a (style, type) pair
pub fn row_index(style: AnswerStyle, cognitive_type: CognitiveType) -> usize {
    style.rows().start + cognitive_type as usize
}

/// Inverse of [`row_index`]
pub fn row_label(row: usize) -> Option<(AnswerStyle, CognitiveType)> {
    let style = AnswerStyle::iter().nth(row / TYPES_PER_STYLE)?;
    let cognitive_type = CognitiveType::iter().nth(row % TYPES_PER_STYLE)?;
    Some((style, cognitive_type))
}
