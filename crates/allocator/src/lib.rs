pub mod config;
pub mod constants;
pub mod distribute;
pub mod error;
pub mod inventory;
pub mod layout;
pub mod matrix;
pub mod request;
pub mod state;
pub mod types;
pub mod views;

pub use config::Config;
pub use constants::{COLS, DEFAULT_MAX_TOTAL, ROWS};
pub use distribute::{Allocation, distribute, distribute_column};
pub use error::{AllocError, Result};
pub use inventory::{read_inventory_csv, read_inventory_from_reader};
pub use layout::{Page, PageLayout, Placement, paginate};
pub use matrix::{AllocationMatrix, FeasibilityMatrix, Matrix};
pub use request::{ProblemRequest, build_requests, requests_to_json, total_count};
pub use state::AllocationState;
pub use types::{AnswerStyle, CognitiveType, Difficulty, row_index, row_label};
pub use views::{
    AnswerStyleTotals, ByAnswerStyleView, ByDifficultyView, ColumnOutcome, DetailedView,
    DistributionReport,
};
