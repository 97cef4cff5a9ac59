/// Matrix shape
pub const ROWS: usize = 8; // 2 answer styles x 4 cognitive types
pub const COLS: usize = 5; // highest .. lowest
pub const TYPES_PER_STYLE: usize = 4;

/// Grand total ceiling when no config overrides it
pub const DEFAULT_MAX_TOTAL: u32 = 200;

/// Page layout defaults (abstract height units)
pub const DEFAULT_PAGE_HEIGHT: f32 = 1000.0;
pub const DEFAULT_LAYOUT_COLUMNS: usize = 2;
pub const DEFAULT_ITEM_GAP: f32 = 8.0;

/// Expected headers in inventory CSV files
pub const EXPECTED_STYLE_HEADER: &str = "Style";
pub const EXPECTED_TYPE_HEADER: &str = "Type";
pub const EXPECTED_DIFFICULTY_HEADER: &str = "Difficulty";
pub const EXPECTED_COUNT_HEADER: &str = "Count";
