//! Общие константы (store bounds, data file, menu choices).

// -------- Store --------
/// Default upper bound on the number of records held in memory.
pub const MAX_ITEMS: usize = 100;

/// Max stored name length in bytes (50-byte field minus terminator).
pub const NAME_MAX_BYTES: usize = 49;

// -------- Data file --------
pub const DATA_FILE: &str = "items.csv";

/// Separator between name and value in a data file line.
pub const FIELD_SEP: char = ',';

/// Longest accepted data file line in bytes (newline included); longer lines are skipped.
pub const MAX_DATA_LINE: usize = 1024;

// -------- Interactive input --------
/// Longest accepted input line in bytes (newline included).
pub const MAX_INPUT_LINE: usize = 1024;

// -------- Menu --------
pub const CHOICE_ADD: i32 = 1;
pub const CHOICE_VIEW: i32 = 2;
pub const CHOICE_EXIT: i32 = 3;

// -------- ENV --------
pub const ENV_DATA_FILE: &str = "RABBIT_DATA_FILE";
pub const ENV_MAX_ITEMS: &str = "RABBIT_MAX_ITEMS";
