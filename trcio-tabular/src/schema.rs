//! Named column schema for the geometry table.
//!
//! The table is 0-indexed with no header row and at least [`MIN_COLUMNS`]
//! columns. Three blocks of columns are consumed; everything else is ignored.
//! Positions are fixed by the export format that produces the table.

/// Minimum column count a row must have. Narrower rows are rejected at load
/// time rather than failing lazily on first access.
pub const MIN_COLUMNS: usize = 43;

/// Absolute column positions, grouped by row block.
pub mod col {
    // Shot block: keyed by shot identifier.
    pub const SHOT_KEY: usize = 1;
    pub const SHOT_LINE: usize = 2;
    pub const SHOT_DEPTH: usize = 4;
    pub const SHOT_STATIC: usize = 5;
    pub const SHOT_FIRST_STATION: usize = 7;
    pub const SHOT_X: usize = 25;
    pub const SHOT_Y: usize = 26;
    pub const SHOT_Z: usize = 27;

    // Receiver block: keyed by station number.
    pub const RECV_STATION: usize = 19;
    pub const RECV_X: usize = 20;
    pub const RECV_Y: usize = 21;
    pub const RECV_Z: usize = 22;

    // Bin block: keyed by (station, line).
    pub const BIN_STATION: usize = 36;
    pub const BIN_LINE: usize = 37;
    pub const BIN_CMP_LINE: usize = 39;
    pub const BIN_CMP_STATION: usize = 40;
    pub const BIN_X: usize = 41;
    pub const BIN_Y: usize = 42;
}

/// One shot record: source position, spread layout, and corrections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRow {
    pub key: f64,
    pub line: f64,
    pub depth: f64,
    pub static_corr: f64,
    /// Station number of the spread's first channel; channel `c` maps to
    /// station `c - 1 + first_station`.
    pub first_station: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One receiver record: station number and surveyed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReceiverRow {
    pub station: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One midpoint bin record, keyed by (station, line).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinRow {
    pub station: f64,
    pub line: f64,
    pub cmp_line: f64,
    pub cmp_station: f64,
    pub x: f64,
    pub y: f64,
}
