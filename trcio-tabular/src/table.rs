//! Geometry table loading and exact-match indices.

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::{Result, TabularError};
use crate::schema::{col, BinRow, ReceiverRow, ShotRow, MIN_COLUMNS};

/// Normalize an f64 join key to comparable bits. `-0.0` folds onto `0.0`;
/// everything else matches exactly or not at all.
#[inline]
fn key_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// The loaded geometry table: three exact-match indices over one row set.
///
/// Duplicate keys are resolved by construction order: the last occurrence in
/// the table wins.
#[derive(Debug, Default)]
pub struct GeometryTable {
    shots: FxHashMap<u64, ShotRow>,
    receivers: FxHashMap<u64, ReceiverRow>,
    bins: FxHashMap<(u64, u64), BinRow>,
}

impl GeometryTable {
    /// Load the table from a delimited file with no header row.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = std::fs::File::open(path)?;
        Self::load_from_reader(reader)
    }

    /// Load the table from any reader of delimited rows.
    ///
    /// Every row must be at least [`MIN_COLUMNS`] wide. A block whose key
    /// cell is blank or non-numeric contributes nothing; a block with a
    /// usable key but an unusable value cell is skipped with a warning, and
    /// any later lookup of that key fails hard instead of seeing defaults.
    pub fn load_from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut table = GeometryTable::default();
        let mut rows = 0usize;
        let mut skipped_blocks = 0usize;
        for (idx, record) in csv_reader.records().enumerate() {
            let record = record?;
            let cells: Vec<Option<f64>> = record
                .iter()
                .map(|cell| cell.trim().parse::<f64>().ok())
                .collect();
            skipped_blocks += table.ingest(idx, &cells)?;
            rows += 1;
        }

        tracing::debug!(
            rows,
            shots = table.shots.len(),
            receivers = table.receivers.len(),
            bins = table.bins.len(),
            skipped_blocks,
            "geometry table loaded"
        );
        Ok(table)
    }

    /// Build a table from fully-numeric rows. Mostly useful for synthetic
    /// tables in tests and tooling.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<f64>>,
    {
        let mut table = GeometryTable::default();
        for (idx, row) in rows.into_iter().enumerate() {
            let cells: Vec<Option<f64>> = row.into_iter().map(Some).collect();
            table.ingest(idx, &cells)?;
        }
        Ok(table)
    }

    /// Index one row's blocks. Returns the number of blocks skipped because
    /// a keyed block had an unusable value cell.
    fn ingest(&mut self, idx: usize, cells: &[Option<f64>]) -> Result<usize> {
        if cells.len() < MIN_COLUMNS {
            return Err(TabularError::MalformedTable(format!(
                "row {idx} has {} columns, schema needs at least {MIN_COLUMNS}",
                cells.len()
            )));
        }
        let mut skipped = 0usize;

        if let Some(key) = cells[col::SHOT_KEY] {
            match shot_row(key, cells) {
                Some(row) => {
                    self.shots.insert(key_bits(key), row);
                }
                None => {
                    skipped += 1;
                    tracing::warn!(row = idx, block = "shot", "non-numeric cell; block skipped");
                }
            }
        }

        if let Some(station) = cells[col::RECV_STATION] {
            match receiver_row(station, cells) {
                Some(row) => {
                    self.receivers.insert(key_bits(station), row);
                }
                None => {
                    skipped += 1;
                    tracing::warn!(
                        row = idx,
                        block = "receiver",
                        "non-numeric cell; block skipped"
                    );
                }
            }
        }

        match (cells[col::BIN_STATION], cells[col::BIN_LINE]) {
            (Some(station), Some(line)) => match bin_row(station, line, cells) {
                Some(row) => {
                    self.bins.insert((key_bits(station), key_bits(line)), row);
                }
                None => {
                    skipped += 1;
                    tracing::warn!(row = idx, block = "bin", "non-numeric cell; block skipped");
                }
            },
            (None, None) => {}
            _ => {
                skipped += 1;
                tracing::warn!(row = idx, block = "bin", "half-keyed block; skipped");
            }
        }

        Ok(skipped)
    }

    /// Look up a shot by its key field.
    pub fn shot(&self, key: f64) -> Result<&ShotRow> {
        self.shots
            .get(&key_bits(key))
            .ok_or_else(|| TabularError::LookupMiss {
                table: "shot",
                key: format!("key {key}"),
            })
    }

    /// Look up a receiver by station number.
    pub fn receiver(&self, station: f64) -> Result<&ReceiverRow> {
        self.receivers
            .get(&key_bits(station))
            .ok_or_else(|| TabularError::LookupMiss {
                table: "receiver",
                key: format!("station {station}"),
            })
    }

    /// Look up a midpoint bin by (station, line).
    pub fn bin(&self, station: f64, line: f64) -> Result<&BinRow> {
        self.bins
            .get(&(key_bits(station), key_bits(line)))
            .ok_or_else(|| TabularError::LookupMiss {
                table: "bin",
                key: format!("station {station}, line {line}"),
            })
    }

    pub fn shot_count(&self) -> usize {
        self.shots.len()
    }

    pub fn receiver_count(&self) -> usize {
        self.receivers.len()
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }
}

fn shot_row(key: f64, cells: &[Option<f64>]) -> Option<ShotRow> {
    Some(ShotRow {
        key,
        line: cells[col::SHOT_LINE]?,
        depth: cells[col::SHOT_DEPTH]?,
        static_corr: cells[col::SHOT_STATIC]?,
        first_station: cells[col::SHOT_FIRST_STATION]?,
        x: cells[col::SHOT_X]?,
        y: cells[col::SHOT_Y]?,
        z: cells[col::SHOT_Z]?,
    })
}

fn receiver_row(station: f64, cells: &[Option<f64>]) -> Option<ReceiverRow> {
    Some(ReceiverRow {
        station,
        x: cells[col::RECV_X]?,
        y: cells[col::RECV_Y]?,
        z: cells[col::RECV_Z]?,
    })
}

fn bin_row(station: f64, line: f64, cells: &[Option<f64>]) -> Option<BinRow> {
    Some(BinRow {
        station,
        line,
        cmp_line: cells[col::BIN_CMP_LINE]?,
        cmp_station: cells[col::BIN_CMP_STATION]?,
        x: cells[col::BIN_X]?,
        y: cells[col::BIN_Y]?,
    })
}

// ============================================================================
// Tests
// ============================================================================
