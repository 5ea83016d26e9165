//! Per-record geometry join chain.
//!
//! Three stages run in a fixed order for each record: the shot join derives
//! the receiver station, the receiver join needs that station, and the bin
//! join needs the station plus the line number the shot join wrote. Each
//! stage is a small pure function so the joins are testable without a
//! container file.

use trcio_core::header::{field, TraceHeader};
use trcio_tabular::{GeometryTable, Result};

/// Stage 1: join the shot block on the record's shot id.
///
/// Copies the source position, depth, line, and static correction, then maps
/// the channel number through the spread to the receiver station:
/// `station = channel - 1 + first_station`.
pub fn apply_shot(h: &mut TraceHeader, table: &GeometryTable) -> Result<()> {
    let row = table.shot(h[field::SHOT_ID])?;
    h[field::SOURCE_X] = row.x;
    h[field::SOURCE_Y] = row.y;
    h[field::SOURCE_Z] = row.z;
    h[field::SOURCE_DEPTH] = row.depth;
    h[field::RECV_LINE] = row.line;
    h[field::SOURCE_STATIC] = row.static_corr;
    h[field::LINE] = row.line;

    let station = h[field::CHANNEL] - 1.0 + row.first_station;
    h[field::RECV_STATION] = station;
    h[field::STATION] = station;
    Ok(())
}

/// Stage 2: join the receiver block on the station stage 1 derived.
pub fn apply_receiver(h: &mut TraceHeader, table: &GeometryTable) -> Result<()> {
    let row = table.receiver(h[field::RECV_STATION])?;
    h[field::RECV_X] = row.x;
    h[field::RECV_Y] = row.y;
    h[field::RECV_Z] = row.z;
    Ok(())
}

/// Stage 3: join the bin block on (station, line).
pub fn apply_bin(h: &mut TraceHeader, table: &GeometryTable) -> Result<()> {
    let row = table.bin(h[field::RECV_STATION], h[field::RECV_LINE])?;
    h[field::CMP_LINE] = row.cmp_line;
    h[field::CMP_STATION] = row.cmp_station;
    h[field::CMP_X] = row.x;
    h[field::CMP_X_ALT] = row.x;
    h[field::CMP_Y] = row.y;
    h[field::CMP_Y_ALT] = row.y;
    Ok(())
}

/// Run all three join stages on one header.
pub fn enrich_header(h: &mut TraceHeader, table: &GeometryTable) -> Result<()> {
    apply_shot(h, table)?;
    apply_receiver(h, table)?;
    apply_bin(h, table)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use trcio_tabular::schema::col;
    use trcio_tabular::{TabularError, MIN_COLUMNS};

    fn row(cells: &[(usize, f64)]) -> Vec<f64> {
        let mut r = vec![0.0; MIN_COLUMNS];
        for &(i, v) in cells {
            r[i] = v;
        }
        r
    }

    /// Shot 7 on line 3, spread starting at station 1000; receiver station
    /// 1004 surveyed at (2000, 3000, 150); bin (1004, 3) at (2500, 3500).
    fn table() -> GeometryTable {
        GeometryTable::from_rows([
            row(&[
                (col::SHOT_KEY, 7.0),
                (col::SHOT_LINE, 3.0),
                (col::SHOT_DEPTH, 12.5),
                (col::SHOT_STATIC, -4.0),
                (col::SHOT_FIRST_STATION, 1000.0),
                (col::SHOT_X, 100.0),
                (col::SHOT_Y, 200.0),
                (col::SHOT_Z, 90.0),
            ]),
            row(&[
                (col::RECV_STATION, 1004.0),
                (col::RECV_X, 2000.0),
                (col::RECV_Y, 3000.0),
                (col::RECV_Z, 150.0),
            ]),
            row(&[
                (col::BIN_STATION, 1004.0),
                (col::BIN_LINE, 3.0),
                (col::BIN_CMP_LINE, 31.0),
                (col::BIN_CMP_STATION, 2008.0),
                (col::BIN_X, 2500.0),
                (col::BIN_Y, 3500.0),
            ]),
        ])
        .unwrap()
    }

    fn shot_7_channel_5() -> TraceHeader {
        let mut h = TraceHeader::zeroed();
        h[field::SHOT_ID] = 7.0;
        h[field::CHANNEL] = 5.0;
        h
    }

    #[test]
    fn test_shot_join_targets() {
        let table = table();
        let mut h = shot_7_channel_5();
        apply_shot(&mut h, &table).unwrap();

        assert_eq!(h[field::SOURCE_X], 100.0);
        assert_eq!(h[field::SOURCE_Y], 200.0);
        assert_eq!(h[field::SOURCE_Z], 90.0);
        assert_eq!(h[field::SOURCE_DEPTH], 12.5);
        assert_eq!(h[field::SOURCE_STATIC], -4.0);
        assert_eq!(h[field::RECV_LINE], 3.0);
        assert_eq!(h[field::LINE], 3.0);
        // channel 5 - 1 + first station 1000
        assert_eq!(h[field::RECV_STATION], 1004.0);
        assert_eq!(h[field::STATION], 1004.0);
    }

    #[test]
    fn test_full_chain() {
        let table = table();
        let mut h = shot_7_channel_5();
        enrich_header(&mut h, &table).unwrap();

        assert_eq!(h[field::RECV_X], 2000.0);
        assert_eq!(h[field::RECV_Y], 3000.0);
        assert_eq!(h[field::RECV_Z], 150.0);
        assert_eq!(h[field::CMP_LINE], 31.0);
        assert_eq!(h[field::CMP_STATION], 2008.0);
        assert_eq!(h[field::CMP_X], 2500.0);
        assert_eq!(h[field::CMP_X_ALT], 2500.0);
        assert_eq!(h[field::CMP_Y], 3500.0);
        assert_eq!(h[field::CMP_Y_ALT], 3500.0);
    }

    #[test]
    fn test_untouched_slots_stay_untouched() {
        let table = table();
        let mut h = shot_7_channel_5();
        h[0] = 1234.0;
        h[63] = -1.0;
        enrich_header(&mut h, &table).unwrap();
        assert_eq!(h[0], 1234.0);
        assert_eq!(h[63], -1.0);
        assert_eq!(h[field::SHOT_ID], 7.0);
        assert_eq!(h[field::CHANNEL], 5.0);
    }

    #[test]
    fn test_unknown_shot_aborts() {
        let table = table();
        let mut h = shot_7_channel_5();
        h[field::SHOT_ID] = 8.0;
        match enrich_header(&mut h, &table) {
            Err(TabularError::LookupMiss { table: "shot", .. }) => {}
            other => panic!("expected shot LookupMiss, got {other:?}"),
        }
    }

    #[test]
    fn test_unmapped_channel_misses_receiver() {
        let table = table();
        let mut h = shot_7_channel_5();
        h[field::CHANNEL] = 6.0; // maps to station 1005, not surveyed
        match enrich_header(&mut h, &table) {
            Err(TabularError::LookupMiss {
                table: "receiver", ..
            }) => {}
            other => panic!("expected receiver LookupMiss, got {other:?}"),
        }
    }
}
