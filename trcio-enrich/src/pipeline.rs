//! Two-phase enrichment pipeline.
//!
//! Phase 1 joins every record against the geometry table; records are
//! independent so the joins fan out across threads. Phase 2 builds the
//! elevation index from all enriched receiver positions — a hard barrier —
//! then assigns every record's midpoint elevation from the nearest indexed
//! receiver, again in parallel against the read-only index.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use trcio_core::header::field;
use trcio_core::TraceFile;
use trcio_spatial::{ElevationIndex, ElevationPoint};
use trcio_tabular::GeometryTable;

use crate::engine::enrich_header;
use crate::error::{EnrichError, Result};

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Complete records read and enriched.
    pub traces: usize,
    /// Record count the preamble declared; larger than `traces` when the
    /// input was truncated.
    pub declared: usize,
}

/// Enrich every record of a loaded container in place.
///
/// Returns the number of records processed. Fails on the first join miss,
/// reported with its record index; the container must then be discarded.
pub fn enrich_file(file: &mut TraceFile, table: &GeometryTable) -> Result<usize> {
    let t0 = Instant::now();
    file.traces
        .par_iter_mut()
        .enumerate()
        .try_for_each(|(index, trace)| {
            enrich_header(&mut trace.header, table)
                .map_err(|source| EnrichError::Record { index, source })
        })?;
    tracing::debug!(
        traces = file.traces.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "geometry joins complete"
    );

    let t1 = Instant::now();
    let points: Vec<ElevationPoint> = file
        .traces
        .iter()
        .enumerate()
        .map(|(ordinal, trace)| ElevationPoint {
            x: trace.header[field::RECV_X],
            y: trace.header[field::RECV_Y],
            elevation: trace.header[field::RECV_Z],
            ordinal,
        })
        .collect();
    let index = ElevationIndex::build(points);
    file.traces.par_iter_mut().for_each(|trace| {
        // The index holds one point per record, so a non-empty trace set
        // always yields a hit; self-matches are fine.
        if let Some(nearest) = index.nearest(trace.header[field::CMP_X], trace.header[field::CMP_Y])
        {
            trace.header[field::CMP_Z] = nearest.elevation;
        }
    });
    tracing::debug!(
        points = index.len(),
        elapsed_ms = t1.elapsed().as_millis() as u64,
        "elevation pass complete"
    );

    Ok(file.traces.len())
}

/// Run the whole pipeline: load the geometry table, read the container,
/// enrich, and commit the output atomically.
///
/// The output path is only created once every record enriched cleanly; any
/// failure leaves the destination untouched.
pub fn run(input: &Path, output: &Path, table_path: &Path) -> Result<RunSummary> {
    let table = GeometryTable::load(table_path)?;
    tracing::info!(
        shots = table.shot_count(),
        receivers = table.receiver_count(),
        bins = table.bin_count(),
        "geometry table ready"
    );

    let mut file = TraceFile::read_path(input)?;
    let declared = file.preamble.num_traces;
    let traces = enrich_file(&mut file, &table)?;
    file.write_to_path(output)?;

    tracing::info!(traces, declared, output = %output.display(), "run complete");
    Ok(RunSummary { traces, declared })
}
