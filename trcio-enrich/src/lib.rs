//! Header enrichment engine.
//!
//! Rewrites trace headers with survey geometry in two phases:
//!
//! 1. **Geometry joins** — every record is joined against the shot,
//!    receiver, and bin blocks of the geometry table, a strict dependency
//!    chain within one record but independent across records.
//! 2. **Elevation pass** — a nearest-neighbor index over all records'
//!    receiver positions assigns each record's midpoint elevation. This
//!    phase is a hard barrier: no query runs until every record's phase-1
//!    coordinates exist.
//!
//! Any lookup miss aborts the whole run before a single output byte is
//! written; a missed join would otherwise feed corrupt coordinates into the
//! elevation index.

pub mod engine;
pub mod error;
pub mod pipeline;

pub use engine::enrich_header;
pub use error::{EnrichError, Result};
pub use pipeline::{enrich_file, run, RunSummary};
