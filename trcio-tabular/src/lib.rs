//! Survey geometry lookup table.
//!
//! Wraps the external geometry export consumed by the enrichment engine: a
//! row-oriented delimited table with no header row, addressed by absolute
//! column position. Three row blocks live side by side in the same table —
//! shots, receivers, and midpoint bins — each with its own key column(s).
//!
//! # Design
//!
//! - **Named schema**: every consumed column has a semantic name and a fixed
//!   position declared in [`schema`]; rows narrower than the schema fail at
//!   load time, never lazily on first access
//! - **Exact-match joins**: indices are keyed on normalized f64 bits, no
//!   tolerance — the keys are produced by the same arithmetic that queries
//!   them
//! - **Last occurrence wins** on duplicate keys, matching construction-order
//!   map semantics
//! - A missing key is a hard [`TabularError::LookupMiss`], never a skip

pub mod error;
pub mod schema;
pub mod table;

pub use error::{Result, TabularError};
pub use schema::{BinRow, ReceiverRow, ShotRow, MIN_COLUMNS};
pub use table::GeometryTable;
