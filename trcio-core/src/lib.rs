//! trcio trace container format.
//!
//! A trcio file is a single binary stream with four regions:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ ASCII preamble lines (directive comments)                        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │ padding bytes up to data_start_pos                               │
//! ├──────────────────────────────────────────────────────────────────┤
//! │ N records: 512-byte header (64 × f64) + num_values × 4 payload   │
//! ├──────────────────────────────────────────────────────────────────┤
//! │ trailing bytes (opaque)                                          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The preamble declares where the binary region starts, how many records it
//! holds, the payload sample count, and the header byte order. Everything the
//! reader does not interpret — preamble bytes, padding, payloads, trailing
//! bytes — is carried through verbatim so a read-then-write round trip is
//! byte-identical outside explicitly reassigned header fields.
//!
//! # Modules
//!
//! - [`preamble`]: ASCII directive scanner
//! - [`header`]: fixed-width trace header codec and named field slots
//! - [`container`]: whole-file reader/writer with atomic output commit
//! - [`error`]: error types

pub mod container;
pub mod error;
pub mod header;
pub mod preamble;

pub use container::{Trace, TraceFile};
pub use error::{Result, TrcioError};
pub use header::{ByteOrder, TraceHeader, HEADER_BYTES, HEADER_FIELDS};
pub use preamble::Preamble;
