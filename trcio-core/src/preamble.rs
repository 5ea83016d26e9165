//! ASCII preamble scanner.
//!
//! A container opens with a run of ASCII lines. Four directives may appear
//! anywhere in those lines, one per line, last match wins when repeated:
//!
//! ```text
//! # data_start_pos = (0, <uint>)
//! # num_traces = <uint>
//! # num_values = <uint>
//! # endian = <0|1>
//! ```
//!
//! Scanning is line-oriented: a line is the bytes up to and including a
//! newline, or to end-of-stream. Every accepted line is kept verbatim so the
//! writer can reproduce the region bit-for-bit. The line whose end reaches or
//! crosses the declared data start offset is not part of the preamble — its
//! bytes (and any others up to the offset) form the padding region.
//!
//! `data_start_pos`, `num_traces`, and `num_values` are required;
//! `endian` defaults to little when absent.

use regex::bytes::Regex;

use crate::error::{Result, TrcioError};
use crate::header::ByteOrder;

/// Compiled directive patterns. Built once per scan; matching is per-line.
struct DirectiveSet {
    data_start: Regex,
    num_traces: Regex,
    num_values: Regex,
    endian: Regex,
}

impl DirectiveSet {
    fn new() -> Self {
        // The patterns mirror the writer's comment syntax; whitespace around
        // `=` and inside the offset tuple is tolerated.
        Self {
            data_start: Regex::new(r"#\s*data_start_pos\s*=\s*\(0,\s*(\d+)\)").unwrap(),
            num_traces: Regex::new(r"#\s*num_traces\s*=\s*(\d+)").unwrap(),
            num_values: Regex::new(r"#\s*num_values\s*=\s*(\d+)").unwrap(),
            endian: Regex::new(r"#\s*endian\s*=\s*(\d+)").unwrap(),
        }
    }
}

/// Extract the first capture group as a u64, if the pattern matches the line.
fn capture_uint(re: &Regex, line: &[u8]) -> Option<u64> {
    let caps = re.captures(line)?;
    // The group is all ASCII digits; only absurdly long values fail to parse,
    // and those are treated as non-matches.
    std::str::from_utf8(caps.get(1)?.as_bytes())
        .ok()?
        .parse()
        .ok()
}

/// Scanned preamble: raw lines plus the four extracted directives.
#[derive(Debug, Clone, PartialEq)]
pub struct Preamble {
    /// Raw accepted lines, terminators included.
    pub lines: Vec<Vec<u8>>,
    /// Byte offset where the binary record region begins.
    pub data_start: u64,
    /// Declared record count.
    pub num_traces: usize,
    /// Samples per record payload; payload wire size is `num_values * 4`.
    pub num_values: usize,
    /// Header byte order for the whole file.
    pub byte_order: ByteOrder,
    /// Byte offset just past the last accepted line. The padding region is
    /// `[ascii_end, data_start)`.
    pub ascii_end: u64,
}

impl Preamble {
    /// Scan the preamble region of `buf`.
    ///
    /// Fails with [`TrcioError::MalformedPreamble`] if the stream ends before
    /// `data_start_pos` is declared, or if an accepted line already extends
    /// past the declared offset (the padding span would be negative). Fails
    /// with [`TrcioError::MissingDirective`] if `num_traces` or `num_values`
    /// was never set by the time scanning stops.
    pub fn scan(buf: &[u8]) -> Result<Self> {
        let re = DirectiveSet::new();

        let mut lines: Vec<Vec<u8>> = Vec::new();
        let mut pos: usize = 0;
        let mut data_start: Option<u64> = None;
        let mut num_traces: Option<u64> = None;
        let mut num_values: Option<u64> = None;
        let mut endian: Option<u64> = None;

        let (ascii_end, data_start) = loop {
            if pos >= buf.len() {
                match data_start {
                    // The file ends inside the padding region; everything
                    // scanned so far is the preamble.
                    Some(start) => break (pos, start),
                    None => {
                        return Err(TrcioError::MalformedPreamble(
                            "end of stream before data_start_pos directive".to_string(),
                        ))
                    }
                }
            }

            let line_end = match buf[pos..].iter().position(|&b| b == b'\n') {
                Some(i) => pos + i + 1,
                None => buf.len(),
            };
            let line = &buf[pos..line_end];

            if let Some(v) = capture_uint(&re.data_start, line) {
                data_start = Some(v);
            }
            if let Some(v) = capture_uint(&re.num_traces, line) {
                num_traces = Some(v);
            }
            if let Some(v) = capture_uint(&re.num_values, line) {
                num_values = Some(v);
            }
            if let Some(v) = capture_uint(&re.endian, line) {
                endian = Some(v);
            }

            if let Some(start) = data_start {
                if line_end as u64 >= start {
                    // This line reaches the record region; its bytes belong
                    // to the padding span, not the preamble.
                    break (pos, start);
                }
            }

            lines.push(line.to_vec());
            pos = line_end;
        };

        if (ascii_end as u64) > data_start {
            return Err(TrcioError::MalformedPreamble(format!(
                "preamble extends to byte {ascii_end} past declared data start {data_start}"
            )));
        }

        let num_traces =
            num_traces.ok_or(TrcioError::MissingDirective("num_traces"))? as usize;
        let num_values =
            num_values.ok_or(TrcioError::MissingDirective("num_values"))? as usize;
        let byte_order = ByteOrder::from_flag(endian.unwrap_or(0));

        tracing::debug!(
            data_start,
            num_traces,
            num_values,
            ?byte_order,
            ascii_end,
            "preamble scanned"
        );

        Ok(Preamble {
            lines,
            data_start,
            num_traces,
            num_values,
            byte_order,
            ascii_end: ascii_end as u64,
        })
    }

    /// Total byte length of the accepted preamble lines.
    pub fn byte_len(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }
}

// ============================================================================
// Tests
// ============================================================================
