//! Whole-file reader/writer for the trace container.
//!
//! The reader holds the entire file in memory: preamble lines, the padding
//! span, every complete record, and whatever trailing bytes follow the last
//! complete record. Short reads are not errors — a record cut off by
//! end-of-stream stops record reading and the partial bytes join the
//! trailing span, so the writer can always reproduce the input byte-for-byte
//! outside reassigned header fields.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, TrcioError};
use crate::header::{TraceHeader, HEADER_BYTES};
use crate::preamble::Preamble;

/// One record: a decoded header plus its opaque payload bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub header: TraceHeader,
    /// `num_values * 4` bytes, never interpreted, carried through verbatim.
    pub payload: Vec<u8>,
}

/// A fully-loaded trace container.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceFile {
    pub preamble: Preamble,
    /// Bytes between the last preamble line and the record region.
    pub padding: Vec<u8>,
    /// Complete records in input order.
    pub traces: Vec<Trace>,
    /// Bytes after the last complete record, including any partial record.
    pub trailing: Vec<u8>,
}

impl TraceFile {
    /// Parse a container from its full byte image.
    ///
    /// At most `num_traces` records are read; fewer when the stream ends
    /// early. The remainder, partial record included, lands in `trailing`.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        let preamble = Preamble::scan(buf)?;

        let ascii_end = preamble.ascii_end as usize;
        let record_start = (preamble.data_start as usize).min(buf.len());
        let padding = buf[ascii_end..record_start].to_vec();

        let record_len = HEADER_BYTES + preamble.num_values * 4;
        let mut traces = Vec::new();
        let mut pos = record_start;
        while traces.len() < preamble.num_traces && buf.len() - pos >= record_len {
            let header_bytes: &[u8; HEADER_BYTES] =
                buf[pos..pos + HEADER_BYTES].try_into().unwrap();
            let header = TraceHeader::decode(header_bytes, preamble.byte_order);
            let payload = buf[pos + HEADER_BYTES..pos + record_len].to_vec();
            traces.push(Trace { header, payload });
            pos += record_len;
        }
        let trailing = buf[pos..].to_vec();

        if traces.len() < preamble.num_traces {
            tracing::debug!(
                declared = preamble.num_traces,
                read = traces.len(),
                trailing_bytes = trailing.len(),
                "record region shorter than declared; stopping at last complete record"
            );
        }

        Ok(TraceFile {
            preamble,
            padding,
            traces,
            trailing,
        })
    }

    /// Read a container from a file on disk.
    pub fn read_path(path: &Path) -> Result<Self> {
        Self::from_bytes(&fs::read(path)?)
    }

    /// Serialize the container: preamble lines, padding, records in original
    /// order (re-encoded header, original payload), trailing bytes.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        for line in &self.preamble.lines {
            writer.write_all(line)?;
        }
        writer.write_all(&self.padding)?;
        for trace in &self.traces {
            writer.write_all(&trace.header.encode(self.preamble.byte_order))?;
            writer.write_all(&trace.payload)?;
        }
        writer.write_all(&self.trailing)?;
        Ok(())
    }

    /// Serialize to an in-memory byte image.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write(&mut buf)
            .expect("writing to a Vec cannot fail");
        buf
    }

    /// Write the container to `path` atomically: the bytes go to a temporary
    /// file in the destination directory, renamed into place only once the
    /// write completed. A failed run never leaves a partial output file.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        self.write(&mut tmp)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| TrcioError::Io(e.error))?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::ByteOrder;

    /// Build a container image: directive lines, zero padding to
    /// `data_start`, `headers.len()` records with 2-sample payloads, then
    /// `trailing` bytes.
    fn build_image(
        data_start: usize,
        num_traces: usize,
        num_values: usize,
        headers: &[TraceHeader],
        trailing: &[u8],
    ) -> Vec<u8> {
        let mut buf = format!(
            "# data_start_pos = (0, {data_start})\n# num_traces = {num_traces}\n# num_values = {num_values}\n# endian = 0\n"
        )
        .into_bytes();
        assert!(buf.len() <= data_start);
        buf.resize(data_start, 0);
        for (i, h) in headers.iter().enumerate() {
            buf.extend_from_slice(&h.encode(ByteOrder::Little));
            buf.extend(std::iter::repeat(i as u8).take(num_values * 4));
        }
        buf.extend_from_slice(trailing);
        buf
    }

    fn header_with(slot: usize, value: f64) -> TraceHeader {
        let mut h = TraceHeader::zeroed();
        h[slot] = value;
        h
    }

    #[test]
    fn test_round_trip_identity() {
        let headers = [header_with(2, 7.0), header_with(2, 8.0), header_with(2, 9.0)];
        let image = build_image(128, 3, 2, &headers, b"tail-bytes");

        let file = TraceFile::from_bytes(&image).unwrap();
        assert_eq!(file.traces.len(), 3);
        assert_eq!(file.trailing, b"tail-bytes");
        assert_eq!(file.to_bytes(), image);
    }

    #[test]
    fn test_payloads_carried_verbatim() {
        let headers = [header_with(0, 1.0), header_with(0, 2.0)];
        let image = build_image(128, 2, 3, &headers, &[]);
        let file = TraceFile::from_bytes(&image).unwrap();
        assert_eq!(file.traces[0].payload, vec![0u8; 12]);
        assert_eq!(file.traces[1].payload, vec![1u8; 12]);
    }

    #[test]
    fn test_truncated_record_becomes_trailing() {
        let headers = [header_with(2, 7.0), header_with(2, 8.0)];
        let mut image = build_image(128, 3, 2, &headers, &[]);
        // Declare 3 records but supply 2 plus half a header.
        image.extend_from_slice(&[0x11; HEADER_BYTES / 2]);

        let file = TraceFile::from_bytes(&image).unwrap();
        assert_eq!(file.traces.len(), 2);
        assert_eq!(file.trailing, vec![0x11; HEADER_BYTES / 2]);
        assert_eq!(file.to_bytes(), image);
    }

    #[test]
    fn test_extra_records_beyond_declared_count_become_trailing() {
        let headers = [header_with(2, 7.0), header_with(2, 8.0)];
        let image = build_image(128, 1, 2, &headers, &[]);

        let file = TraceFile::from_bytes(&image).unwrap();
        assert_eq!(file.traces.len(), 1);
        // The undeclared second record is preserved, just not decoded.
        assert_eq!(file.trailing.len(), HEADER_BYTES + 8);
        assert_eq!(file.to_bytes(), image);
    }

    #[test]
    fn test_header_mutation_only_touches_header_bytes() {
        let headers = [header_with(2, 7.0)];
        let image = build_image(128, 1, 2, &headers, b"zz");
        let mut file = TraceFile::from_bytes(&image).unwrap();

        file.traces[0].header[10] = 42.5;
        let out = file.to_bytes();
        assert_eq!(out.len(), image.len());
        // Preamble and padding untouched.
        assert_eq!(&out[..128], &image[..128]);
        // Payload and trailing untouched.
        assert_eq!(&out[128 + HEADER_BYTES..], &image[128 + HEADER_BYTES..]);
        // Reassigned slot differs on the wire.
        let slot = 128 + 10 * 8;
        assert_eq!(&out[slot..slot + 8], &42.5f64.to_le_bytes());
    }

    #[test]
    fn test_big_endian_file() {
        let mut buf =
            b"# data_start_pos = (0, 96)\n# num_traces = 1\n# num_values = 0\n# endian = 1\n"
                .to_vec();
        buf.resize(96, 0);
        let h = header_with(5, -3.25);
        buf.extend_from_slice(&h.encode(ByteOrder::Big));

        let file = TraceFile::from_bytes(&buf).unwrap();
        assert_eq!(file.preamble.byte_order, ByteOrder::Big);
        assert_eq!(file.traces[0].header[5], -3.25);
        assert_eq!(file.to_bytes(), buf);
    }

    #[test]
    fn test_write_to_path_creates_file() {
        let headers = [header_with(2, 7.0)];
        let image = build_image(128, 1, 2, &headers, &[]);
        let file = TraceFile::from_bytes(&image).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.trc");
        file.write_to_path(&out).unwrap();
        assert_eq!(fs::read(&out).unwrap(), image);
    }
}
