//! Fixed-width trace header codec.
//!
//! Every record opens with a 512-byte header of 64 double-precision fields.
//! All 64 fields share one byte order, declared once per file by the
//! `endian` preamble directive.
//!
//! ## Wire layout (512 bytes)
//!
//! ```text
//! field[0]:  f64   [0..8]
//! field[1]:  f64   [8..16]
//! ...
//! field[63]: f64   [504..512]
//! ```
//!
//! Fields are addressed by 0-based slot number. The slots this system assigns
//! or reads are named in [`field`]; the rest are reserved and pass through
//! untouched.

/// Number of f64 fields in a trace header.
pub const HEADER_FIELDS: usize = 64;

/// Wire size of a trace header, in bytes.
pub const HEADER_BYTES: usize = HEADER_FIELDS * 8;

/// Named header slots used by the geometry loader.
pub mod field {
    /// Shot identifier; join key into the shot block of the geometry table.
    pub const SHOT_ID: usize = 2;
    /// Midpoint line number.
    pub const CMP_LINE: usize = 5;
    /// Midpoint station number.
    pub const CMP_STATION: usize = 6;
    /// Channel number within the shot record (1-based).
    pub const CHANNEL: usize = 9;
    /// Source easting.
    pub const SOURCE_X: usize = 10;
    /// Source northing.
    pub const SOURCE_Y: usize = 11;
    /// Source elevation.
    pub const SOURCE_Z: usize = 12;
    /// Receiver easting.
    pub const RECV_X: usize = 13;
    /// Receiver northing.
    pub const RECV_Y: usize = 14;
    /// Receiver elevation.
    pub const RECV_Z: usize = 15;
    /// Midpoint easting.
    pub const CMP_X: usize = 16;
    /// Midpoint northing.
    pub const CMP_Y: usize = 17;
    /// Midpoint surface elevation, interpolated from the nearest receiver.
    pub const CMP_Z: usize = 18;
    /// Source depth below surface.
    pub const SOURCE_DEPTH: usize = 19;
    /// Receiver station number (channel mapped through the shot's spread).
    pub const RECV_STATION: usize = 27;
    /// Receiver line number.
    pub const RECV_LINE: usize = 28;
    /// Source static correction.
    pub const SOURCE_STATIC: usize = 43;
    /// Line number; duplicate of [`RECV_LINE`] kept for downstream consumers.
    pub const LINE: usize = 45;
    /// Station number; duplicate of [`RECV_STATION`] kept for downstream consumers.
    pub const STATION: usize = 46;
    /// Mirror of [`CMP_X`].
    pub const CMP_X_ALT: usize = 57;
    /// Mirror of [`CMP_Y`].
    pub const CMP_Y_ALT: usize = 58;
}

/// Byte order of all header fields in one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Interpret the `endian` directive value (0 = little, 1 = big).
    #[inline]
    pub fn from_flag(v: u64) -> Self {
        if v == 1 {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }
}

/// A decoded 64-field trace header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHeader {
    fields: [f64; HEADER_FIELDS],
}

impl TraceHeader {
    /// A header with every field zeroed.
    pub fn zeroed() -> Self {
        Self {
            fields: [0.0; HEADER_FIELDS],
        }
    }

    /// Decode a header from its 512-byte wire form.
    pub fn decode(buf: &[u8; HEADER_BYTES], order: ByteOrder) -> Self {
        let mut fields = [0.0; HEADER_FIELDS];
        for (slot, chunk) in buf.chunks_exact(8).enumerate() {
            let raw: [u8; 8] = chunk.try_into().unwrap();
            fields[slot] = match order {
                ByteOrder::Little => f64::from_le_bytes(raw),
                ByteOrder::Big => f64::from_be_bytes(raw),
            };
        }
        Self { fields }
    }

    /// Encode a header to its 512-byte wire form.
    pub fn encode(&self, order: ByteOrder) -> [u8; HEADER_BYTES] {
        let mut buf = [0u8; HEADER_BYTES];
        for (slot, v) in self.fields.iter().enumerate() {
            let raw = match order {
                ByteOrder::Little => v.to_le_bytes(),
                ByteOrder::Big => v.to_be_bytes(),
            };
            buf[slot * 8..slot * 8 + 8].copy_from_slice(&raw);
        }
        buf
    }

    /// All 64 fields in slot order.
    #[inline]
    pub fn fields(&self) -> &[f64; HEADER_FIELDS] {
        &self.fields
    }
}

impl Default for TraceHeader {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl From<[f64; HEADER_FIELDS]> for TraceHeader {
    fn from(fields: [f64; HEADER_FIELDS]) -> Self {
        Self { fields }
    }
}

impl std::ops::Index<usize> for TraceHeader {
    type Output = f64;

    #[inline]
    fn index(&self, slot: usize) -> &f64 {
        &self.fields[slot]
    }
}

impl std::ops::IndexMut<usize> for TraceHeader {
    #[inline]
    fn index_mut(&mut self, slot: usize) -> &mut f64 {
        &mut self.fields[slot]
    }
}

// ============================================================================
// Tests
// ============================================================================
