//! Fixed-width code packing.
//!
//! Every code in a stream is stored with the same width `W`, the smallest
//! width for which `2^W > max_code`. Codes are written MSB-first and
//! concatenated without separators; the final byte is zero padded, which
//! is why the exact bit length travels alongside the bytes.

use crate::error::{LzwError, Result};

/// Largest supported code width.
pub const MAX_CODE_WIDTH: u8 = 32;

/// Smallest code width able to hold `max_code`.
///
/// Never less than 1, so a stream made only of code 0 still occupies
/// one bit per code.
///
/// ```
/// use oxilzw::code_width;
///
/// assert_eq!(code_width(0), 1);
/// assert_eq!(code_width(1), 1);
/// assert_eq!(code_width(4), 3);
/// assert_eq!(code_width(255), 8);
/// assert_eq!(code_width(256), 9);
/// ```
pub fn code_width(max_code: u32) -> u8 {
    let bits = (u32::BITS - max_code.leading_zeros()) as u8;
    bits.max(1)
}

fn check_width(width: u8) -> Result<()> {
    if width == 0 || width > MAX_CODE_WIDTH {
        return Err(LzwError::InvalidCodeWidth(width));
    }
    Ok(())
}

/// A packed code stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    /// Packed bytes, zero padded to a whole byte.
    pub bytes: Vec<u8>,
    /// Number of meaningful bits in `bytes`.
    pub bit_len: u64,
    /// Width of every code in bits.
    pub width: u8,
}

impl PackedBits {
    /// Number of codes in the stream.
    pub fn code_count(&self) -> u64 {
        self.bit_len / self.width as u64
    }

    /// Unpack back into codes.
    pub fn unpack(&self) -> Result<Vec<u32>> {
        unpack(&self.bytes, self.bit_len, self.width)
    }
}

/// Pack `codes` with the width derived from `max_code`.
pub fn pack(codes: &[u32], max_code: u32) -> Result<PackedBits> {
    pack_with_width(codes, code_width(max_code))
}

/// Pack `codes` as `width`-bit fields.
///
/// Fails with `CodeOverflow` if a code needs more than `width` bits.
pub fn pack_with_width(codes: &[u32], width: u8) -> Result<PackedBits> {
    check_width(width)?;

    let mut writer = MsbBitWriter::with_capacity(codes.len() * width as usize / 8 + 1);
    for &code in codes {
        if width < MAX_CODE_WIDTH && code >> width != 0 {
            return Err(LzwError::CodeOverflow { code, width });
        }
        writer.write_bits(code, width)?;
    }

    let bit_len = writer.bits_written();
    Ok(PackedBits {
        bytes: writer.into_vec(),
        bit_len,
        width,
    })
}

/// Slice the first `bit_len` bits of `bytes` into `width`-bit codes.
///
/// Bits past `bit_len` are padding and ignored.
pub fn unpack(bytes: &[u8], bit_len: u64, width: u8) -> Result<Vec<u32>> {
    check_width(width)?;

    let available = bytes.len() as u64 * 8;
    if bit_len > available {
        return Err(LzwError::malformed(format!(
            "bit length {bit_len} exceeds the {available} stored bits"
        )));
    }
    if bit_len % width as u64 != 0 {
        return Err(LzwError::malformed(format!(
            "bit length {bit_len} is not a multiple of code width {width}"
        )));
    }

    let count = (bit_len / width as u64) as usize;
    let mut reader = MsbBitReader::new(bytes, bit_len);
    let mut codes = Vec::with_capacity(count);
    for _ in 0..count {
        codes.push(reader.read_bits(width)?);
    }

    Ok(codes)
}

/// MSB-first bit reader bounded by an exact bit length.
#[derive(Debug)]
pub struct MsbBitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Number of meaningful bits in `data`.
    bit_len: u64,
    /// Current byte position.
    byte_pos: usize,
    /// Bit buffer (MSB-first).
    buffer: u64,
    /// Number of valid bits in buffer (from LSB side).
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<'a> MsbBitReader<'a> {
    /// Create a reader over the first `bit_len` bits of `data`.
    pub fn new(data: &'a [u8], bit_len: u64) -> Self {
        Self {
            data,
            bit_len: bit_len.min(data.len() as u64 * 8),
            byte_pos: 0,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Fill buffer with at least `count` bits.
    #[inline]
    fn fill_buffer(&mut self, count: u8) {
        while self.bits_in_buffer < count && self.byte_pos < self.data.len() {
            let byte = self.data[self.byte_pos];
            self.byte_pos += 1;

            self.buffer = (self.buffer << 8) | (byte as u64);
            self.bits_in_buffer += 8;
        }
    }

    /// Read up to 32 bits from the stream (MSB-first).
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        check_width(count)?;

        if self.total_bits_read + count as u64 > self.bit_len {
            return Err(LzwError::malformed(format!(
                "bitstream ends at bit {} while reading {count} more bits",
                self.total_bits_read
            )));
        }

        self.fill_buffer(count);

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        let value = (self.buffer >> shift) & mask;

        self.bits_in_buffer -= count;
        self.total_bits_read += count as u64;

        Ok(value as u32)
    }

    /// Get total bits read.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }
}

/// MSB-first bit writer.
#[derive(Debug, Default)]
pub struct MsbBitWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Bit buffer (MSB-first).
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written, padding excluded.
    total_bits_written: u64,
}

impl MsbBitWriter {
    /// Create a new MSB bit writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bytes` output bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Write up to 32 bits to the stream (MSB-first).
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        check_width(count)?;

        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (value as u64 & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        // Flush complete bytes (from MSB side)
        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }

        Ok(())
    }

    /// Total bits written so far, padding excluded.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Flush remaining bits, padding with zeros, and return the output.
    pub fn into_vec(mut self) -> Vec<u8> {
        if self.bits_in_buffer > 0 {
            let remaining = 8 - self.bits_in_buffer;
            let byte = ((self.buffer << remaining) & 0xFF) as u8;
            self.output.push(byte);
        }
        self.output
    }
}
