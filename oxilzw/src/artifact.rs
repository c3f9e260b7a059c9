//! Persisted artifact: seed dictionary, code width and packed codes.
//!
//! An artifact is stored as two parts:
//!
//! - a text header (`code.txt`):
//!
//!   ```text
//!   <bit length> <code width>
//!   <symbol> <code>
//!   <symbol> <code>
//!   ...
//!   ```
//!
//!   where `<symbol>` is the decimal byte value and the dictionary lines
//!   follow code order;
//! - a raw blob (`data.bin`) holding the packed codes, MSB-first, whose
//!   first `bit length` bits are meaningful.

use crate::bitpack::{MAX_CODE_WIDTH, PackedBits};
use crate::error::{LzwError, Result};
use crate::seed::SeedDictionary;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default file name of the header part.
pub const HEADER_FILE_NAME: &str = "code.txt";

/// Default file name of the blob part.
pub const BLOB_FILE_NAME: &str = "data.bin";

/// Locations of the two artifact parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Text header with lengths and the seed dictionary.
    pub header: PathBuf,
    /// Raw packed-code blob.
    pub blob: PathBuf,
}

impl ArtifactPaths {
    /// Default file pair inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            header: dir.join(HEADER_FILE_NAME),
            blob: dir.join(BLOB_FILE_NAME),
        }
    }
}

/// Parsed header part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHeader {
    /// Number of meaningful bits in the blob.
    pub bit_len: u64,
    /// Width of every code in bits.
    pub width: u8,
    /// Seed dictionary.
    pub seed: SeedDictionary,
}

impl ArtifactHeader {
    /// Parse a header from text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate();

        let (_, first) = lines
            .next()
            .ok_or_else(|| LzwError::malformed("header is empty"))?;
        let (bit_len, width) = parse_pair::<u64, u8>(first, 1)?;
        if bit_len == 0 {
            return Err(LzwError::malformed("bit length is zero"));
        }
        if width == 0 || width > MAX_CODE_WIDTH {
            return Err(LzwError::malformed(format!(
                "code width {width} out of range 1-{MAX_CODE_WIDTH}"
            )));
        }

        let pairs = lines
            .map(|(index, line)| parse_pair::<u8, u32>(line, index + 1))
            .collect::<Result<Vec<_>>>()?;
        let seed = SeedDictionary::from_pairs(pairs)?;

        Ok(Self {
            bit_len,
            width,
            seed,
        })
    }

    /// Read and parse a header.
    pub fn read_from<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(|e| {
            if e.kind() == io::ErrorKind::InvalidData {
                LzwError::malformed("header is not valid UTF-8")
            } else {
                LzwError::Io(e)
            }
        })?;
        Self::parse(&text)
    }
}

/// Parse a `"<a> <b>"` line.
fn parse_pair<A, B>(line: &str, line_no: usize) -> Result<(A, B)>
where
    A: std::str::FromStr,
    B: std::str::FromStr,
{
    let bad = || LzwError::malformed(format!("line {line_no}: expected two numbers, got {line:?}"));

    let mut fields = line.split_ascii_whitespace();
    let (Some(a), Some(b), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(bad());
    };
    Ok((a.parse::<A>().map_err(|_| bad())?, b.parse::<B>().map_err(|_| bad())?))
}

/// Everything needed to reconstruct an input: the seed dictionary and the
/// packed code stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Seed dictionary.
    pub seed: SeedDictionary,
    /// Packed codes.
    pub bits: PackedBits,
}

impl Artifact {
    /// Bundle a seed with its packed codes.
    pub fn new(seed: SeedDictionary, bits: PackedBits) -> Self {
        Self { seed, bits }
    }

    /// Rebuild an artifact from a parsed header and the raw blob.
    ///
    /// The blob is trimmed to the header's bit length and padding bits in
    /// the final byte are cleared.
    pub fn from_parts(header: ArtifactHeader, mut blob: Vec<u8>) -> Result<Self> {
        let ArtifactHeader {
            bit_len,
            width,
            seed,
        } = header;

        if width == 0 || width > MAX_CODE_WIDTH {
            return Err(LzwError::InvalidCodeWidth(width));
        }
        if bit_len == 0 {
            return Err(LzwError::malformed("artifact holds no codes"));
        }
        let available = blob.len() as u64 * 8;
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

        blob.truncate(bit_len.div_ceil(8) as usize);
        let tail = (bit_len % 8) as u32;
        if tail != 0 {
            if let Some(last) = blob.last_mut() {
                *last &= 0xFFu8 << (8 - tail);
            }
        }

        Ok(Self {
            seed,
            bits: PackedBits {
                bytes: blob,
                bit_len,
                width,
            },
        })
    }

    /// Code width in bits.
    pub fn width(&self) -> u8 {
        self.bits.width
    }

    /// Number of meaningful bits in the blob.
    pub fn bit_len(&self) -> u64 {
        self.bits.bit_len
    }

    /// Size of the blob part in bytes.
    pub fn encoded_size(&self) -> usize {
        self.bits.bytes.len()
    }

    /// Unpack the code stream.
    pub fn codes(&self) -> Result<Vec<u32>> {
        self.bits.unpack()
    }

    /// Write the header part.
    pub fn write_header<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{} {}", self.bits.bit_len, self.bits.width)?;
        for (symbol, code) in self.seed.iter() {
            write!(writer, "\n{symbol} {code}")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the blob part.
    pub fn write_blob<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.bits.bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Write both parts to disk.
    pub fn save(&self, paths: &ArtifactPaths) -> Result<()> {
        self.write_header(BufWriter::new(File::create(&paths.header)?))?;
        self.write_blob(BufWriter::new(File::create(&paths.blob)?))?;

        debug!(
            header = %paths.header.display(),
            blob = %paths.blob.display(),
            bit_len = self.bits.bit_len,
            width = self.bits.width,
            seed_len = self.seed.len(),
            "artifact saved"
        );
        Ok(())
    }

    /// Read both parts from disk.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let header = ArtifactHeader::read_from(BufReader::new(open_part(&paths.header)?))?;
        let blob = std::fs::read(&paths.blob).map_err(|e| missing_part(e, &paths.blob))?;
        let artifact = Self::from_parts(header, blob)?;

        debug!(
            header = %paths.header.display(),
            blob = %paths.blob.display(),
            bit_len = artifact.bits.bit_len,
            width = artifact.bits.width,
            "artifact loaded"
        );
        Ok(artifact)
    }
}

fn open_part(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| missing_part(e, path))
}

fn missing_part(e: io::Error, path: &Path) -> LzwError {
    if e.kind() == io::ErrorKind::NotFound {
        LzwError::malformed(format!("missing artifact part {}", path.display()))
    } else {
        LzwError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitpack::pack;

    fn sample() -> Artifact {
        let seed = SeedDictionary::build(b"AB").unwrap();
        Artifact::new(seed, pack(&[0, 1, 2, 4], 4).unwrap())
    }

    #[test]
    fn test_header_layout() {
        let mut out = Vec::new();
        sample().write_header(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "12 3\n65 0\n66 1");
    }

    #[test]
    fn test_header_roundtrip() {
        let artifact = sample();
        let mut header = Vec::new();
        artifact.write_header(&mut header).unwrap();
        let mut blob = Vec::new();
        artifact.write_blob(&mut blob).unwrap();

        let parsed = ArtifactHeader::read_from(&header[..]).unwrap();
        assert_eq!(parsed.bit_len, 12);
        assert_eq!(parsed.width, 3);

        let loaded = Artifact::from_parts(parsed, blob).unwrap();
        assert_eq!(loaded, artifact);
        assert_eq!(loaded.codes().unwrap(), vec![0, 1, 2, 4]);
    }

    #[test]
    fn test_trailing_newline_tolerated() {
        let header = ArtifactHeader::parse("12 3\n65 0\n66 1\n").unwrap();
        assert_eq!(header.seed.len(), 2);
    }

    #[test]
    fn test_padding_trimmed() {
        let header = ArtifactHeader::parse("12 3\n65 0\n66 1").unwrap();
        // Dirty padding bits plus a stray extra byte.
        let loaded = Artifact::from_parts(header, vec![0b0000_0101, 0b0100_1111, 0xAA]).unwrap();
        assert_eq!(loaded.bits.bytes, vec![0b0000_0101, 0b0100_0000]);
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_malformed_headers() {
        for text in [
            "",
            "12",
            "12 3 4\n65 0",
            "x 3\n65 0",
            "12 0\n65 0",
            "12 33\n65 0",
            "12 3",
            "12 3\n65",
            "12 3\n300 0",
            "0 3\n65 0\n66 1",
            "12 3\n65 0\n65 1",
            "12 3\n65 0\n66 2",
        ] {
            assert!(
                matches!(
                    ArtifactHeader::parse(text),
                    Err(LzwError::MalformedArtifact { .. })
                ),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn test_inconsistent_lengths() {
        let header = ArtifactHeader::parse("17 3\n65 0\n66 1").unwrap();
        assert!(Artifact::from_parts(header, vec![0; 3]).is_err());

        let header = ArtifactHeader::parse("24 3\n65 0\n66 1").unwrap();
        assert!(matches!(
            Artifact::from_parts(header, vec![0; 2]),
            Err(LzwError::MalformedArtifact { .. })
        ));
    }

    #[test]
    fn test_zero_codes_rejected() {
        let header = ArtifactHeader {
            bit_len: 0,
            width: 3,
            seed: SeedDictionary::build(b"AB").unwrap(),
        };
        assert!(matches!(
            Artifact::from_parts(header, Vec::new()),
            Err(LzwError::MalformedArtifact { .. })
        ));
    }

    #[test]
    fn test_in_dir_names() {
        let paths = ArtifactPaths::in_dir("out");
        assert_eq!(paths.header, Path::new("out").join("code.txt"));
        assert_eq!(paths.blob, Path::new("out").join("data.bin"));
    }
}
