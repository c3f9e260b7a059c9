//! On-disk artifact persistence tests.

use oxilzw::{Artifact, ArtifactPaths, LzwConfig, LzwError, compress, decompress};
use std::fs;

#[test]
fn test_save_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    let original = b"This is a test of compression! ".repeat(10);
    for config in [LzwConfig::UNBOUNDED, LzwConfig::SMALL, LzwConfig::with_max_dict_size(1)] {
        let artifact = compress(&original, config).unwrap();
        artifact.save(&paths).unwrap();

        let loaded = Artifact::load(&paths).unwrap();
        assert_eq!(loaded, artifact);
        assert_eq!(decompress(&loaded, config).unwrap(), original);

        let blob_len = fs::metadata(&paths.blob).unwrap().len();
        assert_eq!(blob_len as usize, artifact.encoded_size());
        assert_eq!(blob_len, artifact.bit_len().div_ceil(8));
    }
}

#[test]
fn test_header_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    compress(b"ABABABA", LzwConfig::UNBOUNDED)
        .unwrap()
        .save(&paths)
        .unwrap();

    let header = fs::read_to_string(&paths.header).unwrap();
    assert_eq!(header, "12 3\n65 0\n66 1");
    assert_eq!(fs::read(&paths.blob).unwrap(), vec![0b0000_0101, 0b0100_0000]);
}

#[test]
fn test_binary_symbols_survive() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    let original: Vec<u8> = (0..=255u8).rev().chain(0..=255u8).chain([b'\n', b' ', 0]).collect();
    let artifact = compress(&original, LzwConfig::UNBOUNDED).unwrap();
    artifact.save(&paths).unwrap();

    let loaded = Artifact::load(&paths).unwrap();
    assert_eq!(loaded.seed.code(255), Some(0));
    assert_eq!(loaded.seed.code(b'\n'), Some(255 - b'\n' as u32));
    assert_eq!(decompress(&loaded, LzwConfig::UNBOUNDED).unwrap(), original);
}

#[test]
fn test_missing_parts() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    assert!(matches!(
        Artifact::load(&paths),
        Err(LzwError::MalformedArtifact { .. })
    ));

    compress(b"hello", LzwConfig::UNBOUNDED)
        .unwrap()
        .save(&paths)
        .unwrap();
    fs::remove_file(&paths.blob).unwrap();
    assert!(matches!(
        Artifact::load(&paths),
        Err(LzwError::MalformedArtifact { .. })
    ));
}

#[test]
fn test_truncated_blob() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(10);
    compress(&original, LzwConfig::UNBOUNDED)
        .unwrap()
        .save(&paths)
        .unwrap();

    let blob = fs::read(&paths.blob).unwrap();
    fs::write(&paths.blob, &blob[..blob.len() - 1]).unwrap();
    assert!(matches!(
        Artifact::load(&paths),
        Err(LzwError::MalformedArtifact { .. })
    ));
}

#[test]
fn test_corrupted_header() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    compress(b"hello", LzwConfig::UNBOUNDED)
        .unwrap()
        .save(&paths)
        .unwrap();

    fs::write(&paths.header, "not a header").unwrap();
    assert!(matches!(
        Artifact::load(&paths),
        Err(LzwError::MalformedArtifact { .. })
    ));

    fs::write(&paths.header, [0xFF, 0xFE, 0x00]).unwrap();
    assert!(matches!(
        Artifact::load(&paths),
        Err(LzwError::MalformedArtifact { .. })
    ));
}

#[test]
fn test_padded_blob_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    let artifact = compress(b"ABABABA", LzwConfig::UNBOUNDED).unwrap();
    artifact.save(&paths).unwrap();

    // Whole-byte storage appending padding must not change the artifact.
    let mut blob = fs::read(&paths.blob).unwrap();
    *blob.last_mut().unwrap() |= 0x0F;
    blob.push(0);
    fs::write(&paths.blob, blob).unwrap();

    assert_eq!(Artifact::load(&paths).unwrap(), artifact);
}

#[test]
fn test_zero_length_artifact_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    fs::write(&paths.header, "0 3\n65 0\n66 1").unwrap();
    fs::write(&paths.blob, b"").unwrap();
    assert!(matches!(
        Artifact::load(&paths),
        Err(LzwError::MalformedArtifact { .. })
    ));
}
