//! Negative tests for binary snapshot validation.
//!
//! These tests verify that the decoder rejects malformed, truncated, or
//! corrupted input. Snapshots may come from anywhere, so the decoder must
//! never panic on them.
//!
//! ## Test Categories
//!
//! 1. **Varint rejection**: overflow, truncation, max bytes exceeded
//! 2. **Section rejection**: offsets, tree, ranks
//! 3. **Full snapshot rejection**: magic, CRC, version, lengths, flags

use super::common::{ranked_index_with_ids, soap_index};
use fastcomplete::binary::{
    decode_ranks, decode_snapshot, decode_tree, decode_varint, decode_word_starts, encode_varint,
    SnapshotFooter, SnapshotHeader, MAX_VARINT_BYTES,
};
use fastcomplete::{CompletionError, CompletionIndex};

/// Rewrite the footer checksum so a deliberate edit reaches the parser.
fn reseal(bytes: &mut [u8]) {
    let content_len = bytes.len() - SnapshotFooter::SIZE;
    let crc32 = SnapshotFooter::compute_crc32(&bytes[..content_len]);
    bytes[content_len..content_len + 4].copy_from_slice(&crc32.to_le_bytes());
}

fn ranked_bytes() -> Vec<u8> {
    ranked_index_with_ids().unwrap().to_bytes().unwrap()
}

// ============================================================================
// VARINT REJECTION TESTS
// ============================================================================

/// Empty buffer should return error, not panic
#[test]
fn test_varint_empty_buffer() {
    assert!(decode_varint(&[]).is_err());
}

/// Varint with all continuation bits set (never terminates)
#[test]
fn test_varint_unterminated() {
    assert!(decode_varint(&[0x80; 5]).is_err());
}

/// Varint exceeding MAX_VARINT_BYTES
#[test]
fn test_varint_exceeds_max_bytes() {
    assert!(decode_varint(&vec![0x80; MAX_VARINT_BYTES + 1]).is_err());
}

/// Power-of-two boundaries should decode correctly
#[test]
fn test_varint_power_of_two_boundaries() {
    for shift in 0..64 {
        let value = 1u64 << shift;
        let mut buf = Vec::new();
        encode_varint(value, &mut buf);
        assert_eq!(decode_varint(&buf).unwrap(), (value, buf.len()));
    }
}

// ============================================================================
// SECTION REJECTION TESTS
// ============================================================================

#[test]
fn test_word_starts_count_larger_than_section() {
    assert!(decode_word_starts(&[0, 3], 3).is_err());
}

#[test]
fn test_word_starts_overflow() {
    let mut buf = Vec::new();
    encode_varint(0, &mut buf);
    encode_varint(u64::MAX, &mut buf);
    encode_varint(u64::MAX, &mut buf);
    assert!(decode_word_starts(&buf, 3).is_err());
}

#[test]
fn test_tree_claiming_more_slots_than_bytes() {
    let mut buf = Vec::new();
    encode_varint(1_000_000, &mut buf);
    buf.extend_from_slice(&[0; 10]);
    assert!(decode_tree(&buf).is_err());
}

#[test]
fn test_ranks_wrong_length() {
    assert!(decode_ranks(&[0; 12], 2).is_err());
    assert!(decode_ranks(&[0; 16], 2).is_ok());
}

// ============================================================================
// FULL SNAPSHOT REJECTION TESTS
// ============================================================================

#[test]
fn test_empty_and_tiny_inputs() {
    for len in 0..(SnapshotHeader::SIZE + SnapshotFooter::SIZE) {
        let bytes = vec![0u8; len];
        assert!(CompletionIndex::<u32>::from_bytes(&bytes).is_err());
    }
}

#[test]
fn test_every_truncation_rejected() {
    let bytes = ranked_bytes();
    for len in 0..bytes.len() {
        assert!(
            CompletionIndex::<u32>::from_bytes(&bytes[..len]).is_err(),
            "truncation to {} bytes accepted",
            len
        );
    }
}

#[test]
fn test_crc_mismatch() {
    let mut bytes = ranked_bytes();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0x40;
    let err = CompletionIndex::<u32>::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, CompletionError::Binary(_)));
    assert!(err.to_string().contains("CRC32"));
}

#[test]
fn test_unsupported_version() {
    let mut bytes = ranked_bytes();
    bytes[4] = 99;
    reseal(&mut bytes);
    let err = decode_snapshot::<u32>(&bytes).unwrap_err();
    assert!(err.to_string().contains("version"));
}

#[test]
fn test_section_lengths_must_add_up() {
    let mut bytes = ranked_bytes();
    // buffer_len lives at byte 16 (after magic, version, flags, reserved, separator, word_count)
    let buffer_len = u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    bytes[16..20].copy_from_slice(&(buffer_len + 1).to_le_bytes());
    reseal(&mut bytes);
    let err = decode_snapshot::<u32>(&bytes).unwrap_err();
    assert!(err.to_string().contains("mismatch"));
}

#[test]
fn test_invalid_separator_code_point() {
    let mut bytes = soap_index().unwrap().to_bytes().unwrap();
    bytes[8..12].copy_from_slice(&0xD800u32.to_le_bytes()); // lone surrogate
    reseal(&mut bytes);
    assert!(decode_snapshot::<()>(&bytes).is_err());
}

#[test]
fn test_flags_must_match_sections() {
    let mut bytes = ranked_bytes();
    bytes[5] = 0; // claim no ranks and no ids
    reseal(&mut bytes);
    assert!(decode_snapshot::<u32>(&bytes).is_err());
}

#[test]
fn test_decoded_garbage_still_validated() {
    // Buffer "\u{1}so\u{1}soap\u{1}soapy\u{1}soupy\u{1}", starts 0, 3, 8, 14.
    let mut bytes = soap_index().unwrap().to_bytes().unwrap();
    let header = SnapshotHeader::read(&mut bytes.as_slice()).unwrap();
    let starts = header.section_offsets().starts;
    assert_eq!(&bytes[starts.clone()], &[0, 3, 5, 6]);

    // Last offset moves to 13, inside "soapy". Still ascending, so the format is fine.
    bytes[starts].copy_from_slice(&[0, 3, 5, 5]);
    reseal(&mut bytes);

    assert!(decode_snapshot::<()>(&bytes).is_ok());
    assert!(matches!(
        CompletionIndex::<()>::from_bytes(&bytes),
        Err(CompletionError::Config(_))
    ));
}
