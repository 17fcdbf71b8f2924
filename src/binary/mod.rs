// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary snapshot format.
//!
//! JSON is the interchange format, but for a large dictionary it spends most of
//! its bytes on escaped separators and decimal offsets. The binary format keeps
//! the buffer as raw UTF-8, delta-encodes the offsets, and checksums the whole
//! thing so a truncated download fails loudly instead of restoring garbage.
//!
//! Decoding produces a [`Snapshot`]. It only checks the *format* (magic,
//! lengths, checksum, varints, UTF-8). Whether the snapshot describes a valid
//! index is decided by [`CompletionIndex::from_snapshot`](crate::CompletionIndex::from_snapshot),
//! exactly as for JSON.
//!
//! # Security Considerations
//!
//! This format is designed to be safely parsed from untrusted sources:
//! - All size fields are validated against MAX_* constants
//! - Bounds checking prevents buffer overreads
//! - Declared counts are checked against the bytes actually present
//! - CRC32 footer detects corruption/truncation
//! - Varint decoder has maximum iteration limits
//!
//! # Format Overview (v1)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (36 bytes)                                          │
//! │   magic: [u8; 4] = "FCMP"                                  │
//! │   version: u8 = 1                                          │
//! │   flags: u8 (HAS_RANKS, HAS_IDS)                           │
//! │   reserved: [u8; 2]                                        │
//! │   separator: u32 (code point)                              │
//! │   word_count: u32                                          │
//! │   buffer_len, starts_len, tree_len, ranks_len, ids_len     │
//! ├────────────────────────────────────────────────────────────┤
//! │ 1. BUFFER (raw UTF-8: SEP w0 SEP w1 ... SEP)               │
//! ├────────────────────────────────────────────────────────────┤
//! │ 2. STARTS (delta + varint, one per word)                   │
//! ├────────────────────────────────────────────────────────────┤
//! │ 3. TREE (varint n, then 2n varint slots; ranked only)      │
//! ├────────────────────────────────────────────────────────────┤
//! │ 4. RANKS (f64 LE, one per word; ranked only)               │
//! ├────────────────────────────────────────────────────────────┤
//! │ 5. IDS (JSON array; only with identifiers)                 │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "PMCF"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are caller-defined types, so their section is JSON rather than
//! a fixed binary layout.

// Submodules
mod encoding;
mod header;

// Re-export from submodules for public API
pub use encoding::{
    decode_ranks, decode_tree, decode_varint, decode_word_starts, encode_ranks, encode_tree,
    encode_varint, encode_word_starts,
};
pub use header::{
    FormatFlags, SectionOffsets, SnapshotFooter, SnapshotHeader, FOOTER_MAGIC, MAGIC,
    MAX_SNAPSHOT_SIZE, MAX_VARINT_BYTES, MAX_WORD_COUNT, VERSION,
};

use std::io;
use std::ops::Range;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::snapshot::{Snapshot, SnapshotRef, TreeSnapshot};

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn extract<'a>(
    offsets: &SectionOffsets,
    bytes: &'a [u8],
    section: &Range<usize>,
    name: &str,
) -> io::Result<&'a [u8]> {
    offsets.slice(bytes, section).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("{} section out of bounds", name),
        )
    })
}

fn section_len(len: usize, name: &str) -> io::Result<u32> {
    u32::try_from(len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} section is {} bytes, too large for the format", name, len),
        )
    })
}

// ============================================================================
// ENCODING
// ============================================================================

/// Serialize a snapshot to the binary format.
pub fn encode_snapshot<I: Serialize>(snapshot: &SnapshotRef<'_, I>) -> Result<Vec<u8>> {
    let mut flags = FormatFlags::new();
    let ranked = match (snapshot.tree, snapshot.ranks) {
        (Some(tree), Some(ranks)) => {
            flags = flags.with_ranks();
            Some((tree, ranks))
        }
        (None, None) => None,
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "tree and ranks must be present together",
            )
            .into())
        }
    };
    if snapshot.ids.is_some() {
        flags = flags.with_ids();
    }

    let mut starts_bytes = Vec::with_capacity(snapshot.word_starts.len());
    encode_word_starts(snapshot.word_starts, &mut starts_bytes)?;

    let mut tree_bytes = Vec::new();
    let mut ranks_bytes = Vec::new();
    if let Some((tree, ranks)) = ranked {
        encode_tree(tree.n, tree.data, &mut tree_bytes);
        encode_ranks(ranks, &mut ranks_bytes);
    }

    let ids_bytes = match snapshot.ids {
        Some(ids) => serde_json::to_vec(ids)?,
        None => Vec::new(),
    };

    let header = SnapshotHeader {
        version: VERSION,
        flags,
        separator: snapshot.separator as u32,
        word_count: section_len(snapshot.word_starts.len(), "Word count")?,
        buffer_len: section_len(snapshot.buffer.len(), "Buffer")?,
        starts_len: section_len(starts_bytes.len(), "Starts")?,
        tree_len: section_len(tree_bytes.len(), "Tree")?,
        ranks_len: section_len(ranks_bytes.len(), "Ranks")?,
        ids_len: section_len(ids_bytes.len(), "Ids")?,
    };
    let offsets = header.section_offsets();

    let mut buf = Vec::with_capacity(offsets.total_size());
    header.write(&mut buf)?;
    buf.extend_from_slice(snapshot.buffer.as_bytes()); // 1. BUFFER
    buf.extend_from_slice(&starts_bytes); // 2. STARTS
    buf.extend_from_slice(&tree_bytes); // 3. TREE
    buf.extend_from_slice(&ranks_bytes); // 4. RANKS
    buf.extend_from_slice(&ids_bytes); // 5. IDS

    // Compute CRC32 over everything written so far
    let crc32 = SnapshotFooter::compute_crc32(&buf);
    SnapshotFooter { crc32 }.write(&mut buf)?;

    debug!(
        words = header.word_count,
        bytes = buf.len(),
        ranked = flags.has_ranks(),
        ids = flags.has_ids(),
        "encoded binary snapshot"
    );
    Ok(buf)
}

// ============================================================================
// DECODING
// ============================================================================

/// Deserialize a snapshot from the binary format (with CRC32 validation).
///
/// # Validation
///
/// 1. Size is within limits (MAX_SNAPSHOT_SIZE)
/// 2. Footer magic is valid ("PMCF") and CRC32 matches
/// 3. Header magic is valid ("FCMP"), version and flags are known
/// 4. Section lengths add up to the content size
/// 5. Every section decodes completely, with counts matching the header
///
/// Never panics, whatever the input.
pub fn decode_snapshot<I: DeserializeOwned>(bytes: &[u8]) -> Result<Snapshot<I>> {
    // Security: Check size limits
    if bytes.len() > MAX_SNAPSHOT_SIZE {
        return Err(invalid(format!(
            "Snapshot too large: {} bytes (max {})",
            bytes.len(),
            MAX_SNAPSHOT_SIZE
        ))
        .into());
    }

    // Minimum size: header + footer
    let min_size = SnapshotHeader::SIZE + SnapshotFooter::SIZE;
    if bytes.len() < min_size {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "Snapshot too small: {} bytes (minimum {})",
                bytes.len(),
                min_size
            ),
        )
        .into());
    }

    // Verify footer magic and read CRC32
    let footer = SnapshotFooter::read(bytes)?;
    let content = &bytes[..bytes.len() - SnapshotFooter::SIZE];
    let computed_crc32 = SnapshotFooter::compute_crc32(content);
    if footer.crc32 != computed_crc32 {
        return Err(invalid(format!(
            "CRC32 mismatch: expected {:#010x}, got {:#010x} (snapshot corrupted)",
            footer.crc32, computed_crc32
        ))
        .into());
    }

    let header = SnapshotHeader::read(&mut io::Cursor::new(bytes))?;

    // Get section offsets from SINGLE SOURCE OF TRUTH
    let offsets = header.section_offsets();
    if offsets.content_size() != content.len() {
        return Err(invalid(format!(
            "Section lengths mismatch: header claims {} bytes, got {} bytes",
            offsets.content_size(),
            content.len()
        ))
        .into());
    }

    let separator = char::from_u32(header.separator)
        .ok_or_else(|| invalid(format!("Separator {:#x} is not a code point", header.separator)))?;

    let buffer_bytes = extract(&offsets, bytes, &offsets.buffer, "Buffer")?;
    let buffer = String::from_utf8(buffer_bytes.to_vec())
        .map_err(|e| invalid(format!("Buffer is not valid UTF-8: {}", e)))?;

    let word_count = header.word_count as usize;
    let starts_bytes = extract(&offsets, bytes, &offsets.starts, "Starts")?;
    let word_starts = decode_word_starts(starts_bytes, word_count)?;

    let tree_bytes = extract(&offsets, bytes, &offsets.tree, "Tree")?;
    let ranks_bytes = extract(&offsets, bytes, &offsets.ranks, "Ranks")?;
    let (tree, ranks) = if header.flags.has_ranks() {
        let (n, data) = decode_tree(tree_bytes)?;
        let ranks = decode_ranks(ranks_bytes, word_count)?;
        (Some(TreeSnapshot { n, data }), Some(ranks))
    } else {
        if !tree_bytes.is_empty() || !ranks_bytes.is_empty() {
            return Err(invalid("Rank sections present without HAS_RANKS".to_string()).into());
        }
        (None, None)
    };

    let ids_bytes = extract(&offsets, bytes, &offsets.ids, "Ids")?;
    let ids = if header.flags.has_ids() {
        Some(serde_json::from_slice::<Vec<I>>(ids_bytes)?)
    } else {
        if !ids_bytes.is_empty() {
            return Err(invalid("Id section present without HAS_IDS".to_string()).into());
        }
        None
    };

    debug!(
        words = word_count,
        bytes = bytes.len(),
        ranked = header.flags.has_ranks(),
        ids = header.flags.has_ids(),
        "decoded binary snapshot"
    );

    Ok(Snapshot {
        buffer,
        word_starts,
        separator: separator.to_string(),
        tree,
        ranks,
        ids,
    })
}
