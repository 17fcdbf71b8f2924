// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary snapshot header and footer structures.
//!
//! The header is 36 bytes of fixed-size fields, parsed in one read before
//! anything else. It records the separator, the word count and the length of
//! every section, so the decoder knows the full layout up front.
//!
//! The footer is 8 bytes: a CRC32 checksum over everything before it, plus a
//! magic number ("PMCF", the header magic reversed). If the footer is wrong,
//! something got corrupted or truncated. Don't trust the data.
//!
//! `SectionOffsets` is the single source of truth for the layout. Both the
//! encoder and the decoder use it, so the write path and the read path cannot
//! drift apart.

use std::io::{self, Read, Write};
use std::ops::Range;

use crc32fast::Hasher as Crc32Hasher;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "FCMP" in ASCII (header)
pub const MAGIC: [u8; 4] = [0x46, 0x43, 0x4D, 0x50];

/// Footer magic: "PMCF" (reversed, marks valid snapshot end)
pub const FOOTER_MAGIC: [u8; 4] = [0x50, 0x4D, 0x43, 0x46];

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum snapshot size: 512 MB
pub const MAX_SNAPSHOT_SIZE: usize = 512 * 1024 * 1024;

/// Maximum number of words
pub const MAX_WORD_COUNT: u32 = 50_000_000;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// FLAGS
// ============================================================================

/// Which optional sections are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    pub const HAS_RANKS: u8 = 0b0000_0001;
    pub const HAS_IDS: u8 = 0b0000_0010;
    const KNOWN: u8 = Self::HAS_RANKS | Self::HAS_IDS;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_ranks(mut self) -> Self {
        self.0 |= Self::HAS_RANKS;
        self
    }

    pub fn with_ids(mut self) -> Self {
        self.0 |= Self::HAS_IDS;
        self
    }

    pub fn has_ranks(self) -> bool {
        self.0 & Self::HAS_RANKS != 0
    }

    pub fn has_ids(self) -> bool {
        self.0 & Self::HAS_IDS != 0
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Binary snapshot header (36 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u8,
    pub flags: FormatFlags,
    /// Separator code point
    pub separator: u32,
    pub word_count: u32,
    /// Concatenated word buffer (raw UTF-8)
    pub buffer_len: u32,
    /// Word start offsets (delta + varint)
    pub starts_len: u32,
    /// Rank tree `(n, data)` (varint)
    pub tree_len: u32,
    /// Ranks (f64 little-endian, 8 bytes each)
    pub ranks_len: u32,
    /// Identifiers (JSON array, the ids are opaque caller types)
    pub ids_len: u32,
}

impl SnapshotHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 2 (reserved) + 7*4 (u32s) = 36
    pub const SIZE: usize = 36;

    /// Compute section byte offsets for this header.
    pub fn section_offsets(&self) -> SectionOffsets {
        SectionOffsets::from_header(self)
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version])?;
        w.write_all(&[self.flags.0])?;
        w.write_all(&[0u8; 2])?; // reserved
        w.write_all(&self.separator.to_le_bytes())?;
        w.write_all(&self.word_count.to_le_bytes())?;
        w.write_all(&self.buffer_len.to_le_bytes())?;
        w.write_all(&self.starts_len.to_le_bytes())?;
        w.write_all(&self.tree_len.to_le_bytes())?;
        w.write_all(&self.ranks_len.to_le_bytes())?;
        w.write_all(&self.ids_len.to_le_bytes())?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected FCMP, got {:?}", magic),
            ));
        }

        let mut buf = [0u8; 32]; // 36 - 4 (magic) = 32
        r.read_exact(&mut buf)?;

        let version = buf[0];
        if version != VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unsupported version {} (expected {})", version, VERSION),
            ));
        }
        let flags = FormatFlags(buf[1]);
        if flags.0 & !FormatFlags::KNOWN != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown format flags {:#010b}", flags.0),
            ));
        }
        // buf[2..4] is reserved

        let field = |i: usize| u32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
        let header = Self {
            version,
            flags,
            separator: field(4),
            word_count: field(8),
            buffer_len: field(12),
            starts_len: field(16),
            tree_len: field(20),
            ranks_len: field(24),
            ids_len: field(28),
        };

        if header.word_count > MAX_WORD_COUNT {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Word count {} exceeds maximum {}",
                    header.word_count, MAX_WORD_COUNT
                ),
            ));
        }
        Ok(header)
    }
}

// ============================================================================
// SECTION OFFSETS (SINGLE SOURCE OF TRUTH for the layout)
// ============================================================================

/// Section byte ranges for the snapshot layout.
///
/// ```text
/// HEADER   [36B]
/// BUFFER   [buffer_len]   raw UTF-8, SEP w0 SEP w1 ... SEP
/// STARTS   [starts_len]   delta-encoded varints
/// TREE     [tree_len]     varint n, then 2n varint slots
/// RANKS    [ranks_len]    f64 LE per word
/// IDS      [ids_len]      JSON array
/// FOOTER   [8B]           CRC32 + "PMCF"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOffsets {
    pub buffer: Range<usize>,
    pub starts: Range<usize>,
    pub tree: Range<usize>,
    pub ranks: Range<usize>,
    pub ids: Range<usize>,
    pub footer: Range<usize>,
}

impl SectionOffsets {
    pub fn from_header(h: &SnapshotHeader) -> Self {
        let mut pos = SnapshotHeader::SIZE;
        let mut next = |len: u32| {
            let start = pos;
            pos += len as usize;
            start..pos
        };
        let buffer = next(h.buffer_len);
        let starts = next(h.starts_len);
        let tree = next(h.tree_len);
        let ranks = next(h.ranks_len);
        let ids = next(h.ids_len);
        let footer = next(SnapshotFooter::SIZE as u32);
        Self {
            buffer,
            starts,
            tree,
            ranks,
            ids,
            footer,
        }
    }

    /// Expected content size (everything before footer)
    pub fn content_size(&self) -> usize {
        self.footer.start
    }

    /// Total snapshot size including footer
    pub fn total_size(&self) -> usize {
        self.footer.end
    }

    /// Get a slice for a section from the bytes
    #[inline]
    pub fn slice<'a>(&self, bytes: &'a [u8], section: &Range<usize>) -> Option<&'a [u8]> {
        bytes.get(section.clone())
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFooter {
    /// CRC32 checksum of header + all sections (everything before footer)
    pub crc32: u32,
}

impl SnapshotFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Snapshot too short for footer",
            ));
        }

        let footer_start = bytes.len() - Self::SIZE;

        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected PMCF, got {:?}", magic),
            ));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
