// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varint, delta offsets, and fixed-width ranks.
//!
//! Nothing fancy here, just the classics done right. Word starts are strictly
//! ascending, so storing the gaps keeps almost every value under 128 and in a
//! single varint byte. Tree slots are word indices, also usually small. Ranks
//! are stored as raw f64 bits so a round trip is exact.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   Originally from DWARF debugging format (1992+), popularized by Protocol Buffers.
//!   See: DWARF4 specification §7.6 "Variable Length Data", and
//!   Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>

use std::io;

use super::header::MAX_VARINT_BYTES;

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Returns an error if:
/// - Buffer is empty
/// - Varint exceeds MAX_VARINT_BYTES (malformed/malicious input)
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Empty buffer for varint",
        ));
    }

    let mut result: u64 = 0;
    let mut shift = 0;
    let mut i = 0;

    while i < bytes.len() && i < MAX_VARINT_BYTES {
        let byte = bytes[i];
        // The tenth byte may only carry the top bit of a u64
        if shift == 63 && byte > 1 {
            return Err(invalid("Varint overflows u64".to_string()));
        }
        result |= ((byte & 0x7F) as u64) << shift;
        i += 1;
        if byte & 0x80 == 0 {
            return Ok((result, i));
        }
        shift += 7;
    }

    // If we get here, either buffer ended mid-varint or varint is too long
    if i >= MAX_VARINT_BYTES {
        Err(invalid(
            "Varint exceeds maximum length (possible corruption)".to_string(),
        ))
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Incomplete varint",
        ))
    }
}

/// Decode a varint that must fit in `usize`.
fn decode_usize(bytes: &[u8], pos: &mut usize, what: &str) -> io::Result<usize> {
    let rest = bytes.get(*pos..).unwrap_or_default();
    let (value, consumed) = decode_varint(rest)?;
    *pos += consumed;
    usize::try_from(value).map_err(|_| invalid(format!("{} {} does not fit in usize", what, value)))
}

/// Reject a declared element count that cannot possibly fit in the bytes left.
///
/// Every element takes at least `min_bytes`, so anything larger is corrupt and
/// would otherwise trigger a huge allocation.
fn check_count(count: usize, min_bytes: usize, remaining: usize, what: &str) -> io::Result<()> {
    match count.checked_mul(min_bytes) {
        Some(needed) if needed <= remaining => Ok(()),
        _ => Err(invalid(format!(
            "{} count {} exceeds available bytes {}",
            what, count, remaining
        ))),
    }
}

// ============================================================================
// WORD START OFFSETS (delta + varint)
// ============================================================================

/// Encode strictly ascending offsets as a first value followed by gaps.
pub fn encode_word_starts(starts: &[usize], buf: &mut Vec<u8>) -> io::Result<()> {
    let mut prev = 0usize;
    for (i, &start) in starts.iter().enumerate() {
        let delta = if i == 0 {
            start
        } else {
            start
                .checked_sub(prev)
                .filter(|&d| d > 0)
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("word_starts[{}] = {} is not above {}", i, start, prev),
                    )
                })?
        };
        encode_varint(delta as u64, buf);
        prev = start;
    }
    Ok(())
}

/// Decode exactly `count` offsets. The section must be consumed completely.
pub fn decode_word_starts(bytes: &[u8], count: usize) -> io::Result<Vec<usize>> {
    check_count(count, 1, bytes.len(), "Word start")?;

    let mut starts = Vec::with_capacity(count);
    let mut pos = 0;
    let mut prev = 0usize;
    for i in 0..count {
        let delta = decode_usize(bytes, &mut pos, "Word start delta")?;
        if i > 0 && delta == 0 {
            return Err(invalid(format!("Word start {} repeats its predecessor", i)));
        }
        let start = prev
            .checked_add(delta)
            .ok_or_else(|| invalid(format!("Word start {} overflows", i)))?;
        starts.push(start);
        prev = start;
    }

    if pos != bytes.len() {
        return Err(invalid(format!(
            "Word start section has {} trailing bytes",
            bytes.len() - pos
        )));
    }
    Ok(starts)
}

// ============================================================================
// RANK TREE (varint n, then 2n varint slots)
// ============================================================================

/// Encode the rank tree: leaf count, then every slot of the `2n` array.
pub fn encode_tree(n: usize, data: &[usize], buf: &mut Vec<u8>) {
    encode_varint(n as u64, buf);
    for &slot in data {
        encode_varint(slot as u64, buf);
    }
}

/// Decode the rank tree into `(n, data)` with `data.len() == 2n`.
pub fn decode_tree(bytes: &[u8]) -> io::Result<(usize, Vec<usize>)> {
    let mut pos = 0;
    let n = decode_usize(bytes, &mut pos, "Tree size")?;
    let slots = n
        .checked_mul(2)
        .ok_or_else(|| invalid(format!("Tree size {} overflows", n)))?;
    check_count(slots, 1, bytes.len() - pos, "Tree slot")?;

    let mut data = Vec::with_capacity(slots);
    for _ in 0..slots {
        data.push(decode_usize(bytes, &mut pos, "Tree slot")?);
    }

    if pos != bytes.len() {
        return Err(invalid(format!(
            "Tree section has {} trailing bytes",
            bytes.len() - pos
        )));
    }
    Ok((n, data))
}

// ============================================================================
// RANKS (f64 little-endian)
// ============================================================================

/// Encode ranks as raw little-endian f64 bits.
pub fn encode_ranks(ranks: &[f64], buf: &mut Vec<u8>) {
    buf.reserve(ranks.len() * 8);
    for &rank in ranks {
        buf.extend_from_slice(&rank.to_le_bytes());
    }
}

/// Decode `count` ranks. The section length must be exactly `8 * count`.
pub fn decode_ranks(bytes: &[u8], count: usize) -> io::Result<Vec<f64>> {
    if count.checked_mul(8) != Some(bytes.len()) {
        return Err(invalid(format!(
            "Rank section is {} bytes, expected {} ranks",
            bytes.len(),
            count
        )));
    }
    Ok(bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect())
}
