//! LZNT1 wire-format definitions shared by the compressor and decompressor.
//!
//! A stream is a sequence of chunks, each covering at most [`CHUNK_SIZE`]
//! bytes of uncompressed data. Every chunk starts with a little-endian
//! `u16` header: the low 12 bits hold `payload size - 1`, bit 15 marks the
//! payload as compressed rather than stored verbatim.

/// Maximum number of uncompressed bytes covered by one chunk.
pub(crate) const CHUNK_SIZE: usize = 4096;

/// Shortest back-reference worth encoding.
pub(crate) const MIN_MATCH: usize = 3;

/// Tokens covered by a single flag byte.
pub(crate) const GROUP_SIZE: usize = 8;

/// Header nibble marking a compressed payload.
pub(crate) const FLAG_COMPRESSED: u16 = 0xB000;
/// Header nibble marking a stored (raw) payload.
pub(crate) const FLAG_STORED: u16 = 0x3000;

/// The single bit that distinguishes compressed from stored payloads.
pub(crate) const COMPRESSED_BIT: u16 = 0x8000;
/// Low header bits holding `payload size - 1`.
pub(crate) const SIZE_MASK: u16 = 0x0FFF;

/// Builds a chunk header for a payload of `size` bytes (1..=4096).
pub(crate) fn chunk_header(flag: u16, size: usize) -> u16 {
    debug_assert!(size >= 1 && size <= CHUNK_SIZE);
    flag | ((size - 1) as u16 & SIZE_MASK)
}

/// Offset/length bit split for a tuple coded once `produced` bytes of the
/// current chunk exist.
///
/// Returns `(shift, len_mask)`; the tuple is `(offset - 1) << shift`
/// combined with `length - 3`. The length field starts at 12 bits and gives
/// one bit to the offset every time the produced size doubles past 16, so
/// early tuples can code long runs while later ones reach the whole window.
pub(crate) fn tuple_split(produced: usize) -> (usize, usize) {
    let mut shift = 12;
    let mut pos = produced.saturating_sub(1);
    while pos >= 0x10 {
        pos >>= 1;
        shift -= 1;
    }
    (shift, (1 << shift) - 1)
}

#[cfg(test)]
mod tests {
    use super::{chunk_header, tuple_split, FLAG_COMPRESSED, FLAG_STORED};

    #[test]
    fn header_packs_flag_and_size() {
        assert_eq!(chunk_header(FLAG_COMPRESSED, 1), 0xB000);
        assert_eq!(chunk_header(FLAG_COMPRESSED, 0x1000), 0xBFFF);
        assert_eq!(chunk_header(FLAG_STORED, 100), 0x3063);
    }

    #[test]
    fn split_narrows_as_chunk_grows() {
        // Up to 16 produced bytes the length field keeps all 12 bits.
        assert_eq!(tuple_split(0).0, 12);
        assert_eq!(tuple_split(16).0, 12);
        assert_eq!(tuple_split(17).0, 11);
        assert_eq!(tuple_split(32).0, 11);
        assert_eq!(tuple_split(33).0, 10);
        // A full chunk bottoms out at 4 length bits / 12 offset bits.
        assert_eq!(tuple_split(4096).0, 4);
    }

    #[test]
    fn split_mask_matches_shift() {
        for produced in [0, 16, 17, 100, 4096] {
            let (shift, mask) = tuple_split(produced);
            assert_eq!(mask, (1 << shift) - 1);
        }
    }
}
