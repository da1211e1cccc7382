use alloc::vec::Vec;

use crate::error::Error;
use crate::format::{tuple_split, COMPRESSED_BIT, GROUP_SIZE, MIN_MATCH, SIZE_MASK};

type Result<T> = core::result::Result<T, Error>;

/// Decompresses an LZNT1 stream, appending the reconstruction to `output`.
///
/// Chunks are consumed until the input ends, a zero header is read, or a
/// lone trailing null byte remains (some writers pad streams that way).
/// Malformed input is rejected with an [`Error`]; this function does not
/// panic on bad data.
pub fn decompress(input: &[u8], output: &mut Vec<u8>) -> Result<()> {
    // The reconstruction is at least as large as the input for any stream
    // worth compressing, so this avoids the first few regrows.
    output.reserve(input.len());

    let mut pos = 0;
    while pos < input.len() {
        if pos + 1 == input.len() && input[pos] == 0 {
            break;
        }

        let header = input
            .get(pos..pos + 2)
            .map(|h| u16::from_le_bytes([h[0], h[1]]))
            .ok_or(Error::TruncatedHeader)?;
        pos += 2;

        if header == 0 {
            // End-of-stream marker.
            break;
        }

        let size = usize::from(header & SIZE_MASK) + 1;
        let payload = input
            .get(pos..pos + size)
            .ok_or(Error::TruncatedChunk)?;
        pos += size;

        if header & COMPRESSED_BIT != 0 {
            inflate_chunk(payload, output)?;
        } else {
            output.extend_from_slice(payload);
        }
    }

    Ok(())
}

/// Expands one compressed chunk payload.
fn inflate_chunk(payload: &[u8], output: &mut Vec<u8>) -> Result<()> {
    // Back-references are relative to this chunk's own output.
    let base = output.len();
    let mut pos = 0;

    while pos < payload.len() {
        let flags = payload[pos];
        pos += 1;

        // A zero flag byte with a full group behind it is 8 plain literals.
        if flags == 0 && pos + GROUP_SIZE <= payload.len() {
            output.extend_from_slice(&payload[pos..pos + GROUP_SIZE]);
            pos += GROUP_SIZE;
            continue;
        }

        for bit in 0..GROUP_SIZE {
            if flags >> bit & 1 == 0 {
                if pos == payload.len() {
                    // Chunks may stop mid-group; unused bits are padding.
                    return Ok(());
                }
                output.push(payload[pos]);
                pos += 1;
            } else {
                let tuple = payload
                    .get(pos..pos + 2)
                    .map(|t| usize::from(u16::from_le_bytes([t[0], t[1]])))
                    .ok_or(Error::TruncatedTuple)?;
                pos += 2;

                let (shift, len_mask) = tuple_split(output.len() - base);
                let length = (tuple & len_mask) + MIN_MATCH;
                let offset = (tuple >> shift) + 1;
                copy_reference(output, base, offset, length)?;
            }

            if pos == payload.len() {
                break;
            }
        }
    }

    Ok(())
}

/// Copies `length` bytes starting `offset` back in the current chunk.
///
/// Overlapping copies are well-defined: they repeat the data produced so
/// far. Offset 1 is a byte run and is filled directly.
#[inline]
fn copy_reference(output: &mut Vec<u8>, base: usize, offset: usize, length: usize) -> Result<()> {
    let produced = output.len() - base;
    if offset > produced {
        return Err(Error::BadReference { offset, produced });
    }

    if offset == 1 {
        let byte = output[output.len() - 1];
        output.resize(output.len() + length, byte);
    } else {
        output.reserve(length);
        let mut from = output.len() - offset;
        for _ in 0..length {
            output.push(output[from]);
            from += 1;
        }
    }

    Ok(())
}
