use alloc::vec::Vec;

use crate::format::{
    chunk_header, tuple_split, CHUNK_SIZE, FLAG_COMPRESSED, FLAG_STORED, GROUP_SIZE, MIN_MATCH,
};

/// Log2 of the hash table size.
const HASH_BITS: usize = 12;
const HASH_SLOTS: usize = 1 << HASH_BITS;

/// Sentinel for an unoccupied table slot or the end of a chain.
const NO_POS: u16 = u16::MAX;

/// Candidates examined per position before the search gives up. Bounds the
/// worst case on degenerate input without measurably hurting ratio on text.
const SEARCH_DEPTH: usize = 16;

/// Tracks the flag byte of the current token group inside the output.
///
/// A flag byte precedes up to eight tokens; bit `i` is set when token `i`
/// is a back-reference tuple rather than a literal. The byte is pushed as
/// zero when a group opens and patched in place as tuples are recorded.
struct GroupFlags {
    at: usize,
    used: usize,
}

impl GroupFlags {
    const fn new() -> Self {
        Self {
            at: 0,
            used: GROUP_SIZE,
        }
    }

    /// Accounts for the next token, opening a fresh group when the current
    /// one is full. The token's bytes must be pushed right after this call.
    fn record(&mut self, out: &mut Vec<u8>, is_tuple: bool) {
        if self.used == GROUP_SIZE {
            out.push(0);
            self.at = out.len() - 1;
            self.used = 0;
        }
        if is_tuple {
            out[self.at] |= 1 << self.used;
        }
        self.used += 1;
    }
}

/// Hash-chained match finder over a single chunk.
///
/// `heads` maps a 3-byte hash to the most recent position that produced it;
/// `prev` chains each position to the previous one with the same hash, so
/// candidates are visited newest-first.
struct MatchFinder {
    heads: [u16; HASH_SLOTS],
    prev: [u16; CHUNK_SIZE],
}

impl MatchFinder {
    const fn new() -> Self {
        Self {
            heads: [NO_POS; HASH_SLOTS],
            prev: [NO_POS; CHUNK_SIZE],
        }
    }

    fn reset(&mut self) {
        self.heads.fill(NO_POS);
    }

    /// Registers `pos` in the chain for its 3-byte prefix. Positions within
    /// two bytes of the chunk end have no full prefix and are skipped.
    fn insert(&mut self, chunk: &[u8], pos: usize) {
        if pos + MIN_MATCH <= chunk.len() {
            let slot = hash(&chunk[pos..]);
            self.prev[pos] = self.heads[slot];
            self.heads[slot] = pos as u16;
        }
    }

    /// Finds the longest earlier occurrence of the bytes at `pos`, no
    /// farther back than `max_offset` and no longer than `max_len`.
    fn longest_match(
        &self,
        chunk: &[u8],
        pos: usize,
        max_offset: usize,
        max_len: usize,
    ) -> Option<(usize, usize)> {
        if pos + MIN_MATCH > chunk.len() {
            return None;
        }
        let limit = max_len.min(chunk.len() - pos);

        let mut best: Option<(usize, usize)> = None;
        let mut best_len = MIN_MATCH - 1;
        let mut cand = self.heads[hash(&chunk[pos..])];

        for _ in 0..SEARCH_DEPTH {
            if cand == NO_POS {
                break;
            }
            let at = cand as usize;
            let offset = pos - at;
            if offset > max_offset {
                // Chains run newest-first, so everything further is older.
                break;
            }

            // Cheap rejection: a longer match must agree at best_len.
            if best_len < limit && chunk[at + best_len] == chunk[pos + best_len] {
                let len = run_length(chunk, at, pos, limit);
                if len > best_len {
                    best_len = len;
                    best = Some((len, offset));
                    if len == limit {
                        break;
                    }
                }
            }

            cand = self.prev[at];
        }

        best
    }
}

/// Compresses `input` into an LZNT1 stream appended to `output`.
///
/// The input is split into 4096-byte chunks. A chunk whose compressed form
/// would not be smaller than its raw bytes is stored verbatim instead, so
/// the stream never grows by more than the 2-byte header per chunk. Empty
/// input appends nothing.
///
/// The output is a deterministic function of the input.
pub fn compress(input: &[u8], output: &mut Vec<u8>) {
    let mut finder = MatchFinder::new();

    for chunk in input.chunks(CHUNK_SIZE) {
        let header_at = output.len();
        output.extend_from_slice(&[0, 0]);

        compress_chunk(chunk, output, &mut finder);

        let payload = output.len() - header_at - 2;
        if payload < chunk.len() {
            let header = chunk_header(FLAG_COMPRESSED, payload).to_le_bytes();
            output[header_at] = header[0];
            output[header_at + 1] = header[1];
        } else {
            // No savings; replace the attempt with a stored chunk.
            output.truncate(header_at);
            output.extend_from_slice(&chunk_header(FLAG_STORED, chunk.len()).to_le_bytes());
            output.extend_from_slice(chunk);
        }
    }
}

/// Emits the token stream for one chunk of at most 4096 bytes.
fn compress_chunk(chunk: &[u8], output: &mut Vec<u8>, finder: &mut MatchFinder) {
    finder.reset();
    let mut flags = GroupFlags::new();
    let mut pos = 0;

    while pos < chunk.len() {
        // The split the decoder will use for a tuple at this position.
        let (shift, len_mask) = tuple_split(pos);
        let max_offset = 1 << (16 - shift);

        match finder.longest_match(chunk, pos, max_offset, len_mask + MIN_MATCH) {
            Some((len, offset)) => {
                flags.record(output, true);
                let tuple = (((offset - 1) << shift) | (len - MIN_MATCH)) as u16;
                output.extend_from_slice(&tuple.to_le_bytes());

                // Matched bytes still enter the chain so later searches can
                // land inside this match.
                for covered in pos..pos + len {
                    finder.insert(chunk, covered);
                }
                pos += len;
            }
            None => {
                flags.record(output, false);
                output.push(chunk[pos]);
                finder.insert(chunk, pos);
                pos += 1;
            }
        }
    }
}

#[inline]
fn hash(bytes: &[u8]) -> usize {
    let prefix = u32::from(bytes[0]) | u32::from(bytes[1]) << 8 | u32::from(bytes[2]) << 16;
    (prefix.wrapping_mul(0x9E37_79B1) >> (32 - HASH_BITS)) as usize
}

/// Length of agreement between the bytes at `at` and `pos`, up to `limit`.
/// The regions may overlap; overlap is what makes RLE-style matches work.
#[inline]
fn run_length(chunk: &[u8], at: usize, pos: usize, limit: usize) -> usize {
    let mut len = 0;
    while len < limit && chunk[at + len] == chunk[pos + len] {
        len += 1;
    }
    len
}
