//! # lznt1-codec
//!
//! Safe, pure-Rust compression and decompression for LZNT1, the LZ77
//! variant the Windows NT kernel uses for transparent NTFS file
//! compression.
//!
//! Data is coded in 4 KiB chunks. Chunks that do not shrink are stored
//! verbatim, so a stream never grows by more than two bytes per chunk.
//!
//! ## Example
//!
//! ```rust
//! let text = b"The play's the thing. The play's the thing.";
//!
//! let mut compressed = Vec::new();
//! lznt1_codec::compress(text, &mut compressed);
//!
//! let mut restored = Vec::new();
//! lznt1_codec::decompress(&compressed, &mut restored)?;
//! assert_eq!(restored, text);
//! # Ok::<(), lznt1_codec::Error>(())
//! ```
//!
//! With the default `std` feature, [`roundtrip::run`] performs the same
//! cycle over files: it persists both the compressed stream and the
//! reconstruction for inspection, and fails if they do not round-trip.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod compress;
mod decompress;
mod error;
mod format;
#[cfg(feature = "std")]
pub mod roundtrip;

pub use compress::compress;
pub use decompress::decompress;
pub use error::Error;
