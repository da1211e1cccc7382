use thiserror::Error;

/// Failures surfaced while decoding an LZNT1 stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The stream ended inside a 2-byte chunk header.
    #[error("stream truncated inside a chunk header")]
    TruncatedHeader,

    /// A chunk header promised more payload bytes than the stream holds.
    #[error("chunk payload extends past the end of the stream")]
    TruncatedChunk,

    /// A flag byte announced a back-reference but the payload ended first.
    #[error("chunk payload truncated inside a back-reference tuple")]
    TruncatedTuple,

    /// A back-reference pointed before the start of the current chunk.
    #[error("back-reference offset {offset} exceeds the {produced} bytes produced so far")]
    BadReference { offset: usize, produced: usize },
}
