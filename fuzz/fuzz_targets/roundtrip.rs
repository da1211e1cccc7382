#![no_main]

use libfuzzer_sys::fuzz_target;
use lznt1_codec::{compress, decompress};

/// Feeds the raw fuzz input straight to the decoder.
///
/// Arbitrary bytes model corrupted or hostile streams; any `Ok`/`Err` is
/// acceptable, a panic is not.
fn decoder_survives_garbage(data: &[u8]) {
    let mut out = Vec::new();
    let _ = decompress(data, &mut out);
}

/// Treats the fuzz input as plaintext and checks the lossless invariant:
/// whatever the compressor emits, the decompressor must accept and restore
/// bit for bit.
fn stream_round_trips(data: &[u8]) {
    let mut stream = Vec::new();
    compress(data, &mut stream);

    let mut restored = Vec::new();
    match decompress(&stream, &mut restored) {
        Ok(()) => assert_eq!(
            restored,
            data,
            "reconstruction mismatch ({} in, {} stream, {} out)",
            data.len(),
            stream.len(),
            restored.len()
        ),
        Err(e) => panic!(
            "decoder rejected its own compressor's output: {e} ({} input bytes)",
            data.len()
        ),
    }
}

fuzz_target!(|data: &[u8]| {
    decoder_survives_garbage(data);
    stream_round_trips(data);
});
