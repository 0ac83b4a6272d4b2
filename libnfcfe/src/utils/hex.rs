//! Hex formatting for frame logging.

use std::fmt::Write;

/// Lowercase hex without separators: `&[0x00, 0xa4]` -> `"00a4"`.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{:02x}", b);
        s
    })
}

/// Lowercase hex of the first `bits` bits of `bytes`, with the bit count
/// appended when the last byte is partial: `"26 (7 bits)"`.
pub fn frame_to_hex(bytes: &[u8], bits: usize) -> String {
    let len = bits.div_ceil(8).min(bytes.len());
    let mut s = bytes_to_hex(&bytes[..len]);
    if bits % 8 != 0 {
        let _ = write!(s, " ({} bits)", bits);
    }
    s
}
