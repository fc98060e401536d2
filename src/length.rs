//! Pure length arithmetic: no table lookups, no content validation.

use crate::alphabet::PAD;
use crate::errors::LengthError;
use crate::symbol::Symbol;

/// Longest input [`encoded_len`] accepts. One group past this and the
/// encoded length would no longer fit the addressable length type.
pub const MAX_ENCODE_LEN: usize = usize::MAX / 4 * 3;

/// Encoded length for `source_len` raw bytes, padding included.
///
/// # Errors
///
/// Fails for lengths above [`MAX_ENCODE_LEN`]. A real slice can never be
/// that long, but length math on untrusted header values can.
pub fn encoded_len(source_len: usize) -> Result<usize, LengthError> {
    if source_len > MAX_ENCODE_LEN {
        return Err(LengthError { length: source_len });
    }
    Ok(source_len.div_ceil(3) * 4)
}

/// Exact decoded length of a final, padded buffer.
///
/// Inspects at most the last two symbols for `=`. A malformed buffer still
/// gets a length here; decode itself is what rejects it.
pub fn decoded_len<S: Symbol>(encoded: &[S]) -> usize {
    let pads = encoded
        .iter()
        .rev()
        .take_while(|s| s.to_unit() == PAD as u16)
        .take(2)
        .count();
    (encoded.len() / 4 * 3).saturating_sub(pads)
}
