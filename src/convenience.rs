//! Allocating wrappers over the streaming core.
//!
//! Both run a single final-block call; the streaming statuses collapse
//! into an exact-size `String`/`Vec` or a hard [`DecodeError`].

use crate::alphabet::{Alphabet, PAD};
use crate::driver;
use crate::errors::DecodeError;
use crate::length;
use crate::status::OperationStatus;

/// Encodes to a freshly allocated `String`.
pub fn encode_to_string<T: AsRef<[u8]>>(data: T, alphabet: &Alphabet) -> String {
    let data = data.as_ref();
    // A slice can never be long enough for the length math to overflow.
    let len = length::encoded_len(data.len()).expect("slice length within encodable range");
    let mut buf = vec![0u8; len];
    let op = driver::encode_into(data, &mut buf, alphabet, true);
    debug_assert!(op.is_done());
    debug_assert_eq!(op.written, len);
    // The alphabet is validated ASCII, so the buffer is UTF-8.
    String::from_utf8(buf).expect("base64 output is ASCII")
}

/// Decodes a complete buffer into a freshly allocated `Vec<u8>`.
///
/// # Errors
///
/// Anything other than a clean finish on this final input is reported as a
/// [`DecodeError`] pinpointing the offending position.
pub fn decode_to_vec<T: AsRef<[u8]>>(encoded: T, alphabet: &Alphabet) -> Result<Vec<u8>, DecodeError> {
    let encoded = encoded.as_ref();
    let mut buf = vec![0u8; length::decoded_len(encoded)];
    let op = driver::decode_into(encoded, &mut buf, alphabet, true);
    match op.status {
        OperationStatus::Done => {
            buf.truncate(op.written);
            Ok(buf)
        }
        _ => Err(diagnose(encoded, alphabet, op.consumed)),
    }
}

/// Pins down what went wrong, starting from the group the core stopped on.
fn diagnose(encoded: &[u8], alphabet: &Alphabet, consumed: usize) -> DecodeError {
    for (i, &symbol) in encoded.iter().enumerate().skip(consumed) {
        if symbol == PAD {
            // had this padding been terminal, the core would have taken it
            return DecodeError::InvalidPadding { position: i };
        }
        if alphabet.decode_unit(symbol as u16) < 0 {
            return DecodeError::InvalidSymbol {
                symbol,
                position: i,
            };
        }
    }
    DecodeError::InvalidLength {
        actual: encoded.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{STANDARD, URL_SAFE};

    #[test]
    fn string_round_trip() {
        let data = b"The quick brown fox jumps over the lazy dog";
        let encoded = encode_to_string(data, &STANDARD);
        assert_eq!(
            encoded,
            "VGhlIHF1aWNrIGJyb3duIGZveCBqdW1wcyBvdmVyIHRoZSBsYXp5IGRvZw=="
        );
        assert_eq!(decode_to_vec(&encoded, &STANDARD).unwrap(), data);
    }

    #[test]
    fn url_safe_specials() {
        // 0xFB 0xEF 0xFF packs to the 6-bit values 62 62 63 63
        let encoded = encode_to_string([0xFB, 0xEF, 0xFF], &URL_SAFE);
        assert_eq!(encoded, "--__");
        assert_eq!(decode_to_vec(&encoded, &URL_SAFE).unwrap(), [0xFB, 0xEF, 0xFF]);
        assert_eq!(encode_to_string([0xFB, 0xEF, 0xFF], &STANDARD), "++//");
    }

    #[test]
    fn errors_carry_positions() {
        assert_eq!(
            decode_to_vec("TWF!", &STANDARD),
            Err(DecodeError::InvalidSymbol {
                symbol: b'!',
                position: 3
            })
        );
        assert_eq!(
            decode_to_vec("T=Fu", &STANDARD),
            Err(DecodeError::InvalidPadding { position: 1 })
        );
        assert_eq!(
            decode_to_vec("TQ==TWFu", &STANDARD),
            Err(DecodeError::InvalidPadding { position: 2 })
        );
        assert_eq!(
            decode_to_vec("TWFuX", &STANDARD),
            Err(DecodeError::InvalidLength { actual: 5 })
        );
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(encode_to_string(b"", &STANDARD), "");
        assert_eq!(decode_to_vec("", &STANDARD).unwrap(), Vec::<u8>::new());
    }
}
