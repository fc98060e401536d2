//! Streaming base64 with lane-wide SIMD acceleration.
//!
//! The core is a pair of allocation-free calls, [`encode`] and [`decode`],
//! that transform caller-owned buffers and report exactly how far they
//! got: every return carries a status plus consumed/written counts, so
//! partial destinations and chunked streams resume precisely. Allocating
//! wrappers ([`encode_to_string`], [`decode_to_vec`]) sit on top.
//!
//! Bulk data moves through wide registers when the CPU has them (AVX2 or
//! SSSE3 on x86_64, NEON on aarch64, detected once at startup); remainders
//! and anomalies always drop to the scalar core, which is the only place
//! input is judged invalid.
//!
//! ```
//! use base_lane::{STANDARD, OperationStatus, decode, encode};
//!
//! let mut encoded = [0u8; 8];
//! let op = encode(b"light", &mut encoded, &STANDARD, true);
//! assert_eq!(op.status, OperationStatus::Done);
//! assert_eq!(&encoded[..op.written], b"bGlnaHQ=");
//!
//! let mut decoded = [0u8; 5];
//! let op = decode(&encoded, &mut decoded, &STANDARD, true);
//! assert_eq!(&decoded[..op.written], b"light");
//! ```

mod alphabet;
mod config;
mod convenience;
mod driver;
mod errors;
mod length;
mod scalar;
mod simd;
mod status;
mod symbol;

pub use alphabet::{Alphabet, AlphabetVariant, PAD, STANDARD, URL_SAFE};
pub use config::{AlphabetConfig, AlphabetsConfig};
pub use convenience::{decode_to_vec, encode_to_string};
pub use errors::{AlphabetError, DecodeError, LengthError};
pub use length::{MAX_ENCODE_LEN, decoded_len, encoded_len};
pub use simd::{Capability, capability};
pub use status::{Operation, OperationStatus};
pub use symbol::Symbol;

/// Encodes raw bytes into `encoded`, which may hold bytes or UTF-16 units.
///
/// Only whole 3-byte groups are committed to the destination. With
/// `is_final_block` a trailing 1-2 byte group is closed out with `=`
/// padding; without it those bytes are left unconsumed and the status is
/// [`OperationStatus::NeedMoreData`], so the caller hands them back
/// together with the next chunk.
pub fn encode<S: Symbol>(
    data: &[u8],
    encoded: &mut [S],
    alphabet: &Alphabet,
    is_final_block: bool,
) -> Operation {
    driver::encode_into(data, encoded, alphabet, is_final_block)
}

/// Decodes base64 symbols (bytes or UTF-16 units) into raw bytes.
///
/// Only whole 4-symbol groups are consumed. Padding is accepted in the
/// last group of a final block and nowhere else; anything outside the
/// alphabet stops the call with [`OperationStatus::InvalidData`] and
/// counts that point at the offending group.
pub fn decode<S: Symbol>(
    encoded: &[S],
    data: &mut [u8],
    alphabet: &Alphabet,
    is_final_block: bool,
) -> Operation {
    driver::decode_into(encoded, data, alphabet, is_final_block)
}
