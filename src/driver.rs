//! One public call, start to finish: scan, bulk-transform, finish the tail,
//! and account for every element.
//!
//! The driver holds no state between calls. Resumable streaming is the
//! caller re-invoking with the unconsumed bytes prepended to the next
//! chunk, which the consumed/written counts make exact.

use crate::alphabet::{Alphabet, PAD};
use crate::scalar;
use crate::simd;
use crate::status::{Operation, OperationStatus};
use crate::symbol::Symbol;

pub(crate) fn encode_into<S: Symbol>(
    src: &[u8],
    dst: &mut [S],
    alphabet: &Alphabet,
    is_final_block: bool,
) -> Operation {
    let whole_groups = src.len() / 3;
    // Whole groups only; a group that does not fit is simply not started.
    let groups = whole_groups.min(dst.len() / 4);

    let mut consumed = 0usize;
    let mut written = 0usize;

    // Bulk path: byte destinations over a layout the range arithmetic
    // knows. Everything it leaves behind falls through to the scalar loop.
    if let Some(variant) = alphabet.variant() {
        if let Some(bytes) = S::bytes_mut(dst) {
            let done = simd::encode_bulk(src, groups, bytes, variant);
            consumed = done * 3;
            written = done * 4;
        }
    }

    while consumed / 3 < groups {
        scalar::encode_group(
            &src[consumed..consumed + 3],
            &mut dst[written..written + 4],
            alphabet,
        );
        consumed += 3;
        written += 4;
    }

    if groups < whole_groups {
        return Operation::new(OperationStatus::DestinationTooSmall, consumed, written);
    }

    match (src.len() - consumed, is_final_block) {
        (0, _) => Operation::new(OperationStatus::Done, consumed, written),
        (_, false) => Operation::new(OperationStatus::NeedMoreData, consumed, written),
        (tail, true) => {
            if dst.len() - written < 4 {
                return Operation::new(OperationStatus::DestinationTooSmall, consumed, written);
            }
            scalar::encode_tail(&src[consumed..], &mut dst[written..written + 4], alphabet);
            Operation::new(OperationStatus::Done, consumed + tail, written + 4)
        }
    }
}

pub(crate) fn decode_into<S: Symbol>(
    src: &[S],
    dst: &mut [u8],
    alphabet: &Alphabet,
    is_final_block: bool,
) -> Operation {
    // Only whole groups are ever consumed, final block or not.
    let limit = src.len() / 4 * 4;

    let mut consumed = 0usize;
    let mut written = 0usize;

    // Bulk path. Any anomaly in a register (sentinel lane, destination
    // shortfall, underrun near the end) ends the run there; the scalar loop
    // below re-examines that group and is the sole judge of validity.
    if let Some(variant) = alphabet.variant() {
        if let Some(bytes) = S::bytes(src) {
            let done = simd::decode_bulk(bytes, limit / 4, dst, variant);
            consumed = done * 4;
            written = done * 3;
        }
    }

    while consumed < limit {
        let group = &src[consumed..consumed + 4];

        if group.iter().any(|s| s.to_unit() == PAD as u16) {
            // Padding asserts the end of the stream: only the very last
            // group of a final block may carry it.
            if !is_final_block || consumed + 4 != src.len() {
                return Operation::new(OperationStatus::InvalidData, consumed, written);
            }
            return decode_padded_tail(group, dst, alphabet, consumed, written);
        }

        let Some(word) = scalar::decode_group(group, alphabet) else {
            return Operation::new(OperationStatus::InvalidData, consumed, written);
        };
        if dst.len() - written < 3 {
            return Operation::new(OperationStatus::DestinationTooSmall, consumed, written);
        }
        scalar::write_group(&mut dst[written..], word);
        consumed += 4;
        written += 3;
    }

    match (src.len() - consumed, is_final_block) {
        (0, _) => Operation::new(OperationStatus::Done, consumed, written),
        (_, false) => Operation::new(OperationStatus::NeedMoreData, consumed, written),
        // A final block must close on a whole group.
        (_, true) => Operation::new(OperationStatus::InvalidData, consumed, written),
    }
}

/// Final group of a final block, known to contain at least one `=`.
fn decode_padded_tail<S: Symbol>(
    group: &[S],
    dst: &mut [u8],
    alphabet: &Alphabet,
    consumed: usize,
    written: usize,
) -> Operation {
    let invalid = Operation::new(OperationStatus::InvalidData, consumed, written);
    let pad = PAD as u16;

    let (u0, u1, u2, u3) = (
        group[0].to_unit(),
        group[1].to_unit(),
        group[2].to_unit(),
        group[3].to_unit(),
    );
    // `=` is legal as the last symbol, or the last two.
    if u0 == pad || u1 == pad || u3 != pad {
        return invalid;
    }

    let v0 = alphabet.decode_unit(u0) as i32;
    let v1 = alphabet.decode_unit(u1) as i32;

    if u2 == pad {
        // two symbols carry one byte
        if (v0 | v1) < 0 {
            return invalid;
        }
        if dst.len() - written < 1 {
            return Operation::new(OperationStatus::DestinationTooSmall, consumed, written);
        }
        let word = (v0 as u32) << 18 | (v1 as u32) << 12;
        dst[written] = (word >> 16) as u8;
        Operation::new(OperationStatus::Done, consumed + 4, written + 1)
    } else {
        // three symbols carry two bytes
        let v2 = alphabet.decode_unit(u2) as i32;
        if (v0 | v1 | v2) < 0 {
            return invalid;
        }
        if dst.len() - written < 2 {
            return Operation::new(OperationStatus::DestinationTooSmall, consumed, written);
        }
        let word = (v0 as u32) << 18 | (v1 as u32) << 12 | (v2 as u32) << 6;
        dst[written] = (word >> 16) as u8;
        dst[written + 1] = (word >> 8) as u8;
        Operation::new(OperationStatus::Done, consumed + 4, written + 2)
    }
}
