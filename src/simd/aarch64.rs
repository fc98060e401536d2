//! NEON (16-lane) kernels, mirroring the x86 16-lane structure.
//!
//! Same scheme as the x86 kernels: table-shuffle each 3-byte group into a
//! 32-bit lane, extract the 6-bit fields with the scalar core's shifts and
//! masks, translate with saturating range compares plus per-range offsets.

// Allow unused_unsafe because we explicitly wrap NEON intrinsics for Rust
// 2024 edition compatibility (unsafe_op_in_unsafe_fn lint). The intrinsics
// may be marked safe in some versions, but we maintain explicit blocks for
// portability.
#![allow(unused_unsafe)]

use std::arch::aarch64::*;

use crate::alphabet::AlphabetVariant;

/// `vqtbl1q` zeroes lanes whose index is out of range, so 0xFF marks the
/// dead byte of each 32-bit lane.
static ENC_SHUFFLE: [u8; 16] = [2, 1, 0, 0xFF, 5, 4, 3, 0xFF, 8, 7, 6, 0xFF, 11, 10, 9, 0xFF];

static DEC_SHUFFLE: [u8; 16] = [2, 1, 0, 6, 5, 4, 10, 9, 8, 14, 13, 12, 0xFF, 0xFF, 0xFF, 0xFF];

/// High-nibble offsets for ASCII -> 6-bit; negative offsets wrapped to u8.
static DEC_NIBBLE_OFFSETS: [u8; 16] = [0, 0, 19, 4, 191, 191, 185, 185, 0, 0, 0, 0, 0, 0, 0, 0];

/// Per-range offsets for 6-bit -> ASCII; negative offsets wrapped to u8.
fn enc_offsets(variant: AlphabetVariant) -> [u8; 16] {
    match variant {
        AlphabetVariant::Standard => {
            [65, 71, 252, 252, 252, 252, 252, 252, 252, 252, 252, 252, 237, 240, 0, 0]
        }
        AlphabetVariant::UrlSafe => {
            [65, 71, 252, 252, 252, 252, 252, 252, 252, 252, 252, 252, 239, 32, 0, 0]
        }
    }
}

fn dec_specials(variant: AlphabetVariant) -> (u8, u8, u8, u8) {
    match variant {
        // fixups as wrapping u8: standard '/' needs -3, url '-' needs -2
        AlphabetVariant::Standard => (b'+', b'/', 0, 253),
        AlphabetVariant::UrlSafe => (b'-', b'_', 254, 33),
    }
}

/// # Safety
///
/// NEON must be available (it always is on aarch64).
#[target_feature(enable = "neon")]
pub(crate) unsafe fn encode_neon(
    src: &[u8],
    group_limit: usize,
    dst: &mut [u8],
    variant: AlphabetVariant,
) -> usize {
    let shuffle = unsafe { vld1q_u8(ENC_SHUFFLE.as_ptr()) };
    let offsets = unsafe { vld1q_u8(enc_offsets(variant).as_ptr()) };

    let mut groups = 0usize;
    // 4 groups per iteration; the register load reaches 4 bytes past the
    // 12-byte window, so that slack must exist in the source.
    while groups + 4 <= group_limit
        && groups * 3 + 16 <= src.len()
        && groups * 4 + 16 <= dst.len()
    {
        unsafe {
            let input = vld1q_u8(src.as_ptr().add(groups * 3));
            let words = vreinterpretq_u32_u8(vqtbl1q_u8(input, shuffle));
            let indices = extract(words);
            let symbols = vaddq_u8(indices, vqtbl1q_u8(offsets, offset_index(indices)));
            vst1q_u8(dst.as_mut_ptr().add(groups * 4), symbols);
        }
        groups += 4;
    }
    groups
}

/// # Safety
///
/// NEON must be available (it always is on aarch64).
#[target_feature(enable = "neon")]
pub(crate) unsafe fn decode_neon(
    src: &[u8],
    group_limit: usize,
    dst: &mut [u8],
    variant: AlphabetVariant,
) -> usize {
    let shuffle = unsafe { vld1q_u8(DEC_SHUFFLE.as_ptr()) };
    let nibble_offsets = unsafe { vld1q_u8(DEC_NIBBLE_OFFSETS.as_ptr()) };
    let (sym62, sym63, fix62, fix63) = dec_specials(variant);

    let mut groups = 0usize;
    while groups + 4 <= group_limit && groups * 3 + 12 <= dst.len() {
        let done = unsafe {
            let input = vld1q_u8(src.as_ptr().add(groups * 4));

            let hi = vshrq_n_u8(input, 4);
            let mut indices = vaddq_u8(input, vqtbl1q_u8(nibble_offsets, hi));

            let is62 = vceqq_u8(input, vdupq_n_u8(sym62));
            let is63 = vceqq_u8(input, vdupq_n_u8(sym63));
            let fix = vorrq_u8(
                vandq_u8(is62, vdupq_n_u8(fix62)),
                vandq_u8(is63, vdupq_n_u8(fix63)),
            );
            indices = vaddq_u8(indices, fix);

            // a lane is valid iff its saturated distance past one of the
            // three contiguous ranges is exactly zero, or it is 62/63
            let zero = vdupq_n_u8(0);
            let digit_ok =
                vceqq_u8(vqsubq_u8(vsubq_u8(input, vdupq_n_u8(b'0')), vdupq_n_u8(9)), zero);
            let upper_ok =
                vceqq_u8(vqsubq_u8(vsubq_u8(input, vdupq_n_u8(b'A')), vdupq_n_u8(25)), zero);
            let lower_ok =
                vceqq_u8(vqsubq_u8(vsubq_u8(input, vdupq_n_u8(b'a')), vdupq_n_u8(25)), zero);
            let valid = vorrq_u8(
                vorrq_u8(digit_ok, upper_ok),
                vorrq_u8(lower_ok, vorrq_u8(is62, is63)),
            );
            if vminvq_u8(valid) != 0xFF {
                // sentinel lane: leave this register to the scalar core
                false
            } else {
                let packed = vqtbl1q_u8(vreinterpretq_u8_u32(pack(vreinterpretq_u32_u8(indices))), shuffle);
                let mut staged = [0u8; 16];
                vst1q_u8(staged.as_mut_ptr(), packed);
                dst[groups * 3..groups * 3 + 12].copy_from_slice(&staged[..12]);
                true
            }
        };
        if !done {
            break;
        }
        groups += 4;
    }
    groups
}

/// The scalar core's shift/mask field extraction across all four lanes.
#[target_feature(enable = "neon")]
unsafe fn extract(words: uint32x4_t) -> uint8x16_t {
    unsafe {
        let six = vdupq_n_u32(0x3F);
        let f0 = vandq_u32(vshrq_n_u32(words, 18), six);
        let f1 = vshlq_n_u32(vandq_u32(vshrq_n_u32(words, 12), six), 8);
        let f2 = vshlq_n_u32(vandq_u32(vshrq_n_u32(words, 6), six), 16);
        let f3 = vshlq_n_u32(vandq_u32(words, six), 24);
        vreinterpretq_u8_u32(vorrq_u32(vorrq_u32(f0, f1), vorrq_u32(f2, f3)))
    }
}

/// Sub-range ordinal per lane, as in the x86 kernels.
#[target_feature(enable = "neon")]
unsafe fn offset_index(indices: uint8x16_t) -> uint8x16_t {
    unsafe {
        let reduced = vqsubq_u8(indices, vdupq_n_u8(51));
        // the compare mask is all-ones per lane, so subtracting it adds 1
        let over = vcgtq_s8(vreinterpretq_s8_u8(indices), vdupq_n_s8(25));
        vsubq_u8(reduced, over)
    }
}

/// Re-packs the four 6-bit lanes of each group into its 24-bit word.
#[target_feature(enable = "neon")]
unsafe fn pack(indices: uint32x4_t) -> uint32x4_t {
    unsafe {
        let six = vdupq_n_u32(0x3F);
        let v0 = vshlq_n_u32(vandq_u32(indices, six), 18);
        let v1 = vshlq_n_u32(vandq_u32(vshrq_n_u32(indices, 8), six), 12);
        let v2 = vshlq_n_u32(vandq_u32(vshrq_n_u32(indices, 16), six), 6);
        let v3 = vandq_u32(vshrq_n_u32(indices, 24), six);
        vorrq_u32(vorrq_u32(v0, v1), vorrq_u32(v2, v3))
    }
}
