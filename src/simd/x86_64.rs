//! SSSE3 (16-lane) and AVX2 (32-lane) kernels.
//!
//! Both widths share one scheme. A fixed shuffle drops each 3-byte raw
//! group into its own 32-bit lane, the four 6-bit fields come out with the
//! same shifts and masks the scalar core uses, and symbol translation is a
//! pair of saturating compares plus a per-range offset instead of a
//! 64-entry gather. Decode runs the ranges in reverse; a lane that misses
//! every range is a sentinel and ends the bulk run on the spot, leaving
//! judgement to the scalar core.

// Allow unused_unsafe because we explicitly wrap intrinsics for Rust 2024
// edition compatibility (unsafe_op_in_unsafe_fn lint). The intrinsics may
// be marked safe in some versions, but we maintain explicit blocks for
// portability.
#![allow(unused_unsafe)]

use std::arch::x86_64::*;

use crate::alphabet::AlphabetVariant;

/// Raw-group permutation: bytes `3g..3g+2` of the window into lane `g` as
/// `[b2, b1, b0, 0]`, so each lane holds the group's 24-bit word.
static ENC_SHUFFLE: [u8; 16] = [2, 1, 0, 0x80, 5, 4, 3, 0x80, 8, 7, 6, 0x80, 11, 10, 9, 0x80];

/// Decoded-group compaction: the three live bytes of each lane's word,
/// high byte first, packed to the front.
static DEC_SHUFFLE: [u8; 16] = [2, 1, 0, 6, 5, 4, 10, 9, 8, 14, 13, 12, 0x80, 0x80, 0x80, 0x80];

/// Offsets from an ASCII symbol to its 6-bit value, indexed by high
/// nibble. Symbols 62/63 need a per-variant fixup on top.
static DEC_NIBBLE_OFFSETS: [i8; 16] = [0, 0, 19, 4, -65, -65, -71, -71, 0, 0, 0, 0, 0, 0, 0, 0];

/// Per-range offsets from a 6-bit value to its ASCII symbol; index 0 is
/// the upper-case range, 1 lower-case, 2-11 the digits, 12 and 13 the two
/// variant-specific symbols.
fn enc_offsets(variant: AlphabetVariant) -> [i8; 16] {
    match variant {
        AlphabetVariant::Standard => {
            [65, 71, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -19, -16, 0, 0]
        }
        AlphabetVariant::UrlSafe => {
            [65, 71, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -17, 32, 0, 0]
        }
    }
}

/// Decode parameters that differ between the two layouts: the symbols for
/// 62/63 and the corrections on top of the nibble offsets.
fn dec_specials(variant: AlphabetVariant) -> (i8, i8, i8, i8) {
    match variant {
        AlphabetVariant::Standard => (b'+' as i8, b'/' as i8, 0, -3),
        AlphabetVariant::UrlSafe => (b'-' as i8, b'_' as i8, -2, 33),
    }
}

// ---------------------------------------------------------------------
// SSSE3: 12 raw bytes <-> 16 symbols per iteration
// ---------------------------------------------------------------------

/// # Safety
///
/// Caller verified SSSE3 support.
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn encode_ssse3(
    src: &[u8],
    group_limit: usize,
    dst: &mut [u8],
    variant: AlphabetVariant,
) -> usize {
    let shuffle = unsafe { _mm_loadu_si128(ENC_SHUFFLE.as_ptr() as *const __m128i) };
    let offsets = unsafe { _mm_loadu_si128(enc_offsets(variant).as_ptr() as *const __m128i) };

    let mut groups = 0usize;
    // Each iteration consumes 4 groups but loads a whole register, so the
    // 4 bytes past the window must exist; near the buffer end the tail is
    // left to the scalar core instead.
    while groups + 4 <= group_limit
        && groups * 3 + 16 <= src.len()
        && groups * 4 + 16 <= dst.len()
    {
        unsafe {
            let input = _mm_loadu_si128(src.as_ptr().add(groups * 3) as *const __m128i);
            let words = _mm_shuffle_epi8(input, shuffle);
            let indices = extract_sse(words);
            let symbols = _mm_add_epi8(indices, _mm_shuffle_epi8(offsets, offset_index_sse(indices)));
            _mm_storeu_si128(dst.as_mut_ptr().add(groups * 4) as *mut __m128i, symbols);
        }
        groups += 4;
    }
    groups
}

/// # Safety
///
/// Caller verified SSSE3 support.
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn decode_ssse3(
    src: &[u8],
    group_limit: usize,
    dst: &mut [u8],
    variant: AlphabetVariant,
) -> usize {
    let shuffle = unsafe { _mm_loadu_si128(DEC_SHUFFLE.as_ptr() as *const __m128i) };
    let nibble_offsets =
        unsafe { _mm_loadu_si128(DEC_NIBBLE_OFFSETS.as_ptr() as *const __m128i) };
    let (sym62, sym63, fix62, fix63) = dec_specials(variant);

    let mut groups = 0usize;
    while groups + 4 <= group_limit && groups * 3 + 12 <= dst.len() {
        let (indices, any_sentinel) = unsafe {
            let input = _mm_loadu_si128(src.as_ptr().add(groups * 4) as *const __m128i);
            translate_sse(input, nibble_offsets, sym62, sym63, fix62, fix63)
        };
        if any_sentinel {
            break;
        }
        unsafe {
            let packed = _mm_shuffle_epi8(pack_sse(indices), shuffle);
            let mut staged = [0u8; 16];
            _mm_storeu_si128(staged.as_mut_ptr() as *mut __m128i, packed);
            dst[groups * 3..groups * 3 + 12].copy_from_slice(&staged[..12]);
        }
        groups += 4;
    }
    groups
}

/// The scalar core's `>>18 / >>12&0x3F / >>6&0x3F / &0x3F`, applied to
/// every lane at once and dropped into the lane's four output byte slots.
#[target_feature(enable = "ssse3")]
unsafe fn extract_sse(words: __m128i) -> __m128i {
    unsafe {
        let six = _mm_set1_epi32(0x3F);
        let f0 = _mm_and_si128(_mm_srli_epi32(words, 18), six);
        let f1 = _mm_slli_epi32(_mm_and_si128(_mm_srli_epi32(words, 12), six), 8);
        let f2 = _mm_slli_epi32(_mm_and_si128(_mm_srli_epi32(words, 6), six), 16);
        let f3 = _mm_slli_epi32(_mm_and_si128(words, six), 24);
        _mm_or_si128(_mm_or_si128(f0, f1), _mm_or_si128(f2, f3))
    }
}

/// Collapses each 6-bit value to its sub-range ordinal: 0 for 0-25, 1 for
/// 26-51, 2-11 across the digits, 12 for 62, 13 for 63.
#[target_feature(enable = "ssse3")]
unsafe fn offset_index_sse(indices: __m128i) -> __m128i {
    unsafe {
        let reduced = _mm_subs_epu8(indices, _mm_set1_epi8(51));
        // the compare mask is -1 per lane, so subtracting it bumps 26..51 to 1
        _mm_sub_epi8(reduced, _mm_cmpgt_epi8(indices, _mm_set1_epi8(25)))
    }
}

/// ASCII -> 6-bit for one register, plus whether any lane fell outside
/// every known range.
#[target_feature(enable = "ssse3")]
unsafe fn translate_sse(
    input: __m128i,
    nibble_offsets: __m128i,
    sym62: i8,
    sym63: i8,
    fix62: i8,
    fix63: i8,
) -> (__m128i, bool) {
    unsafe {
        let hi = _mm_and_si128(_mm_srli_epi32(input, 4), _mm_set1_epi8(0x0F));
        let mut indices = _mm_add_epi8(input, _mm_shuffle_epi8(nibble_offsets, hi));

        let is62 = _mm_cmpeq_epi8(input, _mm_set1_epi8(sym62));
        let is63 = _mm_cmpeq_epi8(input, _mm_set1_epi8(sym63));
        let fix = _mm_or_si128(
            _mm_and_si128(is62, _mm_set1_epi8(fix62)),
            _mm_and_si128(is63, _mm_set1_epi8(fix63)),
        );
        indices = _mm_add_epi8(indices, fix);

        // a lane is valid iff its saturated distance past one of the three
        // contiguous ranges is exactly zero, or it is a 62/63 symbol
        let zero = _mm_setzero_si128();
        let digit_ok = _mm_cmpeq_epi8(
            _mm_subs_epu8(_mm_sub_epi8(input, _mm_set1_epi8(b'0' as i8)), _mm_set1_epi8(9)),
            zero,
        );
        let upper_ok = _mm_cmpeq_epi8(
            _mm_subs_epu8(_mm_sub_epi8(input, _mm_set1_epi8(b'A' as i8)), _mm_set1_epi8(25)),
            zero,
        );
        let lower_ok = _mm_cmpeq_epi8(
            _mm_subs_epu8(_mm_sub_epi8(input, _mm_set1_epi8(b'a' as i8)), _mm_set1_epi8(25)),
            zero,
        );
        let valid = _mm_or_si128(
            _mm_or_si128(digit_ok, upper_ok),
            _mm_or_si128(lower_ok, _mm_or_si128(is62, is63)),
        );
        let any_sentinel = _mm_movemask_epi8(valid) != 0xFFFF;
        (indices, any_sentinel)
    }
}

/// Re-packs the four 6-bit lanes of each group into its 24-bit word.
#[target_feature(enable = "ssse3")]
unsafe fn pack_sse(indices: __m128i) -> __m128i {
    unsafe {
        let six = _mm_set1_epi32(0x3F);
        let v0 = _mm_slli_epi32(_mm_and_si128(indices, six), 18);
        let v1 = _mm_slli_epi32(_mm_and_si128(_mm_srli_epi32(indices, 8), six), 12);
        let v2 = _mm_slli_epi32(_mm_and_si128(_mm_srli_epi32(indices, 16), six), 6);
        let v3 = _mm_and_si128(_mm_srli_epi32(indices, 24), six);
        _mm_or_si128(_mm_or_si128(v0, v1), _mm_or_si128(v2, v3))
    }
}

// ---------------------------------------------------------------------
// AVX2: 24 raw bytes <-> 32 symbols per iteration
// ---------------------------------------------------------------------

/// # Safety
///
/// Caller verified AVX2 support.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn encode_avx2(
    src: &[u8],
    group_limit: usize,
    dst: &mut [u8],
    variant: AlphabetVariant,
) -> usize {
    let shuffle = unsafe {
        _mm256_broadcastsi128_si256(_mm_loadu_si128(ENC_SHUFFLE.as_ptr() as *const __m128i))
    };
    let offsets = unsafe {
        _mm256_broadcastsi128_si256(_mm_loadu_si128(
            enc_offsets(variant).as_ptr() as *const __m128i
        ))
    };

    let mut groups = 0usize;
    // 8 groups per iteration; the split load reaches 4 bytes past the
    // 24-byte window, so that slack must exist in the source.
    while groups + 8 <= group_limit
        && groups * 3 + 28 <= src.len()
        && groups * 4 + 32 <= dst.len()
    {
        unsafe {
            let lo = _mm_loadu_si128(src.as_ptr().add(groups * 3) as *const __m128i);
            let hi = _mm_loadu_si128(src.as_ptr().add(groups * 3 + 12) as *const __m128i);
            let input = _mm256_inserti128_si256(_mm256_castsi128_si256(lo), hi, 1);

            let words = _mm256_shuffle_epi8(input, shuffle);
            let indices = extract_avx(words);
            let symbols =
                _mm256_add_epi8(indices, _mm256_shuffle_epi8(offsets, offset_index_avx(indices)));
            _mm256_storeu_si256(dst.as_mut_ptr().add(groups * 4) as *mut __m256i, symbols);
        }
        groups += 8;
    }
    groups
}

/// # Safety
///
/// Caller verified AVX2 support.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn decode_avx2(
    src: &[u8],
    group_limit: usize,
    dst: &mut [u8],
    variant: AlphabetVariant,
) -> usize {
    let shuffle = unsafe {
        _mm256_broadcastsi128_si256(_mm_loadu_si128(DEC_SHUFFLE.as_ptr() as *const __m128i))
    };
    let nibble_offsets = unsafe {
        _mm256_broadcastsi128_si256(_mm_loadu_si128(
            DEC_NIBBLE_OFFSETS.as_ptr() as *const __m128i
        ))
    };
    let (sym62, sym63, fix62, fix63) = dec_specials(variant);

    let mut groups = 0usize;
    while groups + 8 <= group_limit && groups * 3 + 24 <= dst.len() {
        let (indices, any_sentinel) = unsafe {
            let input = _mm256_loadu_si256(src.as_ptr().add(groups * 4) as *const __m256i);
            translate_avx(input, nibble_offsets, sym62, sym63, fix62, fix63)
        };
        if any_sentinel {
            break;
        }
        unsafe {
            let packed = _mm256_shuffle_epi8(pack_avx(indices), shuffle);
            let mut staged = [0u8; 32];
            _mm256_storeu_si256(staged.as_mut_ptr() as *mut __m256i, packed);
            // 12 live bytes per 128-bit lane
            dst[groups * 3..groups * 3 + 12].copy_from_slice(&staged[..12]);
            dst[groups * 3 + 12..groups * 3 + 24].copy_from_slice(&staged[16..28]);
        }
        groups += 8;
    }
    groups
}

#[target_feature(enable = "avx2")]
unsafe fn extract_avx(words: __m256i) -> __m256i {
    unsafe {
        let six = _mm256_set1_epi32(0x3F);
        let f0 = _mm256_and_si256(_mm256_srli_epi32(words, 18), six);
        let f1 = _mm256_slli_epi32(_mm256_and_si256(_mm256_srli_epi32(words, 12), six), 8);
        let f2 = _mm256_slli_epi32(_mm256_and_si256(_mm256_srli_epi32(words, 6), six), 16);
        let f3 = _mm256_slli_epi32(_mm256_and_si256(words, six), 24);
        _mm256_or_si256(_mm256_or_si256(f0, f1), _mm256_or_si256(f2, f3))
    }
}

#[target_feature(enable = "avx2")]
unsafe fn offset_index_avx(indices: __m256i) -> __m256i {
    unsafe {
        let reduced = _mm256_subs_epu8(indices, _mm256_set1_epi8(51));
        _mm256_sub_epi8(reduced, _mm256_cmpgt_epi8(indices, _mm256_set1_epi8(25)))
    }
}

#[target_feature(enable = "avx2")]
unsafe fn translate_avx(
    input: __m256i,
    nibble_offsets: __m256i,
    sym62: i8,
    sym63: i8,
    fix62: i8,
    fix63: i8,
) -> (__m256i, bool) {
    unsafe {
        let hi = _mm256_and_si256(_mm256_srli_epi32(input, 4), _mm256_set1_epi8(0x0F));
        let mut indices = _mm256_add_epi8(input, _mm256_shuffle_epi8(nibble_offsets, hi));

        let is62 = _mm256_cmpeq_epi8(input, _mm256_set1_epi8(sym62));
        let is63 = _mm256_cmpeq_epi8(input, _mm256_set1_epi8(sym63));
        let fix = _mm256_or_si256(
            _mm256_and_si256(is62, _mm256_set1_epi8(fix62)),
            _mm256_and_si256(is63, _mm256_set1_epi8(fix63)),
        );
        indices = _mm256_add_epi8(indices, fix);

        // a lane is valid iff its saturated distance past one of the three
        // contiguous ranges is exactly zero, or it is a 62/63 symbol
        let zero = _mm256_setzero_si256();
        let digit_ok = _mm256_cmpeq_epi8(
            _mm256_subs_epu8(
                _mm256_sub_epi8(input, _mm256_set1_epi8(b'0' as i8)),
                _mm256_set1_epi8(9),
            ),
            zero,
        );
        let upper_ok = _mm256_cmpeq_epi8(
            _mm256_subs_epu8(
                _mm256_sub_epi8(input, _mm256_set1_epi8(b'A' as i8)),
                _mm256_set1_epi8(25),
            ),
            zero,
        );
        let lower_ok = _mm256_cmpeq_epi8(
            _mm256_subs_epu8(
                _mm256_sub_epi8(input, _mm256_set1_epi8(b'a' as i8)),
                _mm256_set1_epi8(25),
            ),
            zero,
        );
        let valid = _mm256_or_si256(
            _mm256_or_si256(digit_ok, upper_ok),
            _mm256_or_si256(lower_ok, _mm256_or_si256(is62, is63)),
        );
        let any_sentinel = _mm256_movemask_epi8(valid) != -1;
        (indices, any_sentinel)
    }
}

#[target_feature(enable = "avx2")]
unsafe fn pack_avx(indices: __m256i) -> __m256i {
    unsafe {
        let six = _mm256_set1_epi32(0x3F);
        let v0 = _mm256_slli_epi32(_mm256_and_si256(indices, six), 18);
        let v1 = _mm256_slli_epi32(_mm256_and_si256(_mm256_srli_epi32(indices, 8), six), 12);
        let v2 = _mm256_slli_epi32(_mm256_and_si256(_mm256_srli_epi32(indices, 16), six), 6);
        let v3 = _mm256_and_si256(_mm256_srli_epi32(indices, 24), six);
        _mm256_or_si256(_mm256_or_si256(v0, v1), _mm256_or_si256(v2, v3))
    }
}
