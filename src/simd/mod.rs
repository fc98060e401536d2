//! Capability selection and the bulk-transform dispatch.
//!
//! Which lane width is usable is decided once per process and read from a
//! `OnceLock` afterwards; the kernels themselves never re-detect. The
//! dispatchers speak in whole groups so the driver's accounting stays
//! exact regardless of which path did the work.

use std::sync::OnceLock;

use crate::alphabet::AlphabetVariant;

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod x86_64;

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
mod aarch64;

/// Widest vectorized path available on the running CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    /// No vector path; every group goes through the scalar core
    Scalar,
    /// 128-bit registers: 12 raw bytes / 16 symbols per iteration
    Lane16,
    /// 256-bit registers: 24 raw bytes / 32 symbols per iteration
    Lane32,
}

static CAPABILITY: OnceLock<Capability> = OnceLock::new();

/// The capability level in effect: detected on first use, fixed for the
/// life of the process.
pub fn capability() -> Capability {
    *CAPABILITY.get_or_init(detect)
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
fn detect() -> Capability {
    if is_x86_feature_detected!("avx2") {
        Capability::Lane32
    } else if is_x86_feature_detected!("ssse3") {
        Capability::Lane16
    } else {
        Capability::Scalar
    }
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
fn detect() -> Capability {
    // NEON is mandatory on aarch64
    Capability::Lane16
}

#[cfg(not(all(feature = "simd", any(target_arch = "x86_64", target_arch = "aarch64"))))]
fn detect() -> Capability {
    Capability::Scalar
}

/// Bulk-encodes as many whole registers as fit inside `group_limit` groups
/// and the destination, returning the number of groups transformed.
///
/// The kernels stop short of the source end so their overlapping loads
/// stay in bounds; the driver's scalar loop finishes whatever is left.
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
pub(crate) fn encode_bulk(
    src: &[u8],
    group_limit: usize,
    dst: &mut [u8],
    variant: AlphabetVariant,
) -> usize {
    match capability() {
        // SAFETY: capability() verified the feature on this CPU
        Capability::Lane32 => unsafe { x86_64::encode_avx2(src, group_limit, dst, variant) },
        Capability::Lane16 => unsafe { x86_64::encode_ssse3(src, group_limit, dst, variant) },
        Capability::Scalar => 0,
    }
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
pub(crate) fn encode_bulk(
    src: &[u8],
    group_limit: usize,
    dst: &mut [u8],
    variant: AlphabetVariant,
) -> usize {
    match capability() {
        // SAFETY: NEON is always present on aarch64
        Capability::Lane16 => unsafe { aarch64::encode_neon(src, group_limit, dst, variant) },
        _ => 0,
    }
}

#[cfg(not(all(feature = "simd", any(target_arch = "x86_64", target_arch = "aarch64"))))]
pub(crate) fn encode_bulk(
    _src: &[u8],
    _group_limit: usize,
    _dst: &mut [u8],
    _variant: AlphabetVariant,
) -> usize {
    0
}

/// Bulk-decodes whole registers, stopping at `group_limit` groups, at a
/// full destination, or at the first register holding a sentinel lane.
/// Returns the number of groups decoded; the stop reason is deliberately
/// not reported, because the scalar core re-derives it exactly.
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
pub(crate) fn decode_bulk(
    src: &[u8],
    group_limit: usize,
    dst: &mut [u8],
    variant: AlphabetVariant,
) -> usize {
    match capability() {
        // SAFETY: capability() verified the feature on this CPU
        Capability::Lane32 => unsafe { x86_64::decode_avx2(src, group_limit, dst, variant) },
        Capability::Lane16 => unsafe { x86_64::decode_ssse3(src, group_limit, dst, variant) },
        Capability::Scalar => 0,
    }
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
pub(crate) fn decode_bulk(
    src: &[u8],
    group_limit: usize,
    dst: &mut [u8],
    variant: AlphabetVariant,
) -> usize {
    match capability() {
        // SAFETY: NEON is always present on aarch64
        Capability::Lane16 => unsafe { aarch64::decode_neon(src, group_limit, dst, variant) },
        _ => 0,
    }
}

#[cfg(not(all(feature = "simd", any(target_arch = "x86_64", target_arch = "aarch64"))))]
pub(crate) fn decode_bulk(
    _src: &[u8],
    _group_limit: usize,
    _dst: &mut [u8],
    _variant: AlphabetVariant,
) -> usize {
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_is_stable_across_reads() {
        let first = capability();
        for _ in 0..8 {
            assert_eq!(capability(), first);
        }
    }
}
