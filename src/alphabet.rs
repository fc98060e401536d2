use crate::errors::AlphabetError;

/// Padding symbol appended to a short final group.
pub const PAD: u8 = b'=';

/// Decode-map sentinel meaning "not part of the alphabet".
pub(crate) const INVALID: i8 = -1;

const STANDARD_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const URL_SAFE_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Alphabet layouts the vectorized core can translate without table
/// lookups.
///
/// Positions 0-61 are shared between the two RFC 4648 layouts; only the
/// symbols for values 62 and 63 differ, which is what the per-range offset
/// arithmetic keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphabetVariant {
    /// `A-Za-z0-9+/` (RFC 4648 section 4)
    Standard,
    /// `A-Za-z0-9-_` (RFC 4648 section 5)
    UrlSafe,
}

/// A base64 alphabet: the 64-entry encode table and its decode inverse.
///
/// Both tables are built once and never mutated. The two RFC 4648 layouts
/// are available as [`STANDARD`] and [`URL_SAFE`]; anything else goes
/// through [`Alphabet::new`] and is served by the scalar path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    encode_map: [u8; 64],
    decode_map: [i8; 256],
    variant: Option<AlphabetVariant>,
}

const fn build_decode_map(chars: &[u8; 64]) -> [i8; 256] {
    let mut map = [INVALID; 256];
    let mut i = 0;
    while i < 64 {
        map[chars[i] as usize] = i as i8;
        i += 1;
    }
    map
}

/// Standard base64 alphabet (`+` and `/`), the most common configuration.
pub static STANDARD: Alphabet = Alphabet {
    encode_map: *STANDARD_CHARS,
    decode_map: build_decode_map(STANDARD_CHARS),
    variant: Some(AlphabetVariant::Standard),
};

/// URL- and filename-safe alphabet (`-` and `_`).
pub static URL_SAFE: Alphabet = Alphabet {
    encode_map: *URL_SAFE_CHARS,
    decode_map: build_decode_map(URL_SAFE_CHARS),
    variant: Some(AlphabetVariant::UrlSafe),
};

impl Alphabet {
    /// Builds an alphabet from 64 distinct ASCII symbols.
    ///
    /// # Errors
    ///
    /// Rejects duplicates, non-ASCII bytes, and the padding character,
    /// since any of those would break the decode map's bijectivity.
    pub fn new(chars: &[u8; 64]) -> Result<Self, AlphabetError> {
        let mut decode_map = [INVALID; 256];
        for (i, &symbol) in chars.iter().enumerate() {
            if !symbol.is_ascii() || symbol == PAD {
                return Err(AlphabetError::UnusableSymbol { symbol });
            }
            if decode_map[symbol as usize] != INVALID {
                return Err(AlphabetError::DuplicateSymbol { symbol });
            }
            decode_map[symbol as usize] = i as i8;
        }
        Ok(Alphabet {
            encode_map: *chars,
            decode_map,
            variant: identify_variant(chars),
        })
    }

    /// Parses a 64-character string, e.g. straight out of the registry.
    pub fn from_chars(chars: &str) -> Result<Self, AlphabetError> {
        let bytes: &[u8; 64] = chars
            .as_bytes()
            .try_into()
            .map_err(|_| AlphabetError::WrongLength {
                actual: chars.chars().count(),
            })?;
        Self::new(bytes)
    }

    /// The known layout this alphabet matches, if any. `None` keeps the
    /// transform on the scalar path.
    pub(crate) fn variant(&self) -> Option<AlphabetVariant> {
        self.variant
    }

    /// Symbol for a 6-bit value.
    #[inline(always)]
    pub(crate) fn encode_six(&self, six: u8) -> u8 {
        self.encode_map[(six & 0x3F) as usize]
    }

    /// 6-bit value for an input unit, or the sentinel.
    #[inline(always)]
    pub(crate) fn decode_unit(&self, unit: u16) -> i8 {
        if unit > 0xFF {
            INVALID
        } else {
            self.decode_map[unit as usize]
        }
    }

    /// The encode table, in index order.
    pub fn symbols(&self) -> &[u8; 64] {
        &self.encode_map
    }
}

fn identify_variant(chars: &[u8; 64]) -> Option<AlphabetVariant> {
    if chars[..62] != STANDARD_CHARS[..62] {
        return None;
    }
    match (chars[62], chars[63]) {
        (b'+', b'/') => Some(AlphabetVariant::Standard),
        (b'-', b'_') => Some(AlphabetVariant::UrlSafe),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_map_inverts_encode_map() {
        for alphabet in [&STANDARD, &URL_SAFE] {
            for six in 0..64u8 {
                let symbol = alphabet.encode_six(six);
                assert_eq!(alphabet.decode_unit(symbol as u16), six as i8);
            }
        }
    }

    #[test]
    fn sentinel_for_foreign_bytes() {
        assert_eq!(STANDARD.decode_unit(b'!' as u16), INVALID);
        assert_eq!(STANDARD.decode_unit(PAD as u16), INVALID);
        assert_eq!(STANDARD.decode_unit(0x100), INVALID);
        // the variants disown each other's specials
        assert_eq!(STANDARD.decode_unit(b'-' as u16), INVALID);
        assert_eq!(URL_SAFE.decode_unit(b'+' as u16), INVALID);
    }

    #[test]
    fn identifies_known_layouts() {
        assert_eq!(STANDARD.variant(), Some(AlphabetVariant::Standard));
        assert_eq!(URL_SAFE.variant(), Some(AlphabetVariant::UrlSafe));

        let mut shuffled = *STANDARD_CHARS;
        shuffled.swap(0, 1);
        let custom = Alphabet::new(&shuffled).unwrap();
        assert_eq!(custom.variant(), None);
    }

    #[test]
    fn rejects_bad_alphabets() {
        let mut dup = *STANDARD_CHARS;
        dup[1] = b'A';
        assert_eq!(
            Alphabet::new(&dup),
            Err(AlphabetError::DuplicateSymbol { symbol: b'A' })
        );

        let mut pad = *STANDARD_CHARS;
        pad[63] = PAD;
        assert_eq!(
            Alphabet::new(&pad),
            Err(AlphabetError::UnusableSymbol { symbol: PAD })
        );

        assert_eq!(
            Alphabet::from_chars("too short"),
            Err(AlphabetError::WrongLength { actual: 9 })
        );
    }
}
