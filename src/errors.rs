use std::fmt;

use crate::length::MAX_ENCODE_LEN;

/// Errors raised while building an [`Alphabet`](crate::Alphabet).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphabetError {
    /// The alphabet does not contain exactly 64 symbols
    WrongLength { actual: usize },
    /// A symbol appears at more than one index
    DuplicateSymbol { symbol: u8 },
    /// A symbol outside the ASCII range, or the reserved padding character
    UnusableSymbol { symbol: u8 },
}

impl fmt::Display for AlphabetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlphabetError::WrongLength { actual } => {
                write!(f, "alphabet must have 64 symbols, got {}", actual)
            }
            AlphabetError::DuplicateSymbol { symbol } => {
                write!(f, "duplicate symbol 0x{:02X} in alphabet", symbol)
            }
            AlphabetError::UnusableSymbol { symbol } => {
                write!(
                    f,
                    "symbol 0x{:02X} is not usable in an alphabet (non-ASCII or '=')",
                    symbol
                )
            }
        }
    }
}

impl std::error::Error for AlphabetError {}

/// Raised by [`encoded_len`](crate::encoded_len) when the encoded size
/// would not fit the addressable length type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthError {
    /// The offending input length
    pub length: usize,
}

impl fmt::Display for LengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "input of {} bytes exceeds the encodable maximum of {}",
            self.length, MAX_ENCODE_LEN
        )
    }
}

impl std::error::Error for LengthError {}

/// Errors surfaced by the allocating decode wrapper.
///
/// The streaming core itself reports through
/// [`Operation`](crate::Operation); this type exists for callers that want
/// a hard failure with the exact offending position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input contains a symbol outside the alphabet
    InvalidSymbol { symbol: u8, position: usize },
    /// `=` appears somewhere other than the last one or two positions
    InvalidPadding { position: usize },
    /// A final buffer must be a whole number of 4-symbol groups
    InvalidLength { actual: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidSymbol { symbol, position } => {
                write!(f, "invalid symbol 0x{:02X} at position {}", symbol, position)
            }
            DecodeError::InvalidPadding { position } => {
                write!(f, "padding character at position {} is not terminal", position)
            }
            DecodeError::InvalidLength { actual } => {
                write!(
                    f,
                    "encoded length {} is not a positive multiple of 4",
                    actual
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {}
