// Copyright 2023-2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Numeric domain of corpora and indices.
//!
//! Symbols and indices are generic over every primitive integer type so that the width can be
//! chosen per corpus, but only unsigned types are accepted at runtime. The corpus length is only
//! known at runtime too, so whether an index type is wide enough is checked there as well.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use funty::Integral;

/// A symbol of an indexed corpus.
///
/// Implemented for every primitive integer type. Signed types are rejected by
/// [`check_symbol_type()`].
pub trait Symbol: Integral {
    /// Returns the symbol as a zero-based rank in its alphabet.
    #[inline]
    fn rank(self) -> usize {
        self.as_usize()
    }
}

impl<T: Integral> Symbol for T {}

/// An offset into a corpus, as stored in suffix, LCP and range tables.
///
/// Implemented for every primitive integer type. Signed types are rejected by
/// [`check_index_type()`].
pub trait Index: Integral {
    /// The reserved "unplaced" marker. Never a legal offset once [`check_corpus_len()`] passes.
    const NONE: Self = <Self as Integral>::MAX;

    /// Converts an offset into the index type.
    ///
    /// Offsets that do not fit are mapped to [`Index::NONE`]; callers validate the corpus length
    /// beforehand so this cannot happen for offsets in `0..=n`.
    #[inline]
    fn from_offset(offset: usize) -> Self {
        <Self as TryFrom<usize>>::try_from(offset).unwrap_or(Self::NONE)
    }

    /// Converts the index back into an offset.
    #[inline]
    fn to_offset(self) -> usize {
        self.as_usize()
    }
}

impl<T: Integral> Index for T {}

/// Reads a working slot, returning `None` for the unplaced marker.
#[inline]
pub(crate) fn slot<I: Index>(value: I) -> Option<usize> {
    (value != I::NONE).then(|| value.to_offset())
}

/// An error indicating that a corpus cannot be indexed with the requested types.
///
/// No partial state is produced when one of these is returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The index type is signed
    SignedIndex,
    /// The symbol type is signed
    SignedSymbol,
    /// The corpus has fewer than two symbols
    CorpusTooShort {
        /// Length of the corpus
        len: usize,
    },
    /// The index type cannot represent every offset of the corpus plus the unplaced marker
    CorpusTooLarge {
        /// Length of the corpus
        len: usize,
        /// Largest value of the index type, saturated to `usize`
        max_index: usize,
    },
    /// A symbol is larger than the declared maximum symbol
    SymbolOutOfRange {
        /// Offset of the first offending symbol
        offset: usize,
        /// Rank of the offending symbol
        symbol: usize,
        /// Rank of the declared maximum symbol
        max_symbol: usize,
    },
    /// The symbols from the smallest one up to the declared maximum need more buckets than can be
    /// allocated
    AlphabetTooLarge {
        /// Rank of the smallest symbol in the corpus
        min_symbol: usize,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ConfigError::SignedIndex => write!(f, "index type must not be signed"),
            ConfigError::SignedSymbol => write!(f, "symbol type must not be signed"),
            ConfigError::CorpusTooShort { len } => {
                write!(f, "corpus must contain at least 2 symbols, found {len}")
            }
            ConfigError::CorpusTooLarge { len, max_index } => write!(
                f,
                "corpus of {len} symbols has too many positions for an index type with maximum \
                 {max_index}",
            ),
            ConfigError::SymbolOutOfRange {
                offset,
                symbol,
                max_symbol,
            } => write!(
                f,
                "symbol {symbol} at offset {offset} exceeds maximum symbol {max_symbol}",
            ),
            ConfigError::AlphabetTooLarge { min_symbol } => write!(
                f,
                "alphabet from symbol {min_symbol} up to the maximum symbol is too large to bucket",
            ),
        }
    }
}

impl Error for ConfigError {}

/// Checks that `I` is unsigned.
///
/// # Errors
///
/// Returns [`ConfigError::SignedIndex`] if `I` is a signed type.
pub fn check_index_type<I: Index>() -> Result<(), ConfigError> {
    if I::MIN != I::ZERO {
        Err(ConfigError::SignedIndex)
    } else {
        Ok(())
    }
}

/// Checks that `S` is unsigned.
///
/// # Errors
///
/// Returns [`ConfigError::SignedSymbol`] if `S` is a signed type.
pub fn check_symbol_type<S: Symbol>() -> Result<(), ConfigError> {
    if S::MIN != S::ZERO {
        Err(ConfigError::SignedSymbol)
    } else {
        Ok(())
    }
}

/// Checks that a corpus of `len` symbols can be indexed with `I`.
///
/// The suffix array holds `len + 1` distinct offsets (the empty suffix included) and
/// [`Index::NONE`] must stay distinct from all of them.
///
/// # Errors
///
/// Returns [`ConfigError::CorpusTooShort`] if `len < 2` and [`ConfigError::CorpusTooLarge`] if
/// `len + 1` is not representable by `I`.
pub fn check_corpus_len<I: Index>(len: usize) -> Result<(), ConfigError> {
    if len < 2 {
        return Err(ConfigError::CorpusTooShort { len });
    }

    let fits = len
        .checked_add(1)
        .and_then(|count| <I as TryFrom<usize>>::try_from(count).ok())
        .is_some();
    if fits {
        Ok(())
    } else {
        Err(ConfigError::CorpusTooLarge {
            len,
            max_index: I::MAX.as_usize(),
        })
    }
}

/// Checks every symbol of `corpus` against `max_symbol` and returns the smallest symbol rank.
///
/// The smallest rank is subtracted from every symbol when bucketing the outermost level, so
/// alphabets that do not start at 0 don't waste bucket space.
///
/// # Errors
///
/// Returns [`ConfigError::SymbolOutOfRange`] for the first symbol greater than `max_symbol`.
pub fn check_symbols<S: Symbol>(corpus: &[S], max_symbol: S) -> Result<usize, ConfigError> {
    let mut min = max_symbol.rank();
    for (offset, &symbol) in corpus.iter().enumerate() {
        if symbol > max_symbol {
            return Err(ConfigError::SymbolOutOfRange {
                offset,
                symbol: symbol.rank(),
                max_symbol: max_symbol.rank(),
            });
        }
        min = min.min(symbol.rank());
    }

    Ok(min)
}

/// Returns the number of buckets spanning symbol ranks `min..=max_symbol`.
///
/// # Errors
///
/// Returns [`ConfigError::AlphabetTooLarge`] if `max_symbol` doesn't fit in a `usize` or the
/// bucket counts can't be allocated.
pub fn alphabet_size<S: Symbol>(min: usize, max_symbol: S) -> Result<usize, ConfigError> {
    let max_buckets = isize::MAX.unsigned_abs() / size_of::<usize>();

    <S as TryInto<usize>>::try_into(max_symbol)
        .ok()
        .and_then(|max| max.checked_sub(min))
        .and_then(|span| span.checked_add(1))
        .filter(|&size| size <= max_buckets)
        .ok_or(ConfigError::AlphabetTooLarge { min_symbol: min })
}

/// Runs every precondition of a construction over `corpus` and returns the smallest symbol rank
/// together with the alphabet size.
pub(crate) fn check_all<S: Symbol, I: Index>(
    corpus: &[S],
    max_symbol: S,
) -> Result<(usize, usize), ConfigError> {
    check_index_type::<I>()?;
    check_symbol_type::<S>()?;
    check_corpus_len::<I>(corpus.len())?;
    let min = check_symbols(corpus, max_symbol)?;

    Ok((min, alphabet_size(min, max_symbol)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_types_rejected() {
        assert_eq!(check_index_type::<i32>(), Err(ConfigError::SignedIndex));
        assert_eq!(check_symbol_type::<i8>(), Err(ConfigError::SignedSymbol));
        assert_eq!(check_index_type::<u32>(), Ok(()));
        assert_eq!(check_symbol_type::<u8>(), Ok(()));
    }

    #[test]
    fn too_short() {
        assert_eq!(
            check_corpus_len::<u32>(1),
            Err(ConfigError::CorpusTooShort { len: 1 }),
        );
        assert_eq!(
            check_corpus_len::<u32>(0),
            Err(ConfigError::CorpusTooShort { len: 0 }),
        );
    }

    #[test]
    fn index_width_boundary() {
        // A corpus of 255 symbols needs offset 255 for its empty suffix, which is NONE for u8
        assert_eq!(check_corpus_len::<u8>(253), Ok(()));
        assert_eq!(check_corpus_len::<u8>(254), Ok(()));
        assert_eq!(
            check_corpus_len::<u8>(255),
            Err(ConfigError::CorpusTooLarge {
                len: 255,
                max_index: 255,
            }),
        );
    }

    #[test]
    fn none_is_never_an_offset() {
        assert_eq!(u8::from_offset(254), 254);
        assert_eq!(u8::from_offset(300), u8::NONE);
        assert_eq!(slot(u8::NONE), None);
        assert_eq!(slot(7u8), Some(7));
    }

    #[test]
    fn symbol_range() {
        assert_eq!(check_symbols(b"banana", b'z'), Ok(b'a' as usize));
        assert_eq!(
            check_symbols(b"banana", b'm'),
            Err(ConfigError::SymbolOutOfRange {
                offset: 2,
                symbol: b'n' as usize,
                max_symbol: b'm' as usize,
            }),
        );
    }

    #[test]
    fn alphabet_bounds() {
        assert_eq!(alphabet_size(b'a' as usize, b'z'), Ok(26));
        assert_eq!(alphabet_size(0, u8::MAX), Ok(256));
        assert_eq!(
            alphabet_size(0, u64::MAX),
            Err(ConfigError::AlphabetTooLarge { min_symbol: 0 }),
        );
        assert_eq!(
            alphabet_size(1, u64::MAX - 1),
            Err(ConfigError::AlphabetTooLarge { min_symbol: 1 }),
        );
    }
}
