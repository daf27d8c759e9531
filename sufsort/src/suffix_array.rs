// Copyright 2023-2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    cmp::Ordering,
    error::Error,
    fmt::{self, Display, Formatter},
    ops::Range,
};

use log::debug;

use crate::{
    domain::{ConfigError, Index, Symbol, check_corpus_len},
    lcp::{build_lcp, inverse},
    lcp_lr::{LcpLr, ReachTable, build_lcp_lr},
    sais, search,
};

/// A suffix array over a borrowed corpus, optionally with LCP-LR range tables.
pub struct SuffixArray<'a, S = u8, I = u32> {
    data: &'a [S],
    inner: Vec<I>,
    ranges: Option<LcpLr<I>>,
}

impl<'a, S: Symbol, I: Index> SuffixArray<'a, S, I> {
    /// Creates a new `SuffixArray` for `data`, whose symbols are all at most `max_symbol`.
    ///
    /// No sentinel needs to be appended to `data`. Position 0 of the result always holds the empty
    /// suffix.
    ///
    /// This operation is *O*(*n* + *k*), where `k` is the alphabet size implied by `max_symbol`.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` can't be indexed with `I` or contains a symbol greater than
    /// `max_symbol`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let data = b"Hello, world!";
    /// let sa: SuffixArray = SuffixArray::new(data, u8::MAX)?;
    /// # Ok::<(), sufsort::ConfigError>(())
    /// ```
    pub fn new(data: &'a [S], max_symbol: S) -> Result<Self, ConfigError> {
        let inner = sais::build(data, max_symbol)?;

        Ok(Self {
            data,
            inner,
            ranges: None,
        })
    }

    /// Reassembles a `SuffixArray` from previously built parts, checking that they agree.
    ///
    /// See [`validate()`] for what is checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the parts are inconsistent with each other.
    pub fn from_parts(
        data: &'a [S],
        suffix_array: Vec<I>,
        ranges: Option<LcpLr<I>>,
    ) -> Result<Self, ConsistencyError> {
        validate(data, &suffix_array, ranges.as_ref())?;

        Ok(Self {
            data,
            inner: suffix_array,
            ranges,
        })
    }

    /// Builds the LCP-LR range tables so that searches skip symbols already compared.
    ///
    /// See [`LcpLr`] for the cost of this on highly repetitive data.
    #[must_use]
    pub fn with_ranges(mut self) -> Self {
        if self.ranges.is_none() {
            let lcp = build_lcp(self.data, &self.inner);
            let ranges = build_lcp_lr(&self.inner, &lcp);
            debug!(
                "built range tables with {} left and {} right entries",
                ranges.left().entries(),
                ranges.right().entries(),
            );
            self.ranges = Some(ranges);
        }

        self
    }

    /// Returns the range of suffix array positions whose suffixes start with `pattern`.
    ///
    /// Returns `len..len` if there is no match, where `len` is the length of the suffix array.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa: SuffixArray = SuffixArray::new(b"banana", b'n')?.with_ranges();
    /// assert_eq!(sa.find(b"ana"), 2..4);
    /// # Ok::<(), sufsort::ConfigError>(())
    /// ```
    #[must_use]
    pub fn find(&self, pattern: &[S]) -> Range<usize> {
        search::search(self.data, &self.inner, pattern, self.ranges.as_ref())
    }

    /// Returns the corpus offsets at which `pattern` occurs, in suffix order.
    #[must_use]
    pub fn positions(&self, pattern: &[S]) -> &[I] {
        &self.inner[self.find(pattern)]
    }

    /// Returns `true` if and only if `pattern` is contained in the associated data.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let data = b"Hello, world!";
    /// let sa: SuffixArray = SuffixArray::new(data, u8::MAX)?;
    /// assert!(sa.contains(b"world"));
    /// # Ok::<(), sufsort::ConfigError>(())
    /// ```
    #[must_use]
    pub fn contains(&self, pattern: &[S]) -> bool {
        !self.find(pattern).is_empty()
    }

    /// Returns the suffix array itself.
    #[must_use]
    pub fn as_slice(&self) -> &[I] {
        &self.inner
    }

    /// Returns the range tables, if they have been built.
    #[must_use]
    pub fn ranges(&self) -> Option<&LcpLr<I>> {
        self.ranges.as_ref()
    }

    /// Returns the indexed corpus.
    #[must_use]
    pub fn data(&self) -> &'a [S] {
        self.data
    }

    /// Splits the `SuffixArray` into the suffix array and its range tables.
    #[must_use]
    pub fn into_parts(self) -> (Vec<I>, Option<LcpLr<I>>) {
        (self.inner, self.ranges)
    }
}

/// An error indicating that a suffix array or its range tables don't belong to a corpus.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConsistencyError {
    /// The suffix array doesn't have one more entry than the corpus
    LengthMismatch {
        /// Length of the corpus
        corpus_len: usize,
        /// Length of the suffix array
        suffix_array_len: usize,
    },
    /// The corpus couldn't have been indexed with the index type
    Unindexable(ConfigError),
    /// Position 0 doesn't hold the empty suffix
    MissingEmptySuffix {
        /// Offset found at position 0
        found: usize,
    },
    /// An offset lies outside of the corpus
    InvalidOffset {
        /// Suffix array position of the offset
        position: usize,
        /// The offending offset
        offset: usize,
    },
    /// An offset appears more than once
    DuplicateOffset {
        /// Suffix array position of the second occurrence
        position: usize,
        /// The repeated offset
        offset: usize,
    },
    /// A suffix sorts before the suffix at the previous position
    Unsorted {
        /// Suffix array position of the out of order suffix
        position: usize,
    },
    /// A range table doesn't have one row per suffix array position
    RangeRowCount {
        /// Number of suffix array positions
        expected: usize,
        /// Number of rows found
        found: usize,
    },
    /// A range table row doesn't cover the prefix its position shares with its neighbor
    RangeRowLength {
        /// Row with the wrong length
        position: usize,
        /// Length of the shared prefix
        expected: usize,
        /// Length of the row
        found: usize,
    },
    /// A range table entry doesn't match the suffix array
    WrongReach {
        /// Row of the entry
        position: usize,
        /// Depth of the entry
        depth: usize,
        /// The offending reach
        reach: usize,
    },
}

impl Display for ConsistencyError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ConsistencyError::LengthMismatch {
                corpus_len,
                suffix_array_len,
            } => write!(
                f,
                "suffix array of length {suffix_array_len} doesn't fit corpus of length \
                 {corpus_len}",
            ),
            ConsistencyError::Unindexable(_) => write!(f, "corpus can't be indexed"),
            ConsistencyError::MissingEmptySuffix { found } => {
                write!(f, "expected empty suffix at position 0, found offset {found}")
            }
            ConsistencyError::InvalidOffset { position, offset } => {
                write!(f, "offset {offset} at position {position} is out of bounds")
            }
            ConsistencyError::DuplicateOffset { position, offset } => {
                write!(f, "offset {offset} at position {position} appears twice")
            }
            ConsistencyError::Unsorted { position } => {
                write!(f, "suffix at position {position} is out of order")
            }
            ConsistencyError::RangeRowCount { expected, found } => {
                write!(f, "expected {expected} range table rows, found {found}")
            }
            ConsistencyError::RangeRowLength {
                position,
                expected,
                found,
            } => write!(
                f,
                "range table row {position} has {found} entries, expected {expected}",
            ),
            ConsistencyError::WrongReach {
                position,
                depth,
                reach,
            } => write!(
                f,
                "reach {reach} at position {position}, depth {depth} doesn't match the suffix \
                 array",
            ),
        }
    }
}

impl Error for ConsistencyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConsistencyError::Unindexable(e) => Some(e),
            _ => None,
        }
    }
}

/// Checks that `suffix_array` and `ranges` form an index over `corpus`.
///
/// `suffix_array` must have `corpus.len() + 1` entries forming a permutation of `0..=n` with the
/// empty suffix `n` first, and its suffixes must be in strictly increasing order. `ranges`, if
/// given, must be exactly the tables [`build_lcp_lr()`] derives from that suffix array.
///
/// Ordering is checked in *O*(*n*) time by comparing the first symbols of neighboring suffixes
/// and, on a tie, the ranks of the suffixes that follow them.
///
/// # Errors
///
/// Returns the first inconsistency found.
pub fn validate<S: Symbol, I: Index>(
    corpus: &[S],
    suffix_array: &[I],
    ranges: Option<&LcpLr<I>>,
) -> Result<(), ConsistencyError> {
    let len = corpus.len();
    if suffix_array.len() != len + 1 {
        return Err(ConsistencyError::LengthMismatch {
            corpus_len: len,
            suffix_array_len: suffix_array.len(),
        });
    }
    check_corpus_len::<I>(len).map_err(ConsistencyError::Unindexable)?;
    if let Some(&first) = suffix_array.first()
        && first.to_offset() != len
    {
        return Err(ConsistencyError::MissingEmptySuffix {
            found: first.to_offset(),
        });
    }

    let mut seen = vec![false; len + 1];
    for (position, &offset) in suffix_array.iter().enumerate() {
        let offset = offset.to_offset();
        match seen.get_mut(offset) {
            None => return Err(ConsistencyError::InvalidOffset { position, offset }),
            Some(true) => return Err(ConsistencyError::DuplicateOffset { position, offset }),
            Some(slot) => *slot = true,
        }
    }

    // Position 1 follows the empty suffix, which sorts first regardless
    let ranks = inverse(suffix_array);
    for position in 2..suffix_array.len() {
        let prev = suffix_array[position - 1].to_offset();
        let next = suffix_array[position].to_offset();
        let ordered = match corpus[prev].cmp(&corpus[next]) {
            Ordering::Less => true,
            Ordering::Equal => ranks[prev + 1] < ranks[next + 1],
            Ordering::Greater => false,
        };
        if !ordered {
            return Err(ConsistencyError::Unsorted { position });
        }
    }

    if let Some(ranges) = ranges {
        if ranges.len() != suffix_array.len() {
            return Err(ConsistencyError::RangeRowCount {
                expected: suffix_array.len(),
                found: ranges.len(),
            });
        }

        let lcp = build_lcp(corpus, suffix_array);
        let expected = build_lcp_lr(suffix_array, &lcp);
        check_reach(ranges.left(), expected.left())?;
        check_reach(ranges.right(), expected.right())?;
    }

    Ok(())
}

fn check_reach<I: Index>(
    table: &ReachTable<I>,
    expected: &ReachTable<I>,
) -> Result<(), ConsistencyError> {
    for (position, (row, want)) in table.rows().zip(expected.rows()).enumerate() {
        if row.len() != want.len() {
            return Err(ConsistencyError::RangeRowLength {
                position,
                expected: want.len(),
                found: row.len(),
            });
        }
        if let Some(d) = row.iter().zip(want).position(|(got, want)| got != want) {
            return Err(ConsistencyError::WrongReach {
                position,
                depth: d + 1,
                reach: row[d].to_offset(),
            });
        }
    }

    Ok(())
}
