// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    io::{self, Read, Write},
    ops::Range,
};

use log::{debug, info};
use sufsort::{
    ConfigError, ConsistencyError, Index as Offset, LcpLr, Symbol, build_lcp, build_lcp_lr,
};

use crate::read::{self, ReadError};

/// A substring index over an owned corpus.
///
/// Holds the corpus, its suffix array and optionally its LCP-LR range tables, and can be written
/// to and read back from a byte stream.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Index<S = u8, I = u32> {
    corpus: Vec<S>,
    suffix_array: Vec<I>,
    ranges: Option<LcpLr<I>>,
}

impl<S: Symbol, I: Offset> Index<S, I> {
    /// Builds an index over `corpus`, whose symbols are all at most `max_symbol`.
    ///
    /// # Errors
    ///
    /// Returns an error if `corpus` can't be indexed with `I` or contains a symbol greater than
    /// `max_symbol`.
    ///
    /// # Examples
    ///
    /// ```
    /// use infix::{Index, IndexConfig};
    ///
    /// let index: Index = Index::build(b"banana".to_vec(), b'n', &IndexConfig::new())?;
    /// assert_eq!(index.find(b"ana"), 2..4);
    /// # Ok::<(), sufsort::ConfigError>(())
    /// ```
    pub fn build(
        corpus: Vec<S>,
        max_symbol: S,
        config: &IndexConfig,
    ) -> Result<Self, ConfigError> {
        let suffix_array: Vec<I> = sufsort::build(&corpus, max_symbol)?;
        info!("built suffix array of {} entries", suffix_array.len());

        let ranges = config.range_tables.then(|| {
            let lcp = build_lcp(&corpus, &suffix_array);
            let ranges = build_lcp_lr(&suffix_array, &lcp);
            debug!(
                "built range tables with {} left and {} right entries",
                ranges.left().entries(),
                ranges.right().entries(),
            );
            ranges
        });

        Ok(Self {
            corpus,
            suffix_array,
            ranges,
        })
    }

    /// Reassembles an index from its parts, checking that they agree.
    ///
    /// # Errors
    ///
    /// Returns an error if the parts are inconsistent with each other. See [`sufsort::validate()`].
    pub fn from_parts(
        corpus: Vec<S>,
        suffix_array: Vec<I>,
        ranges: Option<LcpLr<I>>,
    ) -> Result<Self, ConsistencyError> {
        sufsort::validate(&corpus, &suffix_array, ranges.as_ref())?;

        Ok(Self {
            corpus,
            suffix_array,
            ranges,
        })
    }

    /// Reads an index previously written with [`Index::write()`].
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the data is not a valid index for `S` and `I`.
    pub fn read<R>(reader: &mut R) -> Result<Self, ReadError>
    where
        R: Read + ?Sized,
    {
        read::read(reader)
    }

    /// Writes the index to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs while writing or if `S` or `I` are wider than 64
    /// bits.
    pub fn write<W>(&self, writer: &mut W, config: &IndexConfig) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        crate::write::write(self, writer, config)
    }

    /// Returns the range of suffix array positions whose suffixes start with `pattern`.
    ///
    /// Returns `len..len` if there is no match, where `len` is the length of the suffix array.
    #[must_use]
    pub fn find(&self, pattern: &[S]) -> Range<usize> {
        sufsort::search(
            &self.corpus,
            &self.suffix_array,
            pattern,
            self.ranges.as_ref(),
        )
    }

    /// Returns the corpus offsets at which `pattern` occurs, in suffix order.
    #[must_use]
    pub fn positions(&self, pattern: &[S]) -> &[I] {
        &self.suffix_array[self.find(pattern)]
    }

    /// Returns `true` if and only if `pattern` occurs in the corpus.
    #[must_use]
    pub fn contains(&self, pattern: &[S]) -> bool {
        !self.find(pattern).is_empty()
    }

    /// Returns the indexed corpus.
    #[must_use]
    pub fn corpus(&self) -> &[S] {
        &self.corpus
    }

    /// Returns the suffix array.
    #[must_use]
    pub fn suffix_array(&self) -> &[I] {
        &self.suffix_array
    }

    /// Returns the range tables, if the index has them.
    #[must_use]
    pub fn ranges(&self) -> Option<&LcpLr<I>> {
        self.ranges.as_ref()
    }
}

/// Configuration for building and writing an index.
///
/// The defaults skip the range tables and compress the written index.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct IndexConfig {
    range_tables: bool,
    compress: bool,
    compression_threads: u32,
    compression_level: i32,
}

impl IndexConfig {
    /// Creates a new configuration for index operations
    ///
    /// This configuration can be reused across operations.
    pub const fn new() -> Self {
        Self {
            range_tables: false,
            compress: true,
            compression_threads: Self::DEFAULT_COMPRESSION_THREADS,
            compression_level: Self::DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Sets whether to build LCP-LR range tables.
    ///
    /// Range tables speed up searching but can take space quadratic in the corpus length for
    /// highly repetitive corpora. See [`LcpLr`].
    pub fn range_tables(&mut self, enabled: bool) -> &mut Self {
        self.range_tables = enabled;
        self
    }

    /// Sets whether to compress the body of written indices with zstd.
    pub fn compress(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    /// Sets the number of threads to use for compressing the index.
    ///
    /// A value of 0 means that compression will run on the same thread as I/O.
    pub fn compression_threads(&mut self, threads: u32) -> &mut Self {
        self.compression_threads = threads;
        self
    }

    /// Sets the compression level to use for compressing the index.
    ///
    /// The compression level can be set to any value between -7 and 22 inclusive. Any value
    /// outside of this range will be clamped to fit inside the range.
    pub fn compression_level(&mut self, level: i32) -> &mut Self {
        self.compression_level = level;
        self
    }

    pub(crate) fn is_compressed(&self) -> bool {
        self.compress
    }

    pub(crate) fn threads(&self) -> u32 {
        self.compression_threads
    }

    pub(crate) fn level(&self) -> i32 {
        self.compression_level
    }

    /// The default number of compression threads to create
    ///
    /// We set this to 1 to ensure I/O and compression can run concurrently.
    pub const DEFAULT_COMPRESSION_THREADS: u32 = 1;

    /// The default compression level to use
    ///
    /// We set this to 3 because suffix arrays are close to random data and gain little from the
    /// slower levels.
    pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_construction() {
        let text = b"abracadabra abracadabra".to_vec();
        let index: Index = Index::build(text.clone(), u8::MAX, &IndexConfig::new()).unwrap();

        assert_eq!(
            index.suffix_array(),
            sufsort::naive::suffix_array::<u8, u32>(&text).unwrap(),
        );
    }

    #[test]
    fn rejects_out_of_range_symbols() {
        let result = Index::<u8, u32>::build(b"banana".to_vec(), b'm', &IndexConfig::new());

        assert!(matches!(
            result,
            Err(ConfigError::SymbolOutOfRange { offset: 2, .. }),
        ));
    }

    #[test]
    fn range_tables_are_optional() {
        let plain: Index = Index::build(b"banana".to_vec(), b'n', &IndexConfig::new()).unwrap();
        let ranged: Index = Index::build(
            b"banana".to_vec(),
            b'n',
            IndexConfig::new().range_tables(true),
        )
        .unwrap();

        assert!(plain.ranges().is_none());
        assert!(ranged.ranges().is_some());
        assert_eq!(plain.find(b"na"), ranged.find(b"na"));
        assert_eq!(ranged.positions(b"nan"), [2]);
        assert!(!plain.contains(b"bb"));
    }

    #[test]
    fn from_parts_validates() {
        let result = Index::<u8, u32>::from_parts(b"abc".to_vec(), vec![3, 0, 1, 1], None);

        assert_eq!(
            result,
            Err(ConsistencyError::DuplicateOffset {
                position: 3,
                offset: 1,
            }),
        );
    }

    #[test]
    fn from_parts_rejects_foreign_parts() {
        let (sa, ranges) = {
            let index: Index = Index::build(
                b"zyxwvu".to_vec(),
                b'z',
                IndexConfig::new().range_tables(true),
            )
            .unwrap();
            (index.suffix_array().to_vec(), index.ranges().cloned())
        };

        let result = Index::<u8, u32>::from_parts(b"banana".to_vec(), sa, None);
        assert_eq!(result, Err(ConsistencyError::Unsorted { position: 3 }));

        let banana: Index = Index::build(b"banana".to_vec(), b'n', &IndexConfig::new()).unwrap();
        let result = Index::<u8, u32>::from_parts(
            b"banana".to_vec(),
            banana.suffix_array().to_vec(),
            ranges,
        );
        assert!(result.is_err(), "{result:?}");
    }
}
