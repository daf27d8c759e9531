// Copyright 2023-2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Reference construction by direct comparison sort.
//!
//! This is *O*(*n*² log(*n*)) in the worst case and only meant for checking other constructions
//! against on small inputs.

use rayon::prelude::*;

use crate::domain::{self, ConfigError, Index, Symbol};

/// Builds the suffix array of `corpus` by sorting its suffixes directly.
///
/// The result has the same layout as [`build()`](crate::build), with the empty suffix at
/// position 0.
///
/// # Errors
///
/// Returns an error under the same conditions as [`build()`](crate::build), except that symbols
/// are never out of range.
///
/// # Examples
///
/// ```
/// let sa: Vec<u32> = sufsort::naive::suffix_array(b"banana")?;
/// assert_eq!(sa, [6, 5, 3, 1, 0, 4, 2]);
/// # Ok::<(), sufsort::ConfigError>(())
/// ```
pub fn suffix_array<S: Symbol, I: Index>(corpus: &[S]) -> Result<Vec<I>, ConfigError> {
    domain::check_index_type::<I>()?;
    domain::check_symbol_type::<S>()?;
    domain::check_corpus_len::<I>(corpus.len())?;

    let mut offsets: Vec<usize> = (0..corpus.len()).collect();
    offsets.par_sort_unstable_by(|&a, &b| corpus[a..].cmp(&corpus[b..]));

    Ok(std::iter::once(corpus.len())
        .chain(offsets)
        .map(I::from_offset)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mississippi() {
        let sa: Vec<u32> = suffix_array(b"mississippi").unwrap();
        assert_eq!(sa, [11, 10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
    }

    #[test]
    fn rejects_short_corpus() {
        assert_eq!(
            suffix_array::<u8, u32>(b"x"),
            Err(ConfigError::CorpusTooShort { len: 1 }),
        );
    }
}
