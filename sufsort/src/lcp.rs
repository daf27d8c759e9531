// Copyright 2023-2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use crate::domain::{Index, Symbol};

/// Computes the inverse of `suffix_array`, mapping each offset to its rank.
///
/// # Examples
///
/// ```
/// let sa: Vec<u32> = sufsort::build(b"banana", b'n')?;
/// assert_eq!(sufsort::inverse(&sa), [4, 3, 6, 2, 5, 1, 0]);
/// # Ok::<(), sufsort::ConfigError>(())
/// ```
#[must_use]
pub fn inverse<I: Index>(suffix_array: &[I]) -> Vec<I> {
    let mut ranks = vec![I::ZERO; suffix_array.len()];
    for (rank, &offset) in suffix_array.iter().enumerate() {
        ranks[offset.to_offset()] = I::from_offset(rank);
    }

    ranks
}

/// Computes the longest-common-prefix array of `corpus` and its suffix array.
///
/// The result has one entry per suffix array slot. Entry `i` for `i >= 1` is the length of the
/// prefix shared by the suffixes at `suffix_array[i - 1]` and `suffix_array[i]`; entry 0 has no
/// left neighbor and is always 0, as is entry 1 because the empty suffix shares nothing.
///
/// This uses Kasai's algorithm and runs in *O*(*n*) time: offsets are visited in text order and
/// the running match length drops by at most one between consecutive offsets.
///
/// # Panics
///
/// Panics if `suffix_array.len() != corpus.len() + 1`.
///
/// # Examples
///
/// ```
/// let sa: Vec<u32> = sufsort::build(b"banana", b'n')?;
/// assert_eq!(sufsort::build_lcp(b"banana", &sa), [0, 0, 1, 3, 0, 0, 2]);
/// # Ok::<(), sufsort::ConfigError>(())
/// ```
#[must_use]
pub fn build_lcp<S: Symbol, I: Index>(corpus: &[S], suffix_array: &[I]) -> Vec<I> {
    let len = corpus.len();
    assert_eq!(
        suffix_array.len(),
        len + 1,
        "suffix array must have one more entry than the corpus",
    );

    let ranks = inverse(suffix_array);
    let mut lcp = vec![I::ZERO; len + 1];
    let mut h: usize = 0;
    for i in 0..len {
        let rank = ranks[i].to_offset();
        if rank == len {
            // The largest suffix has no successor
            h = 0;
            continue;
        }

        let j = suffix_array[rank + 1].to_offset();
        while i + h < len && j + h < len && corpus[i + h] == corpus[j + h] {
            h += 1;
        }
        lcp[rank + 1] = I::from_offset(h);
        h = h.saturating_sub(1);
    }

    lcp
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(corpus: &[u8], suffix_array: &[u32]) -> Vec<u32> {
        let mut lcp = vec![0];
        for pair in suffix_array.windows(2) {
            let a = &corpus[pair[0] as usize..];
            let b = &corpus[pair[1] as usize..];
            lcp.push(a.iter().zip(b).take_while(|(x, y)| x == y).count() as u32);
        }
        lcp
    }

    #[test]
    fn inverse_round_trip() {
        let sa: Vec<u32> = crate::build(b"mississippi", b'z').unwrap();
        let ranks = inverse(&sa);
        for (rank, &offset) in sa.iter().enumerate() {
            assert_eq!(ranks[offset as usize] as usize, rank);
        }
    }

    #[test]
    fn matches_brute_force() {
        for text in [
            &b"banana"[..],
            b"mississippi",
            b"aaaaaaaa",
            b"abababababa",
            b"the quick brown fox jumps over the lazy dog",
        ] {
            let sa: Vec<u32> = crate::build(text, u8::MAX).unwrap();
            assert_eq!(build_lcp(text, &sa), brute_force(text, &sa), "{text:?}");
        }
    }

    #[test]
    #[should_panic]
    fn mismatched_lengths() {
        let _ = build_lcp(b"abc", &[3u32, 0, 1]);
    }
}
