// Copyright 2023-2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{cmp::Ordering, ops::Range};

use crate::{
    domain::{Index, Symbol},
    lcp_lr::LcpLr,
};

/// Finds the suffix array positions of every suffix starting with `pattern`.
///
/// Uses [`search_lcp_lr()`] when `ranges` are given and [`search_binary()`] otherwise. Both
/// return the same range.
///
/// The result is the half-open range of matching positions. If nothing matches, the empty range
/// `suffix_array.len()..suffix_array.len()` is returned. An empty pattern matches every suffix,
/// the empty one included.
///
/// # Examples
///
/// ```
/// let text = b"banana";
/// let sa: Vec<u32> = sufsort::build(text, b'n')?;
///
/// assert_eq!(sufsort::search(text, &sa, b"ana", None), 2..4);
/// assert_eq!(sufsort::search(text, &sa, b"xyz", None), 7..7);
/// assert_eq!(sufsort::search(text, &sa, b"", None), 0..7);
/// # Ok::<(), sufsort::ConfigError>(())
/// ```
#[must_use]
pub fn search<S, I>(
    corpus: &[S],
    suffix_array: &[I],
    pattern: &[S],
    ranges: Option<&LcpLr<I>>,
) -> Range<usize>
where
    S: Symbol,
    I: Index,
{
    match ranges {
        Some(ranges) => search_lcp_lr(corpus, suffix_array, pattern, ranges),
        None => search_binary(corpus, suffix_array, pattern),
    }
}

/// Finds the matching range by binary search over whole suffixes.
///
/// This runs in *O*(*m* \* log(*n*) + *k*) time, where `m` is `pattern.len()` and `k` is the
/// number of matches.
#[must_use]
pub fn search_binary<S, I>(corpus: &[S], suffix_array: &[I], pattern: &[S]) -> Range<usize>
where
    S: Symbol,
    I: Index,
{
    if pattern.is_empty() {
        return 0..suffix_array.len();
    }

    let starts_with = |i: usize| corpus[suffix_array[i].to_offset()..].starts_with(pattern);

    let first = suffix_array.partition_point(|&offset| {
        compare_prefix(&corpus[offset.to_offset()..], pattern) == Ordering::Less
    });
    if first == suffix_array.len() || !starts_with(first) {
        return not_found(suffix_array);
    }

    let mut last = first + 1;
    while last < suffix_array.len() && starts_with(last) {
        last += 1;
    }

    first..last
}

/// Finds the matching range using LCP-LR range tables.
///
/// Symbols already known to match are never compared again, and as soon as one full match is
/// found the whole range is read from `ranges` instead of being searched for. This runs in
/// *O*(*m* + log(*n*)) time.
///
/// # Panics
///
/// Panics if `ranges` doesn't cover every suffix array position.
#[must_use]
pub fn search_lcp_lr<S, I>(
    corpus: &[S],
    suffix_array: &[I],
    pattern: &[S],
    ranges: &LcpLr<I>,
) -> Range<usize>
where
    S: Symbol,
    I: Index,
{
    assert_eq!(
        ranges.len(),
        suffix_array.len(),
        "range tables must cover every suffix array position",
    );

    if pattern.is_empty() {
        return 0..suffix_array.len();
    }

    // Every suffix in `lo..hi` starts with `pattern[..depth]`
    let (mut lo, mut hi) = (0, suffix_array.len());
    let mut depth = 0;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let suffix = &corpus[suffix_array[mid].to_offset()..];

        let matched = depth
            + suffix
                .get(depth..)
                .map_or(0, |rest| common_prefix(rest, &pattern[depth..]));
        if matched == pattern.len() {
            return ranges.left_reach(mid, matched)..ranges.right_reach(mid, matched) + 1;
        }

        if matched > depth {
            lo = lo.max(ranges.left_reach(mid, matched));
            hi = hi.min(ranges.right_reach(mid, matched) + 1);
            depth = matched;
        }

        // An exhausted suffix is a proper prefix of the pattern and sorts before it
        if suffix.get(matched).is_none_or(|symbol| *symbol < pattern[matched]) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    not_found(suffix_array)
}

#[inline]
fn not_found<I>(suffix_array: &[I]) -> Range<usize> {
    suffix_array.len()..suffix_array.len()
}

/// Compares `suffix`, truncated to the length of `pattern`, with `pattern`.
#[inline]
fn compare_prefix<S: Symbol>(suffix: &[S], pattern: &[S]) -> Ordering {
    suffix.iter().take(pattern.len()).cmp(pattern.iter())
}

#[inline]
fn common_prefix<S: Symbol>(a: &[S], b: &[S]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(text: &[u8]) -> (Vec<u32>, LcpLr<u32>) {
        let sa: Vec<u32> = crate::build(text, u8::MAX).unwrap();
        let ranges = crate::build_lcp_lr(&sa, &crate::build_lcp(text, &sa));
        (sa, ranges)
    }

    fn both(text: &[u8], pattern: &[u8]) -> Range<usize> {
        let (sa, ranges) = index(text);
        let binary = search_binary(text, &sa, pattern);
        let guided = search_lcp_lr(text, &sa, pattern, &ranges);
        assert_eq!(binary, guided, "{pattern:?} in {text:?}");
        binary
    }

    #[test]
    fn banana_ana() {
        assert_eq!(both(b"banana", b"ana"), 2..4);
    }

    #[test]
    fn banana_single_symbols() {
        assert_eq!(both(b"banana", b"a"), 1..4);
        assert_eq!(both(b"banana", b"b"), 4..5);
        assert_eq!(both(b"banana", b"n"), 5..7);
    }

    #[test]
    fn whole_corpus() {
        assert_eq!(both(b"banana", b"banana"), 4..5);
    }

    #[test]
    fn empty_pattern_matches_everything() {
        assert_eq!(both(b"banana", b""), 0..7);
    }

    #[test]
    fn absent_patterns() {
        assert_eq!(both(b"banana", b"xyz"), 7..7);
        assert_eq!(both(b"banana", b"bananas"), 7..7);
        assert_eq!(both(b"banana", b"anb"), 7..7);
        assert_eq!(both(b"banana", b"0"), 7..7);
    }

    #[test]
    fn pattern_longer_than_suffixes() {
        assert_eq!(both(b"az", b"mnomnomnomnomnomnomno"), 3..3);
        assert_eq!(both(b"zz", b"mnomnomnomnomnomnomno"), 3..3);
        assert_eq!(both(b"aa", b"mnomnomnomnomnomnomno"), 3..3);
    }

    #[test]
    fn repeated_matches() {
        let text = b"zzzzabczzzzzabczzzzzz";
        let (sa, _) = index(text);
        let range = both(text, b"abc");
        let mut positions: Vec<u32> = sa[range].to_vec();
        positions.sort_unstable();

        assert_eq!(positions, [4, 12]);
    }

    #[test]
    fn dispatch() {
        let text = b"mississippi";
        let (sa, ranges) = index(text);

        assert_eq!(search(text, &sa, b"ssi", None), 10..12);
        assert_eq!(search(text, &sa, b"ssi", Some(&ranges)), 10..12);
    }

    #[test]
    fn foreign_tables_do_not_panic() {
        let text = b"abcdefgh";
        let (sa, _) = index(text);
        let (_, foreign) = index(b"hhhhhhhh");

        for pattern in [&b"deg"[..], b"h", b"abcdefghi", b"cd"] {
            let range = search_lcp_lr(text, &sa, pattern, &foreign);
            assert!(range.end <= sa.len(), "{pattern:?}: {range:?}");
        }
    }
}
