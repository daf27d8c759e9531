// Copyright 2023-2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use crate::domain::Index;

/// Per-position, per-depth reach of shared prefixes across a suffix array.
///
/// For suffix array position `i` and depth `d >= 1`, the left table holds the smallest position
/// whose suffix still shares a prefix of length `d` with the suffix at `i`, and the right table
/// holds the largest such position (inclusive). A shallower prefix always reaches at least as far
/// as a deeper one.
///
/// # Scaling
///
/// Both tables store one entry per position per shared depth, so they take *O*(*n* \* *a*) space
/// where *a* is the average LCP, and construction scans each run of positive LCP values once per
/// position inside it. Highly periodic corpora with long runs of large LCP values therefore cost
/// up to quadratic time and space. Use plain binary search for such corpora.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LcpLr<I> {
    left: ReachTable<I>,
    right: ReachTable<I>,
}

impl<I: Index> LcpLr<I> {
    /// Assembles range tables from their left and right halves.
    ///
    /// # Panics
    ///
    /// Panics if the tables don't have the same number of rows.
    #[must_use]
    pub fn from_tables(left: ReachTable<I>, right: ReachTable<I>) -> Self {
        assert_eq!(
            left.len(),
            right.len(),
            "left and right tables must have the same number of rows",
        );

        Self { left, right }
    }

    /// Returns the number of suffix array positions covered.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Returns `true` iff no positions are covered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the left reach table.
    #[must_use]
    pub fn left(&self) -> &ReachTable<I> {
        &self.left
    }

    /// Returns the right reach table.
    #[must_use]
    pub fn right(&self) -> &ReachTable<I> {
        &self.right
    }

    /// Returns the smallest position sharing a prefix of length `depth` with position `i`.
    ///
    /// Depths beyond the recorded ones reach only `i` itself.
    #[inline]
    #[must_use]
    pub fn left_reach(&self, i: usize, depth: usize) -> usize {
        self.left.reach(i, depth)
    }

    /// Returns the largest position sharing a prefix of length `depth` with position `i`.
    ///
    /// Depths beyond the recorded ones reach only `i` itself.
    #[inline]
    #[must_use]
    pub fn right_reach(&self, i: usize, depth: usize) -> usize {
        self.right.reach(i, depth)
    }
}

/// One direction of an [`LcpLr`], stored as rows packed into a single buffer.
///
/// Entry `d - 1` of row `i` is the reach of position `i` at depth `d`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReachTable<I> {
    starts: Vec<usize>,
    values: Vec<I>,
}

impl<I: Index> ReachTable<I> {
    fn new() -> Self {
        Self {
            starts: vec![0],
            values: Vec::new(),
        }
    }

    /// Creates a table from its rows.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: AsRef<[I]>,
    {
        let mut table = Self::new();
        for row in rows {
            table.push_row(row.as_ref());
        }
        table
    }

    fn push_row(&mut self, row: &[I]) {
        self.values.extend_from_slice(row);
        self.starts.push(self.values.len());
    }

    /// Returns the number of rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.starts.len() - 1
    }

    /// Returns `true` iff the table has no rows.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the total number of entries over all rows.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> usize {
        self.values.len()
    }

    /// Returns row `i`.
    #[inline]
    #[must_use]
    pub fn row(&self, i: usize) -> &[I] {
        &self.values[self.starts[i]..self.starts[i + 1]]
    }

    /// Returns an iterator over all rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[I]> + '_ {
        (0..self.len()).map(|i| self.row(i))
    }

    #[inline]
    fn reach(&self, i: usize, depth: usize) -> usize {
        debug_assert!(depth > 0, "reach is only defined for positive depths");
        self.row(i).get(depth - 1).map_or(i, |reach| reach.to_offset())
    }
}

/// Computes the LCP-LR range tables of a suffix array from its LCP array.
///
/// `lcp` must follow the layout of [`build_lcp()`](crate::build_lcp): one entry per suffix array
/// slot, entry `i` shared between positions `i - 1` and `i`. The left row of position `i` has
/// `lcp[i]` entries and its right row has `lcp[i + 1]` entries, so the empty suffix at position 0
/// and the right side of the last position have empty rows.
///
/// See [`LcpLr`] for the space and time this takes.
///
/// # Panics
///
/// Panics if `suffix_array` and `lcp` have different lengths.
///
/// # Examples
///
/// ```
/// let text = b"banana";
/// let sa: Vec<u32> = sufsort::build(text, b'n')?;
/// let ranges = sufsort::build_lcp_lr(&sa, &sufsort::build_lcp(text, &sa));
///
/// // "ana" at position 2 shares "a" with positions 1..=3 and "ana" with 2..=3
/// assert_eq!(ranges.left_reach(2, 1), 1);
/// assert_eq!(ranges.right_reach(2, 1), 3);
/// assert_eq!(ranges.right_reach(2, 3), 3);
/// # Ok::<(), sufsort::ConfigError>(())
/// ```
#[must_use]
pub fn build_lcp_lr<I: Index>(suffix_array: &[I], lcp: &[I]) -> LcpLr<I> {
    assert_eq!(
        suffix_array.len(),
        lcp.len(),
        "LCP array must have one entry per suffix array slot",
    );

    let mut left = ReachTable::new();
    let mut right = ReachTable::new();
    let mut row = Vec::new();
    for i in 0..lcp.len() {
        left_row(lcp, i, &mut row);
        left.push_row(&row);
        right_row(lcp, i, &mut row);
        right.push_row(&row);
    }

    LcpLr { left, right }
}

/// Fills `row` with the left reach of position `i` at depths `1..=lcp[i]`.
///
/// Scanning leftwards, the running minimum of the LCP values seen only shrinks. Each time it
/// shrinks, the depths above it are final at the current position.
fn left_row<I: Index>(lcp: &[I], i: usize, row: &mut Vec<I>) {
    let mut open = if i > 0 { lcp[i].to_offset() } else { 0 };
    row.clear();
    row.resize(open, I::NONE);

    // Position `j` is known to share the first `open` symbols with `i`
    let mut j = i;
    while open > 0 {
        let shared = if j > 0 { lcp[j].to_offset().min(open) } else { 0 };
        for depth in shared + 1..=open {
            row[depth - 1] = I::from_offset(j);
        }
        open = shared;
        j = j.saturating_sub(1);
    }
}

/// Fills `row` with the right reach of position `i` at depths `1..=lcp[i + 1]`.
fn right_row<I: Index>(lcp: &[I], i: usize, row: &mut Vec<I>) {
    let shared_with_next = |j: usize| lcp.get(j + 1).map_or(0, |l| l.to_offset());

    let mut open = if i > 0 { shared_with_next(i) } else { 0 };
    row.clear();
    row.resize(open, I::NONE);

    let mut j = i;
    while open > 0 {
        let shared = shared_with_next(j).min(open);
        for depth in shared + 1..=open {
            row[depth - 1] = I::from_offset(j);
        }
        open = shared;
        j += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(text: &[u8]) -> (Vec<u32>, LcpLr<u32>) {
        let sa: Vec<u32> = crate::build(text, u8::MAX).unwrap();
        let lcp = crate::build_lcp(text, &sa);
        let ranges = build_lcp_lr(&sa, &lcp);
        (sa, ranges)
    }

    fn shared(text: &[u8], a: u32, b: u32) -> usize {
        let (a, b) = (&text[a as usize..], &text[b as usize..]);
        a.iter().zip(b).take_while(|(x, y)| x == y).count()
    }

    #[test]
    fn banana_rows() {
        let (_, ranges) = ranges(b"banana");

        // Positions: "", a, ana, anana, banana, na, nana
        assert!(ranges.left().row(0).is_empty());
        assert!(ranges.right().row(0).is_empty());
        assert!(ranges.left().row(1).is_empty());
        assert_eq!(ranges.right().row(1), [3]);
        assert_eq!(ranges.left().row(3), [1, 2, 2]);
        assert!(ranges.right().row(3).is_empty());
        assert_eq!(ranges.left().row(6), [5, 5]);
        assert!(ranges.right().row(6).is_empty());
    }

    #[test]
    fn reach_matches_definition() {
        for text in [
            &b"banana"[..],
            b"mississippi",
            b"aaaaaaa",
            b"abracadabra abracadabra",
        ] {
            let (sa, ranges) = ranges(text);
            for i in 1..sa.len() {
                let longest = text.len() - sa[i] as usize;
                for depth in 1..=longest {
                    let left = ranges.left_reach(i, depth);
                    let right = ranges.right_reach(i, depth);
                    assert!(left <= i && i <= right, "{text:?} {i} {depth}");
                    for k in left..=right {
                        assert!(shared(text, sa[i], sa[k]) >= depth, "{text:?} {i} {depth}");
                    }
                    if left > 0 {
                        assert!(shared(text, sa[i], sa[left - 1]) < depth);
                    }
                    if right + 1 < sa.len() {
                        assert!(shared(text, sa[i], sa[right + 1]) < depth);
                    }
                }
            }
        }
    }

    #[test]
    fn reach_is_antitone() {
        let (_, ranges) = ranges(b"abaababaabaababaababaabaababaabab");
        for i in 0..ranges.len() {
            assert!(ranges.left().row(i).windows(2).all(|w| w[0] <= w[1]));
            assert!(ranges.right().row(i).windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn rows_round_trip() {
        let (_, ranges) = ranges(b"mississippi");
        let left = ReachTable::from_rows(ranges.left().rows());
        let right = ReachTable::from_rows(ranges.right().rows());

        assert_eq!(LcpLr::from_tables(left, right), ranges);
    }
}
