// Copyright 2023-2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use log::{debug, trace};

use crate::domain::{self, ConfigError, Index, Symbol, slot};

/// Computes the suffix array of `corpus` using the SA-IS algorithm.
///
/// The algorithm is implemented as described in the article Linear Suffix Array Construction by
/// Almost Pure Induced-Sorting by G. Nong, S. Zhang and W. H. Chan. It runs in *O*(*n*) time.
///
/// The returned array has `corpus.len() + 1` entries: the first is always `corpus.len()`, the
/// virtual empty suffix, which sorts before every other suffix. No sentinel has to be appended
/// to `corpus`.
///
/// Recursion into reduced problems is driven by an explicit stack of levels, so deeply
/// repetitive corpora cannot exhaust the call stack.
///
/// # Errors
///
/// Returns an error if `S` or `I` is signed, if `corpus` has fewer than 2 symbols, if `I` cannot
/// represent `corpus.len() + 1`, or if a symbol exceeds `max_symbol`.
///
/// # Examples
///
/// ```
/// let sa: Vec<u32> = sufsort::build(b"banana", b'n')?;
/// assert_eq!(sa, [6, 5, 3, 1, 0, 4, 2]);
/// # Ok::<(), sufsort::ConfigError>(())
/// ```
pub fn build<S: Symbol, I: Index>(corpus: &[S], max_symbol: S) -> Result<Vec<I>, ConfigError> {
    let (min, alphabet) = domain::check_all::<S, I>(corpus, max_symbol)?;

    Ok(sais(Symbols { data: corpus, min }, alphabet))
}

fn sais<T: Text, I: Index>(text: T, alphabet: usize) -> Vec<I> {
    let outer = Frame::<T, I>::new(text, alphabet);
    let mut reduction = outer.reduce();
    let mut stack: Vec<Frame<Names<I>, I>> = Vec::new();

    // Descend until every LMS substring has a unique name
    let mut order = loop {
        debug!(
            "SA-IS level {}: {} LMS substrings, {} distinct",
            stack.len(),
            reduction.names.len(),
            reduction.distinct,
        );
        if reduction.distinct == reduction.names.len() {
            break invert(&reduction.names);
        }

        let frame = Frame::new(Names(reduction.names), reduction.distinct);
        reduction = frame.reduce();
        stack.push(frame);
    };

    // Unwind, sorting each level's LMS suffixes with the order of the level below it
    while let Some(frame) = stack.pop() {
        trace!("SA-IS unwinding level {}", stack.len() + 1);
        order = frame.complete(&order[1..]);
    }

    outer.complete(&order[1..])
}

/// A sequence whose suffixes are being sorted at one level
trait Text {
    fn len(&self) -> usize;

    /// The dense bucket number of the element at `i`
    fn key(&self, i: usize) -> usize;
}

/// The caller's corpus, shifted so the smallest symbol lands in bucket 0
struct Symbols<'a, S> {
    data: &'a [S],
    min: usize,
}

impl<S: Symbol> Text for Symbols<'_, S> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn key(&self, i: usize) -> usize {
        self.data[i].rank() - self.min
    }
}

/// A reduced sequence of LMS substring names, already dense and 0-based
struct Names<I>(Vec<I>);

impl<I: Index> Text for Names<I> {
    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn key(&self, i: usize) -> usize {
        self.0[i].to_offset()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum CharType {
    L,
    S,
}

/// The state one level keeps while the levels below it are solved
struct Frame<T, I> {
    text: T,
    types: Vec<CharType>,
    /// LMS offsets in text order, excluding the virtual sentinel
    lms: Vec<I>,
    counts: Vec<I>,
}

struct Reduction<I> {
    /// Name of each LMS substring, in text order
    names: Vec<I>,
    distinct: usize,
}

impl<T: Text, I: Index> Frame<T, I> {
    fn new(text: T, alphabet: usize) -> Self {
        let types = classify(&text);
        let lms = (1..text.len())
            .filter(|&i| is_lms(&types, i))
            .map(I::from_offset)
            .collect();

        let mut counts = vec![0usize; alphabet];
        for i in 0..text.len() {
            counts[text.key(i)] += 1;
        }
        let counts = counts.into_iter().map(I::from_offset).collect();

        Self {
            text,
            types,
            lms,
            counts,
        }
    }

    /// Sorts the LMS substrings approximately and names them.
    fn reduce(&self) -> Reduction<I> {
        let len = self.text.len();

        // Guess: LMS offsets at the tails of their buckets, in text order
        let mut suffix_array = vec![I::NONE; len + 1];
        suffix_array[0] = I::from_offset(len);
        let mut tails = bucket_tails(&self.counts);
        for &i in &self.lms {
            let i = i.to_offset();
            let c = self.text.key(i);
            suffix_array[tails[c]] = I::from_offset(i);
            tails[c] -= 1;
        }
        self.induce(&mut suffix_array);

        // LMS substrings now appear in their exact relative order. Name them by first occurrence.
        let mut names = vec![I::NONE; len + 1];
        let mut distinct = 0;
        let mut prev = None;
        for &entry in &suffix_array[1..] {
            let Some(i) = slot(entry) else { continue };
            if !is_lms(&self.types, i) {
                continue;
            }
            if prev.is_none_or(|prev| !self.lms_substrings_equal(prev, i)) {
                distinct += 1;
            }
            names[i] = I::from_offset(distinct - 1);
            prev = Some(i);
        }

        Reduction {
            names: self.lms.iter().map(|&i| names[i.to_offset()]).collect(),
            distinct,
        }
    }

    /// Builds this level's suffix array from the sorted order of its LMS suffixes.
    ///
    /// `order` lists indices into `self.lms`, smallest suffix first.
    fn complete(&self, order: &[I]) -> Vec<I> {
        let len = self.text.len();
        debug_assert_eq!(order.len(), self.lms.len(), "order must cover every LMS suffix");

        let mut suffix_array = vec![I::NONE; len + 1];
        suffix_array[0] = I::from_offset(len);
        let mut tails = bucket_tails(&self.counts);
        for &k in order.iter().rev() {
            let i = self.lms[k.to_offset()].to_offset();
            let c = self.text.key(i);
            suffix_array[tails[c]] = I::from_offset(i);
            tails[c] -= 1;
        }
        self.induce(&mut suffix_array);

        suffix_array
    }

    /// Induces L-type suffixes front to back, then S-type suffixes back to front.
    fn induce(&self, suffix_array: &mut [I]) {
        let mut heads = bucket_heads(&self.counts);
        for k in 0..suffix_array.len() {
            if let Some(i) = slot(suffix_array[k]) {
                if i > 0 && self.types[i - 1] == CharType::L {
                    let c = self.text.key(i - 1);
                    suffix_array[heads[c]] = I::from_offset(i - 1);
                    heads[c] += 1;
                }
            }
        }

        let mut tails = bucket_tails(&self.counts);
        for k in (0..suffix_array.len()).rev() {
            if let Some(i) = slot(suffix_array[k]) {
                if i > 0 && self.types[i - 1] == CharType::S {
                    let c = self.text.key(i - 1);
                    suffix_array[tails[c]] = I::from_offset(i - 1);
                    tails[c] -= 1;
                }
            }
        }
    }

    /// Compares the LMS substrings starting at `a` and `b` symbol by symbol.
    ///
    /// A substring that runs into the virtual sentinel is unique.
    fn lms_substrings_equal(&self, a: usize, b: usize) -> bool {
        let len = self.text.len();
        let mut i = 0;
        loop {
            let (x, y) = (a + i, b + i);
            if x == len || y == len {
                return false;
            }
            if self.text.key(x) != self.text.key(y) || self.types[x] != self.types[y] {
                return false;
            }

            let x_end = i > 0 && is_lms(&self.types, x);
            let y_end = i > 0 && is_lms(&self.types, y);
            if x_end || y_end {
                return x_end && y_end;
            }

            i += 1;
        }
    }
}

/// Classifies every offset of `text`, plus the virtual sentinel at `text.len()`.
fn classify<T: Text>(text: &T) -> Vec<CharType> {
    let len = text.len();
    let mut types = vec![CharType::S; len + 1];
    if len == 0 {
        return types;
    }

    // The last real suffix is larger than the empty one
    types[len - 1] = CharType::L;
    for i in (0..len - 1).rev() {
        let (c, c1) = (text.key(i), text.key(i + 1));
        types[i] = if c < c1 || (c == c1 && types[i + 1] == CharType::S) {
            CharType::S
        } else {
            CharType::L
        };
    }

    types
}

#[inline]
fn is_lms(types: &[CharType], i: usize) -> bool {
    i > 0 && types[i] == CharType::S && types[i - 1] == CharType::L
}

// Slot 0 always holds the empty suffix, so buckets start at 1

fn bucket_heads<I: Index>(counts: &[I]) -> Vec<usize> {
    let mut sum = 1;
    counts
        .iter()
        .map(|count| {
            let head = sum;
            sum += count.to_offset();
            head
        })
        .collect()
}

fn bucket_tails<I: Index>(counts: &[I]) -> Vec<usize> {
    let mut sum = 0;
    counts
        .iter()
        .map(|count| {
            sum += count.to_offset();
            sum
        })
        .collect()
}

/// Inverts a sequence of unique names into the suffix array of that sequence.
fn invert<I: Index>(names: &[I]) -> Vec<I> {
    let mut suffix_array = vec![I::NONE; names.len() + 1];
    suffix_array[0] = I::from_offset(names.len());
    for (k, &name) in names.iter().enumerate() {
        suffix_array[name.to_offset() + 1] = I::from_offset(k);
    }

    suffix_array
}
