// Copyright 2023-2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Suffix arrays over integer alphabets, with LCP arrays and LCP-LR accelerated search.
//!
//! Suffix arrays are built in linear time with SA-IS. They hold one more entry than the corpus:
//! the empty suffix always sorts first, so no sentinel has to be appended to the data. Symbols
//! and indices can be any unsigned primitive integer type, chosen per corpus.
//!
//! # Examples
//!
//! Building an index and finding every occurrence of a pattern:
//!
//! ```
//! use sufsort::SuffixArray;
//!
//! let text = b"she sells sea shells by the sea shore";
//! let sa: SuffixArray = SuffixArray::new(text, u8::MAX)?.with_ranges();
//!
//! let mut offsets = sa.positions(b"sea").to_vec();
//! offsets.sort_unstable();
//! assert_eq!(offsets, [10, 28]);
//! # Ok::<(), sufsort::ConfigError>(())
//! ```
//!
//! Working with the arrays directly:
//!
//! ```
//! let text: Vec<u16> = vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5];
//! let sa: Vec<u32> = sufsort::build(&text, 9)?;
//! let lcp = sufsort::build_lcp(&text, &sa);
//! let ranges = sufsort::build_lcp_lr(&sa, &lcp);
//!
//! let found = sufsort::search(&text, &sa, &[5], Some(&ranges));
//! assert_eq!(found.len(), 3);
//! # Ok::<(), sufsort::ConfigError>(())
//! ```

pub mod domain;
mod lcp;
mod lcp_lr;
pub mod naive;
mod sais;
mod search;
mod suffix_array;

pub use domain::{
    ConfigError, Index, Symbol, alphabet_size, check_corpus_len, check_index_type,
    check_symbol_type, check_symbols,
};
pub use lcp::{build_lcp, inverse};
pub use lcp_lr::{LcpLr, ReachTable, build_lcp_lr};
pub use sais::build;
pub use search::{search, search_binary, search_lcp_lr};
pub use suffix_array::{ConsistencyError, SuffixArray, validate};
