// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Persistent substring indices built on suffix arrays.
//!
//! An [`Index`] owns a corpus together with its suffix array and, optionally, the LCP-LR range
//! tables that speed up searching. Indices can be written to any byte stream and read back
//! later, so that a large corpus only has to be sorted once.
//!
//! # Examples
//!
//! Building an index and storing it:
//!
//! ```no_run
//! use std::fs::{self, File};
//! use infix::{Index, IndexConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let corpus = fs::read("corpus.txt")?;
//! let config = *IndexConfig::new().range_tables(true);
//! let index: Index = Index::build(corpus, u8::MAX, &config)?;
//!
//! let mut out = File::create("corpus.idx")?;
//! index.write(&mut out, &config)?;
//! # Ok(())
//! # }
//! ```
//!
//! Loading it again and searching:
//!
//! ```no_run
//! use std::{fs::File, io::BufReader};
//! use infix::Index;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut file = BufReader::new(File::open("corpus.idx")?);
//! let index: Index = Index::read(&mut file)?;
//!
//! for offset in index.positions(b"needle") {
//!     println!("found at {offset}");
//! }
//! # Ok(())
//! # }
//! ```

mod header;
mod index;
mod read;
mod write;

pub use index::{Index, IndexConfig};
pub use read::ReadError;
