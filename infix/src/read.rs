// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, Read},
    mem,
};

use byteorder::{LittleEndian, ReadBytesExt};
use integer_encoding::VarIntReader;
use log::debug;
use sufsort::{ConsistencyError, Index as Offset, LcpLr, ReachTable, Symbol};
use zstd::Decoder;

use crate::{
    Index,
    header::{FLAG_COMPRESSED, FLAG_RANGES, MAGIC, VERSION},
};

/// Upper bound on speculative allocations driven by lengths read from the stream
const MAX_PREALLOCATION: usize = 1 << 20;

/// An error indicating that reading an index failed.
///
/// # Examples
///
/// ```
/// use infix::{Index, ReadError};
///
/// // Garbage data
/// let data = [0u8; 16];
/// let index = Index::<u8, u32>::read(&mut &data[..]);
///
/// assert!(matches!(index, Err(ReadError::BadMagic(_))));
/// ```
#[derive(Debug)]
pub enum ReadError {
    /// An I/O error occurred
    Io(io::Error),
    /// The index magic is invalid
    BadMagic(u32),
    /// The index version is unsupported
    UnsupportedVersion(u32),
    /// The index sets flags this version doesn't know
    UnknownFlags(u8),
    /// The index was written with different symbol or index types
    WidthMismatch {
        /// Symbol and index widths in bytes of the requested types
        expected: (u8, u8),
        /// Symbol and index widths in bytes found in the index
        found: (u8, u8),
    },
    /// A stored value doesn't fit the type it is read into
    ValueOutOfRange(u64),
    /// The stored suffix array or range tables don't belong to the stored corpus
    Inconsistent(ConsistencyError),
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "I/O error: {e}"),
            ReadError::BadMagic(magic) => {
                write!(f, "bad magic: expected {MAGIC:x}, found {magic:x}")
            }
            ReadError::UnsupportedVersion(version) => {
                write!(
                    f,
                    "unsupported version: found {version}, supported versions are [{VERSION}]",
                )
            }
            ReadError::UnknownFlags(flags) => write!(f, "unknown flags: {flags:#010b}"),
            ReadError::WidthMismatch { expected, found } => write!(
                f,
                "width mismatch: expected {}-byte symbols and {}-byte indices, found {} and {}",
                expected.0, expected.1, found.0, found.1,
            ),
            ReadError::ValueOutOfRange(value) => write!(f, "value {value} is out of range"),
            ReadError::Inconsistent(e) => write!(f, "inconsistent index: {e}"),
        }
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            ReadError::Inconsistent(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(value: io::Error) -> Self {
        ReadError::Io(value)
    }
}

impl From<ConsistencyError> for ReadError {
    fn from(value: ConsistencyError) -> Self {
        ReadError::Inconsistent(value)
    }
}

pub(crate) fn read<S, I, R>(input: &mut R) -> Result<Index<S, I>, ReadError>
where
    S: Symbol,
    I: Offset,
    R: Read + ?Sized,
{
    let magic = input.read_u32::<LittleEndian>()?;
    if magic != MAGIC {
        return Err(ReadError::BadMagic(magic));
    }

    let version = input.read_u32::<LittleEndian>()?;
    if version != VERSION {
        return Err(ReadError::UnsupportedVersion(version));
    }

    let flags = input.read_u8()?;
    if flags & !(FLAG_COMPRESSED | FLAG_RANGES) != 0 {
        return Err(ReadError::UnknownFlags(flags));
    }

    let expected = (width::<S>(), width::<I>());
    let found = (input.read_u8()?, input.read_u8()?);
    if found != expected {
        return Err(ReadError::WidthMismatch { expected, found });
    }

    let with_ranges = flags & FLAG_RANGES != 0;
    let (corpus, suffix_array, ranges) = if flags & FLAG_COMPRESSED != 0 {
        read_body(Decoder::new(input)?, with_ranges)?
    } else {
        read_body(input, with_ranges)?
    };
    debug!("read index of {} symbols (flags {flags:#04b})", corpus.len());

    Ok(Index::from_parts(corpus, suffix_array, ranges)?)
}

type Parts<S, I> = (Vec<S>, Vec<I>, Option<LcpLr<I>>);

fn read_body<S, I, R>(mut input: R, with_ranges: bool) -> Result<Parts<S, I>, ReadError>
where
    S: Symbol,
    I: Offset,
    R: Read,
{
    let len: usize = input.read_varint()?;
    let entries = len.checked_add(1).ok_or(ReadError::ValueOutOfRange(len as u64))?;

    let mut corpus = Vec::with_capacity(len.min(MAX_PREALLOCATION));
    for _ in 0..len {
        corpus.push(read_fixed::<S, _>(&mut input)?);
    }
    let mut suffix_array = Vec::with_capacity(entries.min(MAX_PREALLOCATION));
    for _ in 0..entries {
        suffix_array.push(read_fixed::<I, _>(&mut input)?);
    }

    let ranges = if with_ranges {
        let mut left = Vec::with_capacity(entries.min(MAX_PREALLOCATION));
        let mut right = Vec::with_capacity(entries.min(MAX_PREALLOCATION));
        for _ in 0..entries {
            left.push(read_row::<I, _>(&mut input)?);
            right.push(read_row::<I, _>(&mut input)?);
        }
        Some(LcpLr::from_tables(
            ReachTable::from_rows(left),
            ReachTable::from_rows(right),
        ))
    } else {
        None
    };

    Ok((corpus, suffix_array, ranges))
}

fn width<T>() -> u8 {
    // Widths above 8 bytes are rejected by the writer, so this never saturates for valid input
    u8::try_from(mem::size_of::<T>()).unwrap_or(u8::MAX)
}

fn read_fixed<T, R>(input: &mut R) -> Result<T, ReadError>
where
    T: Symbol,
    R: Read,
{
    let value = input.read_uint::<LittleEndian>(mem::size_of::<T>())?;
    convert(value)
}

fn read_row<I, R>(input: &mut R) -> Result<Vec<I>, ReadError>
where
    I: Offset,
    R: Read,
{
    let len: usize = input.read_varint()?;
    let mut row = Vec::with_capacity(len.min(MAX_PREALLOCATION));
    for _ in 0..len {
        let value: u64 = input.read_varint()?;
        row.push(convert(value)?);
    }

    Ok(row)
}

fn convert<T: Symbol>(value: u64) -> Result<T, ReadError> {
    usize::try_from(value)
        .ok()
        .and_then(|value| <T as TryFrom<usize>>::try_from(value).ok())
        .ok_or(ReadError::ValueOutOfRange(value))
}
