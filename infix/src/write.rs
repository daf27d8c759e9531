// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    io::{self, ErrorKind, Write},
    mem,
};

use byteorder::{LittleEndian, WriteBytesExt};
use integer_encoding::VarIntWriter;
use log::debug;
use sufsort::{Index as Offset, ReachTable, Symbol};
use zstd::Encoder;

use crate::{
    Index, IndexConfig,
    header::{FLAG_COMPRESSED, FLAG_RANGES, MAGIC, VERSION},
};

/// Largest symbol or index width that fits the fixed-width encoding
const MAX_WIDTH: usize = mem::size_of::<u64>();

pub(crate) fn write<S, I, W>(
    index: &Index<S, I>,
    out: &mut W,
    config: &IndexConfig,
) -> io::Result<()>
where
    S: Symbol,
    I: Offset,
    W: Write + ?Sized,
{
    let symbol_width = mem::size_of::<S>();
    let index_width = mem::size_of::<I>();
    if symbol_width > MAX_WIDTH || index_width > MAX_WIDTH {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            "symbol and index types must be at most 64 bits wide",
        ));
    }

    let mut flags = 0;
    if config.is_compressed() {
        flags |= FLAG_COMPRESSED;
    }
    if index.ranges().is_some() {
        flags |= FLAG_RANGES;
    }

    // Write the header
    out.write_u32::<LittleEndian>(MAGIC)?;
    out.write_u32::<LittleEndian>(VERSION)?;
    out.write_u8(flags)?;
    out.write_u8(symbol_width as u8)?;
    out.write_u8(index_width as u8)?;

    if config.is_compressed() {
        let mut encoder = Encoder::new(out, config.level())?;
        encoder.multithread(config.threads())?;
        write_body(index, &mut encoder)?;
        encoder.finish()?;
    } else {
        write_body(index, out)?;
    }
    debug!("wrote index of {} symbols (flags {flags:#04b})", index.corpus().len());

    Ok(())
}

fn write_body<S, I, W>(index: &Index<S, I>, mut out: W) -> io::Result<()>
where
    S: Symbol,
    I: Offset,
    W: Write,
{
    let symbol_width = mem::size_of::<S>();
    let index_width = mem::size_of::<I>();

    out.write_varint(index.corpus().len())?;
    for symbol in index.corpus() {
        out.write_uint::<LittleEndian>(symbol.as_u64(), symbol_width)?;
    }
    for offset in index.suffix_array() {
        out.write_uint::<LittleEndian>(offset.as_u64(), index_width)?;
    }

    if let Some(ranges) = index.ranges() {
        // Rows are interleaved so that a reader can stream them
        for i in 0..ranges.len() {
            write_row(ranges.left(), i, &mut out)?;
            write_row(ranges.right(), i, &mut out)?;
        }
    }

    Ok(())
}

fn write_row<I, W>(table: &ReachTable<I>, i: usize, out: &mut W) -> io::Result<()>
where
    I: Offset,
    W: Write,
{
    let row = table.row(i);
    out.write_varint(row.len())?;
    for reach in row {
        out.write_varint(reach.as_u64())?;
    }

    Ok(())
}
