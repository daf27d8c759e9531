// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) const MAGIC: u32 = 0x1d3f_5a9e;
pub(crate) const VERSION: u32 = 1;

pub(crate) const FLAG_COMPRESSED: u8 = 1 << 0;
pub(crate) const FLAG_RANGES: u8 = 1 << 1;
