// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

#![allow(missing_docs)]

use std::{
    error::Error,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use blake3::Hasher;
use infix::{Index, IndexConfig};

const CORPUS: &[u8] = b"It was the best of times, it was the worst of times,
it was the age of wisdom, it was the age of foolishness,
it was the epoch of belief, it was the epoch of incredulity,
it was the season of Light, it was the season of Darkness,
it was the spring of hope, it was the winter of despair.";

fn hash_file(path: &Path) -> io::Result<blake3::Hash> {
    let mut hasher = Hasher::new();
    io::copy(&mut File::open(path)?, &mut hasher)?;
    Ok(hasher.finalize())
}

fn configs() -> Vec<IndexConfig> {
    let mut configs = Vec::new();
    for compress in [false, true] {
        for range_tables in [false, true] {
            configs.push(*IndexConfig::new().compress(compress).range_tables(range_tables));
        }
    }
    configs
}

#[test]
fn file_round_trip() -> Result<(), Box<dyn Error>> {
    let workspace_dir = Path::new(env!("CARGO_TARGET_TMPDIR"));

    for (i, config) in configs().iter().enumerate() {
        let original: Index = Index::build(CORPUS.to_vec(), u8::MAX, config)?;
        let path = workspace_dir.join(format!("round-trip-{i}.idx"));

        // Write the index to disk
        {
            let mut out = BufWriter::new(File::create(&path)?);
            original.write(&mut out, config)?;
            out.flush()?;
        }

        // Read it back and query it
        let mut file = BufReader::new(File::open(&path)?);
        let reloaded: Index = Index::read(&mut file)?;

        assert_eq!(reloaded, original, "{config:?}");
        assert_eq!(reloaded.find(b"it was"), original.find(b"it was"));
        assert_eq!(reloaded.positions(b"epoch").len(), 2);
        assert!(!reloaded.contains(b"age of reason"));
    }

    Ok(())
}

#[test]
fn rewrite_is_byte_identical() -> Result<(), Box<dyn Error>> {
    let workspace_dir = Path::new(env!("CARGO_TARGET_TMPDIR"));
    let config = *IndexConfig::new().range_tables(true).compression_threads(0);

    let first_path = workspace_dir.join("rewrite-first.idx");
    let second_path = workspace_dir.join("rewrite-second.idx");

    let index: Index = Index::build(CORPUS.to_vec(), u8::MAX, &config)?;
    index.write(&mut File::create(&first_path)?, &config)?;

    let reloaded: Index = Index::read(&mut BufReader::new(File::open(&first_path)?))?;
    reloaded.write(&mut File::create(&second_path)?, &config)?;

    assert_eq!(hash_file(&first_path)?, hash_file(&second_path)?);

    Ok(())
}

#[test]
fn wide_types() -> Result<(), Box<dyn Error>> {
    let corpus: Vec<u16> = CORPUS.iter().map(|&b| u16::from(b) * 251).collect();
    let max = corpus.iter().copied().max().unwrap_or(0);
    let config = *IndexConfig::new().range_tables(true);

    let original = Index::<u16, u64>::build(corpus, max, &config)?;
    let mut data = Vec::new();
    original.write(&mut data, &config)?;
    let reloaded = Index::<u16, u64>::read(&mut data.as_slice())?;

    assert_eq!(reloaded, original);
    let pattern: Vec<u16> = b"season".iter().map(|&b| u16::from(b) * 251).collect();
    assert_eq!(reloaded.positions(&pattern).len(), 2);

    Ok(())
}
