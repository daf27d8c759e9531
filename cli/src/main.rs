// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    ops::Range,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use infix::{Index, IndexConfig};
use log::info;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build an index over a corpus file and write it to disk
    Build {
        corpus: PathBuf,
        /// Where to write the index
        #[arg(short, long, default_value = "SA_DATA")]
        out: PathBuf,
        /// Compress the written index
        #[arg(short, long)]
        compress: bool,
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Search a previously built index
    Find {
        index: PathBuf,
        pattern: String,
        #[command(flatten)]
        print: PrintArgs,
    },
    /// Build an index in memory and search it without writing it
    Search {
        corpus: PathBuf,
        pattern: String,
        #[command(flatten)]
        build: BuildArgs,
        #[command(flatten)]
        print: PrintArgs,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Build LCP-LR range tables for faster searches
    #[arg(short, long)]
    range_tables: bool,
    /// Drop newlines from the corpus before indexing
    #[arg(short, long)]
    filter_newlines: bool,
}

#[derive(Args)]
struct PrintArgs {
    /// Print up to this many symbols of context after each match
    #[arg(short, long)]
    width: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Command::Build {
            corpus,
            out,
            compress,
            build,
        } => {
            let config = *build.config().compress(compress);
            let index = build_index(&corpus, &build, &config)?;

            let mut out_file = BufWriter::new(
                File::create(&out)
                    .with_context(|| format!("Failed to create index file '{}'", out.display()))?,
            );
            index
                .write(&mut out_file, &config)
                .and_then(|()| out_file.flush())
                .context("I/O error occurred while writing index file")?;

            println!("Index written to {}", out.display());
        }
        Command::Find {
            index: path,
            pattern,
            print,
        } => {
            let file = File::open(&path)
                .with_context(|| format!("Failed to open index file '{}'", path.display()))?;
            let index: Index = Index::read(&mut BufReader::new(file))
                .with_context(|| format!("Failed to read index file '{}'", path.display()))?;

            report(&index, &pattern, &print).context("Failed to print results")?;
        }
        Command::Search {
            corpus,
            pattern,
            build,
            print,
        } => {
            let index = build_index(&corpus, &build, &build.config())?;

            report(&index, &pattern, &print).context("Failed to print results")?;
        }
    }

    info!("finished in {:.3}s", start.elapsed().as_secs_f64());

    Ok(())
}

impl BuildArgs {
    fn config(&self) -> IndexConfig {
        *IndexConfig::new().range_tables(self.range_tables)
    }
}

fn build_index(corpus: &Path, args: &BuildArgs, config: &IndexConfig) -> anyhow::Result<Index> {
    let mut data = fs::read(corpus)
        .with_context(|| format!("Failed to read corpus file '{}'", corpus.display()))?;
    if args.filter_newlines {
        data.retain(|&b| b != b'\n');
    }

    let index = Index::build(data, u8::MAX, config)
        .with_context(|| format!("Failed to index corpus file '{}'", corpus.display()))?;

    Ok(index)
}

fn report(index: &Index, pattern: &str, args: &PrintArgs) -> io::Result<()> {
    let range = index.find(pattern.as_bytes());
    let mut stdout = BufWriter::new(io::stdout().lock());

    if range.is_empty() {
        writeln!(stdout, "Pattern '{pattern}' not found")?;
    } else {
        writeln!(stdout, "Pattern '{pattern}':")?;
        print_range(&mut stdout, index, range, args.width)?;
    }

    stdout.flush()
}

fn print_range<W: Write>(
    out: &mut W,
    index: &Index,
    range: Range<usize>,
    width: Option<usize>,
) -> io::Result<()> {
    writeln!(out, "Suffix array range:\n\t({}, {})", range.start, range.end)?;
    writeln!(out, "Offsets:")?;

    let corpus = index.corpus();
    for &offset in &index.suffix_array()[range] {
        let offset = offset as usize;
        match width {
            Some(width) if width > 0 => {
                let end = corpus.len().min(offset.saturating_add(width));
                writeln!(out, "\t{offset} :\t{}", corpus[offset..end].escape_ascii())?;
            }
            _ => writeln!(out, "\t{offset}")?,
        }
    }

    Ok(())
}
