// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! The CLI (command-line interface) tool indexes piece files and prints the
//! resulting tables.

use anyhow::Context;
use clap::Parser;
use std::{path::Path, time::Instant};
use vis::{app_version, Execution, IndexedPiece, MetadataField};
use vis_core::combinations::VoiceCombinations;
use vis_settings::{AnalysisSettings, PieceSettings};

#[derive(Parser, Debug, Default)]
#[clap(author, about, long_about = None)]
struct Args {
    /// Names of piece files to index. Can be YAML or JSON5.
    input: Vec<String>,

    /// Analysis settings file (YAML or JSON5)
    #[clap(short = 's', long, value_parser)]
    settings: Option<String>,

    /// Look at the piece every this many quarter lengths
    #[clap(short = 'o', long, value_parser)]
    offset_interval: Option<f64>,

    /// Run everything on the main thread
    #[clap(long, value_parser)]
    serial: bool,

    /// Size of the worker pool
    #[clap(short = 'w', long, value_parser)]
    workers: Option<usize>,

    /// Keep chords in one column instead of one column per pitch
    #[clap(long, value_parser)]
    no_unpack: bool,

    /// Print perf information
    #[clap(short = 'p', long, value_parser)]
    perf: bool,

    /// Enable debug mode
    #[clap(short = 'd', long, value_parser)]
    debug: bool,

    /// Print version and exit
    #[clap(short = 'v', long, value_parser)]
    version: bool,
}
impl Args {
    /// The settings file, if any, with command-line overrides applied.
    fn analysis_settings(&self) -> anyhow::Result<AnalysisSettings> {
        let mut settings = match &self.settings {
            Some(path) => AnalysisSettings::new_from_file(Path::new(path))?,
            None => AnalysisSettings::default(),
        };
        if self.offset_interval.is_some() {
            settings.offset_interval = self.offset_interval;
        }
        if self.serial {
            settings.execution.parallel = false;
        }
        if self.workers.is_some() {
            settings.execution.workers = self.workers;
        }
        if self.no_unpack {
            settings.unpack_chords = false;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.version {
        println!("vis-cli {}", app_version());
        return Ok(());
    }

    let default_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let settings = args.analysis_settings()?;
    log::debug!(
        "settings: {settings:?} ({:?})",
        Execution::from(&settings.execution)
    );

    for input_filename in args.input.iter() {
        if input_filename == "-" {
            // This is a separator for cases like
            //
            // `cargo run --bin vis-cli - x.yaml`
            continue;
        }
        let start_instant = Instant::now();
        let piece = PieceSettings::new_from_file(Path::new(input_filename))?;
        let mut piece = IndexedPiece::new_with(&piece, settings.clone())?;

        match piece.metadata(MetadataField::Composer) {
            Some(composer) => println!("# {} ({composer})", piece.title()),
            None => println!("# {}", piece.title()),
        }
        let data = piece
            .get_data()
            .with_context(|| format!("indexing {input_filename}"))?;
        print!("{data}");
        if settings.voice_combinations != VoiceCombinations::Whole {
            let tables = piece
                .get_combinations()
                .with_context(|| format!("indexing combinations of {input_filename}"))?;
            for table in tables.iter() {
                println!();
                print!("{table}");
            }
        }
        if args.perf {
            eprintln!("{input_filename}: {:.2?}", start_instant.elapsed());
        }
    }
    Ok(())
}
