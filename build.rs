// Copyright (c) 2023 Mike Tsao. All rights reserved.

use clap::{CommandFactory, Parser};

// TODO: this mirrors the Args of src/bin/vis-cli.rs by hand. Move Args into a
// shared module once build.rs can depend on the crate's own code.

#[derive(Parser, Debug, Default)]
#[command(name = "vis-cli", author, about, long_about = None)]
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

// https://unix.stackexchange.com/questions/3586/what-do-the-numbers-in-a-man-page-mean
// Picking category 1 as a "user command"
fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");
    let out_dir =
        std::path::PathBuf::from(std::env::var_os("OUT_DIR").ok_or(std::io::ErrorKind::NotFound)?);
    let man = clap_mangen::Man::new(Args::command());
    let mut buffer: Vec<u8> = Default::default();
    man.render(&mut buffer)?;
    std::fs::write(out_dir.join("vis-cli.1"), buffer)?;
    Ok(())
}
