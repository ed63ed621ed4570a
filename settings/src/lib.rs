// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! The `vis-settings` crate manages serialization. Score files arrive from
//! notation software in many shapes; the structs here define the one shape
//! this project reads, and convert it into the engine's
//! [VoiceSequence](vis_core::events::VoiceSequence)s. Keeping the file format
//! separate from the engine types lets either change without breaking the
//! other.

pub use analysis::{AnalysisSettings, ExecutionSettings};
pub use piece::{EventSettings, PartSettings, PieceSettings, TieSettings};

pub(crate) mod analysis;
pub(crate) mod piece;

use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

/// The file formats a settings file can be written in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display, strum_macros::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    Yaml,
    Json5,
}
impl Format {
    /// Guesses the format from a file extension. Anything unfamiliar is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") | Some("json5") => Format::Json5,
            _ => Format::Yaml,
        }
    }

    pub(crate) fn parse<T: DeserializeOwned>(&self, contents: &str) -> anyhow::Result<T> {
        Ok(match self {
            Format::Yaml => serde_yaml::from_str(contents)?,
            Format::Json5 => json5::from_str(contents)?,
        })
    }
}

pub(crate) fn read_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("couldn't read {}", path.display()))?;
    let format = Format::from_path(path);
    format
        .parse(&contents)
        .with_context(|| format!("couldn't parse {} as {format}", path.display()))
}
