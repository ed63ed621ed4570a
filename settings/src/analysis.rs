// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::{read_file, Format};
use anyhow::ensure;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vis_core::{combinations::VoiceCombinations, time::QuarterLength};

/// How to spread units of work across threads.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExecutionSettings {
    /// Run units on a worker pool rather than one after another.
    #[serde(default = "ExecutionSettings::default_parallel")]
    pub parallel: bool,

    /// Pool size. Defaults to one worker per CPU.
    #[serde(default)]
    pub workers: Option<usize>,
}
impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            parallel: Self::default_parallel(),
            workers: None,
        }
    }
}
impl ExecutionSettings {
    fn default_parallel() -> bool {
        true
    }
}

/// What to compute for each piece.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AnalysisSettings {
    /// If set, resample the note/rest table every this many quarter lengths.
    #[serde(default)]
    pub offset_interval: Option<QuarterLength>,

    /// Which groups of voices make up the units of work, e.g. "[all,bs]".
    #[serde(default)]
    pub voice_combinations: VoiceCombinations,

    #[serde(default)]
    pub execution: ExecutionSettings,

    /// Spread chords into one column per pitch.
    #[serde(default = "AnalysisSettings::default_true")]
    pub unpack_chords: bool,

    /// Skip notes that only continue an earlier tied note.
    #[serde(default = "AnalysisSettings::default_true")]
    pub drop_tied: bool,
}
impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            offset_interval: None,
            voice_combinations: VoiceCombinations::default(),
            execution: ExecutionSettings::default(),
            unpack_chords: true,
            drop_tied: true,
        }
    }
}
impl AnalysisSettings {
    fn default_true() -> bool {
        true
    }

    pub fn new_from_yaml(yaml: &str) -> anyhow::Result<Self> {
        Self::checked(Format::Yaml.parse(yaml)?)
    }

    pub fn new_from_json5(json: &str) -> anyhow::Result<Self> {
        Self::checked(Format::Json5.parse(json)?)
    }

    /// Loads YAML or JSON5, picked by file extension.
    pub fn new_from_file(path: &Path) -> anyhow::Result<Self> {
        Self::checked(read_file(path)?)
    }

    fn checked(settings: Self) -> anyhow::Result<Self> {
        settings.validate()?;
        Ok(settings)
    }

    /// Catches values that would only fail later, deep inside an analysis.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(interval) = self.offset_interval {
            ensure!(
                interval.is_finite() && interval > 0.0,
                "offset-interval must be a positive number of quarter lengths, not {interval}"
            );
        }
        if let Some(workers) = self.execution.workers {
            ensure!(workers > 0, "execution.workers must be at least 1");
        }
        Ok(())
    }
}
