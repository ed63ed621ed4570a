// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! One piece and everything computed about it so far.

use crate::{
    dispatch::{dispatch, Execution},
    indexers::{FilterByOffsetIndexer, Indexer, NoteRestIndexer},
};
use anyhow::Context;
use log::debug;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString};
use vis_core::{
    chords::unpack_chords,
    events::VoiceSequence,
    table::Table,
    transform::{Symbol, NOTE_REST_CLASSES},
    Result,
};
use vis_settings::{AnalysisSettings, PieceSettings};

/// A step of the per-piece pipeline whose result [IndexedPiece] keeps.
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    /// Each part reduced to its notes, rests, and chords.
    NoteRestObjects,
    NoteRest,
    OffsetFilter,
    /// The finished table that [IndexedPiece::get_data] returns.
    Unpacked,
    Combinations,
}

/// Facts about a piece that don't come from its notes.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "camelCase")]
pub enum MetadataField {
    Title,
    Composer,
    Date,
    MovementName,
    MovementNumber,
    OpusNumber,
    /// The file the piece came from.
    Pathname,
}

#[derive(Clone, Debug)]
enum StageResult {
    Voices(Arc<Vec<VoiceSequence>>),
    Symbols(Arc<Table<Symbol>>),
    Strings(Arc<Table<String>>),
    Tables(Arc<Vec<Table<String>>>),
}

/// Holds one piece's metadata and parts, runs the analysis pipeline on them,
/// and remembers each stage so that later requests reuse it.
///
/// The [AnalysisSettings] are fixed when the piece is created, so a stage's
/// result never goes stale.
#[derive(Debug)]
pub struct IndexedPiece {
    metadata: FxHashMap<MetadataField, String>,
    part_names: Vec<String>,
    voices: Vec<VoiceSequence>,
    settings: AnalysisSettings,
    cache: FxHashMap<Stage, StageResult>,
}
impl IndexedPiece {
    pub fn new_with(piece: &PieceSettings, settings: AnalysisSettings) -> anyhow::Result<Self> {
        let voices = piece
            .voices()
            .with_context(|| format!("couldn't read the parts of \"{}\"", piece.title()))?;
        let mut r = Self::new_from_voices(piece.title(), piece.part_names(), voices, settings);
        for (field, value) in [
            (MetadataField::Composer, &piece.composer),
            (MetadataField::Date, &piece.date),
            (MetadataField::MovementName, &piece.movement_name),
            (MetadataField::MovementNumber, &piece.movement_number),
            (MetadataField::OpusNumber, &piece.opus_number),
            (MetadataField::Pathname, &piece.pathname),
        ] {
            if let Some(value) = value {
                r.set_metadata(field, value);
            }
        }
        Ok(r)
    }

    /// Panics unless there is one part name per voice.
    pub fn new_from_voices(
        title: &str,
        part_names: Vec<String>,
        voices: Vec<VoiceSequence>,
        settings: AnalysisSettings,
    ) -> Self {
        assert_eq!(part_names.len(), voices.len(), "one name per part");
        let mut metadata = FxHashMap::default();
        metadata.insert(MetadataField::Title, title.to_string());
        Self {
            metadata,
            part_names,
            voices,
            settings,
            cache: FxHashMap::default(),
        }
    }

    pub fn title(&self) -> &str {
        self.metadata(MetadataField::Title)
            .unwrap_or(PieceSettings::UNKNOWN_TITLE)
    }

    /// None if the piece doesn't say.
    pub fn metadata(&self, field: MetadataField) -> Option<&str> {
        self.metadata.get(&field).map(String::as_str)
    }

    /// Analyses don't read metadata, so this leaves every stage in place.
    pub fn set_metadata(&mut self, field: MetadataField, value: &str) {
        self.metadata.insert(field, value.to_string());
    }

    pub fn part_names(&self) -> &[String] {
        &self.part_names
    }

    pub fn voices(&self) -> &[VoiceSequence] {
        &self.voices
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub fn is_cached(&self, stage: Stage) -> bool {
        self.cache.contains_key(&stage)
    }

    fn execution(&self) -> Execution {
        Execution::from(&self.settings.execution)
    }

    fn voice_labels(&self) -> Vec<String> {
        (0..self.voices.len()).map(|v| v.to_string()).collect()
    }

    /// Each part with everything but notes, rests, and chords removed, and
    /// without tie continuations unless the settings keep them.
    pub fn note_rest_objects(&mut self) -> Arc<Vec<VoiceSequence>> {
        if let Some(StageResult::Voices(voices)) = self.cache.get(&Stage::NoteRestObjects) {
            return Arc::clone(voices);
        }
        let drop_tied = self.settings.drop_tied;
        let voices: Arc<Vec<VoiceSequence>> = Arc::new(
            self.voices
                .iter()
                .map(|v| {
                    let v = v.filtered(&NOTE_REST_CLASSES);
                    if drop_tied {
                        v.without_tie_continuations()
                    } else {
                        v
                    }
                })
                .collect(),
        );
        self.cache
            .insert(Stage::NoteRestObjects, StageResult::Voices(Arc::clone(&voices)));
        voices
    }

    /// The note/rest table, one column per part.
    pub fn note_rest(&mut self) -> Result<Arc<Table<Symbol>>> {
        if let Some(StageResult::Symbols(table)) = self.cache.get(&Stage::NoteRest) {
            return Ok(Arc::clone(table));
        }
        debug!("{}: indexing notes and rests", self.title());
        let voices = self.note_rest_objects();
        let table = Arc::new(
            NoteRestIndexer::new_with_voices(voices.as_ref().clone())
                .with_voice_labels(self.voice_labels())
                .with_execution(self.execution())
                .run()?,
        );
        self.cache
            .insert(Stage::NoteRest, StageResult::Symbols(Arc::clone(&table)));
        Ok(table)
    }

    /// The note/rest table, resampled if the settings give an offset
    /// interval.
    pub fn offset_filter(&mut self) -> Result<Arc<Table<Symbol>>> {
        if let Some(StageResult::Symbols(table)) = self.cache.get(&Stage::OffsetFilter) {
            return Ok(Arc::clone(table));
        }
        let note_rest = self.note_rest()?;
        let table = match self.settings.offset_interval {
            Some(step) => {
                debug!("{}: filtering every {step} quarter lengths", self.title());
                Arc::new(FilterByOffsetIndexer::new_from_table(&*note_rest, step)?.run()?)
            }
            None => note_rest,
        };
        self.cache
            .insert(Stage::OffsetFilter, StageResult::Symbols(Arc::clone(&table)));
        Ok(table)
    }

    /// Runs the configured pipeline: note/rest indexing, then the offset
    /// filter if one is configured, then chord unpacking if enabled.
    pub fn get_data(&mut self) -> Result<Arc<Table<String>>> {
        if let Some(StageResult::Strings(table)) = self.cache.get(&Stage::Unpacked) {
            return Ok(Arc::clone(table));
        }
        let filtered = self.offset_filter()?;
        let table = Arc::new(finish(&filtered, self.settings.unpack_chords));
        self.cache
            .insert(Stage::Unpacked, StageResult::Strings(Arc::clone(&table)));
        Ok(table)
    }

    /// Runs the pipeline once per configured voice combination, each on only
    /// the voices it names, and returns one table per combination in
    /// combination order. Columns keep the voices' positions in the whole
    /// piece.
    pub fn get_combinations(&mut self) -> Result<Arc<Vec<Table<String>>>> {
        if let Some(StageResult::Tables(tables)) = self.cache.get(&Stage::Combinations) {
            return Ok(Arc::clone(tables));
        }
        let combinations = self.settings.voice_combinations.resolve(self.voices.len())?;
        debug!(
            "{}: {} combinations for {}",
            self.title(),
            combinations.len(),
            self.settings.voice_combinations
        );
        let voices: Vec<(String, VoiceSequence)> = self
            .voice_labels()
            .into_iter()
            .zip(self.note_rest_objects().iter().cloned())
            .collect();
        let step = self.settings.offset_interval;
        let unpack = self.settings.unpack_chords;
        let tables = Arc::new(dispatch(
            &voices,
            &combinations,
            self.execution(),
            |combination| {
                let (labels, voices): (Vec<String>, Vec<VoiceSequence>) =
                    combination.into_iter().unzip();
                let mut table = NoteRestIndexer::new_with_voices(voices)
                    .with_voice_labels(labels)
                    .run()?;
                if let Some(step) = step {
                    table = FilterByOffsetIndexer::new_from_table(&table, step)?.run()?;
                }
                Ok(finish(&table, unpack))
            },
        )?);
        self.cache
            .insert(Stage::Combinations, StageResult::Tables(Arc::clone(&tables)));
        Ok(tables)
    }
}

fn finish(table: &Table<Symbol>, unpack: bool) -> Table<String> {
    if unpack {
        unpack_chords(table)
    } else {
        table.map(Symbol::to_string)
    }
}
