// Copyright (c) 2023 Mike Tsao. All rights reserved.

use super::{require_voices, Indexer, ScoreInput};
use crate::dispatch::{dispatch, Execution};
use log::debug;
use vis_core::{
    events::VoiceSequence,
    indexing::stream_indexer,
    table::{ColumnLabel, Table},
    transform::{note_rest_transform, Symbol, NOTE_REST_CLASSES},
    Result,
};

/// Names every note, rest, and chord of each voice: pitches with octave for
/// notes, "Rest" for rests, and the list of pitches for chords. Everything
/// else in a voice is ignored. The result has one column per voice.
#[derive(Debug)]
pub struct NoteRestIndexer {
    voices: Vec<VoiceSequence>,
    labels: Vec<String>,
    execution: Execution,
}
impl Indexer for NoteRestIndexer {
    type Output = Table<Symbol>;

    const NAME: &'static str = "NoteRestIndexer";

    fn run(&self) -> Result<Self::Output> {
        let combinations: Vec<Vec<usize>> = (0..self.voices.len()).map(|v| vec![v]).collect();
        debug!("{}: indexing {} voices", Self::NAME, self.voices.len());
        let series = dispatch(&self.voices, &combinations, self.execution, |voices| {
            Ok(stream_indexer(
                &voices,
                note_rest_transform,
                Some(&NOTE_REST_CLASSES),
            ))
        })?;
        let labels = self
            .labels
            .iter()
            .map(|voice| ColumnLabel::new_with(Self::NAME, voice))
            .collect();
        Ok(Table::from_labelled_series(labels, &series))
    }
}
impl NoteRestIndexer {
    /// Fails unless every voice of `input` is a raw voice.
    pub fn new(input: Vec<ScoreInput<Symbol>>) -> Result<Self> {
        Ok(Self::new_with_voices(require_voices(Self::NAME, input)?))
    }

    pub fn new_with_voices(voices: Vec<VoiceSequence>) -> Self {
        let labels = (0..voices.len()).map(|v| v.to_string()).collect();
        Self {
            voices,
            labels,
            execution: Execution::Serial,
        }
    }

    /// Labels columns with these voice names instead of 0, 1, 2, ...
    ///
    /// Panics unless there is one label per voice.
    pub fn with_voice_labels(mut self, labels: Vec<String>) -> Self {
        assert_eq!(labels.len(), self.voices.len(), "one label per voice");
        self.labels = labels;
        self
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }
}
