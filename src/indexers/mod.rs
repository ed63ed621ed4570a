// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! Indexers turn a batch of voices into a [Table](vis_core::table::Table).
//! Each indexer takes one kind of input: either the raw events of each voice,
//! or an index that an earlier indexer produced.

pub use noterest::NoteRestIndexer;
pub use offset::FilterByOffsetIndexer;

mod noterest;
mod offset;

use strum_macros::IntoStaticStr;
use vis_core::{
    events::VoiceSequence,
    series::Series,
    Error, Result,
};

/// One voice of an indexer's input batch.
#[derive(Clone, Debug, IntoStaticStr, PartialEq)]
pub enum ScoreInput<T> {
    #[strum(serialize = "raw voice")]
    Voice(VoiceSequence),
    #[strum(serialize = "indexed series")]
    Indexed(Series<T>),
}
impl<T> ScoreInput<T> {
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// Something that indexes a whole batch at once.
pub trait Indexer {
    type Output;

    /// The name that labels this indexer's columns.
    const NAME: &'static str;

    fn run(&self) -> Result<Self::Output>;
}

/// Takes the raw voices out of `input`, failing at the first voice that isn't
/// one.
pub(crate) fn require_voices<T>(
    indexer: &str,
    input: Vec<ScoreInput<T>>,
) -> Result<Vec<VoiceSequence>> {
    input
        .into_iter()
        .enumerate()
        .map(|(position, part)| match part {
            ScoreInput::Voice(voice) => Ok(voice),
            other => Err(shape_error(indexer, "raw voice", &other, position)),
        })
        .collect()
}

/// Takes the indexed series out of `input`, failing at the first voice that
/// isn't one or whose offsets are unusable.
pub(crate) fn require_series<T>(indexer: &str, input: Vec<ScoreInput<T>>) -> Result<Vec<Series<T>>> {
    input
        .into_iter()
        .enumerate()
        .map(|(position, part)| match part {
            ScoreInput::Indexed(series) => {
                series.validate()?;
                Ok(series)
            }
            other => Err(shape_error(indexer, "indexed series", &other, position)),
        })
        .collect()
}

fn shape_error<T>(
    indexer: &str,
    expected: &'static str,
    found: &ScoreInput<T>,
    position: usize,
) -> Error {
    Error::InvalidInputShape {
        indexer: indexer.to_string(),
        expected,
        found: found.kind(),
        position,
    }
}
