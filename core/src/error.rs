// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::time::{Offset, QuarterLength};
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{indexer} requires {expected} input, but voice {position} is {found}")]
    InvalidInputShape {
        indexer: String,
        expected: &'static str,
        found: &'static str,
        position: usize,
    },

    #[error("event {position} is at offset {offset}, before the previous event at {previous}")]
    UnorderedOffsets {
        position: usize,
        offset: Offset,
        previous: Offset,
    },

    #[error("offset {0} is negative or not finite")]
    InvalidOffset(QuarterLength),

    #[error("impossible quarterLength: cannot fill a span of {span} (remainder {remainder})")]
    ImpossibleDuration {
        span: QuarterLength,
        remainder: QuarterLength,
    },

    #[error("offset interval must be positive and finite, not {0}")]
    InvalidStep(QuarterLength),

    #[error("a grid of {step} through offset {last} would need more than {limit} rows")]
    GridTooLarge {
        last: Offset,
        step: QuarterLength,
        limit: usize,
    },

    #[error("voice combination {combination:?} refers to voice {voice}, but the piece has {count} voices")]
    InvalidCombination {
        combination: Vec<usize>,
        voice: usize,
        count: usize,
    },

    #[error("can't parse voice combinations \"{0}\"")]
    UnparseableCombinations(String),

    #[error("unit {unit} failed: {message}")]
    WorkerFailed { unit: usize, message: String },

    #[error("couldn't start the worker pool: {0}")]
    WorkerPool(String),
}
