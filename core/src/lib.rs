// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! The alignment engine behind score indexing: voices in, offset-aligned
//! tables out.

/// The [align] module groups events that share an offset into slices.
pub mod align;
/// The [chords] module spreads chord symbols across parallel columns.
pub mod chords;
/// The [combinations] module says which groups of voices get analyzed.
pub mod combinations;
pub mod durations;
pub mod error;
/// The [events] module describes what a voice is made of.
pub mod events;
/// The [indexing] module turns voices into [series::Series].
pub mod indexing;
pub mod offsets;
pub mod quantize;
pub mod series;
/// The [table] module lines up several voices on one offset axis.
pub mod table;
/// The [time] module handles musical time.
pub mod time;
pub mod traits;
pub mod transform;

pub use error::{Error, Result};

/// Recommended imports for easy onboarding.
pub mod prelude {
    pub use super::{
        chords::unpack_chords,
        combinations::VoiceCombinations,
        error::{Error, Result},
        events::{Event, EventClass, EventKind, Tie, VoiceSequence},
        quantize::quantize_series,
        series::Series,
        table::{ColumnLabel, Table},
        time::{Offset, QuarterLength},
        transform::Symbol,
    };
}
