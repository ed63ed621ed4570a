// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! Transforms turn the events of a [Slice] into the values stored in an index.
//! A transform must be a pure function of its slice, because dispatch may run
//! it on any thread, in any order.

use crate::{
    align::Slice,
    events::{Event, EventClass, EventKind},
};
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The text a note/rest index stores for one event.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Symbol {
    /// A note's pitch with octave, or [Symbol::REST].
    Single(String),
    /// A chord's pitches. Kept together here; the chord unpacker spreads them
    /// into parallel columns later.
    Chord(Vec<String>),
}
impl Symbol {
    pub const REST: &'static str = "Rest";

    /// The one or more strings in this symbol, in order.
    pub fn parts(&self) -> &[String] {
        match self {
            Symbol::Single(s) => std::slice::from_ref(s),
            Symbol::Chord(pitches) => pitches,
        }
    }

    pub fn width(&self) -> usize {
        self.parts().len()
    }
}
impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Single(s) => write!(f, "{s}"),
            Symbol::Chord(pitches) => write!(f, "[{}]", pitches.join(", ")),
        }
    }
}

/// The event classes that [note_rest_symbol] knows how to name.
pub const NOTE_REST_CLASSES: [EventClass; 3] = [EventClass::Note, EventClass::Rest, EventClass::Chord];

/// Names an event the way the note/rest index does: a note becomes its pitch,
/// a rest becomes "Rest", and a chord becomes the list of its pitches. Other
/// events have no name.
pub fn note_rest_symbol(event: &Event) -> Option<Symbol> {
    match event.kind() {
        EventKind::Note { pitch } => Some(Symbol::Single(pitch.clone())),
        EventKind::Rest => Some(Symbol::Single(Symbol::REST.to_string())),
        EventKind::Chord { pitches } => Some(Symbol::Chord(pitches.clone())),
        EventKind::Other { .. } => None,
    }
}

/// The note/rest transform for single-voice slices. Slices with more than one
/// member take the first voice's event.
pub fn note_rest_transform(slice: &Slice<'_, Event>) -> Option<Symbol> {
    slice.events().next().and_then(note_rest_symbol)
}
