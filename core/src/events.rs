// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::{
    error::Result,
    offsets::validate_offsets,
    time::{Offset, QuarterLength},
    traits::HasOffsets,
};
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// The broad category of an [Event]. Indexers use it to pick the events they
/// care about, the way a note/rest indexer ignores clefs and barlines.
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, IntoStaticStr, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum EventClass {
    Note,
    Rest,
    Chord,
    Other,
}

/// What happens at an [Event].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum EventKind {
    /// A single pitch, named with its octave, e.g., "C#4".
    Note { pitch: String },
    Rest,
    /// Several pitches sounding together in one voice, in score order.
    Chord { pitches: Vec<String> },
    /// Anything else the importer found (dynamics, clefs, ...).
    Other { name: String },
}
impl EventKind {
    pub fn class(&self) -> EventClass {
        match self {
            EventKind::Note { .. } => EventClass::Note,
            EventKind::Rest => EventClass::Rest,
            EventKind::Chord { .. } => EventClass::Chord,
            EventKind::Other { .. } => EventClass::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Tie {
    Start,
    Continue,
    Stop,
}

/// One musical occurrence in one voice.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    offset: Offset,
    kind: EventKind,
    tie: Option<Tie>,
}
impl Event {
    pub fn new_with(offset: Offset, kind: EventKind) -> Self {
        Self {
            offset,
            kind,
            tie: None,
        }
    }

    pub fn note(offset: QuarterLength, pitch: &str) -> Self {
        Self::new_with(
            Offset(offset),
            EventKind::Note {
                pitch: pitch.to_string(),
            },
        )
    }

    pub fn rest(offset: QuarterLength) -> Self {
        Self::new_with(Offset(offset), EventKind::Rest)
    }

    pub fn chord(offset: QuarterLength, pitches: &[&str]) -> Self {
        Self::new_with(
            Offset(offset),
            EventKind::Chord {
                pitches: pitches.iter().map(|p| p.to_string()).collect(),
            },
        )
    }

    pub fn other(offset: QuarterLength, name: &str) -> Self {
        Self::new_with(
            Offset(offset),
            EventKind::Other {
                name: name.to_string(),
            },
        )
    }

    pub fn with_tie(mut self, tie: Tie) -> Self {
        self.tie = Some(tie);
        self
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn class(&self) -> EventClass {
        self.kind.class()
    }

    pub fn tie(&self) -> Option<Tie> {
        self.tie
    }

    /// True if this event only prolongs one that started earlier.
    pub fn is_tie_continuation(&self) -> bool {
        matches!(self.tie, Some(Tie::Continue) | Some(Tie::Stop))
    }
}

/// The events of one part, in the order they appear in the score.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoiceSequence {
    name: Option<String>,
    events: Vec<Event>,
}
impl VoiceSequence {
    /// Fails unless every offset is usable and offsets never decrease.
    pub fn new(mut events: Vec<Event>) -> Result<Self> {
        validate_offsets(events.iter().map(Event::offset))?;
        // -0.0 becomes 0.0.
        for event in events.iter_mut() {
            event.offset.0 += 0.0;
        }
        Ok(Self { name: None, events })
    }

    pub fn new_with_name(name: &str, events: Vec<Event>) -> Result<Self> {
        let mut r = Self::new(events)?;
        r.name = Some(name.to_string());
        Ok(r)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The events that begin exactly at `offset`, in appearance order.
    pub fn events_at(&self, offset: Offset) -> &[Event] {
        let start = self.events.partition_point(|e| e.offset < offset);
        let end = start + self.events[start..].partition_point(|e| e.offset == offset);
        &self.events[start..end]
    }

    /// A copy holding only events of the given classes.
    pub fn filtered(&self, classes: &[EventClass]) -> Self {
        Self {
            name: self.name.clone(),
            events: self
                .events
                .iter()
                .filter(|e| classes.contains(&e.class()))
                .cloned()
                .collect(),
        }
    }

    /// A copy without the events that merely continue a tied note.
    pub fn without_tie_continuations(&self) -> Self {
        Self {
            name: self.name.clone(),
            events: self
                .events
                .iter()
                .filter(|e| !e.is_tie_continuation())
                .cloned()
                .collect(),
        }
    }
}
impl HasOffsets for VoiceSequence {
    fn offsets<'a>(&'a self) -> Box<dyn Iterator<Item = Offset> + 'a> {
        Box::new(self.events.iter().map(|e| e.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use strum::IntoEnumIterator;

    #[test]
    fn voice_sequence_rejects_decreasing_offsets() {
        let r = VoiceSequence::new(vec![
            Event::note(0.0, "C4"),
            Event::note(1.0, "D4"),
            Event::note(0.5, "E4"),
        ]);
        match r {
            Err(Error::UnorderedOffsets { position, .. }) => assert_eq!(position, 2),
            other => panic!("expected UnorderedOffsets, got {:?}", other),
        }
    }

    #[test]
    fn voice_sequence_rejects_negative_offsets() {
        assert!(matches!(
            VoiceSequence::new(vec![Event::rest(-1.0)]),
            Err(Error::InvalidOffset(_))
        ));
        assert!(matches!(
            VoiceSequence::new(vec![Event::rest(f64::NAN)]),
            Err(Error::InvalidOffset(_))
        ));
    }

    #[test]
    fn negative_zero_starts_with_zero() {
        let voice = VoiceSequence::new(vec![Event::note(0.0, "C4"), Event::note(-0.0, "E4")])
            .unwrap();
        assert!(voice.events()[1].offset().value().is_sign_positive());
        assert_eq!(voice.events_at(Offset::ZERO).len(), 2);
    }

    #[test]
    fn voice_sequence_allows_simultaneities() {
        let voice = VoiceSequence::new(vec![
            Event::note(0.0, "C4"),
            Event::note(0.5, "D4"),
            Event::note(0.5, "E4"),
            Event::rest(1.0),
        ])
        .unwrap();
        let at_half = voice.events_at(Offset(0.5));
        assert_eq!(at_half.len(), 2);
        assert_eq!(at_half[0], Event::note(0.5, "D4"));
        assert_eq!(at_half[1], Event::note(0.5, "E4"));
        assert!(voice.events_at(Offset(0.75)).is_empty());
        assert!(voice.events_at(Offset(7.0)).is_empty());
        assert_eq!(voice.last_offset(), Some(Offset(1.0)));
    }

    #[test]
    fn filtering_by_class() {
        let voice = VoiceSequence::new_with_name(
            "Soprano",
            vec![
                Event::other(0.0, "TrebleClef"),
                Event::note(0.0, "C4"),
                Event::chord(1.0, &["C4", "E4"]),
                Event::rest(2.0),
            ],
        )
        .unwrap();
        let filtered = voice.filtered(&[EventClass::Note, EventClass::Rest, EventClass::Chord]);
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered.name(), Some("Soprano"));
        assert!(filtered.events().iter().all(|e| e.class() != EventClass::Other));

        let everything: Vec<EventClass> = EventClass::iter().collect();
        assert_eq!(voice.filtered(&everything), voice);
    }

    #[test]
    fn tie_continuations_are_dropped() {
        let voice = VoiceSequence::new(vec![
            Event::note(0.0, "G4").with_tie(Tie::Start),
            Event::note(1.0, "G4").with_tie(Tie::Continue),
            Event::note(2.0, "G4").with_tie(Tie::Stop),
            Event::note(3.0, "A4"),
        ])
        .unwrap();
        let untied = voice.without_tie_continuations();
        assert_eq!(untied.len(), 2);
        assert_eq!(untied.events()[0].tie(), Some(Tie::Start));
        assert_eq!(untied.events()[1].offset(), Offset(3.0));
    }
}
