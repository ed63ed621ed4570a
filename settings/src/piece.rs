// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::{read_file, Format};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vis_core::{
    events::{Event, EventKind, Tie, VoiceSequence},
    time::{Offset, QuarterLength},
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieSettings {
    Start,
    Continue,
    Stop,
}
impl From<TieSettings> for Tie {
    fn from(value: TieSettings) -> Self {
        match value {
            TieSettings::Start => Tie::Start,
            TieSettings::Continue => Tie::Continue,
            TieSettings::Stop => Tie::Stop,
        }
    }
}

/// One event, as written in a piece file:
///
/// ```yaml
/// - note: { offset: 0.0, pitch: C4, tie: start }
/// - rest: { offset: 1.0 }
/// - chord: { offset: 2.0, pitches: [C4, E4, G4] }
/// - other: { offset: 2.0, name: Fermata }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventSettings {
    Note {
        offset: QuarterLength,
        pitch: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tie: Option<TieSettings>,
    },
    Rest {
        offset: QuarterLength,
    },
    Chord {
        offset: QuarterLength,
        pitches: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tie: Option<TieSettings>,
    },
    Other {
        offset: QuarterLength,
        name: String,
    },
}
impl EventSettings {
    pub fn offset(&self) -> QuarterLength {
        match self {
            EventSettings::Note { offset, .. }
            | EventSettings::Rest { offset }
            | EventSettings::Chord { offset, .. }
            | EventSettings::Other { offset, .. } => *offset,
        }
    }

    pub fn into_event(&self) -> Event {
        let (kind, tie) = match self {
            EventSettings::Note { pitch, tie, .. } => (
                EventKind::Note {
                    pitch: pitch.clone(),
                },
                *tie,
            ),
            EventSettings::Rest { .. } => (EventKind::Rest, None),
            EventSettings::Chord { pitches, tie, .. } => (
                EventKind::Chord {
                    pitches: pitches.clone(),
                },
                *tie,
            ),
            EventSettings::Other { name, .. } => (EventKind::Other { name: name.clone() }, None),
        };
        let event = Event::new_with(Offset(self.offset()), kind);
        match tie {
            Some(tie) => event.with_tie(tie.into()),
            None => event,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PartSettings {
    /// The part's name as the score gives it. Missing, empty, or the
    /// placeholder "rename" all mean the score had no usable name.
    #[serde(default)]
    pub name: Option<String>,

    /// The part's events in score order.
    #[serde(default)]
    pub events: Vec<EventSettings>,
}

/// A piece as exported by a notation importer.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PieceSettings {
    /// The user-visible name of this piece
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composer: Option<String>,

    /// When the piece was composed or published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// If the piece belongs to a larger work, this movement's name and number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opus_number: Option<String>,

    /// Where this piece was loaded from. Only [PieceSettings::new_from_file]
    /// sets it.
    #[serde(skip)]
    pub pathname: Option<String>,

    /// Parts from highest to lowest
    #[serde(default)]
    pub parts: Vec<PartSettings>,
}
impl PieceSettings {
    pub const UNKNOWN_TITLE: &'static str = "Unknown Piece";
    const PLACEHOLDER_NAME: &'static str = "rename";

    pub fn new_from_yaml(yaml: &str) -> anyhow::Result<Self> {
        Format::Yaml.parse(yaml)
    }

    pub fn new_from_json5(json: &str) -> anyhow::Result<Self> {
        Format::Json5.parse(json)
    }

    /// Loads YAML or JSON5, picked by file extension. A piece without a title
    /// takes the file's name.
    pub fn new_from_file(path: &Path) -> anyhow::Result<Self> {
        let mut settings: Self = read_file(path)?;
        if settings.title.as_deref().map_or(true, str::is_empty) {
            settings.title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string);
        }
        settings.pathname = Some(path.display().to_string());
        Ok(settings)
    }

    pub fn title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => Self::UNKNOWN_TITLE,
        }
    }

    /// One name per part. Parts without a usable name become "Part 1",
    /// "Part 2", ... by position.
    pub fn part_names(&self) -> Vec<String> {
        self.parts
            .iter()
            .enumerate()
            .map(|(i, part)| match part.name.as_deref() {
                Some(name) if !name.is_empty() && name != Self::PLACEHOLDER_NAME => {
                    name.to_string()
                }
                _ => format!("Part {}", i + 1),
            })
            .collect()
    }

    /// The parts as the engine sees them, named per [PieceSettings::part_names].
    pub fn voices(&self) -> anyhow::Result<Vec<VoiceSequence>> {
        self.parts
            .iter()
            .zip(self.part_names())
            .map(|(part, name)| {
                let events = part.events.iter().map(EventSettings::into_event).collect();
                VoiceSequence::new_with_name(&name, events)
                    .with_context(|| format!("part \"{name}\" of \"{}\"", self.title()))
            })
            .collect()
    }
}
