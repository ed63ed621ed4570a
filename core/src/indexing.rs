// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::{
    align::{align_simultaneities, Slice},
    events::{Event, EventClass, VoiceSequence},
    offsets::unique_offsets,
    series::Series,
};

/// Indexes one combination of raw voices.
///
/// Every offset at which any voice has an event becomes an entry (or several
/// entries, if a voice has simultaneous events there; see
/// [align_simultaneities]). `transform` names each [Slice]; returning None
/// leaves that slice out of the index. If `classes` is given, events of other
/// classes are dropped before anything else happens.
///
/// ```text
/// offset:  0.0  |  0.5     |  1.0        |  1.5
/// voice 0: [1]  |  [1][2]  |  [1][2][3]  |  [1]
/// voice 1: [1]  |  [1][2]  |  [1][2]     |  [1]
/// ```
///
/// produces one entry at 0.0, two at 0.5, three at 1.0 and one at 1.5.
pub fn stream_indexer<T, F>(
    voices: &[VoiceSequence],
    transform: F,
    classes: Option<&[EventClass]>,
) -> Series<T>
where
    F: Fn(&Slice<'_, Event>) -> Option<T>,
{
    let filtered: Vec<VoiceSequence> = match classes {
        Some(classes) => voices.iter().map(|v| v.filtered(classes)).collect(),
        None => voices.to_vec(),
    };

    let mut series = Series::new();
    for offset in unique_offsets(&filtered) {
        let per_voice: Vec<&[Event]> = filtered.iter().map(|v| v.events_at(offset)).collect();
        for slice in align_simultaneities(&per_voice) {
            if let Some(value) = transform(&slice) {
                series.push(offset, value);
            }
        }
    }
    series
}

/// Indexes one combination of already-indexed voices.
///
/// The voices are forward-filled onto their unified offsets, then `transform`
/// sees one row per offset: each voice's value in effect at that offset, or
/// None for a voice that hasn't started yet. Returning None leaves the row out.
pub fn series_indexer<T, U, F>(parts: &[Series<T>], transform: F) -> Series<U>
where
    F: Fn(&[Option<&T>]) -> Option<U>,
{
    let mut series = Series::new();
    for offset in unique_offsets(parts) {
        let row: Vec<Option<&T>> = parts.iter().map(|p| p.value_at(offset)).collect();
        if let Some(value) = transform(&row) {
            series.push(offset, value);
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        series::tests::letters,
        time::Offset,
        transform::{note_rest_transform, Symbol, NOTE_REST_CLASSES},
    };

    fn names(slice: &Slice<'_, Event>) -> Option<String> {
        Some(
            slice
                .events()
                .map(|e| match e.kind() {
                    crate::events::EventKind::Note { pitch } => pitch.clone(),
                    _ => "-".to_string(),
                })
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    #[test]
    fn single_voice_note_rest_index() {
        let voice = VoiceSequence::new(vec![
            Event::other(0.0, "Clef"),
            Event::note(0.0, "C4"),
            Event::rest(1.0),
            Event::chord(2.0, &["E4", "G4"]),
        ])
        .unwrap();
        let series = stream_indexer(&[voice], note_rest_transform, Some(&NOTE_REST_CLASSES));
        assert_eq!(
            series.entries(),
            &[
                (Offset(0.0), Symbol::Single("C4".into())),
                (Offset(1.0), Symbol::Single("Rest".into())),
                (Offset(2.0), Symbol::Chord(vec!["E4".into(), "G4".into()])),
            ]
        );
    }

    #[test]
    fn simultaneities_become_repeated_offsets() {
        let v1 = VoiceSequence::new(vec![Event::note(0.0, "A4"), Event::note(1.0, "B4")]).unwrap();
        let v2 = VoiceSequence::new(vec![
            Event::note(0.0, "C4"),
            Event::note(0.0, "D4"),
            Event::note(1.0, "E4"),
        ])
        .unwrap();
        let v3 = VoiceSequence::new(vec![Event::note(0.0, "F3")]).unwrap();
        let series = stream_indexer(&[v1, v2, v3], names, None);
        assert_eq!(
            series.entries(),
            &[
                (Offset(0.0), "A4 C4 F3".to_string()),
                (Offset(0.0), "D4".to_string()),
                (Offset(1.0), "B4 E4".to_string()),
            ]
        );
    }

    #[test]
    fn empty_voices_index_to_nothing() {
        let series = stream_indexer(&[VoiceSequence::default()], names, None);
        assert!(series.is_empty());
        let series = stream_indexer(&[], names, None);
        assert!(series.is_empty());
    }

    #[test]
    fn series_indexer_forward_fills_rows() {
        let upper = letters(&["a", "b", "c"], &[0.0, 1.0, 2.0]);
        let lower = letters(&["x", "y"], &[0.5, 2.0]);
        let series = series_indexer(&[upper, lower], |row| {
            Some(
                row.iter()
                    .map(|v| v.map(String::as_str).unwrap_or("_"))
                    .collect::<Vec<_>>()
                    .concat(),
            )
        });
        assert_eq!(
            series.entries(),
            &[
                (Offset(0.0), "a_".to_string()),
                (Offset(0.5), "ax".to_string()),
                (Offset(1.0), "bx".to_string()),
                (Offset(2.0), "cy".to_string()),
            ]
        );
    }
}
