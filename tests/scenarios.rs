// Copyright (c) 2023 Mike Tsao. All rights reserved.

use more_asserts::assert_le;
use vis::{Execution, FilterByOffsetIndexer, Indexer, NoteRestIndexer, ScoreInput};
use vis_core::{align::align_simultaneities, prelude::*};

fn letters(values: &[&str], offsets: &[f64]) -> Series<String> {
    offsets
        .iter()
        .zip(values)
        .map(|(o, v)| (Offset(*o), v.to_string()))
        .collect()
}

fn indexed(parts: Vec<Series<String>>) -> Vec<ScoreInput<String>> {
    parts.into_iter().map(ScoreInput::Indexed).collect()
}

fn cells(table: &Table<String>, column: usize) -> Vec<Option<&str>> {
    table.columns()[column]
        .cells()
        .iter()
        .map(|c| c.as_deref())
        .collect()
}

fn filter(parts: Vec<Series<String>>, step: f64) -> Table<String> {
    FilterByOffsetIndexer::new(indexed(parts), step)
        .unwrap()
        .run()
        .unwrap()
}

#[test]
fn one_voice_to_a_larger_step() {
    let table = filter(vec![letters(&["a", "b", "c", "d"], &[0.0, 0.5, 1.0, 1.5])], 1.0);
    assert_eq!(table.index(), &[0.0, 1.0, 2.0].map(Offset));
    assert_eq!(cells(&table, 0), vec![Some("a"), Some("c"), Some("d")]);
}

#[test]
fn one_voice_to_a_smaller_step() {
    let table = filter(vec![letters(&["a", "b"], &[0.0, 0.5])], 0.125);
    assert_eq!(table.index(), &[0.0, 0.125, 0.25, 0.375, 0.5].map(Offset));
    assert_eq!(
        cells(&table, 0),
        vec![Some("a"), Some("a"), Some("a"), Some("a"), Some("b")]
    );
}

#[test]
fn identical_voices_come_through_unchanged() {
    let voice = letters(&["a", "b", "c", "d"], &[0.0, 0.5, 1.0, 1.5]);
    let table = Table::from_series("Test", &[voice.clone(), voice.clone()]);
    for column in 0..2 {
        assert_eq!(table.column_series(column), voice);
    }
}

#[test]
fn grid_ends_at_or_after_the_last_offset() {
    let a = letters(&["a0", "a1"], &[0.0, 2.1]);
    let b = letters(&["b0", "b1"], &[0.0, 1.9]);
    let table = filter(vec![a, b], 1.0);
    assert_eq!(table.index(), &[0.0, 1.0, 2.0, 3.0].map(Offset));
    assert_eq!(cells(&table, 0), vec![Some("a0"), Some("a0"), Some("a0"), Some("a1")]);
    assert_eq!(cells(&table, 1), vec![Some("b0"), Some("b0"), Some("b1"), Some("b1")]);

    // The grid never stops short of the latest offset, and never overshoots it
    // by a whole step.
    let last = table.index().last().copied().unwrap();
    assert_le!(2.1, last.value());
    assert_le!(last.value() - 2.1, 1.0);
}

#[test]
fn no_voices_no_table() {
    let table = filter(Vec::new(), 0.5);
    assert_eq!(table.column_count(), 0);
    assert_eq!(table.row_count(), 0);

    let table = NoteRestIndexer::new_with_voices(Vec::new()).run().unwrap();
    assert_eq!(table.column_count(), 0);
    assert_eq!(table.row_count(), 0);
}

#[test]
fn coincident_events_make_extra_slices() {
    let one = [Event::note(0.0, "C5")];
    let two = [Event::note(0.0, "E4"), Event::note(0.0, "G4")];
    let three = [Event::note(0.0, "C3")];
    let slices = align_simultaneities(&[&one[..], &two[..], &three[..]]);
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].voices().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(slices[1].voices().collect::<Vec<_>>(), vec![1]);
    assert_eq!(slices[1].get(1), Some(&two[1]));
    assert_eq!(slices[1].get(0), None);
}

#[test]
fn parallel_and_serial_agree() {
    let voices: Vec<VoiceSequence> = (0..8)
        .map(|v| {
            let step = 0.25 * (v % 3 + 1) as f64;
            let events = (0..50)
                .map(|i| {
                    let offset = i as f64 * step;
                    match (i + v) % 5 {
                        0 => Event::rest(offset),
                        1 => Event::chord(offset, &["C4", "E4", "G4"]),
                        _ => Event::note(offset, "A4"),
                    }
                })
                .collect();
            VoiceSequence::new(events).unwrap()
        })
        .collect();
    let serial = NoteRestIndexer::new_with_voices(voices.clone())
        .run()
        .unwrap();
    for workers in [1, 2, 5] {
        let parallel = NoteRestIndexer::new_with_voices(voices.clone())
            .with_execution(Execution::Parallel { workers })
            .run()
            .unwrap();
        assert_eq!(serial, parallel, "{workers} workers");
    }
}
