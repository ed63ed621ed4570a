// Copyright (c) 2023 Mike Tsao. All rights reserved.

/// A group of events that an indexer treats as sounding together: at most one
/// event per voice, all at the same offset.
///
/// Each member remembers the position of its voice in the list that was
/// aligned, so a transform can tell which voice an event came from even when
/// other voices sat the slice out.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice<'a, E> {
    members: Vec<(usize, &'a E)>,
}
impl<'a, E> Slice<'a, E> {
    pub fn new_with(members: Vec<(usize, &'a E)>) -> Self {
        Self { members }
    }

    /// (voice position, event) pairs, in voice order.
    pub fn members(&self) -> &[(usize, &'a E)] {
        &self.members
    }

    pub fn events(&self) -> impl Iterator<Item = &'a E> + '_ {
        self.members.iter().map(|(_, e)| *e)
    }

    pub fn voices(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().map(|(v, _)| *v)
    }

    /// The event that voice `voice` contributed, if any.
    pub fn get(&self, voice: usize) -> Option<&'a E> {
        self.members
            .iter()
            .find(|(v, _)| *v == voice)
            .map(|(_, e)| *e)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Groups the events that several voices have at one offset into [Slice]s.
///
/// `per_voice[v]` lists voice `v`'s events at the offset in the order they
/// appear. Slice `i` gets every voice's `i`-th event; a voice with fewer
/// events simply isn't in the later slices. So this
///
/// ```text
/// voice 0: [a1, a2, a3]
/// voice 1: [b1, b2, b3]
/// voice 2: [c1, c2]
/// ```
///
/// becomes `[a1, b1, c1]`, `[a2, b2, c2]`, `[a3, b3]`.
///
/// Embellishments that share an offset with a held note therefore become
/// separate, ordered index entries instead of being merged into one.
pub fn align_simultaneities<'a, E>(per_voice: &[&'a [E]]) -> Vec<Slice<'a, E>> {
    let depth = per_voice.iter().map(|events| events.len()).max().unwrap_or(0);
    match depth {
        0 => Vec::default(),
        1 => vec![single_slice(per_voice)],
        _ => (0..depth)
            .map(|i| {
                Slice::new_with(
                    per_voice
                        .iter()
                        .enumerate()
                        .filter_map(|(voice, events)| events.get(i).map(|e| (voice, e)))
                        .collect(),
                )
            })
            .collect(),
    }
}

// Nearly every offset in real music has at most one event per voice.
fn single_slice<'a, E>(per_voice: &[&'a [E]]) -> Slice<'a, E> {
    Slice::new_with(
        per_voice
            .iter()
            .enumerate()
            .filter_map(|(voice, events)| events.first().map(|e| (voice, e)))
            .collect(),
    )
}
