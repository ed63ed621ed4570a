// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::{error::Result, offsets::validate_offsets, time::Offset, traits::HasOffsets};

/// Values indexed by the offset at which each one begins. An indexer produces
/// one [Series] per voice combination.
///
/// Offsets never decrease. One offset may appear several times when an
/// indexer found simultaneous events there; readers that need a single value
/// per offset (see [Series::value_at]) take the last one.
#[derive(Clone, Debug, PartialEq)]
pub struct Series<T> {
    entries: Vec<(Offset, T)>,
}
impl<T> Default for Series<T> {
    fn default() -> Self {
        Self {
            entries: Default::default(),
        }
    }
}
impl<T> Series<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from pairs that are already in offset order.
    ///
    /// Panics if they aren't, because every producer in this crate emits
    /// sorted pairs and a disorder here is a bug rather than bad input.
    pub fn new_with(entries: Vec<(Offset, T)>) -> Self {
        assert!(
            entries.windows(2).all(|w| w[0].0 <= w[1].0),
            "series offsets must be non-decreasing"
        );
        Self { entries }
    }

    /// Builds a series from caller-supplied pairs, failing on an unusable or
    /// decreasing offset.
    pub fn try_new_with(mut entries: Vec<(Offset, T)>) -> Result<Self> {
        validate_offsets(entries.iter().map(|(o, _)| *o))?;
        for (offset, _) in entries.iter_mut() {
            offset.0 += 0.0;
        }
        Ok(Self { entries })
    }

    /// Fails if any offset is unusable or out of order. Series built with
    /// [Series::new_with] or [Series::push] are always in order but may hold
    /// offsets no piece could have.
    pub fn validate(&self) -> Result<()> {
        validate_offsets(self.entries.iter().map(|(o, _)| *o))
    }

    /// Appends a value. `offset` must not precede the current last offset.
    pub fn push(&mut self, offset: Offset, value: T) {
        if let Some((last, _)) = self.entries.last() {
            assert!(*last <= offset, "series offsets must be non-decreasing");
        }
        self.entries.push((offset, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(Offset, T)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Offset, T)> {
        self.entries.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// The value in effect at `offset`: the last value that began at or before
    /// it. None if nothing had begun yet.
    pub fn value_at(&self, offset: Offset) -> Option<&T> {
        let end = self.entries.partition_point(|(o, _)| *o <= offset);
        end.checked_sub(1).map(|i| &self.entries[i].1)
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Series<U> {
        Series {
            entries: self.entries.iter().map(|(o, v)| (*o, f(v))).collect(),
        }
    }
}
impl<T> HasOffsets for Series<T> {
    fn offsets<'a>(&'a self) -> Box<dyn Iterator<Item = Offset> + 'a> {
        Box::new(self.entries.iter().map(|(o, _)| *o))
    }
}
impl<T> FromIterator<(Offset, T)> for Series<T> {
    fn from_iter<I: IntoIterator<Item = (Offset, T)>>(iter: I) -> Self {
        Self::new_with(iter.into_iter().collect())
    }
}
impl<T> IntoIterator for Series<T> {
    type Item = (Offset, T);
    type IntoIter = std::vec::IntoIter<(Offset, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
