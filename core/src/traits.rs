// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::time::Offset;

/// Something that [HasOffsets] is an ordered sequence of things that happen at
/// known times. Examples are a [VoiceSequence](crate::events::VoiceSequence) of
/// raw events, and a [Series](crate::series::Series) of already-indexed
/// values.
///
/// Implementations yield offsets in non-decreasing order. Repeated offsets are
/// allowed; they denote simultaneities.
pub trait HasOffsets {
    /// The offsets of every item, in order, including repeats.
    fn offsets<'a>(&'a self) -> Box<dyn Iterator<Item = Offset> + 'a>;

    /// The offset of the final item, or None if there are no items.
    fn last_offset(&self) -> Option<Offset> {
        self.offsets().last()
    }
}

impl<T: HasOffsets> HasOffsets for &T {
    fn offsets<'a>(&'a self) -> Box<dyn Iterator<Item = Offset> + 'a> {
        (**self).offsets()
    }
}
