// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::{
    error::{Error, Result},
    time::Offset,
    traits::HasOffsets,
};
use std::collections::BTreeSet;

/// Checks offsets supplied from outside the engine: each must be usable as a
/// position in a piece (see [Offset::checked]), and none may precede the one
/// before it.
pub fn validate_offsets<I: IntoIterator<Item = Offset>>(offsets: I) -> Result<()> {
    let mut previous: Option<Offset> = None;
    for (position, offset) in offsets.into_iter().enumerate() {
        if Offset::checked(offset.value()).is_none() {
            return Err(Error::InvalidOffset(offset.value()));
        }
        if let Some(previous) = previous {
            if offset < previous {
                return Err(Error::UnorderedOffsets {
                    position,
                    offset,
                    previous,
                });
            }
        }
        previous = Some(offset);
    }
    Ok(())
}

/// Finds the offsets at which anything begins in any of `sequences`: the
/// sorted set union of their offsets, with no repeats.
pub fn unique_offsets<S: HasOffsets>(sequences: &[S]) -> Vec<Offset> {
    let all: BTreeSet<Offset> = sequences.iter().flat_map(|s| s.offsets()).collect();
    all.into_iter().collect()
}

/// The latest offset at which anything begins in any of `sequences`.
pub fn last_offset<S: HasOffsets>(sequences: &[S]) -> Option<Offset> {
    sequences.iter().filter_map(|s| s.last_offset()).max()
}
