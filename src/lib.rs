// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! Offset-aligned indexing of musical scores: indexers that turn voices into
//! tables, a dispatcher that runs voice combinations on a worker pool, and a
//! per-piece context that remembers what it has already computed.

pub use crate::dispatch::{dispatch, Execution};
pub use crate::indexers::{FilterByOffsetIndexer, Indexer, NoteRestIndexer, ScoreInput};
pub use crate::piece::{IndexedPiece, MetadataField, Stage};

pub mod dispatch;
pub mod indexers;
pub mod piece;

/// The version string every binary reports.
pub fn app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
