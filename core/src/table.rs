// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::{offsets::unique_offsets, series::Series, time::Offset};
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Names a [Table] column: which indexer made it, which voice (or voice
/// combination) it came from, and, once chords are unpacked, which pitch slot
/// of that voice it holds.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ColumnLabel {
    pub indexer: String,
    pub voice: String,
    pub slot: Option<usize>,
}
impl ColumnLabel {
    pub fn new_with(indexer: &str, voice: &str) -> Self {
        Self {
            indexer: indexer.to_string(),
            voice: voice.to_string(),
            slot: None,
        }
    }

    pub fn with_slot(&self, slot: usize) -> Self {
        Self {
            slot: Some(slot),
            ..self.clone()
        }
    }
}
impl Display for ColumnLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.slot {
            Some(slot) => write!(f, "{}/{}.{}", self.indexer, self.voice, slot),
            None => write!(f, "{}/{}", self.indexer, self.voice),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column<T> {
    label: ColumnLabel,
    cells: Vec<Option<T>>,
}
impl<T> Column<T> {
    pub fn new_with(label: ColumnLabel, cells: Vec<Option<T>>) -> Self {
        Self { label, cells }
    }

    pub fn label(&self) -> &ColumnLabel {
        &self.label
    }

    pub fn cells(&self) -> &[Option<T>] {
        &self.cells
    }
}

/// Several voices' values on one shared offset axis.
///
/// Every column has one cell per row. A cell is None only before its voice's
/// first value; after that it holds either the value that began at that row's
/// offset or the one carried forward from an earlier row.
#[derive(Clone, Debug, PartialEq)]
pub struct Table<T> {
    index: Vec<Offset>,
    columns: Vec<Column<T>>,
}
impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            index: Default::default(),
            columns: Default::default(),
        }
    }
}
impl<T> Table<T> {
    /// Assembles a table from parts that already agree on the axis.
    ///
    /// Panics if a column's length doesn't match the index.
    pub fn new_with(index: Vec<Offset>, columns: Vec<Column<T>>) -> Self {
        assert!(
            columns.iter().all(|c| c.cells.len() == index.len()),
            "every column needs one cell per row"
        );
        Self { index, columns }
    }

    /// A table with the given columns and no rows.
    pub fn empty(labels: Vec<ColumnLabel>) -> Self {
        Self {
            index: Vec::default(),
            columns: labels
                .into_iter()
                .map(|label| Column::new_with(label, Vec::default()))
                .collect(),
        }
    }

    pub fn index(&self) -> &[Offset] {
        &self.index
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, column: usize) -> Option<&Column<T>> {
        self.columns.get(column)
    }

    pub fn labels(&self) -> impl Iterator<Item = &ColumnLabel> {
        self.columns.iter().map(|c| &c.label)
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&T> {
        self.columns
            .get(column)
            .and_then(|c| c.cells.get(row))
            .and_then(|cell| cell.as_ref())
    }

    /// The cell at exactly `offset` in the given column.
    pub fn get(&self, offset: Offset, column: usize) -> Option<&T> {
        self.index
            .binary_search(&offset)
            .ok()
            .and_then(|row| self.cell(row, column))
    }

    /// Credits every column to `indexer`, keeping voices and slots.
    pub fn with_indexer(mut self, indexer: &str) -> Self {
        for column in self.columns.iter_mut() {
            column.label.indexer = indexer.to_string();
        }
        self
    }

    /// Converts every cell, keeping the axis and labels.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Table<U> {
        Table {
            index: self.index.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| Column::new_with(c.label.clone(), c.cells.iter().map(|v| v.as_ref().map(&f)).collect()))
                .collect(),
        }
    }

    /// One column's values as a series, skipping rows where it was missing.
    /// Each carried-forward row comes back as its own entry.
    pub fn column_series(&self, column: usize) -> Series<T>
    where
        T: Clone,
    {
        match self.columns.get(column) {
            Some(c) => self
                .index
                .iter()
                .zip(c.cells.iter())
                .filter_map(|(o, cell)| cell.as_ref().map(|v| (*o, v.clone())))
                .collect(),
            None => Series::new(),
        }
    }
}
impl<T: Clone> Table<T> {
    /// Builds the aligned table for `parts`, one column per part, labelled by
    /// the part's position.
    ///
    /// Rows are the union of every part's offsets. Each column is
    /// forward-filled: where its part has nothing new, the part's most recent
    /// earlier value repeats; before the part's first value, cells are None.
    /// Filling never looks ahead. Where a part has several entries at one
    /// offset, the last one is what the table shows.
    pub fn from_series(indexer: &str, parts: &[Series<T>]) -> Self {
        let labels = (0..parts.len())
            .map(|i| ColumnLabel::new_with(indexer, &i.to_string()))
            .collect();
        Self::from_labelled_series(labels, parts)
    }

    /// Like [Table::from_series], with caller-chosen labels.
    ///
    /// Panics unless there is exactly one label per part.
    pub fn from_labelled_series(labels: Vec<ColumnLabel>, parts: &[Series<T>]) -> Self {
        assert_eq!(labels.len(), parts.len(), "one label per part");
        let index = unique_offsets(parts);
        let columns = labels
            .into_iter()
            .zip(parts.iter())
            .map(|(label, part)| Column::new_with(label, forward_fill(part, &index)))
            .collect();
        Self { index, columns }
    }
}
impl<T: Display> Display for Table<T> {
    /// Tab-separated text: a header row of labels, then one line per offset.
    /// Missing cells print as "NaN", the way analysts are used to seeing them.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "offset")?;
        for label in self.labels() {
            write!(f, "\t{label}")?;
        }
        writeln!(f)?;
        for (row, offset) in self.index.iter().enumerate() {
            write!(f, "{offset}")?;
            for column in self.columns.iter() {
                match &column.cells[row] {
                    Some(value) => write!(f, "\t{value}")?,
                    None => write!(f, "\tNaN")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Walks `part` and `axis` together, carrying the latest value forward.
/// `axis` must be sorted and must include every offset of `part`.
fn forward_fill<T: Clone>(part: &Series<T>, axis: &[Offset]) -> Vec<Option<T>> {
    let entries = part.entries();
    let mut next = 0;
    let mut current: Option<&T> = None;
    axis.iter()
        .map(|offset| {
            while next < entries.len() && entries[next].0 <= *offset {
                current = Some(&entries[next].1);
                next += 1;
            }
            current.cloned()
        })
        .collect()
}
