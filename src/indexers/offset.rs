// Copyright (c) 2023 Mike Tsao. All rights reserved.

use super::{require_series, Indexer, ScoreInput};
use vis_core::{
    quantize::{quantize_labelled_series, validate_step},
    series::Series,
    table::{ColumnLabel, Table},
    time::QuarterLength,
    Result,
};

/// Looks at an index every `step` quarter lengths: each voice's value at
/// `0, step, 2 * step, ...`, through the first grid point at or after the
/// index's last offset.
#[derive(Debug)]
pub struct FilterByOffsetIndexer<T> {
    parts: Vec<Series<T>>,
    labels: Vec<ColumnLabel>,
    step: QuarterLength,
}
impl<T: Clone> Indexer for FilterByOffsetIndexer<T> {
    type Output = Table<T>;

    const NAME: &'static str = "FilterByOffsetIndexer";

    fn run(&self) -> Result<Self::Output> {
        quantize_labelled_series(self.labels.clone(), &self.parts, self.step)
    }
}
impl<T: Clone> FilterByOffsetIndexer<T> {
    /// Fails unless every voice of `input` is an indexed series with usable,
    /// ordered offsets, or if `step` isn't a positive number.
    pub fn new(input: Vec<ScoreInput<T>>, step: QuarterLength) -> Result<Self> {
        let parts = require_series(Self::NAME, input)?;
        let labels = (0..parts.len())
            .map(|v| ColumnLabel::new_with(Self::NAME, &v.to_string()))
            .collect();
        Self::new_with(parts, labels, step)
    }

    /// Quantizes an existing table, keeping its voice labels.
    pub fn new_from_table(table: &Table<T>, step: QuarterLength) -> Result<Self> {
        let parts = (0..table.column_count())
            .map(|c| table.column_series(c))
            .collect();
        let labels = table
            .labels()
            .map(|l| ColumnLabel {
                indexer: Self::NAME.to_string(),
                ..l.clone()
            })
            .collect();
        Self::new_with(parts, labels, step)
    }

    fn new_with(parts: Vec<Series<T>>, labels: Vec<ColumnLabel>, step: QuarterLength) -> Result<Self> {
        validate_step(step)?;
        Ok(Self {
            parts,
            labels,
            step,
        })
    }
}
