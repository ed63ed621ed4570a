// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! Resamples indexed voices onto a regular grid of offsets, so that analyses
//! can look at a piece every `step` quarter lengths instead of at every
//! attack.

use crate::{
    error::{Error, Result},
    offsets::last_offset,
    series::Series,
    table::{Column, ColumnLabel, Table},
    time::{Offset, QuarterLength},
};
use log::debug;

/// The most grid points a quantized table may have.
pub const MAX_GRID_POINTS: usize = 1 << 24;

/// Quantizes `parts` to a grid of `step`, one column per part, labelled by
/// position under `indexer`.
///
/// The grid is `0, step, 2 * step, ...` and ends at the first grid point at or
/// after the latest offset of any part. A part's value at a grid point is the
/// last value it began at or before that point, so an event that falls
/// between grid points shows up at the next one. Cells before a part's first
/// value are None.
///
/// Offsets that miss a grid point by floating-point noise count as on it.
///
/// Fails if `step` isn't a positive number, if a part has an unusable or
/// decreasing offset, or if the grid would exceed [MAX_GRID_POINTS].
pub fn quantize_series<T: Clone>(
    indexer: &str,
    parts: &[Series<T>],
    step: QuarterLength,
) -> Result<Table<T>> {
    let labels = (0..parts.len())
        .map(|i| ColumnLabel::new_with(indexer, &i.to_string()))
        .collect();
    quantize_labelled_series(labels, parts, step)
}

/// Like [quantize_series], with caller-chosen labels, one per part.
pub fn quantize_labelled_series<T: Clone>(
    labels: Vec<ColumnLabel>,
    parts: &[Series<T>],
    step: QuarterLength,
) -> Result<Table<T>> {
    validate_step(step)?;
    for part in parts {
        part.validate()?;
    }
    let grid = match last_offset(parts) {
        Some(last) => grid_through(last, step)?,
        None => Vec::default(),
    };
    debug!(
        "quantizing {} parts to step {step}: {} grid points",
        parts.len(),
        grid.len()
    );
    let columns = labels
        .into_iter()
        .zip(parts.iter())
        .map(|(label, part)| Column::new_with(label, sample(part, &grid)))
        .collect();
    Ok(Table::new_with(grid, columns))
}

impl<T: Clone> Table<T> {
    /// Quantizes every column of this table to a grid of `step`, keeping the
    /// column labels. See [quantize_series].
    pub fn quantize(&self, step: QuarterLength) -> Result<Table<T>> {
        let parts: Vec<Series<T>> = (0..self.column_count())
            .map(|c| self.column_series(c))
            .collect();
        quantize_labelled_series(self.labels().cloned().collect(), &parts, step)
    }
}

/// Fails unless `step` can space a grid: positive and finite.
pub fn validate_step(step: QuarterLength) -> Result<()> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidStep(step))
    }
}

/// The grid `0, step, ...` through `ceil(last / step) * step`.
fn grid_through(last: Offset, step: QuarterLength) -> Result<Vec<Offset>> {
    let ratio = last.value() / step;
    let nearest = ratio.round();
    let points = if (Offset(nearest) * step).coincides_with(&last) {
        nearest
    } else {
        ratio.ceil()
    };
    // The grid has points + 1 rows.
    if !(points.is_finite() && points < MAX_GRID_POINTS as f64) {
        return Err(Error::GridTooLarge {
            last,
            step,
            limit: MAX_GRID_POINTS,
        });
    }
    Ok((0..=points as usize)
        .map(|i| Offset(i as QuarterLength * step))
        .collect())
}

fn sample<T: Clone>(part: &Series<T>, grid: &[Offset]) -> Vec<Option<T>> {
    let entries = part.entries();
    grid.iter()
        .map(|point| {
            let end = entries.partition_point(|(o, _)| o.is_at_or_before(point));
            end.checked_sub(1).map(|i| entries[i].1.clone())
        })
        .collect()
}
