// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::{
    table::{Column, Table},
    transform::Symbol,
};

/// Spreads chords across parallel columns.
///
/// Each column of `table` becomes as many columns as its widest [Symbol] has
/// parts, or one if it holds no chords. Slot `i` of a row gets part `i` of that
/// row's symbol; a narrower symbol, or a missing cell, leaves the remaining
/// slots missing. Broadened columns carry slot numbers in their labels.
pub fn unpack_chords(table: &Table<Symbol>) -> Table<String> {
    let mut columns = Vec::with_capacity(table.column_count());
    for column in table.columns() {
        let width = column
            .cells()
            .iter()
            .flatten()
            .map(Symbol::width)
            .max()
            .unwrap_or(1)
            .max(1);
        if width == 1 {
            columns.push(Column::new_with(
                column.label().clone(),
                column
                    .cells()
                    .iter()
                    .map(|cell| cell.as_ref().and_then(|s| s.parts().first().cloned()))
                    .collect(),
            ));
            continue;
        }
        for slot in 0..width {
            columns.push(Column::new_with(
                column.label().with_slot(slot),
                column
                    .cells()
                    .iter()
                    .map(|cell| cell.as_ref().and_then(|s| s.parts().get(slot).cloned()))
                    .collect(),
            ));
        }
    }
    Table::new_with(table.index().to_vec(), columns)
}
