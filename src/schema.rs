//! Column classification.
//!
//! Classification follows the column's declared kind as produced by the
//! source layer, never per-cell string parsing. A declared-numeric column
//! that turns out to hold an unreadable value is excluded from numeric
//! treatment; the sheet is still produced.

use tracing::warn;

use crate::model::{ColumnKind, ResultTable};

/// Returns the indexes of columns that receive numeric treatment: declared
/// `Numeric` and containing only numeric (or null) cells. A zero-row column
/// keeps its declared classification.
pub fn numeric_columns(table: &ResultTable) -> Vec<u16> {
    table
        .columns()
        .iter()
        .enumerate()
        .filter(|(index, column)| {
            column.kind == ColumnKind::Numeric && column_is_clean(table, *index)
        })
        .map(|(index, _)| index as u16)
        .collect()
}

fn column_is_clean(table: &ResultTable, index: usize) -> bool {
    let clean = table.rows().iter().all(|row| row[index].is_numeric());
    if !clean {
        warn!(
            column = table.columns()[index].name,
            "declared-numeric column holds non-numeric values, treating as text"
        );
    }
    clean
}
