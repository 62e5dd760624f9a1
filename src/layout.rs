//! Per-sheet geometry: resolved titles, column widths, and the coordinate
//! ranges that the formatting and totals stages attach their work to.

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::display_title;
use crate::model::{QueryResult, ResultTable};
use crate::schema::numeric_columns;

/// Excel caps worksheet names at 31 characters.
const SHEET_NAME_LIMIT: usize = 31;
/// Widths are capped so one long cell cannot blow up a column.
const MAX_COLUMN_WIDTH: usize = 50;
/// Padding added on top of the longest printed value in a column.
const WIDTH_PADDING: usize = 3;

/// An inclusive, zero-based rectangle of cells within one sheet. Computed
/// once here and threaded through formatting and totals so the header/data
/// offset never has to be re-derived downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

/// Binds one non-empty result table to its resolved display title, column
/// widths, and numeric column index set.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSpec {
    pub name: String,
    pub title: String,
    pub widths: Vec<f64>,
    pub numeric_columns: Vec<u16>,
    pub table: ResultTable,
}

impl SheetSpec {
    /// The data extent of one column, header excluded: zero-based rows
    /// `1..=row_count`, i.e. Excel rows `2..=row_count + 1`.
    pub fn data_range(&self, col: u16) -> CellRange {
        CellRange {
            first_row: 1,
            first_col: col,
            last_row: self.table.row_count() as u32,
            last_col: col,
        }
    }

    /// Header plus all data rows across all columns; the filter control
    /// spans exactly this range.
    pub fn used_range(&self) -> CellRange {
        CellRange {
            first_row: 0,
            first_col: 0,
            last_row: self.table.row_count() as u32,
            last_col: (self.table.column_count() as u16).saturating_sub(1),
        }
    }

    /// Zero-based row of the injected totals row: one blank row after the
    /// last data row, mirroring the header gap (Excel row `row_count + 3`).
    pub fn totals_row(&self) -> u32 {
        self.table.row_count() as u32 + 2
    }
}

/// Derives a [`SheetSpec`] per surviving result, preserving emission order.
/// Empty tables are dropped before any formatting work unless
/// `include_empty_sheets` is set.
pub fn build_sheets(results: &[QueryResult], include_empty_sheets: bool) -> Vec<SheetSpec> {
    let mut names = SheetNameRegistry::default();
    let mut sheets = Vec::new();

    for result in results {
        if result.table.is_empty() && !include_empty_sheets {
            continue;
        }
        let title = names.assign(display_title(&result.name));
        let widths = column_widths(&result.table);
        let numeric = numeric_columns(&result.table);
        debug!(
            sheet = title,
            rows = result.table.row_count(),
            columns = result.table.column_count(),
            numeric = numeric.len(),
            "sheet laid out"
        );
        sheets.push(SheetSpec {
            name: result.name.clone(),
            title,
            widths,
            numeric_columns: numeric,
            table: result.table.clone(),
        });
    }

    sheets
}

/// Width per column: longest printed representation across the header and
/// every cell, plus padding, capped at [`MAX_COLUMN_WIDTH`].
fn column_widths(table: &ResultTable) -> Vec<f64> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let mut max_len = column.name.chars().count();
            for row in table.rows() {
                max_len = max_len.max(row[index].to_string().chars().count());
            }
            max_len.saturating_add(WIDTH_PADDING).min(MAX_COLUMN_WIDTH) as f64
        })
        .collect()
}

/// Keeps worksheet names within Excel's constraints and unique inside one
/// workbook.
#[derive(Debug, Default)]
struct SheetNameRegistry {
    used: HashSet<String>,
}

impl SheetNameRegistry {
    fn assign(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);
        if self.used.insert(base.clone()) {
            return base;
        }

        let mut counter = 1;
        loop {
            let suffix = format!("_{counter}");
            let mut prefix = base.clone();
            truncate_chars(&mut prefix, SHEET_NAME_LIMIT - suffix.len());
            let candidate = format!("{prefix}{suffix}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

fn sanitize_sheet_name(raw: &str) -> String {
    let invalid = [':', '\\', '/', '?', '*', '[', ']', '\'', '"'];
    let mut sanitized: String = raw
        .chars()
        .map(|ch| {
            if invalid.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();

    sanitized = sanitized.trim().to_string();
    if sanitized.is_empty() {
        sanitized = "Sheet".to_string();
    }

    truncate_chars(&mut sanitized, SHEET_NAME_LIMIT);
    sanitized
}

/// Cuts a string down to at most `max_chars` characters. `String::truncate`
/// indexes by bytes and panics mid-character, which multibyte display titles
/// would hit.
fn truncate_chars(value: &mut String, max_chars: usize) {
    if let Some((index, _)) = value.char_indices().nth(max_chars) {
        value.truncate(index);
    }
}
