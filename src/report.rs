//! Workbook assembly and serialization.
//!
//! Consumes the ordered query results, lays them out, attaches formatting and
//! totals, and writes a single timestamped `.xlsx` artifact. Sheet order is
//! exactly the orchestrator's emission order.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::format::{apply_formatting, header_format};
use crate::layout::{build_sheets, SheetSpec};
use crate::model::{CellValue, QueryResult};
use crate::totals::inject_totals;

/// Name of the placeholder sheet written when no input table survives the
/// empty filter; an xlsx document needs at least one sheet.
pub const PLACEHOLDER_SHEET: &str = "No Data";

/// Export policy and destination.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory the artifact is written into; created if missing.
    pub out_dir: PathBuf,
    /// Artifact file name prefix, completed with a `YYYYMMDD_HHMMSS` stamp.
    pub prefix: String,
    /// When set, empty tables still produce a header-only sheet instead of
    /// being dropped from the workbook.
    pub include_empty_sheets: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("exports"),
            prefix: "airport_analytics_report".to_string(),
            include_empty_sheets: false,
        }
    }
}

/// Counters reported for one successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub path: PathBuf,
    pub sheet_count: usize,
    pub row_count: usize,
    pub column_count: usize,
    pub file_size: u64,
}

/// Exports the results stamped with the current local time.
pub fn export_report(results: &[QueryResult], options: &ExportOptions) -> Result<ReportSummary> {
    export_report_at(results, options, Local::now().naive_local())
}

/// Exports the results with an explicit timestamp. Identical inputs and a
/// fixed timestamp produce identical formatting metadata, which is what the
/// integration tests pin down.
#[instrument(level = "info", skip(results, options), fields(prefix = %options.prefix))]
pub fn export_report_at(
    results: &[QueryResult],
    options: &ExportOptions,
    timestamp: NaiveDateTime,
) -> Result<ReportSummary> {
    let sheets = build_sheets(results, options.include_empty_sheets);

    let mut workbook = Workbook::new();
    let mut row_count = 0;
    let mut column_count = 0;

    for spec in &sheets {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, spec)?;
        row_count += spec.table.row_count();
        column_count += spec.table.column_count();
        info!(
            sheet = spec.title,
            rows = spec.table.row_count(),
            columns = spec.table.column_count(),
            "sheet written"
        );
    }

    // All inputs empty: still produce a valid document, flag it, and report
    // zero meaningful sheets.
    if sheets.is_empty() {
        warn!("no non-empty result tables, writing placeholder sheet");
        workbook.add_worksheet().set_name(PLACEHOLDER_SHEET)?;
    }

    fs::create_dir_all(&options.out_dir)?;
    let stamp = timestamp.format("%Y%m%d_%H%M%S");
    let path = options.out_dir.join(format!("{}_{stamp}.xlsx", options.prefix));
    workbook.save(&path)?;

    let file_size = fs::metadata(&path)?.len();
    let summary = ReportSummary {
        path,
        sheet_count: sheets.len(),
        row_count,
        column_count,
        file_size,
    };
    info!(
        sheets = summary.sheet_count,
        rows = summary.row_count,
        columns = summary.column_count,
        bytes = summary.file_size,
        "report exported"
    );
    Ok(summary)
}

fn write_sheet(worksheet: &mut Worksheet, spec: &SheetSpec) -> Result<()> {
    worksheet.set_name(&spec.title)?;

    let header = header_format();
    for (col, column) in spec.table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, &column.name, &header)?;
    }

    for (row_index, row) in spec.table.rows().iter().enumerate() {
        let row_number = row_index as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            write_cell(worksheet, row_number, col as u16, value)?;
        }
    }

    apply_formatting(worksheet, spec)?;
    inject_totals(worksheet, spec)?;
    Ok(())
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &CellValue) -> Result<()> {
    match value {
        CellValue::Text(text) => worksheet.write_string(row, col, text)?,
        CellValue::Int(number) => worksheet.write_number(row, col, *number as f64)?,
        CellValue::Float(number) => worksheet.write_number(row, col, *number)?,
        CellValue::Null => return Ok(()),
    };
    Ok(())
}
