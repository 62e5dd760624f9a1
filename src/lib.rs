//! Core library for the airport-report command line application.
//!
//! The library turns an ordered set of named tabular query results into one
//! presentation-grade spreadsheet document. The modules are structured to
//! keep responsibilities narrow and composable: the query catalog lives in
//! [`catalog`], execution and failure isolation in [`source`], column
//! classification in [`schema`], per-sheet geometry in [`layout`], styling
//! and conditional rules in [`format`], aggregate injection in [`totals`],
//! and workbook serialization in [`report`].

pub mod catalog;
pub mod error;
pub mod format;
pub mod layout;
pub mod model;
pub mod report;
pub mod schema;
pub mod source;
pub mod totals;

pub use error::{ReportError, Result};
pub use model::{CellValue, Column, ColumnKind, QueryResult, ResultTable};
pub use report::{ExportOptions, ReportSummary, export_report, export_report_at};
