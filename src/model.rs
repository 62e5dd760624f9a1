use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// A single cell value as produced by the tabular layer of the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    /// Plain string value.
    Text(String),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Missing value (SQL NULL).
    Null,
}

impl CellValue {
    /// Whether the value fits a numeric column. `Null` does: a NULL in a
    /// numeric column does not demote the column to text.
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Int(_) | CellValue::Float(_) | CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    /// Printed representation used for cell writing and width measurement.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(value) => write!(f, "{value}"),
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Null => Ok(()),
        }
    }
}

/// Classification of a column's declared value domain. Computed once by the
/// source layer and fixed for the lifetime of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Integer or floating point domain.
    Numeric,
    /// Everything else, including unknown domains.
    Text,
}

/// A named column together with its declared kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// An ordered sequence of named columns plus a rectangular grid of values,
/// rows in source order. A table with zero rows is valid and distinct from
/// an absent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
}

impl ResultTable {
    /// Builds a table, validating that every row has exactly as many values
    /// as the column list.
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(ReportError::RaggedTable {
                    row: index,
                    found: row.len(),
                    expected: columns.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// A table with no columns and no rows, used as the substitute for a
    /// failed query.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no data rows. Empty tables contribute no sheet
    /// to the workbook under the default export policy.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of one catalog query. A failed query keeps its slot in the
/// emission order: the table is empty and the reason is preserved for
/// diagnostics, so downstream stages only ever see tables.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub name: String,
    pub table: ResultTable,
    pub error: Option<String>,
}

impl QueryResult {
    pub fn ok(name: impl Into<String>, table: ResultTable) -> Self {
        Self {
            name: name.into(),
            table,
            error: None,
        }
    }

    pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: ResultTable::empty(),
            error: Some(reason.into()),
        }
    }
}
