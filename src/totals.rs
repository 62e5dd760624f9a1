//! Totals-row injection: a bold `TOTAL` label plus a live `SUM` formula per
//! numeric column, one blank row below the data.

use rust_xlsxwriter::utility::column_number_to_name;
use rust_xlsxwriter::{Format, Formula, Worksheet};

use crate::error::Result;
use crate::layout::SheetSpec;

/// Label written into the first column of the totals row.
pub const TOTALS_LABEL: &str = "TOTAL";

/// Builds the `SUM` formula for one numeric column, referencing exactly the
/// data range used by that column's conditional rules. The totals row itself
/// is never part of the range.
pub fn sum_formula(spec: &SheetSpec, col: u16) -> Formula {
    let range = spec.data_range(col);
    let letter = column_number_to_name(col);
    Formula::new(format!(
        "=SUM({letter}{}:{letter}{})",
        range.first_row + 1,
        range.last_row + 1
    ))
}

/// Appends the totals row. Sheets without numeric columns get none; cells in
/// non-numeric columns stay blank.
pub fn inject_totals(worksheet: &mut Worksheet, spec: &SheetSpec) -> Result<()> {
    if spec.table.is_empty() || spec.numeric_columns.is_empty() {
        return Ok(());
    }

    let bold = Format::new().set_bold();
    let row = spec.totals_row();
    worksheet.write_string_with_format(row, 0, TOTALS_LABEL, &bold)?;

    for &col in &spec.numeric_columns {
        worksheet.write_formula_with_format(row, col, sum_formula(spec, col), &bold)?;
    }

    Ok(())
}
