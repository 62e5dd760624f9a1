//! Styling and conditional formatting.
//!
//! Rules are derived as plain values first ([`conditional_rules`]) and only
//! then mapped onto `rust_xlsxwriter` objects, so range arithmetic stays
//! testable without writing a file.

use rust_xlsxwriter::utility::column_number_to_name;
use rust_xlsxwriter::{
    Color, ConditionalFormat3ColorScale, ConditionalFormatFormula, Format, FormatAlign,
    FormatBorder, Formula, Worksheet,
};

use crate::error::Result;
use crate::layout::{CellRange, SheetSpec};

const HEADER_FILL: Color = Color::RGB(0x366092);
const SCALE_MIN: Color = Color::RGB(0x63BE7B);
const SCALE_MID: Color = Color::RGB(0xFFEB84);
const SCALE_MAX: Color = Color::RGB(0xF8696B);

/// The kinds of conditional formatting attached to numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Three-stop gradient anchored at min, 50th percentile, max.
    ColorScale,
    /// Formula rule flagging every cell equal to the column maximum.
    MaxHighlight,
    /// Formula rule flagging every cell equal to the column minimum.
    MinHighlight,
}

/// One conditional-formatting rule bound to an explicit cell range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalRule {
    pub kind: RuleKind,
    pub range: CellRange,
}

/// Style applied to every header cell.
pub fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_font_size(12)
        .set_background_color(HEADER_FILL)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
}

/// Derives the conditional rules for one sheet. Every numeric column gets a
/// color scale over its exact data range; max/min highlights are only
/// meaningful against more than one value and are skipped for single-row
/// tables. Ties are handled by the formula being evaluated per cell, so every
/// cell equal to the extreme is flagged.
pub fn conditional_rules(spec: &SheetSpec) -> Vec<ConditionalRule> {
    let mut rules = Vec::new();
    let data_rows = spec.table.row_count();
    if data_rows == 0 {
        return rules;
    }

    for &col in &spec.numeric_columns {
        let range = spec.data_range(col);
        rules.push(ConditionalRule {
            kind: RuleKind::ColorScale,
            range,
        });
        if data_rows > 1 {
            rules.push(ConditionalRule {
                kind: RuleKind::MaxHighlight,
                range,
            });
            rules.push(ConditionalRule {
                kind: RuleKind::MinHighlight,
                range,
            });
        }
    }

    rules
}

/// Applies widths, the frozen header/first-column pane, the full-range
/// filter, and the sheet's conditional rules to the worksheet.
pub fn apply_formatting(worksheet: &mut Worksheet, spec: &SheetSpec) -> Result<()> {
    for (col, width) in spec.widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    // Header row and leftmost column stay visible while scrolling.
    worksheet.set_freeze_panes(1, 1)?;

    let used = spec.used_range();
    worksheet.autofilter(used.first_row, used.first_col, used.last_row, used.last_col)?;

    for rule in conditional_rules(spec) {
        add_rule(worksheet, &rule)?;
    }

    Ok(())
}

fn add_rule(worksheet: &mut Worksheet, rule: &ConditionalRule) -> Result<()> {
    let range = rule.range;
    match rule.kind {
        RuleKind::ColorScale => {
            let scale = ConditionalFormat3ColorScale::new()
                .set_minimum_color(SCALE_MIN)
                .set_midpoint_color(SCALE_MID)
                .set_maximum_color(SCALE_MAX);
            worksheet.add_conditional_format(
                range.first_row,
                range.first_col,
                range.last_row,
                range.last_col,
                &scale,
            )?;
        }
        RuleKind::MaxHighlight => {
            let format = Format::new().set_bold().set_font_color(Color::Blue);
            let highlight = ConditionalFormatFormula::new()
                .set_rule(extreme_formula(range, "MAX"))
                .set_format(format);
            worksheet.add_conditional_format(
                range.first_row,
                range.first_col,
                range.last_row,
                range.last_col,
                &highlight,
            )?;
        }
        RuleKind::MinHighlight => {
            let format = Format::new().set_bold().set_font_color(Color::Green);
            let highlight = ConditionalFormatFormula::new()
                .set_rule(extreme_formula(range, "MIN"))
                .set_format(format);
            worksheet.add_conditional_format(
                range.first_row,
                range.first_col,
                range.last_row,
                range.last_col,
                &highlight,
            )?;
        }
    }
    Ok(())
}

/// Builds the per-cell comparison against a column extreme, e.g.
/// `=C2=MAX($C$2:$C$11)`. The anchor cell is relative so the rule re-evaluates
/// for every cell in the range.
fn extreme_formula(range: CellRange, function: &str) -> Formula {
    let col = column_number_to_name(range.first_col);
    let first = range.first_row + 1;
    let last = range.last_row + 1;
    Formula::new(format!(
        "={col}{first}={function}(${col}${first}:${col}${last})"
    ))
}
