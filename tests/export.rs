use airport_report::format::{RuleKind, conditional_rules};
use airport_report::layout::build_sheets;
use airport_report::model::{CellValue, Column, ColumnKind, QueryResult, ResultTable};
use airport_report::report::PLACEHOLDER_SHEET;
use airport_report::{ExportOptions, export_report_at};
use calamine::{DataType, Reader, Xlsx, open_workbook};
use chrono::NaiveDate;
use tempfile::tempdir;

fn fixed_timestamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn options_for(dir: &std::path::Path) -> ExportOptions {
    ExportOptions {
        out_dir: dir.to_path_buf(),
        prefix: "report".to_string(),
        include_empty_sheets: false,
    }
}

fn status_table() -> ResultTable {
    ResultTable::new(
        vec![
            Column::new("Status", ColumnKind::Text),
            Column::new("Count", ColumnKind::Numeric),
        ],
        vec![
            vec![CellValue::Text("On Time".into()), CellValue::Int(80)],
            vec![CellValue::Text("Delayed".into()), CellValue::Int(15)],
            vec![CellValue::Text("Cancelled".into()), CellValue::Int(5)],
        ],
    )
    .expect("table built")
}

#[test]
fn status_sheet_has_data_and_totals_formula() {
    let temp_dir = tempdir().expect("temporary directory");
    let results = vec![QueryResult::ok("status", status_table())];

    let summary = export_report_at(&results, &options_for(temp_dir.path()), fixed_timestamp())
        .expect("report exported");

    assert_eq!(summary.sheet_count, 1);
    assert_eq!(summary.row_count, 3);
    assert_eq!(summary.column_count, 2);
    assert!(summary.file_size > 0);
    assert!(
        summary
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap()
            .eq("report_20240501_120000.xlsx")
    );

    let mut workbook: Xlsx<_> = open_workbook(&summary.path).expect("workbook opened");
    assert_eq!(workbook.sheet_names().to_vec(), vec!["status".to_string()]);

    let range = workbook
        .worksheet_range("status")
        .expect("sheet present")
        .expect("range read");
    assert_eq!(
        range.get_value((0, 0)),
        Some(&DataType::String("Status".into()))
    );
    assert_eq!(
        range.get_value((0, 1)),
        Some(&DataType::String("Count".into()))
    );
    assert_eq!(
        range.get_value((1, 0)),
        Some(&DataType::String("On Time".into()))
    );
    assert_eq!(range.get_value((1, 1)), Some(&DataType::Float(80.0)));
    assert_eq!(range.get_value((3, 1)), Some(&DataType::Float(5.0)));

    // Totals row: Excel row 6 holds the label and the SUM over rows 2-4.
    assert_eq!(
        range.get_value((5, 0)),
        Some(&DataType::String("TOTAL".into()))
    );
    let formulas = workbook
        .worksheet_formula("status")
        .expect("sheet present")
        .expect("formulas read");
    let sum = formulas.get_value((5, 1)).expect("totals formula present");
    assert!(sum.contains("SUM(B2:B4)"), "unexpected formula: {sum}");
}

#[test]
fn empty_tables_contribute_no_sheet() {
    let temp_dir = tempdir().expect("temporary directory");
    let empty = ResultTable::new(
        vec![Column::new("Month", ColumnKind::Text)],
        vec![],
    )
    .expect("table built");
    let results = vec![
        QueryResult::ok("monthly_statistics", empty),
        QueryResult::ok("status", status_table()),
    ];

    let summary = export_report_at(&results, &options_for(temp_dir.path()), fixed_timestamp())
        .expect("report exported");
    assert_eq!(summary.sheet_count, 1);

    let mut workbook: Xlsx<_> = open_workbook(&summary.path).expect("workbook opened");
    assert_eq!(workbook.sheet_names().to_vec(), vec!["status".to_string()]);
}

#[test]
fn all_empty_inputs_yield_a_placeholder_workbook() {
    let temp_dir = tempdir().expect("temporary directory");
    let empty = ResultTable::new(vec![Column::new("A", ColumnKind::Text)], vec![])
        .expect("table built");
    let results = vec![
        QueryResult::ok("first", empty.clone()),
        QueryResult::failed("second", "connection dropped"),
        QueryResult::ok("third", empty),
    ];

    let summary = export_report_at(&results, &options_for(temp_dir.path()), fixed_timestamp())
        .expect("report exported");
    assert_eq!(summary.sheet_count, 0);
    assert_eq!(summary.row_count, 0);

    let mut workbook: Xlsx<_> = open_workbook(&summary.path).expect("workbook opened");
    assert_eq!(
        workbook.sheet_names().to_vec(),
        vec![PLACEHOLDER_SHEET.to_string()]
    );
}

#[test]
fn sheet_order_follows_emission_order() {
    let temp_dir = tempdir().expect("temporary directory");
    let small = ResultTable::new(
        vec![Column::new("V", ColumnKind::Numeric)],
        vec![vec![CellValue::Int(1)]],
    )
    .expect("table built");
    let results = vec![
        QueryResult::ok("zulu", status_table()),
        QueryResult::ok("alpha", small.clone()),
        QueryResult::ok("mike", small),
    ];

    let summary = export_report_at(&results, &options_for(temp_dir.path()), fixed_timestamp())
        .expect("report exported");
    assert_eq!(summary.sheet_count, 3);

    let mut workbook: Xlsx<_> = open_workbook(&summary.path).expect("workbook opened");
    assert_eq!(
        workbook.sheet_names().to_vec(),
        vec!["zulu".to_string(), "alpha".to_string(), "mike".to_string()]
    );
}

#[test]
fn mapped_titles_become_sheet_names() {
    let temp_dir = tempdir().expect("temporary directory");
    let results = vec![QueryResult::ok("airline_performance", status_table())];

    let summary = export_report_at(&results, &options_for(temp_dir.path()), fixed_timestamp())
        .expect("report exported");

    let mut workbook: Xlsx<_> = open_workbook(&summary.path).expect("workbook opened");
    assert_eq!(
        workbook.sheet_names().to_vec(),
        vec!["Airline Performance".to_string()]
    );
}

#[test]
fn tied_extremes_share_one_formula_rule_range() {
    // All-equal values: both extreme rules cover the whole column, so every
    // tied cell is flagged when the formula evaluates per cell.
    let temp_dir = tempdir().expect("temporary directory");
    let table = ResultTable::new(
        vec![Column::new("Count", ColumnKind::Numeric)],
        vec![
            vec![CellValue::Int(7)],
            vec![CellValue::Int(7)],
            vec![CellValue::Int(7)],
        ],
    )
    .expect("table built");
    let results = vec![QueryResult::ok("ties", table)];

    let sheets = build_sheets(&results, false);
    let rules = conditional_rules(&sheets[0]);
    assert_eq!(rules.len(), 3);
    assert!(rules.iter().any(|rule| rule.kind == RuleKind::MaxHighlight));
    assert!(rules.iter().any(|rule| rule.kind == RuleKind::MinHighlight));
    for rule in &rules {
        // Every rule spans all three tied cells: Excel rows 2-4 of column A.
        assert_eq!(rule.range.first_row, 1);
        assert_eq!(rule.range.last_row, 3);
        assert_eq!(rule.range.first_col, 0);
        assert_eq!(rule.range.last_col, 0);
    }

    let summary = export_report_at(&results, &options_for(temp_dir.path()), fixed_timestamp())
        .expect("report exported");

    let mut workbook: Xlsx<_> = open_workbook(&summary.path).expect("workbook opened");
    let formulas = workbook
        .worksheet_formula("ties")
        .expect("sheet present")
        .expect("formulas read");
    let sum = formulas.get_value((5, 0)).expect("totals formula present");
    assert!(sum.contains("SUM(A2:A4)"), "unexpected formula: {sum}");
}

#[test]
fn fixed_timestamp_reruns_produce_identical_metadata() {
    let first_dir = tempdir().expect("temporary directory");
    let second_dir = tempdir().expect("temporary directory");
    let results = vec![
        QueryResult::ok("airline_performance", status_table()),
        QueryResult::ok("status", status_table()),
    ];

    let first = export_report_at(&results, &options_for(first_dir.path()), fixed_timestamp())
        .expect("report exported");
    let second = export_report_at(&results, &options_for(second_dir.path()), fixed_timestamp())
        .expect("report exported");
    assert_eq!(first.path.file_name(), second.path.file_name());

    let mut first_book: Xlsx<_> = open_workbook(&first.path).expect("workbook opened");
    let mut second_book: Xlsx<_> = open_workbook(&second.path).expect("workbook opened");
    let sheet_names = first_book.sheet_names().to_vec();
    assert_eq!(sheet_names, second_book.sheet_names().to_vec());

    for name in &sheet_names {
        let first_values = first_book
            .worksheet_range(name)
            .expect("sheet present")
            .expect("range read");
        let second_values = second_book
            .worksheet_range(name)
            .expect("sheet present")
            .expect("range read");
        assert_eq!(
            first_values.rows().collect::<Vec<_>>(),
            second_values.rows().collect::<Vec<_>>()
        );

        let first_formulas = first_book
            .worksheet_formula(name)
            .expect("sheet present")
            .expect("formulas read");
        let second_formulas = second_book
            .worksheet_formula(name)
            .expect("sheet present")
            .expect("formulas read");
        assert_eq!(
            first_formulas.rows().collect::<Vec<_>>(),
            second_formulas.rows().collect::<Vec<_>>()
        );
    }
}
