// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use profitlens::config::{ColumnBinding, SheetConfig};
use profitlens::error::ReportError;
use profitlens::loader::{COLUMN_COUNT, load_periods};
use profitlens::models::Field;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};

const HEADER: &str = "period,gross_revenue,net_revenue,revenue_vat,gross_cost,net_cost,cost_vat,social_contribution,income_tax,staff_cost,reported_profit,avg_ticket,order_count";

fn csv_file(body: &str) -> NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(f, "{}", body).unwrap();
    f
}

fn no_skip() -> SheetConfig {
    SheetConfig {
        skip_leading_rows: 0,
        ..SheetConfig::default()
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn binds_named_english_headers() {
    let f = csv_file(&format!(
        "{HEADER}\n2024-01,1230,1000,230,615,500,115,100,50,200,150,45.5,22\n"
    ));
    let rows = load_periods(f.path(), &no_skip()).unwrap();
    assert_eq!(rows.len(), 1);
    let r = &rows[0];
    assert_eq!(r.period, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(r.label, "Jan 2024");
    assert_eq!(r.figures.net_revenue, dec("1000"));
    assert_eq!(r.figures.staff_cost, dec("200"));
    assert_eq!(r.figures.avg_ticket, dec("45.5"));
    assert_eq!(r.figures.order_count, dec("22"));
    assert!(r.missing.is_empty());
}

#[test]
fn binds_polish_headers_in_any_order() {
    // two VAT columns are claimed left to right
    let body = "Okres,Obrót netto,Obrót brutto,VAT,Koszta brutto,Kwota netto,VAT,ZUS,PIT,Koszt pracowniczy,Zysk/strata,Średni rachunek,Ilość rachunków\n\
                2024-03-31,\"2 000,50\",\"2 460,62\",\"460,12\",1230,1000,230,300,40,100,\"560,50\",80,25\n";
    let f = csv_file(body);
    let rows = load_periods(f.path(), &no_skip()).unwrap();
    let r = &rows[0];
    assert_eq!(r.period, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(r.figures.net_revenue, dec("2000.50"));
    assert_eq!(r.figures.gross_revenue, dec("2460.62"));
    assert_eq!(r.figures.revenue_vat, dec("460.12"));
    assert_eq!(r.figures.cost_vat, dec("230"));
    assert_eq!(r.figures.social_contribution, dec("300"));
    assert_eq!(r.figures.reported_profit, dec("560.50"));
}

#[test]
fn missing_column_names_the_column_and_lists_headers() {
    let header = HEADER.replace(",staff_cost", "");
    let f = csv_file(&format!("{header}\n"));
    let err = load_periods(f.path(), &no_skip()).unwrap_err();
    match err {
        ReportError::MissingColumn { column, available } => {
            assert_eq!(column, "staff_cost");
            assert_eq!(available.len(), COLUMN_COUNT - 1);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn similar_header_is_not_accepted() {
    let header = HEADER.replace("net_cost", "net_cost_total");
    let f = csv_file(&format!("{header}\n"));
    assert!(matches!(
        load_periods(f.path(), &no_skip()),
        Err(ReportError::MissingColumn { .. })
    ));
}

#[test]
fn positional_binding_requires_exact_width() {
    let cfg = SheetConfig {
        binding: ColumnBinding::Positional,
        ..no_skip()
    };
    let f = csv_file("a,b,c\n2024-01,1,2\n");
    match load_periods(f.path(), &cfg).unwrap_err() {
        ReportError::ColumnCount { expected, found } => {
            assert_eq!(expected, 13);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error {other:?}"),
    }

    let header = (0..13).map(|i| format!("c{i}")).collect::<Vec<_>>().join(",");
    let f = csv_file(&format!("{header}\n2024-02,1,2,3,4,5,6,7,8,9,10,11,12\n"));
    let rows = load_periods(f.path(), &cfg).unwrap();
    assert_eq!(rows[0].figures.gross_revenue, dec("1"));
    assert_eq!(rows[0].figures.order_count, dec("12"));
}

#[test]
fn empty_cells_become_zero_and_are_recorded() {
    let f = csv_file(&format!(
        "{HEADER}\n2024-01,1230,1000,230,615,500,115,,50,200,150,,22\n"
    ));
    let rows = load_periods(f.path(), &no_skip()).unwrap();
    let r = &rows[0];
    assert_eq!(r.figures.social_contribution, Decimal::ZERO);
    assert_eq!(r.missing, vec![Field::SocialContribution, Field::AvgTicket]);
}

#[test]
fn rows_without_period_are_skipped_and_window_is_applied() {
    let mut body = format!("{HEADER}\n");
    for m in 1..=12 {
        body.push_str(&format!("2024-{m:02},0,{},0,0,0,0,0,0,0,0,0,0\n", m * 100));
    }
    body.push_str(",0,9999,0,0,0,0,0,0,0,0,0,0\n");
    body.push_str("2025-01,0,1300,0,0,0,0,0,0,0,0,0,0\n");
    body.push_str("2025-02,0,1400,0,0,0,0,0,0,0,0,0,0\n");
    let f = csv_file(&body);

    // 14-row window, first row dropped: Feb 2024 .. Jan 2025 minus the blank footer row
    let rows = load_periods(f.path(), &SheetConfig::default()).unwrap();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0].label, "Feb 2024");
    assert_eq!(rows.last().unwrap().label, "Jan 2025");
    assert!(rows.iter().all(|r| r.figures.net_revenue != dec("9999")));
}

#[test]
fn non_numeric_value_is_an_invalid_cell() {
    let f = csv_file(&format!(
        "{HEADER}\n2024-01,1230,lots,230,615,500,115,100,50,200,150,45,22\n"
    ));
    match load_periods(f.path(), &no_skip()).unwrap_err() {
        ReportError::InvalidCell { row, column, value } => {
            assert_eq!(row, 2);
            assert_eq!(column, "net_revenue");
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn bad_period_is_an_invalid_cell() {
    let f = csv_file(&format!("{HEADER}\nsometime,1,1,1,1,1,1,1,1,1,1,1,1\n"));
    assert!(matches!(
        load_periods(f.path(), &no_skip()),
        Err(ReportError::InvalidCell { ref column, .. }) if column == "period"
    ));
}

#[test]
fn missing_file_maps_to_exit_code_two() {
    let dir = tempdir().unwrap();
    let err = load_periods(&dir.path().join("nope.xlsx"), &no_skip()).unwrap_err();
    assert!(matches!(err, ReportError::InputMissing(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn unknown_extension_is_rejected() {
    let mut f = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    writeln!(f, "{HEADER}").unwrap();
    let err = load_periods(f.path(), &no_skip()).unwrap_err();
    assert!(matches!(err, ReportError::UnsupportedFormat(ref e) if e == "txt"));
    assert_eq!(err.exit_code(), 1);
}

fn fixture(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn loads_dated_periods_from_a_workbook() {
    // Dec 2023 .. Feb 2025 with Excel date cells in the period column
    let rows = load_periods(&fixture("monthly.xlsx"), &SheetConfig::default()).unwrap();
    assert_eq!(rows.len(), 13);
    assert_eq!(rows[0].period, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(rows[0].label, "Jan 2024");
    assert_eq!(rows[12].period, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

    let jan = &rows[0].figures;
    assert_eq!(jan.net_revenue, dec("1100"));
    assert_eq!(jan.reported_profit, dec("200"));
    assert_eq!(jan.order_count, dec("27"));

    // text amount with dot grouping in June
    assert_eq!(rows[5].figures.gross_revenue, dec("1234.56"));
    // blank text cell in the last row
    assert_eq!(rows[12].missing, vec![Field::AvgTicket]);
    assert!(rows.iter().all(|r| r.missing.is_empty() || r.label == "Jan 2025"));
}

#[test]
fn workbook_window_can_keep_the_leading_row() {
    let cfg = SheetConfig {
        data_rows: 20,
        ..no_skip()
    };
    let rows = load_periods(&fixture("monthly.xlsx"), &cfg).unwrap();
    assert_eq!(rows.len(), 15);
    assert_eq!(rows[0].label, "Dec 2023");
    assert_eq!(rows[14].label, "Feb 2025");
}
