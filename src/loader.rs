// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reads the first sheet of a workbook (or a CSV export of it) and binds its
//! columns onto [`PeriodRow`]s.
//!
//! Binding is strict: in `named` mode every column must be found by its exact
//! (normalized) header text, in `positional` mode the sheet must be exactly
//! [`COLUMN_COUNT`] columns wide. Nothing is guessed from partial header matches.

use crate::config::{ColumnBinding, SheetConfig};
use crate::error::{ReportError, Result};
use crate::models::{Field, PeriodFigures, PeriodRow};
use crate::utils::{month_start, parse_amount, parse_period};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{Duration, NaiveDate};
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::path::Path;
use tracing::{debug, info};

/// Period column plus the twelve numeric fields.
pub const COLUMN_COUNT: usize = 13;

static EMPTY_CELL: Cell = Cell::Empty;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static pattern"));

const PERIOD_ALIASES: &[&str] = &["period", "okres", "month", "miesiąc", "miesiac", "date", "data"];

fn field_aliases(field: Field) -> &'static [&'static str] {
    match field {
        Field::GrossRevenue => &["gross revenue", "obrót brutto", "obrot brutto"],
        Field::NetRevenue => &["net revenue", "obrót netto", "obrot netto"],
        Field::RevenueVat => &["revenue vat", "vat przychód", "vat przychod", "vat"],
        Field::GrossCost => &["gross cost", "gross costs", "koszta brutto", "koszty brutto"],
        Field::NetCost => &["net cost", "net costs", "kwota netto", "koszty netto", "koszta netto"],
        Field::CostVat => &["cost vat", "vat koszt", "vat.1", "vat"],
        Field::SocialContribution => &["social contribution", "social contributions", "zus"],
        Field::IncomeTax => &["income tax", "pit"],
        Field::StaffCost => &[
            "staff cost",
            "staff costs",
            "koszt pracowniczy",
            "koszty pracownicze",
        ],
        Field::ReportedProfit => &[
            "reported profit",
            "profit",
            "zysk",
            "zysk/strata",
            "zysk/strata brutto",
            "zysk/stra brutto",
        ],
        Field::AvgTicket => &[
            "avg ticket",
            "average ticket",
            "average order value",
            "średni rachunek",
            "sredni rachunek",
        ],
        Field::OrderCount => &[
            "order count",
            "orders",
            "ilość rachunków",
            "ilosc rachunkow",
            "liczba rachunków",
        ],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

/// The header row and data rows of one sheet, untyped.
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Column index of the period and of each field.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    pub period: usize,
    pub fields: Vec<(Field, usize)>,
}

pub fn load_periods(path: &Path, cfg: &SheetConfig) -> Result<Vec<PeriodRow>> {
    let sheet = read_sheet(path)?;
    let rows = bind_rows(&sheet, cfg)?;
    info!(
        periods = rows.len(),
        path = %path.display(),
        "loaded period table"
    );
    Ok(rows)
}

pub fn read_sheet(path: &Path) -> Result<RawSheet> {
    if !path.exists() {
        return Err(ReportError::InputMissing(path.to_path_buf()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => read_csv_sheet(path),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook_sheet(path),
        _ => Err(ReportError::UnsupportedFormat(ext)),
    }
}

fn read_workbook_sheet(path: &Path) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReportError::EmptySheet(path.display().to_string()))??;
    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| ReportError::EmptySheet(path.display().to_string()))?
        .iter()
        .map(|c| c.to_string().trim().to_string())
        .collect();
    let rows = rows
        .map(|r| r.iter().map(cell_from_data).collect())
        .collect();
    Ok(RawSheet { headers, rows })
}

fn cell_from_data(d: &Data) -> Cell {
    match d {
        Data::Empty => Cell::Empty,
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => Cell::Date(ndt.date()),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

fn read_csv_sheet(path: &Path) -> Result<RawSheet> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        rows.push(
            rec.iter()
                .map(|v| {
                    if v.trim().is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(v.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(RawSheet { headers, rows })
}

/// Lower-case, underscores as spaces, whitespace collapsed.
pub fn normalize_header(h: &str) -> String {
    let lowered = h.trim().to_lowercase().replace('_', " ");
    WHITESPACE.replace_all(&lowered, " ").trim().to_string()
}

pub fn bind_columns(headers: &[String], binding: ColumnBinding) -> Result<ColumnMap> {
    match binding {
        ColumnBinding::Named => bind_named(headers),
        ColumnBinding::Positional => bind_positional(headers),
    }
}

fn bind_positional(headers: &[String]) -> Result<ColumnMap> {
    if headers.len() != COLUMN_COUNT {
        return Err(ReportError::ColumnCount {
            expected: COLUMN_COUNT,
            found: headers.len(),
        });
    }
    Ok(ColumnMap {
        period: 0,
        fields: Field::ALL.iter().enumerate().map(|(i, f)| (*f, i + 1)).collect(),
    })
}

fn bind_named(headers: &[String]) -> Result<ColumnMap> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let mut used = vec![false; headers.len()];

    // An export often leaves the first header cell blank above the month column.
    let period = normalized
        .iter()
        .position(|h| PERIOD_ALIASES.contains(&h.as_str()))
        .or_else(|| normalized.first().filter(|h| h.is_empty()).map(|_| 0))
        .ok_or_else(|| missing_column("period", headers))?;
    used[period] = true;

    let mut fields = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        let aliases = field_aliases(field);
        // Duplicate headers (two "VAT" columns) are claimed left to right in field order.
        let idx = normalized
            .iter()
            .enumerate()
            .position(|(i, h)| !used[i] && aliases.contains(&h.as_str()))
            .ok_or_else(|| missing_column(field.key(), headers))?;
        used[idx] = true;
        fields.push((field, idx));
    }
    debug!(?fields, period, "bound columns by name");
    Ok(ColumnMap { period, fields })
}

fn missing_column(column: &str, headers: &[String]) -> ReportError {
    ReportError::MissingColumn {
        column: column.to_string(),
        available: headers.to_vec(),
    }
}

/// Apply the configured row window and convert cells. Rows without a period
/// cell (totals, notes under the table) are skipped.
pub fn bind_rows(sheet: &RawSheet, cfg: &SheetConfig) -> Result<Vec<PeriodRow>> {
    let columns = bind_columns(&sheet.headers, cfg.binding)?;
    let mut out = Vec::new();
    let window = sheet
        .rows
        .iter()
        .enumerate()
        .take(cfg.data_rows)
        .skip(cfg.skip_leading_rows);
    for (idx, row) in window {
        // header is line 1
        let line = idx + 2;
        let cell_at = |i: usize| row.get(i).unwrap_or(&EMPTY_CELL);

        let period_cell = cell_at(columns.period);
        if *period_cell == Cell::Empty {
            debug!(line, "skipping row without period");
            continue;
        }
        let period = period_from_cell(period_cell).ok_or_else(|| ReportError::InvalidCell {
            row: line,
            column: "period".into(),
            value: cell_text(period_cell),
        })?;

        let mut figures = PeriodFigures::default();
        let mut missing = Vec::new();
        for (field, i) in &columns.fields {
            let cell = cell_at(*i);
            match decimal_from_cell(cell) {
                Some(Some(v)) => figures.set(*field, v),
                Some(None) => missing.push(*field),
                None => {
                    return Err(ReportError::InvalidCell {
                        row: line,
                        column: field.key().into(),
                        value: cell_text(cell),
                    });
                }
            }
        }
        out.push(PeriodRow {
            period,
            label: period.format("%b %Y").to_string(),
            figures,
            missing,
        });
    }
    Ok(out)
}

fn period_from_cell(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => month_start(*d),
        Cell::Text(s) => parse_period(s),
        Cell::Number(serial) if (1.0..2_958_466.0).contains(serial) => {
            let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
            month_start(epoch + Duration::days(serial.trunc() as i64))
        }
        _ => None,
    }
}

/// `Some(None)` for an empty cell, `None` for a value that is not a number.
fn decimal_from_cell(cell: &Cell) -> Option<Option<Decimal>> {
    match cell {
        Cell::Empty => Some(None),
        Cell::Number(f) => Decimal::try_from(*f).ok().map(Some),
        Cell::Text(s) => parse_amount(s).map(Some),
        Cell::Date(_) => None,
    }
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Number(f) => f.to_string(),
        Cell::Text(s) => s.clone(),
        Cell::Date(d) => d.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_headers() {
        assert_eq!(normalize_header("  Obrót   NETTO "), "obrót netto");
        assert_eq!(normalize_header("net_revenue"), "net revenue");
    }

    #[test]
    fn workbook_cells_map_to_loader_cells() {
        use calamine::{ExcelDateTime, ExcelDateTimeType};

        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(cell_from_data(&Data::Float(12.5)), Cell::Number(12.5));
        assert_eq!(cell_from_data(&Data::Int(-7)), Cell::Number(-7.0));
        assert_eq!(cell_from_data(&Data::String("  ".into())), Cell::Empty);
        assert_eq!(
            cell_from_data(&Data::String("1 234,56".into())),
            Cell::Text("1 234,56".into())
        );
        assert_eq!(
            cell_from_data(&Data::DateTimeIso("2024-05-31T00:00:00".into())),
            Cell::Text("2024-05-31T00:00:00".into())
        );
        assert_eq!(cell_from_data(&Data::Bool(true)), Cell::Text("true".into()));

        // 45443 is 2024-05-31
        let dt = ExcelDateTime::new(45443.0, ExcelDateTimeType::DateTime, false);
        let cell = cell_from_data(&Data::DateTime(dt));
        assert_eq!(cell, Cell::Date(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
        assert_eq!(
            period_from_cell(&cell),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
    }

    #[test]
    fn excel_serial_dates_become_months() {
        // 45566 is 2024-10-01
        let d = period_from_cell(&Cell::Number(45566.0)).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
    }
}
