// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use num_format::{Locale, ToFormattedString};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

static AMOUNT_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\s\u{a0}]|zł|pln").expect("static amount pattern")
});

/// Parse an amount as typed into a spreadsheet: `1 234,56 zł`, `1.234,56`, `1,234.56`, `-50`.
/// The rightmost `,` or `.` is the decimal mark; the other must sit on 3-digit group
/// boundaries. A lone `d,ddd` could be either and is rejected. Returns `None` for
/// empty or non-numeric text.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = AMOUNT_NOISE.replace_all(s.trim(), "");
    if cleaned.is_empty() {
        return None;
    }
    let (sign, body) = match cleaned.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", cleaned.as_ref()),
    };
    let normalized = match body.rfind([',', '.']) {
        None => body.to_string(),
        Some(pos) => {
            let mark = if body[pos..].starts_with(',') { ',' } else { '.' };
            let group = if mark == ',' { '.' } else { ',' };
            let (int_part, frac) = (&body[..pos], &body[pos + 1..]);
            if int_part.contains(mark) {
                // repeated mark: grouping only, no decimals
                if int_part.contains(group) {
                    return None;
                }
                ungroup(body, mark)?
            } else if int_part.contains(group) {
                format!("{}.{}", ungroup(int_part, group)?, frac)
            } else if mark == ','
                && frac.len() == 3
                && (1..=3).contains(&int_part.len())
                && !int_part.starts_with('0')
            {
                return None;
            } else {
                format!("{}.{}", int_part, frac)
            }
        }
    };
    format!("{}{}", sign, normalized).parse::<Decimal>().ok()
}

/// Digits of `s` with `sep` removed, provided every group after the first is 3 digits.
fn ungroup(s: &str, sep: char) -> Option<String> {
    let all_digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    let mut groups = s.split(sep);
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || !all_digits(first) {
        return None;
    }
    let mut out = first.to_string();
    for g in groups {
        if g.len() != 3 || !all_digits(g) {
            return None;
        }
        out.push_str(g);
    }
    Some(out)
}

/// Parse a calendar month from `YYYY-MM`, `YYYY-MM-DD` or an ISO datetime, returning
/// the first day of that month.
pub fn parse_period(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let day = match s.get(..10) {
        Some(head) if s.len() >= 10 => NaiveDate::parse_from_str(head, "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").ok(),
    }?;
    month_start(day)
}

pub fn month_start(d: NaiveDate) -> Option<NaiveDate> {
    use chrono::Datelike;
    NaiveDate::from_ymd_opt(d.year(), d.month(), 1)
}

/// Group the integer part with thousands separators, keep `dp` decimals.
pub fn fmt_amount(d: &Decimal, dp: u32) -> String {
    let rounded = d.round_dp(dp);
    let neg = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.*}", dp as usize, rounded.abs());
    let mut parts = plain.split('.');
    let int_part: u128 = parts.next().and_then(|p| p.parse().ok()).unwrap_or_default();
    let mut out = int_part.to_formatted_string(&Locale::en);
    if let Some(frac) = parts.next() {
        out.push('.');
        out.push_str(frac);
    }
    if neg { format!("-{}", out) } else { out }
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", fmt_amount(d, 0), ccy)
}

pub fn fmt_pct(d: &Decimal) -> String {
    format!("{}%", fmt_amount(d, 1))
}

pub fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn parses_polish_and_english_amounts() {
        assert_eq!(parse_amount("1 234,56 zł"), Some(dec("1234.56")));
        assert_eq!(parse_amount("1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("-50"), Some(dec("-50")));
        assert_eq!(parse_amount("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("-1.234.567"), Some(dec("-1234567")));
        assert_eq!(parse_amount("1,234,567.5"), Some(dec("1234567.5")));
        assert_eq!(parse_amount("12,5"), Some(dec("12.5")));
        assert_eq!(parse_amount("0,125"), Some(dec("0.125")));
        assert_eq!(parse_amount("1234,567"), Some(dec("1234.567")));
        // grouping or decimals, cannot tell
        assert_eq!(parse_amount("1,234"), None);
        // misplaced group separators
        assert_eq!(parse_amount("12.34,5"), None);
        assert_eq!(parse_amount("1,23.5"), None);
        assert_eq!(parse_amount("  "), None);
        assert_eq!(parse_amount("n/a"), None);
    }

    #[test]
    fn parses_month_labels() {
        let sep = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(parse_period("2024-09"), Some(sep));
        assert_eq!(parse_period("2024-09-30"), Some(sep));
        assert_eq!(parse_period("2024-09-30T00:00:00"), Some(sep));
        assert_eq!(parse_period("September"), None);
    }

    #[test]
    fn formats_grouped_amounts() {
        assert_eq!(fmt_amount(&dec("1234567.891"), 2), "1,234,567.89");
        assert_eq!(fmt_amount(&dec("-9876.4"), 0), "-9,876");
        assert_eq!(fmt_money(&dec("0.2"), "PLN"), "0 PLN");
        assert_eq!(
            fmt_amount(&dec("12345678901234567890"), 0),
            "12,345,678,901,234,567,890"
        );
    }
}
