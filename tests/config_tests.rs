// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use profitlens::config::{AppConfig, ColumnBinding};
use profitlens::error::ReportError;
use rust_decimal::Decimal;
use tempfile::tempdir;

#[test]
fn partial_config_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "business_name": "Panorama",
            "sheet": {"binding": "positional"},
            "validation": {"discrepancy_tolerance": "5"},
            "obligations": [{"name": "VAT", "amount": "50000"}]
        }"#,
    )
    .unwrap();
    let cfg = AppConfig::load(Some(&path)).unwrap();
    assert_eq!(cfg.business_name, "Panorama");
    assert_eq!(cfg.currency, "PLN");
    assert_eq!(cfg.sheet.binding, ColumnBinding::Positional);
    assert_eq!(cfg.sheet.data_rows, 14);
    assert_eq!(cfg.sheet.skip_leading_rows, 1);
    assert_eq!(cfg.validation.discrepancy_tolerance, Decimal::from(5));
    assert_eq!(cfg.validation.cost_outlier_factor, Decimal::from(2));
    assert_eq!(cfg.forecast.horizon, 6);
    assert_eq!(cfg.obligations.len(), 1);
    assert_eq!(cfg.output_path(), std::path::PathBuf::from("reports/report.html"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempdir().unwrap();
    let err = AppConfig::load(Some(&dir.path().join("missing.json"))).unwrap_err();
    assert!(matches!(err, ReportError::InvalidConfig(_)));
}

#[test]
fn rejects_empty_row_window() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"sheet": {"data_rows": 1, "skip_leading_rows": 1}}"#).unwrap();
    assert!(matches!(
        AppConfig::load(Some(&path)),
        Err(ReportError::InvalidConfig(_))
    ));
}

#[test]
fn forecast_horizon_must_be_bounded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    for horizon in ["0", "121", "18446744073709551615"] {
        std::fs::write(&path, format!(r#"{{"forecast": {{"horizon": {horizon}}}}}"#)).unwrap();
        assert!(
            matches!(AppConfig::load(Some(&path)), Err(ReportError::InvalidConfig(_))),
            "horizon {horizon} accepted"
        );
    }
    std::fs::write(&path, r#"{"forecast": {"horizon": 120}}"#).unwrap();
    assert_eq!(AppConfig::load(Some(&path)).unwrap().forecast.horizon, 120);
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        AppConfig::load(Some(&path)),
        Err(ReportError::Serialization(_))
    ));
}
