// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{ReportError, Result};
use crate::forecast::MAX_HORIZON;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Profitlens", "profitlens"));

/// How sheet columns are mapped onto period fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnBinding {
    /// Match normalized header text against the known column names.
    #[default]
    Named,
    /// Assign by position; the sheet must be exactly 13 columns wide.
    Positional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Data rows read below the header.
    pub data_rows: usize,
    /// Rows dropped from the top of the window (the month before the reporting year).
    pub skip_leading_rows: usize,
    pub binding: ColumnBinding,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            data_rows: 14,
            skip_leading_rows: 1,
            binding: ColumnBinding::Named,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub discrepancy_tolerance: Decimal,
    pub cost_outlier_factor: Decimal,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            discrepancy_tolerance: Decimal::ONE,
            cost_outlier_factor: Decimal::from(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub horizon: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self { horizon: 6 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("reports"),
            file: "report.html".to_string(),
        }
    }
}

/// A known outstanding liability listed in the cash-flow check of the recovery plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub business_name: String,
    pub currency: String,
    pub input: Option<PathBuf>,
    pub output: OutputConfig,
    pub sheet: SheetConfig,
    pub validation: ValidationConfig,
    pub forecast: ForecastConfig,
    pub obligations: Vec<Obligation>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            business_name: "My Business".to_string(),
            currency: "PLN".to_string(),
            input: None,
            output: OutputConfig::default(),
            sheet: SheetConfig::default(),
            validation: ValidationConfig::default(),
            forecast: ForecastConfig::default(),
            obligations: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::InvalidConfig(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        let raw = std::fs::read_to_string(path)?;
        let cfg: AppConfig = serde_json::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Explicit path if given, else the platform config file when present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(p) = explicit {
            debug!(path = %p.display(), "loading config");
            return Self::from_path(p);
        }
        if let Some(p) = default_config_path().filter(|p| p.exists()) {
            debug!(path = %p.display(), "loading platform config");
            return Self::from_path(&p);
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.sheet.data_rows <= self.sheet.skip_leading_rows {
            return Err(ReportError::InvalidConfig(format!(
                "sheet.data_rows ({}) must exceed sheet.skip_leading_rows ({})",
                self.sheet.data_rows, self.sheet.skip_leading_rows
            )));
        }
        if self.validation.cost_outlier_factor <= Decimal::ZERO {
            return Err(ReportError::InvalidConfig(
                "validation.cost_outlier_factor must be positive".into(),
            ));
        }
        if self.validation.discrepancy_tolerance < Decimal::ZERO {
            return Err(ReportError::InvalidConfig(
                "validation.discrepancy_tolerance must not be negative".into(),
            ));
        }
        if !(1..=MAX_HORIZON).contains(&self.forecast.horizon) {
            return Err(ReportError::InvalidConfig(format!(
                "forecast.horizon ({}) must be between 1 and {}",
                self.forecast.horizon, MAX_HORIZON
            )));
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.file)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP.0, APP.1, APP.2).map(|p| p.config_dir().join("config.json"))
}
