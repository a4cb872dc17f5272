// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod derive;
pub mod error;
pub mod forecast;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod planner;
pub mod render;
pub mod sales;
pub mod savings;
pub mod stats;
pub mod utils;
