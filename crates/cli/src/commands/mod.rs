// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod config;
pub mod simulate;

use anyhow::{Context, Result};
use std::path::Path;
use tp_core::TimepieceConfig;

/// Load `path`, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<TimepieceConfig> {
    match path {
        Some(path) => TimepieceConfig::load(path)
            .with_context(|| format!("invalid config file {}", path.display())),
        None => Ok(TimepieceConfig::default()),
    }
}
