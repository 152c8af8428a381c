// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tp config` - Print the effective configuration

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    /// TOML config file; defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn config(args: ConfigArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
