// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ROSTER_LOG";

/// Installs the global subscriber. The terminal belongs to the TUI, so
/// events go to an append-only file instead of stderr.
pub fn init(path: &Path, level: &str) -> Result<()> {
    let file = open_log_file(path)?;
    let directive = filter_directive(env::var(LOG_ENV).ok(), level);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter {directive:?}; check {LOG_ENV}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))
}

/// A non-blank `ROSTER_LOG` wins over the configured level.
fn filter_directive(env_value: Option<String>, level: &str) -> String {
    match env_value {
        Some(value) if !value.trim().is_empty() => value,
        _ => level.to_owned(),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}
