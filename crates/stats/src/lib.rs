//! JSON file persistence for play statistics.
//!
//! [`JsonFileStore`] implements [`StatsStore`] over a single pretty-printed JSON
//! file. Reads and writes go through `anyhow`-returning helpers; the trait impl
//! logs any failure with `tracing::warn!` and falls back to defaults, so a
//! missing, unreadable or corrupt file never interrupts a game.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use blockfall_core::stats::{Stats, StatsStore};

/// Env var naming an explicit stats file
pub const STATS_PATH_ENV: &str = "BLOCKFALL_STATS_PATH";

const APP_DIR: &str = "blockfall";
const FILE_NAME: &str = "stats.json";
const FALLBACK_FILE_NAME: &str = "blockfall-stats.json";

/// Stats file location from explicit, XDG and home directory candidates, in that order.
pub fn resolve_path(
    explicit: Option<OsString>,
    xdg_data_home: Option<OsString>,
    home: Option<OsString>,
) -> PathBuf {
    if let Some(explicit) = explicit.filter(|p| !p.is_empty()) {
        return PathBuf::from(explicit);
    }

    let base = xdg_data_home
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            home.filter(|p| !p.is_empty()).map(|home| {
                let mut p = PathBuf::from(home);
                p.push(".local");
                p.push("share");
                p
            })
        });

    match base {
        Some(mut path) => {
            path.push(APP_DIR);
            path.push(FILE_NAME);
            path
        }
        None => PathBuf::from(FALLBACK_FILE_NAME),
    }
}

/// Stats kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate the stats file from `BLOCKFALL_STATS_PATH`, `XDG_DATA_HOME` or `HOME`.
    pub fn from_env() -> Self {
        Self::new(resolve_path(
            std::env::var_os(STATS_PATH_ENV),
            std::env::var_os("XDG_DATA_HOME"),
            std::env::var_os("HOME"),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file.
    pub fn try_load(&self) -> Result<Stats> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("read stats file {}", self.path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parse stats file {}", self.path.display()))
    }

    /// Write the file, creating parent directories as needed.
    pub fn try_save(&self, stats: &Stats) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create stats dir {}", parent.display()))?;
            }
        }
        let text = serde_json::to_string_pretty(stats).context("serialize stats")?;
        atomic_write(&self.path, text.as_bytes())
            .with_context(|| format!("write stats file {}", self.path.display()))
    }
}

impl StatsStore for JsonFileStore {
    fn load(&mut self) -> Stats {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no stats file yet");
            return Stats::default();
        }
        match self.try_load() {
            Ok(stats) => stats,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "using default stats");
                Stats::default()
            }
        }
    }

    fn save(&mut self, stats: &Stats) {
        if let Err(err) = self.try_save(stats) {
            tracing::warn!(error = %format!("{err:#}"), "stats not saved");
        }
    }
}

/// Write through a sibling temp file so readers never see a torn file.
fn atomic_write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}
