//! Build version descriptor used to tell a running copy that a newer build
//! has been published.

use std::{fs, path::Path};

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const APP_NAME: &str = "Math Sprouts";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: String,
    /// Milliseconds since the Unix epoch.
    pub build_time: i64,
    /// RFC 3339 rendering of `build_time`.
    pub build_date: String,
}

impl VersionInfo {
    pub fn for_build(version: impl Into<String>, build_time: i64) -> Self {
        let build_date = Utc
            .timestamp_millis_opt(build_time)
            .single()
            .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
            .unwrap_or_default();
        VersionInfo { version: version.into(), build_time, build_date }
    }

    /// Descriptor for this crate, stamped now.
    pub fn current() -> Self {
        Self::for_build(env!("CARGO_PKG_VERSION"), Utc::now().timestamp_millis())
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// True when this (fetched) descriptor is newer than the running build.
    pub fn is_newer_than(&self, local_build_time: i64) -> bool {
        self.build_time > local_build_time
    }

    /// `YYYY-MM-DD HH:MM` in local time.
    pub fn format_build_time(&self) -> String {
        match Local.timestamp_millis_opt(self.build_time).single() {
            Some(t) => format_local(t),
            None => String::new(),
        }
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let raw = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, raw)?;
        info!(version = %self.version, path = %path.display(), "wrote version descriptor");
        Ok(())
    }
}

fn format_local(t: DateTime<Local>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}
