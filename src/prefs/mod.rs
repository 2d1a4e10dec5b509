mod error;


pub use error::PrefsError;

use crate::scanner::DEFAULT_IGNORED_PATHS;
use crate::target::BuildTargetGroup;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Newline-joined names found by the last scan
pub const DEFINES_CACHE_KEY: &str = "CachedPreprocessorDefines";

/// RFC 3339 time of the last stored scan
pub const DEFINES_SCANNED_AT_KEY: &str = "CachedPreprocessorDefinesScannedAt";

/// Newline-joined root-relative prefixes excluded from scanning
pub const IGNORED_PATHS_KEY: &str = "PreprocessorDefinesIgnoredPaths";

/// Prefix of the per-group `;`-delimited enabled define list
pub const ENABLED_DEFINES_KEY_PREFIX: &str = "ScriptingDefineSymbols.";

/// Key-value preference store backed by SQLite
///
/// Values are opaque strings; the typed accessors below own the encoding.
pub struct PrefsStore {
    conn: Connection,
}

impl PrefsStore {
    /// Open (or create) a store file, creating parent directories as needed
    pub fn open(path: &Path) -> Result<Self, PrefsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        debug!("Opening preference store at {}", path.display());
        let store = Self {
            conn: Connection::open(path)?,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create a store that lives only as long as this value
    pub fn open_in_memory() -> Result<Self, PrefsError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), PrefsError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS prefs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Raw key-value access
    // ------------------------------------------------------------------

    /// Stored value for `key`, or `default` if unset
    pub fn get_string(&self, key: &str, default: &str) -> Result<String, PrefsError> {
        let value = self
            .conn
            .query_row("SELECT value FROM prefs WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;

        Ok(value.unwrap_or_else(|| default.to_string()))
    }

    pub fn set_string(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO prefs (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), PrefsError> {
        self.conn.execute("DELETE FROM prefs WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cached scan results
    // ------------------------------------------------------------------

    pub fn cached_defines(&self) -> Result<BTreeSet<String>, PrefsError> {
        Ok(split_list(&self.get_string(DEFINES_CACHE_KEY, "")?, '\n')
            .into_iter()
            .collect())
    }

    /// Replace the cached scan results and stamp the scan time
    pub fn set_cached_defines<'a, I>(&self, names: I) -> Result<(), PrefsError>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let joined = join_list(names, '\n');
        self.set_string(DEFINES_CACHE_KEY, &joined)?;
        self.set_string(DEFINES_SCANNED_AT_KEY, &Utc::now().to_rfc3339())
    }

    pub fn clear_cached_defines(&self) -> Result<(), PrefsError> {
        self.set_string(DEFINES_CACHE_KEY, "")?;
        self.remove(DEFINES_SCANNED_AT_KEY)
    }

    /// Time of the last stored scan, if any and if readable
    pub fn last_scanned_at(&self) -> Result<Option<DateTime<Utc>>, PrefsError> {
        let raw = self.get_string(DEFINES_SCANNED_AT_KEY, "")?;
        Ok(DateTime::parse_from_rfc3339(&raw)
            .ok()
            .map(|t| t.with_timezone(&Utc)))
    }

    // ------------------------------------------------------------------
    // Ignored paths
    // ------------------------------------------------------------------

    pub fn ignored_paths(&self) -> Result<Vec<String>, PrefsError> {
        let default = DEFAULT_IGNORED_PATHS.join("\n");
        Ok(split_list(&self.get_string(IGNORED_PATHS_KEY, &default)?, '\n'))
    }

    /// Add a prefix to the ignore list; returns false if empty or already present
    pub fn ignore_path(&self, path: &str) -> Result<bool, PrefsError> {
        if path.is_empty() {
            return Ok(false);
        }

        let mut paths = self.ignored_paths()?;
        if paths.iter().any(|p| p == path) {
            return Ok(false);
        }

        paths.push(path.to_string());
        self.set_string(IGNORED_PATHS_KEY, &join_list(&paths, '\n'))?;
        Ok(true)
    }

    /// Remove a prefix from the ignore list; returns false if it was absent
    pub fn unignore_path(&self, path: &str) -> Result<bool, PrefsError> {
        let mut paths = self.ignored_paths()?;
        let Some(index) = paths.iter().position(|p| p == path) else {
            return Ok(false);
        };

        paths.remove(index);
        self.set_string(IGNORED_PATHS_KEY, &join_list(&paths, '\n'))?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Enabled defines per build target group
    // ------------------------------------------------------------------

    /// Raw `;`-delimited define string for a group
    pub fn enabled_defines_raw(&self, group: BuildTargetGroup) -> Result<String, PrefsError> {
        self.get_string(&enabled_key(group), "")
    }

    pub fn enabled_defines(&self, group: BuildTargetGroup) -> Result<Vec<String>, PrefsError> {
        Ok(split_list(&self.enabled_defines_raw(group)?, ';'))
    }

    /// Store the enabled list for a group; returns false if nothing changed
    pub fn set_enabled_defines(
        &self,
        group: BuildTargetGroup,
        defines: &[String],
    ) -> Result<bool, PrefsError> {
        let joined = join_list(defines, ';');
        if joined == self.enabled_defines_raw(group)? {
            return Ok(false);
        }

        debug!("Setting {} defines to {:?}", group, joined);
        self.set_string(&enabled_key(group), &joined)?;
        Ok(true)
    }
}

fn enabled_key(group: BuildTargetGroup) -> String {
    format!("{}{}", ENABLED_DEFINES_KEY_PREFIX, group)
}

/// Split a delimited value, dropping empty entries
fn split_list(value: &str, delimiter: char) -> Vec<String> {
    value
        .split(delimiter)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn join_list<'a, I>(items: I, delimiter: char) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    items
        .into_iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(delimiter.to_string().as_str())
}
