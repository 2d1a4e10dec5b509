mod error;


pub use error::ScanError;

use crate::collector::DefineCollector;
use crate::extract::extract_line;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Extensions scanned when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["cs"];

/// Root-relative prefixes skipped when none are configured
pub const DEFAULT_IGNORED_PATHS: &[&str] = &["WebPlayerTemplates/"];

/// What to scan and what to leave out
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Project root; ignored paths are relative to it
    pub root: PathBuf,
    /// File extensions without the dot, compared case-insensitively
    pub extensions: Vec<String>,
    /// Root-relative path prefixes using `/` separators
    pub ignored_paths: Vec<String>,
}

impl ScanConfig {
    /// Create a config with the default extensions and ignored paths
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            ignored_paths: DEFAULT_IGNORED_PATHS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn ignored_paths(mut self, ignored_paths: Vec<String>) -> Self {
        self.ignored_paths = ignored_paths;
        self
    }

    fn wants_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn is_ignored(&self, relative_path: &str) -> bool {
        self.ignored_paths
            .iter()
            .filter(|p| !p.is_empty())
            .any(|p| relative_path.starts_with(p.as_str()))
    }
}

/// Progress hook invoked between files
pub trait ScanProgress {
    /// Report progress; returning false cancels the scan
    ///
    /// # Arguments
    /// * `fraction` - Files done over files total, in `0.0..1.0`
    /// * `current` - Root-relative path of the next file (empty before the first)
    fn update(&mut self, fraction: f32, current: &str) -> bool;
}

impl<F> ScanProgress for F
where
    F: FnMut(f32, &str) -> bool,
{
    fn update(&mut self, fraction: f32, current: &str) -> bool {
        self(fraction, current)
    }
}

/// Progress hook that never cancels
pub struct NoProgress;

impl ScanProgress for NoProgress {
    fn update(&mut self, _fraction: f32, _current: &str) -> bool {
        true
    }
}

/// Outcome of a completed scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub symbols: BTreeSet<String>,
    pub files_scanned: usize,
    pub lines_scanned: usize,
}

/// List candidate files under the root, sorted by relative path
///
/// Returns `(absolute path, root-relative path)` pairs.
pub fn collect_files(config: &ScanConfig) -> Result<Vec<(PathBuf, String)>, ScanError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(&config.root).follow_links(false) {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || !config.wants_extension(path) {
            continue;
        }

        let relative = relative_path(&config.root, path);
        if config.is_ignored(&relative) {
            debug!("Skipping ignored file {}", relative);
            continue;
        }

        files.push((path.to_path_buf(), relative));
    }

    files.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(files)
}

/// Scan every candidate file, feeding each line through the extractor
///
/// The collector is reset first. On cancellation or a read failure it is
/// reset again so no partial result is left behind.
pub fn scan(
    config: &ScanConfig,
    collector: &mut DefineCollector,
    progress: &mut dyn ScanProgress,
) -> Result<ScanReport, ScanError> {
    collector.reset();

    if !progress.update(0.0, "") {
        return Err(ScanError::Cancelled);
    }

    info!("Scanning {} for preprocessor defines", config.root.display());
    let files = collect_files(config)?;
    let total = files.len();
    let mut lines_scanned = 0;

    for (index, (path, relative)) in files.iter().enumerate() {
        if !progress.update(index as f32 / total as f32, relative) {
            collector.reset();
            return Err(ScanError::Cancelled);
        }

        match scan_file(path, collector) {
            Ok(lines) => lines_scanned += lines,
            Err(e) => {
                collector.reset();
                return Err(e);
            }
        }
    }

    info!(
        "Found {} defines in {} files ({} lines)",
        collector.len(),
        total,
        lines_scanned
    );

    Ok(ScanReport {
        symbols: collector.symbols().clone(),
        files_scanned: total,
        lines_scanned,
    })
}

/// Feed one file through the extractor line by line; returns the line count
fn scan_file(path: &Path, collector: &mut DefineCollector) -> Result<usize, ScanError> {
    let io_err = |source: std::io::Error| ScanError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut buf = Vec::new();
    let mut lines = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(io_err)? == 0 {
            break;
        }
        lines += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        extract_line(line, |name| {
            if collector.offer(name) {
                debug!("Found define {} in {}", name, path.display());
            }
        });
    }

    Ok(lines)
}

/// Root-relative path joined with forward slashes
fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
