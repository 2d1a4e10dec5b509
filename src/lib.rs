// Public API exports
pub mod collector;
pub mod extract;
pub mod prefs;
pub mod scanner;
pub mod session;
pub mod target;

// Re-export main types for convenience
pub use extract::{CONDITIONAL_MARKER, DEFINE_MARKER, extract_line, extract_symbols};

pub use collector::{DefineCollector, SymbolFilter};

pub use scanner::{NoProgress, ScanConfig, ScanError, ScanProgress, ScanReport, scan};

pub use prefs::{PrefsError, PrefsStore};

pub use session::{DefineRow, DefineSession};

pub use target::{BuildTarget, BuildTargetGroup};
