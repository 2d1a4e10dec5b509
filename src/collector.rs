use std::collections::BTreeSet;

/// Symbols defined by the build system itself, never offered for toggling
pub const DEFAULT_IGNORED_DEFINES: &[&str] = &[
    "true",
    "false",
    "DEBUG",
    "DEVELOPMENT_BUILD",
    "ENABLE_MONO",
    "ENABLE_IL2CPP",
    "ENABLE_DOTNET",
    "NETFX_CORE",
    "NET_2_0",
    "NET_2_0_SUBSET",
    "NET_4_6",
    "ENABLE_WINMD_SUPPORT",
];

/// Prefixes reserved for engine-provided symbols
pub const DEFAULT_RESERVED_PREFIXES: &[&str] = &["UNITY_"];

/// Acceptance policy for discovered symbol names
#[derive(Debug, Clone)]
pub struct SymbolFilter {
    /// Exact names to reject (case-sensitive)
    pub ignored: Vec<String>,
    /// Names starting with any of these are rejected
    pub reserved_prefixes: Vec<String>,
}

impl SymbolFilter {
    /// Filter that accepts every name
    pub fn permissive() -> Self {
        Self {
            ignored: Vec::new(),
            reserved_prefixes: Vec::new(),
        }
    }

    /// Whether a name should be kept
    pub fn accepts(&self, name: &str) -> bool {
        !self.ignored.iter().any(|i| i == name)
            && !self
                .reserved_prefixes
                .iter()
                .any(|p| name.starts_with(p.as_str()))
    }
}

impl Default for SymbolFilter {
    fn default() -> Self {
        Self {
            ignored: DEFAULT_IGNORED_DEFINES.iter().map(|s| s.to_string()).collect(),
            reserved_prefixes: DEFAULT_RESERVED_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Deduplicating sink for names produced by the extractor
#[derive(Debug, Clone, Default)]
pub struct DefineCollector {
    filter: SymbolFilter,
    symbols: BTreeSet<String>,
}

impl DefineCollector {
    pub fn new(filter: SymbolFilter) -> Self {
        Self {
            filter,
            symbols: BTreeSet::new(),
        }
    }

    /// Offer a name; returns true if it was accepted and not already known
    pub fn offer(&mut self, name: &str) -> bool {
        if !self.filter.accepts(name) || self.symbols.contains(name) {
            return false;
        }

        self.symbols.insert(name.to_string())
    }

    pub fn symbols(&self) -> &BTreeSet<String> {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Drop everything collected so far, keeping the filter
    pub fn reset(&mut self) {
        self.symbols.clear();
    }

    pub fn into_symbols(self) -> BTreeSet<String> {
        self.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_line;

    #[test]
    fn test_default_filter_rejects_intrinsics() {
        let filter = SymbolFilter::default();
        assert!(!filter.accepts("DEBUG"));
        assert!(!filter.accepts("true"));
        assert!(!filter.accepts("NET_4_6"));
        assert!(!filter.accepts("UNITY_EDITOR"));
        assert!(!filter.accepts("UNITY_"));
        assert!(filter.accepts("MY_FEATURE"));
        // Denylist matching is case-sensitive
        assert!(filter.accepts("Debug"));
        assert!(filter.accepts("unity_editor"));
    }

    #[test]
    fn test_permissive_filter() {
        let filter = SymbolFilter::permissive();
        assert!(filter.accepts("DEBUG"));
        assert!(filter.accepts("UNITY_EDITOR"));
    }

    #[test]
    fn test_offer_deduplicates() {
        let mut collector = DefineCollector::new(SymbolFilter::default());
        assert!(collector.offer("FOO"));
        assert!(!collector.offer("FOO"));
        assert!(!collector.offer("DEBUG"));
        assert!(collector.offer("BAR"));

        let names: Vec<&str> = collector.symbols().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["BAR", "FOO"]);
    }

    #[test]
    fn test_reset_keeps_filter() {
        let mut collector = DefineCollector::new(SymbolFilter::default());
        collector.offer("FOO");
        collector.reset();
        assert!(collector.is_empty());
        assert!(!collector.offer("UNITY_IOS"));
        assert!(collector.offer("FOO"));
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_collects_from_extractor() {
        let mut collector = DefineCollector::new(SymbolFilter::default());
        let lines = [
            "#define LOGGING",
            "#if UNITY_EDITOR || LOGGING",
            "#if DEBUG && !HEADLESS",
        ];

        let mut emitted = 0;
        for line in lines {
            emitted += extract_line(line, |name| {
                collector.offer(name);
            });
        }

        assert_eq!(emitted, 5);
        assert_eq!(
            collector.into_symbols().into_iter().collect::<Vec<_>>(),
            vec!["HEADLESS".to_string(), "LOGGING".to_string()]
        );
    }
}
