use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use scriptdefs::{
    BuildTarget, DefineCollector, DefineSession, PrefsStore, ScanConfig, ScanError, ScanProgress,
    SymbolFilter, scan,
};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scriptdefs", version, about = "Find and toggle preprocessor define symbols")]
struct Cli {
    /// Preference store location
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Build target whose define symbols are read and written
    #[arg(long, global = true, ignore_case = true, default_value_t = BuildTarget::default())]
    target: BuildTarget,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a project for defines and refresh the cache
    Scan {
        /// Project root to scan
        root: PathBuf,
        /// File extensions to scan (repeatable)
        #[arg(long = "ext", default_value = "cs")]
        extensions: Vec<String>,
        /// Print the scan report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show cached defines and whether each is enabled
    List {
        #[arg(long)]
        json: bool,
    },
    /// Enable or disable defines for the target
    Set {
        #[arg(long = "enable")]
        enable: Vec<String>,
        #[arg(long = "disable")]
        disable: Vec<String>,
        /// Show the changes without storing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the raw define string for the target
    Enabled,
    /// Manage path prefixes excluded from scanning
    Ignore {
        #[command(subcommand)]
        action: IgnoreAction,
    },
    /// Forget the cached scan results
    ClearCache,
}

#[derive(Subcommand)]
enum IgnoreAction {
    List,
    Add { path: String },
    Remove { path: String },
}

/// Reports scan progress through the log; never cancels
struct LogProgress;

impl ScanProgress for LogProgress {
    fn update(&mut self, fraction: f32, current: &str) -> bool {
        if !current.is_empty() {
            debug!("[{:>3.0}%] {}", fraction * 100.0, current);
        }
        true
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let prefs_path = cli.prefs.clone().unwrap_or_else(default_prefs_path);
    let prefs = PrefsStore::open(&prefs_path)
        .with_context(|| format!("Failed to open preferences at {}", prefs_path.display()))?;

    match cli.command {
        Command::Scan {
            root,
            extensions,
            json,
        } => run_scan(&prefs, root, extensions, json),
        Command::List { json } => run_list(&prefs, cli.target, json),
        Command::Set {
            enable,
            disable,
            dry_run,
        } => run_set(&prefs, cli.target, &enable, &disable, dry_run),
        Command::Enabled => {
            println!("{}", prefs.enabled_defines_raw(cli.target.group())?);
            Ok(())
        }
        Command::Ignore { action } => run_ignore(&prefs, action),
        Command::ClearCache => {
            prefs.clear_cached_defines()?;
            println!("✓ Cleared cached defines");
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_prefs_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("scriptdefs").join("prefs.db"))
        .unwrap_or_else(|| PathBuf::from(".scriptdefs.db"))
}

fn run_scan(
    prefs: &PrefsStore,
    root: PathBuf,
    extensions: Vec<String>,
    json: bool,
) -> Result<()> {
    if !root.is_dir() {
        bail!("Not a directory: {}", root.display());
    }

    prefs.clear_cached_defines()?;

    let config = ScanConfig::new(root)
        .extensions(extensions)
        .ignored_paths(prefs.ignored_paths()?);
    let mut collector = DefineCollector::new(SymbolFilter::default());

    let report = match scan(&config, &mut collector, &mut LogProgress) {
        Ok(report) => report,
        Err(ScanError::Cancelled) => bail!("User canceled"),
        Err(e) => return Err(e).context("Failed to scan project"),
    };

    prefs.set_cached_defines(&report.symbols)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "✓ Found {} defines in {} files",
        report.symbols.len(),
        report.files_scanned
    );
    for name in &report.symbols {
        println!("  {}", name);
    }

    Ok(())
}

fn run_list(prefs: &PrefsStore, target: BuildTarget, json: bool) -> Result<()> {
    let group = target.group();
    let session = DefineSession::new(prefs.cached_defines()?, prefs.enabled_defines(group)?);
    let rows = session.rows();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Defines ({}) for {}", rows.len(), group);
    match prefs.last_scanned_at()? {
        Some(at) => println!("Last scanned: {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("Never scanned; run `scriptdefs scan <ROOT>`"),
    }

    for row in rows {
        println!("  [{}] {}", if row.enabled { "x" } else { " " }, row.name);
    }

    Ok(())
}

fn run_set(
    prefs: &PrefsStore,
    target: BuildTarget,
    enable: &[String],
    disable: &[String],
    dry_run: bool,
) -> Result<()> {
    let group = target.group();
    let mut session = DefineSession::new(prefs.cached_defines()?, prefs.enabled_defines(group)?);

    for name in enable.iter().chain(disable) {
        if !session.known().contains(name) {
            warn!("{} was not found by the last scan", name);
        }
    }

    for name in enable {
        session.toggle(name, true);
    }
    for name in disable {
        session.toggle(name, false);
    }

    if session.change_count() == 0 {
        println!("No changes");
        return Ok(());
    }

    println!("Changes: {}", session.change_count());
    let mut shown = BTreeSet::new();
    for name in enable.iter().chain(disable) {
        if session.is_modified(name) && shown.insert(name) {
            println!("  {} {}", if session.is_set(name) { "+" } else { "-" }, name);
        }
    }

    if dry_run {
        return Ok(());
    }

    let defines = session.apply();
    if prefs.set_enabled_defines(group, &defines)? {
        println!("✓ Applied to {}: {}", group, defines.join(";"));
    } else {
        println!("✓ {} already up to date", group);
    }

    Ok(())
}

fn run_ignore(prefs: &PrefsStore, action: IgnoreAction) -> Result<()> {
    match action {
        IgnoreAction::List => {
            for path in prefs.ignored_paths()? {
                println!("{}", path);
            }
        }
        IgnoreAction::Add { path } => {
            if path.is_empty() {
                bail!("Ignored path must not be empty");
            }
            if prefs.ignore_path(&path)? {
                println!("✓ Ignoring {}", path);
            } else {
                println!("{} is already ignored", path);
            }
        }
        IgnoreAction::Remove { path } => {
            if prefs.unignore_path(&path)? {
                println!("✓ No longer ignoring {}", path);
            } else {
                println!("{} was not ignored", path);
            }
        }
    }

    Ok(())
}
