//! VG-060: CLI subcommands — init, scan, history, completions.

pub mod logging;
pub mod passphrase;

use crate::core::types::{Event, ScanRecord, SentinelState};
use crate::core::{parser, state};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "vigil",
    version,
    about = "Portable file integrity monitor with an encrypted, tamper-evident scan history"
)]
pub struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an encrypted state file from a watch-path config
    Init {
        /// Path to the config (.json, .yaml, .toml)
        #[arg(short, long, default_value = "vigil.json")]
        config: PathBuf,

        /// State file to create
        #[arg(short, long, default_value = "vigil.db")]
        db: PathBuf,

        /// Overwrite an existing state file
        #[arg(long)]
        force: bool,
    },

    /// Scan the watch set, report changes, and re-seal the state
    Scan {
        /// State file
        #[arg(short, long, default_value = "vigil.db")]
        db: PathBuf,

        /// Exit non-zero when any change is detected (for cron)
        #[arg(long)]
        tripwire: bool,
    },

    /// Show recorded scans without scanning
    History {
        /// State file
        #[arg(short, long, default_value = "vigil.db")]
        db: PathBuf,

        /// Only show the most recent N scans
        #[arg(short = 'n', long)]
        last: Option<usize>,
    },

    /// Print shell completions to stdout
    Completions {
        shell: clap_complete::Shell,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Init { config, db, force } => cmd_init(&config, &db, force),
        Commands::Scan { db, tripwire } => cmd_scan(&db, tripwire),
        Commands::History { db, last } => cmd_history(&db, last),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "vigil", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn cmd_init(config_path: &Path, db: &Path, force: bool) -> Result<(), String> {
    if db.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to replace it)",
            db.display()
        ));
    }

    let config = parser::parse_config_file(config_path).map_err(|e| e.to_string())?;
    let errors = parser::validate_config(&config);
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        return Err(format!("{} validation error(s)", errors.len()));
    }

    println!("Verifying watch paths are readable...");
    let problems = parser::verify_watch_paths(&config);
    for p in readable_paths(&config.watch_paths, &problems) {
        println!("  {} -> OK", p);
    }
    if !problems.is_empty() {
        for (_, e) in &problems {
            eprintln!("  ERROR: {}", e);
        }
        return Err(format!("{} unreadable watch path(s)", problems.len()));
    }

    let sentinel = SentinelState::new(&config).map_err(|e| e.to_string())?;
    let pass = passphrase::read_new_passphrase().map_err(|e| e.to_string())?;
    state::save(&sentinel, db, &pass).map_err(|e| e.to_string())?;

    log::info!(
        "initialized {} watching {} path(s) with {}",
        db.display(),
        config.watch_paths.len(),
        config.digest
    );
    println!("Created {}", db.display());
    println!(
        "  The config at {} is no longer needed; run `vigil scan` next.",
        config_path.display()
    );
    Ok(())
}

fn cmd_scan(db: &Path, tripwire_mode: bool) -> Result<(), String> {
    let pass = passphrase::read_passphrase(db).map_err(|e| e.to_string())?;
    let mut sentinel = state::load(db, &pass).map_err(|e| e.to_string())?;
    let events = sentinel.scan().map_err(|e| e.to_string())?;

    let now = sentinel
        .history()
        .last()
        .map(|r| r.timestamp.to_rfc3339())
        .unwrap_or_default();
    println!();
    println!("Scan results for {}:", now);
    println!();
    print_events(&events, "");

    println!();
    println!("Prior scans:");
    print_history(sentinel.history());

    state::save(&sentinel, db, &pass).map_err(|e| e.to_string())?;

    if tripwire_mode && !events.is_empty() {
        return Err(format!("{} integrity event(s)", events.len()));
    }
    Ok(())
}

fn cmd_history(db: &Path, last: Option<usize>) -> Result<(), String> {
    let pass = passphrase::read_passphrase(db).map_err(|e| e.to_string())?;
    let sentinel = state::load(db, &pass).map_err(|e| e.to_string())?;

    println!(
        "{}: {} watch path(s), {} known object(s), {} scan(s)",
        db.display(),
        sentinel.watch_paths().len(),
        sentinel.known_objects().len(),
        sentinel.history().len()
    );
    print_history(tail(sentinel.history(), last));
    Ok(())
}

/// Watch paths with no entry in `problems`.
fn readable_paths<'a>(
    watch_paths: &'a [String],
    problems: &[(usize, parser::ValidationError)],
) -> Vec<&'a str> {
    watch_paths
        .iter()
        .enumerate()
        .filter(|(i, _)| !problems.iter().any(|(j, _)| j == i))
        .map(|(_, p)| p.as_str())
        .collect()
}

/// The last `n` records, or all of them.
fn tail(history: &[ScanRecord], n: Option<usize>) -> &[ScanRecord] {
    match n {
        Some(n) if n < history.len() => &history[history.len() - n..],
        _ => history,
    }
}

/// One report line for an event.
pub fn format_event(ev: &Event) -> String {
    let old = if ev.old_digest.is_empty() {
        "(none)"
    } else {
        ev.old_digest.as_str()
    };
    format!(
        "[{} {}] {} -> {}",
        ev.kind,
        ev.path.display(),
        old,
        ev.new_digest
    )
}

fn print_events(events: &[Event], indent: &str) {
    if events.is_empty() {
        println!("{}No changes detected.", indent);
    }
    for ev in events {
        println!("{}{}", indent, format_event(ev));
    }
}

fn print_history(history: &[ScanRecord]) {
    for record in history {
        println!();
        println!("[{}]:", record.timestamp.to_rfc3339());
        print_events(&record.events, "    ");
    }
}
