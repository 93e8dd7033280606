use clap::Parser;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod calendar;
mod config;
mod date;
mod editor;
mod entry;
mod error;
mod history;
mod storage;
mod streak;
mod timer;
mod view;

use app::App;
use config::Config;
use date::SystemClock;
use editor::EditorController;
use entry::EntryStore;
use storage::{FileStorage, MemoryStorage, Storage};

/// One journal entry a day, 240 words at most.
#[derive(Debug, Parser)]
#[command(name = "twofourty", version, about)]
struct Args {
    /// Print streak and the last week, then exit
    #[arg(long)]
    stats: bool,

    /// Entry file to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write into memory only; nothing is saved
    #[arg(long)]
    scratch: bool,
}

fn init_logging(log_file: &Path) {
    if let Some(parent) = log_file.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(log_file) else {
        return;
    };

    let filter = EnvFilter::try_from_env("TWOFOURTY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn print_stats<S: Storage>(editor: &EditorController<S>) -> io::Result<()> {
    let mut stdout = io::stdout();
    let days = editor.store().days_with_entries();

    execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print("twofourty"),
        ResetColor,
        Print(format!("  {}\n\n", editor.today().label()))
    )?;

    let streak = editor.streak();
    let streak_text = view::streak_label(streak).unwrap_or_else(|| "no streak yet".to_string());
    execute!(
        stdout,
        Print(format!("{:<16}", "Current streak:")),
        SetForegroundColor(if streak > 0 { Color::Yellow } else { Color::DarkGrey }),
        Print(format!("{}\n", streak_text)),
        ResetColor,
        Print(format!("{:<16}", "Total entries:")),
        SetForegroundColor(Color::Magenta),
        Print(format!("{}\n", days.len())),
        ResetColor
    )?;

    if let Some(last) = days.last().and_then(|day| editor.store().get(*day)) {
        execute!(
            stdout,
            Print(format!("{:<16}", "Last entry:")),
            Print(format!(
                "{}{}\n",
                last.day.label(),
                if last.locked { " · locked" } else { "" }
            ))
        )?;
    }

    execute!(
        stdout,
        Print("\n"),
        SetForegroundColor(Color::Cyan),
        Print("Last 7 days:\n"),
        ResetColor
    )?;
    for entry in editor.history() {
        let label = if entry.is_today { "today".to_string() } else { entry.label };
        let marker = if entry.locked { "•" } else { " " };
        let (color, preview) = if entry.has_entry {
            (Color::Green, entry.preview)
        } else {
            (Color::DarkGrey, "no entry".to_string())
        };
        execute!(
            stdout,
            Print(format!("  {:<18}{} ", label, marker)),
            SetForegroundColor(color),
            Print(format!("{}\n", preview)),
            ResetColor
        )?;
    }

    Ok(())
}

fn run<S: Storage>(mut store: EntryStore<S>, config: &Config, stats: bool) -> Result<(), Box<dyn std::error::Error>> {
    let migrated = store.migrate_legacy()?;
    if migrated > 0 {
        info!(migrated, "legacy entries copied");
    }

    let editor = EditorController::hydrate(store, Duration::from_secs(config.counter_hide_seconds));
    if stats {
        print_stats(&editor)?;
        return Ok(());
    }

    let mut app = App::new(editor)?;
    app.run()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_from(&config_path);
    if let Some(data) = &args.data {
        config.data_file = data.to_string_lossy().to_string();
    }

    init_logging(Path::new(&config.log_file));
    info!(config = %config_path.display(), "starting twofourty");

    if args.scratch {
        warn!("scratch mode, entries will not be saved");
        return run(EntryStore::new(MemoryStorage::new(), SystemClock), &config, args.stats);
    }

    let store = EntryStore::new(FileStorage::open(&config.data_file)?, SystemClock);
    info!(path = %store.storage().path().display(), "opened entry file");
    run(store, &config, args.stats)
}
