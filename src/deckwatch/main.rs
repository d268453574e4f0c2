use chrono::Utc;
use clap::Parser;
use deckwatch::api::{ConfigAction, DeckwatchApi};
use deckwatch::config::Preferences;
use deckwatch::error::Result;
use deckwatch::project::ReportFilter;
use deckwatch::store::file::FileCollection;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

mod args;
mod print;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[derive(Debug, Default, Clone)]
struct ReportFlags {
    name: Option<String>,
    all: bool,
    no_filtered: bool,
    no_container: bool,
    no_empty: bool,
    if_due: bool,
}

fn run() -> Result<()> {
    let mut cli = Cli::parse();
    let prefs_dir = resolve_prefs_dir(&cli);

    match cli.command.take() {
        Some(Commands::Report {
            name,
            all,
            no_filtered,
            no_container,
            no_empty,
            if_due,
        }) => handle_report(
            &cli.collection,
            prefs_dir,
            ReportFlags {
                name,
                all,
                no_filtered,
                no_container,
                no_empty,
                if_due,
            },
        ),
        Some(Commands::Config { key, value }) => handle_config(prefs_dir, key, value),
        None => handle_report(&cli.collection, prefs_dir, ReportFlags::default()),
    }
}

fn resolve_prefs_dir(cli: &Cli) -> PathBuf {
    if let Some(home) = &cli.home {
        return home.clone();
    }
    if let Ok(home) = std::env::var("DECKWATCH_HOME") {
        return PathBuf::from(home);
    }
    ProjectDirs::from("com", "deckwatch", "deckwatch")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn handle_report(collection: &Path, prefs_dir: PathBuf, flags: ReportFlags) -> Result<()> {
    let prefs = Preferences::load(&prefs_dir);

    if flags.if_due && !prefs.should_auto_show(Utc::now().timestamp()) {
        return Ok(());
    }

    let mut filter = ReportFilter::from_preferences(&prefs);
    if let Some(name) = flags.name {
        filter.name_contains = name;
    }
    if flags.all {
        filter.include_normal = true;
    }
    if flags.no_filtered {
        filter.include_filtered = false;
    }
    if flags.no_container {
        filter.include_container = false;
    }
    if flags.no_empty {
        filter.include_empty = false;
    }

    let store = FileCollection::open(collection)?;
    let api = DeckwatchApi::new(store, prefs_dir);
    let result = api.report(&filter)?;

    print::print_report(&prefs.menu_title, &result);
    print::print_messages(&result.messages);

    if !result.rows.is_empty() {
        api.mark_report_shown(Utc::now().timestamp());
    }
    Ok(())
}

fn handle_config(prefs_dir: PathBuf, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = deckwatch::api::config(&prefs_dir, action)?;

    if let Some(prefs) = &result.preferences {
        print::print_preferences(prefs);
    }
    print::print_messages(&result.messages);
    Ok(())
}
