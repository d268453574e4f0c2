use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "deckwatch")]
#[command(about = "Find decks in a study hierarchy that are starved of new cards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the collection snapshot (JSON)
    #[arg(short, long, global = true, default_value = "collection.json")]
    pub collection: PathBuf,

    /// Preferences directory (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the starved-deck report
    #[command(alias = "ls")]
    Report {
        /// Only show decks whose name contains this text
        #[arg(short, long)]
        name: Option<String>,

        /// Also show decks that still have new cards
        #[arg(short, long)]
        all: bool,

        /// Exclude filtered (dynamic) decks
        #[arg(long)]
        no_filtered: bool,

        /// Exclude container decks (no own cards, has subdecks)
        #[arg(long)]
        no_container: bool,

        /// Exclude empty decks (no own cards, no subdecks)
        #[arg(long)]
        no_empty: bool,

        /// Only show the report when the reminder policy says it is due
        #[arg(long)]
        if_due: bool,
    },

    /// Get or set preferences
    Config {
        /// Preference key (e.g. name_filter)
        key: Option<String>,

        /// Value to set (if omitted, prints the current value)
        value: Option<String>,
    },
}
