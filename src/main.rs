use clap::Parser;
use dioxus_desktop::tao::dpi::LogicalSize;
use dioxus_desktop::{Config, WindowBuilder};
use std::path::PathBuf;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;

use lorebook::components::app::App;
use lorebook::config;
use lorebook::entries::{Entries, EntryStore};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    compile_time::datetime_str!(),
    ")",
);

/// Lorebook — keep world notes in the order you want them
#[derive(Parser, Debug)]
#[command(
    version = VERSION,
    about,
    long_about = "Lorebook — keep world notes in the order you want them\n\n\
        Entries are listed in display order and can be rearranged by dragging\n\
        their handle. Mouse drags start immediately; touch and pen need a\n\
        short press-and-hold so the list can still be scrolled.",
    after_long_help = "Examples:\n\
        \x20 lorebook                         Open the default collection\n\
        \x20 lorebook --demo                  Seed sample entries if the collection is empty\n\
        \x20 lorebook --entries lore.json     Open a specific entries file"
)]
struct Cli {
    /// Entries file (defaults to the local data directory)
    #[arg(long, value_name = "PATH")]
    entries: Option<PathBuf>,

    /// Configuration file (defaults to the config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed sample entries when the collection is empty
    #[arg(long)]
    demo: bool,
}

const DEFAULT_LOGLEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file
    if let Ok(dotenv) = dotenvy::dotenv() {
        println!("Loaded .env file from: {}", dotenv.display());
    }
    init_tracing();

    if let Some(path) = &cli.config {
        config::reload_from(path);
    }

    let store = cli.entries.map(EntryStore::new).unwrap_or_default();
    if cli.demo {
        seed_demo(&store)?;
    }
    tracing::info!(path = %store.path().display(), "Opening entries");

    let window = WindowBuilder::new()
        .with_title("Lorebook")
        .with_inner_size(LogicalSize::new(480.0, 720.0));

    dioxus::LaunchBuilder::desktop()
        .with_cfg(Config::new().with_window(window))
        .with_context(store)
        .launch(App);

    Ok(())
}

/// Write the sample collection unless entries already exist
fn seed_demo(store: &EntryStore) -> anyhow::Result<()> {
    let existing = store.load()?;
    if !existing.items.is_empty() {
        tracing::info!(
            count = existing.items.len(),
            "Collection is not empty, skipping demo entries"
        );
        return Ok(());
    }
    let demo = Entries::demo();
    store.save(&demo)?;
    tracing::info!(count = demo.items.len(), "Seeded demo entries");
    Ok(())
}

fn init_tracing() {
    let silence_filter = tracing_subscriber::filter::filter_fn(|metadata| {
        // Known issue: https://github.com/DioxusLabs/dioxus/issues/3872
        metadata.target() != "dioxus_core::properties::__component_called_as_function"
    });

    let env_filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOGLEVEL));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .without_time()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(silence_filter.clone());

    let registry = tracing_subscriber::registry()
        .with(env_filter_layer)
        .with(fmt_layer);

    // On macOS, also log to Console.app via oslog
    #[cfg(target_os = "macos")]
    let registry = registry.with(
        tracing_oslog::OsLogger::new("dev.lorebook.Lorebook", "default")
            .with_filter(silence_filter),
    );
    #[cfg(not(target_os = "macos"))]
    let _ = silence_filter;

    registry.init();
}
