mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::recovery;
use crate::io::store::{ItemStore, ToggleOutcome};
use crate::model::Config;
use crate::ops::entry_ops::{self, EntryError};
use crate::ops::index::CategoryIndex;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let data_dir = resolve_dir(cli.dir.as_deref())?;

    match cli.command {
        None => crate::tui::run(Some(data_dir.as_path())),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, &data_dir),
            Commands::List(args) => cmd_list(args, &data_dir, json),
            Commands::Toggle(args) => cmd_toggle(args, &data_dir, json),
            Commands::Recovery(args) => cmd_recovery(args, &data_dir, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_dir(dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    config_io::resolve_data_dir(dir.map(Path::new)).map_err(|e| {
        let shown = dir.unwrap_or(".");
        format!("cannot resolve data directory '{}': {}", shown, e).into()
    })
}

/// Read camo.toml and load (or seed) the state file
fn load_store(data_dir: &Path) -> Result<(Config, ItemStore), Box<dyn std::error::Error>> {
    let config = config_io::read_config(data_dir)?;
    let mut store = ItemStore::from_config(data_dir, &config);
    store.load()?;
    Ok((config, store))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, data_dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (config, store) = load_store(data_dir)?;
    let index = CategoryIndex::rebuild(store.entries(), &config.ui.done_marker);

    match args.category {
        None => {
            if json {
                let out = category_list_json(&config.tracker.title, &index);
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let total = index.total_progress();
                println!("{}  {}/{}", config.tracker.title, total.done, total.total);
                for line in format_category_lines(&index) {
                    println!("{}", line);
                }
            }
        }
        Some(category) => {
            if !index.contains(&category) {
                return Err(format!("no category named {}", category).into());
            }
            if json {
                let out = entry_list_json(&category, &index);
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let progress = index.progress_of(&category);
                println!("{}  {}/{}", category, progress.done, progress.total);
                for line in format_entry_lines(&category, &index) {
                    println!("{}", line);
                }
            }
        }
    }
    Ok(())
}

fn cmd_toggle(
    args: ToggleArgs,
    data_dir: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, mut store) = load_store(data_dir)?;

    let outcome = match &args.category {
        Some(category) => store.toggle_in(category, &args.name)?,
        None => {
            if entry_ops::ambiguous_names(store.entries()).contains(&args.name.as_str()) {
                eprintln!(
                    "warning: {} appears in more than one category; use --category to pick one",
                    args.name
                );
            }
            store.toggle(&args.name)?
        }
    };

    let done = match outcome {
        ToggleOutcome::Toggled { done } => done,
        ToggleOutcome::NoMatch => {
            let err = match args.category {
                Some(category) => EntryError::NotFoundInCategory {
                    category,
                    name: args.name,
                },
                None => EntryError::NotFound(args.name),
            };
            return Err(err.into());
        }
    };

    let entry = match &args.category {
        Some(category) => entry_ops::find_entry(store.entries(), category, &args.name),
        None => entry_ops::find_by_name(store.entries(), &args.name),
    }
    .ok_or_else(|| EntryError::NotFound(args.name.clone()))?;

    if json {
        let out = ToggleJson {
            name: entry.name.clone(),
            category: entry.category.clone(),
            done,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let state = if done { "done" } else { "not done" };
        println!("{} ({}): {}", entry.name, entry.category, state);
    }
    Ok(())
}

fn cmd_recovery(
    args: RecoveryCmd,
    data_dir: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match args.action {
        Some(RecoveryAction::Path) => {
            println!("{}", recovery::recovery_log_path(data_dir).display());
            Ok(())
        }
        Some(RecoveryAction::Prune(prune)) => {
            let before = prune
                .before
                .as_deref()
                .map(|s| {
                    DateTime::parse_from_rfc3339(s)
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(|e| format!("invalid --before timestamp '{}': {}", s, e))
                })
                .transpose()?;
            let removed = recovery::prune_recovery(data_dir, before, prune.all)?;
            println!("Pruned {} recovery entries", removed);
            Ok(())
        }
        None => {
            let entries = recovery::read_recovery_entries(data_dir, Some(args.limit.unwrap_or(10)));
            if json {
                let values: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else if entries.is_empty() {
                println!("No recovery entries");
            } else {
                for entry in &entries {
                    print!("{}", entry.to_markdown());
                }
            }
            Ok(())
        }
    }
}
