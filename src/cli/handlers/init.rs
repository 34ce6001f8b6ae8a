use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io;
use crate::io::store::ItemStore;

const CONFIG_TEMPLATE: &str = r##"[tracker]
# Heading of the category list
title = "BO6 Camo Tracker"

[storage]
# Progress is saved here, relative to this directory
file = "camos.json"

# Start from your own list instead of the bundled one: a JSON array of
# {"name": "...", "category": "..."} objects, relative to this directory.
# Only read when the state file does not exist yet (or on `camo init --force`).
# seed = "my-camos.json"

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
done_marker = "✅"
# show_progress = false
# show_key_hints = false
#
# [ui.colors]                 # "#RRGGBB" or a 0-255 terminal palette index
# background = "#000000"
# text = "#D0D0D0"
# title = "#FFFFFF"
# highlight = "170"
# hint = "241"
# error = "#FF4444"
# complete = "#44FF88"
"##;

/// Write camo.toml and create the state file from the seed.
///
/// An existing state file keeps its progress unless `--force` is given, in
/// which case both files are rewritten.
pub fn cmd_init(args: InitArgs, data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_io::config_path(data_dir);
    if config_path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to start over)",
            config_path.display()
        )
        .into());
    }

    config_io::write_config_text(data_dir, CONFIG_TEMPLATE)?;
    let config = config_io::read_config(data_dir)?;

    let mut store = ItemStore::from_config(data_dir, &config);
    let count = if args.force {
        store.reseed()?.len()
    } else {
        store.load()?.len()
    };

    println!("Initialized camo tracker in {}", data_dir.display());
    println!("  {} ({} entries)", store.path().display(), count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn template_parses_to_defaults() {
        let parsed: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.tracker.title, defaults.tracker.title);
        assert_eq!(parsed.storage.file, defaults.storage.file);
        assert_eq!(parsed.storage.seed, None);
        assert_eq!(parsed.ui.done_marker, defaults.ui.done_marker);
        assert!(parsed.ui.show_progress);
        assert!(parsed.ui.show_key_hints);
        assert!(parsed.ui.colors.is_empty());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        cmd_init(InitArgs { force: false }, tmp.path()).unwrap();
        assert!(tmp.path().join("camos.json").exists());

        let err = cmd_init(InitArgs { force: false }, tmp.path()).unwrap_err();
        assert!(err.to_string().contains("--force"));
    }

    #[test]
    fn force_discards_progress() {
        let tmp = TempDir::new().unwrap();
        cmd_init(InitArgs { force: false }, tmp.path()).unwrap();
        let state = tmp.path().join("camos.json");
        let fresh = fs::read_to_string(&state).unwrap();

        let mut store = ItemStore::from_config(tmp.path(), &Config::default());
        let first = store.load().unwrap()[0].name.clone();
        store.toggle(&first).unwrap();
        assert_ne!(fs::read_to_string(&state).unwrap(), fresh);

        cmd_init(InitArgs { force: true }, tmp.path()).unwrap();
        assert_eq!(fs::read_to_string(&state).unwrap(), fresh);
    }
}
