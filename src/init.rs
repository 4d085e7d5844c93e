//! Initialize a new hirebox space: data directory, .hirebox.toml, registry entry.

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::app_config;
use crate::resolve;

/// Generate .hirebox.toml content.
fn generate_config_toml(name: &str, email: &str) -> Result<String> {
    let mut doc = toml::map::Map::new();

    if !name.is_empty() || !email.is_empty() {
        let mut owner = toml::map::Map::new();
        if !name.is_empty() {
            owner.insert("name".to_string(), toml::Value::String(name.to_string()));
        }
        if !email.is_empty() {
            owner.insert("email".to_string(), toml::Value::String(email.to_string()));
        }
        doc.insert("owner".to_string(), toml::Value::Table(owner));
    }

    let mut inbox = toml::map::Map::new();
    inbox.insert("persist_composed".to_string(), toml::Value::Boolean(true));
    doc.insert("inbox".to_string(), toml::Value::Table(inbox));

    let mut referral = toml::map::Map::new();
    referral.insert("submit_delay_ms".to_string(), toml::Value::Integer(1500));
    referral.insert("fallback_reward".to_string(), toml::Value::Integer(500));
    referral.insert("currency".to_string(), toml::Value::String("USD".to_string()));
    doc.insert("referral".to_string(), toml::Value::Table(referral));

    let mut watch = toml::map::Map::new();
    watch.insert("poll_interval".to_string(), toml::Value::Integer(2));
    doc.insert("watch".to_string(), toml::Value::Table(watch));

    Ok(toml::to_string_pretty(&toml::Value::Table(doc))?)
}

/// Create the space at `path` and register it in the app config at `config_path`.
///
/// Returns the canonical data directory.
pub fn init_at(
    path: &Path,
    name: &str,
    email: &str,
    space: &str,
    force: bool,
    config_path: &Path,
) -> Result<PathBuf> {
    // 1. Resolve data dir
    let path = if path.starts_with("~") {
        resolve::expand_tilde(&path.to_string_lossy())
    } else {
        path.to_path_buf()
    };
    std::fs::create_dir_all(&path)?;
    let data_dir = path.canonicalize()?;

    let toml_path = data_dir.join(".hirebox.toml");
    if toml_path.exists() && !force {
        bail!(
            ".hirebox.toml already exists at {}\nUse --force to overwrite.",
            toml_path.display()
        );
    }

    // 2. storage/ for the persisted mirror
    let storage = resolve::storage_dir_in(&data_dir);
    std::fs::create_dir_all(&storage)?;
    println!("Created {}", storage.display());

    // 3. Config
    std::fs::write(&toml_path, generate_config_toml(name, email)?)?;
    println!("Created {}", toml_path.display());

    // 4. Register space in app config
    app_config::add_space_at(config_path, space, &data_dir.to_string_lossy())?;
    println!(
        "Registered space '{}' \u{2192} {}",
        space,
        data_dir.display()
    );

    Ok(data_dir)
}

/// hirebox init [PATH] [--name] [--email] [--space-name] [--force]
pub fn run(path: &Path, name: &str, email: &str, space: &str, force: bool) -> Result<()> {
    init_at(path, name, email, space, force, &app_config::app_config_path())?;
    println!();
    println!("Done! Next steps:");
    println!("  - Run: hirebox inbox list");
    println!("  - Run: hirebox referral jobs");
    Ok(())
}
