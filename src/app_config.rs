//! App-level config for hirebox (space registry, defaults).
//!
//! Reads/writes {user_config_dir}/hirebox/config.toml. A space is a named
//! data directory holding one desk's persisted mirror and .hirebox.toml.

use anyhow::{Result, anyhow, bail};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::resolve;

/// Return the OS-native hirebox config directory.
pub fn app_config_dir() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "hirebox") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        resolve::home_dir().join(".config").join("hirebox")
    }
}

/// Return the path to config.toml.
pub fn app_config_path() -> PathBuf {
    app_config_dir().join("config.toml")
}

/// Read config.toml, returning empty table if missing.
pub fn load() -> Result<toml::Value> {
    load_from(&app_config_path())
}

pub fn load_from(path: &Path) -> Result<toml::Value> {
    if !path.exists() {
        return Ok(toml::Value::Table(toml::map::Map::new()));
    }
    let content = std::fs::read_to_string(path)?;
    let val: toml::Value = toml::from_str(&content)?;
    Ok(val)
}

/// Write config.toml, creating parent dir if needed.
pub fn save_to(path: &Path, config: &toml::Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn read_spaces(table: &toml::map::Map<String, toml::Value>) -> toml::map::Map<String, toml::Value> {
    match table.get("spaces") {
        Some(toml::Value::Table(s)) => s.clone(),
        _ => toml::map::Map::new(),
    }
}

fn read_default(table: &toml::map::Map<String, toml::Value>) -> Option<String> {
    match table.get("default_space") {
        Some(toml::Value::String(d)) => Some(d.clone()),
        _ => None,
    }
}

/// Resolve a space name to a data directory path.
///
/// - If name given: look up, error if not found.
/// - No name + default_space set: use default.
/// - No name + exactly 1 space: use it implicitly.
/// - No name + multiple spaces, no default: error with list.
/// - No spaces configured: return None.
pub fn resolve_space(name: Option<&str>) -> Result<Option<PathBuf>> {
    resolve_space_at(&app_config_path(), name)
}

pub fn resolve_space_at(config_path: &Path, name: Option<&str>) -> Result<Option<PathBuf>> {
    let config = load_from(config_path)?;
    let table = config.as_table().cloned().unwrap_or_default();
    let spaces = read_spaces(&table);

    if spaces.is_empty() {
        return Ok(None);
    }

    if let Some(name) = name {
        return match spaces.get(name) {
            Some(space_val) => Ok(Some(space_path(space_val))),
            None => {
                let available: Vec<&str> = spaces.keys().map(|s| s.as_str()).collect();
                bail!("Unknown space '{}'. Available: {}", name, available.join(", "))
            }
        };
    }

    // No name given, try defaults
    if let Some(default) = read_default(&table) {
        if let Some(space_val) = spaces.get(default.as_str()) {
            return Ok(Some(space_path(space_val)));
        }
    }

    if let Some((_, space_val)) = spaces.iter().next().filter(|_| spaces.len() == 1) {
        return Ok(Some(space_path(space_val)));
    }

    let listing: Vec<String> = spaces
        .iter()
        .map(|(sname, sconf)| {
            let p = sconf.get("path").and_then(|v| v.as_str()).unwrap_or("");
            format!("  {}  {}", sname, p)
        })
        .collect();
    bail!(
        "Multiple spaces configured. Use --space NAME or set default_space.\n\n{}",
        listing.join("\n")
    )
}

/// Register a space, auto-default if first.
pub fn add_space(name: &str, path: &str) -> Result<()> {
    add_space_at(&app_config_path(), name, path)
}

pub fn add_space_at(config_path: &Path, name: &str, path: &str) -> Result<()> {
    let mut config = load_from(config_path)?;
    let table = config
        .as_table_mut()
        .ok_or_else(|| anyhow!("{} is not a TOML table", config_path.display()))?;

    let spaces = table
        .entry("spaces")
        .or_insert_with(|| toml::Value::Table(toml::map::Map::new()))
        .as_table_mut()
        .ok_or_else(|| anyhow!("[spaces] in {} is not a table", config_path.display()))?;

    let mut space_entry = toml::map::Map::new();
    space_entry.insert("path".to_string(), toml::Value::String(path.to_string()));
    spaces.insert(name.to_string(), toml::Value::Table(space_entry));
    let first = spaces.len() == 1;

    if first {
        table.insert(
            "default_space".to_string(),
            toml::Value::String(name.to_string()),
        );
    }

    save_to(config_path, &config)
}

/// List all configured spaces as (name, path, is_default).
pub fn list_spaces() -> Result<Vec<(String, String, bool)>> {
    list_spaces_at(&app_config_path())
}

pub fn list_spaces_at(config_path: &Path) -> Result<Vec<(String, String, bool)>> {
    let config = load_from(config_path)?;
    let table = config.as_table().cloned().unwrap_or_default();
    let default = read_default(&table).unwrap_or_default();

    // Use BTreeMap for sorted output
    let sorted: BTreeMap<_, _> = read_spaces(&table).into_iter().collect();
    let result = sorted
        .into_iter()
        .map(|(name, val)| {
            let path = val
                .get("path")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let is_default = name == default;
            (name, path, is_default)
        })
        .collect();
    Ok(result)
}

fn space_path(space_val: &toml::Value) -> PathBuf {
    let path_str = space_val
        .get("path")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    resolve::expand_tilde(path_str)
}

/// hirebox spaces
pub fn run_list() -> Result<()> {
    let spaces = list_spaces()?;

    if spaces.is_empty() {
        println!("No spaces configured.");
        println!("Run 'hirebox init' to create one.");
        return Ok(());
    }

    println!("hirebox spaces\n");
    let name_w = spaces.iter().map(|(n, _, _)| n.len()).max().unwrap_or(0);
    for (name, path, is_default) in &spaces {
        let marker = if *is_default { " (default)" } else { "" };
        println!("  {:<width$}  {}{}", name, path, marker, width = name_w);
    }
    Ok(())
}
