//! Path resolution for hirebox data directories.
//!
//! Resolution order for the data directory:
//!   1. hirebox/ in cwd (developer workflow)
//!   2. HIREBOX_DATA environment variable
//!   3. App config space (via app_config::resolve_space)
//!   4. ~/Documents/hirebox (general user default)

use std::path::PathBuf;

/// Return the data directory path.
pub fn data_dir() -> PathBuf {
    let local = PathBuf::from("hirebox");
    if local.is_dir() {
        return local;
    }
    if let Ok(env) = std::env::var("HIREBOX_DATA") {
        if !env.is_empty() {
            return PathBuf::from(env);
        }
    }
    if let Ok(Some(space_path)) = crate::app_config::resolve_space(None) {
        return space_path;
    }
    home_dir().join("Documents").join("hirebox")
}

/// Directory holding the persisted mirror of a data directory.
pub fn storage_dir_in(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("storage")
}

/// Resolve .hirebox.toml: .hirebox.toml then hirebox.toml in data_dir().
pub fn hirebox_toml() -> PathBuf {
    hirebox_toml_in(&data_dir())
}

/// Resolve the config file inside a specific data directory.
pub fn hirebox_toml_in(dir: &std::path::Path) -> PathBuf {
    let dotfile = dir.join(".hirebox.toml");
    if dotfile.exists() {
        return dotfile;
    }
    let plain = dir.join("hirebox.toml");
    if plain.exists() {
        return plain;
    }
    // Default to .hirebox.toml (for creation)
    dotfile
}

/// Get the user's home directory.
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Expand ~ to home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_plain_path() {
        assert_eq!(expand_tilde("/tmp/x"), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_expand_tilde_home() {
        assert_eq!(expand_tilde("~/hb"), home_dir().join("hb"));
        assert_eq!(expand_tilde("~"), home_dir());
    }

    #[test]
    fn test_storage_dir_in() {
        assert_eq!(
            storage_dir_in(std::path::Path::new("/data")),
            PathBuf::from("/data/storage")
        );
    }
}
