//! Path resolution for path-valued settings.
//!
//! Resolves relative and tilde-prefixed paths against the directory of the config file
//! that declared them.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a path-valued setting.
///
/// - Tilde paths (`~/words.txt`) expand to the home directory
/// - Relative paths resolve against `config_dir`
/// - Absolute paths are returned as-is
///
/// The path is not required to exist; validation reports missing files as warnings.
pub fn resolve_setting_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(config_dir.join(expanded))
    }
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let resolved = resolve_setting_path("./words.txt", Path::new("/project")).unwrap();
        assert_eq!(resolved, PathBuf::from("/project/./words.txt"));
    }

    #[test]
    fn test_resolve_absolute_path() {
        let resolved = resolve_setting_path("/etc/words", Path::new("/project")).unwrap();
        assert_eq!(resolved, PathBuf::from("/etc/words"));
    }

    #[test]
    fn test_resolve_tilde_path() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        let resolved = resolve_setting_path("~/words.txt", Path::new("/project")).unwrap();
        assert_eq!(resolved, home.join("words.txt"));
    }
}
