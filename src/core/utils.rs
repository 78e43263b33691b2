use dirs::home_dir;
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".expense_core";
const HOME_ENV: &str = "EXPENSE_CORE_HOME";
const STORE_DIR: &str = "store";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Resolves the on-disk layout used by the CLI and storage adapters.
pub struct PathResolver;

impl PathResolver {
    /// Application data directory, `$EXPENSE_CORE_HOME` or `~/.expense_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }

    pub fn store_dir_in(base: &Path) -> PathBuf {
        base.join(STORE_DIR)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Sibling path used while a write is in flight, e.g. `slot.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to a temp sibling, then renames it over `path`.
/// A failed write leaves the previous contents of `path` in place.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_nested_under_base() {
        let base = PathBuf::from("/tmp/expenses-home");
        assert_eq!(PathResolver::store_dir_in(&base), base.join("store"));
        assert_eq!(
            PathResolver::config_file_in(&base),
            base.join("config").join("config.json")
        );
    }

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/data/expenses.json")),
            PathBuf::from("/data/expenses.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("/data/slot")), PathBuf::from("/data/slot.tmp"));
    }

    #[test]
    fn write_atomic_creates_parents_and_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("config.json");
        write_atomic(&target, "{}").unwrap();
        write_atomic(&target, r#"{"plain_output":true}"#).unwrap();
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            r#"{"plain_output":true}"#
        );
        assert!(!tmp_path(&target).exists());
    }

    #[test]
    fn explicit_root_wins() {
        let root = PathBuf::from("/var/tmp/custom");
        assert_eq!(PathResolver::resolve_base(Some(root.clone())), root);
    }
}
