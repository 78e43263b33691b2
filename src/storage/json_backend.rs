use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, write_atomic, PathResolver};

use super::{Result, StoreAdapter, DEFAULT_SLOT};

const SLOT_EXTENSION: &str = "json";

/// Filesystem-backed slot: one JSON file per slot name under `<base>/store`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: Option<PathBuf>, slot: &str) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        let dir = PathResolver::store_dir_in(&base);
        ensure_dir(&dir)?;
        Ok(Self {
            path: dir.join(format!("{}.{}", canonical_name(slot), SLOT_EXTENSION)),
        })
    }

    /// Store writing directly to `path`, bypassing the managed layout.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreAdapter for JsonFileStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn save(&self, serialized: &str) -> Result<()> {
        write_atomic(&self.path, serialized)?;
        tracing::debug!(path = %self.path.display(), bytes = serialized.len(), "slot written");
        Ok(())
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        DEFAULT_SLOT.into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::tmp_path;
    use tempfile::TempDir;

    fn store_in_temp_dir(slot: &str) -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(Some(temp.path().to_path_buf()), slot).expect("store");
        (store, temp)
    }

    #[test]
    fn load_without_prior_save_is_none() {
        let (store, _guard) = store_in_temp_dir("expenses");
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _guard) = store_in_temp_dir("expenses");
        store.save("[]").expect("save");
        store.save(r#"[{"id":1}]"#).expect("overwrite");
        assert_eq!(store.load().unwrap().as_deref(), Some(r#"[{"id":1}]"#));
        assert!(!tmp_path(store.path()).exists());
    }

    #[test]
    fn slot_names_are_canonicalized() {
        let (store, guard) = store_in_temp_dir("My Expenses!");
        assert_eq!(
            store.path(),
            guard.path().join("store").join("my_expenses_.json")
        );
        let (blank, _guard) = store_in_temp_dir("  ");
        assert!(blank.path().ends_with("expenses.json"));
    }

    #[test]
    fn failed_write_preserves_previous_contents() {
        let (store, _guard) = store_in_temp_dir("expenses");
        store.save("[]").expect("initial save");
        let tmp = tmp_path(store.path());
        fs::create_dir_all(&tmp).unwrap();

        assert!(store.save(r#"[{"id":2}]"#).is_err());
        assert_eq!(store.load().unwrap().as_deref(), Some("[]"));
    }
}
