use std::path::PathBuf;
use std::sync::Mutex;

use expense_core::{config::ConfigManager, storage::JsonFileStore};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated base directory with a default slot store and config manager.
pub fn setup_test_env() -> (PathBuf, JsonFileStore, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let store = JsonFileStore::new(Some(base.clone()), "expenses").expect("create json store");
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");

    (base, store, config_manager)
}
