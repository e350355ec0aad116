use std::{path::Path, sync::Arc};

use crate::{config::StateFilesConfig, persistence::FileStateStore};

/// Creates a file-backed state store inside `dir`, returning the store and
/// the file layout it uses.
pub fn create_test_file_store(dir: &Path) -> (Arc<FileStateStore>, StateFilesConfig) {
    let paths = StateFilesConfig::in_dir(dir);
    (Arc::new(FileStateStore::new(paths.clone())), paths)
}
