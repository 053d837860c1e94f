use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StateError;

/// `save_<core-name>.sav`, with path separators in the name replaced.
pub fn state_file_name(core_name: &str) -> String {
    let name: String = core_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("save_{name}.sav")
}

pub fn state_path(dir: &Path, core_name: &str) -> PathBuf {
    dir.join(state_file_name(core_name))
}

pub(crate) fn write_state(path: &Path, data: &[u8]) -> Result<(), StateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StateError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, data).map_err(|source| StateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_state(path: &Path) -> Result<Vec<u8>, StateError> {
    fs::read(path).map_err(|source| StateError::Io {
        path: path.to_path_buf(),
        source,
    })
}
