// src/utils/paths.rs
//! Signal file resolution

use std::path::{Path, PathBuf};

/// Resolve a signal file argument against a project folder
///
/// Arguments that carry any path separator are used as given. Bare file names
/// are looked up inside `project_folder`.
pub fn resolve_signal_path(argument: &str, project_folder: &Path) -> PathBuf {
    if has_path_separator(argument) {
        PathBuf::from(argument)
    } else {
        project_folder.join(argument)
    }
}

/// True when the argument contains a forward or backward slash
pub fn has_path_separator(argument: &str) -> bool {
    argument.contains('/') || argument.contains('\\')
}
