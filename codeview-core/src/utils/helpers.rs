//! Small helpers shared by the event loop and the tests.
use std::path::{Path, PathBuf};

/// Place a file in the runtime directory of the coordinator, creating parent directories.
///
/// # Errors
///
/// Fails when no runtime directory is available or it cannot be created.
pub fn place_runtime_file<P>(path: P) -> std::io::Result<PathBuf>
where
    P: AsRef<Path>,
{
    xdg::BaseDirectories::with_prefix("codeview")?.place_runtime_file(path)
}
