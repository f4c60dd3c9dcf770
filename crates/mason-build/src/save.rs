use std::path::{Path, PathBuf};

/// File name of the build manifest inside a saved container directory.
pub const MANIFEST_FILE: &str = "Dockerfile";
/// File name of the synthesized entry script.
pub const SCRIPT_FILE: &str = "main.py";

/// Writes the manifest and script into `dir`, creating it if needed.
///
/// The directory ends up holding exactly [`MANIFEST_FILE`] and
/// [`SCRIPT_FILE`]. With `overwrite = false` an existing directory is left
/// untouched and reported.
pub fn save(dir: &Path, manifest: &str, script: &str, overwrite: bool) -> Result<(), SaveError> {
    if dir.exists() && !overwrite {
        return Err(SaveError::AlreadySaved(dir.to_path_buf()));
    }

    std::fs::create_dir_all(dir).map_err(|e| SaveError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for (name, content) in [(MANIFEST_FILE, manifest), (SCRIPT_FILE, script)] {
        let path = dir.join(name);
        std::fs::write(&path, content).map_err(|e| SaveError::Write { path, source: e })?;
    }

    tracing::info!(path = %dir.display(), "container saved");
    Ok(())
}

/// Check if a container has been saved to `dir`.
pub fn is_saved(dir: &Path) -> bool {
    dir.join(MANIFEST_FILE).exists() && dir.join(SCRIPT_FILE).exists()
}

/// Load a saved manifest and script.
pub fn load(dir: &Path) -> Result<(String, String), SaveError> {
    let read = |name: &str| {
        let path = dir.join(name);
        std::fs::read_to_string(&path).map_err(|e| SaveError::Read { path, source: e })
    };
    Ok((read(MANIFEST_FILE)?, read(SCRIPT_FILE)?))
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to create container directory at {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("container already saved at {0} — pass overwrite to replace it")]
    AlreadySaved(PathBuf),
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
