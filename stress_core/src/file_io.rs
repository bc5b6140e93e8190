//! # File I/O Module
//!
//! Project files (`.sbx`) are pretty-printed JSON of a [`StressProject`].
//! Writes go through a temp file in the target directory that is renamed
//! over the destination, so a crash mid-save never leaves a half-written
//! project. Loads refuse files written by an incompatible schema.
//!
//! ## Example
//!
//! ```rust,no_run
//! use stress_core::file_io::{load_project, save_project};
//! use stress_core::project::StressProject;
//! use std::path::Path;
//!
//! let path = Path::new("floor.sbx");
//! save_project(&StressProject::new("Engineer", "Floor beam"), path)?;
//! let project = load_project(path)?;
//! assert_eq!(project.meta.title, "Floor beam");
//! # Ok::<(), stress_core::errors::StressError>(())
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::errors::{StressError, StressResult};
use crate::project::{StressProject, SCHEMA_VERSION};

/// Default extension for project files
pub const PROJECT_EXTENSION: &str = "sbx";

/// Replace `path` with `bytes` in one rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> StressResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_error = |operation: &str, e: std::io::Error| {
        StressError::file_error(operation, path.display().to_string(), e.to_string())
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| io_error("stage", e))?;
    staged.write_all(bytes).map_err(|e| io_error("write", e))?;
    staged.as_file().sync_all().map_err(|e| io_error("sync", e))?;
    // Dropping the NamedTempFile on error removes the staged copy
    staged.persist(path).map_err(|e| io_error("replace", e.error))?;

    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Save a project as JSON, replacing any existing file atomically.
pub fn save_project(project: &StressProject, path: &Path) -> StressResult<()> {
    let json = serde_json::to_string_pretty(project)
        .map_err(|e| StressError::serialization(e.to_string()))?;
    write_atomic(path, json.as_bytes())?;

    info!(
        "saved project '{}' ({} analyses) to {}",
        project.meta.title,
        project.item_count(),
        path.display()
    );
    Ok(())
}

/// Load a project and check its schema version.
///
/// # Errors
///
/// * `FileError` - the file cannot be read
/// * `SerializationError` - the file is not a project
/// * `VersionMismatch` - the file was written by an incompatible schema
pub fn load_project(path: &Path) -> StressResult<StressProject> {
    let contents = fs::read_to_string(path)
        .map_err(|e| StressError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: StressProject = serde_json::from_str(&contents).map_err(|e| {
        StressError::serialization(format!("Invalid project in {}: {}", path.display(), e))
    })?;

    ensure_compatible_schema(&project.meta.version)?;

    info!(
        "loaded project '{}' ({} analyses) from {}",
        project.meta.title,
        project.item_count(),
        path.display()
    );
    Ok(project)
}

/// `(major, minor)` of a `major.minor[.patch]` version string.
fn major_minor(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.').map(str::parse::<u32>);
    match (parts.next(), parts.next()) {
        (Some(Ok(major)), Some(Ok(minor))) => Some((major, minor)),
        _ => None,
    }
}

/// Same major version; on 0.x the file's minor may not be newer than ours.
fn ensure_compatible_schema(file_version: &str) -> StressResult<()> {
    let compatible = match (major_minor(file_version), major_minor(SCHEMA_VERSION)) {
        (Some((file_major, file_minor)), Some((major, minor))) => {
            file_major == major && (major > 0 || file_minor <= minor)
        }
        _ => false,
    };

    if compatible {
        Ok(())
    } else {
        Err(StressError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        })
    }
}
