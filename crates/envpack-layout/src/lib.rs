//! Canonical output layout contracts for envpack runs.
//!
//! One pipeline run produces one batch folder under the project root,
//! `<projectName>_<yyyyMMdd_HHmm>`, holding one `<env>.zip` per built
//! environment.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Project name used when `package.json` has no usable `name` field.
pub const FALLBACK_PROJECT_NAME: &str = "envpack";

/// Build tool output directory, relative to the project root.
pub const DIST_DIR: &str = "dist";

const BATCH_TIME_FORMAT: &str = "%Y%m%d_%H%M";

/// Batch folder name for one run: `{projectName}_{yyyyMMdd_HHmm}`.
///
/// Deterministic given the instant; an absent or empty project name falls
/// back to [`FALLBACK_PROJECT_NAME`].
pub fn batch_folder_name(project_name: Option<&str>, at: NaiveDateTime) -> String {
    let name = project_name
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_PROJECT_NAME);
    format!("{}_{}", name, at.format(BATCH_TIME_FORMAT))
}

/// `<project_root>/dist`
pub fn dist_dir(project_root: &Path) -> PathBuf {
    project_root.join(DIST_DIR)
}

/// `<project_root>/<batch>`
pub fn batch_dir(project_root: &Path, batch: &str) -> PathBuf {
    project_root.join(batch)
}

/// `<project_root>/<batch>/<env>.zip`
pub fn archive_path(project_root: &Path, batch: &str, env_name: &str) -> PathBuf {
    batch_dir(project_root, batch).join(format!("{env_name}.zip"))
}
