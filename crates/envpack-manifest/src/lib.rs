//! `package.json` reading for envpack.
//!
//! The pipeline needs two things from the project manifest: the optional
//! `name` (for batch folder naming) and the `scripts` map (the catalog of
//! runnable commands). Everything else in the file is ignored.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Manifest file name looked up directly under the project root.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Ordered `script name -> command` catalog.
///
/// `serde_json`'s `preserve_order` feature keeps this in file order, which is
/// the order scripts are offered for selection.
pub type ScriptCatalog = serde_json::Map<String, serde_json::Value>;

/// The slice of `package.json` the pipeline reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    pub name: Option<String>,
    #[serde(default)]
    pub scripts: ScriptCatalog,
}

impl PackageManifest {
    /// Load and parse `<project_root>/package.json`.
    ///
    /// A missing file or invalid JSON is an error for the caller to handle;
    /// an absent `scripts` field is just an empty catalog.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(PACKAGE_MANIFEST);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
    }

    /// Command string for `script`, if present, a string, and non-empty.
    pub fn script_command(&self, script: &str) -> Option<&str> {
        self.scripts
            .get(script)
            .and_then(|value| value.as_str())
            .filter(|command| !command.is_empty())
    }

    /// Script names containing `build`, in catalog order.
    pub fn build_scripts(&self) -> Vec<String> {
        build_scripts(&self.scripts)
    }
}

/// Filter a catalog down to the script names containing the substring
/// `build`, preserving catalog order.
pub fn build_scripts(catalog: &ScriptCatalog) -> Vec<String> {
    catalog
        .keys()
        .filter(|name| name.contains("build"))
        .cloned()
        .collect()
}
