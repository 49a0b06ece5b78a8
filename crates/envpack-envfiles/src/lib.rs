//! Environment file discovery for envpack.
//!
//! An environment file is a filesystem marker whose name encodes a named
//! deployment configuration (`.env.production` -> `production`). Only the
//! name matters; contents are never read.

use anyhow::{Context, Result};
use std::path::Path;

/// Name prefix that marks a file as an environment file.
pub const ENV_FILE_PREFIX: &str = ".env.";

/// Environment name used for a bare `.env` file.
pub const DEFAULT_ENV_NAME: &str = "default";

/// File names directly under `project_root` that start with `.env.` and are
/// regular files. Directories with such names are excluded; subdirectories
/// are not searched. An empty project is an empty list, not an error.
///
/// The result is sorted by name so discovery order is deterministic.
pub fn discover(project_root: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(project_root)
        .with_context(|| format!("read directory {}", project_root.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with(ENV_FILE_PREFIX) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Environment name encoded in an env file name.
///
/// Pure: `".env"` -> `"default"`; otherwise the first `.env.` occurrence is
/// removed and the remainder kept verbatim (`".env.foo.bar"` -> `"foo.bar"`).
pub fn environment_name(file_name: &str) -> String {
    if file_name == ".env" {
        return DEFAULT_ENV_NAME.to_string();
    }
    file_name.replacen(ENV_FILE_PREFIX, "", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_lists_only_env_prefixed_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env.staging"), "").unwrap();
        std::fs::write(dir.path().join(".env.production"), "").unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        std::fs::create_dir(dir.path().join(".env.fake-dir")).unwrap();

        let names = discover(dir.path()).unwrap();
        assert_eq!(names, [".env.production", ".env.staging"]);
    }

    #[test]
    fn bare_dot_env_is_not_discovered() {
        // `.env` lacks the `.env.` prefix; only suffixed files are builds.
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "").unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn discovery_does_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("config");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join(".env.nested"), "").unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn empty_project_is_an_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(&dir.path().join("gone")).is_err());
    }

    #[test]
    fn name_derivation_matches_the_contract() {
        assert_eq!(environment_name(".env"), "default");
        assert_eq!(environment_name(".env.production"), "production");
        assert_eq!(environment_name(".env.foo.bar"), "foo.bar");
    }

    #[test]
    fn only_the_first_prefix_occurrence_is_removed() {
        assert_eq!(environment_name(".env..env.x"), ".env.x");
    }
}
