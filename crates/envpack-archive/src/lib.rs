//! Zip writer for envpack build artifacts.
//!
//! Compresses the build output directory into a single archive whose entry
//! paths are relative to the directory itself, so unpacking yields the
//! directory's contents and not a wrapping folder.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Compress `source_dir`'s full recursive contents into `zip_path`.
///
/// Entry names are relative to `source_dir`, forward-slash normalised, and
/// stored Deflated at maximum compression. An empty source directory yields
/// a valid zero-entry archive. Failure to open the destination or to read
/// any entry surfaces as an error rather than a silently partial archive.
pub fn zip_directory(source_dir: &Path, zip_path: &Path) -> Result<()> {
    let files = walk_files(source_dir)?;

    let file = File::create(zip_path).with_context(|| format!("create zip {zip_path:?}"))?;
    let mut zip = zip::ZipWriter::new(file);
    let opts: zip::write::FileOptions<()> = zip::write::FileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .compression_level(Some(9))
        .unix_permissions(0o644);

    for path in files {
        let rel = path
            .strip_prefix(source_dir)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");

        zip.start_file(rel, opts)?;
        let mut f = File::open(&path).with_context(|| format!("read {path:?}"))?;
        let mut buf = Vec::new();
        f.read_to_end(&mut buf)?;
        zip.write_all(&buf)?;
    }

    zip.finish()?;
    Ok(())
}

fn walk_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(p) = stack.pop() {
        for entry in std::fs::read_dir(&p).with_context(|| format!("read dir {p:?}"))? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                out.push(path);
            }
        }
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_entry(archive: &mut zip::ZipArchive<File>, name: &str) -> Vec<u8> {
        let mut entry = archive.by_name(name).unwrap();
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn round_trip_preserves_relative_paths_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("dist");
        std::fs::create_dir_all(src.join("sub")).unwrap();
        std::fs::write(src.join("a.txt"), b"alpha").unwrap();
        std::fs::write(src.join("sub/b.txt"), b"beta").unwrap();

        let zip_path = dir.path().join("out.zip");
        zip_directory(&src, &zip_path).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.name_for_index(i).unwrap().to_string())
            .collect();
        names.sort();
        assert_eq!(names, ["a.txt", "sub/b.txt"]);

        assert_eq!(read_entry(&mut archive, "a.txt"), b"alpha");
        assert_eq!(read_entry(&mut archive, "sub/b.txt"), b"beta");
    }

    #[test]
    fn entries_do_not_include_the_source_directory_name() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("dist");
        std::fs::create_dir(&src).unwrap();
        std::fs::write(src.join("index.html"), "<html/>").unwrap();

        let zip_path = dir.path().join("out.zip");
        zip_directory(&src, &zip_path).unwrap();

        let archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.name_for_index(0).unwrap(), "index.html");
    }

    #[test]
    fn empty_source_directory_yields_a_valid_empty_archive() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("dist");
        std::fs::create_dir(&src).unwrap();

        let zip_path = dir.path().join("out.zip");
        zip_directory(&src, &zip_path).unwrap();

        let archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn missing_source_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = zip_directory(&dir.path().join("gone"), &dir.path().join("out.zip"));
        assert!(err.is_err());
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("dist");
        std::fs::create_dir(&src).unwrap();

        // Destination parent does not exist.
        let err = zip_directory(&src, &dir.path().join("missing/out.zip"));
        assert!(err.is_err());
    }

    #[test]
    fn missing_source_leaves_no_partial_zip_behind() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("out.zip");
        assert!(zip_directory(&dir.path().join("gone"), &zip_path).is_err());
        assert!(!zip_path.exists());
    }
}
