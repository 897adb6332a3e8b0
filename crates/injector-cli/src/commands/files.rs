//! Source file collection.

use std::path::{Path, PathBuf};

const SOURCE_EXTENSION: &str = "cs";

/// Directories that hold build output, never sources.
const SKIPPED_DIRS: &[&str] = &["bin", "obj"];

/// Collect all .cs files from the given paths (files or directories).
///
/// Directories are walked recursively; results are sorted and deduplicated.
pub fn collect_source_files(paths: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path_str in paths {
        let path = Path::new(path_str);
        if path.is_file() {
            if is_source_file(path) {
                files.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            collect_in_dir(path, &mut files)?;
        } else {
            anyhow::bail!("no such file or directory: {}", path_str);
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
}

/// Recursively collect .cs files in a directory.
fn collect_in_dir(dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        // Skip hidden dirs and build output
        if path.is_dir() {
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if name_str.starts_with('.') || SKIPPED_DIRS.iter().any(|skipped| *skipped == name_str) {
                continue;
            }
            collect_in_dir(&path, files)?;
        } else if is_source_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}
