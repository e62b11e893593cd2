// SPDX-License-Identifier: PMPL-1.0-or-later
//! File and directory scanning.
//!
//! Applies the input constraints (HTML files only, 5 MiB at most), then runs
//! the validator over each file.

use crate::error::{Error, Result};
use crate::issue::IssueSet;
use crate::validator::Validator;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Largest accepted input, in bytes
pub const MAX_INPUT_BYTES: u64 = 5 * 1024 * 1024;

/// File extensions to scan
const SCANNABLE_EXTENSIONS: &[&str] = &["html", "htm"];

/// Directories to skip
const SKIP_DIRS: &[&str] = &[
    "node_modules", ".git", "target", "dist", "build",
    "_build", "vendor", ".next", ".nuxt", "coverage",
];

/// Issues found in one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub issues: IssueSet,
}

/// Whether `path` has an HTML extension
pub fn is_html_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            SCANNABLE_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
        .unwrap_or(false)
}

/// Read an HTML file, enforcing the extension and size limits
pub fn read_input(path: &Path) -> Result<String> {
    if !is_html_file(path) {
        return Err(Error::UnsupportedFile(path.to_path_buf()));
    }

    let size = std::fs::metadata(path)?.len();
    if size > MAX_INPUT_BYTES {
        return Err(Error::InputTooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_INPUT_BYTES,
        });
    }

    Ok(std::fs::read_to_string(path)?)
}

/// Scan a single HTML file
pub fn scan_file(path: &Path, validator: &Validator) -> Result<FileReport> {
    let content = read_input(path)?;
    let issues = validator.validate(&content);
    debug!("{}: {} issue(s)", path.display(), issues.len());

    Ok(FileReport {
        path: path.to_path_buf(),
        issues: issues.into(),
    })
}

/// Scan every HTML file below `dir`, in path order
pub fn scan_directory(dir: &Path, validator: &Validator) -> Result<Vec<FileReport>> {
    let mut reports = Vec::new();

    info!("Scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden and excluded directories
            let name = e.file_name().to_str().unwrap_or("");
            if e.depth() > 0 && e.file_type().is_dir() {
                return !SKIP_DIRS.contains(&name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !entry.file_type().is_file() || !is_html_file(entry.path()) {
            continue;
        }

        match scan_file(entry.path(), validator) {
            Ok(report) => reports.push(report),
            Err(e) => info!("Skipping {}: {}", entry.path().display(), e),
        }
    }

    let total: usize = reports.iter().map(|r| r.issues.len()).sum();
    info!("Scanned {} files, found {} issues", reports.len(), total);

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_nonexistent_dir() {
        let result = scan_directory(Path::new("/nonexistent/path"), &Validator::default());
        // walkdir errors are skipped, so a missing directory is just empty
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_is_html_file() {
        assert!(is_html_file(Path::new("index.html")));
        assert!(is_html_file(Path::new("INDEX.HTM")));
        assert!(!is_html_file(Path::new("style.css")));
        assert!(!is_html_file(Path::new("README")));
    }

    #[test]
    fn test_rejects_non_html() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.txt");
        fs::write(&path, "<img src=\"a.jpg\">").unwrap();
        let result = scan_file(&path, &Validator::default());
        assert!(matches!(result, Err(Error::UnsupportedFile(_))));
    }

    #[test]
    fn test_rejects_oversized_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.html");
        let file = fs::File::create(&path).unwrap();
        file.set_len(MAX_INPUT_BYTES + 1).unwrap();
        let result = scan_file(&path, &Validator::default());
        assert!(matches!(result, Err(Error::InputTooLarge { .. })));
    }

    #[test]
    fn test_scan_directory_skips_excluded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.html"), "<img src=\"a.jpg\">").unwrap();
        fs::write(dir.path().join("b.htm"), "<img src=\"b.jpg\" alt=\"A red bicycle\">").unwrap();
        fs::write(dir.path().join("notes.md"), "<img src=\"c.jpg\">").unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules").join("x.html"), "<img>").unwrap();

        let reports = scan_directory(dir.path(), &Validator::default()).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports[0].path.ends_with("a.html"));
        assert_eq!(reports[0].issues.len(), 1);
        assert!(reports[1].issues.is_empty());
    }
}
