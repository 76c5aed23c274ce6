use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::warn;
use walkdir::WalkDir;

use crate::core::parsers::source::SOURCE_EXTENSIONS;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Source files, sorted so builds and reports are deterministic.
    pub files: BTreeSet<PathBuf>,
    pub skipped_count: usize,
}

/// Collect the source files under `base_dir`.
///
/// `includes` narrows the scan to some directories (literal paths or globs
/// relative to `base_dir`); an empty list scans the whole tree. `ignores`
/// removes paths by literal prefix or glob match.
pub fn scan_files(base_dir: &Path, includes: &[String], ignore_patterns: &[String]) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!("Invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let roots: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = base_dir.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten()),
                    Err(e) => warn!("Invalid include pattern '{}': {}", inc, e),
                }
            } else {
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    warn!("Include path does not exist: {}", path.display());
                }
            }
        }
        paths
    };

    for root in roots {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!("Cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            let relative = path.strip_prefix(base_dir).unwrap_or(path);
            if glob_patterns
                .iter()
                .any(|p| p.matches_path(relative) || p.matches_path(path))
            {
                continue;
            }

            if path.is_file() && is_source_file(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_source_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts") {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
