use std::path::{Component, Path};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

pub const INDEX_FILE: &str = "index.html";

/// Returns the relative, `/`-separated paths of every directory below `root`
/// that directly contains an `index.html`.
///
/// The root itself never qualifies, and any directory with a dot-prefixed
/// segment is skipped along with everything beneath it.
pub fn discover_projects(root: &Path) -> Vec<String> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        // depth 0 is the root directory
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            continue;
        }
        if !entry.path().join(INDEX_FILE).is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if let Some(key) = project_key(relative) {
            debug!(path = %key, "discovered project");
            found.push(key);
        }
    }
    found
}

/// Normalizes a relative directory path into the store key form
/// (`docs/tool-a`). Returns `None` for empty paths, paths that escape the
/// root, or paths with a hidden segment.
pub fn project_key(relative: &Path) -> Option<String> {
    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                let segment = segment.to_string_lossy();
                if segment.starts_with('.') {
                    return None;
                }
                segments.push(segment.into_owned());
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
