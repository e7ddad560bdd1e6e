use std::path::Path;

use tracing::debug;

use crate::category::resolve_category;
use crate::discovery::{discover_projects, INDEX_FILE};
use crate::metadata::PageMetadata;
use crate::store::{ProjectRecord, ProjectStore};

/// Result of rescanning the site against the previously persisted store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRefresh {
    pub store: ProjectStore,
    /// Paths discovered now that the previous store did not know.
    pub added: Vec<String>,
    /// Paths the previous store knew that are no longer discovered.
    pub pruned: Vec<String>,
}

/// Rebuilds the catalog from the pages currently under `root`.
///
/// Titles and descriptions always come from disk. Categories follow
/// [`resolve_category`]. Entries whose directory has disappeared are dropped.
pub fn refresh_catalog(
    root: &Path,
    previous: &ProjectStore,
    commit_message: Option<&str>,
) -> CatalogRefresh {
    let mut store = ProjectStore::new();
    let mut added = Vec::new();

    for path in discover_projects(root) {
        let index_path = root.join(&path).join(INDEX_FILE);
        let page = PageMetadata::extract(&index_path, &path);
        let existing = previous.get(&path);
        let category = resolve_category(page.category.as_deref(), existing, commit_message);
        debug!(
            path = %path,
            title = %page.title,
            category = %category.name,
            source = category.source.as_str(),
            "indexed project"
        );
        if existing.is_none() {
            added.push(path.clone());
        }
        store.insert(
            path,
            ProjectRecord::new(page.title, category.name, page.description),
        );
    }

    added.sort();
    let pruned = previous
        .paths()
        .filter(|path| !store.contains(path))
        .map(str::to_string)
        .collect();

    CatalogRefresh {
        store,
        added,
        pruned,
    }
}
