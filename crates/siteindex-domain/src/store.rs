use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Metadata persisted for one project page, keyed by its relative path.
///
/// Fields are declared alphabetically so the serialized object keys come out
/// sorted, matching the sorted outer map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub title: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl ProjectRecord {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            category: category.into(),
            description: description.filter(|text| !text.is_empty()),
            title: title.into(),
        }
    }
}

/// Mapping from project path to its record. Iteration is always in
/// lexicographic path order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectStore {
    projects: BTreeMap<String, ProjectRecord>,
}

/// Borrowed view of a record together with its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectEntry<'a> {
    pub path: &'a str,
    pub record: &'a ProjectRecord,
}

/// Projects sharing one category, sorted by title then path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub name: &'a str,
    pub projects: Vec<ProjectEntry<'a>>,
}

impl ProjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&ProjectRecord> {
        self.projects.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.projects.contains_key(path)
    }

    pub fn insert(&mut self, path: impl Into<String>, record: ProjectRecord) -> Option<ProjectRecord> {
        self.projects.insert(path.into(), record)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = ProjectEntry<'_>> {
        self.projects
            .iter()
            .map(|(path, record)| ProjectEntry { path, record })
    }

    /// Groups projects by category. Categories come back in lexicographic
    /// order and each group's projects are ordered by title, then path.
    pub fn by_category(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: BTreeMap<&str, Vec<ProjectEntry<'_>>> = BTreeMap::new();
        for entry in self.iter() {
            groups
                .entry(entry.record.category.as_str())
                .or_default()
                .push(entry);
        }
        groups
            .into_iter()
            .map(|(name, mut projects)| {
                projects.sort_by(|a, b| {
                    a.record
                        .title
                        .cmp(&b.record.title)
                        .then_with(|| a.path.cmp(b.path))
                });
                CategoryGroup { name, projects }
            })
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read project store {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("project store {} is not valid JSON: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode project store: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write project store {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            StoreError::Read { path, .. }
            | StoreError::Malformed { path, .. }
            | StoreError::Write { path, .. } => Some(path),
            StoreError::Encode(_) => None,
        }
    }
}

/// Loads the store at `path`. A missing file is an empty store; a file that
/// exists but does not parse is an error.
pub fn load_store(path: &Path) -> Result<ProjectStore, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ProjectStore::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders the store as two-space indented JSON with sorted keys.
pub fn render_store(store: &ProjectStore) -> Result<String, StoreError> {
    serde_json::to_string_pretty(store).map_err(StoreError::Encode)
}

/// Overwrites `path` with the rendered store. The write is not atomic.
pub fn save_store(path: &Path, store: &ProjectStore) -> Result<(), StoreError> {
    let contents = render_store(store)?;
    fs::write(path, contents + "\n").map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
