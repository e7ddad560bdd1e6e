use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_FILE: &str = "projects.json";
pub const DEFAULT_INDEX_FILE: &str = "index.html";
pub const COMMIT_MSG_ENV: &str = "COMMIT_MSG";
pub const STORE_ENV: &str = "SITEINDEX_STORE";
pub const INDEX_ENV: &str = "SITEINDEX_INDEX";
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Path overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub root: Option<PathBuf>,
    pub store: Option<PathBuf>,
    pub index: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    #[must_use]
    pub fn capture() -> Self {
        Self::from_os_vars(env::vars_os())
    }

    /// Keeps only variables whose name and value are valid UTF-8.
    fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        let vars = vars
            .into_iter()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Returns the variable's value, treating an empty string as unset.
    #[must_use]
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    #[cfg(test)]
    pub(crate) fn testing(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) paths: PathsConfig,
    pub(crate) commit: CommitConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathsConfig {
    pub root: PathBuf,
    pub store: PathBuf,
    pub index: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CommitConfig {
    pub env_message: Option<String>,
}

impl Config {
    /// Builds a configuration from CLI overrides layered over the environment.
    ///
    /// Store and index paths resolve against the root unless absolute.
    #[must_use]
    pub fn from_snapshot(global: &GlobalOptions, snapshot: &EnvSnapshot) -> Self {
        let root = global.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let store = global
            .store
            .clone()
            .or_else(|| snapshot.var(STORE_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE));
        let index = global
            .index
            .clone()
            .or_else(|| snapshot.var(INDEX_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_FILE));
        Self {
            paths: PathsConfig {
                store: root.join(store),
                index: root.join(index),
                root,
            },
            commit: CommitConfig {
                env_message: snapshot.var(COMMIT_MSG_ENV).map(ToOwned::to_owned),
            },
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.paths.root
    }

    #[must_use]
    pub fn store_path(&self) -> &Path {
        &self.paths.store
    }

    #[must_use]
    pub fn index_path(&self) -> &Path {
        &self.paths.index
    }

    /// An explicit, non-empty message wins over `COMMIT_MSG`.
    #[must_use]
    pub fn commit_message(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .filter(|message| !message.is_empty())
            .map(ToOwned::to_owned)
            .or_else(|| self.commit.env_message.clone())
    }
}
