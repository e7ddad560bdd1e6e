use std::fmt;
use std::path::Path;

use crate::config::{Config, EnvSnapshot, GlobalOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandGroup {
    Generate,
    List,
}

impl fmt::Display for CommandGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandGroup::Generate => "generate",
            CommandGroup::List => "list",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CommandInfo {
    pub group: CommandGroup,
    pub name: &'static str,
}

impl CommandInfo {
    #[must_use]
    pub const fn new(group: CommandGroup, name: &'static str) -> Self {
        Self { group, name }
    }
}

pub struct CommandContext {
    env: EnvSnapshot,
    config: Config,
}

impl CommandContext {
    /// Creates a command context from the global options and the current
    /// process environment.
    #[must_use]
    pub fn new(global: &GlobalOptions) -> Self {
        Self::with_env(global, EnvSnapshot::capture())
    }

    #[must_use]
    pub fn with_env(global: &GlobalOptions, env: EnvSnapshot) -> Self {
        let config = Config::from_snapshot(global, &env);
        Self { env, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn env(&self) -> &EnvSnapshot {
        &self.env
    }

    pub fn root(&self) -> &Path {
        self.config.root()
    }

    pub fn store_path(&self) -> &Path {
        self.config.store_path()
    }

    pub fn index_path(&self) -> &Path {
        self.config.index_path()
    }
}
