#![deny(clippy::all)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod config;
pub mod context;
pub mod generate;
pub mod list;
pub mod outcome;
pub mod render;
pub mod response;

pub use config::{Config, EnvSnapshot, GlobalOptions, NO_COLOR_ENV};
pub use context::{CommandContext, CommandGroup, CommandInfo};
pub use generate::{generate, GenerateRequest};
pub use list::list_projects;
pub use outcome::{CommandStatus, ExecutionOutcome};
pub use render::{RenderError, RenderStrategy};
pub use response::{format_status_message, to_json_response, PROGRAM_NAME};
