//! Index page renderers.
//!
//! `Template` splices generated markup between marker comments of the
//! existing page using `<template>` fragments defined in that same page.
//! `Full` writes a self-contained page from scratch.

mod page;
mod template;

use std::io;
use std::path::PathBuf;

use siteindex_domain::ProjectStore;

pub use page::render_page;
pub use template::{
    render_template, CATEGORY_TEMPLATE_ID, END_MARKER, PROJECTS_PLACEHOLDER, PROJECT_TEMPLATE_ID,
    START_MARKER,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderStrategy {
    #[default]
    Template,
    Full,
}

impl RenderStrategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RenderStrategy::Template => "template",
            RenderStrategy::Full => "full",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to read index page {}: {source}", path.display())]
    ReadIndex {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("template `{id}` not found in the index page")]
    MissingTemplate { id: &'static str },
    #[error("template `{id}` has no `{placeholder}` line")]
    MissingSlot {
        id: &'static str,
        placeholder: &'static str,
    },
    #[error("marker comments `PROJECTS:START` / `PROJECTS:END` not found in the index page")]
    MissingMarkers,
}

impl RenderError {
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            RenderError::ReadIndex { .. } => "index_unreadable",
            RenderError::MissingTemplate { .. } => "missing_template",
            RenderError::MissingSlot { .. } => "missing_slot",
            RenderError::MissingMarkers => "missing_markers",
        }
    }

    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self {
            RenderError::ReadIndex { .. } => {
                "create the index page first, or pass --strategy full to generate one"
            }
            RenderError::MissingTemplate { .. } => {
                "define <template id=\"category-template\"> and <template id=\"project-template\"> in the index page"
            }
            RenderError::MissingSlot { .. } => {
                "put {{projects}} on its own line inside the category template"
            }
            RenderError::MissingMarkers => {
                "add <!-- PROJECTS:START --> and <!-- PROJECTS:END --> where the listing belongs"
            }
        }
    }
}

/// Renders the index page for `store`. The template strategy needs the
/// current page contents; the full strategy ignores them.
pub fn render_index(
    strategy: RenderStrategy,
    store: &ProjectStore,
    current: &str,
) -> Result<String, RenderError> {
    match strategy {
        RenderStrategy::Template => render_template(current, store),
        RenderStrategy::Full => Ok(render_page(store)),
    }
}

/// Escapes a value for use in either element text or a quoted attribute.
pub(crate) fn escape(value: &str) -> String {
    html_escape::encode_quoted_attribute(value).into_owned()
}
