#![deny(clippy::all)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod catalog;
pub mod category;
pub mod discovery;
pub mod metadata;
pub mod store;

pub use catalog::{refresh_catalog, CatalogRefresh};
pub use category::{category_from_commit, resolve_category, CategorySource, ResolvedCategory};
pub use discovery::{discover_projects, project_key, INDEX_FILE};
pub use metadata::PageMetadata;
pub use store::{
    load_store, render_store, save_store, CategoryGroup, ProjectEntry, ProjectRecord, ProjectStore,
    StoreError, DEFAULT_CATEGORY,
};
