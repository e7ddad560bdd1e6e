use anyhow::Result;
use serde_json::{json, Value};
use siteindex_domain::{load_store, StoreError};

use crate::context::CommandContext;
use crate::generate::{plural, store_error_outcome};
use crate::outcome::ExecutionOutcome;

/// Reports the persisted catalog grouped by category without touching disk.
pub fn list_projects(ctx: &CommandContext) -> Result<ExecutionOutcome> {
    let store = match load_store(ctx.store_path()) {
        Ok(store) => store,
        Err(err @ StoreError::Malformed { .. }) => return Ok(store_error_outcome(&err)),
        Err(err) => return Err(err.into()),
    };

    let categories: Vec<Value> = store
        .by_category()
        .into_iter()
        .map(|group| {
            let projects: Vec<Value> = group
                .projects
                .iter()
                .map(|entry| {
                    json!({
                        "path": entry.path,
                        "title": entry.record.title,
                        "description": entry.record.description,
                    })
                })
                .collect();
            json!({ "name": group.name, "projects": projects })
        })
        .collect();

    let message = if store.is_empty() {
        format!("no projects recorded in {}", ctx.store_path().display())
    } else {
        format!(
            "{} in {}",
            plural(store.len(), "project"),
            plural(categories.len(), "category")
        )
    };
    Ok(ExecutionOutcome::success(
        message,
        json!({
            "store": ctx.store_path().display().to_string(),
            "projects": store.len(),
            "categories": categories,
        }),
    ))
}
