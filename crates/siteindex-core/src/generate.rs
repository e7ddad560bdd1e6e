use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use siteindex_domain::{load_store, refresh_catalog, save_store, StoreError};
use tracing::{debug, info};

use crate::context::CommandContext;
use crate::outcome::ExecutionOutcome;
use crate::render::{render_index, RenderError, RenderStrategy};

#[derive(Clone, Debug, Default)]
pub struct GenerateRequest {
    pub commit_message: Option<String>,
    pub strategy: RenderStrategy,
    pub dry_run: bool,
}

/// Rescans the site, persists the refreshed store, then re-renders the
/// index page.
///
/// The store is written before rendering starts, so a render failure
/// (missing template, missing markers) leaves the updated store in place.
pub fn generate(ctx: &CommandContext, request: &GenerateRequest) -> Result<ExecutionOutcome> {
    let store_path = ctx.store_path();
    let index_path = ctx.index_path();

    let previous = match load_store(store_path) {
        Ok(store) => store,
        Err(err @ StoreError::Malformed { .. }) => return Ok(store_error_outcome(&err)),
        Err(err) => return Err(err.into()),
    };
    let commit_message = ctx.config().commit_message(request.commit_message.as_deref());
    debug!(
        root = %ctx.root().display(),
        commit_message = commit_message.as_deref().unwrap_or(""),
        "scanning for projects"
    );

    let refresh = refresh_catalog(ctx.root(), &previous, commit_message.as_deref());
    for path in &refresh.pruned {
        info!(path = %path, "dropping project that is no longer present");
    }

    let store_changed = refresh.store != previous;
    if request.dry_run {
        debug!(path = %store_path.display(), "dry run; not writing project store");
    } else {
        save_store(store_path, &refresh.store)?;
        info!(path = %store_path.display(), projects = refresh.store.len(), "wrote project store");
    }

    let categories: Vec<&str> = refresh
        .store
        .by_category()
        .iter()
        .map(|group| group.name)
        .collect();
    let category_count = categories.len();
    let mut details = json!({
        "projects": refresh.store.len(),
        "categories": categories,
        "added": refresh.added,
        "pruned": refresh.pruned,
        "store": store_path.display().to_string(),
        "index": index_path.display().to_string(),
        "strategy": request.strategy.as_str(),
        "dry_run": request.dry_run,
        "store_changed": store_changed,
        "rendered": false,
    });

    let current = match read_current_index(request.strategy, index_path) {
        Ok(current) => current,
        Err(err) => return Ok(render_error_outcome(&err, details, request.dry_run)),
    };
    let rendered = match render_index(request.strategy, &refresh.store, &current) {
        Ok(rendered) => rendered,
        Err(err) => return Ok(render_error_outcome(&err, details, request.dry_run)),
    };

    let index_changed = rendered != current;
    if !request.dry_run {
        fs::write(index_path, &rendered)
            .with_context(|| format!("failed to write index page {}", index_path.display()))?;
        info!(path = %index_path.display(), "wrote index page");
    }
    details["rendered"] = Value::Bool(true);
    details["index_changed"] = Value::Bool(index_changed);

    let verb = if request.dry_run { "would index" } else { "indexed" };
    let message = format!(
        "{verb} {} in {}",
        plural(refresh.store.len(), "project"),
        plural(category_count, "category"),
    );
    Ok(ExecutionOutcome::success(message, details))
}

/// The template strategy needs the existing page; the full strategy starts
/// from nothing but still reports whether the file would change.
fn read_current_index(strategy: RenderStrategy, path: &Path) -> Result<String, RenderError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(err) if err.kind() == io::ErrorKind::NotFound && strategy == RenderStrategy::Full => {
            Ok(String::new())
        }
        Err(source) => Err(RenderError::ReadIndex {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn render_error_outcome(err: &RenderError, mut details: Value, dry_run: bool) -> ExecutionOutcome {
    details["reason"] = Value::String(err.reason().to_string());
    details["hint"] = Value::String(err.hint().to_string());
    details["store_saved"] = Value::Bool(!dry_run);
    ExecutionOutcome::user_error(format!("index page not updated: {err}"), details)
}

pub(crate) fn store_error_outcome(err: &StoreError) -> ExecutionOutcome {
    ExecutionOutcome::user_error(
        err.to_string(),
        json!({
            "reason": "store_malformed",
            "store": err.path().map(|path| path.display().to_string()),
            "hint": "fix or delete the project store and rerun",
        }),
    )
}

pub(crate) fn plural(count: usize, noun: &str) -> String {
    match (count, noun) {
        (1, _) => format!("1 {noun}"),
        (_, "category") => format!("{count} categories"),
        _ => format!("{count} {noun}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use siteindex_domain::ProjectStore;
    use tempfile::tempdir;

    use crate::config::{EnvSnapshot, GlobalOptions, COMMIT_MSG_ENV};
    use crate::outcome::CommandStatus;

    const INDEX: &str = r#"<html>
<body>
  <template id="category-template">
    <h2>{{category}}</h2>
    <ul>
      {{projects}}
    </ul>
  </template>
  <template id="project-template">
    <li><a href="{{path}}/index.html">{{title}}</a></li>
    <li class="description">{{description}}</li>
  </template>
  <!-- PROJECTS:START -->
  <!-- PROJECTS:END -->
</body>
</html>
"#;

    fn page(root: &Path, rel: &str, html: &str) {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).expect("mkdir");
        fs::write(dir.join("index.html"), html).expect("write page");
    }

    fn global(root: &Path) -> GlobalOptions {
        GlobalOptions {
            root: Some(root.to_path_buf()),
            ..GlobalOptions::default()
        }
    }

    fn run(root: &Path, env: &[(&str, &str)], request: &GenerateRequest) -> ExecutionOutcome {
        let global = global(root);
        let ctx = CommandContext::with_env(&global, EnvSnapshot::testing(env));
        generate(&ctx, request).expect("generate")
    }

    fn stored(root: &Path) -> ProjectStore {
        load_store(&root.join("projects.json")).expect("load store")
    }

    #[test]
    fn writes_store_and_index() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        fs::write(root.join("index.html"), INDEX).expect("index");
        page(root, "docs/tool-a", "<title>Tool A</title>");
        page(root, "games/snake", r#"<title>Snake</title><meta name="description" content="Eat apples">"#);

        let outcome = run(root, &[], &GenerateRequest::default());
        assert_eq!(outcome.status, CommandStatus::Ok, "{outcome:?}");
        assert_eq!(outcome.message, "indexed 2 projects in 1 category");
        assert_eq!(outcome.details["added"], json!(["docs/tool-a", "games/snake"]));

        let store = stored(root);
        assert_eq!(store.get("docs/tool-a").map(|r| r.title.as_str()), Some("Tool A"));
        let index = fs::read_to_string(root.join("index.html")).expect("read index");
        assert!(index.contains("<li><a href=\"games/snake/index.html\">Snake</a></li>"));
        assert!(index.contains("<li class=\"description\">Eat apples</li>"));
    }

    #[test]
    fn commit_message_from_environment_categorizes_new_projects() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        fs::write(root.join("index.html"), INDEX).expect("index");
        page(root, "demo/x", "<title>X</title>");

        run(root, &[(COMMIT_MSG_ENV, "[Games] add demo")], &GenerateRequest::default());
        assert_eq!(
            stored(root).get("demo/x").map(|r| r.category.as_str()),
            Some("Games")
        );
    }

    #[test]
    fn explicit_commit_message_beats_environment() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        fs::write(root.join("index.html"), INDEX).expect("index");
        page(root, "demo/y", "<title>Y</title>");

        let request = GenerateRequest {
            commit_message: Some("Category: Utilities".into()),
            ..GenerateRequest::default()
        };
        run(root, &[(COMMIT_MSG_ENV, "[Games] nope")], &request);
        assert_eq!(
            stored(root).get("demo/y").map(|r| r.category.as_str()),
            Some("Utilities")
        );
    }

    #[test]
    fn second_run_is_byte_identical() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        fs::write(root.join("index.html"), INDEX).expect("index");
        page(root, "a", "<title>A</title>");
        page(root, "b", r#"<title>B</title><meta name="category" content="Tools">"#);

        run(root, &[], &GenerateRequest::default());
        let store_first = fs::read(root.join("projects.json")).expect("store");
        let index_first = fs::read(root.join("index.html")).expect("index");

        let outcome = run(root, &[], &GenerateRequest::default());
        assert_eq!(outcome.details["store_changed"], json!(false));
        assert_eq!(outcome.details["index_changed"], json!(false));
        assert_eq!(fs::read(root.join("projects.json")).expect("store"), store_first);
        assert_eq!(fs::read(root.join("index.html")).expect("index"), index_first);
    }

    #[test]
    fn missing_template_keeps_saved_store_and_page() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        let page_without_templates = "<html><!-- PROJECTS:START --><!-- PROJECTS:END --></html>";
        fs::write(root.join("index.html"), page_without_templates).expect("index");
        page(root, "a", "<title>A</title>");

        let outcome = run(root, &[], &GenerateRequest::default());
        assert_eq!(outcome.status, CommandStatus::UserError);
        assert_eq!(outcome.details["reason"], "missing_template");
        assert_eq!(outcome.details["store_saved"], json!(true));
        assert!(stored(root).contains("a"));
        assert_eq!(
            fs::read_to_string(root.join("index.html")).expect("index"),
            page_without_templates
        );
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        fs::write(root.join("index.html"), INDEX).expect("index");
        page(root, "a", "<title>A</title>");

        let request = GenerateRequest {
            dry_run: true,
            ..GenerateRequest::default()
        };
        let outcome = run(root, &[], &request);
        assert_eq!(outcome.status, CommandStatus::Ok);
        assert_eq!(outcome.message, "would index 1 project in 1 category");
        assert_eq!(outcome.details["index_changed"], json!(true));
        assert!(!root.join("projects.json").exists());
        assert_eq!(fs::read_to_string(root.join("index.html")).expect("index"), INDEX);
    }

    #[test]
    fn full_strategy_creates_the_page() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        page(root, "a", "<title>A</title>");

        let request = GenerateRequest {
            strategy: RenderStrategy::Full,
            ..GenerateRequest::default()
        };
        let outcome = run(root, &[], &request);
        assert_eq!(outcome.status, CommandStatus::Ok, "{outcome:?}");
        let index = fs::read_to_string(root.join("index.html")).expect("index");
        assert!(index.contains("<h2>Uncategorized</h2>"));
    }

    #[test]
    fn template_strategy_without_index_is_a_user_error() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        page(root, "a", "<title>A</title>");

        let outcome = run(root, &[], &GenerateRequest::default());
        assert_eq!(outcome.status, CommandStatus::UserError);
        assert_eq!(outcome.details["reason"], "index_unreadable");
    }

    #[test]
    fn malformed_store_is_a_user_error() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        fs::write(root.join("index.html"), INDEX).expect("index");
        fs::write(root.join("projects.json"), "[1, 2").expect("store");

        let outcome = run(root, &[], &GenerateRequest::default());
        assert_eq!(outcome.status, CommandStatus::UserError);
        assert_eq!(outcome.details["reason"], "store_malformed");
    }
}
