use siteindex_domain::ProjectStore;

use super::escape;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Project Index</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; color: #333; }
        h1 { border-bottom: 2px solid #eee; padding-bottom: 10px; }
        h2 { margin-top: 30px; color: #555; font-size: 1.5em; border-bottom: 1px solid #eee; padding-bottom: 5px; }
        ul { list-style-type: none; padding: 0; }
        li { margin-bottom: 12px; }
        a { text-decoration: none; color: #0366d6; font-weight: 600; font-size: 1.1em; }
        a:hover { text-decoration: underline; }
        .project-description { margin: 4px 0 0; color: #444; }
        .project-path { font-size: 0.85em; color: #666; margin-left: 10px; font-weight: normal; }
    </style>
</head>
<body>
    <h1>Project Index</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Builds a complete standalone index page: one section per category, each
/// listing its projects by title.
pub fn render_page(store: &ProjectStore) -> String {
    let mut html = String::from(PAGE_HEAD);
    for group in store.by_category() {
        html.push_str(&format!("    <h2>{}</h2>\n    <ul>\n", escape(group.name)));
        for project in &group.projects {
            let path = escape(project.path);
            html.push_str(&format!(
                "        <li><a href=\"{path}/index.html\">{}</a> <span class=\"project-path\">({path})</span>",
                escape(&project.record.title),
            ));
            if let Some(description) = &project.record.description {
                html.push_str(&format!(
                    "\n            <p class=\"project-description\">{}</p>\n        ",
                    escape(description)
                ));
            }
            html.push_str("</li>\n");
        }
        html.push_str("    </ul>\n");
    }
    html.push_str(PAGE_TAIL);
    html
}
