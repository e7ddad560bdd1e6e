use std::fs;
use std::path::Path;

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Title, category and description scraped from a project's `index.html`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageMetadata {
    pub title: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl PageMetadata {
    /// Reads and parses `index_path`. Never fails: an unreadable page logs a
    /// warning and yields `fallback_title` with no category or description.
    pub fn extract(index_path: &Path, fallback_title: &str) -> Self {
        match fs::read_to_string(index_path) {
            Ok(html) => Self::from_html(&html, fallback_title),
            Err(err) => {
                warn!(
                    path = %index_path.display(),
                    error = %err,
                    "failed to read project page; using directory as title"
                );
                Self {
                    title: fallback_title.to_string(),
                    category: None,
                    description: None,
                }
            }
        }
    }

    pub fn from_html(html: &str, fallback_title: &str) -> Self {
        let document = Html::parse_document(html);
        let title = select_first(&document, "title")
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| fallback_title.to_string());
        Self {
            title,
            category: meta_content(&document, "category"),
            description: meta_content(&document, "description"),
        }
    }
}

/// Trimmed `content` of the first `<meta name="...">` tag, if non-empty.
fn meta_content(document: &Html, name: &str) -> Option<String> {
    let element = select_first(document, &format!(r#"meta[name="{name}"]"#))?;
    let content = element.value().attr("content")?.trim();
    (!content.is_empty()).then(|| content.to_string())
}

fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}
