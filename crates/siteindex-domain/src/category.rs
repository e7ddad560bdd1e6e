use std::sync::OnceLock;

use regex::Regex;

use crate::store::{ProjectRecord, DEFAULT_CATEGORY};

/// Where a resolved category came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    Meta,
    Stored,
    Commit,
    Default,
}

impl CategorySource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CategorySource::Meta => "meta",
            CategorySource::Stored => "stored",
            CategorySource::Commit => "commit",
            CategorySource::Default => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategory {
    pub name: String,
    pub source: CategorySource,
}

/// Picks a project's category.
///
/// A `<meta name="category">` value always wins. Otherwise a previously
/// stored category sticks. Only brand-new projects consult the commit
/// message, and anything left over is `Uncategorized`.
pub fn resolve_category(
    meta: Option<&str>,
    existing: Option<&ProjectRecord>,
    commit_message: Option<&str>,
) -> ResolvedCategory {
    if let Some(name) = meta {
        return ResolvedCategory {
            name: name.to_string(),
            source: CategorySource::Meta,
        };
    }
    if let Some(record) = existing {
        return ResolvedCategory {
            name: record.category.clone(),
            source: CategorySource::Stored,
        };
    }
    match commit_message.and_then(category_from_commit) {
        Some(name) => ResolvedCategory {
            name,
            source: CategorySource::Commit,
        },
        None => ResolvedCategory {
            name: DEFAULT_CATEGORY.to_string(),
            source: CategorySource::Default,
        },
    }
}

/// Infers a category from a commit message: the first `[Bracketed]` text, or
/// else whatever follows `Category:` on its line (case-insensitive).
///
/// When brackets are present they decide the outcome, even if empty.
pub fn category_from_commit(message: &str) -> Option<String> {
    if let Some(captures) = bracket_pattern().and_then(|re| re.captures(message)) {
        let name = captures.get(1).map_or("", |m| m.as_str()).trim();
        return non_empty(name);
    }
    let captures = label_pattern().and_then(|re| re.captures(message))?;
    non_empty(captures.get(1).map_or("", |m| m.as_str()).trim())
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

fn bracket_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[(.*?)\]").ok()).as_ref()
}

fn label_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)Category:\s*(.*)").ok())
        .as_ref()
}
