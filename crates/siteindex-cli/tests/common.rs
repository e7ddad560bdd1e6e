#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::{assert::Assert, cargo::cargo_bin_cmd, Command};
use serde_json::Value;
use tempfile::TempDir;

pub const TEMPLATE_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Projects</title>
  <style>.description { color: #555; }</style>
</head>
<body>
  <h1>Projects</h1>
  <template id="category-template">
    <section class="category" data-category="{{category}}">
      <h2>{{category}}</h2>
      <ul>
        {{projects}}
      </ul>
    </section>
  </template>
  <template id="project-template">
    <li>
      <a href="{{path}}/index.html">{{title}}</a>
      <p class="description">{{description}}</p>
    </li>
  </template>
  <main>
    <!-- PROJECTS:START -->
    <!-- PROJECTS:END -->
  </main>
  <script>document.title += "";</script>
</body>
</html>
"#;

/// A site root holding the template index page.
pub fn prepare_site(prefix: &str) -> (TempDir, PathBuf) {
    let temp = tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("tempdir");
    let root = temp.path().to_path_buf();
    fs::write(root.join("index.html"), TEMPLATE_INDEX).expect("write index");
    (temp, root)
}

pub fn write_project(root: &Path, rel: &str, html: &str) {
    let dir = root.join(rel);
    fs::create_dir_all(&dir).expect("create project dir");
    fs::write(dir.join("index.html"), html).expect("write project page");
}

/// The binary, isolated from the caller's environment and run inside `root`.
pub fn siteindex(root: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("siteindex");
    cmd.current_dir(root)
        .env_remove("COMMIT_MSG")
        .env_remove("SITEINDEX_STORE")
        .env_remove("SITEINDEX_INDEX")
        .env("NO_COLOR", "1");
    cmd
}

pub fn parse_json(assert: &Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout).expect("valid json")
}

pub fn read_store(root: &Path) -> Value {
    let contents = fs::read_to_string(root.join("projects.json")).expect("read store");
    serde_json::from_str(&contents).expect("store json")
}

pub fn read_index(root: &Path) -> String {
    fs::read_to_string(root.join("index.html")).expect("read index")
}

/// Text between the marker comments of the rendered index page.
pub fn generated_region(index: &str) -> &str {
    let start = index.find("<!-- PROJECTS:START -->").expect("start marker");
    let end = index.find("<!-- PROJECTS:END -->").expect("end marker");
    &index[start..end]
}
