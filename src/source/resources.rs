//! Finding the files (images, PDFs) that README documents point at.

use anyhow::{Context, Result};
use globset::GlobBuilder;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static MARKDOWN_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"!\[[^\]]*\]\(([^)\s]+)(?:\s+"[^"]*")?\)"#).unwrap());
static HTML_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*"([^"]+)""#).unwrap());
static PDF_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:\]\(|href=")([^)"\s]+\.pdf)(?:[)"])"#).unwrap()
});

/// Resolves file names against an ordered list of directories.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    dirs: Vec<PathBuf>,
}

impl ResourceIndex {
    /// `candidate_dirs` are relative to `root` and searched in order.
    pub fn new<S: AsRef<str>>(root: &Path, candidate_dirs: &[S]) -> ResourceIndex {
        ResourceIndex {
            dirs: candidate_dirs
                .iter()
                .map(|dir| root.join(dir.as_ref()))
                .collect(),
        }
    }

    /// First candidate directory holding a file called `name`.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|path| path.is_file())
    }

    /// First file (by directory order, then name) whose name matches `glob`,
    /// compared case-insensitively.
    pub fn find_matching(&self, glob: &str) -> Result<Option<PathBuf>> {
        let matcher = GlobBuilder::new(glob)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid glob pattern: {glob}"))?
            .compile_matcher();

        for dir in &self.dirs {
            let Ok(entries) = std::fs::read_dir(dir) else {
                continue;
            };
            let mut names: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file())
                .collect();
            names.sort();
            if let Some(found) = names.into_iter().find(|path| {
                path.file_name()
                    .map(|name| matcher.is_match(Path::new(name)))
                    .unwrap_or(false)
            }) {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

fn is_remote(target: &str) -> bool {
    let lowered = target.to_lowercase();
    lowered.starts_with("http://")
        || lowered.starts_with("https://")
        || lowered.starts_with("data:")
        || lowered.starts_with('#')
}

/// Base file name of a local reference, without query string or fragment.
fn base_name(target: &str) -> Option<String> {
    let target = target.split(['?', '#']).next()?;
    let name = target.rsplit('/').next()?;
    let name = name.replace("%20", " ");
    (!name.is_empty()).then_some(name)
}

/// File names of every local image or PDF referenced from `text`, in order of
/// first appearance.
pub fn references(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();
    for regex in [&*MARKDOWN_IMAGE, &*HTML_IMAGE, &*PDF_LINK] {
        for captures in regex.captures_iter(text) {
            let Some(target) = captures.get(1) else {
                continue;
            };
            if is_remote(target.as_str()) {
                continue;
            }
            if let Some(name) = base_name(target.as_str()) {
                found.push((target.start(), name));
            }
        }
    }

    found.sort_by_key(|(position, _)| *position);
    let mut names: Vec<String> = Vec::with_capacity(found.len());
    for (_, name) in found {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn can_find_references() {
        let text = r#"![board](resources/top%20view.png "Top")
<img src="./hardware/resources/pinout.jpg" width="300">
[Datasheet](./product.pdf) and [remote](https://example.com/x.pdf)
![remote](https://example.com/a.png)
![again](resources/top%20view.png)"#;
        assert_eq!(
            references(text),
            vec!["top view.png", "pinout.jpg", "product.pdf"]
        );
    }

    #[test]
    fn resolve_uses_first_candidate() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        fs::create_dir_all(root.join("hardware/resources")).expect("can create dirs");
        fs::create_dir_all(root.join("docs")).expect("can create dirs");
        fs::write(root.join("hardware/resources/a.png"), "1").expect("can write");
        fs::write(root.join("docs/a.png"), "2").expect("can write");
        fs::write(root.join("docs/b.png"), "3").expect("can write");

        let index = ResourceIndex::new(root, &["hardware/resources", "hardware", "docs"]);
        assert_eq!(index.resolve("a.png"), Some(root.join("hardware/resources/a.png")));
        assert_eq!(index.resolve("b.png"), Some(root.join("docs/b.png")));
        assert_eq!(index.resolve("c.png"), None);
    }

    #[test]
    fn can_find_matching_pdfs() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        fs::create_dir_all(root.join("hardware")).expect("can create dirs");
        fs::write(root.join("hardware/Widget_Product_Brief.pdf"), "%PDF").expect("can write");
        fs::write(root.join("hardware/widget_sch.pdf"), "%PDF").expect("can write");

        let index = ResourceIndex::new(root, &["hardware/resources", "hardware", "docs"]);
        assert_eq!(
            index.find_matching("*product*.pdf").expect("valid glob"),
            Some(root.join("hardware/Widget_Product_Brief.pdf"))
        );
        assert_eq!(
            index.find_matching("*sch*.pdf").expect("valid glob"),
            Some(root.join("hardware/widget_sch.pdf"))
        );
        assert_eq!(index.find_matching("*layout*.pdf").expect("valid glob"), None);
    }
}
