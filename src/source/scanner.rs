use super::Document;
use crate::file_ordering::{sort_by_rank, PriorityTable};
use anyhow::{anyhow, Context, Result};
use derive_builder::Builder;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Finds README documents in a repository.
#[derive(Builder, Debug)]
#[builder(setter(into), build_fn(skip, error = "anyhow::Error"))]
pub struct Scanner {
    root: PathBuf,
    /// Directory names that are never descended into
    #[builder(setter(each(name = "exclude", into)), default)]
    excluded_dirs: Vec<String>,
    /// Files (relative to the root) to ignore, see [`block_set`]
    #[builder(default)]
    blocked: GlobSet,
    #[builder(default)]
    priorities: PriorityTable,
}

/// Compile block globs into one set.
pub fn block_set<S: AsRef<str>>(globs: &[S]) -> Result<GlobSet> {
    let mut blocked = GlobSetBuilder::new();
    for pattern in globs {
        let pattern = pattern.as_ref();
        blocked.add(
            Glob::new(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?,
        );
    }
    blocked
        .build()
        .with_context(|| "Failed to compile block globs")
}

impl ScannerBuilder {
    /// Build the scanner, making sure the root is a directory.
    pub fn build(&mut self) -> Result<Scanner> {
        let root = self
            .root
            .take()
            .ok_or_else(|| anyhow!("Repository root not provided!"))?;

        if !root.is_dir() {
            return Err(anyhow!(
                "Repository path {} isn't a directory!",
                root.display()
            ));
        }

        Ok(Scanner {
            root,
            excluded_dirs: self.excluded_dirs.take().unwrap_or_default(),
            blocked: self.blocked.take().unwrap_or_default(),
            priorities: self.priorities.take().unwrap_or_default(),
        })
    }
}

impl Scanner {
    /// Relative paths of every README candidate, in sorted traversal order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let excluded = self.excluded_dirs.clone();
        let walk = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                !(is_dir
                    && entry.depth() > 0
                    && excluded
                        .iter()
                        .any(|name| entry.file_name() == OsStr::new(name)))
            })
            .build();

        let mut candidates = Vec::default();
        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to walk part of the repository: {e}");
                    continue;
                }
            };

            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            let is_readme = entry
                .file_name()
                .to_str()
                .map(|name| name.eq_ignore_ascii_case("README.md"))
                .unwrap_or(false);
            if !is_file || !is_readme {
                continue;
            }

            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => continue,
            };
            if self.blocked.is_match(&relative) {
                log::debug!("blocked {}", relative.display());
                continue;
            }
            candidates.push(relative);
        }

        candidates
    }

    /// Read every README, ordered by priority rank. Files that can't be read
    /// are logged and skipped.
    pub fn documents(&self) -> Vec<Document> {
        let mut documents: Vec<Document> = self
            .candidates()
            .into_iter()
            .filter_map(|relative| {
                let path = self.root.join(&relative);
                match std::fs::read_to_string(&path) {
                    Ok(contents) => {
                        let rank = self.priorities.rank_of(&relative);
                        Some(Document::new(relative, contents, rank))
                    }
                    Err(e) => {
                        log::warn!("Could not read {}: {e}", path.display());
                        None
                    }
                }
            })
            .collect();

        sort_by_rank(&mut documents, |doc| doc.rank);
        log::info!(
            "Found {} README file(s) under {}",
            documents.len(),
            self.root.display()
        );
        documents
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, path: &str, contents: &str) {
        let path = root.join(path);
        fs::create_dir_all(path.parent().expect("has parent")).expect("can create dirs");
        fs::write(path, contents).expect("can write file");
    }

    #[test]
    fn scanner_builder_requires_directory() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").expect("can write file");

        assert!(ScannerBuilder::default().root(file).build().is_err());
        assert!(ScannerBuilder::default().build().is_err());
    }

    #[test]
    fn can_find_and_rank_readmes() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        write(root, "software/README.md", "# Software");
        write(root, "hardware/readme.md", "# Hardware");
        write(root, "README.md", "# Root");
        write(root, "docs/README.md", "# Docs");
        write(root, "docs/NOTES.md", "# Not a readme");

        let scanner = ScannerBuilder::default()
            .root(root)
            .build()
            .expect("can build scanner");
        let docs = scanner.documents();

        let paths: Vec<_> = docs.iter().map(|d| d.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("README.md"),
                PathBuf::from("hardware/readme.md"),
                PathBuf::from("software/README.md"),
                PathBuf::from("docs/README.md"),
            ]
        );
        let ranks: Vec<_> = docs.iter().map(|d| d.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 5]);
    }

    #[test]
    fn excluded_dirs_and_block_globs_are_skipped() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let root = dir.path();
        write(root, "README.md", "# Root");
        write(root, "node_modules/pkg/README.md", "# Dependency");
        write(root, ".git/README.md", "# Git");
        write(root, "vendor/lib/README.md", "# Vendored");

        let scanner = ScannerBuilder::default()
            .root(root)
            .exclude("node_modules")
            .exclude(".git")
            .blocked(block_set(&["vendor/**"]).expect("valid glob"))
            .build()
            .expect("can build scanner");

        assert_eq!(scanner.candidates(), vec![PathBuf::from("README.md")]);
    }

    #[test]
    fn empty_repository_has_no_documents() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let scanner = ScannerBuilder::default()
            .root(dir.path())
            .build()
            .expect("can build scanner");
        assert!(scanner.documents().is_empty());
    }

    #[test]
    fn invalid_block_glob_is_an_error() {
        assert!(block_set(&["[unclosed"]).is_err());
        assert!(block_set::<&str>(&[]).is_ok());
    }
}
