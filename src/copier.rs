//! Copies images and PDFs from the repository into the generated book.

use crate::source::ResourceIndex;
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Distinct files placed under `resources/`
    pub files: usize,
    pub bytes: u64,
}

struct Copier<'a> {
    src: &'a Path,
    copied: BTreeSet<PathBuf>,
    bytes: u64,
}

impl Copier<'_> {
    /// Copy `from` to `relative` under each destination directory. Later
    /// copies of the same name overwrite earlier ones.
    fn copy(&mut self, from: &Path, relative: &Path, destinations: &[&str]) {
        for dest in destinations {
            let to = self.src.join(dest).join(relative);
            let result = to
                .parent()
                .map(std::fs::create_dir_all)
                .transpose()
                .and_then(|_| std::fs::copy(from, &to));
            match result {
                Ok(bytes) => {
                    if *dest == "resources" {
                        self.bytes += bytes;
                        self.copied.insert(relative.to_path_buf());
                    }
                }
                Err(e) => log::warn!(
                    "Failed to copy {} to {}: {e}",
                    from.display(),
                    to.display()
                ),
            }
        }
    }
}

fn pdfs_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut pdfs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                    .unwrap_or(false)
        })
        .collect();
    pdfs.sort();
    pdfs
}

/// Copy repository resources into the book source directory `src`.
///
/// Everything under `hardware/resources` is copied (keeping subdirectories),
/// then PDFs from `hardware/` and `docs/`, then any `referenced` file names
/// that can be resolved through `index`.
pub fn copy_resources(
    root: &Path,
    index: &ResourceIndex,
    referenced: &[String],
    src: &Path,
) -> CopyStats {
    let mut copier = Copier {
        src,
        copied: BTreeSet::new(),
        bytes: 0,
    };

    let resources = root.join("hardware").join("resources");
    if resources.is_dir() {
        let walk = WalkBuilder::new(&resources)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();
        for entry in walk.filter_map(|entry| entry.ok()) {
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&resources) {
                let relative = relative.to_path_buf();
                copier.copy(entry.path(), &relative, &["resources", "hardware/resources"]);
            }
        }
    }

    for pdf in pdfs_in(&root.join("hardware")) {
        if let Some(name) = pdf.file_name() {
            copier.copy(
                &pdf,
                Path::new(name),
                &["resources", "hardware/resources", "hardware"],
            );
        }
    }

    for pdf in pdfs_in(&root.join("docs")) {
        if let Some(name) = pdf.file_name() {
            copier.copy(&pdf, Path::new(name), &["resources", "hardware/resources"]);
        }
    }

    for name in referenced {
        let relative = Path::new(name);
        if copier.copied.contains(relative) {
            continue;
        }
        match index.resolve(name) {
            Some(path) => copier.copy(&path, relative, &["resources", "hardware/resources"]),
            None => log::debug!("referenced resource {name} not found"),
        }
    }

    let stats = CopyStats {
        files: copier.copied.len(),
        bytes: copier.bytes,
    };
    log::info!(
        "Copied {} resource file(s), {}",
        stats.files,
        byte_unit::Byte::from_u64(stats.bytes).get_appropriate_unit(byte_unit::UnitType::Binary)
    );
    stats
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn write(root: &Path, path: &str, contents: &str) {
        let path = root.join(path);
        fs::create_dir_all(path.parent().expect("has parent")).expect("can create dirs");
        fs::write(path, contents).expect("can write file");
    }

    #[test]
    fn can_copy_resources() {
        let repo = tempfile::tempdir().expect("can create tempdir");
        let out = tempfile::tempdir().expect("can create tempdir");
        let root = repo.path();
        write(root, "hardware/resources/top.png", "png");
        write(root, "hardware/resources/sub/detail.png", "detail");
        write(root, "hardware/unit_product.pdf", "%PDF product");
        write(root, "docs/guide.pdf", "%PDF guide");
        write(root, "docs/photo.jpg", "jpg");

        let index = ResourceIndex::new(root, &["hardware/resources", "hardware", "docs"]);
        let stats = copy_resources(
            root,
            &index,
            &["photo.jpg".to_string(), "missing.png".to_string()],
            out.path(),
        );

        assert_eq!(stats.files, 5);
        let src = out.path();
        assert!(src.join("resources/top.png").is_file());
        assert!(src.join("resources/sub/detail.png").is_file());
        assert!(src.join("hardware/resources/top.png").is_file());
        assert!(src.join("hardware/unit_product.pdf").is_file());
        assert!(src.join("resources/guide.pdf").is_file());
        assert!(!src.join("hardware/guide.pdf").exists());
        assert!(src.join("resources/photo.jpg").is_file());
    }

    #[test]
    fn last_writer_wins() {
        let repo = tempfile::tempdir().expect("can create tempdir");
        let out = tempfile::tempdir().expect("can create tempdir");
        let root = repo.path();
        write(root, "hardware/resources/manual.pdf", "from resources");
        write(root, "hardware/manual.pdf", "from hardware");
        write(root, "docs/manual.pdf", "from docs");

        let index = ResourceIndex::new(root, &["hardware/resources", "hardware", "docs"]);
        let stats = copy_resources(root, &index, &[], out.path());

        assert_eq!(stats.files, 1);
        assert_eq!(
            fs::read_to_string(out.path().join("resources/manual.pdf")).expect("copied"),
            "from docs"
        );
        assert_eq!(
            fs::read_to_string(out.path().join("hardware/manual.pdf")).expect("copied"),
            "from hardware"
        );
    }

    #[test]
    fn empty_repository_copies_nothing() {
        let repo = tempfile::tempdir().expect("can create tempdir");
        let out = tempfile::tempdir().expect("can create tempdir");
        let index = ResourceIndex::new(repo.path(), &["hardware/resources"]);
        assert_eq!(
            copy_resources(repo.path(), &index, &[], out.path()),
            CopyStats::default()
        );
    }
}
