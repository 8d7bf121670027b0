//! Auto-detection of repository layout and project defaults.
//!
//! Probes a hardware repository to find its root, suggest a title, and
//! identify its licence.

use std::path::{Path, PathBuf};

const LICENSE_FILES: [&str; 6] = [
    "LICENSE",
    "LICENSE.md",
    "LICENSE.txt",
    "LICENCE",
    "LICENCE.md",
    "COPYING",
];

/// Detected default values for a project.
#[derive(Debug, Default)]
pub struct DetectedDefaults {
    pub root: PathBuf,
    pub title: Option<String>,
    pub license: Option<String>,
}

/// Detect sensible defaults starting from `start`.
pub fn detect_defaults(start: &Path) -> DetectedDefaults {
    let root = find_repository_root(start);
    DetectedDefaults {
        title: detect_title(&root),
        license: detect_license(&root),
        root,
    }
}

fn looks_like_root(dir: &Path) -> bool {
    dir.join(".git").exists()
        || (dir.join("README.md").is_file()
            && dir.join("hardware").is_dir()
            && dir.join("software").is_dir())
}

/// Walk upward from `start` until a directory looks like a repository root:
/// it holds `.git`, or a `README.md` next to both `hardware/` and `software/`.
/// Falls back to `start` itself.
pub fn find_repository_root(start: &Path) -> PathBuf {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    for dir in start.ancestors() {
        if looks_like_root(dir) {
            log::debug!("repository root: {}", dir.display());
            return dir.to_path_buf();
        }
    }
    start
}

/// Detect title from directory name.
///
/// Transforms the directory name into a readable title by replacing
/// hyphens and underscores with spaces and applying title case.
pub fn detect_title(repo_path: &Path) -> Option<String> {
    let canonical = repo_path.canonicalize().ok()?;
    let dir_name = canonical.file_name()?.to_str()?;

    let title = dir_name
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// The first licence file in the repository root.
pub fn find_license_file(repo_path: &Path) -> Option<PathBuf> {
    LICENSE_FILES
        .iter()
        .map(|name| repo_path.join(name))
        .find(|path| path.is_file())
}

/// SPDX identifier of the repository's licence file, if recognised.
pub fn detect_license(repo_path: &Path) -> Option<String> {
    let path = find_license_file(repo_path)?;
    let contents = std::fs::read_to_string(path).ok()?;
    match_license_text(&contents)
}

/// Match license file contents to SPDX identifiers.
pub fn match_license_text(contents: &str) -> Option<String> {
    let contents_lower = contents.to_lowercase();
    let has = |needle: &str| contents_lower.contains(needle);

    // ordered roughly by popularity
    let spdx = if has("mit license") || has("permission is hereby granted, free of charge") {
        "MIT"
    } else if has("apache license") {
        "Apache-2.0"
    } else if has("gnu lesser general public license") {
        if has("version 2.1") {
            "LGPL-2.1"
        } else {
            "LGPL-3.0"
        }
    } else if has("gnu general public license") {
        if has("version 2") && !has("version 3") {
            "GPL-2.0"
        } else {
            "GPL-3.0"
        }
    } else if has("bsd 3-clause") || has("3-clause bsd") {
        "BSD-3-Clause"
    } else if has("bsd 2-clause") || has("2-clause bsd") || has("simplified bsd") {
        "BSD-2-Clause"
    } else if has("mozilla public license") {
        "MPL-2.0"
    } else if has("cern open hardware licence") || has("cern-ohl") {
        if has("strongly reciprocal") {
            "CERN-OHL-S-2.0"
        } else if has("weakly reciprocal") {
            "CERN-OHL-W-2.0"
        } else {
            "CERN-OHL-P-2.0"
        }
    } else if has("the unlicense") || has("this is free and unencumbered software") {
        "Unlicense"
    } else if has("creative commons") && (has("cc0") || has("public domain")) {
        "CC0-1.0"
    } else if has("creative commons attribution-sharealike") {
        "CC-BY-SA-4.0"
    } else if has("isc license") {
        "ISC"
    } else {
        return None;
    };

    Some(spdx.to_string())
}
