use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where an example program is meant to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Arduino,
    MicroPython,
}

impl Platform {
    /// Directories under the repository root that hold samples for this platform
    fn directories(&self) -> &'static [&'static str] {
        match self {
            Platform::Arduino => &["software/examples/c"],
            Platform::MicroPython => &[
                "software/examples/micropython",
                "software/examples/python",
            ],
        }
    }

    fn extensions(&self) -> &'static [&'static str] {
        match self {
            Platform::Arduino => &["ino", "c", "cpp"],
            Platform::MicroPython => &["py"],
        }
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Arduino => write!(f, "Arduino/C++"),
            Platform::MicroPython => write!(f, "MicroPython"),
        }
    }
}

/// An example program shipped with the hardware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSample {
    pub platform: Platform,
    /// Display name; samples in a subdirectory are named `dir: file`
    pub name: String,
    /// Path relative to the repository root
    pub path: PathBuf,
    pub contents: String,
}

impl CodeSample {
    /// Fence language for the listing
    pub fn language(&self) -> &'static str {
        match self.path.extension().and_then(|e| e.to_str()) {
            Some("py") => "python",
            Some("c") => "c",
            _ => "cpp",
        }
    }

    /// The first `lines` lines, with a marker if anything was cut.
    pub fn preview(&self, lines: usize) -> String {
        let total = self.contents.lines().count();
        let mut preview = self
            .contents
            .lines()
            .take(lines)
            .collect::<Vec<_>>()
            .join("\n");
        if total > lines {
            let comment = match self.platform {
                Platform::MicroPython => "#",
                Platform::Arduino => "//",
            };
            preview.push_str(&format!("\n{comment} ... ({} more lines)", total - lines));
        }
        preview
    }
}

/// Find every code sample for every platform.
pub fn discover(root: &Path) -> Vec<CodeSample> {
    let mut samples = Vec::default();
    for platform in [Platform::Arduino, Platform::MicroPython] {
        for dir in platform.directories() {
            match discover_in(root, dir, platform) {
                Ok(found) => samples.extend(found),
                Err(e) => log::warn!("Skipping examples in {dir}: {e:#}"),
            }
        }
    }
    log::info!("Found {} code sample(s)", samples.len());
    samples
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect::<Vec<_>>();
    entries.sort();
    Ok(entries)
}

/// Files directly in `dir` come first, then files one subdirectory deep.
fn discover_in(root: &Path, dir: &str, platform: Platform) -> Result<Vec<CodeSample>> {
    let base = root.join(dir);
    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let entries = sorted_entries(&base)?;
    let mut files: Vec<(String, PathBuf)> = entries
        .iter()
        .filter(|path| path.is_file() && platform.accepts(path))
        .filter_map(|path| Some((file_name(path)?, path.clone())))
        .collect();

    for sub in entries.iter().filter(|path| path.is_dir()) {
        let Some(sub_name) = file_name(sub) else {
            continue;
        };
        for path in sorted_entries(sub)? {
            if path.is_file() && platform.accepts(&path) {
                if let Some(name) = file_name(&path) {
                    files.push((format!("{sub_name}: {name}"), path));
                }
            }
        }
    }

    let mut samples = Vec::with_capacity(files.len());
    for (name, path) in files {
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("Could not read {}: {e}", path.display());
                continue;
            }
        };
        let path = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or(path);
        samples.push(CodeSample {
            platform,
            name,
            path,
            contents,
        });
    }
    Ok(samples)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(ToString::to_string)
}
