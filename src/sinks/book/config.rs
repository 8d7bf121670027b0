use crate::source::Platform;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What a page is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PageContent {
    /// The `introduction` section, else the root README's preamble
    Introduction,
    /// The first of `keys` that has content
    Sections { keys: Vec<String> },
    /// The first of `keys` that has content, else the whole README at `path`
    Document { path: PathBuf, keys: Vec<String> },
    /// The first of `keys` with content, followed by a preview of every code sample
    ExampleIndex { keys: Vec<String> },
    /// Full listings of every sample for one platform
    CodeSamples { platform: Platform },
    /// The LICENSE file, else the `license` section
    License,
    /// Links to datasheets, schematics and the other pages
    Resources,
}

/// One generated mdBook page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    /// Path relative to the book's `src/` directory
    pub path: PathBuf,
    /// Page heading; the project title when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// SUMMARY.md part the page is listed under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    pub content: PageContent,
    /// Text used when no content is found
    pub fallback: String,
}

impl PageSpec {
    fn new(
        path: &str,
        title: Option<&str>,
        part: Option<&str>,
        content: PageContent,
        fallback: &str,
    ) -> PageSpec {
        PageSpec {
            path: PathBuf::from(path),
            title: title.map(String::from),
            part: part.map(String::from),
            content,
            fallback: fallback.to_string(),
        }
    }

    /// Number of directories between the page and the book's `src/` root.
    pub fn depth(&self) -> usize {
        self.path.components().count().saturating_sub(1)
    }
}

fn keys(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

/// mdBook output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    /// Book directory, relative to the repository root; pages go in `src/`
    pub outdir: PathBuf,
    /// Lines of each code sample shown on the examples index
    pub preview_lines: usize,
    pub pages: Vec<PageSpec>,
}

impl Book {
    /// Where the pages are written for the repository at `root`.
    pub fn src_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.outdir).join("src")
    }
}

impl Default for Book {
    fn default() -> Self {
        use PageContent::*;
        let sections = |k: &[&str]| Sections { keys: keys(k) };
        let document = |path: &str, k: &[&str]| Document {
            path: PathBuf::from(path),
            keys: keys(k),
        };

        Book {
            outdir: PathBuf::from("software/book"),
            preview_lines: 20,
            pages: vec![
                PageSpec::new(
                    "introduction.md",
                    None,
                    None,
                    Introduction,
                    "No introduction available.",
                ),
                PageSpec::new(
                    "hardware/overview.md",
                    Some("Hardware Overview"),
                    Some("Hardware"),
                    document(
                        "hardware/README.md",
                        &["overview", "description", "hardware_overview"],
                    ),
                    "No hardware documentation found.",
                ),
                PageSpec::new(
                    "hardware/pinout.md",
                    Some("Pinout"),
                    Some("Hardware"),
                    sections(&["pinout"]),
                    "No pinout information available.",
                ),
                PageSpec::new(
                    "hardware/dimensions.md",
                    Some("Dimensions"),
                    Some("Hardware"),
                    sections(&["dimensions"]),
                    "No dimension information available.",
                ),
                PageSpec::new(
                    "hardware/specifications.md",
                    Some("Specifications"),
                    Some("Hardware"),
                    sections(&["specifications", "features"]),
                    "No specifications available.",
                ),
                PageSpec::new(
                    "hardware/schematic.md",
                    Some("Schematic"),
                    Some("Hardware"),
                    sections(&["schematic"]),
                    "No schematic information available.",
                ),
                PageSpec::new(
                    "software/getting-started.md",
                    Some("Getting Started"),
                    Some("Software"),
                    document(
                        "software/README.md",
                        &["getting_started", "usage", "installation"],
                    ),
                    "No getting started guide available.",
                ),
                PageSpec::new(
                    "software/examples.md",
                    Some("Examples"),
                    Some("Software"),
                    ExampleIndex {
                        keys: keys(&["examples"]),
                    },
                    "No code examples found in the project.",
                ),
                PageSpec::new(
                    "software/examples/arduino.md",
                    Some("Arduino/C++ Examples"),
                    Some("Software"),
                    CodeSamples {
                        platform: Platform::Arduino,
                    },
                    "No Arduino/C++ examples found in the project.",
                ),
                PageSpec::new(
                    "software/examples/micropython.md",
                    Some("MicroPython Examples"),
                    Some("Software"),
                    CodeSamples {
                        platform: Platform::MicroPython,
                    },
                    "No MicroPython examples found in the project.",
                ),
                PageSpec::new(
                    "license.md",
                    Some("License"),
                    Some("Additional Information"),
                    License,
                    "No license file found in the repository.",
                ),
                PageSpec::new(
                    "resources.md",
                    Some("Hardware Documentation & Resources"),
                    Some("Additional Information"),
                    Resources,
                    "Product datasheet not found in hardware directory.",
                ),
            ],
        }
    }
}
