//! Product image discovery and embedding.
//!
//! Images are identified by file name. Names referenced from `<img>` tags in
//! the READMEs are taken first; anything still missing is filled in from the
//! files in `hardware/resources`.

use crate::source::ResourceIndex;
use base64::Engine;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

static HTML_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<img\s+[^>]*src=["']([^"']+)["'][^>]*>"#).unwrap());

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "svg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImageRole {
    Topology,
    Top,
    Bottom,
    Pinout,
    Dimensions,
    Schematic,
}

impl ImageRole {
    pub fn caption(&self) -> &'static str {
        match self {
            ImageRole::Topology => "System Topology",
            ImageRole::Top => "Top View",
            ImageRole::Bottom => "Bottom View",
            ImageRole::Pinout => "Pinout Diagram",
            ImageRole::Dimensions => "Mechanical Dimensions",
            ImageRole::Schematic => "Schematic",
        }
    }
}

fn contains_any(name: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| name.contains(p))
}

/// Role of an image referenced from a README.
fn classify_referenced(name: &str) -> Option<ImageRole> {
    let name = name.to_lowercase();
    if contains_any(&name, &["sch", "schematic", "circuit"]) {
        Some(ImageRole::Schematic)
    } else if contains_any(&name, &["pinout", "pin_out", "pins"]) {
        Some(ImageRole::Pinout)
    } else if name.contains("dimension") {
        Some(ImageRole::Dimensions)
    } else if contains_any(&name, &["topology", "block"]) {
        Some(ImageRole::Topology)
    } else if contains_any(&name, &["_top", "top_view"]) {
        Some(ImageRole::Top)
    } else if contains_any(&name, &["_btm", "_bottom"]) {
        Some(ImageRole::Bottom)
    } else {
        None
    }
}

/// Role of an image file found in the resources directory.
fn classify_file(name: &str) -> Option<ImageRole> {
    let name = name.to_lowercase();
    if contains_any(&name, &["topology", "block_diagram", "system"]) {
        Some(ImageRole::Topology)
    } else if contains_any(&name, &["_top", "top_view", "topview"]) {
        Some(ImageRole::Top)
    } else if contains_any(&name, &["_btm", "_bottom", "bottom_view", "bottomview"]) {
        Some(ImageRole::Bottom)
    } else if contains_any(&name, &["pinout", "pin_out", "pins", "pinmap"]) {
        Some(ImageRole::Pinout)
    } else if contains_any(&name, &["dimension", "size", "mechanical"]) {
        Some(ImageRole::Dimensions)
    } else if contains_any(&name, &["sch", "schematic", "circuit"]) {
        Some(ImageRole::Schematic)
    } else {
        None
    }
}

fn is_png(name: &str) -> bool {
    name.to_lowercase().ends_with(".png")
}

fn is_english(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("_en") || name.contains("-en")
}

fn is_spanish(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("_es") || name.contains("-es")
}

/// Whether `candidate` is a better pinout image than `current`: PNG beats
/// other formats, then English beats Spanish.
fn prefer_pinout(candidate: &str, current: &str) -> bool {
    if is_png(candidate) != is_png(current) {
        return is_png(candidate);
    }
    is_english(candidate) && is_spanish(current)
}

fn base_name(src: &str) -> Option<&str> {
    let src = src.split(['?', '#']).next()?;
    let name = src.rsplit('/').next()?;
    (!name.is_empty()).then_some(name)
}

/// File names of product images, keyed by what they show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    images: BTreeMap<ImageRole, String>,
}

impl ImageSet {
    /// Classify `<img>` references in `readme` first, then fill the gaps from
    /// the image files in `resources_dir`.
    pub fn discover(readme: &str, resources_dir: &Path) -> ImageSet {
        let mut images = BTreeMap::new();
        for captures in HTML_IMAGE.captures_iter(readme) {
            let Some(name) = base_name(&captures[1]) else {
                continue;
            };
            if let Some(role) = classify_referenced(name) {
                images.insert(role, name.replace("%20", " "));
            }
        }
        let referenced: Vec<ImageRole> = images.keys().copied().collect();

        let mut files: Vec<String> = std::fs::read_dir(resources_dir)
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.path().is_file())
                    .filter_map(|entry| entry.file_name().to_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();
        files.sort();

        for file in files {
            let is_image = Path::new(&file)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false);
            if !is_image {
                continue;
            }
            let Some(role) = classify_file(&file) else {
                continue;
            };
            if referenced.contains(&role) {
                continue;
            }
            match images.get(&role) {
                None => {
                    images.insert(role, file);
                }
                Some(current) if role == ImageRole::Pinout && prefer_pinout(&file, current) => {
                    images.insert(role, file);
                }
                Some(_) => {}
            }
        }

        log::debug!("datasheet images: {images:?}");
        ImageSet { images }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ImageRole, &str)> {
        self.images.iter().map(|(role, name)| (*role, name.as_str()))
    }
}

fn mime_from_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// A `data:` URI holding the file's bytes.
pub fn data_uri(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(format!(
        "data:{};base64,{}",
        mime_from_path(path),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    ))
}

/// What to put in an `<img src>`: the embedded file when it can be found and
/// read, otherwise the bare file name.
pub fn image_source(name: &str, index: &ResourceIndex, embed: bool) -> String {
    if !embed {
        return name.to_string();
    }
    match index.resolve(name).map(|path| (data_uri(&path), path)) {
        Some((Ok(uri), _)) => uri,
        Some((Err(e), path)) => {
            log::warn!("Could not embed {}: {e}", path.display());
            name.to_string()
        }
        None => {
            log::warn!("Image {name} not found in any resource directory");
            name.to_string()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn can_classify_file_names() {
        assert_eq!(classify_file("unit_topology.png"), Some(ImageRole::Topology));
        assert_eq!(classify_file("unit_top.png"), Some(ImageRole::Top));
        assert_eq!(classify_file("unit_btm.jpg"), Some(ImageRole::Bottom));
        assert_eq!(classify_file("unit_pinout_v1_en.png"), Some(ImageRole::Pinout));
        assert_eq!(classify_file("unit_dimension.png"), Some(ImageRole::Dimensions));
        assert_eq!(classify_file("unit_sch.png"), Some(ImageRole::Schematic));
        assert_eq!(classify_file("logo.png"), None);
        assert_eq!(classify_referenced("unit_sch_v1.png"), Some(ImageRole::Schematic));
    }

    #[test]
    fn pinout_prefers_png_then_english() {
        assert!(prefer_pinout("pinout.png", "pinout.jpg"));
        assert!(!prefer_pinout("pinout.jpg", "pinout.png"));
        assert!(prefer_pinout("pinout_en.png", "pinout_es.png"));
        assert!(!prefer_pinout("pinout_es.png", "pinout_en.png"));
    }

    #[test]
    fn can_discover_images() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        let resources = dir.path();
        for name in [
            "unit_pinout_es.png",
            "unit_pinout_en.png",
            "unit_pinout.jpg",
            "unit_top.png",
            "unit_btm.png",
            "notes.txt",
        ] {
            fs::write(resources.join(name), "x").expect("can write");
        }

        let readme = r#"<img src="./resources/board_top_view.jpg?raw=true" width="300">"#;
        let images = ImageSet::discover(readme, resources);
        assert_eq!(
            images.iter().collect::<Vec<_>>(),
            vec![
                (ImageRole::Top, "board_top_view.jpg"),
                (ImageRole::Bottom, "unit_btm.png"),
                (ImageRole::Pinout, "unit_pinout_en.png"),
            ]
        );
    }

    #[test]
    fn can_embed_images() {
        let dir = tempfile::tempdir().expect("can create tempdir");
        fs::create_dir_all(dir.path().join("hardware/resources")).expect("can create dirs");
        fs::write(dir.path().join("hardware/resources/top.png"), b"png").expect("can write");
        let index = ResourceIndex::new(dir.path(), &["hardware/resources"]);

        assert_eq!(image_source("top.png", &index, true), "data:image/png;base64,cG5n");
        assert_eq!(image_source("top.png", &index, false), "top.png");
        assert_eq!(image_source("missing.png", &index, true), "missing.png");
    }
}
