//! Specification, feature and application lists pulled out of bullet points.

use super::tables::strip_markdown;
use crate::source::SectionRegistry;
use regex::Regex;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

const DESCRIPTION_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

impl Feature {
    fn new<S: ToString, D: ToString>(title: S, description: D) -> Feature {
        Feature {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

fn bullets(body: &str) -> impl Iterator<Item = &str> {
    body.lines().filter_map(|line| {
        let line = line.trim();
        line.strip_prefix("- ")
            .or_else(|| line.strip_prefix("* "))
            .map(str::trim)
    })
}

/// Split a bullet of the form `**Title**: text`, `**Title:** text` or
/// `Title: text`.
fn split_bullet(bullet: &str) -> Option<(String, String)> {
    let (title, rest) = match bullet.strip_prefix("**") {
        Some(bold) => {
            let (title, rest) = bold.split_once("**")?;
            (title.trim().trim_end_matches(':').trim(), rest.trim())
        }
        None => {
            let (title, rest) = bullet.split_once(':')?;
            (title.trim(), rest.trim())
        }
    };
    let rest = rest.strip_prefix(':').unwrap_or(rest).trim();
    let title = strip_markdown(title);
    let rest = strip_markdown(rest);
    (!title.is_empty() && !rest.is_empty()).then_some((title, rest))
}

fn canonical_spec_name(key: &str) -> String {
    let lowered = key.to_lowercase();
    let name = if lowered.contains("axes") || lowered.contains("axis") {
        "Measurement Axes"
    } else if lowered.contains("range") {
        "Measurement Range"
    } else if lowered.contains("resolution") {
        "Resolution"
    } else if lowered.contains("power") || lowered.contains("consumption") {
        "Power Consumption"
    } else if lowered.contains("voltage") || lowered.contains("supply") {
        "Operating Voltage"
    } else if lowered.contains("temperature") {
        "Operating Temperature"
    } else {
        return key.to_string();
    };
    name.to_string()
}

/// `name: value` pairs from the features or specifications bullets.
pub fn electrical_specs(registry: &SectionRegistry) -> Vec<(String, String)> {
    let mut specs: Vec<(String, String)> = Vec::new();
    let section = registry.best(&["features", "specifications"]).or_else(|| {
        registry
            .find_by_keywords(&["specification", "electrical"])
            .into_iter()
            .find(|section| section.has_content())
    });
    if let Some(section) = section {
        for (key, value) in bullets(&section.body).filter_map(split_bullet) {
            let name = canonical_spec_name(&key);
            match specs.iter_mut().find(|(existing, _)| *existing == name) {
                Some(entry) => entry.1 = value,
                None => specs.push((name, value)),
            }
        }
    }

    if specs.is_empty() {
        specs = vec![
            ("Operating Voltage".to_string(), "3.3V typical".to_string()),
            ("Power Consumption".to_string(), "Low power design".to_string()),
            ("Operating Temperature".to_string(), "Industrial range".to_string()),
        ];
    }
    specs
}

/// Application bullets longer than five characters from every
/// application-like section.
pub fn applications(registry: &SectionRegistry) -> Vec<String> {
    let found: Vec<String> = registry
        .iter()
        .filter(|section| {
            let key = section.key.as_str();
            key.contains("application") || key.contains("use_case")
        })
        .flat_map(|section| bullets(&section.body).map(strip_markdown).collect::<Vec<_>>())
        .filter(|app| app.chars().count() > 5)
        .collect();

    if !found.is_empty() {
        return found;
    }
    [
        "Environmental monitoring systems",
        "IoT devices and sensors",
        "Weather station applications",
        "Industrial automation",
        "Research and development projects",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Key features, ending with a summary of the main applications when there
/// are any.
pub fn features(registry: &SectionRegistry) -> Vec<Feature> {
    let mut features: Vec<Feature> = registry
        .best(&["features"])
        .map(|section| {
            bullets(&section.body)
                .filter_map(split_bullet)
                .map(|(title, description)| Feature::new(title, description))
                .collect()
        })
        .unwrap_or_default();

    if features.is_empty() {
        features = vec![
            Feature::new(
                "High Accuracy Sensing",
                "Precise environmental parameter measurement",
            ),
            Feature::new(
                "Compact Design",
                "Space-efficient module for embedded applications",
            ),
            Feature::new("Easy Integration", "Standard interfaces and connectors"),
            Feature::new(
                "Industrial Grade",
                "Reliable operation in demanding environments",
            ),
        ];
    }

    let apps: Vec<String> = registry
        .best(&["applications"])
        .map(|section| {
            bullets(&section.body)
                .map(strip_markdown)
                .filter(|app| app.chars().count() > 5)
                .take(5)
                .collect()
        })
        .unwrap_or_default();
    if !apps.is_empty() {
        let mut summary = apps.join(", ");
        if summary.chars().count() > 80 {
            summary = format!("{} and more", apps[..apps.len().min(3)].join(", "));
        }
        features.push(Feature::new("Key Applications", summary));
    }

    features
}

fn clean_paragraph(text: &str) -> String {
    let text = HTML_TAG.replace_all(text, "");
    strip_markdown(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_prose(paragraph: &str) -> bool {
    let first = paragraph.trim_start();
    !(first.starts_with('<') || first.starts_with('!') || first.starts_with('#') || first.starts_with('|'))
}

/// First prose paragraph of the introduction, cut to 200 characters.
pub fn description(registry: &SectionRegistry) -> Option<String> {
    let section = registry.best(&["introduction", "description", "overview"])?;
    let paragraph = section
        .body
        .split("\n\n")
        .filter(|p| is_prose(p))
        .map(clean_paragraph)
        .find(|p| !p.is_empty())?;

    if paragraph.chars().count() <= 20 {
        return None;
    }
    if paragraph.chars().count() > DESCRIPTION_LIMIT {
        let cut: String = paragraph.chars().take(DESCRIPTION_LIMIT).collect();
        Some(format!("{}...", cut.trim_end()))
    } else {
        Some(paragraph)
    }
}

/// Prose paragraphs of the introduction, without images or raw HTML.
pub fn introduction(registry: &SectionRegistry) -> Vec<String> {
    let paragraphs: Vec<String> = registry
        .best(&["introduction", "description", "overview"])
        .map(|section| {
            section
                .body
                .split("\n\n")
                .filter(|p| is_prose(p))
                .map(clean_paragraph)
                .filter(|p| !p.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if paragraphs.is_empty() {
        return vec![
            "Professional electronic module designed for reliable performance and easy integration with modern development platforms."
                .to_string(),
        ];
    }
    paragraphs
}
