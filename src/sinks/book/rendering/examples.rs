//! Code sample pages.

use crate::sinks::book::{Book, PageContent};
use crate::source::{CodeSample, Platform, Project};
use crate::transform::{depth_prefix, Transformer};

const PLATFORMS: [Platform; 2] = [Platform::Arduino, Platform::MicroPython];

fn path_label(sample: &CodeSample) -> String {
    sample.path.to_string_lossy().replace('\\', "/")
}

fn listing_page(book: &Book, platform: Platform) -> Option<String> {
    book.pages
        .iter()
        .find(|page| page.content == PageContent::CodeSamples { platform })
        .map(|page| page.path.to_string_lossy().replace('\\', "/"))
}

/// The examples section (if any) followed by a short preview of every sample.
pub fn index(
    book: &Book,
    keys: &[String],
    project: &Project,
    transformer: &Transformer,
    depth: usize,
) -> Option<String> {
    let mut out = String::new();
    if let Some(section) = project.registry.best(keys) {
        out.push_str(&transformer.transform(&section.body, depth));
        out.push_str("\n\n");
    }

    for platform in PLATFORMS {
        let samples: Vec<&CodeSample> = project.samples_for(platform).collect();
        if samples.is_empty() {
            continue;
        }

        out.push_str(&format!("## {platform} Examples\n\n"));
        if let Some(page) = listing_page(book, platform) {
            out.push_str(&format!(
                "Full listings: [{platform} Examples]({}{page})\n\n",
                depth_prefix(depth)
            ));
        }

        for sample in samples {
            out.push_str(&format!(
                "### {}\n\n```{}\n{}\n```\n\n",
                sample.name,
                sample.language(),
                sample.preview(book.preview_lines)
            ));
            match &project.repository_url {
                Some(url) => out.push_str(&format!(
                    "[See complete code]({}/blob/main/{})\n\n",
                    url.trim_end_matches('/'),
                    path_label(sample)
                )),
                None => out.push_str(&format!("Source: `{}`\n\n", path_label(sample))),
            }
        }
    }

    let out = out.trim_end().to_string();
    (!out.is_empty()).then_some(out)
}

/// Full listing of every sample for `platform`.
pub fn listings(project: &Project, platform: Platform) -> Option<String> {
    let mut out = String::new();
    for sample in project.samples_for(platform) {
        out.push_str(&format!(
            "## {}\n\n**Location**: `{}`\n\n```{}\n{}\n```\n\n",
            sample.name,
            path_label(sample),
            sample.language(),
            sample.contents.trim_end()
        ));
    }

    let out = out.trim_end().to_string();
    (!out.is_empty()).then_some(out)
}
