use crate::sinks::book::Book;
use crate::source::Project;
use crate::transform::depth_prefix;
use std::path::Path;

fn resource_link(path: &Path, prefix: &str) -> Option<(String, String)> {
    let name = path.file_name()?.to_string_lossy().to_string();
    let link = format!("{prefix}resources/{}", name.replace(' ', "%20"));
    Some((name, link))
}

/// Link to a page if the book has it.
fn page_link(book: &Book, path: &str, prefix: &str) -> Option<String> {
    book.pages
        .iter()
        .any(|page| page.path == Path::new(path))
        .then(|| format!("{prefix}{path}"))
}

/// Body of the resources page. `missing_datasheet` is shown in place of the
/// product datasheet link when there is no product PDF.
pub fn render(book: &Book, project: &Project, missing_datasheet: &str, depth: usize) -> String {
    let prefix = depth_prefix(depth);
    let product = project
        .product_pdf
        .as_deref()
        .and_then(|p| resource_link(p, &prefix));
    let schematic = project
        .schematic_pdf
        .as_deref()
        .and_then(|p| resource_link(p, &prefix));
    let pinout = page_link(book, "hardware/pinout.md", &prefix);
    let getting_started = page_link(book, "software/getting-started.md", &prefix);
    let examples = page_link(book, "software/examples.md", &prefix);

    let mut out = String::from(
        "## Product Datasheet\n\nOfficial product documentation with complete technical specifications.\n\n",
    );
    match &product {
        Some((name, link)) => out.push_str(&format!(
            "**[Download Product Datasheet]({link})** - {name}\n\n"
        )),
        None => out.push_str(&format!("{missing_datasheet}\n\n")),
    }

    out.push_str("## Hardware Resources\n\n");
    match &schematic {
        Some((_, link)) => out.push_str(&format!(
            "- [Schematic Diagram]({link}) - Complete circuit schematic\n"
        )),
        None => out.push_str("- Schematic Diagram - Not found\n"),
    }
    if let Some(link) = &pinout {
        out.push_str(&format!(
            "- [Pinout Reference]({link}) - Pin configuration details\n"
        ));
    }

    let mut software = String::new();
    if let Some(link) = &getting_started {
        software.push_str(&format!(
            "- [Getting Started Guide]({link}) - Setup and first steps\n"
        ));
    }
    if let Some(link) = &examples {
        software.push_str(&format!("- [Code Examples]({link}) - Sketches and scripts\n"));
    }
    if !software.is_empty() {
        out.push_str("\n## Software Resources\n\n");
        out.push_str(&software);
    }

    if let Some(url) = &project.repository_url {
        out.push_str(&format!(
            "\n## External Links\n\n- [Source Code Repository]({url}) - Complete project files\n"
        ));
    }

    out.push_str("\n## Quick Reference\n\n| Resource | Description | Link |\n|----------|-------------|------|\n");
    if let Some((_, link)) = &product {
        out.push_str(&format!(
            "| **Product Datasheet** | Official technical documentation | [PDF]({link}) |\n"
        ));
    }
    match &schematic {
        Some((_, link)) => out.push_str(&format!(
            "| **Schematic** | Circuit diagram | [PDF]({link}) |\n"
        )),
        None => out.push_str("| **Schematic** | Circuit diagram | Not found |\n"),
    }
    for (label, description, link) in [
        ("Pinout", "Pin configuration", &pinout),
        ("Examples", "Code samples", &examples),
        ("Setup Guide", "Getting started", &getting_started),
    ] {
        if let Some(link) = link {
            out.push_str(&format!(
                "| **{label}** | {description} | [View]({link}) |\n"
            ));
        }
    }

    out
}
