//! Markdown clean-up and rewriting applied to every section before it lands on
//! a page.
//!
//! The steps run in a fixed order: cleaning, path rewriting, image sizing.
//! Running the whole transformation twice gives the same text as running it
//! once.

use crate::config::TransformConfig;
use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static FRONTMATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n.*?\r?\n---[ \t]*(?:\r?\n|\z)").unwrap()
});
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").unwrap());

static HARDWARE_RESOURCES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(src="|href="|\]\()(?:\.\./)*(?:\./)?hardware/resources/"#).unwrap()
});
static RESOURCE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(src|href)="(?:\./)?resources/([^"]*)""#).unwrap());
static RESOURCE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\((?:\./)?resources/([^)\s]*)").unwrap());
static LOCAL_PDF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(href="|\]\()\./([^"\)/]+\.pdf)"#).unwrap());

static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[([^\]]*)\]\(([^)\s]+)(?:\s+"[^"]*")?\)"#).unwrap()
});
static IMG_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").unwrap());
static STYLE_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\sstyle\s*=").unwrap());
static SIZE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+(?:width|height)\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).unwrap()
});

/// Relative prefix from a page at `depth` directories below the book root
/// back to the root.
pub fn depth_prefix(depth: usize) -> String {
    "../".repeat(depth)
}

#[derive(Debug, Clone)]
pub struct Transformer {
    phrases: Vec<Regex>,
    markdown_image_max_width: String,
    html_image_max_width: String,
}

impl Transformer {
    pub fn new(config: &TransformConfig) -> Result<Transformer> {
        let phrases = config
            .template_phrases
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("Invalid template phrase pattern: {pattern}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Transformer {
            phrases,
            markdown_image_max_width: config.markdown_image_max_width.clone(),
            html_image_max_width: config.html_image_max_width.clone(),
        })
    }

    /// Full transformation for a page `depth` directories below the book root.
    pub fn transform(&self, text: &str, depth: usize) -> String {
        let cleaned = self.clean(text);
        let rewritten = rewrite_paths(&cleaned, depth);
        self.size_images(&rewritten)
    }

    /// Remove comments, frontmatter and template boilerplate. Repeats until
    /// nothing changes, so removing one thing can't expose another.
    pub fn clean(&self, text: &str) -> String {
        let mut current = text.to_string();
        loop {
            let next = self.clean_once(&current);
            if next == current {
                return next;
            }
            current = next;
        }
    }

    fn clean_once(&self, text: &str) -> String {
        let text = COMMENT.replace_all(text, "");
        let text = FRONTMATTER.replace(text.trim_start(), "").into_owned();

        let mut text = text;
        for phrase in &self.phrases {
            if let Cow::Owned(replaced) = phrase.replace_all(&text, "$keep") {
                text = replaced;
            }
        }

        BLANK_RUN.replace_all(&text, "\n\n").trim().to_string()
    }

    /// Wrap markdown images in a centred, width-limited `<img>` and limit the
    /// width of bare `<img>` tags that don't carry their own style.
    pub fn size_images(&self, text: &str) -> String {
        let markdown_width = &self.markdown_image_max_width;
        let text = MARKDOWN_IMAGE.replace_all(text, |caps: &Captures| {
            let alt = html_escape::encode_double_quoted_attribute(&caps[1]);
            format!(
                r#"<div align="center"><img src="{}" alt="{alt}" style="max-width: {markdown_width}; height: auto;"></div>"#,
                &caps[2]
            )
        });

        let html_width = &self.html_image_max_width;
        IMG_TAG
            .replace_all(&text, |caps: &Captures| {
                let tag = &caps[0];
                if STYLE_ATTR.is_match(tag) {
                    return tag.to_string();
                }

                let stripped = SIZE_ATTR.replace_all(tag, "");
                let (body, close) = match stripped.strip_suffix("/>") {
                    Some(body) => (body.trim_end(), " />"),
                    None => (
                        stripped.strip_suffix('>').unwrap_or(&stripped).trim_end(),
                        ">",
                    ),
                };
                format!(r#"{body} style="max-width: {html_width}; height: auto;"{close}"#)
            })
            .into_owned()
    }
}

/// Point resource references at the book's `resources/` directory, relative
/// to a page `depth` directories deep.
pub fn rewrite_paths(text: &str, depth: usize) -> String {
    let prefix = depth_prefix(depth);

    let text = HARDWARE_RESOURCES.replace_all(text, "${1}resources/");
    let text = RESOURCE_ATTR.replace_all(&text, |caps: &Captures| {
        format!(
            r#"{}="{prefix}resources/{}""#,
            &caps[1],
            caps[2].replace(' ', "%20")
        )
    });
    let text = RESOURCE_LINK.replace_all(&text, |caps: &Captures| {
        format!("]({prefix}resources/{}", caps[1].replace(' ', "%20"))
    });
    LOCAL_PDF
        .replace_all(&text, |caps: &Captures| {
            format!(
                "{}{prefix}resources/{}",
                &caps[1],
                caps[2].replace(' ', "%20")
            )
        })
        .into_owned()
}
