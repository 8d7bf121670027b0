use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTML datasheet output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Datasheet {
    /// Output HTML file, relative to the repository root
    pub outfile: PathBuf,
    pub subtitle: String,
    pub version: String,
    /// Used when the introduction has no usable first paragraph
    pub description: String,
    /// Product code shown in the header; detected from the title when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    /// Embed images as `data:` URIs instead of linking to them
    pub embed_images: bool,
}

impl Default for Datasheet {
    fn default() -> Self {
        Datasheet {
            outfile: PathBuf::from("software/documentation/build/datasheet.html"),
            subtitle: "Professional electronic component".to_string(),
            version: "1.0".to_string(),
            description: "Advanced electronic module for various applications".to_string(),
            product_code: None,
            embed_images: true,
        }
    }
}
