//! Standalone HTML datasheet generation.
//!
//! Pulls metadata, specifications, pipe tables and product images out of the
//! merged section registry and fills them into a single self-contained HTML
//! page with embedded screen and print styles.

mod config;
mod rendering;

pub use config::Datasheet;
