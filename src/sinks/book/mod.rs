//! mdBook source generation.
//!
//! Builds the fixed set of pages configured in [`Book::pages`] from the merged
//! section registry, plus `SUMMARY.md`, then copies the resources those pages
//! refer to.

mod config;
mod rendering;

pub use config::{Book, PageContent, PageSpec};
