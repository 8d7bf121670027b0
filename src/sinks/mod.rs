use crate::report::ExtractionReport;
use crate::source::Project;
use crate::transform::Transformer;
use anyhow::Result;
use indicatif::ProgressBar;

mod book;
pub use book::*;

mod datasheet;
pub use datasheet::*;

#[derive(Debug)]
pub enum Sink {
    Book(Book),
    Datasheet(Datasheet),
}

pub trait Render {
    fn render(
        &self,
        project: &Project,
        transformer: &Transformer,
        progress: &ProgressBar,
    ) -> Result<ExtractionReport>;
}

impl Render for Sink {
    fn render(
        &self,
        project: &Project,
        transformer: &Transformer,
        progress: &ProgressBar,
    ) -> Result<ExtractionReport> {
        match self {
            Sink::Book(b) => b.render(project, transformer, progress),
            Sink::Datasheet(d) => d.render(project, transformer, progress),
        }
    }
}
