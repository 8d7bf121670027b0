use anyhow::{Context, Result};
use cli::Cli;
use config::Configuration;
use indicatif::{ProgressBar, ProgressStyle};
use report::ExtractionReport;
use sinks::{Render, Sink};
use source::Project;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use transform::Transformer;

mod cli;
mod config;
mod config_wizard;
mod copier;
mod detection;
mod file_ordering;
mod report;
mod sinks;
mod source;
mod transform;

fn main() -> ExitCode {
    match try_main() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}: {e:#}", console::style("Error").red());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn repository_root(arg: Option<&PathBuf>, config: &Configuration) -> Result<PathBuf> {
    if let Some(root) = arg.or(config.project.repository.as_ref()) {
        return Ok(root.clone());
    }
    let cwd = std::env::current_dir().with_context(|| "Failed to get working directory")?;
    Ok(detection::find_repository_root(&cwd))
}

/// Name of the directory the output lands in, so a rerun doesn't scan its own
/// output.
fn output_dir_name(path: &Path) -> Vec<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| vec![name.to_string()])
        .unwrap_or_default()
}

fn progress_bar() -> ProgressBar {
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("can parse progress style")
            .progress_chars("#>-"),
    );
    progress
}

fn print_report(report: &ExtractionReport) {
    println!();
    println!("  Files created:    {}", report.files_created.len());
    println!("  Resources copied: {}", report.resources_copied);
    if !report.files_failed.is_empty() {
        println!(
            "  {}: {}",
            console::style("Failed").red(),
            report.files_failed.join(", ")
        );
    }
}

fn render(sink: Sink, root: &Path, excluded: &[String], config: &Configuration) -> Result<bool> {
    let project = Project::discover(config, root, excluded)?;
    println!(
        "Found {} README file(s) in {}",
        project.documents.len(),
        root.display()
    );
    let transformer = Transformer::new(&config.transform)?;

    let progress = progress_bar();
    let report = sink
        .render(&project, &transformer, &progress)
        .with_context(|| "Failed to render output")?;
    print_report(&report);
    Ok(report.is_success())
}

fn load_config(path: &Path) -> Result<Configuration> {
    println!("Loading configuration...");
    Configuration::load(path)
}

fn try_main() -> Result<bool> {
    use clap::Parser;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        cli::Commands::Config => {
            config_wizard::run(&cli.config)?;
            Ok(true)
        }
        cli::Commands::Book(args) => {
            let mut config = load_config(&cli.config)?;
            let root = repository_root(args.repository.as_ref(), &config)?;
            if let Some(out) = args.out {
                config.book.outdir = out;
            }
            let excluded = output_dir_name(&config.book.outdir);
            let book = config.book.clone();
            println!("Writing mdBook sources to {}", book.src_dir(&root).display());
            render(Sink::Book(book), &root, &excluded, &config)
        }
        cli::Commands::Datasheet(args) => {
            let mut config = load_config(&cli.config)?;
            let root = repository_root(args.repository.as_ref(), &config)?;
            if let Some(out) = args.out {
                config.datasheet.outfile = out;
            }
            let datasheet = config.datasheet.clone();
            println!("Writing datasheet to {}", root.join(&datasheet.outfile).display());
            render(Sink::Datasheet(datasheet), &root, &[], &config)
        }
        cli::Commands::Scan(args) => {
            let config = load_config(&cli.config)?;
            let root = repository_root(args.repository.as_ref(), &config)?;
            let excluded = output_dir_name(&config.book.outdir);
            let project = Project::discover(&config, &root, &excluded)?;

            println!("Repository: {}", root.display());
            println!("Title:      {}", project.title);
            println!();
            println!("Documents:");
            for document in &project.documents {
                println!("  [{}] {}", document.rank, document.path.display());
            }
            println!();
            println!("Sections:");
            for section in project.registry.iter() {
                println!(
                    "  {:<24} {} (rank {})",
                    section.key.as_str(),
                    section.source.display(),
                    section.rank
                );
            }
            if !project.code_samples.is_empty() {
                println!();
                println!("Code samples:");
                for sample in &project.code_samples {
                    println!("  {:<14} {}", sample.platform.to_string(), sample.name);
                }
            }
            Ok(true)
        }
    }
}
