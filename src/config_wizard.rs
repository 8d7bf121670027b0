//! Interactive configuration wizard for creating `hwdocs.toml`.
//!
//! The wizard asks for the repository location, the project title and the
//! output locations, pre-filling whatever can be detected from the repository
//! itself. Everything it doesn't ask about keeps its default value.

use crate::config::Configuration;
use crate::detection::{detect_defaults, DetectedDefaults};
use anyhow::{anyhow, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};
use std::path::{Path, PathBuf};

/// Run the interactive configuration wizard and write the result to
/// `config_path`.
pub fn run(config_path: &Path) -> Result<()> {
    let theme = ColorfulTheme {
        ..ColorfulTheme::default()
    };

    // get repo path first so we can detect defaults
    let repo_path = Input::with_theme(&theme)
        .with_prompt("Repository directory")
        .default(".".to_string())
        .interact()
        .with_context(|| "Failed to obtain repository path")?;
    let repo_path = PathBuf::from(repo_path);
    if !repo_path.is_dir() {
        return Err(anyhow!("Path '{}' isn't a directory!", repo_path.display()));
    }

    let DetectedDefaults {
        root,
        title: detected_title,
        license: detected_license,
    } = detect_defaults(&repo_path);
    println!("Repository root: {}", root.display());
    if let Some(license) = detected_license {
        println!("Detected licence: {license}");
    }

    let mut config = Configuration::default();

    let title: String = Input::with_theme(&theme)
        .with_prompt("Module title (used when the root README has no heading)")
        .with_initial_text(detected_title.unwrap_or_default())
        .allow_empty(true)
        .interact()
        .with_context(|| "Failed to obtain title")?;
    config.project.title = Some(title.trim().to_string()).filter(|t| !t.is_empty());

    let repository_url: String = Input::with_theme(&theme)
        .with_prompt("Repository URL (leave blank to skip)")
        .allow_empty(true)
        .interact()?;
    config.project.repository_url =
        Some(repository_url.trim().to_string()).filter(|url| !url.is_empty());

    if repo_path != Path::new(".") {
        config.project.repository = Some(root);
    }

    let outputs = ["mdBook sources and HTML datasheet", "mdBook sources only", "HTML datasheet only"];
    let selection = FuzzySelect::with_theme(&theme)
        .with_prompt("Which outputs will you generate?")
        .items(&outputs)
        .default(0)
        .interact()?;

    if selection != 2 {
        let outdir: String = Input::with_theme(&theme)
            .with_prompt("Book output directory")
            .default(config.book.outdir.display().to_string())
            .interact()?;
        config.book.outdir = PathBuf::from(outdir);
    }
    if selection != 1 {
        let outfile: String = Input::with_theme(&theme)
            .with_prompt("Datasheet output file")
            .default(config.datasheet.outfile.display().to_string())
            .interact()?;
        let mut outfile = PathBuf::from(outfile);
        let ext = outfile
            .extension()
            .map(std::ffi::OsStr::to_ascii_lowercase)
            .unwrap_or_default();
        if ext != *"html" {
            outfile.set_extension("html");
        }
        config.datasheet.outfile = outfile;

        let version: String = Input::with_theme(&theme)
            .with_prompt("Datasheet version")
            .default(config.datasheet.version.clone())
            .interact()?;
        config.datasheet.version = version;
    }

    if Confirm::with_theme(&theme)
        .with_prompt("Do you wish to block some README files from being scanned?")
        .default(false)
        .interact()?
    {
        'block: loop {
            if !config.scan.block_globs.is_empty() {
                println!("Blocked globs: [{}]", config.scan.block_globs.join("], ["));
            }
            let glob: String = Input::with_theme(&theme)
                .with_prompt("Glob syntax of files you want to block (leave empty for done)")
                .allow_empty(true)
                .interact()?;
            if glob.trim().is_empty() {
                break 'block;
            }

            globset::Glob::new(glob.trim()).with_context(|| "Failed to parse glob!")?;
            config.scan.block_globs.push(glob.trim().to_string());
        }
    }

    let contents =
        toml::to_string_pretty(&config).with_context(|| "Failed to convert configuration to TOML")?;

    if config_path.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!(
                "{} already exists, do you want to override it?",
                config_path.display()
            ))
            .interact()?
    {
        println!("Configuration:");
        println!("{}", contents);
    } else {
        config.save(config_path)?;
        println!("{} written!", config_path.display());
    }

    Ok(())
}
