use crate::config::DEFAULT_CONFIG_FILE;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BookArgs {
    /// Repository root; detected from the working directory when omitted
    #[clap(short, long)]
    pub repository: Option<PathBuf>,
    /// Output directory for the mdBook sources (overrides the configuration)
    #[clap(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DatasheetArgs {
    /// Repository root; detected from the working directory when omitted
    #[clap(short, long)]
    pub repository: Option<PathBuf>,
    /// Output HTML file (overrides the configuration)
    #[clap(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Repository root; detected from the working directory when omitted
    #[clap(short, long)]
    pub repository: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates an hwdocs.toml config file
    Config,
    /// Extracts README content into mdBook source pages
    Book(BookArgs),
    /// Renders a standalone HTML datasheet
    Datasheet(DatasheetArgs),
    /// Lists the READMEs found and the sections merged from them
    Scan(ScanArgs),
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Configuration file; defaults are used when it doesn't exist
    #[clap(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Increase logging verbosity (-v info, -vv debug)
    #[clap(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_parse_book_command() {
        let cli = Cli::parse_from(["hwdocs", "-vv", "book", "--out", "docs/book"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, PathBuf::from("hwdocs.toml"));
        match cli.command {
            Commands::Book(args) => {
                assert_eq!(args.out, Some(PathBuf::from("docs/book")));
                assert_eq!(args.repository, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["hwdocs", "scan", "--config", "other.toml", "-r", "board"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(cli.command, Commands::Scan(ScanArgs { repository: Some(_) })));
    }
}
