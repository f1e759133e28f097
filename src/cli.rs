use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "statext",
    version,
    about = "Statute PDF section extraction tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract section bodies into a JSON mapping keyed by section title.
    Extract(ExtractArgs),
    /// Parse the table of contents and print the outline as JSON.
    Toc(TocArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    pub pdf_path: PathBuf,

    pub output_path: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct TocArgs {
    pub pdf_path: PathBuf,
}
