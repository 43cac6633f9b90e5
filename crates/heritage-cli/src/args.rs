use clap::{Parser, ValueEnum};
use heritage_lens::PeekMode;
use std::path::PathBuf;

/// CLI arguments for the heritage binary.
#[derive(Parser, Debug)]
#[command(
    name = "heritage",
    version,
    about = "Annotate overriding and implementing members of TypeScript classes and interfaces"
)]
pub struct CliArgs {
    /// Workspace snapshot (JSON): documents with their symbols, plus
    /// definition links.
    pub snapshot: PathBuf,

    /// Analyze only this document uri. May be repeated; defaults to every
    /// document in the snapshot.
    #[arg(short = 'd', long = "document")]
    pub documents: Vec<String>,

    /// Lens configuration file (JSON).
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Peek mode passed to the lens command, overriding the configuration.
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Mode {
    Peek,
    #[value(name = "gotoAndPeek", alias = "goto-and-peek")]
    GotoAndPeek,
    Goto,
}

impl From<Mode> for PeekMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Peek => Self::Peek,
            Mode::GotoAndPeek => Self::GotoAndPeek,
            Mode::Goto => Self::Goto,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// One `uri:line:column title` line per lens.
    Text,
    /// The lenses of every document as JSON.
    Json,
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;
