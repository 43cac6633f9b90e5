//! Command-line driver: reads a workspace snapshot and prints the
//! override/implement lenses of its documents.

pub mod args;
pub mod run;
pub mod tracing_config;

pub use args::CliArgs;
pub use run::{Report, run};
