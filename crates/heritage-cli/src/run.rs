//! Load a snapshot, provide lenses for its documents, render the report.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use heritage_core::{InMemoryWorkspace, WorkspaceSnapshot};
use heritage_lens::{AnnotationLensProvider, CodeLens, LensConfig};
use tracing::info;

use crate::args::{CliArgs, OutputFormat};

/// Lenses of one analyzed document.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DocumentReport {
    pub uri: String,
    pub lenses: Vec<CodeLens>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Report {
    pub documents: Vec<DocumentReport>,
}

impl Report {
    pub fn lens_count(&self) -> usize {
        self.documents.iter().map(|document| document.lenses.len()).sum()
    }

    pub fn write(&self, out: &mut impl Write, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self).context("failed to write report")?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                for document in &self.documents {
                    for lens in &document.lenses {
                        let start = lens.range.start;
                        writeln!(
                            out,
                            "{}:{}:{} {}",
                            document.uri,
                            start.line + 1,
                            start.character + 1,
                            lens.title().unwrap_or_default()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}

pub fn load_snapshot(path: &Path) -> Result<WorkspaceSnapshot> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    WorkspaceSnapshot::from_json(&json)
        .with_context(|| format!("invalid workspace snapshot {}", path.display()))
}

/// The configuration file, if any, with the command-line mode applied.
pub fn load_config(args: &CliArgs) -> Result<LensConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            LensConfig::from_json(&json)
                .with_context(|| format!("invalid lens config {}", path.display()))?
        }
        None => LensConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.peek_mode = mode.into();
    }
    Ok(config)
}

pub async fn run(args: &CliArgs) -> Result<Report> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let config = load_config(args)?;
    let workspace = InMemoryWorkspace::from_snapshot(snapshot);

    let documents = if args.documents.is_empty() {
        workspace.document_uris().to_vec()
    } else {
        for uri in &args.documents {
            if !workspace.document_uris().contains(uri) {
                bail!("document {uri} is not in the snapshot");
            }
        }
        args.documents.clone()
    };

    let mut provider = AnnotationLensProvider::new(Arc::new(workspace), config);
    let mut report = Report::default();
    for uri in documents {
        let lenses = provider
            .provide_code_lenses(&uri)
            .await
            .with_context(|| format!("failed to analyze {uri}"))?;
        report.documents.push(DocumentReport { uri, lenses });
    }

    info!(
        documents = report.documents.len(),
        lenses = report.lens_count(),
        "done"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "../tests/run_tests.rs"]
mod run_tests;
