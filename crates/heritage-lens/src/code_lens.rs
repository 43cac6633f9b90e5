//! Annotation code lenses.
//!
//! A lens sits on the range of the member that overrides or implements an
//! ancestor member. Its command receives, in order, the document uri, the
//! member's start position, the ancestor member's location and the peek
//! mode, the argument shape of `editor.action.peekLocations`.

use std::sync::Arc;

use heritage_common::Range;
use heritage_core::{AnalysisPass, ClassificationRecord, LanguageServices, ServiceError};
use serde_json::json;
use tracing::debug;

use crate::config::LensConfig;

/// A code lens represents a command that can be shown inline with source code.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CodeLens {
    /// The range at which this code lens is displayed.
    pub range: Range,
    /// The command this code lens represents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<CodeLensCommand>,
}

/// A command that can be executed when a code lens is clicked.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CodeLensCommand {
    /// The title of the command (displayed to the user).
    pub title: String,
    /// The identifier of the command to execute.
    pub command: String,
    /// Arguments to pass to the command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<serde_json::Value>>,
}

impl CodeLens {
    /// Create a resolved code lens with a command.
    pub fn resolved(range: Range, command: CodeLensCommand) -> Self {
        Self {
            range,
            command: Some(command),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.command.as_ref().map(|command| command.title.as_str())
    }
}

/// The lens for one classification record.
pub fn annotation_lens(record: &ClassificationRecord, config: &LensConfig) -> CodeLens {
    let member = &record.querying_member;
    let command = CodeLensCommand {
        title: format!("@{} {}", record.kind, record.ancestor_type.name),
        command: config.command.clone(),
        arguments: Some(vec![
            json!(member.uri),
            json!(member.range.start),
            json!([record.ancestor_member.location()]),
            json!(config.peek_mode.as_str()),
        ]),
    };
    CodeLens::resolved(member.range, command)
}

/// Provider for annotation lenses.
///
/// Each request runs one analysis pass over the document; nodes are not
/// reused across requests.
pub struct AnnotationLensProvider {
    pass: AnalysisPass,
    config: LensConfig,
}

impl AnnotationLensProvider {
    pub fn new(services: Arc<dyn LanguageServices>, config: LensConfig) -> Self {
        Self {
            pass: AnalysisPass::new(services),
            config,
        }
    }

    pub fn config(&self) -> &LensConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut LensConfig {
        &mut self.config
    }

    /// Lenses for every override and implementation in `uri`, in the order
    /// the document's declarations are listed.
    pub async fn provide_code_lenses(&mut self, uri: &str) -> Result<Vec<CodeLens>, ServiceError> {
        let language_id = self.pass.services().language_id(uri);
        if !self.config.supports_language(language_id.as_deref()) {
            debug!(uri, language = ?language_id, "language not enabled");
            return Ok(Vec::new());
        }

        let analysis = self.pass.analyze_document(uri).await?;
        let lenses: Vec<CodeLens> = analysis
            .records()
            .map(|record| annotation_lens(record, &self.config))
            .collect();
        debug!(uri, lenses = lenses.len(), "provide_code_lenses");
        Ok(lenses)
    }
}

#[cfg(test)]
#[path = "../tests/code_lens_tests.rs"]
mod code_lens_tests;
