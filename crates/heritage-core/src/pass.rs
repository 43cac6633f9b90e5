//! Analysis pass over one document.
//!
//! A pass lists the document's class and interface declarations, starts a
//! fresh resolution cache, then resolves and classifies each declaration in
//! turn. Every root is fault isolated: a failure while resolving one
//! declaration is recorded for that root and the pass moves on.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::classifier::{ClassificationRecord, classify};
use crate::declaration::{DeclarationRef, SymbolKey};
use crate::error::{ResolveError, ServiceError};
use crate::hierarchy::HierarchyBuilder;
use crate::services::LanguageServices;

/// Outcome for one root declaration of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootAnalysis {
    pub root: SymbolKey,
    pub outcome: Result<Vec<ClassificationRecord>, ResolveError>,
}

/// Everything one pass produced for a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentAnalysis {
    pub uri: String,
    pub roots: Vec<RootAnalysis>,
}

impl DocumentAnalysis {
    /// Records of every root that resolved, in root order.
    pub fn records(&self) -> impl Iterator<Item = &ClassificationRecord> {
        self.roots
            .iter()
            .filter_map(|root| root.outcome.as_ref().ok())
            .flatten()
    }

    /// Roots whose resolution failed.
    pub fn failures(&self) -> impl Iterator<Item = (&SymbolKey, &ResolveError)> {
        self.roots
            .iter()
            .filter_map(|root| root.outcome.as_ref().err().map(|err| (&root.root, err)))
    }
}

/// Runs analysis passes against one set of language services.
pub struct AnalysisPass {
    builder: HierarchyBuilder,
}

impl AnalysisPass {
    pub fn new(services: Arc<dyn LanguageServices>) -> Self {
        Self {
            builder: HierarchyBuilder::new(services),
        }
    }

    pub fn builder(&self) -> &HierarchyBuilder {
        &self.builder
    }

    pub fn services(&self) -> &Arc<dyn LanguageServices> {
        self.builder.services()
    }

    /// Analyze every class and interface declared in `uri`.
    ///
    /// Only a failure to list the document's declarations fails the pass.
    pub async fn analyze_document(&mut self, uri: &str) -> Result<DocumentAnalysis, ServiceError> {
        let declarations = self.services().list_type_declarations(uri).await?;
        let roots = declarations
            .into_iter()
            .filter(|declaration| declaration.kind.is_class_or_interface())
            .collect();
        Ok(self.analyze_declarations(uri, roots).await)
    }

    /// Analyze the given root declarations in one pass.
    ///
    /// Declarations that are neither classes nor interfaces fail with
    /// `InvalidDeclarationKind` for their own root only.
    pub async fn analyze_declarations(
        &mut self,
        uri: &str,
        roots: Vec<DeclarationRef>,
    ) -> DocumentAnalysis {
        self.builder.begin_pass();
        debug!(uri, roots = roots.len(), "analysis pass");

        let mut analyses = Vec::with_capacity(roots.len());
        for declaration in roots {
            let root = declaration.key();
            let outcome = match self.builder.resolve(declaration).await {
                Ok(node) => Ok(classify(&node)),
                Err(err) => {
                    warn!(root = %root, error = %err, "skipping declaration");
                    Err(err)
                }
            };
            analyses.push(RootAnalysis { root, outcome });
        }

        DocumentAnalysis {
            uri: uri.to_string(),
            roots: analyses,
        }
    }
}

#[cfg(test)]
#[path = "../tests/pass_tests.rs"]
mod pass_tests;
