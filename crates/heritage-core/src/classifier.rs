//! Override/implement classification.
//!
//! Walks a resolved hierarchy from its root and pairs every member of the
//! root with same-named members of its ancestors. Matching is by name only;
//! overloads are not told apart.

use crate::declaration::{MemberRef, SymbolKey};
use crate::hierarchy::HierarchyNode;

/// How a member relates to the same-named member of an ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Classification {
    Override,
    Implement,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Override => "Override",
            Self::Implement => "Implement",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One member pairing between the queried declaration and an ancestor.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRecord {
    /// Member of the queried (root) declaration.
    pub querying_member: MemberRef,
    /// The ancestor declaring `ancestor_member`.
    pub ancestor_type: SymbolKey,
    pub ancestor_member: MemberRef,
    pub kind: Classification,
}

/// Classify every member of `root` against its ancestors.
///
/// Records come out depth first, super classes before super interfaces,
/// ancestor members in declaration order.
pub fn classify(root: &HierarchyNode) -> Vec<ClassificationRecord> {
    let mut records = Vec::new();
    walk(root, None, &mut records);
    tracing::trace!(root = %root.name(), records = records.len(), "classify");
    records
}

fn walk<'a>(
    node: &'a HierarchyNode,
    source: Option<&'a HierarchyNode>,
    records: &mut Vec<ClassificationRecord>,
) {
    if let Some(source) = source {
        for member in node.members() {
            let Some(source_member) = source.declaration.member(&member.name) else {
                continue;
            };
            records.push(ClassificationRecord {
                querying_member: source_member.clone(),
                ancestor_type: node.key(),
                ancestor_member: member.clone(),
                kind: classification(source, node, member),
            });
        }
    }

    let source = source.unwrap_or(node);
    for ancestor in node.supertypes() {
        walk(ancestor, Some(source), records);
    }
}

fn classification(
    source: &HierarchyNode,
    ancestor: &HierarchyNode,
    ancestor_member: &MemberRef,
) -> Classification {
    // An interface root re-declaring an inherited member always overrides,
    // even when the ancestor is itself an interface.
    if source.is_interface() {
        Classification::Override
    } else if ancestor.is_interface() || ancestor_member.has_modifier("abstract") {
        Classification::Implement
    } else {
        Classification::Override
    }
}

#[cfg(test)]
#[path = "../tests/classifier_tests.rs"]
mod classifier_tests;
