//! Declarations as the hierarchy resolver sees them.
//!
//! A language server reports the same declaration in two shapes: a flat
//! symbol with a location, and a document-symbol node with children. Both
//! collapse into [`DeclarationRef`], which carries the union of the fields
//! the resolver needs.

use heritage_common::{DocumentSymbol, LineMap, Location, Range, SymbolKind};

use crate::error::ResolveError;

/// Identity of a declaration within one analysis pass.
///
/// Two declarations are the same entity iff name, kind, document and exact
/// range coincide. Re-fetching a declaration from the symbol service yields
/// an identical key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SymbolKey {
    pub name: String,
    pub kind: SymbolKind,
    pub uri: String,
    pub range: Range,
}

impl std::fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({}:{}:{})",
            self.kind,
            self.name,
            self.uri,
            self.range.start.line + 1,
            self.range.start.character + 1
        )
    }
}

/// The two declaration kinds a hierarchy is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DeclarationKind {
    Class,
    Interface,
}

impl TryFrom<SymbolKind> for DeclarationKind {
    type Error = SymbolKind;

    fn try_from(kind: SymbolKind) -> Result<Self, Self::Error> {
        match kind {
            SymbolKind::Class => Ok(Self::Class),
            SymbolKind::Interface => Ok(Self::Interface),
            other => Err(other),
        }
    }
}

/// A member (method, property, constructor, ...) of a class or interface.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemberRef {
    pub name: String,
    pub kind: SymbolKind,
    pub uri: String,
    pub range: Range,
    /// Raw source text covered by `range`, modifiers included.
    pub text: String,
}

impl MemberRef {
    pub fn location(&self) -> Location {
        Location::new(self.uri.clone(), self.range)
    }

    /// Whether the member's source carries `modifier` as a token,
    /// e.g. `abstract`.
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.text.match_indices(modifier).any(|(idx, _)| {
            let standalone = self.text[..idx]
                .chars()
                .next_back()
                .is_none_or(|ch| !(ch.is_alphanumeric() || ch == '_' || ch == '$'));
            standalone
                && self.text[idx + modifier.len()..]
                    .chars()
                    .next()
                    .is_some_and(char::is_whitespace)
        })
    }
}

/// A class or interface declaration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeclarationRef {
    pub name: String,
    pub kind: SymbolKind,
    pub uri: String,
    pub range: Range,
    /// Raw source text covered by `range`. The clause scanner reads the
    /// declaration head out of it.
    pub text: String,
    /// Member declarations, in source order.
    pub members: Vec<MemberRef>,
}

impl DeclarationRef {
    /// Build a declaration from a document-symbol node, slicing member and
    /// declaration text out of `source`.
    pub fn from_document_symbol(
        uri: &str,
        symbol: &DocumentSymbol,
        source: &str,
        line_map: &LineMap,
    ) -> Self {
        let text_of = |range: Range| {
            line_map
                .slice(range, source)
                .unwrap_or_default()
                .to_string()
        };

        let members = symbol
            .children
            .iter()
            .map(|child| MemberRef {
                name: child.name.clone(),
                kind: child.kind,
                uri: uri.to_string(),
                range: child.range,
                text: text_of(child.range),
            })
            .collect();

        Self {
            name: symbol.name.clone(),
            kind: symbol.kind,
            uri: uri.to_string(),
            range: symbol.range,
            text: text_of(symbol.range),
            members,
        }
    }

    pub fn key(&self) -> SymbolKey {
        SymbolKey {
            name: self.name.clone(),
            kind: self.kind,
            uri: self.uri.clone(),
            range: self.range,
        }
    }

    /// The hierarchy kind of this declaration, or `InvalidDeclarationKind`
    /// for anything that is neither a class nor an interface.
    pub fn declaration_kind(&self) -> Result<DeclarationKind, ResolveError> {
        DeclarationKind::try_from(self.kind).map_err(|kind| ResolveError::InvalidDeclarationKind {
            name: self.name.clone(),
            kind,
        })
    }

    pub fn is_interface(&self) -> bool {
        self.kind == SymbolKind::Interface
    }

    /// First member with the given name, in declaration order.
    pub fn member(&self, name: &str) -> Option<&MemberRef> {
        self.members.iter().find(|member| member.name == name)
    }
}

#[cfg(test)]
#[path = "../tests/declaration_tests.rs"]
mod declaration_tests;
