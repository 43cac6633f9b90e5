//! Test fixtures: outline small TypeScript sources into a workspace.
//!
//! Tests describe a workspace as source text; [`Fixture`] produces what a
//! language server would report for it: a document-symbol tree per file
//! (top-level classes and interfaces with their members) and definition
//! links for every identifier in a declaration head that names a declared
//! type.
//!
//! The outliner is line based. Declarations start a line at brace depth 0,
//! members start a line at depth 1; one-line bodies with members are not
//! recognized.

use heritage_common::{DocumentSymbol, LineMap, Location, Range, SymbolKind};

use crate::workspace::{DefinitionLink, InMemoryWorkspace, SnapshotDocument, WorkspaceSnapshot};

const DECLARATION_MODIFIERS: &[&str] = &["export", "default", "declare", "abstract"];
const MEMBER_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "abstract",
    "readonly",
    "async",
    "override",
    "declare",
];

/// Builder for an [`InMemoryWorkspace`] described by source files.
#[derive(Debug, Default)]
pub struct Fixture {
    documents: Vec<SnapshotDocument>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source file.
    pub fn file(mut self, uri: &str, text: &str) -> Self {
        let language_id = if uri.ends_with(".ts") {
            Some("typescript".to_string())
        } else if uri.ends_with(".js") {
            Some("javascript".to_string())
        } else {
            None
        };
        self.documents.push(SnapshotDocument {
            uri: uri.to_string(),
            language_id,
            text: text.to_string(),
            symbols: outline(text),
        });
        self
    }

    pub fn snapshot(self) -> WorkspaceSnapshot {
        let definitions = link_heritage(&self.documents);
        WorkspaceSnapshot {
            documents: self.documents,
            definitions,
        }
    }

    pub fn build(self) -> InMemoryWorkspace {
        InMemoryWorkspace::from_snapshot(self.snapshot())
    }
}

/// Top-level class and interface symbols of `text`, members as children.
pub fn outline(text: &str) -> Vec<DocumentSymbol> {
    let mut outliner = Outliner {
        text,
        line_map: LineMap::build(text),
        symbols: Vec::new(),
        open: None,
        member: None,
        depth: 0,
    };

    let mut line_start = 0;
    for line in text.split_inclusive('\n') {
        outliner.line(line, line_start);
        line_start += line.len();
    }
    outliner.symbols
}

struct OpenDeclaration {
    symbol: DocumentSymbol,
    start: usize,
}

struct OpenMember {
    name: String,
    kind: SymbolKind,
    start: usize,
    name_start: usize,
    has_body: bool,
}

struct Outliner<'a> {
    text: &'a str,
    line_map: LineMap,
    symbols: Vec<DocumentSymbol>,
    open: Option<OpenDeclaration>,
    member: Option<OpenMember>,
    depth: i32,
}

impl Outliner<'_> {
    fn range(&self, start: usize, end: usize) -> Range {
        Range::new(
            self.line_map.offset_to_position(start as u32, self.text),
            self.line_map.offset_to_position(end as u32, self.text),
        )
    }

    fn line(&mut self, line: &str, line_start: usize) {
        let trimmed = line.trim_start();
        let content_start = line_start + (line.len() - trimmed.len());

        if self.depth == 0 && self.open.is_none() {
            if let Some((kind, name, name_at)) = declaration_head(trimmed) {
                let name_start = content_start + name_at;
                let selection = self.range(name_start, name_start + name.len());
                self.open = Some(OpenDeclaration {
                    symbol: DocumentSymbol::new(name, kind, selection),
                    start: content_start,
                });
            }
        } else if self.depth == 1 && self.open.is_some() && self.member.is_none() {
            if let Some((kind, name, name_at)) = member_head(trimmed) {
                self.member = Some(OpenMember {
                    name,
                    kind,
                    start: content_start,
                    name_start: content_start + name_at,
                    has_body: false,
                });
            }
        }

        for (i, ch) in line.char_indices() {
            let at = line_start + i;
            match ch {
                '{' => {
                    self.depth += 1;
                    if self.depth == 2 {
                        if let Some(member) = self.member.as_mut() {
                            member.has_body = true;
                        }
                    }
                }
                '}' => {
                    self.depth -= 1;
                    if self.depth == 1 && self.member.as_ref().is_some_and(|m| m.has_body) {
                        self.finish_member(at + 1);
                    }
                    if self.depth == 0 {
                        self.finish_declaration(at + 1);
                    }
                }
                ';' if self.depth == 1 => {
                    if self.member.as_ref().is_some_and(|m| !m.has_body) {
                        self.finish_member(at + 1);
                    }
                }
                _ => {}
            }
        }

        // A member without a body or semicolon ends with its line.
        if self.depth == 1 && self.member.as_ref().is_some_and(|m| !m.has_body) {
            self.finish_member(line_start + line.trim_end().len());
        }
    }

    fn finish_member(&mut self, end: usize) {
        let Some(member) = self.member.take() else {
            return;
        };
        let range = self.range(member.start, end);
        let selection = self.range(member.name_start, member.name_start + member.name.len());
        if let Some(open) = self.open.as_mut() {
            open.symbol.add_child(
                DocumentSymbol::new(member.name, member.kind, range).with_selection_range(selection),
            );
        }
    }

    fn finish_declaration(&mut self, end: usize) {
        self.member = None;
        let Some(open) = self.open.take() else {
            return;
        };
        let mut symbol = open.symbol;
        symbol.range = self.range(open.start, end);
        self.symbols.push(symbol);
    }
}

fn declaration_head(line: &str) -> Option<(SymbolKind, String, usize)> {
    let mut at = 0;
    loop {
        let word = word_at(line, at);
        let kind = match word {
            "class" => Some(SymbolKind::Class),
            "interface" => Some(SymbolKind::Interface),
            _ if DECLARATION_MODIFIERS.contains(&word) => None,
            _ => return None,
        };
        at = skip_whitespace(line, at + word.len());
        if let Some(kind) = kind {
            let name = word_at(line, at);
            if name.is_empty() {
                return None;
            }
            return Some((kind, name.to_string(), at));
        }
    }
}

fn member_head(line: &str) -> Option<(SymbolKind, String, usize)> {
    let mut at = 0;
    loop {
        let word = word_at(line, at);
        if word.is_empty() {
            return None;
        }
        let after = skip_whitespace(line, at + word.len());
        if MEMBER_MODIFIERS.contains(&word) && !word_at(line, after).is_empty() {
            at = after;
            continue;
        }

        let rest = line[at + word.len()..]
            .trim_start_matches(|ch: char| ch == '?' || ch == '!')
            .trim_start();
        let kind = if word == "constructor" {
            SymbolKind::Constructor
        } else if rest.starts_with('(') || rest.starts_with('<') {
            SymbolKind::Method
        } else if rest.is_empty() || rest.starts_with([':', '=', ';']) {
            SymbolKind::Property
        } else {
            return None;
        };
        return Some((kind, word.to_string(), at));
    }
}

/// Definition links for identifiers in declaration heads that name a
/// declared class or interface. Same-document declarations win over
/// declarations in other documents.
fn link_heritage(documents: &[SnapshotDocument]) -> Vec<DefinitionLink> {
    let declared: Vec<(&str, Location)> = documents
        .iter()
        .flat_map(|document| {
            document.symbols.iter().map(|symbol| {
                (
                    symbol.name.as_str(),
                    Location::new(document.uri.clone(), symbol.range),
                )
            })
        })
        .collect();

    let targets_for = |name: &str, uri: &str| -> Vec<Location> {
        let matching = declared.iter().filter(|(declared_name, _)| *declared_name == name);
        let local: Vec<Location> = matching
            .clone()
            .filter(|(_, location)| location.uri == uri)
            .map(|(_, location)| location.clone())
            .collect();
        if local.is_empty() {
            matching.map(|(_, location)| location.clone()).collect()
        } else {
            local
        }
    };

    let mut links = Vec::new();
    for document in documents {
        let text = document.text.as_str();
        let line_map = LineMap::build(text);
        for symbol in &document.symbols {
            let Some(start) = line_map.position_to_offset(symbol.range.start, text) else {
                continue;
            };
            let name_start = line_map.position_to_offset(symbol.selection_range.start, text);
            let start = start as usize;
            let head_end = text[start..].find('{').map_or(text.len(), |i| start + i);

            let mut at = start;
            while let Some(ch) = text[at..head_end].chars().next() {
                if !is_identifier_start(ch) {
                    at += ch.len_utf8();
                    continue;
                }
                let word = word_at(text, at);
                if Some(at as u32) != name_start {
                    let targets = targets_for(word, &document.uri);
                    if !targets.is_empty() {
                        let range = Range::new(
                            line_map.offset_to_position(at as u32, text),
                            line_map.offset_to_position((at + word.len()) as u32, text),
                        );
                        links.push(DefinitionLink {
                            uri: document.uri.clone(),
                            range,
                            targets,
                        });
                    }
                }
                at += word.len();
            }
        }
    }
    links
}

fn word_at(line: &str, at: usize) -> &str {
    let rest = &line[at..];
    let len = rest
        .find(|ch: char| !is_identifier_part(ch))
        .unwrap_or(rest.len());
    &rest[..len]
}

fn skip_whitespace(line: &str, at: usize) -> usize {
    let rest = &line[at..];
    at + (rest.len() - rest.trim_start().len())
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

#[cfg(test)]
#[path = "../tests/fixture_tests.rs"]
mod fixture_tests;
