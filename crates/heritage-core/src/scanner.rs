//! Heritage clause scanner.
//!
//! Finds where a declaration's `extends` and `implements` targets are
//! written, without parsing the declaration. The scanner walks the
//! declaration head character by character, tracking angle-bracket depth so
//! that type parameter lists (`<T extends Comparable<T>>`) are skipped, and
//! stops at the first `{` outside of them.
//!
//! Offsets are byte offsets into the scanned text. [`position_of`] maps them
//! back into document positions.

use heritage_common::{LineMap, Position};

const EXTENDS: &str = "extends";
const IMPLEMENTS: &str = "implements";

/// Reference positions found in a declaration head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeritageClauses {
    /// Offset just past the first depth-0 `extends` keyword and the
    /// whitespace after it.
    pub extends: Option<usize>,
    /// Start of every identifier in the `extends` list. Interfaces may
    /// extend several interfaces (`interface I extends A, B`).
    pub extends_list: Vec<usize>,
    /// Start of every identifier in the `implements` list.
    pub implements: Vec<usize>,
}

impl HeritageClauses {
    pub fn is_empty(&self) -> bool {
        self.extends.is_none() && self.implements.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum List {
    Extends,
    Implements,
}

/// Scan a declaration's text for heritage clause targets.
pub fn scan_heritage(text: &str) -> HeritageClauses {
    let mut clauses = HeritageClauses::default();
    let mut depth: i32 = 0;
    let mut list: Option<List> = None;
    let mut expect_identifier = false;
    let mut index = 0;

    while let Some(ch) = text[index..].chars().next() {
        match ch {
            '<' => depth += 1,
            // `=>` inside a type argument is an arrow, not a closing bracket
            '>' if !text[..index].ends_with('=') => depth -= 1,
            _ if depth != 0 => {}
            '{' => break,
            ',' if list.is_some() => expect_identifier = true,
            _ => {
                if let Some(next) = keyword_end(text, index, EXTENDS) {
                    clauses.extends.get_or_insert(next);
                    list = Some(List::Extends);
                    expect_identifier = true;
                    index = next;
                    continue;
                }
                if let Some(next) = keyword_end(text, index, IMPLEMENTS) {
                    list = Some(List::Implements);
                    expect_identifier = true;
                    index = next;
                    continue;
                }
                if expect_identifier && is_identifier_start(ch) {
                    match list {
                        Some(List::Extends) => clauses.extends_list.push(index),
                        Some(List::Implements) => clauses.implements.push(index),
                        None => {}
                    }
                    expect_identifier = false;
                }
            }
        }
        index += ch.len_utf8();
    }

    clauses
}

/// Map a byte offset inside `text` to a document position, where `text`
/// starts at `origin` in its document.
pub fn position_of(line_map: &LineMap, text: &str, origin: Position, offset: usize) -> Position {
    line_map
        .offset_to_position(offset as u32, text)
        .relative_to(origin)
}

/// If `keyword` starts at `index` as a whole word followed by whitespace,
/// return the offset after the keyword and that whitespace.
fn keyword_end(text: &str, index: usize, keyword: &str) -> Option<usize> {
    let rest = &text[index..];
    if !rest.starts_with(keyword) {
        return None;
    }
    if text[..index].chars().next_back().is_some_and(is_identifier_part) {
        return None;
    }
    let after = &rest[keyword.len()..];
    let trimmed = after.trim_start();
    if trimmed.len() == after.len() {
        return None;
    }
    Some(index + keyword.len() + (after.len() - trimmed.len()))
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod scanner_tests;
