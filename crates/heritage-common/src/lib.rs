//! Common types shared by the heritage crates.
//!
//! - Position/Range/Location types for line/column source locations
//! - `LineMap` for byte offset <-> position conversion
//! - LSP symbol kinds and the document-symbol tree

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Location, Position, Range};

// Symbol kinds and document symbols as reported by a language server
pub mod symbols;
pub use symbols::{DocumentSymbol, SymbolKind, UnknownSymbolKind};
