//! Lens configuration.
//!
//! Read from camelCase JSON; every field is optional:
//!
//! ```json
//! { "languages": ["typescript"], "peekMode": "gotoAndPeek" }
//! ```

pub const DEFAULT_COMMAND: &str = "editor.action.peekLocations";

/// How the editor reveals the ancestor member when a lens is clicked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PeekMode {
    #[default]
    Peek,
    GotoAndPeek,
    Goto,
}

impl PeekMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Peek => "peek",
            Self::GotoAndPeek => "gotoAndPeek",
            Self::Goto => "goto",
        }
    }
}

impl std::fmt::Display for PeekMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LensConfig {
    /// Language ids of the documents lenses are provided for.
    pub languages: Vec<String>,
    pub peek_mode: PeekMode,
    /// Editor command the lens runs.
    pub command: String,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            languages: vec!["typescript".to_string(), "javascript".to_string()],
            peek_mode: PeekMode::default(),
            command: DEFAULT_COMMAND.to_string(),
        }
    }
}

impl LensConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether documents of `language_id` get lenses. Documents of unknown
    /// language are accepted.
    pub fn supports_language(&self, language_id: Option<&str>) -> bool {
        language_id.is_none_or(|id| self.languages.iter().any(|language| language == id))
    }
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
