use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of question is being asked, driving strategy selection.
///
/// The classifier vocabulary is the six labels `overview`, `api`, `flow`,
/// `setup`, `specific`, `general`. `Architecture` and `Dependency` are
/// dispatch-only: a caller that already knows what it wants can pass them
/// directly, and the retriever routes them to their heuristic strategies
/// instead of letting them fall through silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Overview,
    Api,
    Flow,
    Setup,
    Specific,
    General,
    Architecture,
    Dependency,
}

impl Intent {
    /// Parse a label, returning `None` for out-of-vocabulary text
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "overview" => Some(Self::Overview),
            "api" => Some(Self::Api),
            "flow" => Some(Self::Flow),
            "setup" => Some(Self::Setup),
            "specific" => Some(Self::Specific),
            "general" => Some(Self::General),
            "architecture" => Some(Self::Architecture),
            "dependency" => Some(Self::Dependency),
            _ => None,
        }
    }

    /// Fail-open parse: anything unrecognized becomes [`Intent::General`].
    ///
    /// Classification runs against a language model; a garbled or
    /// out-of-vocabulary answer must never take retrieval down, it just
    /// loses the intent hint.
    #[must_use]
    pub fn from_label_or_general(label: &str) -> Self {
        Self::from_label(label).unwrap_or_else(|| {
            log::warn!("Unrecognized intent label '{label}', falling back to general");
            Self::General
        })
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Api => "api",
            Self::Flow => "flow",
            Self::Setup => "setup",
            Self::Specific => "specific",
            Self::General => "general",
            Self::Architecture => "architecture",
            Self::Dependency => "dependency",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::General
    }
}
