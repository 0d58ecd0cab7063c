use serde::{Deserialize, Serialize};
use std::fmt;

/// Source language of a compilation unit. Decides the default staticness of
/// nested classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    #[default]
    Kotlin,
    Groovy,
    Unknown,
}

impl Language {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "java" => Some(Language::Java),
            "kt" | "kts" => Some(Language::Kotlin),
            "groovy" => Some(Language::Groovy),
            _ => None,
        }
    }

    /// Language of the file at `path`, `Unknown` when the extension says nothing.
    pub fn from_path(path: &str) -> Self {
        path.rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(Language::Unknown)
    }

    /// Whether a nested class needs no outer instance unless marked
    /// [`Modifier::Inner`](super::Modifier::Inner). Java and Groovy nest
    /// inner classes by default and mark the others `static`.
    pub fn nested_classes_are_static(&self) -> bool {
        matches!(self, Language::Kotlin | Language::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::Groovy => "groovy",
            Language::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
