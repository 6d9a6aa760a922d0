/*!
# Source languages

Declared language tags as stored alongside submissions (usually the file
extension). Unknown tags are kept verbatim so registries can still be
extended for them.
*/

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Declared source language of a submission
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Language {
    Python,
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Java,
    C,
    Cpp,
    CSharp,
    Other(String),
}

/// Comment syntax recognised by the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `#` line comments and triple-quoted docstrings
    Hash,
    /// `//` line comments and `/* */` blocks
    CFamily,
    None,
}

impl Language {
    /// Parses a tag such as `py`, `.JS` or `cpp`
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().trim_start_matches('.').to_lowercase();
        match tag.as_str() {
            "py" => Language::Python,
            "js" => Language::JavaScript,
            "jsx" => Language::Jsx,
            "ts" => Language::TypeScript,
            "tsx" => Language::Tsx,
            "java" => Language::Java,
            "c" => Language::C,
            "cpp" => Language::Cpp,
            "cs" => Language::CSharp,
            _ => Language::Other(tag),
        }
    }

    /// Language declared by a file's extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_tag(&ext)
    }

    pub fn tag(&self) -> &str {
        match self {
            Language::Python => "py",
            Language::JavaScript => "js",
            Language::Jsx => "jsx",
            Language::TypeScript => "ts",
            Language::Tsx => "tsx",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "cs",
            Language::Other(tag) => tag,
        }
    }

    pub fn comment_style(&self) -> CommentStyle {
        match self {
            Language::Python => CommentStyle::Hash,
            Language::Other(_) => CommentStyle::None,
            _ => CommentStyle::CFamily,
        }
    }
}

impl FromStr for Language {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Language::from_tag(s))
    }
}

impl From<String> for Language {
    fn from(tag: String) -> Self {
        Language::from_tag(&tag)
    }
}

impl From<&str> for Language {
    fn from(tag: &str) -> Self {
        Language::from_tag(tag)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.tag().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
