//! Language buckets keyed by file extension.
//!
//! Files are classified into exactly one bucket by looking their extension
//! up in an ordered table. The first language listing the extension wins;
//! files matching no language land in [`OTHER_BUCKET`].

use serde::{Deserialize, Serialize};

use crate::error::TreelocError;
use crate::Result;

/// Bucket for files no language claims.
pub const OTHER_BUCKET: &str = "Other";

/// A named language and the extensions (with leading dot) it claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub extensions: Vec<String>,
}

impl Language {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| normalize_extension(e)).collect(),
        }
    }

    /// Parse a `NAME=.ext[,.ext...]` definition.
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |message: &str| TreelocError::InvalidLanguage {
            spec: spec.to_string(),
            message: message.to_string(),
        };

        let (name, exts) = spec
            .split_once('=')
            .ok_or_else(|| invalid("expected NAME=.ext[,.ext]"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("language name is empty"));
        }

        let extensions: Vec<&str> = exts
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .collect();
        if extensions.is_empty() {
            return Err(invalid("no extensions given"));
        }

        Ok(Self::new(name, &extensions))
    }

    fn claims(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }
}

/// Ordered extension-to-bucket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTable {
    languages: Vec<Language>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self {
            languages: vec![
                Language::new("HTML", &[".htm", ".html"]),
                Language::new("C/C++", &[".h", ".c", ".cc", ".hpp", ".cpp"]),
                Language::new("Python", &[".py"]),
                Language::new("JavaScript", &[".js", ".jsx"]),
                Language::new("TypeScript", &[".ts", ".tsx"]),
                Language::new("Java", &[".java"]),
                Language::new("C#", &[".cs"]),
                Language::new("CSS", &[".css"]),
                Language::new("Markdown", &[".md"]),
            ],
        }
    }
}

impl LanguageTable {
    /// Create a table with no languages; everything classifies as `Other`.
    pub fn empty() -> Self {
        Self {
            languages: Vec::new(),
        }
    }

    /// Append a language. Extensions already claimed keep their bucket.
    pub fn with_language(mut self, language: Language) -> Self {
        self.languages.push(language);
        self
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Bucket name for an extension key (lowercase, with leading dot).
    pub fn classify(&self, extension: &str) -> &str {
        self.languages
            .iter()
            .find(|lang| lang.claims(extension))
            .map(|lang| lang.name.as_str())
            .unwrap_or(OTHER_BUCKET)
    }

    /// Bucket name for a file name.
    pub fn classify_name(&self, name: &str) -> &str {
        match super::filter::extension_key(name) {
            Some(ext) => self.classify(&ext),
            None => OTHER_BUCKET,
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}
