//! Known language codes that may prefix a documentation path.

use std::str::FromStr;

/// The language that owns unprefixed legacy paths.
pub const DEFAULT_LANGUAGE: &str = "en";

const DEFAULT_LANGUAGES: &[&str] = &["en", "ja", "cn", "es", "pt", "de"];

/// The set of language codes recognised as a leading path segment.
///
/// Always contains [`DEFAULT_LANGUAGE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Languages {
    codes: Vec<String>,
}

impl Languages {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut all = vec![DEFAULT_LANGUAGE.to_string()];
        for code in codes {
            let code = code.as_ref().trim().to_ascii_lowercase();
            if !code.is_empty() && !all.contains(&code) {
                all.push(code);
            }
        }

        Self { codes: all }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }
}

impl Default for Languages {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGES)
    }
}

impl FromStr for Languages {
    type Err = std::convert::Infallible;

    /// Parses a comma-separated list such as `en,ja,es`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.split(',')))
    }
}
