//! Hrefs that leave the documentation site entirely.
//!
//! Links matching one of these keys exactly are never rewritten; the request
//! layer sends them off-site instead.

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ExternalRedirects {
    entries: HashMap<String, String>,
}

impl ExternalRedirects {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn contains(&self, href: &str) -> bool {
        self.entries.contains_key(href)
    }

    pub fn destination(&self, href: &str) -> Option<&str> {
        self.entries.get(href).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExternalRedirects {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
