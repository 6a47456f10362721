use std::collections::HashMap;

use crate::models::Logo;

/// URL to logo map owned by a single bulk run.
///
/// Many streams share one logo URL; the cache keeps the run from creating or
/// looking up the same logo more than once.
#[derive(Debug, Clone, Default)]
pub struct LogoCache {
    by_url: HashMap<String, Logo>,
}

impl LogoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&Logo> {
        self.by_url.get(url)
    }

    pub fn insert(&mut self, logo: Logo) {
        self.by_url.insert(logo.url.clone(), logo);
    }

    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }
}
