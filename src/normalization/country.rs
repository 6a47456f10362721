//! Country code prefixes (`US: ESPN`, `| UK | Sky One`)

use regex::Regex;
use tracing::trace;

use super::rules::{compile, NameRule, RuleKind};
use super::tables::longest_first;
use crate::errors::{NormalizationError, NormalizationResult};
use crate::models::CountrySeparator;

/// Detects and strips a leading country code.
///
/// A code followed by an explicit separator (`|`, `:`, `-`, `/`) matches in
/// any case. A code followed only by whitespace must be written in capitals,
/// so ordinary words such as "In" or "No" at the start of a title are left
/// alone.
#[derive(Debug, Clone)]
pub struct CountryPrefixRule {
    pattern: Regex,
}

impl CountryPrefixRule {
    pub fn new(codes: &[String]) -> NormalizationResult<Self> {
        let codes = longest_first(codes);
        if codes.is_empty() {
            return Err(NormalizationError::invalid_entry(
                "country_codes",
                "at least one country code is required",
            ));
        }
        let alternation = codes
            .iter()
            .map(|c| regex::escape(&c.to_uppercase()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"^[\s|\-:/]*(?:(?i:({alternation}))\s*[|:\-/]\s*|({alternation})\s+)(.+)$"
        );
        let pattern = compile(RuleKind::CountryPrefix, "country_codes", &pattern)?;
        Ok(Self { pattern })
    }

    /// Split a name into its uppercased country code and the remainder
    pub fn split<'a>(&self, name: &'a str) -> Option<(String, &'a str)> {
        let caps = self.pattern.captures(name.trim())?;
        let code = caps.get(1).or_else(|| caps.get(2))?.as_str().to_uppercase();
        let rest = caps.get(3)?.as_str().trim();
        if rest.is_empty() {
            return None;
        }
        Some((code, rest))
    }

    /// The country code a name starts with, uppercased
    pub fn detect(&self, name: &str) -> Option<String> {
        self.split(name).map(|(code, _)| code)
    }

    pub fn strip(&self, name: &str) -> String {
        match self.split(name) {
            Some((code, rest)) => {
                trace!("Stripped country prefix '{}' from '{}'", code, name.trim());
                rest.to_string()
            }
            None => name.trim().to_string(),
        }
    }

    pub fn has_prefix(&self, name: &str) -> bool {
        self.split(name).is_some()
    }
}

impl NameRule for CountryPrefixRule {
    fn kind(&self) -> RuleKind {
        RuleKind::CountryPrefix
    }

    fn apply(&self, name: &str) -> String {
        self.strip(name)
    }
}

/// Rewrites any country prefix into the canonical `"{CODE} {sep} {rest}"`
#[derive(Debug, Clone)]
pub struct KeepCountryPrefixRule {
    inner: CountryPrefixRule,
    separator: CountrySeparator,
}

impl KeepCountryPrefixRule {
    pub fn new(inner: CountryPrefixRule, separator: CountrySeparator) -> Self {
        Self { inner, separator }
    }
}

impl NameRule for KeepCountryPrefixRule {
    fn kind(&self) -> RuleKind {
        RuleKind::CountryPrefix
    }

    fn apply(&self, name: &str) -> String {
        match self.inner.split(name) {
            Some((code, rest)) => format!("{} {} {}", code, self.separator, rest),
            None => name.trim().to_string(),
        }
    }
}
