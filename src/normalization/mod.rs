//! Stream name normalization
//!
//! Decorated provider names (`US: HBO East ᴴᴰ`, `PPV | UFC 300 (ENGLISH)`)
//! are reduced to a canonical key by an ordered pipeline of rule objects:
//!
//! - [`unicode`] folds look-alike glyphs to ASCII
//! - [`network`] strips network branding prefixes and suffixes
//! - [`country`] strips or rewrites country prefixes
//! - [`quality`] scores quality and strips quality suffixes
//! - [`regional`] strips East/West feed suffixes
//! - [`rules`] holds the shared rule trait and separator spacing
//!
//! The tag tables the rules compile from live in [`tables`] and can be
//! replaced from configuration. The functions in this module run against
//! the process-wide [`NameNormalizer::global`] built from the default
//! tables.

pub mod country;
pub mod network;
pub mod normalizer;
pub mod quality;
pub mod regional;
pub mod rules;
pub mod tables;
pub mod unicode;
pub mod variants;

pub use normalizer::{NameNormalizer, NormalizationPipeline};
pub use regional::Region;
pub use rules::{NameRule, RuleKind};
pub use tables::{QualityTag, RuleTables};
pub use unicode::{fold, UnicodeFolder};
pub use variants::{RegionTag, VariantDetector};

use crate::errors::NormalizationResult;
use crate::models::{NormalizationOptions, RawStream, TimezonePreference};

pub fn score_quality(name: &str) -> i32 {
    NameNormalizer::global().score_quality(name)
}

/// Strip a network prefix using the built-in table plus `custom` tags
pub fn strip_network_prefix(name: &str, custom: &[String]) -> NormalizationResult<String> {
    let rule = NameNormalizer::global().network_prefix_rule_for(true, custom)?;
    Ok(rule.map_or_else(|| name.trim().to_string(), |r| r.strip(name)))
}

pub fn has_network_prefix(name: &str, custom: &[String]) -> NormalizationResult<bool> {
    Ok(strip_network_prefix(name, custom)? != name.trim())
}

/// Strip network suffixes using the built-in table plus `custom` tags
pub fn strip_network_suffix(name: &str, custom: &[String]) -> NormalizationResult<String> {
    let rule = NameNormalizer::global().network_suffix_rule_for(true, custom)?;
    Ok(rule.map_or_else(|| name.trim().to_string(), |r| r.strip(name)))
}

pub fn has_network_suffix(name: &str, custom: &[String]) -> NormalizationResult<bool> {
    Ok(strip_network_suffix(name, custom)? != name.trim())
}

pub fn get_country_prefix(name: &str) -> Option<String> {
    NameNormalizer::global().country_rule().detect(name)
}

pub fn strip_country_prefix(name: &str) -> String {
    NameNormalizer::global().country_rule().strip(name)
}

pub fn has_country_prefix(name: &str) -> bool {
    NameNormalizer::global().country_rule().has_prefix(name)
}

pub fn get_regional_suffix(name: &str) -> Option<Region> {
    NameNormalizer::global().regional_rule().detect(name)
}

pub fn strip_regional_suffix(name: &str) -> String {
    NameNormalizer::global().regional_rule().strip(name)
}

pub fn has_regional_suffix(name: &str) -> bool {
    NameNormalizer::global().regional_rule().has_suffix(name)
}

pub fn strip_quality_suffix(name: &str) -> String {
    NameNormalizer::global().quality_suffix_rule().strip(name)
}

/// Canonical grouping key for `name`
pub fn normalize_stream_name(name: &str, options: &NormalizationOptions) -> NormalizationResult<String> {
    NameNormalizer::global().normalize(name, options)
}

pub fn filter_by_timezone(streams: &[RawStream], preference: TimezonePreference) -> Vec<RawStream> {
    VariantDetector::new(NameNormalizer::global()).filter_by_timezone(streams, preference)
}

pub fn detect_regional_variants<S: AsRef<str>>(names: &[S]) -> bool {
    VariantDetector::new(NameNormalizer::global()).detect_regional_variants(names)
}

pub fn regional_variant_bases<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    VariantDetector::new(NameNormalizer::global()).regional_variant_bases(names)
}

pub fn detect_country_variants(streams: &[RawStream]) -> bool {
    VariantDetector::new(NameNormalizer::global()).detect_country_variants(streams)
}

pub fn country_codes(streams: &[RawStream]) -> Vec<String> {
    VariantDetector::new(NameNormalizer::global()).country_codes(streams)
}
