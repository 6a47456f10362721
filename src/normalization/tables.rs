//! Tag tables consumed by the stripping rules
//!
//! Tables are plain data: the rules compile them into patterns when a
//! [`NameNormalizer`](super::NameNormalizer) is built. Every table can be replaced from the
//! `[rules]` section of the configuration file.

use serde::{Deserialize, Serialize};

use crate::errors::{NormalizationError, NormalizationResult};

/// Named quality tag and its priority (lower is better)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityTag {
    pub tag: String,
    pub priority: i32,
}

impl QualityTag {
    pub fn new<S: Into<String>>(tag: S, priority: i32) -> Self {
        Self {
            tag: tag.into(),
            priority,
        }
    }
}

pub const PRIORITY_UHD: i32 = 10;
pub const PRIORITY_FHD: i32 = 20;
pub const PRIORITY_FHD_INTERLACED: i32 = 21;
pub const PRIORITY_HD: i32 = 30;
pub const PRIORITY_SD: i32 = 40;

/// Priority of names carrying no quality information
pub const DEFAULT_QUALITY_PRIORITY: i32 = PRIORITY_HD;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuleTables {
    pub network_prefixes: Vec<String>,
    pub network_suffixes: Vec<String>,
    pub country_codes: Vec<String>,
    /// Checked in order; the first tag found wins
    pub quality_tags: Vec<QualityTag>,
}

impl Default for RuleTables {
    fn default() -> Self {
        Self {
            quality_tags: Self::default_quality_tags(),
            network_prefixes: Self::default_network_prefixes(),
            network_suffixes: Self::default_network_suffixes(),
            country_codes: Self::default_country_codes(),
        }
    }
}

impl RuleTables {
    pub fn default_quality_tags() -> Vec<QualityTag> {
        vec![
            QualityTag::new("UHD", PRIORITY_UHD),
            QualityTag::new("4K", PRIORITY_UHD),
            QualityTag::new("2160P", PRIORITY_UHD),
            QualityTag::new("FHD", PRIORITY_FHD),
            QualityTag::new("1080P", PRIORITY_FHD),
            QualityTag::new("1080I", PRIORITY_FHD_INTERLACED),
            QualityTag::new("HD", PRIORITY_HD),
            QualityTag::new("720P", PRIORITY_HD),
            QualityTag::new("SD", PRIORITY_SD),
            QualityTag::new("480P", PRIORITY_SD),
        ]
    }

    pub fn default_network_prefixes() -> Vec<String> {
        [
            "PPV", "CHAMP", "EPL", "UCL", "UEL", "NFL", "NBA", "NHL", "MLB", "MLS", "NCAAF",
            "NCAAB", "UFC", "WWE", "F1", "DAZN", "ESPN+", "FLOSPORTS", "PEACOCK", "PARAMOUNT+",
            "SLING", "FUBO", "TSN", "SPORTSNET", "24/7", "VIP", "LIVE", "EVENT",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    pub fn default_network_suffixes() -> Vec<String> {
        [
            "ENGLISH", "ENG", "SPANISH", "ESP", "FRENCH", "BACKUP", "ALT", "ALTERNATE",
            "FEED", "MULTI-AUDIO", "MULTI", "VIP",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    pub fn default_country_codes() -> Vec<String> {
        [
            "US", "UK", "GB", "CA", "AU", "NZ", "IE", "DE", "FR", "ES", "IT", "PT", "NL",
            "BE", "CH", "AT", "PL", "RU", "TR", "AR", "BR", "MX", "LAT", "LATAM", "IN", "PK",
            "ID", "PH", "SE", "NO", "DK", "FI", "GR", "RO", "HU", "CZ", "SK", "HR", "RS", "BG",
            "UA", "IL", "SA", "AE", "EG", "MA", "ZA", "NG", "JP", "KR", "CN", "HK", "TW", "TH",
            "VN", "MY", "SG", "EXYU", "AFR", "ARB",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// Reject tables the rules cannot work with
    pub fn validate(&self) -> NormalizationResult<()> {
        check_tags("network_prefixes", &self.network_prefixes)?;
        check_tags("network_suffixes", &self.network_suffixes)?;
        check_tags("country_codes", &self.country_codes)?;
        for tag in &self.quality_tags {
            if tag.tag.trim().is_empty() {
                return Err(NormalizationError::invalid_entry(
                    "quality_tags",
                    "empty quality tag",
                ));
            }
        }
        Ok(())
    }
}

fn check_tags(table: &str, tags: &[String]) -> NormalizationResult<()> {
    if tags.iter().any(|t| t.trim().is_empty()) {
        return Err(NormalizationError::invalid_entry(table, "empty tag"));
    }
    Ok(())
}

/// Tags sorted longest first so that e.g. `ESPN+` is tried before `ESPN`.
/// Duplicates (case-insensitive) are dropped; ties keep table order.
pub(crate) fn longest_first(tags: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut sorted: Vec<String> = tags
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| seen.insert(t.to_uppercase()))
        .collect();
    sorted.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    sorted
}
