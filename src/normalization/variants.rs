//! Country and East/West variant detection, and the timezone pre-filter
//!
//! Everything here is a read-only predicate over a stream set. Regional
//! checks look at the quality-stripped name so that `HBO East HD` and
//! `HBO West` are recognised as the same base channel.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::normalizer::NameNormalizer;
use super::regional::Region;
use crate::models::{RawStream, TimezonePreference, VariantReport};

/// Regional tag of a name; untagged names are their own state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionTag {
    East,
    West,
    Untagged,
}

impl From<Option<Region>> for RegionTag {
    fn from(region: Option<Region>) -> Self {
        match region {
            Some(Region::East) => Self::East,
            Some(Region::West) => Self::West,
            None => Self::Untagged,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VariantDetector<'a> {
    normalizer: &'a NameNormalizer,
}

impl<'a> VariantDetector<'a> {
    pub fn new(normalizer: &'a NameNormalizer) -> Self {
        Self { normalizer }
    }

    /// Base name and regional tag of one stream name
    pub fn classify(&self, name: &str) -> (String, RegionTag) {
        let folded = self.normalizer.folder().fold(name.trim());
        let stripped = self.normalizer.quality_suffix_rule().strip(&folded);
        match self.normalizer.regional_rule().split(&stripped) {
            Some((base, region)) => (base.to_string(), RegionTag::from(Some(region))),
            None => (stripped, RegionTag::Untagged),
        }
    }

    /// Keep the streams matching a timezone preference.
    ///
    /// `east` keeps East-tagged and untagged streams, `west` keeps only
    /// West-tagged streams, `both` keeps everything.
    pub fn filter_by_timezone(
        &self,
        streams: &[RawStream],
        preference: TimezonePreference,
    ) -> Vec<RawStream> {
        let kept: Vec<RawStream> = match preference {
            TimezonePreference::Both => streams.to_vec(),
            TimezonePreference::East => streams
                .iter()
                .filter(|s| self.classify(&s.name).1 != RegionTag::West)
                .cloned()
                .collect(),
            TimezonePreference::West => streams
                .iter()
                .filter(|s| self.classify(&s.name).1 == RegionTag::West)
                .cloned()
                .collect(),
        };
        debug!(
            "Timezone filter {:?} kept {} of {} streams",
            preference,
            kept.len(),
            streams.len()
        );
        kept
    }

    /// Base names that exist as a West feed alongside an East or untagged one,
    /// in first-seen order
    pub fn regional_variant_bases<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut order: Vec<(String, String)> = Vec::new();
        let mut tags: HashMap<String, HashSet<RegionTag>> = HashMap::new();

        for name in names {
            let (base, tag) = self.classify(name.as_ref());
            let key = base.to_uppercase();
            if !tags.contains_key(&key) {
                order.push((key.clone(), base));
            }
            tags.entry(key).or_default().insert(tag);
        }

        order
            .into_iter()
            .filter(|(key, _)| {
                tags.get(key).is_some_and(|set| {
                    set.contains(&RegionTag::West)
                        && (set.contains(&RegionTag::East) || set.contains(&RegionTag::Untagged))
                })
            })
            .map(|(_, base)| base)
            .collect()
    }

    pub fn detect_regional_variants<S: AsRef<str>>(&self, names: &[S]) -> bool {
        !self.regional_variant_bases(names).is_empty()
    }

    /// Distinct country codes carried by the streams, in first-seen order
    pub fn country_codes(&self, streams: &[RawStream]) -> Vec<String> {
        let mut seen = HashSet::new();
        streams
            .iter()
            .filter_map(|s| {
                let folded = self.normalizer.folder().fold(&s.name);
                self.normalizer.country_rule().detect(&folded)
            })
            .filter(|code| seen.insert(code.clone()))
            .collect()
    }

    pub fn detect_country_variants(&self, streams: &[RawStream]) -> bool {
        streams.iter().any(|s| {
            let folded = self.normalizer.folder().fold(&s.name);
            self.normalizer.country_rule().has_prefix(&folded)
        })
    }

    pub fn report(&self, streams: &[RawStream]) -> VariantReport {
        let names: Vec<&str> = streams.iter().map(|s| s.name.as_str()).collect();
        let country_codes = self.country_codes(streams);
        let regional_bases = self.regional_variant_bases(&names);
        VariantReport {
            has_country_variants: !country_codes.is_empty(),
            country_codes,
            has_regional_variants: !regional_bases.is_empty(),
            regional_bases,
        }
    }
}
