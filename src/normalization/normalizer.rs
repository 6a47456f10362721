//! Canonical channel keys from raw stream names
//!
//! [`NameNormalizer`] owns the compiled rules for one set of tag tables.
//! [`NameNormalizer::compile`] turns a [`NormalizationOptions`] record into
//! a [`NormalizationPipeline`]: the ordered list of rules that apply for
//! those options. A bulk run compiles once and normalizes every stream with
//! the same pipeline.
//!
//! Pipeline order is fixed:
//!
//! 1. trim and fold Unicode look-alikes
//! 2. network prefix
//! 3. network suffix
//! 4. country prefix (keep and re-emit, or strip)
//! 5. quality suffix
//! 6. East/West suffix, unless the timezone preference is `both`
//! 7. separator spacing
//!
//! Quality runs after the network and country rules so that a trailing
//! custom tag such as `(NA)` cannot hide a quality tag in front of it.
//! A name that strips down to nothing normalizes to its trimmed original.

use std::sync::{Arc, OnceLock};
use tracing::debug;

use super::country::{CountryPrefixRule, KeepCountryPrefixRule};
use super::network::{NetworkPrefixRule, NetworkSuffixRule};
use super::quality::{QualityScorer, QualitySuffixRule};
use super::regional::RegionalSuffixRule;
use super::rules::{NameRule, RuleKind, SeparatorSpacingRule};
use super::tables::RuleTables;
use super::unicode::UnicodeFolder;
use crate::errors::{NormalizationError, NormalizationResult};
use crate::models::{NormalizationOptions, TimezonePreference};

#[derive(Debug, Clone)]
pub struct NameNormalizer {
    tables: RuleTables,
    folder: Arc<UnicodeFolder>,
    scorer: QualityScorer,
    network_prefix: Arc<NetworkPrefixRule>,
    network_suffix: Arc<NetworkSuffixRule>,
    country: Arc<CountryPrefixRule>,
    quality_suffix: Arc<QualitySuffixRule>,
    regional: Arc<RegionalSuffixRule>,
    spacing: Arc<SeparatorSpacingRule>,
}

impl NameNormalizer {
    pub fn new(tables: RuleTables) -> NormalizationResult<Self> {
        Self::with_folder(tables, UnicodeFolder::default())
    }

    pub fn with_folder(tables: RuleTables, folder: UnicodeFolder) -> NormalizationResult<Self> {
        tables.validate()?;
        Ok(Self {
            scorer: QualityScorer::new(&tables.quality_tags, folder.clone())?,
            network_prefix: Arc::new(NetworkPrefixRule::new(&tables.network_prefixes)?),
            network_suffix: Arc::new(NetworkSuffixRule::new(&tables.network_suffixes)?),
            country: Arc::new(CountryPrefixRule::new(&tables.country_codes)?),
            quality_suffix: Arc::new(QualitySuffixRule::new(&tables.quality_tags)?),
            regional: Arc::new(RegionalSuffixRule::new()?),
            spacing: Arc::new(SeparatorSpacingRule::new()?),
            folder: Arc::new(folder),
            tables,
        })
    }

    /// Process-wide normalizer built from the default tables
    pub fn global() -> &'static Self {
        static NORMALIZER: OnceLock<NameNormalizer> = OnceLock::new();
        NORMALIZER.get_or_init(|| {
            Self::new(RuleTables::default()).expect("default rule tables must compile")
        })
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    pub fn folder(&self) -> &UnicodeFolder {
        &self.folder
    }

    pub fn scorer(&self) -> &QualityScorer {
        &self.scorer
    }

    pub fn network_prefix_rule(&self) -> &NetworkPrefixRule {
        &self.network_prefix
    }

    pub fn network_suffix_rule(&self) -> &NetworkSuffixRule {
        &self.network_suffix
    }

    pub fn country_rule(&self) -> &CountryPrefixRule {
        &self.country
    }

    pub fn quality_suffix_rule(&self) -> &QualitySuffixRule {
        &self.quality_suffix
    }

    pub fn regional_rule(&self) -> &RegionalSuffixRule {
        &self.regional
    }

    pub fn spacing_rule(&self) -> &SeparatorSpacingRule {
        &self.spacing
    }

    pub fn score_quality(&self, name: &str) -> i32 {
        self.scorer.score(name)
    }

    /// Prefix rule for the built-in table and/or `custom` tags
    pub fn network_prefix_rule_for(
        &self,
        use_builtin: bool,
        custom: &[String],
    ) -> NormalizationResult<Option<Arc<NetworkPrefixRule>>> {
        check_custom_tags("custom_network_prefixes", custom)?;
        Ok(match (use_builtin, custom.is_empty()) {
            (true, true) => Some(self.network_prefix.clone()),
            (false, true) => None,
            (true, false) => Some(Arc::new(NetworkPrefixRule::new(&merge_tags(
                &self.tables.network_prefixes,
                custom,
            ))?)),
            (false, false) => Some(Arc::new(NetworkPrefixRule::new(custom)?)),
        })
    }

    /// Suffix rule for the built-in table and/or `custom` tags
    pub fn network_suffix_rule_for(
        &self,
        use_builtin: bool,
        custom: &[String],
    ) -> NormalizationResult<Option<Arc<NetworkSuffixRule>>> {
        check_custom_tags("custom_network_suffixes", custom)?;
        Ok(match (use_builtin, custom.is_empty()) {
            (true, true) => Some(self.network_suffix.clone()),
            (false, true) => None,
            (true, false) => Some(Arc::new(NetworkSuffixRule::new(&merge_tags(
                &self.tables.network_suffixes,
                custom,
            ))?)),
            (false, false) => Some(Arc::new(NetworkSuffixRule::new(custom)?)),
        })
    }

    /// Build the rule list for one set of options
    pub fn compile(&self, options: &NormalizationOptions) -> NormalizationResult<NormalizationPipeline> {
        let mut rules: Vec<Arc<dyn NameRule>> = Vec::new();

        if let Some(rule) = self
            .network_prefix_rule_for(options.strip_network_prefix, &options.custom_network_prefixes)?
        {
            rules.push(rule);
        }
        if let Some(rule) = self
            .network_suffix_rule_for(options.strip_network_suffix, &options.custom_network_suffixes)?
        {
            rules.push(rule);
        }

        if options.keep_country_prefix {
            rules.push(Arc::new(KeepCountryPrefixRule::new(
                self.country.as_ref().clone(),
                options.country_separator,
            )));
        } else if options.strip_country_prefix {
            rules.push(self.country.clone());
        }

        rules.push(self.quality_suffix.clone());

        if options.timezone_preference != TimezonePreference::Both {
            rules.push(self.regional.clone());
        }

        rules.push(self.spacing.clone());

        let pipeline = NormalizationPipeline {
            folder: self.folder.clone(),
            rules,
        };
        debug!("Compiled normalization pipeline: {:?}", pipeline.rule_kinds());
        Ok(pipeline)
    }

    /// Compile `options` and normalize a single name
    pub fn normalize(&self, name: &str, options: &NormalizationOptions) -> NormalizationResult<String> {
        Ok(self.compile(options)?.normalize(name))
    }
}

/// Ordered rules for one set of options
#[derive(Debug, Clone)]
pub struct NormalizationPipeline {
    folder: Arc<UnicodeFolder>,
    rules: Vec<Arc<dyn NameRule>>,
}

impl NormalizationPipeline {
    pub fn normalize(&self, name: &str) -> String {
        let original = name.trim();
        let mut current = self.folder.fold(original);
        for rule in &self.rules {
            current = rule.apply(&current);
        }
        if current.trim().is_empty() {
            return original.to_string();
        }
        current
    }

    pub fn rule_kinds(&self) -> Vec<RuleKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }
}

fn check_custom_tags(field: &str, tags: &[String]) -> NormalizationResult<()> {
    if tags.iter().any(|t| t.trim().is_empty()) {
        return Err(NormalizationError::invalid_entry(field, "empty custom tag"));
    }
    Ok(())
}

fn merge_tags(builtin: &[String], custom: &[String]) -> Vec<String> {
    builtin.iter().chain(custom.iter()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountrySeparator;
    use proptest::prelude::*;
    use rstest::rstest;

    fn normalizer() -> &'static NameNormalizer {
        NameNormalizer::global()
    }

    fn tz(preference: TimezonePreference) -> NormalizationOptions {
        NormalizationOptions::default().with_timezone(preference)
    }

    #[test]
    fn test_regional_suffix_follows_timezone_preference() {
        let n = normalizer();
        assert_eq!(n.normalize("HBO East", &tz(TimezonePreference::East)).unwrap(), "HBO");
        assert_eq!(n.normalize("HBO West", &tz(TimezonePreference::West)).unwrap(), "HBO");
        assert_eq!(n.normalize("HBO East", &tz(TimezonePreference::Both)).unwrap(), "HBO East");
    }

    #[test]
    fn test_custom_suffix_does_not_mask_quality_tag() {
        let options = NormalizationOptions {
            strip_country_prefix: true,
            custom_network_suffixes: vec!["NA".to_string()],
            ..Default::default()
        };
        assert_eq!(
            normalizer().normalize("PL| CANAL+ 1 HD (NA)", &options).unwrap(),
            "CANAL+ 1"
        );
    }

    #[test]
    fn test_collapsed_name_falls_back_to_original() {
        let options = NormalizationOptions {
            strip_country_prefix: true,
            ..Default::default()
        };
        assert_eq!(normalizer().normalize("  ID FHD ", &options).unwrap(), "ID FHD");
        assert_eq!(
            normalizer().normalize("HD", &NormalizationOptions::default()).unwrap(),
            "HD"
        );
    }

    #[rstest]
    #[case(CountrySeparator::Pipe, "UK | Sky One")]
    #[case(CountrySeparator::Colon, "UK: Sky One")]
    #[case(CountrySeparator::Dash, "UK - Sky One")]
    fn test_keep_country_prefix(#[case] separator: CountrySeparator, #[case] expected: &str) {
        let options = NormalizationOptions {
            keep_country_prefix: true,
            strip_country_prefix: true,
            country_separator: separator,
            ..Default::default()
        };
        assert_eq!(normalizer().normalize("uk:Sky One HD", &options).unwrap(), expected);
    }

    #[test]
    fn test_full_pipeline() {
        let options = NormalizationOptions {
            timezone_preference: TimezonePreference::East,
            strip_country_prefix: true,
            strip_network_prefix: true,
            strip_network_suffix: true,
            ..Default::default()
        };
        let n = normalizer();
        assert_eq!(n.normalize("US: HBO East ᴴᴰ", &options).unwrap(), "HBO");
        assert_eq!(n.normalize("PPV | UFC 300 FHD (ENGLISH)", &options).unwrap(), "UFC 300");
        assert_eq!(n.normalize("US:HBO  2  East", &options).unwrap(), "HBO 2");
    }

    #[test]
    fn test_network_tags_only_stripped_when_enabled() {
        let n = normalizer();
        let plain = NormalizationOptions::default();
        assert_eq!(n.normalize("PPV | Boxing Night", &plain).unwrap(), "PPV | Boxing Night");
        assert_eq!(n.normalize("ESPN (ENGLISH)", &plain).unwrap(), "ESPN (ENGLISH)");
    }

    #[test]
    fn test_custom_prefix_merges_with_builtin_table() {
        let options = NormalizationOptions {
            strip_network_prefix: true,
            custom_network_prefixes: vec!["STAN".to_string()],
            ..Default::default()
        };
        let n = normalizer();
        assert_eq!(n.normalize("STAN | Bluey", &options).unwrap(), "Bluey");
        assert_eq!(n.normalize("PPV | Boxing Night", &options).unwrap(), "Boxing Night");
    }

    #[test]
    fn test_empty_custom_tag_is_rejected() {
        let options = NormalizationOptions {
            custom_network_suffixes: vec![" ".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            normalizer().compile(&options),
            Err(NormalizationError::InvalidTableEntry { .. })
        ));
    }

    #[test]
    fn test_pipeline_rule_order() {
        let options = NormalizationOptions {
            timezone_preference: TimezonePreference::West,
            strip_country_prefix: true,
            strip_network_prefix: true,
            strip_network_suffix: true,
            ..Default::default()
        };
        let pipeline = normalizer().compile(&options).unwrap();
        assert_eq!(
            pipeline.rule_kinds(),
            vec![
                RuleKind::NetworkPrefix,
                RuleKind::NetworkSuffix,
                RuleKind::CountryPrefix,
                RuleKind::QualitySuffix,
                RuleKind::RegionalSuffix,
                RuleKind::SeparatorSpacing,
            ]
        );
    }

    proptest! {
        #[test]
        fn test_normalize_is_deterministic_and_never_empty(name in "[A-Za-z0-9 |:()\\-]{1,30}") {
            let options = NormalizationOptions {
                timezone_preference: TimezonePreference::East,
                strip_country_prefix: true,
                strip_network_prefix: true,
                strip_network_suffix: true,
                ..Default::default()
            };
            let pipeline = normalizer().compile(&options).unwrap();
            let first = pipeline.normalize(&name);
            prop_assert_eq!(&first, &pipeline.normalize(&name));
            if !name.trim().is_empty() {
                prop_assert!(!first.trim().is_empty());
            }
        }
    }
}
