//! Option records accepted by the normalizer and the grouping orchestrator

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which regional feed to keep when East/West variants are present
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimezonePreference {
    East,
    West,
    #[default]
    Both,
}

/// Separator used when a country code or channel number is written into a name
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CountrySeparator {
    #[serde(rename = "-")]
    Dash,
    #[serde(rename = ":")]
    Colon,
    #[default]
    #[serde(rename = "|")]
    Pipe,
}

impl CountrySeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dash => "-",
            Self::Colon => ":",
            Self::Pipe => "|",
        }
    }
}

impl fmt::Display for CountrySeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order of the channel number and country code in a generated channel name
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixOrder {
    #[default]
    NumberFirst,
    CountryFirst,
}

/// Options controlling how a stream name is reduced to its canonical key.
///
/// Defaults: timezone `both`, every strip flag off, separator `|`, no
/// custom tags. `keep_country_prefix` wins over `strip_country_prefix`.
/// Custom network tags are applied whenever they are supplied; the strip
/// flags only switch the built-in tables on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizationOptions {
    pub timezone_preference: TimezonePreference,
    pub strip_country_prefix: bool,
    pub keep_country_prefix: bool,
    pub country_separator: CountrySeparator,
    pub strip_network_prefix: bool,
    pub custom_network_prefixes: Vec<String>,
    pub strip_network_suffix: bool,
    pub custom_network_suffixes: Vec<String>,
}

impl NormalizationOptions {
    pub fn with_timezone(mut self, preference: TimezonePreference) -> Self {
        self.timezone_preference = preference;
        self
    }
}

/// Options controlling the display name of created channels
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChannelNamingOptions {
    /// Write the assigned channel number into the channel name
    pub add_channel_number: bool,
    pub prefix_order: PrefixOrder,
    pub number_separator: CountrySeparator,
}

/// Everything a bulk creation run needs besides the streams themselves
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BulkCreateOptions {
    pub normalization: NormalizationOptions,
    pub naming: ChannelNamingOptions,
}
