//! East/West regional feed suffixes (`HBO East`, `Starz - West`)

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::rules::{compile, NameRule, RuleKind};
use crate::errors::NormalizationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    East,
    West,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::East => f.write_str("EAST"),
            Self::West => f.write_str("WEST"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegionalSuffixRule {
    pattern: Regex,
}

impl RegionalSuffixRule {
    pub fn new() -> NormalizationResult<Self> {
        let pattern = compile(
            RuleKind::RegionalSuffix,
            "EAST|WEST",
            r"(?i)^(.+?)(?:\s*[-|:]\s*[\(\[]?|\s+[\(\[]?|\s*[\(\[])(EAST|WEST)[\)\]]?\s*$",
        )?;
        Ok(Self { pattern })
    }

    /// Split a name into its base and regional tag
    pub fn split<'a>(&self, name: &'a str) -> Option<(&'a str, Region)> {
        let caps = self.pattern.captures(name.trim())?;
        let base = caps.get(1)?.as_str().trim();
        let region = if caps.get(2)?.as_str().eq_ignore_ascii_case("west") {
            Region::West
        } else {
            Region::East
        };
        Some((base, region))
    }

    pub fn detect(&self, name: &str) -> Option<Region> {
        self.split(name).map(|(_, region)| region)
    }

    pub fn strip(&self, name: &str) -> String {
        match self.split(name) {
            Some((base, _)) => base.to_string(),
            None => name.trim().to_string(),
        }
    }

    pub fn has_suffix(&self, name: &str) -> bool {
        self.split(name).is_some()
    }
}

impl NameRule for RegionalSuffixRule {
    fn kind(&self) -> RuleKind {
        RuleKind::RegionalSuffix
    }

    fn apply(&self, name: &str) -> String {
        self.strip(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("HBO East", Some(Region::East), "HBO")]
    #[case("HBO WEST", Some(Region::West), "HBO")]
    #[case("Starz - West", Some(Region::West), "Starz")]
    #[case("Showtime (East)", Some(Region::East), "Showtime")]
    #[case("Cinemax[west]", Some(Region::West), "Cinemax")]
    #[case("West Ham TV", None, "West Ham TV")]
    #[case("Midwest Sports", None, "Midwest Sports")]
    #[case("Far East", Some(Region::East), "Far")]
    #[case("East", None, "East")]
    fn test_regional_suffix(
        #[case] input: &str,
        #[case] region: Option<Region>,
        #[case] stripped: &str,
    ) {
        let rule = RegionalSuffixRule::new().unwrap();
        assert_eq!(rule.detect(input), region);
        assert_eq!(rule.strip(input), stripped);
    }
}
