//! Rule objects composed by the normalization pipeline
//!
//! Each rule is a pure `&str -> String` transformation backed by one or more
//! compiled patterns. Rules never look at options; the pipeline decides which
//! rules run and in what order.

use regex::{Captures, Regex};
use std::fmt;

use crate::errors::{NormalizationError, NormalizationResult};

/// Separators recognised around tags: whitespace, `-`, `_`, `|`, `:`
pub(crate) const TAG_SEPARATORS: &str = r"\s\-_|:";

/// What a rule strips or rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    NetworkPrefix,
    NetworkSuffix,
    CountryPrefix,
    QualitySuffix,
    RegionalSuffix,
    SeparatorSpacing,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NetworkPrefix => "network_prefix",
            Self::NetworkSuffix => "network_suffix",
            Self::CountryPrefix => "country_prefix",
            Self::QualitySuffix => "quality_suffix",
            Self::RegionalSuffix => "regional_suffix",
            Self::SeparatorSpacing => "separator_spacing",
        };
        f.write_str(name)
    }
}

/// A single normalization step
pub trait NameRule: Send + Sync + fmt::Debug {
    fn kind(&self) -> RuleKind;

    /// Rewrite `name`. Returns the trimmed input when nothing applies.
    fn apply(&self, name: &str) -> String;
}

/// Compile a tag pattern, attributing failures to the rule and tag
pub(crate) fn compile(kind: RuleKind, tag: &str, pattern: &str) -> NormalizationResult<Regex> {
    Regex::new(pattern).map_err(|e| NormalizationError::invalid_pattern(kind.to_string(), tag, &e))
}

/// Rewrites whitespace and separators into one canonical form:
/// single spaces, `" | "`, `": "` and `" - "`, with dangling separators
/// removed from both ends.
#[derive(Debug, Clone)]
pub struct SeparatorSpacingRule {
    whitespace: Regex,
    pipe: Regex,
    colon: Regex,
    dash: Regex,
    dangling: Regex,
}

impl SeparatorSpacingRule {
    pub fn new() -> NormalizationResult<Self> {
        let kind = RuleKind::SeparatorSpacing;
        Ok(Self {
            whitespace: compile(kind, "whitespace", r"\s+")?,
            pipe: compile(kind, "|", r"\s*\|\s*")?,
            colon: compile(kind, ":", r"\s*:\s*")?,
            // hyphens inside a word ("Ex-Yu") are left alone
            dash: compile(kind, "-", r"\s+-\s*|\s*-\s+")?,
            dangling: compile(kind, "dangling", r"^[\s|:\-]+|[\s|:\-]+$")?,
        })
    }
}

impl NameRule for SeparatorSpacingRule {
    fn kind(&self) -> RuleKind {
        RuleKind::SeparatorSpacing
    }

    fn apply(&self, name: &str) -> String {
        let collapsed = self.whitespace.replace_all(name.trim(), " ");
        let piped = self.pipe.replace_all(&collapsed, " | ").into_owned();
        let coloned = self
            .colon
            .replace_all(&piped, |caps: &Captures| {
                let m = caps.get(0).map(|m| (m.start(), m.end()));
                match m {
                    // clock times such as 10:00 keep their colon
                    Some((start, end))
                        if piped[..start].ends_with(|c: char| c.is_ascii_digit())
                            && piped[end..].starts_with(|c: char| c.is_ascii_digit()) =>
                    {
                        ":".to_string()
                    }
                    _ => ": ".to_string(),
                }
            })
            .into_owned();
        let dashed = self.dash.replace_all(&coloned, " - ");
        let trimmed = self.dangling.replace_all(&dashed, "");
        self.whitespace.replace_all(trimmed.trim(), " ").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ESPN    2", "ESPN 2")]
    #[case("UK|Sky Sports", "UK | Sky Sports")]
    #[case("US:ESPN", "US: ESPN")]
    #[case("US :  ESPN", "US: ESPN")]
    #[case("NBA -Lakers", "NBA - Lakers")]
    #[case("Ex-Yu Kanal", "Ex-Yu Kanal")]
    #[case("News at 10:00", "News at 10:00")]
    #[case("ESPN |", "ESPN")]
    #[case(" - CNN", "CNN")]
    fn test_separator_spacing(#[case] input: &str, #[case] expected: &str) {
        let rule = SeparatorSpacingRule::new().unwrap();
        assert_eq!(rule.apply(input), expected);
    }

    #[test]
    fn test_separator_spacing_is_stable() {
        let rule = SeparatorSpacingRule::new().unwrap();
        let once = rule.apply("UK|Sky:Sports -  Main");
        assert_eq!(rule.apply(&once), once);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = compile(RuleKind::NetworkPrefix, "bad", "(").unwrap_err();
        assert!(matches!(err, NormalizationError::InvalidPattern { .. }));
    }
}
