//! Network branding prefixes (`PPV | ...`) and suffixes (`... (ENGLISH)`)

use regex::Regex;
use tracing::trace;

use super::rules::{compile, NameRule, RuleKind};
use super::tables::longest_first;
use crate::errors::NormalizationResult;

/// Content left after stripping must be at least this many characters,
/// otherwise the tag is assumed to be part of the real name.
pub const MIN_REMAINDER_CHARS: usize = 3;

/// Strips a leading network tag followed by `|`, `:`, `-` or `/`
#[derive(Debug, Clone)]
pub struct NetworkPrefixRule {
    patterns: Vec<(String, Regex)>,
}

impl NetworkPrefixRule {
    pub fn new(tags: &[String]) -> NormalizationResult<Self> {
        let patterns = longest_first(tags)
            .into_iter()
            .map(|tag| {
                let pattern = format!(r"(?i)^{}\s*[|:\-/]\s*(.+)$", regex::escape(&tag));
                compile(RuleKind::NetworkPrefix, &tag, &pattern).map(|re| (tag, re))
            })
            .collect::<NormalizationResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn strip(&self, name: &str) -> String {
        let trimmed = name.trim();
        for (tag, re) in &self.patterns {
            let Some(caps) = re.captures(trimmed) else {
                continue;
            };
            let rest = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            if rest.chars().count() >= MIN_REMAINDER_CHARS {
                trace!("Stripped network prefix '{}' from '{}'", tag, trimmed);
                return rest.to_string();
            }
            trace!(
                "Kept network prefix '{}' on '{}': remainder too short",
                tag,
                trimmed
            );
            return trimmed.to_string();
        }
        trimmed.to_string()
    }

    pub fn has_prefix(&self, name: &str) -> bool {
        self.strip(name) != name.trim()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(tag, _)| tag.as_str())
    }
}

impl NameRule for NetworkPrefixRule {
    fn kind(&self) -> RuleKind {
        RuleKind::NetworkPrefix
    }

    fn apply(&self, name: &str) -> String {
        self.strip(name)
    }
}

/// How a suffix pattern removes its tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SuffixForm {
    /// `NAME (TAG)`
    Parenthesized,
    /// `NAME [TAG]`
    Bracketed,
    /// `NAME - TAG`, `NAME | TAG`, `NAME: TAG`
    Separated,
    /// `NAME TAG`
    BareWord,
}

#[derive(Debug, Clone)]
struct SuffixPattern {
    form: SuffixForm,
    regex: Regex,
}

/// Strips a trailing network tag in parentheses, brackets or as a bare word
#[derive(Debug, Clone)]
pub struct NetworkSuffixRule {
    tags: Vec<(String, Vec<SuffixPattern>)>,
}

impl NetworkSuffixRule {
    pub fn new(tags: &[String]) -> NormalizationResult<Self> {
        let tags = longest_first(tags)
            .into_iter()
            .map(|tag| {
                let patterns = Self::patterns_for(&tag)?;
                Ok((tag, patterns))
            })
            .collect::<NormalizationResult<Vec<_>>>()?;
        Ok(Self { tags })
    }

    fn patterns_for(tag: &str) -> NormalizationResult<Vec<SuffixPattern>> {
        let escaped = regex::escape(tag);
        let min = MIN_REMAINDER_CHARS;
        [
            (SuffixForm::Parenthesized, format!(r"(?i)\s*\({escaped}\)\s*$")),
            (SuffixForm::Bracketed, format!(r"(?i)\s*\[{escaped}\]\s*$")),
            (
                SuffixForm::Separated,
                format!(r"(?i)^(.{{{min},}}?)\s*[-|:]\s*{escaped}\s*$"),
            ),
            (
                SuffixForm::BareWord,
                format!(r"(?i)^(.{{{min},}}?)\s+{escaped}\s*$"),
            ),
        ]
        .into_iter()
        .map(|(form, pattern)| {
            compile(RuleKind::NetworkSuffix, tag, &pattern).map(|regex| SuffixPattern { form, regex })
        })
        .collect()
    }

    pub fn strip(&self, name: &str) -> String {
        let mut current = name.trim().to_string();
        for (tag, patterns) in &self.tags {
            for pattern in patterns {
                let stripped = match pattern.form {
                    SuffixForm::Parenthesized | SuffixForm::Bracketed => {
                        if !pattern.regex.is_match(&current) {
                            continue;
                        }
                        pattern.regex.replace(&current, "").trim().to_string()
                    }
                    SuffixForm::Separated | SuffixForm::BareWord => {
                        let Some(caps) = pattern.regex.captures(&current) else {
                            continue;
                        };
                        caps.get(1)
                            .map(|m| m.as_str().trim().to_string())
                            .unwrap_or_default()
                    }
                };
                trace!(
                    "Stripped network suffix '{}' ({:?}) from '{}'",
                    tag,
                    pattern.form,
                    current
                );
                current = stripped;
                break;
            }
        }
        current
    }

    pub fn has_suffix(&self, name: &str) -> bool {
        self.strip(name) != name.trim()
    }
}

impl NameRule for NetworkSuffixRule {
    fn kind(&self) -> RuleKind {
        RuleKind::NetworkSuffix
    }

    fn apply(&self, name: &str) -> String {
        self.strip(name)
    }
}
