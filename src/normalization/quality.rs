//! Quality scoring and quality-suffix stripping
//!
//! Scores are priorities: lower means better. Named tags (`UHD`, `FHD`,
//! `HD`, ...) always win over numeric resolutions; a bare resolution such as
//! `576p` that is not in the table is scored as `round(20000 / 576)` clamped
//! to `[5, 60]`. Names with no quality information score as HD.

use regex::Regex;
use tracing::trace;

use super::rules::{compile, NameRule, RuleKind, TAG_SEPARATORS};
use super::tables::{QualityTag, DEFAULT_QUALITY_PRIORITY};
use super::unicode::UnicodeFolder;
use crate::errors::NormalizationResult;

const RESOLUTION_SCALE: f64 = 20000.0;
pub const MIN_NUMERIC_PRIORITY: i32 = 5;
pub const MAX_NUMERIC_PRIORITY: i32 = 60;

#[derive(Debug, Clone)]
pub struct QualityScorer {
    folder: UnicodeFolder,
    named: Vec<(QualityTag, Regex)>,
    numeric: Regex,
}

impl QualityScorer {
    pub fn new(tags: &[QualityTag], folder: UnicodeFolder) -> NormalizationResult<Self> {
        let named = tags
            .iter()
            .map(|tag| {
                let upper = tag.tag.trim().to_uppercase();
                let pattern = format!(
                    r"(?:^|[{sep}\(\[]){tag}(?:$|[{sep}\)\]])",
                    sep = TAG_SEPARATORS,
                    tag = regex::escape(&upper)
                );
                compile(RuleKind::QualitySuffix, &upper, &pattern)
                    .map(|re| (QualityTag::new(upper.clone(), tag.priority), re))
            })
            .collect::<NormalizationResult<Vec<_>>>()?;
        let numeric = compile(RuleKind::QualitySuffix, "resolution", r"\b(\d+)[PI]\b")?;
        Ok(Self {
            folder,
            named,
            numeric,
        })
    }

    pub fn score(&self, name: &str) -> i32 {
        let upper = self.folder.fold(name).to_uppercase();

        if let Some((tag, _)) = self.named.iter().find(|(_, re)| re.is_match(&upper)) {
            trace!("Quality tag '{}' in '{}' -> {}", tag.tag, name, tag.priority);
            return tag.priority;
        }

        let resolution = self
            .numeric
            .captures(&upper)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|res| *res > 0);

        match resolution {
            Some(res) => {
                let priority = (RESOLUTION_SCALE / f64::from(res)).round() as i32;
                priority.clamp(MIN_NUMERIC_PRIORITY, MAX_NUMERIC_PRIORITY)
            }
            None => DEFAULT_QUALITY_PRIORITY,
        }
    }
}

/// Strips quality tags from the end of a name: named tags first, then a
/// bare `NNNp` / `NNNNi` resolution, repeated until nothing changes.
#[derive(Debug, Clone)]
pub struct QualitySuffixRule {
    named: Vec<Regex>,
    numeric: Regex,
}

impl QualitySuffixRule {
    pub fn new(tags: &[QualityTag]) -> NormalizationResult<Self> {
        let named = tags
            .iter()
            .map(|tag| {
                let trimmed = tag.tag.trim();
                compile(
                    RuleKind::QualitySuffix,
                    trimmed,
                    &suffix_pattern(&regex::escape(trimmed)),
                )
            })
            .collect::<NormalizationResult<Vec<_>>>()?;
        let numeric = compile(
            RuleKind::QualitySuffix,
            "resolution",
            &suffix_pattern(r"\d{3,4}[PI]"),
        )?;
        Ok(Self { named, numeric })
    }

    pub fn strip(&self, name: &str) -> String {
        let mut current = name.trim().to_string();
        loop {
            let before = current.clone();
            for re in self.named.iter().chain(std::iter::once(&self.numeric)) {
                current = re.replace(&current, "").trim().to_string();
            }
            if current == before {
                return current;
            }
        }
    }

    pub fn has_suffix(&self, name: &str) -> bool {
        self.strip(name) != name.trim()
    }
}

impl NameRule for QualitySuffixRule {
    fn kind(&self) -> RuleKind {
        RuleKind::QualitySuffix
    }

    fn apply(&self, name: &str) -> String {
        self.strip(name)
    }
}

/// `TAG` at the end of a name, either bracketed or preceded by a separator
fn suffix_pattern(tag: &str) -> String {
    format!(
        r"(?i)(?:[{sep}]*[\(\[]{tag}[\)\]]|(?:^|[{sep}]+){tag})\s*$",
        sep = TAG_SEPARATORS,
        tag = tag
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::tables::RuleTables;
    use rstest::rstest;

    fn scorer() -> QualityScorer {
        QualityScorer::new(&RuleTables::default_quality_tags(), UnicodeFolder::default()).unwrap()
    }

    fn suffix_rule() -> QualitySuffixRule {
        QualitySuffixRule::new(&RuleTables::default_quality_tags()).unwrap()
    }

    #[rstest]
    #[case("ESPN", 30)]
    #[case("ESPN 4K", 10)]
    #[case("ESPN UHD", 10)]
    #[case("ESPN FHD", 20)]
    #[case("ESPN 1080p", 20)]
    #[case("ESPN 1080i", 21)]
    #[case("ESPN HD", 30)]
    #[case("ESPN 720P", 30)]
    #[case("ESPN SD", 40)]
    #[case("ESPN (HD)", 30)]
    #[case("ESPN ᴴᴰ", 30)]
    #[case("ESPN ꜰʜᴅ", 20)]
    #[case("ESPN 576p", 35)]
    #[case("ESPN 360p", 56)]
    #[case("ESPN 240p", 60)]
    #[case("ESPN 4320p", 5)]
    #[case("ESPN 0p", 30)]
    #[case("SHD Network", 30)]
    fn test_score_quality(#[case] input: &str, #[case] expected: i32) {
        assert_eq!(scorer().score(input), expected);
    }

    #[test]
    fn test_named_tag_beats_numeric_resolution() {
        assert_eq!(scorer().score("ESPN SD 576p"), 40);
    }

    #[test]
    fn test_quality_ordering() {
        let s = scorer();
        assert!(s.score("X 4K") < s.score("X FHD"));
        assert!(s.score("X 1080p") < s.score("X HD"));
        assert!(s.score("X 720p") < s.score("X SD"));
        assert!(s.score("X SD") <= s.score("X 480p"));
    }

    #[rstest]
    #[case("ESPN HD", "ESPN")]
    #[case("ESPN FHD", "ESPN")]
    #[case("ESPN (FHD)", "ESPN")]
    #[case("ESPN [4K]", "ESPN")]
    #[case("ESPN - HD", "ESPN")]
    #[case("ESPN 1080p", "ESPN")]
    #[case("ESPN 576p", "ESPN")]
    #[case("ESPN FHD HD", "ESPN")]
    #[case("ESPN 1080p HD", "ESPN")]
    #[case("ESPN HD2", "ESPN HD2")]
    #[case("HD Movies", "HD Movies")]
    #[case("FHD", "")]
    fn test_strip_quality_suffix(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(suffix_rule().strip(input), expected);
    }
}
