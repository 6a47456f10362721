//! Failover ordering of the streams inside one channel
//!
//! Streams are ordered best quality first. Within one quality tier the
//! providers take turns, so when the first stream of a tier fails the next
//! attempt is the same quality from a different provider rather than a
//! lower tier from the same one.

use std::collections::BTreeMap;

use crate::models::RawStream;
use crate::normalization::quality::QualityScorer;
use crate::normalization::NameNormalizer;

/// Provider sort key: known providers ascending, streams without one last
type ProviderKey = (bool, i64);

fn provider_key(stream: &RawStream) -> ProviderKey {
    match stream.provider_id {
        Some(id) => (false, id),
        None => (true, 0),
    }
}

pub struct QualitySorter<'a> {
    scorer: &'a QualityScorer,
}

impl<'a> QualitySorter<'a> {
    pub fn new(scorer: &'a QualityScorer) -> Self {
        Self { scorer }
    }

    pub fn sort(&self, streams: &[RawStream]) -> Vec<RawStream> {
        let mut tiers: BTreeMap<i32, BTreeMap<ProviderKey, Vec<&RawStream>>> = BTreeMap::new();
        for stream in streams {
            tiers
                .entry(self.scorer.score(&stream.name))
                .or_default()
                .entry(provider_key(stream))
                .or_default()
                .push(stream);
        }

        let mut sorted = Vec::with_capacity(streams.len());
        for providers in tiers.into_values() {
            let queues: Vec<Vec<&RawStream>> = providers.into_values().collect();
            let rounds = queues.iter().map(Vec::len).max().unwrap_or(0);
            for round in 0..rounds {
                sorted.extend(queues.iter().filter_map(|q| q.get(round)).map(|s| (*s).clone()));
            }
        }
        sorted
    }
}

/// Sort with the default quality table
pub fn sort_by_quality(streams: &[RawStream]) -> Vec<RawStream> {
    QualitySorter::new(NameNormalizer::global().scorer()).sort(streams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(streams: &[RawStream]) -> Vec<&str> {
        streams.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_quality_tiers() {
        let input = vec![
            RawStream::new(1, "ESPN SD").with_provider(1),
            RawStream::new(2, "ESPN FHD").with_provider(1),
            RawStream::new(3, "ESPN HD").with_provider(1),
            RawStream::new(4, "ESPN 4K").with_provider(1),
        ];
        assert_eq!(
            names(&sort_by_quality(&input)),
            vec!["ESPN 4K", "ESPN FHD", "ESPN HD", "ESPN SD"]
        );
    }

    #[test]
    fn test_providers_interleave_within_tier() {
        let input = vec![
            RawStream::new(1, "X FHD").with_provider(10),
            RawStream::new(2, "X FHD").with_provider(20),
            RawStream::new(3, "X HD").with_provider(10),
            RawStream::new(4, "X HD").with_provider(20),
        ];
        let ids: Vec<i64> = sort_by_quality(&input).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_round_robin_and_missing_provider_last() {
        let input = vec![
            RawStream::new(1, "CNN"),
            RawStream::new(2, "CNN").with_provider(2),
            RawStream::new(3, "CNN").with_provider(2),
            RawStream::new(4, "CNN").with_provider(1),
            RawStream::new(5, "CNN"),
        ];
        let ids: Vec<i64> = sort_by_quality(&input).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![4, 2, 1, 3, 5]);
    }

    #[test]
    fn test_empty_input() {
        assert!(sort_by_quality(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn test_sort_is_a_permutation(
            entries in prop::collection::vec(
                (prop::sample::select(vec!["A 4K", "A FHD", "A HD", "A SD", "A", "A 576p"]),
                 prop::option::of(0i64..4)),
                0..20,
            )
        ) {
            let input: Vec<RawStream> = entries
                .iter()
                .enumerate()
                .map(|(i, (name, provider))| RawStream {
                    provider_id: *provider,
                    ..RawStream::new(i as i64, *name)
                })
                .collect();
            let sorted = sort_by_quality(&input);
            let mut ids: Vec<i64> = sorted.iter().map(|s| s.id).collect();
            ids.sort_unstable();
            prop_assert_eq!(ids, (0..input.len() as i64).collect::<Vec<_>>());

            let scores: Vec<i32> = sorted.iter().map(|s| crate::normalization::score_quality(&s.name)).collect();
            prop_assert!(scores.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
