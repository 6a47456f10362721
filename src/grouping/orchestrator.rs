//! Bulk channel creation from grouped streams
//!
//! A run validates its inputs, filters by timezone, groups streams by
//! canonical key and then creates one channel per group through the
//! [`ChannelApi`]. Calls are awaited one at a time so channel numbers are
//! assigned in a stable order. A failing channel, stream attach or logo is
//! recorded in [`Outcome::errors`] and the run moves on; only precondition
//! violations abort a run.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::naming::ChannelNamer;
use super::sorter::QualitySorter;
use crate::errors::GroupingError;
use crate::logo_assets::{get_or_create_logo, LogoCache};
use crate::models::{
    BulkCreateOptions, Channel, ChannelGroup, ChannelUpdate, GroupingPreview, NormalizationOptions,
    Outcome, RawStream,
};
use crate::normalization::{NameNormalizer, NormalizationPipeline, VariantDetector};
use crate::services::ChannelApi;

pub struct ChannelGroupingOrchestrator<A: ChannelApi> {
    api: Arc<A>,
    normalizer: Arc<NameNormalizer>,
}

impl<A: ChannelApi> ChannelGroupingOrchestrator<A> {
    /// Orchestrator using the default rule tables
    pub fn new(api: Arc<A>) -> Self {
        Self::with_normalizer(api, Arc::new(NameNormalizer::global().clone()))
    }

    pub fn with_normalizer(api: Arc<A>, normalizer: Arc<NameNormalizer>) -> Self {
        Self { api, normalizer }
    }

    pub fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    /// Group streams without creating anything
    pub fn preview_groups(
        &self,
        streams: &[RawStream],
        options: &NormalizationOptions,
    ) -> Result<GroupingPreview, GroupingError> {
        if streams.is_empty() {
            return Err(GroupingError::EmptyInput);
        }
        validate_options(options)?;
        let pipeline = self.normalizer.compile(options)?;

        let detector = VariantDetector::new(&self.normalizer);
        let filtered = detector.filter_by_timezone(streams, options.timezone_preference);
        let sorter = QualitySorter::new(self.normalizer.scorer());
        let groups: Vec<ChannelGroup> = group_streams(&pipeline, &filtered)
            .into_iter()
            .map(|g| ChannelGroup {
                members: sorter.sort(&g.members),
                canonical_key: g.canonical_key,
            })
            .collect();

        Ok(GroupingPreview {
            filtered_count: filtered.len(),
            merged_count: filtered.len() - groups.len(),
            variants: detector.report(streams),
            groups,
        })
    }

    pub async fn bulk_create_channels(
        &self,
        streams: &[RawStream],
        starting_number: u32,
        channel_group_id: Option<i64>,
        options: &BulkCreateOptions,
    ) -> Result<Outcome, GroupingError> {
        if streams.is_empty() {
            return Err(GroupingError::EmptyInput);
        }
        if starting_number == 0 {
            return Err(GroupingError::InvalidStartingNumber {
                number: starting_number,
            });
        }
        validate_options(&options.normalization)?;
        let pipeline = self.normalizer.compile(&options.normalization)?;

        let detector = VariantDetector::new(&self.normalizer);
        let filtered =
            detector.filter_by_timezone(streams, options.normalization.timezone_preference);
        let groups = group_streams(&pipeline, &filtered);

        if let Some(last) = groups.len().checked_sub(1) {
            u32::try_from(last)
                .ok()
                .and_then(|offset| starting_number.checked_add(offset))
                .ok_or_else(|| {
                    GroupingError::invalid_option(
                        "starting_number",
                        format!("{} channels do not fit after {}", groups.len(), starting_number),
                    )
                })?;
        }

        let mut outcome = Outcome {
            merged_count: filtered.len() - groups.len(),
            ..Default::default()
        };

        info!(
            "Creating {} channels from {} streams ({} filtered out, {} merged)",
            groups.len(),
            streams.len(),
            streams.len() - filtered.len(),
            outcome.merged_count
        );

        let namer = ChannelNamer::new(&self.normalizer, options);
        let sorter = QualitySorter::new(self.normalizer.scorer());
        let mut logo_cache = LogoCache::new();

        for (index, group) in groups.iter().enumerate() {
            // bounds checked above
            let channel_number = starting_number + index as u32;
            let name = namer.display_name(&group.canonical_key, channel_number);
            debug!(
                "Group '{}' -> channel #{} '{}' with {} streams",
                group.canonical_key,
                channel_number,
                name,
                group.members.len()
            );

            let mut channel = match self
                .api
                .create_channel(&name, channel_number, channel_group_id)
                .await
            {
                Ok(channel) => channel,
                Err(e) => {
                    warn!("Failed to create channel '{}': {}", name, e);
                    outcome
                        .errors
                        .push(format!("Failed to create channel '{}': {}", name, e));
                    continue;
                }
            };

            let members = sorter.sort(&group.members);
            let attached = self
                .attach_streams(&channel, &members, &mut outcome.errors)
                .await;
            channel.streams = attached.iter().map(|s| s.id).collect();

            if let Some(logo_url) = attached.iter().find_map(|s| s.logo_url.as_deref()) {
                match self
                    .assign_logo(&channel, &name, logo_url, &mut logo_cache)
                    .await
                {
                    Ok(logo_id) => channel.logo_id = Some(logo_id),
                    Err(message) => {
                        warn!("{}", message);
                        outcome.errors.push(message);
                    }
                }
            }

            outcome.created.push(channel);
        }

        info!(
            "Bulk channel creation finished: {} created, {} errors, {} merged",
            outcome.created.len(),
            outcome.errors.len(),
            outcome.merged_count
        );
        Ok(outcome)
    }

    /// Attach members in order, returning the ones that succeeded
    async fn attach_streams<'s>(
        &self,
        channel: &Channel,
        members: &'s [RawStream],
        errors: &mut Vec<String>,
    ) -> Vec<&'s RawStream> {
        let mut attached = Vec::with_capacity(members.len());
        for stream in members {
            match self.api.add_stream_to_channel(channel.id, stream.id).await {
                Ok(()) => attached.push(stream),
                Err(e) => {
                    let message = format!(
                        "Failed to add stream {} ('{}') to channel '{}': {}",
                        stream.id, stream.name, channel.name, e
                    );
                    warn!("{}", message);
                    errors.push(message);
                }
            }
        }
        attached
    }

    async fn assign_logo(
        &self,
        channel: &Channel,
        name: &str,
        logo_url: &str,
        cache: &mut LogoCache,
    ) -> Result<i64, String> {
        let logo = get_or_create_logo(self.api.as_ref(), name, logo_url, cache)
            .await
            .map_err(|e| format!("Failed to get or create logo for channel '{}': {}", name, e))?;
        self.api
            .update_channel(
                channel.id,
                ChannelUpdate {
                    logo_id: Some(logo.id),
                },
            )
            .await
            .map_err(|e| format!("Failed to set logo on channel '{}': {}", name, e))?;
        Ok(logo.id)
    }
}

fn validate_options(options: &NormalizationOptions) -> Result<(), GroupingError> {
    for (field, tags) in [
        ("custom_network_prefixes", &options.custom_network_prefixes),
        ("custom_network_suffixes", &options.custom_network_suffixes),
    ] {
        if tags.iter().any(|t| t.trim().is_empty()) {
            return Err(GroupingError::invalid_option(field, "tags must not be empty"));
        }
    }
    Ok(())
}

/// Group streams by canonical key, keeping first-seen key order
pub fn group_streams(pipeline: &NormalizationPipeline, streams: &[RawStream]) -> Vec<ChannelGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<ChannelGroup> = Vec::new();
    for stream in streams {
        let key = pipeline.normalize(&stream.name);
        match index.get(&key) {
            Some(&i) => groups[i].members.push(stream.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(ChannelGroup {
                    canonical_key: key,
                    members: vec![stream.clone()],
                });
            }
        }
    }
    groups
}
