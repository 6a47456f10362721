//! End-to-end bulk channel creation against the in-memory channel API

use std::sync::Arc;

use m3u_channel_grouper::errors::GroupingError;
use m3u_channel_grouper::grouping::{sort_by_quality, ChannelGroupingOrchestrator};
use m3u_channel_grouper::models::{
    BulkCreateOptions, ChannelNamingOptions, CountrySeparator, NormalizationOptions, PrefixOrder,
    RawStream, TimezonePreference,
};
use m3u_channel_grouper::normalization::{detect_country_variants, detect_regional_variants};
use m3u_channel_grouper::services::InMemoryChannelApi;

fn playlist() -> Vec<RawStream> {
    serde_json::from_str(
        r#"[
            {"id": 1, "name": "US: ESPN HD", "providerId": 1, "logoUrl": "http://logo/espn.png"},
            {"id": 2, "name": "US: ESPN FHD", "providerId": 2},
            {"id": 3, "name": "US: ESPN ᴴᴰ", "providerId": 2},
            {"id": 4, "name": "UK | Sky One", "providerId": 1},
            {"id": 5, "name": "US: HBO East", "providerId": 1},
            {"id": 6, "name": "US: HBO West", "providerId": 1},
            {"id": 7, "name": "PPV | UFC 300 (ENGLISH)", "providerId": 3}
        ]"#,
    )
    .unwrap()
}

#[test]
fn test_sort_interleaves_providers() {
    let streams = vec![
        RawStream::new(1, "X FHD").with_provider(1),
        RawStream::new(2, "X FHD").with_provider(2),
        RawStream::new(3, "X HD").with_provider(1),
        RawStream::new(4, "X HD").with_provider(2),
    ];
    let ids: Vec<i64> = sort_by_quality(&streams).iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_variant_detection() {
    let streams = playlist();
    assert!(detect_country_variants(&streams));
    let names: Vec<&str> = streams.iter().map(|s| s.name.as_str()).collect();
    assert!(detect_regional_variants(&names));
}

#[test]
fn test_merge_example() {
    let streams = vec![
        RawStream::new(1, "ESPN HD").with_provider(1),
        RawStream::new(2, "ESPN FHD").with_provider(2),
        RawStream::new(3, "CNN").with_provider(1),
    ];
    let orchestrator = ChannelGroupingOrchestrator::new(Arc::new(InMemoryChannelApi::new()));
    let outcome = tokio_test::block_on(orchestrator.bulk_create_channels(
        &streams,
        1,
        None,
        &BulkCreateOptions::default(),
    ))
    .unwrap();

    assert_eq!(outcome.created.len(), 2);
    assert_eq!(outcome.merged_count, 1);
    assert_eq!(outcome.created[0].streams, vec![2, 1]);
}

#[tokio::test]
async fn test_full_import() {
    let options = BulkCreateOptions {
        normalization: NormalizationOptions {
            timezone_preference: TimezonePreference::East,
            keep_country_prefix: true,
            country_separator: CountrySeparator::Pipe,
            strip_network_prefix: true,
            strip_network_suffix: true,
            ..Default::default()
        },
        naming: ChannelNamingOptions {
            add_channel_number: true,
            prefix_order: PrefixOrder::NumberFirst,
            number_separator: CountrySeparator::Dash,
        },
    };

    let api = Arc::new(InMemoryChannelApi::new());
    let orchestrator = ChannelGroupingOrchestrator::new(api.clone());
    let outcome = orchestrator
        .bulk_create_channels(&playlist(), 100, Some(9), &options)
        .await
        .unwrap();

    assert!(!outcome.has_errors(), "{:?}", outcome.errors);
    let names: Vec<&str> = outcome.created.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "100 - US | ESPN",
            "101 - UK | Sky One",
            "102 - US | HBO",
            "103 - UFC 300",
        ]
    );
    // HBO West is filtered out, the three ESPN feeds merge
    assert_eq!(outcome.merged_count, 2);
    assert_eq!(outcome.created[0].streams, vec![2, 1, 3]);
    assert!(outcome.created.iter().all(|c| c.channel_group_id == Some(9)));
    assert!(outcome.created[0].logo_id.is_some());
    assert_eq!(api.channels().await.len(), 4);
}

#[tokio::test]
async fn test_partial_failures_are_collected() {
    let api = Arc::new(
        InMemoryChannelApi::new()
            .fail_channel("UK | Sky One")
            .fail_stream(3),
    );
    let orchestrator = ChannelGroupingOrchestrator::new(api);
    let options = BulkCreateOptions {
        normalization: NormalizationOptions {
            keep_country_prefix: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let outcome = orchestrator
        .bulk_create_channels(&playlist(), 1, None, &options)
        .await
        .unwrap();

    assert_eq!(outcome.errors.len(), 2);
    assert!(outcome.created.iter().all(|c| c.name != "UK | Sky One"));
    let espn = outcome
        .created
        .iter()
        .find(|c| c.name == "US | ESPN")
        .unwrap();
    assert_eq!(espn.streams, vec![2, 1]);
}

#[tokio::test]
async fn test_empty_input_is_rejected() {
    let orchestrator = ChannelGroupingOrchestrator::new(Arc::new(InMemoryChannelApi::new()));
    let result = orchestrator
        .bulk_create_channels(&[], 1, None, &BulkCreateOptions::default())
        .await;
    assert_eq!(result, Err(GroupingError::EmptyInput));
}
