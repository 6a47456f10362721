//! In-memory [`ChannelApi`] used for dry runs and tests

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::Mutex;
use tracing::debug;

use super::traits::ChannelApi;
use crate::errors::{ApiError, ApiResult};
use crate::models::{Channel, ChannelUpdate, Logo};

#[derive(Debug, Default)]
struct State {
    next_channel_id: i64,
    next_logo_id: i64,
    channels: BTreeMap<i64, Channel>,
    logos: Vec<Logo>,
}

/// Channel API backed by process memory.
///
/// Failures can be injected per channel name, stream id or logo URL so that
/// partial-failure handling can be exercised without a real backend.
#[derive(Debug, Default)]
pub struct InMemoryChannelApi {
    state: Mutex<State>,
    failing_channels: HashSet<String>,
    failing_streams: HashSet<i64>,
    failing_logos: HashSet<String>,
}

impl InMemoryChannelApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject `create_channel` for this name
    pub fn fail_channel<S: Into<String>>(mut self, name: S) -> Self {
        self.failing_channels.insert(name.into());
        self
    }

    /// Reject `add_stream_to_channel` for this stream id
    pub fn fail_stream(mut self, stream_id: i64) -> Self {
        self.failing_streams.insert(stream_id);
        self
    }

    /// Reject both `create_logo` and `find_logo_by_url` for this URL
    pub fn fail_logo<S: Into<String>>(mut self, url: S) -> Self {
        self.failing_logos.insert(url.into());
        self
    }

    /// Seed a logo that already exists on the backend
    pub fn with_existing_logo<N: Into<String>, U: Into<String>>(mut self, name: N, url: U) -> Self {
        let state = self.state.get_mut();
        state.next_logo_id += 1;
        let logo = Logo {
            id: state.next_logo_id,
            name: name.into(),
            url: url.into(),
        };
        state.logos.push(logo);
        self
    }

    /// Snapshot of all channels, ordered by id
    pub async fn channels(&self) -> Vec<Channel> {
        self.state.lock().await.channels.values().cloned().collect()
    }

    pub async fn logos(&self) -> Vec<Logo> {
        self.state.lock().await.logos.clone()
    }
}

#[async_trait]
impl ChannelApi for InMemoryChannelApi {
    async fn create_channel(
        &self,
        name: &str,
        channel_number: u32,
        channel_group_id: Option<i64>,
    ) -> ApiResult<Channel> {
        if name.trim().is_empty() {
            return Err(ApiError::request(400, "channel name must not be empty"));
        }
        if self.failing_channels.contains(name) {
            return Err(ApiError::request(500, format!("channel '{}' rejected", name)));
        }

        let mut state = self.state.lock().await;
        if state
            .channels
            .values()
            .any(|c| c.channel_number == channel_number)
        {
            return Err(ApiError::already_exists(
                "channel number",
                channel_number.to_string(),
            ));
        }

        state.next_channel_id += 1;
        let channel = Channel {
            id: state.next_channel_id,
            name: name.to_string(),
            channel_number,
            channel_group_id,
            streams: Vec::new(),
            logo_id: None,
        };
        state.channels.insert(channel.id, channel.clone());
        debug!("Created channel {} '{}' (#{})", channel.id, name, channel_number);
        Ok(channel)
    }

    async fn add_stream_to_channel(&self, channel_id: i64, stream_id: i64) -> ApiResult<()> {
        if self.failing_streams.contains(&stream_id) {
            return Err(ApiError::request(500, format!("stream {} rejected", stream_id)));
        }
        let mut state = self.state.lock().await;
        let channel = state
            .channels
            .get_mut(&channel_id)
            .ok_or_else(|| ApiError::not_found("channel", channel_id.to_string()))?;
        if !channel.streams.contains(&stream_id) {
            channel.streams.push(stream_id);
        }
        Ok(())
    }

    async fn create_logo(&self, name: &str, url: &str) -> ApiResult<Logo> {
        if self.failing_logos.contains(url) {
            return Err(ApiError::transport(format!("logo upload for {} failed", url)));
        }
        let mut state = self.state.lock().await;
        if state.logos.iter().any(|l| l.url == url) {
            return Err(ApiError::already_exists("logo", url));
        }
        state.next_logo_id += 1;
        let logo = Logo {
            id: state.next_logo_id,
            name: name.to_string(),
            url: url.to_string(),
        };
        state.logos.push(logo.clone());
        Ok(logo)
    }

    async fn find_logo_by_url(&self, url: &str) -> ApiResult<Option<Logo>> {
        if self.failing_logos.contains(url) {
            return Err(ApiError::transport(format!("logo lookup for {} failed", url)));
        }
        let state = self.state.lock().await;
        Ok(state.logos.iter().find(|l| l.url == url).cloned())
    }

    async fn update_channel(&self, channel_id: i64, update: ChannelUpdate) -> ApiResult<Channel> {
        let mut state = self.state.lock().await;
        if let Some(logo_id) = update.logo_id {
            if !state.logos.iter().any(|l| l.id == logo_id) {
                return Err(ApiError::not_found("logo", logo_id.to_string()));
            }
        }
        let channel = state
            .channels
            .get_mut(&channel_id)
            .ok_or_else(|| ApiError::not_found("channel", channel_id.to_string()))?;
        if update.logo_id.is_some() {
            channel.logo_id = update.logo_id;
        }
        Ok(channel.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_lifecycle() {
        let api = InMemoryChannelApi::new();
        let channel = api.create_channel("ESPN", 100, Some(7)).await.unwrap();
        api.add_stream_to_channel(channel.id, 11).await.unwrap();
        api.add_stream_to_channel(channel.id, 12).await.unwrap();

        let logo = api.create_logo("ESPN", "http://logo/espn.png").await.unwrap();
        let updated = api
            .update_channel(channel.id, ChannelUpdate { logo_id: Some(logo.id) })
            .await
            .unwrap();

        assert_eq!(updated.streams, vec![11, 12]);
        assert_eq!(updated.logo_id, Some(logo.id));
        assert_eq!(updated.channel_group_id, Some(7));
        assert_eq!(api.channels().await.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_logo_url_reports_already_exists() {
        let api = InMemoryChannelApi::new().with_existing_logo("CNN", "http://logo/cnn.png");
        let err = api.create_logo("CNN HD", "http://logo/cnn.png").await.unwrap_err();
        assert!(err.is_already_exists());
        let found = api.find_logo_by_url("http://logo/cnn.png").await.unwrap();
        assert_eq!(found.map(|l| l.name), Some("CNN".to_string()));
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let api = InMemoryChannelApi::new()
            .fail_channel("Broken")
            .fail_stream(3)
            .fail_logo("http://logo/bad.png");

        assert!(api.create_channel("Broken", 1, None).await.is_err());
        let channel = api.create_channel("Fine", 2, None).await.unwrap();
        assert!(api.add_stream_to_channel(channel.id, 3).await.is_err());
        assert!(api.create_logo("Bad", "http://logo/bad.png").await.is_err());
        assert!(api.add_stream_to_channel(99, 1).await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_channel_number_rejected() {
        let api = InMemoryChannelApi::new();
        api.create_channel("A", 5, None).await.unwrap();
        let err = api.create_channel("B", 5, None).await.unwrap_err();
        assert!(err.is_already_exists());
    }
}
