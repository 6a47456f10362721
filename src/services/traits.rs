//! The external channel management API the orchestrator drives

use async_trait::async_trait;

use crate::errors::ApiResult;
use crate::models::{Channel, ChannelUpdate, Logo};

/// Channel, stream and logo operations of the channel management backend.
///
/// Each call is one suspension point of a bulk run; the orchestrator awaits
/// them one at a time and never retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelApi: Send + Sync {
    /// Create an empty channel
    async fn create_channel(
        &self,
        name: &str,
        channel_number: u32,
        channel_group_id: Option<i64>,
    ) -> ApiResult<Channel>;

    /// Append a stream to a channel's stream list
    async fn add_stream_to_channel(&self, channel_id: i64, stream_id: i64) -> ApiResult<()>;

    /// Register a logo. Fails with `ApiError::AlreadyExists` when the URL is taken.
    async fn create_logo(&self, name: &str, url: &str) -> ApiResult<Logo>;

    async fn find_logo_by_url(&self, url: &str) -> ApiResult<Option<Logo>>;

    async fn update_channel(&self, channel_id: i64, update: ChannelUpdate) -> ApiResult<Channel>;
}
