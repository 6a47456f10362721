use serde::{Deserialize, Serialize};

pub mod options;

pub use options::*;

/// A stream as pulled from an upstream playlist provider.
///
/// Streams are input data only; nothing in the crate mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawStream {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "providerId", alias = "m3u_account")]
    pub provider_id: Option<i64>,
    #[serde(default, alias = "logoUrl", alias = "tvg_logo")]
    pub logo_url: Option<String>,
}

impl RawStream {
    pub fn new<S: Into<String>>(id: i64, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            url: None,
            provider_id: None,
            logo_url: None,
        }
    }

    pub fn with_provider(mut self, provider_id: i64) -> Self {
        self.provider_id = Some(provider_id);
        self
    }

    pub fn with_logo<S: Into<String>>(mut self, logo_url: S) -> Self {
        self.logo_url = Some(logo_url.into());
        self
    }

    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A channel as returned by the external channel API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    pub channel_number: u32,
    pub channel_group_id: Option<i64>,
    /// Stream ids attached to the channel, in failover order
    #[serde(default)]
    pub streams: Vec<i64>,
    pub logo_id: Option<i64>,
}

/// A logo as returned by the external channel API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Logo {
    pub id: i64,
    pub name: String,
    pub url: String,
}

/// Partial channel update
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_id: Option<i64>,
}

/// Streams sharing one canonical key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelGroup {
    pub canonical_key: String,
    pub members: Vec<RawStream>,
}

/// Result of a bulk channel creation run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    pub created: Vec<Channel>,
    pub errors: Vec<String>,
    /// Number of input streams folded into another stream's channel
    pub merged_count: usize,
}

impl Outcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Side-effect free view of how a stream list would be grouped
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupingPreview {
    pub groups: Vec<ChannelGroup>,
    pub filtered_count: usize,
    pub merged_count: usize,
    pub variants: VariantReport,
}

/// Variants present in a stream list, used to decide which options to offer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantReport {
    pub has_country_variants: bool,
    pub country_codes: Vec<String>,
    pub has_regional_variants: bool,
    pub regional_bases: Vec<String>,
}
