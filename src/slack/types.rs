use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A channel as last seen in a listing call.
///
/// Only `id` and `name` drive resolution, everything else is carried along for the embedder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel ID (e.g., C09NU1KFXHT)
    pub id: ChannelId,

    /// Channel name without # (e.g., "engineering")
    pub name: String,

    #[serde(default)]
    pub is_archived: bool,

    #[serde(default)]
    pub is_private: bool,

    /// Whether the listing caller is a member
    #[serde(default)]
    pub is_member: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_members: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ChannelId::new(id),
            name: name.into(),
            is_archived: false,
            is_private: false,
            is_member: false,
            num_members: None,
            topic: None,
            purpose: None,
        }
    }
}

/// Parameters of a single page request against a listing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// `None` requests the first page
    pub cursor: Option<String>,
    pub limit: u16,
    pub exclude_archived: bool,
}

/// One page of a listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelPage {
    pub channels: Vec<Channel>,
    pub next_cursor: Option<String>,
}

impl ChannelPage {
    pub fn new(channels: Vec<Channel>, next_cursor: Option<&str>) -> Self {
        Self {
            channels,
            next_cursor: next_cursor.map(str::to_string),
        }
    }

    /// Cursor for the following page, `None` once the listing is drained.
    ///
    /// Slack reports the end of a listing with an empty cursor as often as with a missing one.
    pub fn continuation(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }
}
