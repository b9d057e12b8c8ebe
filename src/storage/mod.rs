//! Channel cache backends
//!
//! A backend holds the last listed channels and answers name lookups. Backends must:
//! - merge each `set_channels` batch atomically with respect to readers
//! - never evict: channels missing from a later listing stay resolvable
//! - report "never populated" and "no such channel" identically, as `NotFound`

mod memory;

pub use memory::InMemoryStorage;

use crate::error::Result;
use crate::slack::Channel;
use async_trait::async_trait;

#[async_trait]
pub trait ChannelStorage: Send + Sync {
    /// Merge a batch into the cache, overwriting by ID, and mark the cache as freshly populated
    async fn set_channels(&self, channels: &[Channel]) -> Result<()>;

    /// Exact-name point read; never triggers a refresh
    async fn get_by_channel_name(&self, name: &str) -> Result<Channel>;

    /// True when nothing was ever stored or the expiry window has passed
    async fn need_refresh(&self) -> bool;
}
