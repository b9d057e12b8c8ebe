//! Channel name resolution backed by a refreshable cache
//!
//! A lookup first makes sure the cache is populated and fresh, refreshing it from the
//! listing endpoints when it is not, then answers from the cache. Refreshes are serialized
//! per resolver; lookups that need no refresh read the cache concurrently with one.

mod builder;
mod refresh;


pub use builder::ResolverBuilder;

use crate::error::Result;
use crate::slack::{Channel, ChannelLister};
use crate::storage::ChannelStorage;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

pub struct Resolver {
    lister: Arc<dyn ChannelLister>,
    options: ResolverOptions,

    /// Held for the whole of a refresh so only one drains the listing endpoints at a time
    refresh_lock: Mutex<()>,
}

struct ResolverOptions {
    storage: Arc<dyn ChannelStorage>,
    batch_size: u16,
    exclude_archived: bool,
    search_public_channels: bool,
    refresh_on_cache_miss: bool,
}

impl Resolver {
    /// Resolver with default options: 24h in-memory cache, pages of 1000, no extra toggles
    pub fn new(lister: Arc<dyn ChannelLister>) -> Self {
        Self::builder(lister).build()
    }

    pub fn builder(lister: Arc<dyn ChannelLister>) -> ResolverBuilder {
        ResolverBuilder::new(lister)
    }

    /// Find a channel by its exact name.
    ///
    /// Refreshes first if the cache is stale. On a miss, and only when refresh-on-miss is
    /// enabled, refreshes once more and returns whatever the second read yields.
    pub async fn lookup(&self, cancel: &CancellationToken, name: &str) -> Result<Channel> {
        self.prepare(cancel).await?;

        match self.options.storage.get_by_channel_name(name).await {
            Err(err) if err.is_not_found() && self.options.refresh_on_cache_miss => {
                tracing::debug!(channel = %name, "Channel cache miss, forcing refresh");
                self.refresh(cancel).await?;
                self.options.storage.get_by_channel_name(name).await
            }
            Ok(channel) => {
                tracing::trace!(channel = %name, channel_id = %channel.id, "Channel cache hit");
                Ok(channel)
            }
            Err(err) => Err(err),
        }
    }

    async fn prepare(&self, cancel: &CancellationToken) -> Result<()> {
        if !self.options.storage.need_refresh().await {
            return Ok(());
        }
        tracing::debug!("Channel cache is stale or empty");
        self.refresh(cancel).await
    }
}
