use crate::config::{DEFAULT_BATCH_SIZE, ResolverConfig};
use crate::resolver::{Resolver, ResolverOptions};
use crate::slack::ChannelLister;
use crate::storage::{ChannelStorage, InMemoryStorage};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Collects resolver options; everything is fixed once [`ResolverBuilder::build`] runs
pub struct ResolverBuilder {
    lister: Arc<dyn ChannelLister>,
    storage: Option<Arc<dyn ChannelStorage>>,
    batch_size: u16,
    exclude_archived: bool,
    search_public_channels: bool,
    refresh_on_cache_miss: bool,
}

impl ResolverBuilder {
    pub fn new(lister: Arc<dyn ChannelLister>) -> Self {
        Self {
            lister,
            storage: None,
            batch_size: DEFAULT_BATCH_SIZE,
            exclude_archived: false,
            search_public_channels: false,
            refresh_on_cache_miss: false,
        }
    }

    /// Apply a loaded [`ResolverConfig`], backing the cache with an in-memory store of its TTL
    pub fn from_config(lister: Arc<dyn ChannelLister>, config: &ResolverConfig) -> Self {
        let mut builder = Self::new(lister)
            .with_cache_storage(Arc::new(InMemoryStorage::new(config.cache_ttl)))
            .with_batch_size(config.batch_size);
        builder.exclude_archived = config.exclude_archived;
        builder.search_public_channels = config.search_public_channels;
        builder.refresh_on_cache_miss = config.refresh_on_cache_miss;
        builder
    }

    /// Replace the default 24h in-memory cache
    pub fn with_cache_storage(mut self, storage: Arc<dyn ChannelStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Page size hint for both listing endpoints
    pub fn with_batch_size(mut self, batch_size: u16) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_exclude_archived(mut self) -> Self {
        self.exclude_archived = true;
        self
    }

    /// Also drain the workspace-wide public channel directory on refresh
    pub fn with_search_public_channels(mut self) -> Self {
        self.search_public_channels = true;
        self
    }

    pub fn with_refresh_on_cache_miss(mut self) -> Self {
        self.refresh_on_cache_miss = true;
        self
    }

    pub fn build(self) -> Resolver {
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(InMemoryStorage::default()));

        tracing::debug!(
            batch_size = self.batch_size,
            exclude_archived = self.exclude_archived,
            search_public_channels = self.search_public_channels,
            refresh_on_cache_miss = self.refresh_on_cache_miss,
            "Creating channel resolver"
        );

        Resolver {
            lister: self.lister,
            options: ResolverOptions {
                storage,
                batch_size: self.batch_size,
                exclude_archived: self.exclude_archived,
                search_public_channels: self.search_public_channels,
                refresh_on_cache_miss: self.refresh_on_cache_miss,
            },
            refresh_lock: Mutex::new(()),
        }
    }
}
