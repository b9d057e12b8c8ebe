use crate::config::DEFAULT_CACHE_TTL_SECS;
use crate::error::{Result, ResolverError};
use crate::slack::{Channel, ChannelId};
use crate::storage::ChannelStorage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Process-local channel cache guarded by a single reader/writer lock
pub struct InMemoryStorage {
    state: RwLock<Snapshot>,

    /// Zero means the cache never expires once populated
    ttl: Duration,
}

#[derive(Default)]
struct Snapshot {
    channels: HashMap<ChannelId, Channel>,
    ids_by_name: HashMap<String, ChannelId>,
    last_set: Option<Instant>,
}

impl InMemoryStorage {
    pub fn new(ttl: Duration) -> Self {
        tracing::debug!(ttl_secs = ttl.as_secs(), "Creating in-memory channel cache");

        Self {
            state: RwLock::new(Snapshot::default()),
            ttl,
        }
    }

    /// Number of cached channels
    pub async fn len(&self) -> usize {
        self.state.read().await.channels.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}

#[async_trait]
impl ChannelStorage for InMemoryStorage {
    async fn set_channels(&self, channels: &[Channel]) -> Result<()> {
        let mut state = self.state.write().await;

        for channel in channels {
            state
                .ids_by_name
                .insert(channel.name.clone(), channel.id.clone());
            state.channels.insert(channel.id.clone(), channel.clone());
        }
        state.last_set = Some(Instant::now());

        tracing::trace!(
            batch = channels.len(),
            cached = state.channels.len(),
            "Merged channel batch"
        );
        Ok(())
    }

    async fn get_by_channel_name(&self, name: &str) -> Result<Channel> {
        let state = self.state.read().await;

        state
            .ids_by_name
            .get(name)
            .and_then(|id| state.channels.get(id))
            .cloned()
            .ok_or_else(|| ResolverError::NotFound(name.to_string()))
    }

    async fn need_refresh(&self) -> bool {
        let state = self.state.read().await;

        match state.last_set {
            None => true,
            Some(_) if self.ttl.is_zero() => false,
            Some(last_set) => last_set.elapsed() > self.ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_empty_cache_needs_refresh_and_misses() {
        let storage = InMemoryStorage::default();

        assert!(storage.need_refresh().await);
        assert!(storage.is_empty().await);
        let err = assert_err!(storage.get_by_channel_name("general").await);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_set_channels_resolves_names() {
        let storage = InMemoryStorage::default();
        assert_ok!(
            storage
                .set_channels(&[
                    Channel::new("C012345678", "test"),
                    Channel::new("C023456789", "test2"),
                ])
                .await
        );

        assert!(!storage.need_refresh().await);
        assert_eq!(storage.len().await, 2);
        let channel = assert_ok!(storage.get_by_channel_name("test2").await);
        assert_eq!(channel.id.as_str(), "C023456789");
    }

    #[tokio::test]
    async fn test_merges_are_additive() {
        let storage = InMemoryStorage::default();
        assert_ok!(storage.set_channels(&[Channel::new("C1", "alpha")]).await);
        assert_ok!(storage.set_channels(&[Channel::new("C2", "beta")]).await);

        assert_eq!(
            assert_ok!(storage.get_by_channel_name("alpha").await).id,
            ChannelId::new("C1")
        );
        assert_eq!(
            assert_ok!(storage.get_by_channel_name("beta").await).id,
            ChannelId::new("C2")
        );
    }

    #[tokio::test]
    async fn test_rename_overwrites_record_but_keeps_old_name() {
        let storage = InMemoryStorage::default();
        assert_ok!(storage.set_channels(&[Channel::new("C1", "old-name")]).await);
        assert_ok!(storage.set_channels(&[Channel::new("C1", "new-name")]).await);

        let renamed = assert_ok!(storage.get_by_channel_name("new-name").await);
        assert_eq!(renamed.name, "new-name");

        // No eviction: the stale name still points at the ID, which now carries the new record
        let stale = assert_ok!(storage.get_by_channel_name("old-name").await);
        assert_eq!(stale.id, ChannelId::new("C1"));
        assert_eq!(stale.name, "new-name");
    }

    #[tokio::test]
    async fn test_empty_batch_still_marks_populated() {
        let storage = InMemoryStorage::default();
        assert_ok!(storage.set_channels(&[]).await);

        assert!(!storage.need_refresh().await);
        assert!(assert_err!(storage.get_by_channel_name("general").await).is_not_found());
    }

    #[tokio::test(start_paused = true)]
    async fn test_need_refresh_after_ttl() {
        let storage = InMemoryStorage::new(Duration::from_secs(60));
        assert_ok!(storage.set_channels(&[Channel::new("C1", "alpha")]).await);
        assert!(!storage.need_refresh().await);

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(!storage.need_refresh().await);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(storage.need_refresh().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_never_expires() {
        let storage = InMemoryStorage::new(Duration::ZERO);
        assert!(storage.need_refresh().await);

        assert_ok!(storage.set_channels(&[Channel::new("C1", "alpha")]).await);
        tokio::time::advance(Duration::from_secs(365 * 24 * 60 * 60)).await;
        assert!(!storage.need_refresh().await);
    }
}
