use crate::error::{Result, ResolverError};
use crate::logging::{Timer, log_error};
use crate::resolver::Resolver;
use crate::slack::{ChannelPage, ListRequest};
use std::fmt;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    /// `users.conversations`
    Caller,
    /// `conversations.list`
    Directory,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Caller => f.write_str("users.conversations"),
            Self::Directory => f.write_str("conversations.list"),
        }
    }
}

impl Resolver {
    /// Repopulate the cache from the listing endpoints regardless of staleness.
    ///
    /// Pages are merged into the cache as they arrive, so concurrent lookups may see a
    /// partially refreshed cache. Concurrent callers wait for each other.
    pub async fn refresh(&self, cancel: &CancellationToken) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;
        let _timer = Timer::new("refresh");
        tracing::info!(
            search_public_channels = self.options.search_public_channels,
            "Refreshing channel cache"
        );

        match self.drain_all(cancel).await {
            Ok(merged) => {
                tracing::info!(channels = merged, "Channel cache refreshed");
                Ok(())
            }
            Err(err) => {
                log_error("refresh", &err);
                Err(err)
            }
        }
    }

    async fn drain_all(&self, cancel: &CancellationToken) -> Result<usize> {
        let mut merged = self.drain(Endpoint::Caller, cancel).await?;
        if self.options.search_public_channels {
            merged += self.drain(Endpoint::Directory, cancel).await?;
        }
        Ok(merged)
    }

    /// Walk every page of one endpoint, merging each page before asking for the next
    async fn drain(&self, endpoint: Endpoint, cancel: &CancellationToken) -> Result<usize> {
        let mut request = ListRequest {
            cursor: None,
            limit: self.options.batch_size,
            exclude_archived: self.options.exclude_archived,
        };
        let mut merged = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(ResolverError::Cancelled);
            }

            let page = match self.fetch_page(endpoint, &request, cancel).await {
                Ok(page) => page,
                Err(err) => {
                    let Some(wait) = err.retry_after() else {
                        return Err(err);
                    };
                    tracing::warn!(
                        endpoint = %endpoint,
                        retry_after_ms = wait.as_millis() as u64,
                        "Rate limited, waiting before retrying the same page"
                    );
                    wait_or_cancel(wait, cancel).await?;
                    continue;
                }
            };

            self.options.storage.set_channels(&page.channels).await?;
            merged += page.channels.len();

            let next = page.continuation();
            tracing::debug!(
                endpoint = %endpoint,
                channels = page.channels.len(),
                has_more = next.is_some(),
                "Merged channel page"
            );

            match next {
                Some(cursor) => request.cursor = Some(cursor.to_string()),
                None => return Ok(merged),
            }
        }
    }

    async fn fetch_page(
        &self,
        endpoint: Endpoint,
        request: &ListRequest,
        cancel: &CancellationToken,
    ) -> Result<ChannelPage> {
        let call = async {
            match endpoint {
                Endpoint::Caller => self.lister.list_for_caller(request).await,
                Endpoint::Directory => self.lister.list_directory(request).await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ResolverError::Cancelled),
            result = call => result,
        }
    }
}

/// Sleep exactly as long as the server asked, unless the caller gives up first
async fn wait_or_cancel(wait: Duration, cancel: &CancellationToken) -> Result<()> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ResolverError::Cancelled),
        _ = tokio::time::sleep(wait) => Ok(()),
    }
}
