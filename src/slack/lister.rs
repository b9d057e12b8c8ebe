use crate::error::Result;
use crate::slack::{ChannelPage, ListRequest};
use async_trait::async_trait;

/// Paginated channel listing endpoints of the remote workspace.
///
/// Implementations report throttling as [`ResolverError::RateLimited`] so the resolver
/// can wait out `retry_after` and resend the same page.
///
/// [`ResolverError::RateLimited`]: crate::error::ResolverError::RateLimited
#[async_trait]
pub trait ChannelLister: Send + Sync {
    /// Channels visible to the authenticated caller (`users.conversations`)
    async fn list_for_caller(&self, request: &ListRequest) -> Result<ChannelPage>;

    /// Every public channel in the workspace (`conversations.list`)
    async fn list_directory(&self, request: &ListRequest) -> Result<ChannelPage>;
}
