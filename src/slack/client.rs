use crate::config::SlackConfig;
use crate::error::{Result, ResolverError};
use crate::slack::{Channel, ChannelId, ChannelLister, ChannelPage, ListRequest};
use async_trait::async_trait;
use slack_morphism::errors::SlackClientError;
use slack_morphism::prelude::*;
use std::sync::Arc;

/// Slack Web API backed [`ChannelLister`]
pub struct SlackClient {
    client: Arc<SlackHyperClient>,
    token: SlackApiToken,
}

impl SlackClient {
    pub fn new(config: SlackConfig) -> Result<Self> {
        let connector = SlackClientHyperConnector::new()
            .map_err(|e| ResolverError::SlackApi(e.to_string()))?;

        let client = Arc::new(slack_morphism::SlackClient::new(connector));
        let token = SlackApiToken::new(config.bot_token.into());

        Ok(Self { client, token })
    }
}

#[async_trait]
impl ChannelLister for SlackClient {
    async fn list_for_caller(&self, request: &ListRequest) -> Result<ChannelPage> {
        let session = self.client.open_session(&self.token);

        let mut api_request = SlackApiUsersConversationsRequest::new();
        api_request.cursor = request.cursor.clone().map(SlackCursorId);
        api_request.limit = Some(request.limit);
        api_request.exclude_archived = Some(request.exclude_archived);
        api_request.types = Some(channel_types());

        let response = session
            .users_conversations(&api_request)
            .await
            .map_err(map_client_error)?;

        Ok(into_page(response.channels, response.response_metadata))
    }

    async fn list_directory(&self, request: &ListRequest) -> Result<ChannelPage> {
        let session = self.client.open_session(&self.token);

        let mut api_request = SlackApiConversationsListRequest::new();
        api_request.cursor = request.cursor.clone().map(SlackCursorId);
        api_request.limit = Some(request.limit);
        api_request.exclude_archived = Some(request.exclude_archived);
        api_request.types = Some(channel_types());

        let response = session
            .conversations_list(&api_request)
            .await
            .map_err(map_client_error)?;

        Ok(into_page(response.channels, response.response_metadata))
    }
}

fn channel_types() -> Vec<SlackConversationType> {
    vec![SlackConversationType::Public, SlackConversationType::Private]
}

fn map_client_error(err: SlackClientError) -> ResolverError {
    match err {
        SlackClientError::RateLimitError(rate_limit) => ResolverError::RateLimited {
            retry_after: rate_limit.retry_after,
        },
        other => ResolverError::SlackApi(other.to_string()),
    }
}

fn into_page(
    channels: Vec<SlackChannelInfo>,
    metadata: Option<SlackResponseMetadata>,
) -> ChannelPage {
    let channels = channels.into_iter().filter_map(into_channel).collect();
    let next_cursor = metadata
        .and_then(|m| m.next_cursor)
        .map(|cursor| cursor.0);

    ChannelPage {
        channels,
        next_cursor,
    }
}

/// DMs come back without a name and can never be resolved by one
fn into_channel(info: SlackChannelInfo) -> Option<Channel> {
    let name = info.name?;

    Some(Channel {
        id: ChannelId::new(info.id.to_string()),
        name,
        is_archived: info.flags.is_archived.unwrap_or(false),
        is_private: info.flags.is_private.unwrap_or(false),
        is_member: info.flags.is_member.unwrap_or(false),
        num_members: info.num_members.map(|n| n as u64),
        topic: info.topic.map(|t| t.value),
        purpose: info.purpose.map(|p| p.value),
    })
}
