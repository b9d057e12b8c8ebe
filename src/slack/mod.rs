mod client;
mod lister;
mod types;

pub use client::SlackClient;
pub use lister::ChannelLister;
pub use types::{Channel, ChannelId, ChannelPage, ListRequest};
