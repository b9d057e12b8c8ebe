pub mod config;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod slack;
pub mod storage;

pub use error::{ResolverError, Result};
pub use resolver::{Resolver, ResolverBuilder};
pub use slack::{Channel, ChannelId, ChannelLister, ChannelPage, ListRequest, SlackClient};
pub use storage::{ChannelStorage, InMemoryStorage};
