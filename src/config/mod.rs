mod settings;

pub use settings::{
    DEFAULT_BATCH_SIZE, DEFAULT_CACHE_TTL_SECS, ResolverConfig, Settings, SlackConfig,
    load_settings,
};
