pub mod cache;
pub mod extends;
pub mod loader;
pub mod source;

pub use cache::{CONFIG_CACHE_TTL_SECS, CacheStats, Clock, ConfigCache, ManualClock, SystemClock};
pub use extends::ExtendsResolver;
pub use loader::{ConfigLoader, LoadOptions};
pub use source::{CONFIG_FILE_NAMES, FileConfigSource, MANIFEST_FIELD};
