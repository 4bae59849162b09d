pub mod config_service;
pub mod export;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::export::{MarkdownExporter, copy_to_clipboard};
pub use crate::paths::ForgePaths;
pub use crate::secret_service::SecretServiceImpl;
pub use crate::storage::FileKeyValueStore;
