pub mod game_config;
pub mod loader;

pub use game_config::{GameConfig, NamespaceFilter};
pub use loader::{ConfigFormat, load_config, parse_config_content, resolve_config};
