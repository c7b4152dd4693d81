pub mod configuration;
pub mod error;
pub mod game;
pub mod resource;

pub use configuration::{GameConfig, NamespaceFilter};
pub use error::AppError;
pub use resource::{ResourceInfo, ResourceKind, ResourceMeta};
