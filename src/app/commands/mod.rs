pub mod play;
pub mod targets;
pub mod version;
