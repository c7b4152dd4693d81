pub mod cli;
pub mod commands;
mod context;
pub mod logging;
pub mod render;
pub mod session;

pub use context::AppContext;
