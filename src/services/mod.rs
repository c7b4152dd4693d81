pub mod kube_client_http;
pub mod kubeconfig;
pub mod reaper;
pub mod resource_feed;
pub mod resource_picker;
pub mod terminal_console;

pub use kube_client_http::HttpClusterClient;
pub use kubeconfig::{ClusterAuth, ClusterEndpoint, resolve_endpoint};
pub use reaper::Reaper;
pub use resource_feed::ResourceFeed;
pub use resource_picker::{eligible_resources, pick_random_resource};
pub use terminal_console::{ConsoleScreen, spawn_key_reader};
