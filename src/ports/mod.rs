mod cluster_client;
mod game_screen;

pub use cluster_client::ClusterClient;
pub use game_screen::GameScreen;
