mod fake_cluster;
mod recording_screen;

pub use fake_cluster::FakeClusterClient;
pub use recording_screen::RecordingScreen;
