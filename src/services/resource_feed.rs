//! Background prefetch of resources so placing food never waits on the API.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::domain::{AppError, GameConfig, ResourceInfo};
use crate::ports::ClusterClient;
use crate::services::resource_picker::pick_random_resource;

/// Maximum number of prefetched resources.
pub const FEED_CAPACITY: usize = 100;

/// Default pause between two picks.
pub const DEFAULT_FETCH_INTERVAL: Duration = Duration::from_secs(1);

/// Consumer end of the prefetch queue. Dropping it stops the fetch thread.
pub struct ResourceFeed {
    receiver: Receiver<ResourceInfo>,
    stop: Arc<AtomicBool>,
}

impl ResourceFeed {
    /// Start the fetch thread.
    pub fn spawn(
        client: Arc<dyn ClusterClient>,
        config: GameConfig,
        interval: Duration,
    ) -> Result<Self, AppError> {
        let (sender, receiver) = mpsc::sync_channel(FEED_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        thread::Builder::new().name("resource-feed".into()).spawn(move || {
            let mut rng = rand::thread_rng();
            while !thread_stop.load(Ordering::Relaxed) {
                match pick_random_resource(client.as_ref(), &config, &mut rng) {
                    Ok(resource) => {
                        tracing::debug!("Queued {resource}");
                        if sender.send(resource).is_err() {
                            break;
                        }
                    }
                    Err(err) => tracing::warn!("Error fetching resource info: {err}"),
                }
                thread::sleep(interval);
            }
            tracing::debug!("Resource feed stopped");
        })?;

        Ok(Self { receiver, stop })
    }

    /// The next queued resource, if one is ready now.
    pub fn try_next(&self) -> Option<ResourceInfo> {
        match self.receiver.try_recv() {
            Ok(resource) => Some(resource),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next resource.
    pub fn next_timeout(&self, timeout: Duration) -> Option<ResourceInfo> {
        match self.receiver.recv_timeout(timeout) {
            Ok(resource) => Some(resource),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for ResourceFeed {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
