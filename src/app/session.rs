//! The frame loop: keys in, game tick, deletions out, frame presented.

use std::sync::mpsc::Receiver;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::app::render::render;
use crate::domain::game::{Control, Game, GameState};
use crate::domain::{AppError, ResourceInfo};
use crate::ports::GameScreen;
use crate::services::resource_feed::DEFAULT_FETCH_INTERVAL;
use crate::services::{Reaper, ResourceFeed};

/// Tunables for one play session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub frames_per_second: u32,
    pub fetch_interval: Duration,
    pub first_resource_timeout: Duration,
    pub dry_run: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            frames_per_second: 30,
            fetch_interval: DEFAULT_FETCH_INTERVAL,
            first_resource_timeout: Duration::from_secs(10),
            dry_run: false,
        }
    }
}

impl SessionOptions {
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1)
    }
}

/// How a session ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub eaten: Vec<ResourceInfo>,
    pub crashed: bool,
}

/// Block until the feed yields the resource for the first food.
pub fn await_first_resource(
    feed: &ResourceFeed,
    options: &SessionOptions,
) -> Result<ResourceInfo, AppError> {
    feed.next_timeout(options.first_resource_timeout)
        .ok_or(AppError::ResourceTimeout(options.first_resource_timeout.as_secs()))
}

/// Run frames until the player quits.
pub fn run_session<S, R>(
    screen: &mut S,
    controls: &Receiver<Control>,
    feed: &ResourceFeed,
    reaper: &Reaper,
    first: ResourceInfo,
    options: &SessionOptions,
    rng: &mut R,
) -> Result<SessionSummary, AppError>
where
    S: GameScreen + ?Sized,
    R: Rng + ?Sized,
{
    let frame_time = options.frame_time();
    let mut game = Game::with_linked_food(first, rng);
    let mut summary = SessionSummary::default();

    loop {
        let started = Instant::now();

        for control in controls.try_iter() {
            game.apply(control);
        }
        if game.state() == GameState::Quit {
            break;
        }

        let report = game.tick(rng, || feed.try_next());
        if report.placed_unlinked {
            tracing::info!("No resource info available at the moment.");
        }
        if let Some(resource) = report.eaten {
            if let Some(message) = game.message() {
                tracing::info!("{message}");
            }
            reaper.reap(resource.clone())?;
            summary.eaten.push(resource);
        }
        if report.crashed {
            summary.crashed = true;
            tracing::info!("Game Over!");
        }

        screen.present(&render(&game))?;

        if let Some(remaining) = frame_time.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }
    }

    summary.score = game.score();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GameConfig;
    use crate::testing::{FakeClusterClient, RecordingScreen};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;
    use std::sync::mpsc;

    fn fast_options() -> SessionOptions {
        SessionOptions {
            frames_per_second: 1000,
            fetch_interval: Duration::from_millis(1),
            first_resource_timeout: Duration::from_secs(5),
            dry_run: false,
        }
    }

    fn cluster() -> FakeClusterClient {
        (0..20).fold(FakeClusterClient::new(), |cluster, i| {
            cluster.with_resource(ResourceInfo::pod("default", format!("web-{i}")))
        })
    }

    #[test]
    fn quit_before_first_frame_presents_nothing() {
        let cluster = cluster();
        let options = fast_options();
        let feed =
            ResourceFeed::spawn(Arc::new(cluster.clone()), GameConfig::default(), options.fetch_interval)
                .unwrap();
        let reaper = Reaper::new(Arc::new(cluster), false);
        let first = await_first_resource(&feed, &options).unwrap();
        let (keys, controls) = mpsc::channel();
        keys.send(Control::Quit).unwrap();
        let mut screen = RecordingScreen::new();

        let summary = run_session(
            &mut screen,
            &controls,
            &feed,
            &reaper,
            first,
            &options,
            &mut StdRng::seed_from_u64(5),
        )
        .unwrap();

        assert!(screen.frames.is_empty());
        assert_eq!(summary, SessionSummary::default());
    }

    #[test]
    fn crash_shows_final_score_until_quit() {
        let cluster = cluster();
        let options = fast_options();
        let feed =
            ResourceFeed::spawn(Arc::new(cluster.clone()), GameConfig::default(), options.fetch_interval)
                .unwrap();
        let reaper = Reaper::new(Arc::new(cluster), true);
        let first = await_first_resource(&feed, &options).unwrap();
        let (keys, controls) = mpsc::channel();
        let mut screen =
            RecordingScreen::new().press_when("Final Score", Control::Quit, keys.clone());

        let summary = run_session(
            &mut screen,
            &controls,
            &feed,
            &reaper,
            first,
            &options,
            &mut StdRng::seed_from_u64(9),
        )
        .unwrap();

        assert!(summary.crashed);
        assert!(summary.eaten.len() <= summary.score as usize);
        assert!(screen.last().unwrap().contains_text("Final Score"));
        assert!(screen.frames.len() >= 2 * 29, "snake needs 29 steps to reach the wall");
    }

    #[test]
    fn paused_game_keeps_presenting_the_banner() {
        let cluster = cluster();
        let options = fast_options();
        let feed =
            ResourceFeed::spawn(Arc::new(cluster.clone()), GameConfig::default(), options.fetch_interval)
                .unwrap();
        let reaper = Reaper::new(Arc::new(cluster), true);
        let first = await_first_resource(&feed, &options).unwrap();
        let (keys, controls) = mpsc::channel();
        keys.send(Control::TogglePause).unwrap();
        let mut screen = RecordingScreen::new().quit_after(10, keys.clone());

        let summary = run_session(
            &mut screen,
            &controls,
            &feed,
            &reaper,
            first,
            &options,
            &mut StdRng::seed_from_u64(2),
        )
        .unwrap();

        assert_eq!(screen.frames.len(), 10);
        assert!(screen.frames.iter().all(|f| f.contains_text("GAME PAUSED")));
        assert!(!summary.crashed);
    }

    #[test]
    fn empty_feed_times_out() {
        let cluster = FakeClusterClient::new().with_namespace("default");
        let options = SessionOptions {
            first_resource_timeout: Duration::from_millis(20),
            ..fast_options()
        };
        let feed =
            ResourceFeed::spawn(Arc::new(cluster), GameConfig::default(), options.fetch_interval)
                .unwrap();

        assert!(matches!(await_first_resource(&feed, &options), Err(AppError::ResourceTimeout(_))));
    }
}
