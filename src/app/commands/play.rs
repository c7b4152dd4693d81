//! Play command implementation.

use crate::app::AppContext;
use crate::app::render::{FRAME_HEIGHT, FRAME_WIDTH};
use crate::app::session::{SessionOptions, SessionSummary, await_first_resource, run_session};
use crate::domain::AppError;
use crate::services::{ConsoleScreen, Reaper, ResourceFeed, spawn_key_reader};

/// Prefetch resources, take over the terminal and play until the player quits.
pub fn execute(ctx: &AppContext, options: &SessionOptions) -> Result<SessionSummary, AppError> {
    let feed = ResourceFeed::spawn(ctx.client(), ctx.config().clone(), options.fetch_interval)?;
    let reaper = Reaper::new(ctx.client(), options.dry_run);

    let first = await_first_resource(&feed, options).inspect_err(|err| {
        tracing::error!("Failed to fetch initial resource info in time: {err}");
    })?;

    let mut screen = ConsoleScreen::open(FRAME_WIDTH as u16, FRAME_HEIGHT as u16)?;
    let controls = spawn_key_reader()?;
    let result = run_session(
        &mut screen,
        &controls,
        &feed,
        &reaper,
        first,
        options,
        &mut rand::thread_rng(),
    );
    screen.restore()?;
    result
}
