//! Output surface for rendered frames.

use crate::domain::AppError;
use crate::domain::game::Frame;

/// Port for presenting frames to the player.
pub trait GameScreen {
    /// Replace whatever is shown with `frame`.
    fn present(&mut self, frame: &Frame) -> Result<(), AppError>;
}
