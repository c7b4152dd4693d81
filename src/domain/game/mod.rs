//! Pure snake game model: no terminal, no cluster.

mod food;
mod frame;
mod geometry;
mod snake;
mod state;

pub use food::Food;
pub use frame::{Cell, Frame, Tone};
pub use geometry::{Coordinates, Direction};
pub use snake::Snake;
pub use state::{Control, Game, GameState, TickReport};

/// Board width in columns, walls included.
pub const BOARD_WIDTH: i32 = 80;
/// Board height in rows, walls included.
pub const BOARD_HEIGHT: i32 = 24;
