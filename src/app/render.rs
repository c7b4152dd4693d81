//! Game state to character frame.

use crate::domain::game::{BOARD_HEIGHT, BOARD_WIDTH, Frame, Game, GameState, Tone};

/// Frame width: the board.
pub const FRAME_WIDTH: usize = BOARD_WIDTH as usize;
/// Frame height: the board plus one message row.
pub const FRAME_HEIGHT: usize = BOARD_HEIGHT as usize + 1;

const MESSAGE_ROW: i32 = BOARD_HEIGHT;
const PAUSE_TEXT: &str = "GAME PAUSED. Press space to RESUME or CTRL+C to QUIT.";
const QUIT_TEXT: &str = "Press CTRL+C to QUIT";

pub fn render(game: &Game) -> Frame {
    let mut frame = Frame::new(FRAME_WIDTH, FRAME_HEIGHT);

    if matches!(game.state(), GameState::Over | GameState::Quit) {
        draw_final_screen(&mut frame, game.score());
        return frame;
    }

    draw_walls(&mut frame);
    for segment in game.snake().segments() {
        frame.put(segment.x, segment.y, '■', Tone::Snake);
    }
    if let Some(food) = game.food().position() {
        frame.put(food.x, food.y, 'O', Tone::Food);
    }
    frame.text(1, 0, &format!("Score: {}", game.score()));
    if let Some(message) = game.message() {
        frame.text(1, MESSAGE_ROW, message);
    }
    if game.state() == GameState::Paused {
        frame.text(centered(PAUSE_TEXT), BOARD_HEIGHT / 2, PAUSE_TEXT);
    }
    frame
}

fn draw_walls(frame: &mut Frame) {
    for x in 0..BOARD_WIDTH {
        frame.put(x, 0, '-', Tone::Plain);
        frame.put(x, BOARD_HEIGHT - 1, '-', Tone::Plain);
    }
    for y in 0..BOARD_HEIGHT {
        frame.put(0, y, '|', Tone::Plain);
        frame.put(BOARD_WIDTH - 1, y, '|', Tone::Plain);
    }
}

fn draw_final_screen(frame: &mut Frame, score: u32) {
    let message = format!("Final Score: {score}");
    let row = BOARD_HEIGHT / 2 - 1;
    frame.text(centered(&message), row, &message);
    frame.text(centered(QUIT_TEXT), row + 2, QUIT_TEXT);
}

fn centered(text: &str) -> i32 {
    let len = i32::try_from(text.chars().count()).unwrap_or(BOARD_WIDTH);
    BOARD_WIDTH / 2 - len / 2
}
