use rand::Rng;

use super::food::Food;
use super::geometry::{Coordinates, Direction};
use super::snake::Snake;
use crate::domain::resource::ResourceInfo;

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    Over,
    Quit,
}

/// Player intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Turn(Direction),
    TogglePause,
    Quit,
}

/// What happened during one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub moved: bool,
    pub ate: bool,
    pub eaten: Option<ResourceInfo>,
    pub crashed: bool,
    /// Food was placed this frame without a linked resource.
    pub placed_unlinked: bool,
}

/// Board state advanced one frame at a time.
#[derive(Debug, Clone)]
pub struct Game {
    snake: Snake,
    food: Food,
    score: u32,
    state: GameState,
    frame: u32,
    message: Option<String>,
}

impl Game {
    /// The snake advances once every this many frames.
    pub const FRAMES_PER_MOVE: u32 = 2;
    pub const START: Coordinates = Coordinates::new(20, 20);

    /// Placement retries before food is allowed to land on the snake.
    const PLACEMENT_ATTEMPTS: usize = 32;

    pub fn new(snake: Snake, food: Food) -> Self {
        Self { snake, food, score: 0, state: GameState::Playing, frame: 0, message: None }
    }

    /// A fresh game with the snake at its starting spot.
    pub fn with_food(food: Food) -> Self {
        Self::new(Snake::new(Self::START), food)
    }

    /// A fresh game whose first food, linked to `resource`, is kept off the snake.
    pub fn with_linked_food<R: Rng + ?Sized>(resource: ResourceInfo, rng: &mut R) -> Self {
        let mut game = Self::with_food(Food::unplaced());
        let position = game.free_position(rng);
        game.food.place(position, Some(resource));
        game
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The last "you ate ..." line, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn apply(&mut self, control: Control) {
        match (control, self.state) {
            (Control::Quit, _) => self.state = GameState::Quit,
            (Control::TogglePause, GameState::Playing) => self.state = GameState::Paused,
            (Control::TogglePause, GameState::Paused) => self.state = GameState::Playing,
            (Control::Turn(direction), GameState::Playing) => self.snake.turn(direction),
            _ => {}
        }
    }

    /// Advance one frame. `next_resource` is asked for a resource whenever
    /// food needs placing and must not block.
    pub fn tick<R, F>(&mut self, rng: &mut R, mut next_resource: F) -> TickReport
    where
        R: Rng + ?Sized,
        F: FnMut() -> Option<ResourceInfo>,
    {
        let mut report = TickReport::default();
        if self.state != GameState::Playing {
            return report;
        }

        self.frame += 1;
        if self.frame >= Self::FRAMES_PER_MOVE {
            self.frame = 0;
            self.step(&mut report);
        }

        if self.state == GameState::Playing && !self.food.is_placed() {
            let position = self.free_position(rng);
            let resource = next_resource();
            report.placed_unlinked = resource.is_none();
            self.food.place(position, resource);
        }

        report
    }

    fn step(&mut self, report: &mut TickReport) {
        if self.food.hit_by(self.snake.next_head()) {
            self.snake.grow();
            self.score += 1;
            report.ate = true;
            if let Some(resource) = self.food.consume() {
                self.message = Some(format!(
                    "Oh no! Seems like you ate {}: {} in namespace {}",
                    resource.kind, resource.name, resource.namespace
                ));
                report.eaten = Some(resource);
            }
        }

        self.snake.advance();
        report.moved = true;

        if self.snake.hits_wall() || self.snake.hits_itself() {
            self.state = GameState::Over;
            report.crashed = true;
        }
    }

    fn free_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinates {
        let mut position = Food::random_position(rng);
        for _ in 1..Self::PLACEMENT_ATTEMPTS {
            if !self.snake.occupies(position) {
                break;
            }
            position = Food::random_position(rng);
        }
        position
    }
}
