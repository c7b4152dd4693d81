use std::collections::VecDeque;

use super::geometry::{Coordinates, Direction};
use super::{BOARD_HEIGHT, BOARD_WIDTH};

/// The player. The body is never empty; the head is at the front.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Coordinates>,
    direction: Direction,
    growth: u32,
}

impl Snake {
    pub const INITIAL_LENGTH: i32 = 3;

    /// A snake facing right with its tail trailing to the left of `head`.
    pub fn new(head: Coordinates) -> Self {
        let step = Direction::Right.delta().0;
        let body = (0..Self::INITIAL_LENGTH)
            .map(|i| Coordinates::new(head.x - i * step, head.y))
            .collect();
        Self { body, direction: Direction::Right, growth: 0 }
    }

    pub fn head(&self) -> Coordinates {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Coordinates> {
        self.body.iter()
    }

    pub fn occupies(&self, cell: Coordinates) -> bool {
        self.body.contains(&cell)
    }

    /// Change heading. Reversing straight into the neck is ignored.
    pub fn turn(&mut self, direction: Direction) {
        if direction != self.direction.opposite() {
            self.direction = direction;
        }
    }

    /// Where the head goes on the next step.
    pub fn next_head(&self) -> Coordinates {
        self.head().offset(self.direction.delta())
    }

    /// Queue one segment of growth, applied on the next step.
    pub fn grow(&mut self) {
        self.growth += 1;
    }

    /// Move one step and return the new head.
    pub fn advance(&mut self) -> Coordinates {
        let head = self.next_head();
        self.body.push_front(head);
        if self.growth > 0 {
            self.growth -= 1;
        } else {
            self.body.pop_back();
        }
        head
    }

    pub fn hits_wall(&self) -> bool {
        let head = self.head();
        head.x < 1 || head.y < 1 || head.x >= BOARD_WIDTH - 1 || head.y >= BOARD_HEIGHT - 1
    }

    pub fn hits_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }
}
