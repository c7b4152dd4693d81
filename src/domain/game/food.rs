use rand::Rng;

use super::geometry::Coordinates;
use super::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::domain::resource::ResourceInfo;

/// The single food item, optionally linked to a cluster resource.
#[derive(Debug, Clone, Default)]
pub struct Food {
    position: Option<Coordinates>,
    resource: Option<ResourceInfo>,
}

impl Food {
    /// Food that is not on the board yet.
    pub fn unplaced() -> Self {
        Self::default()
    }

    pub fn placed_at(position: Coordinates, resource: Option<ResourceInfo>) -> Self {
        Self { position: Some(position), resource }
    }

    /// A uniformly random spot at least one cell away from the walls.
    pub fn random_position<R: Rng + ?Sized>(rng: &mut R) -> Coordinates {
        Coordinates::new(rng.gen_range(2..BOARD_WIDTH - 2), rng.gen_range(2..BOARD_HEIGHT - 2))
    }

    pub fn place(&mut self, position: Coordinates, resource: Option<ResourceInfo>) {
        self.position = Some(position);
        self.resource = resource;
    }

    pub fn position(&self) -> Option<Coordinates> {
        self.position
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    pub fn resource(&self) -> Option<&ResourceInfo> {
        self.resource.as_ref()
    }

    /// Whether a head at `cell` eats this food. The column test is one cell
    /// wide on each side because horizontal steps skip every other column.
    pub fn hit_by(&self, cell: Coordinates) -> bool {
        self.position.is_some_and(|food| cell.y == food.y && (cell.x - food.x).abs() <= 1)
    }

    /// Remove the food from the board and hand back its resource.
    pub fn consume(&mut self) -> Option<ResourceInfo> {
        self.position = None;
        self.resource.take()
    }
}
