//! Overworld data structures.

use crate::input::InputState;
use serde::{Deserialize, Serialize};

/// Terrain of a single map cell. Chests and NPCs are overlays, not terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Wall,
    Grass,
    Water,
    Forest,
    Mountain,
    Bridge,
}

impl Terrain {
    pub fn is_walkable(&self) -> bool {
        matches!(self, Terrain::Grass | Terrain::Forest | Terrain::Bridge)
    }

    /// Returns the display character for this terrain
    pub fn icon(&self) -> char {
        match self {
            Terrain::Wall => '#',
            Terrain::Grass => '.',
            Terrain::Water => '~',
            Terrain::Forest => '"',
            Terrain::Mountain => '^',
            Terrain::Bridge => '=',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in `direction`, or None when it would leave the
    /// non-negative quadrant.
    pub fn step(&self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Position { x, y })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Held direction with priority up, down, left, right.
    pub fn from_input(input: &InputState) -> Option<Direction> {
        if input.up {
            Some(Direction::Up)
        } else if input.down {
            Some(Direction::Down)
        } else if input.left {
            Some(Direction::Left)
        } else if input.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Identity of a roaming enemy, independent of where it sits in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpawnId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnedEnemy {
    pub id: SpawnId,
    pub position: Position,
    pub enemy_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chest {
    pub position: Position,
    pub item_id: String,
    pub opened: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Npc {
    pub position: Position,
    pub name: String,
    pub dialog: String,
}

/// Grid of terrain, indexed `[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldMap {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<Terrain>>,
}

impl WorldMap {
    /// Map of `width` x `height` filled with `fill`.
    pub fn filled(width: usize, height: usize, fill: Terrain) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![fill; width]; height],
        }
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn get(&self, pos: Position) -> Option<Terrain> {
        self.cells.get(pos.y).and_then(|row| row.get(pos.x)).copied()
    }

    pub fn set(&mut self, pos: Position, terrain: Terrain) {
        if let Some(cell) = self.cells.get_mut(pos.y).and_then(|row| row.get_mut(pos.x)) {
            *cell = terrain;
        }
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|t| t.is_walkable())
    }

    pub fn is_border(&self, pos: Position) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x + 1 == self.width || pos.y + 1 == self.height
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    pub fn rows(&self) -> &[Vec<Terrain>] {
        &self.cells
    }
}

/// Something the overworld reports to whoever drives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorationEvent {
    /// The player bumped into a roaming enemy. Only a won battle should
    /// lead to `remove_enemy(spawn_id)`.
    Encounter { enemy_key: String, spawn_id: SpawnId },
    /// A chest was opened for the first time.
    ChestOpened { item_id: String, position: Position },
}
