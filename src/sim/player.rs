//! Light-cycle players and the input-to-turn mapper

use glam::{DVec2, I64Vec2};
use serde::{Deserialize, Deserializer, Serialize};

use super::geometry::{Point, Segment};
use crate::Fp;

/// Velocity in fixed-point units per second (always axis-aligned)
pub type Velocity = I64Vec2;

/// Player index (0-based, stable for the whole round)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

impl PlayerId {
    /// 1-based number shown to players ("P1", "P2")
    pub fn number(self) -> usize {
        self.0 + 1
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.number())
    }
}

/// Movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Grid direction (never diagonal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// Unit vector (+y is up)
    pub fn unit(self) -> I64Vec2 {
        match self {
            Direction::Left => I64Vec2::NEG_X,
            Direction::Right => I64Vec2::X,
            Direction::Up => I64Vec2::Y,
            Direction::Down => I64Vec2::NEG_Y,
        }
    }

    /// Velocity of the given fixed-point speed along this direction
    pub fn velocity(self, speed: Fp) -> Velocity {
        self.unit() * speed
    }

    /// Direction of an axis-aligned velocity, `None` when stopped
    pub fn from_velocity(vel: Velocity) -> Option<Direction> {
        match (vel.x.signum(), vel.y.signum()) {
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            _ => None,
        }
    }
}

/// A physical key, as delivered by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Letter/character key (case-insensitive)
    Char(char),
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    fn normalized(self) -> Self {
        match self {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

/// A player's four turn keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: Key,
    pub right: Key,
    pub up: Key,
    pub down: Key,
}

impl KeyBindings {
    /// A/D/W/S
    pub const WASD: KeyBindings = KeyBindings {
        left: Key::Char('a'),
        right: Key::Char('d'),
        up: Key::Char('w'),
        down: Key::Char('s'),
    };

    /// Arrow keys
    pub const ARROWS: KeyBindings = KeyBindings {
        left: Key::Left,
        right: Key::Right,
        up: Key::Up,
        down: Key::Down,
    };

    /// Logical direction bound to `key`, if any
    pub fn direction_for(&self, key: Key) -> Option<Direction> {
        let key = key.normalized();
        Direction::ALL
            .into_iter()
            .find(|&dir| self.key_for(dir).normalized() == key)
    }

    pub fn key_for(&self, direction: Direction) -> Key {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// All four keys (left, right, up, down)
    pub fn keys(&self) -> [Key; 4] {
        [self.left, self.right, self.up, self.down].map(Key::normalized)
    }
}

/// Result of a turn request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Key not bound, or the turn would stay on the current axis
    NoChange,
    /// Turn accepted, the player now moves with this velocity
    NewVelocity(Velocity),
}

/// A light-cycle and its trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// RGBA color for the renderer
    pub color: [f32; 4],
    pub bindings: KeyBindings,
    pub velocity: Velocity,
    /// Pivot vertices followed by the live head (always at least 2 points)
    #[serde(deserialize_with = "deserialize_path")]
    path: Vec<Point>,
    /// Sub-unit motion not yet applied to the head
    #[serde(default)]
    carry: DVec2,
}

fn deserialize_path<'de, D>(deserializer: D) -> Result<Vec<Point>, D::Error>
where
    D: Deserializer<'de>,
{
    let path = Vec::<Point>::deserialize(deserializer)?;
    if path.len() < 2 {
        return Err(serde::de::Error::invalid_length(
            path.len(),
            &"a trail of at least 2 points",
        ));
    }
    Ok(path)
}

impl Player {
    pub fn new(
        id: PlayerId,
        color: [f32; 4],
        bindings: KeyBindings,
        start: Point,
        direction: Direction,
        speed: Fp,
    ) -> Self {
        Self {
            id,
            color,
            bindings,
            velocity: direction.velocity(speed),
            path: vec![start, start],
            carry: DVec2::ZERO,
        }
    }

    /// Pivot vertices followed by the live head
    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Sub-unit motion carried into the next tick
    #[inline]
    pub fn carry(&self) -> DVec2 {
        self.carry
    }

    /// Current head position
    #[inline]
    pub fn position(&self) -> Point {
        // Seeded with two points and only ever grows
        self.path[self.path.len() - 1]
    }

    /// Most recent frozen vertex (start point or last pivot)
    #[inline]
    pub fn last_pivot(&self) -> Point {
        self.path[self.path.len() - 2]
    }

    /// The live segment from the last pivot to the head
    pub fn head_segment(&self) -> Segment {
        Segment::new(self.last_pivot(), self.position())
    }

    pub fn heading(&self) -> Option<Direction> {
        Direction::from_velocity(self.velocity)
    }

    /// Request a turn; only perpendicular turns are honored
    ///
    /// On acceptance the current position is frozen into the path as a pivot.
    pub fn turn(&mut self, direction: Direction, speed: Fp) -> TurnOutcome {
        let allowed = match direction.axis() {
            Axis::Horizontal => self.velocity.y != 0,
            Axis::Vertical => self.velocity.x != 0,
        };
        if !allowed {
            return TurnOutcome::NoChange;
        }

        let velocity = direction.velocity(speed);
        let pivot = self.position();
        self.velocity = velocity;
        self.carry = DVec2::ZERO;
        self.path.push(pivot);
        log::debug!("{} turned {:?} at {:?}", self.id, direction, pivot);
        TurnOutcome::NewVelocity(velocity)
    }

    /// Map a key press through this player's bindings and request the turn
    pub fn apply_key(&mut self, key: Key, speed: Fp) -> TurnOutcome {
        match self.bindings.direction_for(key) {
            Some(direction) => self.turn(direction, speed),
            None => TurnOutcome::NoChange,
        }
    }

    /// Move the head to a newly committed position
    pub(crate) fn commit_head(&mut self, head: Point, carry: DVec2) {
        let last = self.path.len() - 1;
        self.path[last] = head;
        self.carry = carry;
    }
}
