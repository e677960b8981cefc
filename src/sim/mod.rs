//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-point coordinates only (exact orientation tests)
//! - Stable iteration order (by player index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{collides, first_hit, self_check_path};
pub use geometry::{Orientation, Point, Segment, on_segment, orientation, segments_intersect};
pub use player::{Axis, Direction, Key, KeyBindings, Player, PlayerId, TurnOutcome, Velocity};
pub use state::{Crash, GameEvent, GamePhase, GameResult, GameState, TurnRequest};
pub use tick::{TickInput, TickOutcome, tick};
