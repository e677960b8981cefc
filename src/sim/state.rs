//! Round state: players, outcome and events
//!
//! The tick loop owns a `GameState` and passes it explicitly to input,
//! tick and snapshot functions.

use serde::{Deserialize, Serialize};

use super::geometry::Point;
use super::player::{Direction, Key, Player, PlayerId, TurnOutcome};
use crate::settings::GameSettings;
use crate::{Fp, point_from_pixels, to_fixed};

/// Round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Players are moving
    Running,
    /// Someone crashed, the round is over
    Terminated,
}

/// A crash detected during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crash {
    /// Player whose candidate segment hit a trail
    pub player: PlayerId,
    /// Owner of the trail that was hit (`player` itself for a self-crash)
    pub into: PlayerId,
}

impl Crash {
    pub fn is_self(&self) -> bool {
        self.player == self.into
    }
}

/// Round outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameResult {
    #[default]
    InProgress,
    /// `player` ran into `opponent`'s trail
    Crashed { player: PlayerId, opponent: PlayerId },
    /// `player` ran into its own trail
    SelfCrashed { player: PlayerId },
}

impl GameResult {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    /// Short status line for the HUD
    pub fn status_message(&self) -> String {
        match self {
            GameResult::InProgress => String::new(),
            GameResult::Crashed { player, .. } => format!("{player} crashed"),
            GameResult::SelfCrashed { player } => format!("{player} self-crash"),
        }
    }
}

impl From<Crash> for GameResult {
    fn from(crash: Crash) -> Self {
        if crash.is_self() {
            GameResult::SelfCrashed {
                player: crash.player,
            }
        } else {
            GameResult::Crashed {
                player: crash.player,
                opponent: crash.into,
            }
        }
    }
}

/// A logical turn request tagged with its player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRequest {
    pub player: PlayerId,
    pub direction: Direction,
}

/// Things that happened since the frontend last drained events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A turn was accepted and `pivot` frozen into the trail
    Turned {
        player: PlayerId,
        direction: Direction,
        pivot: Point,
    },
    Crashed(Crash),
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Settings the round was created from (used by `reset`)
    pub settings: GameSettings,
    /// Cycle speed in fixed-point units per second
    pub speed: Fp,
    /// Players, in check order
    pub players: Vec<Player>,
    /// Round outcome
    pub result: GameResult,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending events for the frontend
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new round from settings
    pub fn new(settings: &GameSettings) -> Self {
        let speed = to_fixed(settings.speed);
        let players = settings
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Player::new(
                    PlayerId(i),
                    p.color,
                    p.bindings,
                    point_from_pixels(p.start),
                    p.direction,
                    speed,
                )
            })
            .collect::<Vec<_>>();

        log::info!(
            "New round: {} players, speed {} px/s",
            players.len(),
            settings.speed
        );

        Self {
            settings: settings.clone(),
            speed,
            players,
            result: GameResult::InProgress,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Start a fresh round with the same settings
    pub fn reset(&mut self) {
        *self = Self::new(&self.settings);
    }

    pub fn phase(&self) -> GamePhase {
        if self.result.is_over() {
            GamePhase::Terminated
        } else {
            GamePhase::Running
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Route a key press to every player bound to it
    pub fn key_pressed(&mut self, key: Key) {
        if self.result.is_over() {
            return;
        }
        for i in 0..self.players.len() {
            if let Some(direction) = self.players[i].bindings.direction_for(key) {
                self.apply_turn(PlayerId(i), direction);
            }
        }
    }

    /// Apply a player-tagged turn request
    pub fn request_turn(&mut self, request: TurnRequest) {
        if self.result.is_over() {
            return;
        }
        if self.player(request.player).is_none() {
            log::warn!("Turn request for unknown player {}", request.player);
            return;
        }
        self.apply_turn(request.player, request.direction);
    }

    fn apply_turn(&mut self, id: PlayerId, direction: Direction) {
        let speed = self.speed;
        let player = &mut self.players[id.0];
        if let TurnOutcome::NewVelocity(_) = player.turn(direction, speed) {
            let pivot = player.position();
            self.events.push(GameEvent::Turned {
                player: id,
                direction,
                pivot,
            });
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
