//! Simulation tick
//!
//! Advances every player one step, tests each candidate segment against
//! all trails and decides whether the round is over.

use glam::{DVec2, I64Vec2};

use super::collision::{first_hit, self_check_path};
use super::geometry::{Point, Segment, segments_intersect};
use super::player::{Key, PlayerId, Velocity};
use super::state::{Crash, GameEvent, GameResult, GameState, TurnRequest};

/// Input collected between two ticks, applied before any motion
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Physical key presses, routed through each player's bindings
    pub keys: Vec<Key>,
    /// Player-tagged logical turns
    pub turns: Vec<TurnRequest>,
}

impl TickInput {
    pub fn key(key: Key) -> Self {
        Self {
            keys: vec![key],
            ..Default::default()
        }
    }
}

/// What a tick left the round in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Terminated(GameResult),
}

impl TickOutcome {
    pub fn is_over(&self) -> bool {
        matches!(self, TickOutcome::Terminated(_))
    }
}

/// Motion over `dt` seconds in whole fixed-point units, plus the new carry
///
/// The sub-unit remainder is carried into the next tick so the cycle covers
/// exactly `speed * elapsed` over time. Zero, negative or non-finite `dt`
/// means no motion.
fn displacement(velocity: Velocity, carry: DVec2, dt: f32) -> (I64Vec2, DVec2) {
    if !dt.is_finite() || dt <= 0.0 {
        return (I64Vec2::ZERO, carry);
    }
    let exact = velocity.as_dvec2() * dt as f64 + carry;
    let step = exact.round();
    (step.as_i64vec2(), exact - step)
}

/// Advance the round by one timestep of `dt` seconds
///
/// Every head is committed even on the tick a crash is found, so crashed
/// cycles overshoot by one step. After that the round is frozen.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickOutcome {
    if state.result.is_over() {
        return TickOutcome::Terminated(state.result);
    }

    for &key in &input.keys {
        state.key_pressed(key);
    }
    for &turn in &input.turns {
        state.request_turn(turn);
    }

    state.time_ticks += 1;

    let moves: Vec<(Point, DVec2)> = state
        .players
        .iter()
        .map(|p| {
            let (step, carry) = displacement(p.velocity, p.carry(), dt);
            (p.position().saturating_add(step), carry)
        })
        .collect();
    let heads: Vec<Point> = moves.iter().map(|&(head, _)| head).collect();

    let crashes = detect_crashes(state, &heads);

    for (player, &(head, carry)) in state.players.iter_mut().zip(&moves) {
        log::trace!("{} head {:?} -> {:?}", player.id, player.position(), head);
        player.commit_head(head, carry);
    }

    let Some(&first) = crashes.first() else {
        return TickOutcome::Running;
    };

    for crash in &crashes[1..] {
        log::warn!(
            "Tick {}: {} also crashed into {}",
            state.time_ticks,
            crash.player,
            crash.into
        );
    }
    state
        .events
        .extend(crashes.iter().copied().map(GameEvent::Crashed));

    state.result = GameResult::from(first);
    log::info!(
        "Round over after {} ticks: {}",
        state.time_ticks,
        state.result.status_message()
    );
    TickOutcome::Terminated(state.result)
}

/// Check each player's candidate segment against every trail, in index order
///
/// Opponent trails include their own move this tick, so two cycles
/// crossing within the same step cannot slip through each other.
fn detect_crashes(state: &GameState, heads: &[Point]) -> Vec<Crash> {
    let mut crashes = Vec::new();

    for (i, player) in state.players.iter().enumerate() {
        let candidate = Segment::new(heads[i], player.position());

        for (j, other) in state.players.iter().enumerate() {
            let hit = if i == j {
                first_hit(&candidate, self_check_path(player.path()))
            } else {
                // The opponent's live edge is extended to its new head
                let live_edge = other.path().len() - 2;
                first_hit(&candidate, other.path()).or_else(|| {
                    let extension = Segment::new(heads[j], other.position());
                    segments_intersect(&candidate, &extension).then_some(live_edge)
                })
            };

            if let Some(edge) = hit {
                log::info!(
                    "Tick {}: {} hit edge {} of {}'s trail",
                    state.time_ticks,
                    player.id,
                    edge,
                    other.id
                );
                crashes.push(Crash {
                    player: PlayerId(i),
                    into: PlayerId(j),
                });
            }
        }
    }

    crashes
}
