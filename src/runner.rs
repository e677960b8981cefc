//! Fixed-timestep driver
//!
//! Frontends call `advance` once per rendered frame with the wall-clock
//! frame time; the simulation itself only ever sees `SIM_DT` steps.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::frame::FrameSnapshot;
use crate::settings::GameSettings;
use crate::sim::{GameState, TickInput, TickOutcome, tick};

/// A round plus its timestep accumulator
#[derive(Debug, Clone)]
pub struct Round {
    pub state: GameState,
    accumulator: f32,
}

impl Round {
    pub fn new(settings: &GameSettings) -> Self {
        Self {
            state: GameState::new(settings),
            accumulator: 0.0,
        }
    }

    /// Run simulation ticks for one frame
    ///
    /// `input` is applied on the first substep only, so a key press is
    /// never seen twice.
    pub fn advance(&mut self, frame_dt: f32, input: &TickInput) -> TickOutcome {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut pending = Some(input);
        let mut outcome = self.outcome();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let step_input = pending.take().cloned().unwrap_or_default();
            outcome = tick(&mut self.state, &step_input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            if outcome.is_over() {
                self.accumulator = 0.0;
                break;
            }
        }
        if substeps == MAX_SUBSTEPS {
            // Capped frame: drop the backlog, keep only the partial step
            self.accumulator %= SIM_DT;
        }

        // Frame too short for a step: turns still land before the next tick
        if let Some(input) = pending {
            for &key in &input.keys {
                self.state.key_pressed(key);
            }
            for &turn in &input.turns {
                self.state.request_turn(turn);
            }
        }

        outcome
    }

    /// Step until the round ends or `max_ticks` have run
    pub fn run_until_over(&mut self, max_ticks: u64) -> TickOutcome {
        let mut outcome = self.outcome();
        while !outcome.is_over() && self.state.time_ticks < max_ticks {
            outcome = tick(&mut self.state, &TickInput::default(), SIM_DT);
        }
        outcome
    }

    pub fn outcome(&self) -> TickOutcome {
        if self.state.result.is_over() {
            TickOutcome::Terminated(self.state.result)
        } else {
            TickOutcome::Running
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state)
    }

    /// Start over with the same settings
    pub fn restart(&mut self) {
        self.state.reset();
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Direction, Key, PlayerId};

    #[test]
    fn test_advance_steps_by_accumulated_time() {
        let mut round = Round::new(&GameSettings::default());
        round.advance(SIM_DT * 3.5, &TickInput::default());
        assert_eq!(round.state.time_ticks, 3);
        round.advance(SIM_DT * 0.75, &TickInput::default());
        assert_eq!(round.state.time_ticks, 4);
    }

    #[test]
    fn test_long_frames_are_capped() {
        let mut round = Round::new(&GameSettings::default());
        round.advance(5.0, &TickInput::default());
        assert_eq!(round.state.time_ticks, MAX_SUBSTEPS as u64);

        let mut round = Round::new(&GameSettings::default());
        round.advance(f32::NAN, &TickInput::default());
        round.advance(-1.0, &TickInput::default());
        assert_eq!(round.state.time_ticks, 0);
    }

    #[test]
    fn test_capped_frames_do_not_build_a_backlog() {
        let mut round = Round::new(&GameSettings::default());
        for _ in 0..20 {
            round.advance(MAX_FRAME_DT, &TickInput::default());
            assert!(round.accumulator < SIM_DT);
        }
        assert_eq!(round.state.time_ticks, 20 * MAX_SUBSTEPS as u64);

        // A short frame afterwards runs at most one step
        round.advance(SIM_DT * 0.75, &TickInput::default());
        assert!(round.state.time_ticks <= 20 * MAX_SUBSTEPS as u64 + 1);
    }

    #[test]
    fn test_input_applied_once() {
        let mut round = Round::new(&GameSettings::default());
        round.advance(SIM_DT * 4.0, &TickInput::key(Key::Char('a')));
        let p1 = &round.state.players[0];
        assert_eq!(p1.heading(), Some(Direction::Left));
        assert_eq!(p1.path().len(), 3);
    }

    #[test]
    fn test_input_on_short_frame_not_lost() {
        let mut round = Round::new(&GameSettings::default());
        round.advance(SIM_DT * 0.25, &TickInput::key(Key::Right));
        assert_eq!(round.state.time_ticks, 0);
        let p2 = round.state.player(PlayerId(1)).unwrap();
        assert_eq!(p2.heading(), Some(Direction::Right));
    }

    #[test]
    fn test_run_until_over_head_on() {
        let mut settings = GameSettings::default();
        settings.speed = 240.0;
        let mut round = Round::new(&settings);
        let outcome = round.run_until_over(10_000);
        assert!(outcome.is_over());
        assert_eq!(round.snapshot().status, "P1 crashed");

        // Frozen afterwards
        let ticks = round.state.time_ticks;
        assert_eq!(round.advance(0.05, &TickInput::default()), outcome);
        assert_eq!(round.state.time_ticks, ticks);

        round.restart();
        assert_eq!(round.outcome(), TickOutcome::Running);
    }

    #[test]
    fn test_run_until_over_respects_cap() {
        let mut round = Round::new(&GameSettings::default());
        assert_eq!(round.run_until_over(10), TickOutcome::Running);
        assert_eq!(round.state.time_ticks, 10);
    }
}
