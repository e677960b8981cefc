//! Per-frame output for an external renderer
//!
//! The renderer draws each trail as a connected line strip and shows the
//! status line. Everything here is in pixel space.

pub mod vertex;

pub use vertex::{Vertex, colors};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::point_to_pixels;
use crate::sim::{GamePhase, GameState, Player, PlayerId};

/// One player's trail as a line strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailStrip {
    pub player: PlayerId,
    pub color: [f32; 4],
    /// Pivots followed by the head
    pub points: Vec<Vec2>,
}

impl TrailStrip {
    pub fn from_player(player: &Player) -> Self {
        Self {
            player: player.id,
            color: player.color,
            points: player.path().iter().copied().map(point_to_pixels).collect(),
        }
    }

    pub fn head(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    /// Vertices ready for a line-strip draw call
    pub fn vertices(&self) -> Vec<Vertex> {
        self.points
            .iter()
            .map(|p| Vertex::new(p.x, p.y, self.color))
            .collect()
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub trails: Vec<TrailStrip>,
    /// HUD status line ("" while running)
    pub status: String,
    pub phase: GamePhase,
    pub time_ticks: u64,
    /// Clear color behind the trails
    pub background: [f32; 4],
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            trails: state.players.iter().map(TrailStrip::from_player).collect(),
            status: state.result.status_message(),
            phase: state.phase(),
            time_ticks: state.time_ticks,
            background: colors::BACKGROUND,
        }
    }

    /// All trails in one vertex buffer, with the strip ranges to draw
    pub fn vertex_buffer(&self) -> (Vec<Vertex>, Vec<std::ops::Range<u32>>) {
        let mut vertices = Vec::new();
        let mut ranges = Vec::with_capacity(self.trails.len());
        for trail in &self.trails {
            let start = vertices.len() as u32;
            vertices.extend(trail.vertices());
            ranges.push(start..vertices.len() as u32);
        }
        (vertices, ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameSettings;
    use crate::sim::{GameResult, Key, TickInput, tick};

    #[test]
    fn test_capture_initial_round() {
        let state = GameState::new(&GameSettings::default());
        let frame = FrameSnapshot::capture(&state);

        assert_eq!(frame.status, "");
        assert_eq!(frame.phase, GamePhase::Running);
        assert_eq!(frame.background, colors::BACKGROUND);
        assert_eq!(frame.trails.len(), 2);
        assert_eq!(frame.trails[0].color, colors::BLUE);
        assert_eq!(frame.trails[1].color, colors::YELLOW);
        assert_eq!(frame.trails[0].points, vec![Vec2::new(300.0, 50.0); 2]);
    }

    #[test]
    fn test_capture_after_turn_and_crash() {
        let mut state = GameState::new(&GameSettings::default());
        tick(&mut state, &TickInput::default(), 1.0);
        tick(&mut state, &TickInput::key(Key::Char('d')), 1.0);
        state.result = GameResult::Crashed {
            player: PlayerId(1),
            opponent: PlayerId(0),
        };

        let frame = FrameSnapshot::capture(&state);
        assert_eq!(frame.status, "P2 crashed");
        assert_eq!(frame.phase, GamePhase::Terminated);
        assert_eq!(
            frame.trails[0].points,
            vec![
                Vec2::new(300.0, 50.0),
                Vec2::new(300.0, 60.0),
                Vec2::new(310.0, 60.0)
            ]
        );
        assert_eq!(frame.trails[0].head(), Some(Vec2::new(310.0, 60.0)));
    }

    #[test]
    fn test_vertex_buffer_ranges() {
        let state = GameState::new(&GameSettings::default());
        let (vertices, ranges) = FrameSnapshot::capture(&state).vertex_buffer();
        assert_eq!(vertices.len(), 4);
        assert_eq!(ranges, vec![0..2, 2..4]);
        assert_eq!(vertices[2], Vertex::new(300.0, 550.0, colors::YELLOW));

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 4 * Vertex::STRIDE);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(&GameSettings::default());
        let json = serde_json::to_string(&FrameSnapshot::capture(&state)).unwrap();
        assert!(json.contains("\"status\":\"\""));
        assert!(json.contains("\"Running\""));
    }
}
