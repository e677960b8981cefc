//! Round settings
//!
//! Loaded from a JSON file; any missing field falls back to the classic
//! two-player setup.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, SPEED};
use crate::frame::colors;
use crate::sim::{Direction, KeyBindings};

/// Per-player setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    /// Start position (pixels, +y up)
    pub start: Vec2,
    /// Initial heading
    pub direction: Direction,
    /// Trail color (RGBA)
    pub color: [f32; 4],
    pub bindings: KeyBindings,
}

impl PlayerSettings {
    /// Bottom player: blue, A/D/W/S, moving up
    pub fn bottom() -> Self {
        Self {
            start: Vec2::new(300.0, 50.0),
            direction: Direction::Up,
            color: colors::BLUE,
            bindings: KeyBindings::WASD,
        }
    }

    /// Top player: yellow, arrow keys, moving down
    pub fn top() -> Self {
        Self {
            start: Vec2::new(300.0, 550.0),
            direction: Direction::Down,
            color: colors::YELLOW,
            bindings: KeyBindings::ARROWS,
        }
    }
}

/// Round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Window title for the frontend
    pub title: String,
    /// Arena size for the frontend (pixels)
    pub arena_width: f32,
    pub arena_height: f32,
    /// Cycle speed (pixels per second)
    pub speed: f32,
    /// Players in check order
    pub players: Vec<PlayerSettings>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            title: "Tron".to_string(),
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            speed: SPEED,
            players: vec![PlayerSettings::bottom(), PlayerSettings::top()],
        }
    }
}

impl GameSettings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).context("Invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("Bad settings in {}", path.display()))?;
        log::info!(
            "Loaded settings from {} ({} players)",
            path.display(),
            settings.players.len()
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the simulation cannot run
    pub fn validate(&self) -> Result<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            bail!("Speed must be a positive number, got {}", self.speed);
        }
        if self.players.is_empty() {
            bail!("At least one player is required");
        }

        let mut seen = HashSet::new();
        for (i, player) in self.players.iter().enumerate() {
            if !player.start.is_finite() {
                bail!("Player {} has a non-finite start position", i + 1);
            }
            for key in player.bindings.keys() {
                if !seen.insert(key) {
                    bail!("Key {:?} is bound more than once (player {})", key, i + 1);
                }
            }
        }
        Ok(())
    }
}
