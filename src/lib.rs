//! Tron - two-player light-cycle game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, trail collisions, tick engine)
//! - `runner`: Fixed-timestep driver for a frame loop
//! - `frame`: Per-frame snapshot handed to an external renderer
//! - `settings`: Round configuration (speed, start positions, key bindings)

pub mod frame;
pub mod runner;
pub mod settings;
pub mod sim;

pub use frame::FrameSnapshot;
pub use runner::Round;
pub use settings::{GameSettings, PlayerSettings};

use glam::{I64Vec2, Vec2};

/// Fixed-point scalar (16 fractional bits, 65536 = one pixel)
pub type Fp = i64;

/// Game configuration constants
pub mod consts {
    use super::Fp;

    /// Fixed-point fractional bits
    pub const FRAC: u32 = 16;
    /// One pixel in fixed-point units
    pub const ONE: Fp = 1 << FRAC;

    /// Default light-cycle speed (pixels per second)
    pub const SPEED: f32 = 10.0;

    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the runner will simulate in one go (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 600.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
}

/// Convert pixels to fixed-point (round to nearest)
#[inline]
pub fn to_fixed(v: f32) -> Fp {
    (v as f64 * consts::ONE as f64).round() as Fp
}

/// Convert fixed-point to pixels
#[inline]
pub fn to_pixels(v: Fp) -> f32 {
    (v as f64 / consts::ONE as f64) as f32
}

/// Convert a pixel-space point to a fixed-point point
#[inline]
pub fn point_from_pixels(p: Vec2) -> I64Vec2 {
    I64Vec2::new(to_fixed(p.x), to_fixed(p.y))
}

/// Convert a fixed-point point to pixel space
#[inline]
pub fn point_to_pixels(p: I64Vec2) -> Vec2 {
    Vec2::new(to_pixels(p.x), to_pixels(p.y))
}
