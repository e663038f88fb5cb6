//! Nova Invaders - a wave-defense arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `config`: Data-driven game balance, consumed read-only by the sim
//! - `hud`: Read-only display snapshot for the UI layer
//!
//! Rendering, input-device capture, and screen wiring are external
//! collaborators: they feed a [`sim::TickInput`] snapshot into each tick and
//! read entity state and [`sim::GameEvent`]s back out.

pub mod config;
pub mod hud;
pub mod sim;

pub use config::GameConfig;
pub use hud::HudState;

/// Simulation framework constants
pub mod consts {
    /// Reference frame duration at 60 Hz (milliseconds). Per-tick probability
    /// trials scale by `dt_ms / REFERENCE_FRAME_MS` so rates stay stable
    /// under variable frame intervals.
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;

    /// Maximum live particles; oldest are evicted first
    pub const MAX_PARTICLES: usize = 256;
    /// Per-tick particle velocity damping
    pub const PARTICLE_DRAG: f32 = 0.98;
    /// Particle life drain per second (life runs 1.0 -> 0.0)
    pub const PARTICLE_FADE_PER_SEC: f32 = 1.2;
    /// Particles below this size are culled
    pub const PARTICLE_MIN_SIZE: f32 = 0.5;

    /// Palette id for white sparkle particles (secondary explosion burst)
    pub const COLOR_SPARKLE: u32 = 99;
    /// Palette id for the player ship
    pub const COLOR_PLAYER: u32 = 6;
    /// Palette id for player bullets / muzzle flash
    pub const COLOR_BULLET: u32 = 7;
}
