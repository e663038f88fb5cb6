//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Elapsed-time deltas only, no wall clock reads
//! - Seeded RNG only
//! - Stable iteration and filtering (no index mutation mid-traversal)
//! - No rendering or platform dependencies

pub mod behavior;
pub mod collide;
pub mod difficulty;
pub mod events;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use difficulty::WaveParams;
pub use events::GameEvent;
pub use rect::Rect;
pub use state::{
    ActiveEffects, Behavior, Bullet, Enemy, EnemyBullet, EnemyKind, EnemyStats, GamePhase,
    GameState, Particle, Player, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};
