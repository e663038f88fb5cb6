//! Discrete notifications for the UI sink
//!
//! Accumulated on the state during a tick (or by external phase transitions)
//! and drained by the caller; the HUD reacts to these rather than diffing
//! snapshots.

use super::state::{EnemyKind, PowerUpKind};

/// A discrete game event, delivered once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh session entered Running
    Started,
    /// Wave cleared; simulation halts until an external advance
    LevelComplete { level: u32 },
    /// Run ended, with the final score
    GameOver { score: u64 },
    Paused,
    Resumed,
    /// A life was consumed; health has been reset if any remain
    LifeLost { remaining: u32 },
    EnemyDestroyed { kind: EnemyKind, points: u64 },
    PowerUpCollected { kind: PowerUpKind },
}
