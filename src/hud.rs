//! Read-only display snapshot for the UI layer
//!
//! The HUD reads one of these per tick; discrete transitions (game over,
//! level complete, pause) arrive separately as [`crate::sim::GameEvent`]s.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::sim::{GamePhase, GameState};

/// Display-facing numbers, sampled once per tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HudState {
    pub score: u64,
    pub lives: u32,
    /// 0.0..=1.0 of max health
    pub health_percent: f32,
    pub level: u32,
    pub phase: GamePhase,
    /// Remaining durations of the timed effects, zero when inactive
    pub shield_ms: f32,
    pub rapid_fire_ms: f32,
    pub triple_shot_ms: f32,
}

impl GameState {
    /// Snapshot the HUD numbers; never mutates
    pub fn hud(&self, config: &GameConfig) -> HudState {
        HudState {
            score: self.score,
            lives: self.player.lives,
            health_percent: (self.player.health as f32 / config.max_health.max(1) as f32)
                .clamp(0.0, 1.0),
            level: self.level,
            phase: self.phase,
            shield_ms: self.player.effects.shield_ms,
            rapid_fire_ms: self.player.effects.rapid_fire_ms,
            triple_shot_ms: self.player.effects.triple_shot_ms,
        }
    }
}
