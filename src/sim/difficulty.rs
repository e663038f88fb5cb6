//! Wave shape derivation from the level number
//!
//! Computed once when a wave is created and held constant for the wave's
//! lifetime; nothing here is re-read mid-wave.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Derived per-wave difficulty parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaveParams {
    /// Level this wave was derived from (1-based)
    pub level: u32,
    pub rows: u32,
    pub cols: u32,
    /// Multiplier on enemy sweep speed (and shoot rate)
    pub speed_multiplier: f32,
    /// Per-enemy shoot probability per reference frame, before kind modifiers
    pub shoot_chance: f32,
}

impl WaveParams {
    /// Derive the wave shape for a level. Rows grow every third level and
    /// columns every second, both capped; speed and shoot chance grow
    /// linearly without bound.
    pub fn for_level(level: u32, config: &GameConfig) -> Self {
        let past = level.max(1) - 1;
        Self {
            level,
            rows: (config.initial_rows + past / 3).min(config.max_rows),
            cols: (config.initial_cols + past / 2).min(config.max_cols),
            speed_multiplier: 1.0 + past as f32 * config.speed_increase_per_level,
            shoot_chance: config.base_shoot_chance
                + past as f32 * config.shoot_chance_increase_per_level,
        }
    }
}
