//! Data-driven game balance
//!
//! One flat configuration object covering the playfield, entity dimensions,
//! speeds, and difficulty growth. The simulation consumes it read-only; a
//! host can override individual fields via JSON (`#[serde(default)]` fills
//! the rest).
//!
//! Distances are logical pixels, speeds are pixels per second, and every
//! duration is wall-clock milliseconds so timer math stays correct under
//! variable frame intervals.

use serde::{Deserialize, Serialize};

/// Game balance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    /// Logical playfield width
    pub canvas_width: f32,
    /// Logical playfield height
    pub canvas_height: f32,
    /// Enemies flip their sweep direction this close to a side edge
    pub edge_margin: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal movement speed
    pub player_speed: f32,
    pub starting_lives: u32,
    pub max_health: i32,
    /// Health lost per enemy bullet hit
    pub damage_per_hit: i32,
    /// Post-hit grace period after losing a life
    pub invincibility_ms: f32,

    // === Player bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    /// Minimum interval between shots
    pub fire_cooldown_ms: f32,

    // === Enemies ===
    /// Base enemy size; per-kind scale is applied on top
    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Gap between grid cells
    pub enemy_padding: f32,
    /// Shared horizontal sweep speed before multipliers
    pub enemy_sweep_speed: f32,
    /// Downward shift when the wave reaches a side edge
    pub enemy_descent: f32,
    pub enemy_bullet_speed: f32,
    /// Top-left corner of the wave grid
    pub grid_origin_x: f32,
    pub grid_origin_y: f32,

    // === Difficulty growth ===
    pub initial_rows: u32,
    pub max_rows: u32,
    pub initial_cols: u32,
    pub max_cols: u32,
    /// Added to the wave speed multiplier per level past the first
    pub speed_increase_per_level: f32,
    /// Per-enemy shoot probability per reference frame at level 1
    pub base_shoot_chance: f32,
    pub shoot_chance_increase_per_level: f32,

    // === Power-ups ===
    /// Chance an enemy death drops a power-up
    pub powerup_drop_chance: f32,
    pub powerup_fall_speed: f32,
    pub powerup_size: f32,
    pub heal_amount: i32,
    pub shield_duration_ms: f32,
    pub rapid_fire_duration_ms: f32,
    pub triple_shot_duration_ms: f32,
    /// Flat score bonus from a bounty pickup
    pub bounty_points: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 500.0,
            edge_margin: 10.0,

            player_width: 60.0,
            player_height: 50.0,
            player_speed: 420.0,
            starting_lives: 3,
            max_health: 100,
            damage_per_hit: 20,
            invincibility_ms: 2000.0,

            bullet_width: 6.0,
            bullet_height: 15.0,
            bullet_speed: 480.0,
            fire_cooldown_ms: 300.0,

            enemy_width: 45.0,
            enemy_height: 40.0,
            enemy_padding: 10.0,
            enemy_sweep_speed: 90.0,
            enemy_descent: 25.0,
            enemy_bullet_speed: 300.0,
            grid_origin_x: 50.0,
            grid_origin_y: 50.0,

            initial_rows: 4,
            max_rows: 6,
            initial_cols: 8,
            max_cols: 10,
            speed_increase_per_level: 0.3,
            base_shoot_chance: 0.002,
            shoot_chance_increase_per_level: 0.0005,

            powerup_drop_chance: 0.15,
            powerup_fall_speed: 120.0,
            powerup_size: 24.0,
            heal_amount: 25,
            shield_duration_ms: 5000.0,
            rapid_fire_duration_ms: 6000.0,
            triple_shot_duration_ms: 7000.0,
            bounty_points: 100,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON text. Missing fields take their defaults, so
    /// hosts can ship partial override files.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize the full config to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Y coordinate of the player's top edge (the "player row")
    pub fn player_row(&self) -> f32 {
        self.canvas_height - self.player_height - 20.0
    }
}
