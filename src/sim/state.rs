//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one [`GameState`] aggregate so
//! a session is reproducible from a seed and testable without a rendering
//! surface. Renderers receive `&GameState` and must not mutate it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::WaveParams;
use super::events::GameEvent;
use super::rect::Rect;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, awaiting an external start
    Start,
    /// Active simulation
    Running,
    /// Frozen mid-wave; only reachable from Running
    Paused,
    /// Wave cleared, awaiting an external advance to the next level
    LevelComplete,
    /// Run ended; restart returns to a fresh session
    GameOver,
}

/// Per-tick movement/shoot rule selector for an enemy kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Shared horizontal sweep only
    Sweep,
    /// Sinusoidal vertical oscillation on top of the sweep
    Zigzag,
    /// Nudges horizontally toward the player outside a deadband
    Tracker,
    /// Periodic instantaneous downward dash on a randomized cooldown
    Dasher,
    /// No extra motion; fires a heavy bullet
    Bomber,
}

/// Static stat row for an enemy kind
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub points: u64,
    pub max_health: i32,
    /// Multiplier on the shared sweep speed
    pub speed_mod: f32,
    /// Multiplier on the shoot probability
    pub shoot_mod: f32,
    /// Multiplier on the base enemy size
    pub size_scale: f32,
    pub behavior: Behavior,
    /// Palette id for the renderer and particle tinting
    pub color: u32,
}

/// Enemy kinds, ordered roughly by toughness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Balanced line trooper
    Drone,
    /// Fast and fragile, weaves vertically
    Darter,
    /// Fast, lunges downward in bursts
    Striker,
    /// Shadows the player's column
    Seeker,
    /// Slow, soaks hits
    Tank,
    /// Slow, fires heavy bullets
    Bomber,
}

impl EnemyKind {
    pub fn stats(&self) -> &'static EnemyStats {
        match self {
            EnemyKind::Drone => &EnemyStats {
                points: 10,
                max_health: 1,
                speed_mod: 1.0,
                shoot_mod: 1.0,
                size_scale: 1.0,
                behavior: Behavior::Sweep,
                color: 0,
            },
            EnemyKind::Darter => &EnemyStats {
                points: 15,
                max_health: 1,
                speed_mod: 1.3,
                shoot_mod: 0.8,
                size_scale: 0.85,
                behavior: Behavior::Zigzag,
                color: 1,
            },
            EnemyKind::Striker => &EnemyStats {
                points: 25,
                max_health: 1,
                speed_mod: 1.2,
                shoot_mod: 0.9,
                size_scale: 0.9,
                behavior: Behavior::Dasher,
                color: 2,
            },
            EnemyKind::Seeker => &EnemyStats {
                points: 20,
                max_health: 2,
                speed_mod: 1.0,
                shoot_mod: 1.1,
                size_scale: 1.0,
                behavior: Behavior::Tracker,
                color: 3,
            },
            EnemyKind::Tank => &EnemyStats {
                points: 30,
                max_health: 3,
                speed_mod: 0.6,
                shoot_mod: 0.7,
                size_scale: 1.2,
                behavior: Behavior::Sweep,
                color: 4,
            },
            EnemyKind::Bomber => &EnemyStats {
                points: 25,
                max_health: 2,
                speed_mod: 0.7,
                shoot_mod: 1.3,
                size_scale: 1.15,
                behavior: Behavior::Bomber,
                color: 5,
            },
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    /// Dead enemies are skipped by movement, shooting, and collision, then
    /// pruned after collision resolution
    pub alive: bool,
    /// Zigzag oscillation phase accumulator
    pub phase: f32,
    /// Time accumulated toward the next dash
    pub dash_timer_ms: f32,
    /// Randomized interval between dashes
    pub dash_cooldown_ms: f32,
    /// Remaining "just hit" flash, for the renderer only
    pub hit_flash_ms: f32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }
}

/// A player bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    /// Mostly upward; spread shots carry a horizontal component
    pub vel: Vec2,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// An enemy bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward, plus a horizontal tracking component for seekers
    pub vel: Vec2,
    /// Palette id inherited from the shooter
    pub color: u32,
}

impl EnemyBullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Restores a fixed amount of health, capped at max
    Heal,
    /// Enemy bullets are absorbed harmlessly while active
    Shield,
    /// Fire cooldown divided by 2.5 while active
    RapidFire,
    /// Three bullets per shot while active
    TripleShot,
    /// Clears every enemy bullet on pickup
    Bomb,
    /// Flat score bonus on pickup
    Bounty,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Heal,
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::TripleShot,
        PowerUpKind::Bomb,
        PowerUpKind::Bounty,
    ];

    /// Palette id for rendering and explosion tinting
    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::Heal => 10,
            PowerUpKind::Shield => 11,
            PowerUpKind::RapidFire => 12,
            PowerUpKind::TripleShot => 13,
            PowerUpKind::Bomb => 14,
            PowerUpKind::Bounty => 15,
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A cosmetic particle; no gameplay effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 1.0 -> 0.0, culled at zero
    pub life: f32,
    pub size: f32,
}

/// Active timed power-up effects, remaining duration in milliseconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub shield_ms: f32,
    pub rapid_fire_ms: f32,
    pub triple_shot_ms: f32,
}

impl ActiveEffects {
    pub fn shield_active(&self) -> bool {
        self.shield_ms > 0.0
    }

    pub fn rapid_fire_active(&self) -> bool {
        self.rapid_fire_ms > 0.0
    }

    pub fn triple_shot_active(&self) -> bool {
        self.triple_shot_ms > 0.0
    }

    /// Count down all timers, floored at zero
    pub fn advance(&mut self, dt_ms: f32) {
        self.shield_ms = (self.shield_ms - dt_ms).max(0.0);
        self.rapid_fire_ms = (self.rapid_fire_ms - dt_ms).max(0.0);
        self.triple_shot_ms = (self.triple_shot_ms - dt_ms).max(0.0);
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub lives: u32,
    pub effects: ActiveEffects,
    /// Post-hit grace period; enemy bullets are destroyed harmlessly while > 0
    pub invincible_ms: f32,
    /// Remaining time until the next shot is allowed
    pub fire_cooldown_ms: f32,
}

impl Player {
    fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                (config.canvas_width - config.player_width) / 2.0,
                config.player_row(),
            ),
            size: Vec2::new(config.player_width, config.player_height),
            health: config.max_health,
            lives: config.starting_lives,
            effects: ActiveEffects::default(),
            invincible_ms: 0.0,
            fire_cooldown_ms: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }
}

fn session_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state (deterministic, serializable)
///
/// The RNG is rebuilt from a fixed seed on deserialization, so replays are
/// only bit-exact within a single session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    #[serde(skip, default = "session_rng")]
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Current level number (1-based)
    pub level: u32,
    pub score: u64,
    /// Derived wave shape, recomputed only when a wave is created
    pub wave: WaveParams,
    /// Shared sweep direction: +1 right, -1 left
    pub sweep_dir: f32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub shots: Vec<Bullet>,
    pub enemy_shots: Vec<EnemyBullet>,
    pub powerups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending notifications for the UI sink, drained each tick
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle session awaiting [`GameState::start_game`]
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            level: 1,
            score: 0,
            wave: WaveParams::for_level(1, config),
            sweep_dir: 1.0,
            player: Player::new(config),
            enemies: Vec::new(),
            shots: Vec::new(),
            enemy_shots: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain pending UI notifications
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a fresh session: resets score, lives, health, timers, and all
    /// entity lists, then spawns wave 1 and enters Running. Also serves as
    /// restart after a game over.
    pub fn start_game(&mut self, config: &GameConfig) {
        self.level = 1;
        self.score = 0;
        self.player = Player::new(config);
        self.shots.clear();
        self.enemy_shots.clear();
        self.powerups.clear();
        self.particles.clear();
        self.time_ticks = 0;
        super::spawn::spawn_wave(self, config);
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::Started);
        log::info!("Session started (seed {})", self.seed);
    }

    /// Advance from LevelComplete to the next wave. Score, health, lives,
    /// and active effects carry over.
    pub fn advance_level(&mut self, config: &GameConfig) {
        if self.phase != GamePhase::LevelComplete {
            return;
        }
        self.level += 1;
        self.shots.clear();
        self.enemy_shots.clear();
        super::spawn::spawn_wave(self, config);
        self.phase = GamePhase::Running;
        log::info!("Advancing to level {}", self.level);
    }

    /// True if at least one enemy in the current wave is alive
    pub fn any_enemy_alive(&self) -> bool {
        self.enemies.iter().any(|e| e.alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let config = GameConfig::default();
        let state = GameState::new(7, &config);
        assert_eq!(state.phase, GamePhase::Start);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.lives, config.starting_lives);
        assert_eq!(state.player.health, config.max_health);
    }

    #[test]
    fn test_start_game_spawns_wave_and_runs() {
        let config = GameConfig::default();
        let mut state = GameState::new(7, &config);
        state.start_game(&config);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(
            state.enemies.len() as u32,
            config.initial_rows * config.initial_cols
        );
        assert!(state.any_enemy_alive());
    }

    #[test]
    fn test_advance_level_preserves_session() {
        let config = GameConfig::default();
        let mut state = GameState::new(7, &config);
        state.start_game(&config);
        state.score = 440;
        state.player.health = 60;
        state.phase = GamePhase::LevelComplete;

        state.advance_level(&config);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 440);
        assert_eq!(state.player.health, 60);
    }

    #[test]
    fn test_advance_level_requires_level_complete() {
        let config = GameConfig::default();
        let mut state = GameState::new(7, &config);
        state.start_game(&config);
        state.advance_level(&config);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_effects_advance_floors_at_zero() {
        let mut effects = ActiveEffects {
            shield_ms: 100.0,
            rapid_fire_ms: 0.0,
            triple_shot_ms: 50.0,
        };
        effects.advance(75.0);
        assert_eq!(effects.shield_ms, 25.0);
        assert_eq!(effects.rapid_fire_ms, 0.0);
        assert!(effects.shield_active());
        assert!(!effects.triple_shot_active());
    }

    #[test]
    fn test_entity_ids_increment() {
        let config = GameConfig::default();
        let mut state = GameState::new(7, &config);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
