//! Entity factories
//!
//! Construction of waves, projectiles, power-ups, and particle bursts.
//! Gameplay randomness (drop rolls, dash cooldowns, power-up kinds) draws
//! from the state-owned RNG; cosmetic particle scatter uses an integer hash
//! keyed off the tick counter so bursts stay cheap and deterministic.

use glam::Vec2;
use rand::Rng;

use super::behavior::DASH_COOLDOWN_MS;
use super::state::{
    Behavior, Bullet, Enemy, EnemyBullet, EnemyKind, GameState, Particle, Player, PowerUp,
    PowerUpKind,
};
use crate::config::GameConfig;
use crate::consts::{COLOR_BULLET, COLOR_SPARKLE, MAX_PARTICLES};
use crate::sim::difficulty::WaveParams;

/// Horizontal velocity of the two angled bullets in a triple shot
const TRIPLE_SPREAD_VX: f32 = 120.0;
/// Horizontal homing velocity cap for tracker bullets
const TRACK_VX_MAX: f32 = 120.0;
/// Fraction of the player offset converted to tracker bullet velocity
const TRACK_FACTOR: f32 = 0.6;
/// Bomber bullets are this much faster than the base enemy bullet
const BOMBER_SPEED_SCALE: f32 = 1.4;

/// Pick the enemy kind for a grid cell. Rows index from the top; the bottom
/// rows lead the descent, so the front third gets the fast fragile kinds,
/// the middle third the balanced ones, and the back third the slow tough
/// ones, alternating by column within each zone.
fn kind_for_cell(row: u32, rows: u32, col: u32) -> EnemyKind {
    let zone = if rows <= 1 { 2 } else { row * 3 / rows };
    match zone {
        2 => {
            if col % 2 == 0 {
                EnemyKind::Darter
            } else {
                EnemyKind::Striker
            }
        }
        1 => {
            if col % 2 == 0 {
                EnemyKind::Drone
            } else {
                EnemyKind::Seeker
            }
        }
        _ => {
            if col % 2 == 0 {
                EnemyKind::Tank
            } else {
                EnemyKind::Bomber
            }
        }
    }
}

/// Create the wave for the current level: derives fresh [`WaveParams`],
/// lays enemies out in a padded grid, and resets the sweep direction.
pub fn spawn_wave(state: &mut GameState, config: &GameConfig) {
    state.wave = WaveParams::for_level(state.level, config);
    state.sweep_dir = 1.0;
    state.enemies.clear();

    let cell = Vec2::new(
        config.enemy_width + config.enemy_padding,
        config.enemy_height + config.enemy_padding,
    );
    let origin = Vec2::new(config.grid_origin_x, config.grid_origin_y);
    let base_size = Vec2::new(config.enemy_width, config.enemy_height);

    for row in 0..state.wave.rows {
        for col in 0..state.wave.cols {
            let kind = kind_for_cell(row, state.wave.rows, col);
            let stats = kind.stats();
            let size = base_size * stats.size_scale;
            // Center scaled enemies within their cell to keep the grid even
            let pos = origin + Vec2::new(col as f32, row as f32) * cell + (base_size - size) / 2.0;
            let id = state.next_entity_id();
            let dash_cooldown_ms = state.rng.random_range(DASH_COOLDOWN_MS);
            state.enemies.push(Enemy {
                id,
                kind,
                pos,
                size,
                health: stats.max_health,
                alive: true,
                phase: state.rng.random_range(0.0..std::f32::consts::TAU),
                dash_timer_ms: 0.0,
                dash_cooldown_ms,
                hit_flash_ms: 0.0,
            });
        }
    }

    log::info!(
        "Spawned wave for level {}: {}x{} enemies, speed x{:.1}",
        state.wave.level,
        state.wave.rows,
        state.wave.cols,
        state.wave.speed_multiplier
    );
}

/// Fire the player's gun if the cooldown allows: one bullet normally, three
/// under triple-shot. Resets the cooldown (divided by 2.5 under rapid-fire)
/// and emits a small muzzle flash.
pub fn fire_player_shots(state: &mut GameState, config: &GameConfig) {
    if state.player.fire_cooldown_ms > 0.0 {
        return;
    }
    state.player.fire_cooldown_ms = if state.player.effects.rapid_fire_active() {
        config.fire_cooldown_ms / 2.5
    } else {
        config.fire_cooldown_ms
    };

    let size = Vec2::new(config.bullet_width, config.bullet_height);
    let muzzle = Vec2::new(
        state.player.center().x - size.x / 2.0,
        state.player.pos.y - size.y,
    );
    let up = Vec2::new(0.0, -config.bullet_speed);

    if state.player.effects.triple_shot_active() {
        for vx in [-TRIPLE_SPREAD_VX, 0.0, TRIPLE_SPREAD_VX] {
            state.shots.push(Bullet {
                pos: muzzle,
                size,
                vel: up + Vec2::new(vx, 0.0),
            });
        }
    } else {
        state.shots.push(Bullet {
            pos: muzzle,
            size,
            vel: up,
        });
    }

    spawn_particles(state, muzzle + size / 2.0, COLOR_BULLET, 3);
}

/// Build the bullet an enemy fires. Shape and speed follow the behavior tag:
/// trackers lead toward the player, bombers drop a heavy fast shell.
pub fn enemy_shot(enemy: &Enemy, player: &Player, config: &GameConfig) -> EnemyBullet {
    let stats = enemy.kind.stats();
    let (size, vel) = match stats.behavior {
        Behavior::Bomber => (
            Vec2::new(12.0, 18.0),
            Vec2::new(0.0, config.enemy_bullet_speed * BOMBER_SPEED_SCALE),
        ),
        Behavior::Tracker => {
            let dx = player.center().x - enemy.center().x;
            let vx = (dx * TRACK_FACTOR).clamp(-TRACK_VX_MAX, TRACK_VX_MAX);
            (Vec2::new(8.0, 12.0), Vec2::new(vx, config.enemy_bullet_speed))
        }
        _ => (
            Vec2::new(8.0, 12.0),
            Vec2::new(0.0, config.enemy_bullet_speed),
        ),
    };
    let center_x = enemy.center().x;
    EnemyBullet {
        pos: Vec2::new(center_x - size.x / 2.0, enemy.rect().bottom()),
        size,
        vel,
        color: stats.color,
    }
}

/// Drop a power-up at a position, choosing uniformly among all kinds
pub fn spawn_powerup(state: &mut GameState, center: Vec2, config: &GameConfig) {
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let size = Vec2::splat(config.powerup_size);
    state.powerups.push(PowerUp {
        kind,
        pos: center - size / 2.0,
        size,
        vel: Vec2::new(0.0, config.powerup_fall_speed),
    });
}

fn push_particle(state: &mut GameState, particle: Particle) {
    if state.particles.len() >= MAX_PARTICLES {
        // Evict the oldest to make room
        state.particles.remove(0);
    }
    state.particles.push(particle);
}

/// Scatter a burst of decaying particles around a point
pub fn spawn_particles(state: &mut GameState, pos: Vec2, color: u32, count: usize) {
    let seed = state.time_ticks as u32;
    for i in 0..count {
        let hash = seed
            .wrapping_mul(2654435761)
            .wrapping_add(i as u32 * 7919)
            .wrapping_add(color * 104729);
        let rand1 = (hash % 1000) as f32 / 1000.0 - 0.5;
        let rand2 = ((hash >> 10) % 1000) as f32 / 1000.0 - 0.5;
        let rand3 = ((hash >> 20) % 1000) as f32 / 1000.0;
        push_particle(
            state,
            Particle {
                pos,
                vel: Vec2::new(rand1, rand2) * 480.0,
                color,
                life: 1.0,
                size: 2.0 + rand3 * 6.0,
            },
        );
    }
}

/// Full explosion: a radially symmetric burst in the given color plus a
/// smaller white sparkle burst on top.
pub fn spawn_explosion(state: &mut GameState, pos: Vec2, color: u32) {
    let seed = state.time_ticks as u32;
    let ring = 15;
    for i in 0..ring {
        let hash = seed.wrapping_mul(7919).wrapping_add(i * 31337);
        let jitter = ((hash % 1000) as f32 / 1000.0 - 0.5) * 0.3;
        let speed = 60.0 + ((hash >> 10) % 1000) as f32 / 1000.0 * 180.0;
        let angle = std::f32::consts::TAU * (i as f32 / ring as f32) + jitter;
        push_particle(
            state,
            Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                life: 1.0,
                size: 3.0 + ((hash >> 20) % 100) as f32 / 100.0 * 4.0,
            },
        );
    }
    spawn_particles(state, pos, COLOR_SPARKLE, 8);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    fn running_state(config: &GameConfig) -> GameState {
        let mut state = GameState::new(42, config);
        state.start_game(config);
        state
    }

    #[test]
    fn test_wave_grid_layout() {
        let config = GameConfig::default();
        let state = running_state(&config);
        assert_eq!(
            state.enemies.len() as u32,
            config.initial_rows * config.initial_cols
        );
        // All enemies start within the playfield
        for enemy in &state.enemies {
            assert!(enemy.pos.x >= 0.0);
            assert!(enemy.rect().right() <= config.canvas_width);
        }
        // First two enemies in a row are spaced one cell apart
        let dx = state.enemies[1].center().x - state.enemies[0].center().x;
        assert!((dx - (config.enemy_width + config.enemy_padding)).abs() < 0.01);
    }

    #[test]
    fn test_wave_type_placement_by_row() {
        let config = GameConfig::default();
        let state = running_state(&config);
        let rows = config.initial_rows;
        let cols = config.initial_cols as usize;
        // Top (back) row: tough slow kinds
        for enemy in &state.enemies[..cols] {
            assert!(matches!(enemy.kind, EnemyKind::Tank | EnemyKind::Bomber));
        }
        // Bottom (front) row: fast fragile kinds
        let front = ((rows - 1) as usize) * cols;
        for enemy in &state.enemies[front..] {
            assert!(matches!(enemy.kind, EnemyKind::Darter | EnemyKind::Striker));
        }
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let config = GameConfig::default();
        let mut state = running_state(&config);
        fire_player_shots(&mut state, &config);
        assert_eq!(state.shots.len(), 1);
        assert_eq!(state.player.fire_cooldown_ms, config.fire_cooldown_ms);
        // Second attempt while hot does nothing
        fire_player_shots(&mut state, &config);
        assert_eq!(state.shots.len(), 1);
    }

    #[test]
    fn test_triple_shot_fires_spread() {
        let config = GameConfig::default();
        let mut state = running_state(&config);
        state.player.effects.triple_shot_ms = 5000.0;
        fire_player_shots(&mut state, &config);
        assert_eq!(state.shots.len(), 3);
        let vxs: Vec<f32> = state.shots.iter().map(|s| s.vel.x).collect();
        assert!(vxs.contains(&0.0));
        assert!(vxs.iter().any(|&vx| vx < 0.0));
        assert!(vxs.iter().any(|&vx| vx > 0.0));
        // All still travel upward
        assert!(state.shots.iter().all(|s| s.vel.y < 0.0));
    }

    #[test]
    fn test_rapid_fire_shortens_cooldown() {
        let config = GameConfig::default();
        let mut state = running_state(&config);
        state.player.effects.rapid_fire_ms = 5000.0;
        fire_player_shots(&mut state, &config);
        assert!((state.player.fire_cooldown_ms - config.fire_cooldown_ms / 2.5).abs() < 0.01);
    }

    #[test]
    fn test_tracker_bullet_leads_toward_player() {
        let config = GameConfig::default();
        let mut state = running_state(&config);
        let mut enemy = state
            .enemies
            .iter()
            .find(|e| e.kind == EnemyKind::Seeker)
            .unwrap()
            .clone();
        // Player far to the right of the enemy
        enemy.pos.x = 0.0;
        state.player.pos.x = config.canvas_width - config.player_width;
        let bullet = enemy_shot(&enemy, &state.player, &config);
        assert!(bullet.vel.x > 0.0);
        assert!(bullet.vel.x <= TRACK_VX_MAX);
        assert_eq!(bullet.vel.y, config.enemy_bullet_speed);
    }

    #[test]
    fn test_bomber_bullet_is_heavy() {
        let config = GameConfig::default();
        let state = running_state(&config);
        let bomber = state
            .enemies
            .iter()
            .find(|e| e.kind == EnemyKind::Bomber)
            .unwrap();
        let plain = state
            .enemies
            .iter()
            .find(|e| e.kind == EnemyKind::Tank)
            .unwrap();
        let heavy = enemy_shot(bomber, &state.player, &config);
        let normal = enemy_shot(plain, &state.player, &config);
        assert!(heavy.size.x > normal.size.x);
        assert!(heavy.vel.y > normal.vel.y);
        assert_eq!(normal.vel.x, 0.0);
    }

    #[test]
    fn test_powerup_spawns_centered() {
        let config = GameConfig::default();
        let mut state = running_state(&config);
        let center = Vec2::new(300.0, 200.0);
        spawn_powerup(&mut state, center, &config);
        let p = &state.powerups[0];
        assert!((p.rect().center() - center).length() < 0.01);
        assert_eq!(p.vel.y, config.powerup_fall_speed);
        assert!(PowerUpKind::ALL.contains(&p.kind));
    }

    #[test]
    fn test_particle_cap_evicts_oldest() {
        let config = GameConfig::default();
        let mut state = running_state(&config);
        for _ in 0..40 {
            spawn_explosion(&mut state, Vec2::new(100.0, 100.0), 0);
        }
        assert!(state.particles.len() <= MAX_PARTICLES);
        // Phase untouched by cosmetic spawns
        assert_eq!(state.phase, GamePhase::Running);
    }
}
