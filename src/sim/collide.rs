//! Collision and effects resolution
//!
//! Runs at the end of each tick over the live entity sets. Removal is done
//! with stable filtering (`retain` / rebuilt vectors), never by index
//! juggling mid-iteration, so every entity is evaluated exactly once per
//! tick. A player shot is consumed by its first overlapping enemy and never
//! damages a second one in the same tick.

use glam::Vec2;
use rand::Rng;

use super::events::GameEvent;
use super::spawn;
use super::state::{GamePhase, GameState, PowerUpKind};
use crate::config::GameConfig;
use crate::consts::{COLOR_PLAYER, COLOR_SPARKLE};

/// Enemy hit-flash duration after surviving a hit (renderer cue)
pub(crate) const HIT_FLASH_MS: f32 = 150.0;

/// Resolve all overlaps and their effects, then prune dead enemies
pub fn resolve(state: &mut GameState, config: &GameConfig) {
    resolve_player_shots(state, config);
    resolve_enemy_shots(state, config);
    resolve_powerups(state, config);
    state.enemies.retain(|e| e.alive);
}

fn resolve_player_shots(state: &mut GameState, config: &GameConfig) {
    let shots = std::mem::take(&mut state.shots);
    let mut surviving = Vec::with_capacity(shots.len());
    let mut kills: Vec<(Vec2, u32)> = Vec::new();
    let mut grazes: Vec<(Vec2, u32)> = Vec::new();

    for shot in shots {
        let rect = shot.rect();
        let hit = state
            .enemies
            .iter_mut()
            .find(|e| e.alive && e.rect().intersects(&rect));
        let Some(enemy) = hit else {
            surviving.push(shot);
            continue;
        };

        enemy.health -= 1;
        let stats = enemy.kind.stats();
        if enemy.health <= 0 {
            enemy.alive = false;
            let points = stats.points * state.level as u64;
            state.score += points;
            state.events.push(GameEvent::EnemyDestroyed {
                kind: enemy.kind,
                points,
            });
            kills.push((enemy.center(), stats.color));
        } else {
            enemy.hit_flash_ms = HIT_FLASH_MS;
            grazes.push((enemy.center(), stats.color));
        }
    }
    state.shots = surviving;

    for (pos, color) in grazes {
        spawn::spawn_particles(state, pos, color, 5);
    }
    for (pos, color) in kills {
        spawn::spawn_explosion(state, pos, color);
        if state.rng.random_bool(config.powerup_drop_chance as f64) {
            spawn::spawn_powerup(state, pos, config);
        }
    }
}

fn resolve_enemy_shots(state: &mut GameState, config: &GameConfig) {
    let player_rect = state.player.rect();
    let shield = state.player.effects.shield_active();
    let mut deflected: Vec<Vec2> = Vec::new();
    let mut hits = 0u32;

    // Every overlapping bullet is consumed; the shield and the post-hit
    // grace period just suppress the damage.
    state.enemy_shots.retain(|bullet| {
        if !bullet.rect().intersects(&player_rect) {
            return true;
        }
        if shield {
            deflected.push(bullet.rect().center());
        } else {
            hits += 1;
        }
        false
    });

    for pos in deflected {
        spawn::spawn_particles(state, pos, COLOR_SPARKLE, 4);
    }
    for _ in 0..hits {
        // A life loss earlier in this tick starts the grace period; later
        // bullets were already consumed and do nothing more.
        if state.player.invincible_ms > 0.0 {
            continue;
        }
        apply_player_damage(state, config);
    }
}

fn apply_player_damage(state: &mut GameState, config: &GameConfig) {
    let center = state.player.center();
    state.player.health -= config.damage_per_hit;
    spawn::spawn_explosion(state, center, COLOR_PLAYER);
    if state.player.health > 0 {
        return;
    }

    state.player.health = 0;
    state.player.lives = state.player.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        remaining: state.player.lives,
    });

    if state.player.lives > 0 {
        state.player.health = config.max_health;
        state.player.invincible_ms = config.invincibility_ms;
        // Bigger blast when a life goes
        spawn::spawn_explosion(state, center, COLOR_PLAYER);
        spawn::spawn_particles(state, center, COLOR_SPARKLE, 12);
    } else {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over with score {}", state.score);
    }
}

fn resolve_powerups(state: &mut GameState, config: &GameConfig) {
    let player_rect = state.player.rect();
    let mut collected: Vec<(PowerUpKind, Vec2)> = Vec::new();
    state.powerups.retain(|p| {
        if p.rect().intersects(&player_rect) {
            collected.push((p.kind, p.rect().center()));
            false
        } else {
            true
        }
    });

    for (kind, pos) in collected {
        apply_powerup(state, kind, config);
        spawn::spawn_explosion(state, pos, kind.color());
        state.events.push(GameEvent::PowerUpCollected { kind });
    }
}

fn apply_powerup(state: &mut GameState, kind: PowerUpKind, config: &GameConfig) {
    match kind {
        PowerUpKind::Heal => {
            state.player.health =
                (state.player.health + config.heal_amount).min(config.max_health);
        }
        PowerUpKind::Shield => state.player.effects.shield_ms = config.shield_duration_ms,
        PowerUpKind::RapidFire => {
            state.player.effects.rapid_fire_ms = config.rapid_fire_duration_ms;
        }
        PowerUpKind::TripleShot => {
            state.player.effects.triple_shot_ms = config.triple_shot_duration_ms;
        }
        PowerUpKind::Bomb => {
            state.enemy_shots.clear();
            let center = Vec2::new(config.canvas_width / 2.0, config.canvas_height / 2.0);
            spawn::spawn_particles(state, center, kind.color(), 40);
        }
        PowerUpKind::Bounty => state.score += config.bounty_points,
    }
}
