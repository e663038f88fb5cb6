//! Per-tick simulation step
//!
//! One external clock callback drives one `tick` per display frame. The
//! inter-frame interval is variable, so the elapsed time arrives as
//! `dt_ms` and every timer counts wall-clock milliseconds. Advancing while
//! not Running is a no-op, never a fault.

use glam::Vec2;
use rand::Rng;

use super::behavior::{self, BehaviorOutcome};
use super::collide;
use super::events::GameEvent;
use super::spawn;
use super::state::{GamePhase, GameState};
use crate::config::GameConfig;
use crate::consts::{PARTICLE_DRAG, PARTICLE_FADE_PER_SEC, PARTICLE_MIN_SIZE, REFERENCE_FRAME_MS};

/// Input snapshot for a single tick (sampled once at tick start)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Held fire; actual shots are gated by the cooldown
    pub fire: bool,
    /// One-shot pause toggle, not a held state
    pub pause: bool,
    /// Demo autopilot: chases the lowest enemy's column and holds fire
    pub autopilot: bool,
}

/// Advance the game by one tick of `dt_ms` elapsed milliseconds.
/// Returns the discrete events accumulated since the last drain.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: f32,
    config: &GameConfig,
) -> Vec<GameEvent> {
    // Pause toggle first; only Running and Paused react to it
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                state.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Running {
        return state.take_events();
    }

    state.time_ticks += 1;
    let dt = dt_ms / 1000.0;
    let input = resolve_autopilot(state, input);

    // 1. Player input: clamped horizontal movement, then fire
    state.player.fire_cooldown_ms = (state.player.fire_cooldown_ms - dt_ms).max(0.0);
    let mut vx = 0.0;
    if input.move_left {
        vx -= config.player_speed;
    }
    if input.move_right {
        vx += config.player_speed;
    }
    state.player.pos.x =
        (state.player.pos.x + vx * dt).clamp(0.0, config.canvas_width - state.player.size.x);
    if input.fire {
        spawn::fire_player_shots(state, config);
    }

    // 2. Player shots advance; drop any leaving the top or sides
    for shot in state.shots.iter_mut() {
        shot.pos += shot.vel * dt;
    }
    state
        .shots
        .retain(|s| s.rect().bottom() > 0.0 && s.rect().right() > 0.0 && s.pos.x < config.canvas_width);

    // 3. Shared wave march: when any alive enemy reaches a side edge the
    // whole wave flips direction and shifts down, once, together.
    let hit_edge = state.enemies.iter().any(|e| {
        e.alive
            && ((state.sweep_dir > 0.0
                && e.rect().right() >= config.canvas_width - config.edge_margin)
                || (state.sweep_dir < 0.0 && e.pos.x <= config.edge_margin))
    });
    if hit_edge {
        state.sweep_dir = -state.sweep_dir;
        for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
            enemy.pos.y += config.enemy_descent;
        }
    }

    // 4. Per enemy: sweep, behavior override, shoot trial, breach check
    let player_center_x = state.player.center().x;
    // Bernoulli trial per enemy per tick; scaling by the reference frame
    // keeps the per-second firing rate stable under variable dt.
    let shoot_scale = dt_ms / REFERENCE_FRAME_MS;
    let mut dash_puffs: Vec<(Vec2, u32)> = Vec::new();
    let mut breached = false;
    for enemy in state.enemies.iter_mut() {
        if !enemy.alive {
            continue;
        }
        let stats = enemy.kind.stats();
        enemy.pos.x += config.enemy_sweep_speed
            * state.sweep_dir
            * state.wave.speed_multiplier
            * stats.speed_mod
            * dt;
        if behavior::apply(enemy, player_center_x, dt_ms, &mut state.rng) == BehaviorOutcome::Dashed
        {
            dash_puffs.push((enemy.center(), stats.color));
        }
        enemy.hit_flash_ms = (enemy.hit_flash_ms - dt_ms).max(0.0);

        let chance = (state.wave.shoot_chance
            * stats.shoot_mod
            * state.wave.speed_multiplier
            * shoot_scale)
            .clamp(0.0, 1.0);
        if state.rng.random_bool(chance as f64) {
            let bullet = spawn::enemy_shot(enemy, &state.player, config);
            state.enemy_shots.push(bullet);
        }

        if enemy.rect().bottom() >= state.player.pos.y {
            breached = true;
        }
    }
    for (pos, color) in dash_puffs {
        spawn::spawn_particles(state, pos, color, 6);
    }

    if breached {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Wave reached the defense line; game over at {}", state.score);
        return state.take_events();
    }

    // 5. Wave cleared: transition and do nothing further this tick
    if !state.any_enemy_alive() {
        state.phase = GamePhase::LevelComplete;
        state.events.push(GameEvent::LevelComplete { level: state.level });
        log::info!("Level {} complete", state.level);
        return state.take_events();
    }

    // 6. Enemy bullets advance (tracking component included); drop off-bounds
    for bullet in state.enemy_shots.iter_mut() {
        bullet.pos += bullet.vel * dt;
    }
    state.enemy_shots.retain(|b| {
        b.pos.y < config.canvas_height && b.rect().right() > 0.0 && b.pos.x < config.canvas_width
    });

    // 7. Particles: drag, fade, shrink
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel *= PARTICLE_DRAG;
        particle.life -= PARTICLE_FADE_PER_SEC * dt;
        particle.size *= 0.98;
    }
    state
        .particles
        .retain(|p| p.life > 0.0 && p.size > PARTICLE_MIN_SIZE);

    // 8. Power-ups fall; drop below the floor
    for powerup in state.powerups.iter_mut() {
        powerup.pos += powerup.vel * dt;
    }
    state.powerups.retain(|p| p.pos.y < config.canvas_height);

    // 9. Timed effects and the grace period count down
    state.player.effects.advance(dt_ms);
    state.player.invincible_ms = (state.player.invincible_ms - dt_ms).max(0.0);

    // 10. Collisions and their effects
    collide::resolve(state, config);

    state.take_events()
}

/// Substitute autopilot steering for the raw input when requested
fn resolve_autopilot(state: &GameState, input: &TickInput) -> TickInput {
    if !input.autopilot {
        return input.clone();
    }
    let mut out = input.clone();
    out.fire = true;
    // Chase the column of the lowest live enemy, the most immediate threat
    let target = state
        .enemies
        .iter()
        .filter(|e| e.alive)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.center().x);
    if let Some(tx) = target {
        let dx = tx - state.player.center().x;
        out.move_left = dx < -4.0;
        out.move_right = dx > 4.0;
    }
    out
}
