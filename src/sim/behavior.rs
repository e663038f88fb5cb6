//! Per-enemy behavior engine
//!
//! Applied every tick after the shared horizontal sweep. One exhaustive
//! match over the behavior tag keeps new behaviors a compile-checked change.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Behavior, Enemy};

/// Zigzag phase advance per second (radians)
const ZIGZAG_FREQ: f32 = 6.0;
/// Peak vertical speed of the zigzag oscillation
const ZIGZAG_SPEED: f32 = 45.0;
/// Tracker ignores player offsets smaller than this
const TRACKER_DEADBAND: f32 = 4.0;
/// Tracker horizontal closing speed
const TRACKER_SPEED: f32 = 36.0;
/// Instantaneous dash displacement
const DASH_DISTANCE: f32 = 40.0;
/// Dash cooldown range (milliseconds), re-randomized after each dash
pub(crate) const DASH_COOLDOWN_MS: std::ops::Range<f32> = 1500.0..3500.0;

/// Side effect of a behavior step the caller must act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorOutcome {
    None,
    /// The enemy dashed; emit a particle puff at its position
    Dashed,
}

/// Advance one enemy's behavior by `dt_ms`. The shared sweep has already
/// moved it horizontally; this layers the kind-specific rule on top.
pub fn apply(
    enemy: &mut Enemy,
    player_center_x: f32,
    dt_ms: f32,
    rng: &mut Pcg32,
) -> BehaviorOutcome {
    let dt = dt_ms / 1000.0;
    match enemy.kind.stats().behavior {
        Behavior::Sweep | Behavior::Bomber => BehaviorOutcome::None,
        Behavior::Zigzag => {
            enemy.phase += ZIGZAG_FREQ * dt;
            enemy.pos.y += enemy.phase.sin() * ZIGZAG_SPEED * dt;
            BehaviorOutcome::None
        }
        Behavior::Tracker => {
            let dx = player_center_x - enemy.center().x;
            if dx.abs() > TRACKER_DEADBAND {
                enemy.pos.x += dx.signum() * TRACKER_SPEED * dt;
            }
            BehaviorOutcome::None
        }
        Behavior::Dasher => {
            enemy.dash_timer_ms += dt_ms;
            if enemy.dash_timer_ms >= enemy.dash_cooldown_ms {
                enemy.pos.y += DASH_DISTANCE;
                enemy.dash_timer_ms = 0.0;
                enemy.dash_cooldown_ms = rng.random_range(DASH_COOLDOWN_MS);
                BehaviorOutcome::Dashed
            } else {
                BehaviorOutcome::None
            }
        }
    }
}
