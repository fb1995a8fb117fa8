//! Simulation tick
//!
//! Advances the world by one step. Velocities are in world units per tick
//! and there is no delta-time scaling.

use super::collision::{overlaps, overlaps_any};
use super::state::{EndReason, Key, World};
use crate::config::ParkourConfig;
use crate::consts::SCORE_UNIT;

/// Advance the world by one tick. Does nothing once the run is over.
pub fn tick(world: &mut World, config: &ParkourConfig) {
    if world.is_game_over() {
        return;
    }

    apply_controls(world, config);
    apply_gravity(world, config);

    let p = &mut world.player;
    p.pos += p.vel;

    resolve_walls(world, config);
    resolve_platforms(world);

    if overlaps_any(&world.player.rect(), &world.obstacles) {
        world.end(EndReason::HitObstacle);
    }
    if world.player.pos.y > world.viewport.y {
        world.end(EndReason::FellOff);
    }

    update_camera(world);

    world.score = score_for(world.player.pos.x);
    world.game_time += 1;

    let p = &mut world.player;
    p.dash_cooldown = p.dash_cooldown.saturating_sub(1);
    p.record_trail();
}

/// Score for a horizontal position
#[inline]
pub fn score_for(x: f32) -> i64 {
    (x / SCORE_UNIT).floor() as i64
}

/// Accelerate toward the held direction, or decay with friction
fn apply_controls(world: &mut World, config: &ParkourConfig) {
    let p = &mut world.player;
    if world.keys.is_held(Key::Left) {
        p.vel.x = (p.vel.x - config.acceleration).max(-config.player_speed);
        p.facing = -1;
    } else if world.keys.is_held(Key::Right) {
        p.vel.x = (p.vel.x + config.acceleration).min(config.player_speed);
        p.facing = 1;
    } else {
        p.vel.x *= config.friction;
    }
}

fn apply_gravity(world: &mut World, config: &ParkourConfig) {
    let p = &mut world.player;
    p.vel.y += config.gravity;
    if let Some(cap) = config.max_fall_speed {
        p.vel.y = p.vel.y.min(cap);
    }
}

/// Walls stop horizontal movement outright; pressing into one while falling
/// slows the fall to a slide
fn resolve_walls(world: &mut World, config: &ParkourConfig) {
    let pushing = world.keys.horizontal_held();
    let p = &mut world.player;
    p.is_wall_sliding = false;

    for wall in &world.walls {
        if overlaps(&p.rect(), wall) {
            if p.vel.y > 0.0 && pushing {
                p.is_wall_sliding = true;
                p.vel.y = config.wall_slide_speed;
            }
            p.pos.x -= p.vel.x;
            p.vel.x = 0.0;
        }
    }
}

/// One-sided platforms: land on top when falling from above, otherwise
/// back out of the vertical move
fn resolve_platforms(world: &mut World) {
    let p = &mut world.player;
    let was_airborne = p.is_jumping;
    p.is_jumping = true;

    for platform in &world.platforms {
        if !overlaps(&p.rect(), platform) {
            continue;
        }
        if p.vel.y > 0.0 && p.pos.y + p.size.y / 2.0 < platform.y {
            if was_airborne {
                log::debug!("Landed at ({:.1}, {:.1})", p.pos.x, platform.y);
            }
            p.is_jumping = false;
            p.pos.y = platform.y - p.size.y;
            p.vel.y = 0.0;
        } else {
            p.pos.y -= p.vel.y;
        }
    }
}

/// Keep the player a third of the way in from the left; never scroll above
/// the world origin
fn update_camera(world: &mut World) {
    let p = &world.player;
    world.camera.x = p.pos.x - world.viewport.x / 3.0;
    world.camera.y = (p.pos.y - world.viewport.y / 2.0).min(0.0);
}
