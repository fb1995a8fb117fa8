//! Key events
//!
//! Key-down and key-up update the held-key map read by `tick`. Jumps and
//! dashes are impulses applied immediately on key-down.

use super::state::{Key, World};
use crate::config::ParkourConfig;

/// Handle a key press
pub fn key_down(world: &mut World, key: Key, config: &ParkourConfig) {
    if world.is_game_over() {
        return;
    }
    world.keys.set(key, true);

    let p = &mut world.player;
    match key {
        Key::Jump => {
            if !p.is_jumping {
                p.vel.y = -config.jump_force;
                p.is_jumping = true;
            }
            if p.is_wall_sliding {
                p.vel.y = -config.jump_force;
                p.vel.x = config.wall_jump_force * -p.facing_sign();
                p.is_wall_sliding = false;
                log::debug!("Wall jump at ({:.1}, {:.1})", p.pos.x, p.pos.y);
            }
        }
        Key::Dash => {
            if p.dash_cooldown == 0 {
                p.vel.x = config.dash_force * p.facing_sign();
                p.dash_cooldown = config.dash_cooldown_frames;
                log::debug!("Dash (facing {})", p.facing);
            }
        }
        Key::Left | Key::Right => {}
    }
}

/// Handle a key release
pub fn key_up(world: &mut World, key: Key) {
    world.keys.set(key, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::generate::reset;

    fn world() -> (World, ParkourConfig) {
        let config = ParkourConfig::default();
        (reset(800.0, 600.0, 1, &config), config)
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let (mut world, config) = world();

        // Fresh worlds start airborne
        key_down(&mut world, Key::Jump, &config);
        assert_eq!(world.player.vel.y, 0.0);

        world.player.is_jumping = false;
        key_down(&mut world, Key::Jump, &config);
        assert_eq!(world.player.vel.y, -config.jump_force);
        assert!(world.player.is_jumping);
        assert!(world.keys.is_held(Key::Jump));

        key_up(&mut world, Key::Jump);
        assert!(!world.keys.is_held(Key::Jump));
    }

    #[test]
    fn test_wall_jump_pushes_away_from_wall() {
        let (mut world, config) = world();
        world.player.is_wall_sliding = true;
        world.player.facing = 1;
        world.player.vel.y = config.wall_slide_speed;

        key_down(&mut world, Key::Jump, &config);
        assert_eq!(world.player.vel.y, -config.jump_force);
        assert_eq!(world.player.vel.x, -config.wall_jump_force);
        assert!(!world.player.is_wall_sliding);
    }

    #[test]
    fn test_dash_respects_cooldown() {
        let (mut world, config) = world();
        world.player.facing = -1;

        key_down(&mut world, Key::Dash, &config);
        assert_eq!(world.player.vel.x, -config.dash_force);
        assert_eq!(world.player.dash_cooldown, config.dash_cooldown_frames);

        world.player.vel.x = 0.0;
        key_down(&mut world, Key::Dash, &config);
        assert_eq!(world.player.vel.x, 0.0);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let (mut world, config) = world();
        world.end(crate::sim::EndReason::FellOff);
        world.player.is_jumping = false;

        key_down(&mut world, Key::Jump, &config);
        assert_eq!(world.player.vel.y, 0.0);
        assert!(!world.keys.is_held(Key::Jump));
    }
}
