//! World generation
//!
//! Builds a fresh run: player at the spawn point, a fixed starting platform
//! followed by scattered platforms, a staircase of obstacles, and two walls
//! flush to the viewport edges.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GamePhase, KeyState, Player, Rect, World};
use crate::config::ParkourConfig;
use crate::consts::*;

/// Generate a world for the given viewport from a seed
pub fn reset(viewport_width: f32, viewport_height: f32, seed: u64, config: &ParkourConfig) -> World {
    let mut rng = Pcg32::seed_from_u64(seed);
    let world = reset_with_rng(viewport_width, viewport_height, seed, &mut rng, config);
    log::info!(
        "World reset (seed {}, viewport {}x{}): {} platforms, {} obstacles",
        seed,
        viewport_width,
        viewport_height,
        world.platforms.len(),
        world.obstacles.len()
    );
    world
}

/// Generate a world drawing randomness from `rng`
pub fn reset_with_rng(
    viewport_width: f32,
    viewport_height: f32,
    seed: u64,
    rng: &mut impl Rng,
    config: &ParkourConfig,
) -> World {
    World {
        seed,
        viewport: Vec2::new(viewport_width, viewport_height),
        player: Player::spawn(config.trail_length),
        platforms: generate_platforms(viewport_width, rng),
        walls: generate_walls(viewport_width, viewport_height),
        obstacles: generate_obstacles(rng),
        keys: KeyState::default(),
        camera: Vec2::ZERO,
        score: 0,
        game_time: 0,
        phase: GamePhase::Running,
        end_reason: None,
    }
}

/// Starting platform first, then platforms stepping downward with random
/// horizontal placement and width
pub fn generate_platforms(viewport_width: f32, rng: &mut impl Rng) -> Vec<Rect> {
    let mut platforms = Vec::with_capacity(PLATFORM_COUNT + 1);
    platforms.push(Rect::new(
        START_PLATFORM_X,
        START_PLATFORM_Y,
        START_PLATFORM_WIDTH,
        PLATFORM_HEIGHT,
    ));

    let span = viewport_width * PLATFORM_SPAN_FACTOR;
    for i in 0..PLATFORM_COUNT {
        let x = rng.random::<f32>() * span;
        let width = PLATFORM_MIN_WIDTH + rng.random::<f32>() * (PLATFORM_MAX_WIDTH - PLATFORM_MIN_WIDTH);
        let y = PLATFORM_BASE_Y + i as f32 * PLATFORM_STEP_Y;
        platforms.push(Rect::new(x, y, width, PLATFORM_HEIGHT));
    }

    platforms
}

/// Obstacles stepping right and down, with horizontal jitter
pub fn generate_obstacles(rng: &mut impl Rng) -> Vec<Rect> {
    (0..OBSTACLE_COUNT)
        .map(|i| {
            let x = OBSTACLE_BASE_X + i as f32 * OBSTACLE_STEP_X + rng.random::<f32>() * OBSTACLE_JITTER_X;
            let y = OBSTACLE_BASE_Y + i as f32 * OBSTACLE_STEP_Y;
            Rect::new(x, y, OBSTACLE_SIZE, OBSTACLE_SIZE)
        })
        .collect()
}

/// Full-height walls flush to the left and right viewport edges
pub fn generate_walls(viewport_width: f32, viewport_height: f32) -> [Rect; 2] {
    [
        Rect::new(0.0, 0.0, WALL_THICKNESS, viewport_height),
        Rect::new(
            viewport_width - WALL_THICKNESS,
            0.0,
            WALL_THICKNESS,
            viewport_height,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_layout() {
        let config = ParkourConfig::default();
        let world = reset(800.0, 600.0, 42, &config);

        assert_eq!(world.platforms.len(), PLATFORM_COUNT + 1);
        assert_eq!(world.obstacles.len(), OBSTACLE_COUNT);
        assert_eq!(world.platforms[0], Rect::new(0.0, 400.0, 300.0, 20.0));
        assert_eq!(world.player.pos, Vec2::new(100.0, 300.0));
        assert!(world.player.is_jumping);
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.score, 0);
        assert_eq!(world.game_time, 0);
    }

    #[test]
    fn test_platform_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let platforms = generate_platforms(1000.0, &mut rng);

        for (i, p) in platforms.iter().skip(1).enumerate() {
            assert_eq!(p.y, PLATFORM_BASE_Y + i as f32 * PLATFORM_STEP_Y);
            assert!(p.x >= 0.0 && p.x < 3000.0);
            assert!(p.width >= PLATFORM_MIN_WIDTH && p.width < PLATFORM_MAX_WIDTH);
            assert_eq!(p.height, PLATFORM_HEIGHT);
        }
    }

    #[test]
    fn test_obstacles_step_monotonically() {
        let mut rng = Pcg32::seed_from_u64(7);
        let obstacles = generate_obstacles(&mut rng);

        for (i, o) in obstacles.iter().enumerate() {
            let base_x = OBSTACLE_BASE_X + i as f32 * OBSTACLE_STEP_X;
            assert!(o.x >= base_x && o.x < base_x + OBSTACLE_JITTER_X);
            assert_eq!(o.y, OBSTACLE_BASE_Y + i as f32 * OBSTACLE_STEP_Y);
            assert_eq!((o.width, o.height), (OBSTACLE_SIZE, OBSTACLE_SIZE));
        }
        // Jitter is smaller than the step, so x never goes backwards
        for pair in obstacles.windows(2) {
            assert!(pair[1].x > pair[0].x);
        }
    }

    #[test]
    fn test_walls_track_viewport() {
        let walls = generate_walls(1024.0, 700.0);
        assert_eq!(walls[0], Rect::new(0.0, 0.0, 20.0, 700.0));
        assert_eq!(walls[1], Rect::new(1004.0, 0.0, 20.0, 700.0));
    }

    #[test]
    fn test_reset_is_idempotent_for_seed() {
        let config = ParkourConfig::default();
        let a = reset(800.0, 600.0, 1234, &config);
        let b = reset(800.0, 600.0, 1234, &config);

        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.walls, b.walls);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let config = ParkourConfig::default();
        let a = reset(800.0, 600.0, 1, &config);
        let b = reset(800.0, 600.0, 2, &config);
        assert_ne!(a.platforms, b.platforms);
    }
}
