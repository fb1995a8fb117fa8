//! Scene rendering
//!
//! Draws a `World` onto any 2D `Surface`. Rendering only reads the world.
//! World-space geometry is drawn under the camera transform; the HUD is drawn
//! afterwards in screen space.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use crate::sim::World;

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string for canvas fill styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Scene palette
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0x11, 0x11, 0x11);
    pub const PLATFORM: Color = Color::rgb(0x33, 0x33, 0x33);
    pub const PLATFORM_EDGE: Color = Color::rgb(0x00, 0xff, 0x88);
    pub const WALL: Color = Color::rgb(0x55, 0x55, 0x55);
    pub const OBSTACLE: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const TRAIL: Color = Color::rgb(0, 200, 255);
    pub const PLAYER: Color = Color::rgb(0x00, 0xf8, 0xff);
    pub const TEXT: Color = Color::rgb(0xff, 0xff, 0xff);
}

/// Width of the highlighted caps on each end of a platform
pub const PLATFORM_EDGE_WIDTH: f32 = 5.0;

pub const HUD_FONT: &str = "20px Orbitron";
pub const HINT_FONT: &str = "16px Orbitron";
const HUD_MARGIN: f32 = 20.0;

/// Control hints, bottom line last
pub const CONTROL_HINTS: [&str; 4] = [
    "Arrow Keys: Move",
    "Space: Jump",
    "Shift: Dash",
    "Wall Slide: Hold against wall",
];

/// A 2D drawing target with a canvas-style transform stack
pub trait Surface {
    fn set_fill(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn scale(&mut self, x: f32, y: f32);
    fn set_font(&mut self, font: &str);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    /// Whether the player sprite has finished loading
    fn sprite_ready(&self) -> bool {
        false
    }

    /// Blit the player sprite into the given box
    fn draw_sprite(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}
}

/// Draw one frame of the world. `ticks_per_second` converts the tick
/// counter into the HUD clock.
pub fn render(world: &World, ticks_per_second: f32, surface: &mut impl Surface) {
    surface.set_fill(palette::BACKGROUND);
    surface.fill_rect(0.0, 0.0, world.viewport.x, world.viewport.y);

    surface.save();
    surface.translate(-world.camera.x, -world.camera.y);

    draw_platforms(world, surface);

    surface.set_fill(palette::WALL);
    for wall in &world.walls {
        surface.fill_rect(wall.x, wall.y, wall.width, wall.height);
    }

    surface.set_fill(palette::OBSTACLE);
    for obstacle in &world.obstacles {
        surface.fill_rect(obstacle.x, obstacle.y, obstacle.width, obstacle.height);
    }

    draw_trail(world, surface);
    draw_player(world, surface);

    surface.restore();

    draw_hud(world, ticks_per_second, surface);
}

fn draw_platforms(world: &World, surface: &mut impl Surface) {
    for platform in &world.platforms {
        surface.set_fill(palette::PLATFORM);
        surface.fill_rect(platform.x, platform.y, platform.width, platform.height);

        surface.set_fill(palette::PLATFORM_EDGE);
        surface.fill_rect(platform.x, platform.y, PLATFORM_EDGE_WIDTH, platform.height);
        surface.fill_rect(
            platform.right() - PLATFORM_EDGE_WIDTH,
            platform.y,
            PLATFORM_EDGE_WIDTH,
            platform.height,
        );
    }
}

/// Afterimages, oldest faintest
fn draw_trail(world: &World, surface: &mut impl Surface) {
    let trail = &world.player.trail;
    let size = world.player.size;
    let len = trail.len() as f32;

    for (i, pos) in trail.iter().enumerate() {
        surface.set_fill(palette::TRAIL.with_alpha(i as f32 / len));
        surface.fill_rect(pos.x, pos.y, size.x, size.y);
    }
}

/// Player sprite, mirrored when facing left
fn draw_player(world: &World, surface: &mut impl Surface) {
    let p = &world.player;

    surface.save();
    surface.translate(p.pos.x, p.pos.y);
    if p.facing < 0 {
        surface.scale(-1.0, 1.0);
        surface.translate(-p.size.x, 0.0);
    }

    if surface.sprite_ready() {
        surface.draw_sprite(0.0, 0.0, p.size.x, p.size.y);
    } else {
        surface.set_fill(palette::PLAYER);
        surface.fill_rect(0.0, 0.0, p.size.x, p.size.y);
    }
    surface.restore();
}

/// Score, distance and time at the top left, control hints at the bottom left
fn draw_hud(world: &World, ticks_per_second: f32, surface: &mut impl Surface) {
    surface.set_fill(palette::TEXT);
    surface.set_font(HUD_FONT);
    surface.fill_text(&format!("Score: {}", world.score), HUD_MARGIN, 40.0);
    surface.fill_text(&format!("Distance: {}m", world.distance()), HUD_MARGIN, 70.0);
    surface.fill_text(&format!("Time: {}s", world.elapsed_seconds(ticks_per_second)), HUD_MARGIN, 100.0);

    surface.set_font(HINT_FONT);
    let bottom = world.viewport.y;
    let count = CONTROL_HINTS.len();
    for (i, hint) in CONTROL_HINTS.iter().enumerate() {
        let y = bottom - 20.0 * (count - i) as f32;
        surface.fill_text(hint, HUD_MARGIN, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParkourConfig;
    use crate::sim::{Key, reset, tick};

    const TICK_RATE: f32 = 60.0;

    fn world() -> World {
        reset(800.0, 600.0, 5, &ParkourConfig::default())
    }

    #[test]
    fn test_color_css() {
        assert_eq!(palette::BACKGROUND.to_css(), "#111111");
        assert_eq!(palette::PLAYER.to_css(), "#00f8ff");
        assert_eq!(palette::TRAIL.with_alpha(0.5).to_css(), "rgba(0, 200, 255, 0.5)");
    }

    #[test]
    fn test_frame_starts_with_clear_and_balances_transforms() {
        let world = world();
        let mut surface = RecordingSurface::default();
        render(&world, TICK_RATE, &mut surface);

        let cmds = &surface.commands;
        assert_eq!(cmds[0], DrawCommand::Fill(palette::BACKGROUND));
        assert_eq!(
            cmds[1],
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 600.0
            }
        );
        assert_eq!(cmds[2], DrawCommand::Save);
        assert_eq!(
            cmds[3],
            DrawCommand::Translate {
                x: -world.camera.x,
                y: -world.camera.y
            }
        );
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_draws_every_rectangle() {
        let world = world();
        let mut surface = RecordingSurface::default();
        render(&world, TICK_RATE, &mut surface);

        // Three rects per platform, one per wall and obstacle, one background,
        // one player fallback
        let expected = world.platforms.len() * 3 + world.walls.len() + world.obstacles.len() + 2;
        assert_eq!(surface.rects().count(), expected);
    }

    #[test]
    fn test_layers_drawn_in_order() {
        let world = world();
        let mut surface = RecordingSurface::default();
        render(&world, TICK_RATE, &mut surface);

        let fills: Vec<Color> = surface
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Fill(color) => Some(*color),
                _ => None,
            })
            .collect();
        let first = |color: Color| fills.iter().position(|c| *c == color).unwrap();

        assert!(first(palette::PLATFORM) < first(palette::WALL));
        assert!(first(palette::WALL) < first(palette::OBSTACLE));
        assert!(first(palette::OBSTACLE) < first(palette::PLAYER));
        assert!(first(palette::PLAYER) < first(palette::TEXT));
    }

    #[test]
    fn test_trail_fades_in() {
        let config = ParkourConfig::default();
        let mut world = world();
        world.keys.set(Key::Right, true);
        for _ in 0..config.trail_length {
            tick(&mut world, &config);
        }

        let mut surface = RecordingSurface::default();
        render(&world, TICK_RATE, &mut surface);

        let alphas: Vec<f32> = surface
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Fill(color) if (color.r, color.g, color.b) == (0, 200, 255) => {
                    Some(color.a)
                }
                _ => None,
            })
            .collect();
        assert_eq!(alphas.len(), config.trail_length);
        assert_eq!(alphas[0], 0.0);
        assert!(alphas.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sprite_used_when_loaded() {
        let world = world();
        let mut surface = RecordingSurface::with_sprite();
        render(&world, TICK_RATE, &mut surface);

        assert!(surface.commands.iter().any(|c| matches!(c, DrawCommand::Sprite { .. })));
        assert!(!surface.commands.contains(&DrawCommand::Fill(palette::PLAYER)));
    }

    #[test]
    fn test_player_mirrored_when_facing_left() {
        let mut world = world();
        world.player.facing = -1;
        let mut surface = RecordingSurface::default();
        render(&world, TICK_RATE, &mut surface);

        assert!(surface.commands.contains(&DrawCommand::Scale { x: -1.0, y: 1.0 }));
        assert!(surface.commands.contains(&DrawCommand::Translate {
            x: -world.player.size.x,
            y: 0.0
        }));

        world.player.facing = 1;
        let mut surface = RecordingSurface::default();
        render(&world, TICK_RATE, &mut surface);
        assert!(!surface.commands.iter().any(|c| matches!(c, DrawCommand::Scale { .. })));
    }

    #[test]
    fn test_hud_text_in_screen_space() {
        let mut world = world();
        world.score = 42;
        world.player.pos.x = 427.9;
        world.game_time = 185;
        let mut surface = RecordingSurface::default();
        render(&world, TICK_RATE, &mut surface);

        let texts: Vec<&str> = surface.texts().collect();
        assert_eq!(&texts[..3], &["Score: 42", "Distance: 427m", "Time: 3s"]);
        for hint in CONTROL_HINTS {
            assert!(texts.contains(&hint));
        }

        // All text comes after the world transform has been popped
        let last_restore = surface
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Restore)
            .unwrap();
        let first_text = surface
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Text { .. }))
            .unwrap();
        assert!(last_restore < first_text);
    }
}
