//! Vector Parkour entry point
//!
//! In the browser, exports `launchVectorParkour` / `exitVectorParkour` for the
//! page's buttons and runs the game on a `requestAnimationFrame` loop.
//! Natively, runs a scripted headless demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, Window};

    use vector_parkour::consts::CANVAS_WINDOW_FRACTION;
    use vector_parkour::error::Result;
    use vector_parkour::renderer::CanvasSurface;
    use vector_parkour::sim::EndReason;
    use vector_parkour::{FrameOutcome, GameSession, ParkourConfig, ParkourError};

    const GAME_CONTAINER_ID: &str = "vectorParkourGame";
    const GAME_OVER_ID: &str = "gameOverScreen";
    const FINAL_SCORE_ID: &str = "finalScore";
    const CANVAS_ID: &str = "parkourCanvas";
    /// Optional `<script type="application/json">` holding tuning overrides
    const TUNING_ID: &str = "parkourTuning";

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        surface: CanvasSurface,
        last_time: f64,
        frame_id: Option<i32>,
    }

    /// A launched game plus the handles needed to tear it down
    struct ActiveGame {
        game: Rc<RefCell<Game>>,
        frame_callback: FrameCallback,
        keydown: Closure<dyn FnMut(KeyboardEvent)>,
        keyup: Closure<dyn FnMut(KeyboardEvent)>,
    }

    thread_local! {
        static ACTIVE: RefCell<Option<ActiveGame>> = const { RefCell::new(None) };
    }

    fn js_err(e: JsValue) -> ParkourError {
        ParkourError::Js(format!("{:?}", e))
    }

    fn window() -> Result<Window> {
        web_sys::window().ok_or_else(|| ParkourError::Js("no window".to_string()))
    }

    fn document() -> Result<Document> {
        window()?
            .document()
            .ok_or_else(|| ParkourError::Js("no document".to_string()))
    }

    fn element(document: &Document, id: &'static str) -> Result<HtmlElement> {
        document
            .get_element_by_id(id)
            .ok_or(ParkourError::MissingElement(id))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| ParkourError::MissingElement(id))
    }

    fn set_display(document: &Document, id: &'static str, display: &str) -> Result<()> {
        element(document, id)?
            .style()
            .set_property("display", display)
            .map_err(js_err)
    }

    /// Tuning from the page, falling back to defaults
    fn load_config(document: &Document) -> ParkourConfig {
        let Some(json) = document
            .get_element_by_id(TUNING_ID)
            .and_then(|el| el.text_content())
        else {
            return ParkourConfig::default();
        };

        match ParkourConfig::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring page tuning: {}", e);
                ParkourConfig::default()
            }
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }
        log::info!("Vector Parkour loaded");
    }

    #[wasm_bindgen(js_name = launchVectorParkour)]
    pub fn launch_vector_parkour() {
        if let Err(e) = launch() {
            log::error!("Failed to launch Vector Parkour: {}", e);
        }
    }

    #[wasm_bindgen(js_name = exitVectorParkour)]
    pub fn exit_vector_parkour() {
        if let Err(e) = exit() {
            log::error!("Failed to exit Vector Parkour: {}", e);
        }
    }

    fn launch() -> Result<()> {
        // Relaunching replaces the running game
        stop_active()?;

        let window = window()?;
        let document = document()?;
        set_display(&document, GAME_CONTAINER_ID, "block")?;
        set_display(&document, GAME_OVER_ID, "none")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or(ParkourError::MissingElement(CANVAS_ID))?
            .dyn_into()
            .map_err(|_| ParkourError::MissingElement(CANVAS_ID))?;

        let inner_w = window.inner_width().map_err(js_err)?.as_f64().unwrap_or(0.0);
        let inner_h = window.inner_height().map_err(js_err)?.as_f64().unwrap_or(0.0);
        let width = (inner_w * CANVAS_WINDOW_FRACTION).floor();
        let height = (inner_h * CANVAS_WINDOW_FRACTION).floor();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let surface = CanvasSurface::new(&canvas)?;
        let seed = js_sys::Date::now() as u64;
        let session = GameSession::launch(width as f32, height as f32, seed, load_config(&document));

        let game = Rc::new(RefCell::new(Game {
            session,
            surface,
            last_time: 0.0,
            frame_id: None,
        }));

        let keydown = {
            let game = game.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.key_down(&event.key());
            })
        };
        let keyup = {
            let game = game.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.key_up(&event.key());
            })
        };
        let frame_callback = start_loop(game.clone())?;

        ACTIVE.with(|active| {
            *active.borrow_mut() = Some(ActiveGame {
                game,
                frame_callback,
                keydown,
                keyup,
            });
        });

        // Listeners go on last; a failure here tears down the loop too
        if let Err(e) = attach_listeners(&window) {
            if let Err(stop_err) = stop_active() {
                log::warn!("Cleanup after failed launch: {}", stop_err);
            }
            return Err(e);
        }

        log::info!(
            "Vector Parkour launched ({}x{}, seed {})",
            width,
            height,
            seed
        );
        Ok(())
    }

    fn exit() -> Result<()> {
        stop_active()?;
        set_display(&document()?, GAME_CONTAINER_ID, "none")
    }

    fn attach_listeners(window: &Window) -> Result<()> {
        ACTIVE.with(|active| {
            let active = active.borrow();
            let Some(active) = active.as_ref() else {
                return Ok(());
            };
            window
                .add_event_listener_with_callback("keydown", active.keydown.as_ref().unchecked_ref())
                .map_err(js_err)?;
            window
                .add_event_listener_with_callback("keyup", active.keyup.as_ref().unchecked_ref())
                .map_err(js_err)
        })
    }

    /// Cancel the pending frame and detach key listeners. Every step runs
    /// even if an earlier one fails; the first error is returned.
    fn stop_active() -> Result<()> {
        let Some(active) = ACTIVE.with(|active| active.borrow_mut().take()) else {
            return Ok(());
        };
        let ActiveGame {
            game,
            frame_callback,
            keydown,
            keyup,
        } = active;
        let window = window()?;
        let mut result = Ok(());

        if let Some(id) = game.borrow_mut().frame_id.take() {
            if let Err(e) = window.cancel_animation_frame(id) {
                log::warn!("Failed to cancel animation frame: {:?}", e);
                result = Err(js_err(e));
            }
        }

        for (event, callback) in [("keydown", keydown), ("keyup", keyup)] {
            let removed =
                window.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
            match removed {
                Ok(()) => drop(callback),
                Err(e) => {
                    log::warn!("Failed to remove {} listener: {:?}", event, e);
                    // Still attached: leak it rather than free a live callback
                    callback.forget();
                    if result.is_ok() {
                        result = Err(js_err(e));
                    }
                }
            }
        }
        game.borrow_mut().session.release_keys();

        // The frame closure holds a handle to its own cell
        frame_callback.borrow_mut().take();

        log::info!("Vector Parkour stopped");
        result
    }

    fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32> {
        window()?
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(js_err)
    }

    fn start_loop(game: Rc<RefCell<Game>>) -> Result<FrameCallback> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let next = callback.clone();
        let loop_game = game.clone();

        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            let outcome = {
                let mut g = loop_game.borrow_mut();
                let dt = if g.last_time > 0.0 {
                    ((time - g.last_time) / 1000.0) as f32
                } else {
                    1.0 / 60.0
                };
                g.last_time = time;

                let Game {
                    session, surface, ..
                } = &mut *g;
                session.frame(dt, surface)
            };

            match outcome {
                FrameOutcome::Continue => {
                    let id = match next.borrow().as_ref().map(request_frame) {
                        Some(Ok(id)) => Some(id),
                        Some(Err(e)) => {
                            log::error!("requestAnimationFrame failed: {}", e);
                            None
                        }
                        None => None,
                    };
                    loop_game.borrow_mut().frame_id = id;
                }
                FrameOutcome::GameOver(reason) => {
                    let score = {
                        let mut g = loop_game.borrow_mut();
                        g.frame_id = None;
                        g.session.world().score
                    };
                    if let Err(e) = show_game_over(reason, score) {
                        log::warn!("Could not show game over screen: {}", e);
                    }
                }
            }
        }));

        let id = callback.borrow().as_ref().map(request_frame).transpose()?;
        game.borrow_mut().frame_id = id;
        Ok(callback)
    }

    fn show_game_over(reason: EndReason, score: i64) -> Result<()> {
        let document = document()?;
        set_display(&document, GAME_OVER_ID, "block")?;
        if let Some(el) = document.get_element_by_id(FINAL_SCORE_ID) {
            el.set_text_content(Some(&score.to_string()));
        }
        log::info!("Showing game over screen ({}, score {})", reason.as_str(), score);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> vector_parkour::error::Result<()> {
    env_logger::init();
    log::info!("Vector Parkour (native) starting...");
    log::info!("Native mode is a headless demo - build for wasm32 to play in a browser");

    let config = match std::env::args().nth(1) {
        Some(path) => vector_parkour::ParkourConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => vector_parkour::ParkourConfig::default(),
    };

    let summary = headless::run_demo(config, 42, headless::DEMO_FRAMES);
    println!(
        "Demo finished after {} frames: score {}, distance {}m, {}",
        summary.frames,
        summary.score,
        summary.distance,
        summary
            .end_reason
            .map(|r| r.as_str())
            .unwrap_or("still running")
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted run with no display
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use vector_parkour::renderer::RecordingSurface;
    use vector_parkour::sim::EndReason;
    use vector_parkour::{FrameOutcome, GameSession, ParkourConfig};

    /// One minute at 60 Hz
    pub const DEMO_FRAMES: u32 = 3600;
    const JUMP_EVERY: u32 = 45;
    const DASH_EVERY: u32 = 90;

    pub struct DemoSummary {
        pub frames: u32,
        pub score: i64,
        pub distance: i64,
        pub end_reason: Option<EndReason>,
    }

    /// Hold right, hop and dash on a fixed rhythm until the run ends
    pub fn run_demo(config: ParkourConfig, seed: u64, max_frames: u32) -> DemoSummary {
        let mut session = GameSession::launch(800.0, 600.0, seed, config);
        let mut surface = RecordingSurface::default();
        session.key_down("ArrowRight");

        let mut frames = 0;
        while frames < max_frames {
            if frames % JUMP_EVERY == 0 {
                session.key_down(" ");
                session.key_up(" ");
            }
            if frames % DASH_EVERY == 0 {
                session.key_down("Shift");
                session.key_up("Shift");
            }

            surface.clear();
            let outcome = session.frame(1.0 / 60.0, &mut surface);
            frames += 1;
            if frames % 600 == 0 {
                log::debug!(
                    "Frame {}: score {}, {} draw calls",
                    frames,
                    session.world().score,
                    surface.commands.len()
                );
            }
            if let FrameOutcome::GameOver(_) = outcome {
                break;
            }
        }

        let world = session.world();
        DemoSummary {
            frames,
            score: world.score,
            distance: world.distance(),
            end_reason: world.end_reason,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_demo_is_deterministic() {
            let a = run_demo(ParkourConfig::default(), 7, 600);
            let b = run_demo(ParkourConfig::default(), 7, 600);
            assert_eq!(a.frames, b.frames);
            assert_eq!(a.score, b.score);
            assert_eq!(a.end_reason, b.end_reason);
            assert!(a.frames <= 600);
        }
    }
}
