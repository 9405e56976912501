//! Snack Snatcher entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use snack_snatcher::consts::FRAMES_PER_SECOND;
    use snack_snatcher::platform::KeyboardInput;
    use snack_snatcher::sim::SpriteView;
    use snack_snatcher::ui::HudScreen;
    use snack_snatcher::{Game, Settings};

    const COLOR_BACKGROUND: &str = "#788374";
    const COLOR_PRIMARY: &str = "#372a39";
    const COLOR_DETAIL: &str = "#f5e9bf";
    const PADDING: f64 = 16.0;

    /// Host state: the game plus the browser-facing pieces around it
    struct Host {
        game: Game,
        keyboard: KeyboardInput,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
    }

    impl Host {
        /// Advance one animation frame
        fn update(&mut self, time: f64) {
            // Ticker delta: 1.0 per frame at 60 fps
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32 * FRAMES_PER_SECOND
            } else {
                1.0
            };
            self.last_time = time;
            self.game.tick(dt.min(6.0), &self.keyboard);
        }

        fn render(&self) {
            let Some(scene) = self.game.scene() else {
                return;
            };
            let ctx = &self.ctx;
            let screen = self.game.settings().screen_rect();
            let field = scene.scene_rect();

            ctx.set_global_alpha(1.0);
            ctx.set_fill_style_str(COLOR_BACKGROUND);
            ctx.fill_rect(0.0, 0.0, screen.width as f64, screen.height as f64);
            ctx.set_fill_style_str(COLOR_PRIMARY);
            ctx.fill_rect(
                0.0,
                field.bottom() as f64,
                screen.width as f64,
                (screen.bottom() - field.bottom()) as f64,
            );

            for sprite in scene.snack_sprites() {
                draw_box(ctx, sprite, 16.0, 16.0, COLOR_DETAIL, true);
            }
            draw_box(ctx, scene.player().sprite(), 32.0, 40.0, COLOR_PRIMARY, false);
            ctx.set_global_alpha(1.0);

            let hud = scene.hud().state();
            ctx.set_fill_style_str(COLOR_DETAIL);
            ctx.set_text_align("center");
            if hud.readouts_visible {
                ctx.set_font("16px monospace");
                let _ = ctx.fill_text(
                    &hud.score_text,
                    screen.width as f64 / 2.0,
                    screen.height as f64 - PADDING,
                );
                ctx.set_text_align("left");
                let _ = ctx.fill_text(
                    &format!("x {}", hud.lives_text),
                    PADDING,
                    screen.height as f64 - PADDING,
                );
            }

            let mut y = match hud.screen {
                HudScreen::Start => field.height as f64 / 2.0,
                HudScreen::Playing | HudScreen::GameOver => screen.height as f64 * 0.4,
            };
            ctx.set_text_align("center");
            for line in &hud.lines {
                ctx.set_font(&format!("{}px monospace", line.font_size));
                let _ = ctx.fill_text(&line.text, screen.width as f64 / 2.0, y);
                y += line.font_size as f64 + 12.0;
            }
        }
    }

    /// Sprites are anchored bottom-center (player) or center (snacks)
    fn draw_box(
        ctx: &CanvasRenderingContext2d,
        sprite: &SpriteView,
        width: f64,
        height: f64,
        color: &str,
        centered: bool,
    ) {
        if !sprite.visible {
            return;
        }
        ctx.set_global_alpha(sprite.alpha as f64);
        ctx.set_fill_style_str(color);
        let x = sprite.x as f64 - width / 2.0;
        let y = if centered {
            sprite.y as f64 - height / 2.0
        } else {
            sprite.y as f64 - height
        };
        ctx.fill_rect(x, y, width, height);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Snack Snatcher starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        // Write back so the stored copy lists every tunable field
        settings.save();
        canvas.set_width(settings.canvas_width as u32);
        canvas.set_height(settings.canvas_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(settings, seed);
        let mut keyboard = KeyboardInput::new();
        game.register_keys(&mut keyboard);
        log::info!("Game initialized with seed: {}", seed);

        let host = Rc::new(RefCell::new(Host {
            game,
            keyboard,
            ctx,
            last_time: 0.0,
        }));

        setup_input_handlers(host.clone());
        request_animation_frame(host);

        log::info!("Snack Snatcher running!");
    }

    fn setup_input_handlers(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();

        for (event, pressed) in [("keydown", true), ("keyup", false)] {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                host.borrow_mut().keyboard.set_pressed(&event.key(), pressed);
            });
            let _ =
                window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys released while unfocused never send keyup
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            host.borrow_mut().keyboard.release_all();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        {
            let mut h = host.borrow_mut();
            h.update(time);
            h.render();
        }

        request_animation_frame(host);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use snack_snatcher::platform::KeyboardInput;
    use snack_snatcher::sim::GameplayState;
    use snack_snatcher::{Game, Settings};

    env_logger::init();
    log::info!("Snack Snatcher (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the wasm build for the real game");

    let frames: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3600);
    let seed: u64 = std::env::args()
        .nth(2)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);

    let mut game = Game::new(Settings::load(), seed);
    let mut keyboard = KeyboardInput::new();
    game.register_keys(&mut keyboard);
    let keys = game.settings().keys.clone();

    for _ in 0..frames {
        let Some(scene) = game.scene() else {
            break;
        };
        if scene.state() == GameplayState::GameOver {
            break;
        }

        // Walk toward the lowest snack still in the air
        let player_x = scene.player().position().x;
        let target = scene
            .snack_sprites()
            .filter(|s| s.alpha >= 1.0)
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|s| s.x)
            .unwrap_or(scene.scene_rect().width / 2.0);
        let delta = target - player_x;
        keyboard.set_pressed(&keys.left, delta < -4.0);
        keyboard.set_pressed(&keys.right, delta > 4.0);
        if scene.state() == GameplayState::Starting {
            keyboard.set_pressed(&keys.right, true);
        }

        game.tick(1.0, &keyboard);
    }

    if let Some(scene) = game.scene() {
        let gameplay = scene.gameplay();
        println!(
            "state: {:?}, score: {}, lives: {}, snack pool: {}",
            gameplay.state(),
            gameplay.score(),
            gameplay.lives(),
            scene.snack_manager().pool_size()
        );
    }
}
