//! Skyburst entry point
//!
//! In the browser: two canvas layers driven by requestAnimationFrame, Web
//! Audio cues, and the page's buttons. Natively: a headless run against
//! recording surfaces that logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement, MouseEvent};

    use skyburst::Settings;
    use skyburst::audio::{ToneSynthesizer, WebAudioSynth, dispatch_events};
    use skyburst::renderer::CanvasSurface;
    use skyburst::sim::{Bounds, LoopControl, LoopDriver, SimulationClock};
    use skyburst::wishes::random_wish;

    /// Everything the page needs, shared by the loops and event handlers
    struct App {
        clock: SimulationClock,
        fireworks_layer: CanvasSurface,
        confetti_layer: CanvasSurface,
        synth: WebAudioSynth,
        settings: Settings,
        fireworks_loop: LoopDriver,
        confetti_loop: LoopDriver,
        /// Picks fortunes for the wish dialog
        wish_rng: Pcg32,
    }

    impl App {
        fn resize(&mut self, width: u32, height: u32) {
            self.fireworks_layer.resize(width, height);
            self.confetti_layer.resize(width, height);
            self.clock.resize(width as f32, height as f32);
        }
    }

    /// Viewport size in pixels (at least 1x1)
    fn viewport() -> (u32, u32) {
        let Some(window) = web_sys::window() else {
            return (1, 1);
        };
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
        };
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Skyburst starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let fireworks_layer = CanvasSurface::from_element_id(&document, "fireworksCanvas")?;
        let confetti_layer = CanvasSurface::from_element_id(&document, "confettiCanvas")?;

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let (width, height) = viewport();

        let clock = SimulationClock::with_seed(
            seed,
            Bounds::new(width as f32, height as f32),
            settings.sim_config(),
        );
        let mut synth = WebAudioSynth::new(Pcg32::seed_from_u64(seed ^ 0xA0D1));
        synth.apply_settings(&settings);

        let app = Rc::new(RefCell::new(App {
            clock,
            fireworks_layer,
            confetti_layer,
            synth,
            settings,
            fireworks_loop: LoopDriver::new(),
            confetti_loop: LoopDriver::new(),
            wish_rng: Pcg32::seed_from_u64(seed.rotate_left(17)),
        }));
        app.borrow_mut().resize(width, height);

        log::info!("Simulation initialized with seed: {}", seed);

        setup_resize(app.clone());
        setup_audio_unlock(&document, app.clone());
        setup_buttons(&document, app.clone());

        request_fireworks_frame(app.clone());
        request_confetti_frame(app);

        log::info!("Skyburst running!");
        Ok(())
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = viewport();
            app.borrow_mut().resize(w, h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Any click on the page is a chance to unlock audio
    fn setup_audio_unlock(document: &Document, app: Rc<RefCell<App>>) {
        let Some(body) = document.body() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().synth.resume();
        });
        let _ = body.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click<F>(target: Option<Element>, id: &str, handler: F)
    where
        F: FnMut(MouseEvent) + 'static,
    {
        let Some(el) = target else {
            log::warn!("Missing {} - control disabled", id);
            return;
        };
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn set_active(document: &Document, id: &str, active: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if active {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
        }
    }

    /// Close a modal when the click lands on its backdrop
    fn close_on_backdrop(document: &Document, id: &'static str) {
        let Some(modal) = document.get_element_by_id(id) else { return };
        let target_modal = modal.clone();
        let doc = document.clone();
        on_click(Some(modal), id, move |event| {
            if let Some(target) = event.target() {
                if js_sys::Object::is(target.as_ref(), target_modal.as_ref()) {
                    set_active(&doc, id, false);
                }
            }
        });
    }

    fn show_wish(document: &Document, app: &Rc<RefCell<App>>) {
        let wish = random_wish(&mut app.borrow_mut().wish_rng);
        if let Some(el) = document.get_element_by_id("wishText") {
            el.set_text_content(Some(wish));
        }
        set_active(document, "wishModal", true);
    }

    /// Current text of the wish input (input or textarea)
    fn take_wish_input(document: &Document) -> Option<String> {
        let el = document.get_element_by_id("userWishInput")?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            let text = input.value();
            input.set_value("");
            Some(text)
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            let text = area.value();
            area.set_value("");
            Some(text)
        } else {
            None
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        // Launch a staggered batch and toggle auto fireworks
        {
            let app = app.clone();
            on_click(document.get_element_by_id("btnFireworks"), "#btnFireworks", move |_| {
                let mut app = app.borrow_mut();
                app.clock.launch_batch();
                let enabled = app.clock.state.auto_spawn;
                app.settings.auto_spawn = enabled;
                app.settings.save();
            });
        }

        // Chime + random fortune
        {
            let app = app.clone();
            let doc = document.clone();
            on_click(document.get_element_by_id("btnWish"), "#btnWish", move |_| {
                app.borrow_mut().synth.play_chime();
                show_wish(&doc, &app);
            });
        }
        {
            let app = app.clone();
            let doc = document.clone();
            on_click(document.get_element_by_id("newWishBtn"), "#newWishBtn", move |_| {
                show_wish(&doc, &app);
            });
        }
        {
            let doc = document.clone();
            on_click(document.query_selector(".close-modal").ok().flatten(), ".close-modal", move |_| {
                set_active(&doc, "wishModal", false);
            });
        }
        close_on_backdrop(document, "wishModal");

        // Custom wish dialog
        {
            let doc = document.clone();
            on_click(document.get_element_by_id("btnWriteWish"), "#btnWriteWish", move |_| {
                set_active(&doc, "writeWishModal", true);
                if let Some(input) = doc
                    .get_element_by_id("userWishInput")
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    let _ = input.focus();
                }
            });
        }
        {
            let doc = document.clone();
            on_click(document.get_element_by_id("closeWriteModal"), "#closeWriteModal", move |_| {
                set_active(&doc, "writeWishModal", false);
            });
        }
        close_on_backdrop(document, "writeWishModal");
        {
            let doc = document.clone();
            on_click(document.get_element_by_id("submitWishBtn"), "#submitWishBtn", move |_| {
                let Some(text) = take_wish_input(&doc) else { return };
                if app.borrow_mut().clock.launch_wish(&text) {
                    set_active(&doc, "writeWishModal", false);
                }
            });
        }
    }

    fn request_fireworks_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            fireworks_frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn fireworks_frame(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut guard = app.borrow_mut();
            let App {
                clock,
                fireworks_layer,
                synth,
                settings,
                fireworks_loop,
                ..
            } = &mut *guard;
            fireworks_loop.step(|_| {
                let events = clock.tick_fireworks(time, fireworks_layer);
                dispatch_events(&events, synth, settings.launch_cues);
                LoopControl::Continue
            })
        };

        if keep_going {
            request_fireworks_frame(app);
        }
    }

    fn request_confetti_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            confetti_frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn confetti_frame(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut guard = app.borrow_mut();
            let App {
                clock,
                confetti_layer,
                confetti_loop,
                ..
            } = &mut *guard;
            confetti_loop.step(|_| {
                clock.tick_confetti(time, confetti_layer);
                LoopControl::Continue
            })
        };

        if keep_going {
            request_confetti_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run().inspect_err(|e| log::error!("Skyburst failed to start: {:?}", e))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use skyburst::Settings;
    use skyburst::audio::{RecordingSynth, dispatch_events};
    use skyburst::renderer::RecordingSurface;
    use skyburst::sim::{Bounds, LoopControl, LoopDriver, SimEvent, SimulationClock};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2026);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);

    log::info!("Skyburst (native) starting with seed {}", seed);
    log::info!("Native mode runs headless; the canvas front end is the wasm32 build");

    let settings = Settings::load();
    let mut clock = SimulationClock::with_seed(seed, Bounds::new(1280.0, 720.0), settings.sim_config());
    let mut fireworks_layer = RecordingSurface::new();
    let mut confetti_layer = RecordingSurface::new();
    let mut synth = RecordingSynth::new();
    let mut driver = LoopDriver::new();

    clock.launch_wish("Headless celebration");

    let frame_ms = 1000.0 / 60.0;
    let mut launches = 0usize;
    let mut explosions = 0usize;
    let mut sounds = 0usize;
    let mut peak_particles = 0usize;

    let ran = driver.run(ticks, |tick| {
        let now = tick as f64 * frame_ms;
        let events = clock.tick_fireworks(now, &mut fireworks_layer);
        clock.tick_confetti(now, &mut confetti_layer);
        dispatch_events(&events, &mut synth, settings.launch_cues);

        for event in &events {
            match event {
                SimEvent::Launched { .. } => launches += 1,
                SimEvent::Exploded { .. } => explosions += 1,
                _ => {}
            }
        }
        sounds += synth.take().len();
        peak_particles = peak_particles.max(clock.state.live_particles());

        fireworks_layer.take();
        confetti_layer.take();

        if tick % 60 == 0 {
            log::info!(
                "t={:.1}s fireworks={} particles={} auto={}",
                now / 1000.0,
                clock.state.fireworks.len(),
                clock.state.live_particles(),
                clock.state.auto_spawn,
            );
        }
        LoopControl::Continue
    });

    println!(
        "{} ticks: {} launches, {} explosions, {} sound primitives, peak {} particles",
        ran, launches, explosions, sounds, peak_particles
    );
}
