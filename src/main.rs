//! Driftfield entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_backdrop {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use driftfield::config::BackdropConfig;
    use driftfield::profile::{CapabilityProfile, Signals};
    use driftfield::renderer::{Camera, RenderState};
    use driftfield::session::Session;

    const MESH_URL: &str = "assets/backdrop.mesh";
    const CONFIG_ELEMENT_ID: &str = "backdrop-config";
    const CANVAS_ID: &str = "backdrop-canvas";
    const FALLBACK_BACKGROUND: &str = "linear-gradient(135deg, #FDF6E7, #F8FCFF)";

    /// Browsers report ratios above 2 on some phones; rendering the
    /// backdrop at that density is wasted fill rate.
    const MAX_PIXEL_RATIO: f64 = 2.0;

    struct App {
        session: Session,
        camera: Camera,
        render_state: RenderState,
        canvas: HtmlCanvasElement,
    }

    impl App {
        fn render(&mut self, time_secs: f32) {
            self.session.advance(time_secs);
            match self
                .render_state
                .render(&self.camera, self.session.instances.raw())
            {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.render_state.resize(width, height);
            self.camera.set_aspect(width as f32, height as f32);
        }
    }

    fn media_matches(window: &web_sys::Window, query: &str) -> bool {
        window
            .match_media(query)
            .ok()
            .flatten()
            .map(|m| m.matches())
            .unwrap_or(false)
    }

    /// Read the optional inline JSON config; DOM tuning wins over the
    /// built-in defaults, bad JSON loses loudly.
    fn load_config(document: &web_sys::Document) -> BackdropConfig {
        let Some(text) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return BackdropConfig::default();
        };
        match BackdropConfig::from_json(&text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid backdrop config, using defaults: {}", e);
                BackdropConfig::default()
            }
        }
    }

    /// Leave the page on its static visual when the backdrop cannot start.
    fn apply_fallback(document: &web_sys::Document) {
        if let Some(body) = document.body() {
            let _ = body.style().set_property("background", FALLBACK_BACKGROUND);
        }
        if let Some(canvas) = document.get_element_by_id(CANVAS_ID) {
            let _ = canvas.set_attribute("class", "hidden");
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Driftfield starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = load_config(&document);
        let signals = Signals {
            viewport_width: window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as f32,
            reduced_motion: media_matches(&window, "(prefers-reduced-motion: reduce)"),
            reduced_data: media_matches(&window, "(prefers-reduced-data: reduce)"),
        };
        let profile = CapabilityProfile::resolve(&signals, &config);
        log::info!(
            "Profile: {} instances, simulate={}, data_capped={}",
            profile.instance_count,
            profile.simulate,
            profile.data_capped
        );

        // The one async acquisition; everything after it is synchronous.
        let mesh = match driftfield::assets::fetch_mesh(MESH_URL).await {
            Ok(mesh) => mesh,
            Err(e) => {
                log::warn!("Mesh load failed, keeping static fallback: {:#}", e);
                apply_fallback(&document);
                return;
            }
        };
        log::info!(
            "Mesh loaded: {} vertices, {} indices",
            mesh.vertices.len(),
            mesh.indices.len()
        );

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::warn!("No surface, keeping static fallback: {:?}", e);
                apply_fallback(&document);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::warn!("No adapter, keeping static fallback: {:?}", e);
                apply_fallback(&document);
                return;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = match RenderState::new(
            surface,
            &adapter,
            width,
            height,
            &mesh,
            profile.instance_count,
        )
        .await
        {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Renderer init failed, keeping static fallback: {:#}", e);
                apply_fallback(&document);
                return;
            }
        };

        let session = Session::new(&config, profile);
        let camera = Camera::new(width as f32 / height.max(1) as f32);

        let app = Rc::new(RefCell::new(App {
            session,
            camera,
            render_state,
            canvas: canvas.clone(),
        }));

        if profile.simulate {
            setup_pointer_handlers(&canvas, app.clone());
        }
        setup_resize_handler(app.clone());

        request_animation_frame(app);

        log::info!("Driftfield running!");
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse move anywhere on the page steers the force field
        {
            let app = app.clone();
            let canvas = canvas.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                let mut a = app.borrow_mut();
                let camera = a.camera;
                a.session.pointer.update(
                    event.client_x() as f32 - rect.left() as f32,
                    event.client_y() as f32 - rect.top() as f32,
                    rect.width() as f32,
                    rect.height() as f32,
                    &camera,
                );
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // First touch steers the same way
        {
            let app = app.clone();
            let canvas = canvas.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas.get_bounding_client_rect();
                    let mut a = app.borrow_mut();
                    let camera = a.camera;
                    a.session.pointer.update(
                        touch.client_x() as f32 - rect.left() as f32,
                        touch.client_y() as f32 - rect.top() as f32,
                        rect.width() as f32,
                        rect.height() as f32,
                        &camera,
                    );
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            let dpr = window_clone.device_pixel_ratio().min(MAX_PIXEL_RATIO);
            let width = (a.canvas.client_width() as f64 * dpr) as u32;
            let height = (a.canvas.client_height() as f64 * dpr) as u32;
            a.resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().render((time / 1000.0) as f32);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_backdrop::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use driftfield::config::BackdropConfig;
    use driftfield::consts;
    use driftfield::profile::{CapabilityProfile, Signals};
    use driftfield::session::Session;

    env_logger::init();
    log::info!("Driftfield (native) starting...");
    log::info!("Rendering requires a browser - run with `trunk serve` for the web version");

    // Headless smoke run: spawn a desktop-tier session and let it settle
    let config = BackdropConfig::default();
    let profile = CapabilityProfile::resolve(
        &Signals {
            viewport_width: 1920.0,
            reduced_motion: false,
            reduced_data: false,
        },
        &config,
    );
    let mut session = Session::new(&config, profile);
    log::info!("Stepping {} bodies for 10 simulated seconds", session.world.len());

    for frame in 0..600 {
        session.advance(frame as f32 * consts::STEP_DT_MS / 1000.0);
    }

    let max_speed = session
        .world
        .bodies()
        .iter()
        .map(|b| b.vel.length())
        .fold(0.0f32, f32::max);
    log::info!(
        "Done: {} ticks, max body speed {:.3}",
        session.ticks(),
        max_speed
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
