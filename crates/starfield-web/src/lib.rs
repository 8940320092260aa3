pub mod canvas;
pub mod dom;
pub mod frame;
pub mod listeners;
pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;

use starfield::{ElementProbe, InputEvent, LocaleBurst, SceneConfig, SceneError, SceneState, ShapeTable};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::canvas::Canvas2dSurface;
use crate::dom::DomElementProbe;
use crate::frame::FrameLoop;
use crate::listeners::ListenerRegistry;

/// Browser-side handles of a mounted scene. Dropping them cancels the
/// frame loop and detaches every listener.
struct Bindings {
    _frame_loop: FrameLoop,
    _listeners: ListenerRegistry,
    _coarse_query: Option<web::MediaQueryList>,
}

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
    static BINDINGS: RefCell<Option<Bindings>> = RefCell::new(None);
}

/// Run `f` against the mounted runner. `None` when nothing is mounted.
fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn to_js(err: SceneError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn push_input(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

fn on_frame(now_ms: f64) {
    if with_runner(|r| r.frame(now_ms)) == Some(true) {
        dom::mark_low_perf();
    }
}

/// Mount the scene on the canvas with id `canvas_id`.
///
/// `config_json` may override any subset of the tuning and `shapes_json`
/// replaces the skill shape table. Either failing to parse is reported as an
/// error; a missing canvas or 2D context is logged and the mount silently
/// does nothing.
#[wasm_bindgen]
pub fn scene_mount(canvas_id: &str, config_json: Option<String>, shapes_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref() {
        Some(json) => SceneConfig::from_json(json).map_err(to_js)?,
        None => SceneConfig::default(),
    };
    let shapes = match shapes_json.as_deref() {
        Some(json) => ShapeTable::from_json(json).map_err(to_js)?,
        None => ShapeTable::default(),
    };

    scene_unmount();

    let Some(window) = web::window() else {
        log::warn!("scene: no window, not mounting");
        return Ok(());
    };
    let canvas = window
        .document()
        .and_then(|d| d.get_element_by_id(canvas_id))
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok());
    let Some(canvas) = canvas else {
        log::warn!("scene: no canvas '{}', not mounting", canvas_id);
        return Ok(());
    };
    let surface = match Canvas2dSurface::new(canvas) {
        Ok(surface) => surface,
        Err(e) => {
            log::warn!("scene: {}, not mounting", e);
            return Ok(());
        }
    };

    let coarse_query = dom::coarse_pointer_query(&window);
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 ^ (js_sys::Date::now() as u64);
    let mut scene = SceneState::new(config, seed).with_shapes(shapes);
    scene.set_pointer_mode(coarse_query.as_ref().is_some_and(|q| q.matches()));
    let (width, height, dpr) = dom::viewport_metrics(&window);
    scene.resize(width, height, dpr);

    RUNNER.with(|cell| *cell.borrow_mut() = Some(SceneRunner::new(scene, Box::new(surface))));

    let listeners = listeners::install(&window, coarse_query.as_ref(), push_input);
    let frame_loop = FrameLoop::start(on_frame);
    BINDINGS.with(|cell| {
        *cell.borrow_mut() = Some(Bindings {
            _frame_loop: frame_loop,
            _listeners: listeners,
            _coarse_query: coarse_query,
        })
    });

    log::info!("scene: mounted on #{}", canvas_id);
    Ok(())
}

/// Stop the frame loop, detach listeners and drop the scene.
#[wasm_bindgen]
pub fn scene_unmount() {
    let bindings = BINDINGS.with(|cell| cell.borrow_mut().take());
    let runner = RUNNER.with(|cell| cell.borrow_mut().take());
    if bindings.is_some() || runner.is_some() {
        drop(bindings);
        drop(runner);
        log::info!("scene: unmounted");
    }
}

// ---- Props ----

#[wasm_bindgen]
pub fn scene_set_active_section(id: Option<String>) {
    with_runner(|r| r.scene_mut().set_active_section(id.as_deref()));
}

/// Trigger a burst. Repeating the same `id` is a no-op.
#[wasm_bindgen]
pub fn scene_locale_burst(id: f64, x: f32, y: f32) {
    let burst = LocaleBurst { id: id as u64, x, y };
    with_runner(|r| r.scene_mut().trigger_locale_burst(&burst));
}

#[wasm_bindgen]
pub fn scene_set_hovered_skill(name: Option<String>) {
    with_runner(|r| r.scene_mut().set_hovered_skill(name.as_deref()));
}

#[wasm_bindgen]
pub fn scene_set_target_element(element: Option<web::Element>) {
    with_runner(|r| {
        r.scene_mut()
            .set_target_element(element.map(|el| Box::new(DomElementProbe::new(el)) as Box<dyn ElementProbe>))
    });
}

#[wasm_bindgen]
pub fn scene_set_hovered_project(element: Option<web::Element>) {
    with_runner(|r| {
        r.scene_mut()
            .set_project_element(element.map(|el| Box::new(DomElementProbe::new(el)) as Box<dyn ElementProbe>))
    });
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn scene_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn scene_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn scene_is_low_perf() -> bool {
    with_runner(|r| r.is_low_perf()).unwrap_or(false)
}
