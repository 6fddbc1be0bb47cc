#![cfg(target_arch = "wasm32")]
use instant::Instant;
use rose_core::overlay::{recipient_name, GreetingScript};
use rose_core::{Scene, SceneParams};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod confetti;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use constants::*;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("rose-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let started = Instant::now();

    let name = recipient_name(dom::query_param(QUERY_RECIPIENT).as_deref());
    let variant = dom::query_param(QUERY_GREETING);
    let script = GreetingScript::by_name(variant.as_deref(), &name);
    let overlay = overlay::Overlay::build(&document, script)?;

    match audio::MusicPlayer::new(&document) {
        Ok(player) => player.autoplay(),
        Err(e) => log::warn!("[audio] disabled: {:?}", e),
    }

    let confetti = Rc::new(RefCell::new(confetti::ConfettiLayer::new(&document)?));
    events::wire_click_confetti(confetti.clone());

    let canvas: web::HtmlCanvasElement = dom::by_id(&document, ROSE_CANVAS_ID)?;
    wire_canvas_resize(&canvas);
    let scene = Scene::new(
        SceneParams::default(),
        canvas.client_width() as f32,
        canvas.client_height() as f32,
    )?;

    // Overlay, music and confetti keep running without WebGPU
    let gpu = frame::init_gpu(&canvas, &scene).await;
    let scene = Rc::new(RefCell::new(scene));
    events::wire_orbit_handlers(events::OrbitWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
    });
    if gpu.is_some() {
        log::info!("[gpu] ready");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        gpu,
        overlay,
        confetti,
        canvas,
        placeholder: dom::by_id(&document, PLACEHOLDER_ID).ok(),
        revealed: false,
        started,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
