use crate::input;
use rose_core::Scene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct OrbitWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<Scene>>,
    pub drag_state: Rc<RefCell<input::DragState>>,
}

/// Pointer drags on the scene canvas rotate the orbit camera.
pub fn wire_orbit_handlers(w: OrbitWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    for name in ["pointerup", "pointercancel"] {
        wire_pointer_release(&w, name);
    }
}

fn listen(canvas: &web::HtmlCanvasElement, name: &str, f: impl FnMut(web::PointerEvent) + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(f) as Box<dyn FnMut(web::PointerEvent)>);
    _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &OrbitWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    listen(&canvas, "pointerdown", move |ev| {
        if ev.button() != 0 {
            return;
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        let pos = input::pointer_css_px(&ev, &w.canvas);
        w.drag_state.borrow_mut().begin(ev.pointer_id(), pos);
    });
}

fn wire_pointermove(w: &OrbitWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    listen(&canvas, "pointermove", move |ev| {
        let pos = input::pointer_css_px(&ev, &w.canvas);
        let delta = w.drag_state.borrow_mut().update(ev.pointer_id(), pos);
        if let Some(d) = delta {
            let height = w.canvas.client_height() as f32;
            w.scene.borrow_mut().drag(d.x, d.y, height);
        }
    });
}

fn wire_pointer_release(w: &OrbitWiring, name: &str) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    listen(&canvas, name, move |ev| {
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        w.drag_state.borrow_mut().end(ev.pointer_id());
    });
}
