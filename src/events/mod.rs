use crate::confetti::ConfettiLayer;
use crate::dom;
use crate::input;
use glam::Vec2;
use rose_core::confetti::ConfettiOptions;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

mod pointer;

pub use pointer::{wire_orbit_handlers, OrbitWiring};

/// Any click on the page fires a small star burst from the pointer.
pub fn wire_click_confetti(confetti: Rc<RefCell<ConfettiLayer>>) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let (w, h) = dom::viewport_css();
        let origin = input::normalized_origin(
            Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
            Vec2::new(w, h),
        );
        confetti
            .borrow_mut()
            .burst(&ConfettiOptions::click_burst(origin));
    }) as Box<dyn FnMut(web::MouseEvent)>);
    _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
