use crate::confetti::ConfettiLayer;
use crate::constants::{MAX_FRAME_DT, READY_CLASS};
use crate::dom;
use crate::overlay::Overlay;
use crate::render;
use instant::Instant;
use rose_core::Scene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Rc<RefCell<Scene>>,
    pub gpu: Option<render::GpuState>,
    pub overlay: Overlay,
    pub confetti: Rc<RefCell<ConfettiLayer>>,

    pub canvas: web::HtmlCanvasElement,
    pub placeholder: Option<web::HtmlElement>,
    pub revealed: bool,

    pub started: Instant,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT);
        self.last_instant = now;
        let elapsed = (now - self.started).as_secs_f32();

        let css_w = self.canvas.client_width() as f32;
        let css_h = self.canvas.client_height() as f32;
        {
            let mut scene = self.scene.borrow_mut();
            scene.resize(css_w, css_h);
            scene.update(dt_sec);
        }

        self.overlay.apply(elapsed);
        {
            let mut confetti = self.confetti.borrow_mut();
            if !confetti.rain_started() && self.overlay.script().rain_due(elapsed) {
                confetti.start_rain(elapsed);
            }
            confetti.frame(elapsed, dt_sec);
        }

        self.render(css_h);
    }

    fn render(&mut self, css_height: f32) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        let scene = self.scene.borrow();
        match gpu.render(&scene, css_height) {
            Ok(()) => {
                if !self.revealed {
                    self.revealed = true;
                    reveal_canvas(&self.canvas, self.placeholder.as_ref());
                }
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost; reconfiguring");
                gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {}
            Err(e) => log::error!("[gpu] render error: {:?}", e),
        }
    }
}

fn reveal_canvas(canvas: &web::HtmlCanvasElement, placeholder: Option<&web::HtmlElement>) {
    _ = canvas.class_list().add_1(READY_CLASS);
    if let Some(p) = placeholder {
        dom::set_style(p, "display", "none");
    }
    log::info!("[gpu] first frame presented");
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement, scene: &Scene) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, scene).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
