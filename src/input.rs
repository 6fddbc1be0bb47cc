use glam::Vec2;
use web_sys as web;

/// Pointer drag on the scene canvas, tracked in CSS pixels.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, at: Vec2) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last = at;
    }

    /// Movement since the previous sample, or `None` when no drag is active
    /// for this pointer.
    pub fn update(&mut self, pointer_id: i32, at: Vec2) -> Option<Vec2> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.active = false;
        }
    }
}

/// Client coordinates normalised to the viewport, each clamped to [0, 1].
/// Falls back to the centre for a zero-sized viewport.
#[inline]
pub fn normalized_origin(client: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x > 0.0 && viewport.y > 0.0 {
        (client / viewport).clamp(Vec2::ZERO, Vec2::ONE)
    } else {
        Vec2::splat(0.5)
    }
}

#[inline]
pub fn pointer_css_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}
