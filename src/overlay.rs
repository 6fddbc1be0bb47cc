use crate::constants::{GIFT_IMAGE_ID, GIFT_IMAGE_URL, OVERLAY_ID};
use crate::dom;
use rose_core::overlay::{GreetingScript, Reveal, IMAGE_TIMING};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Greeting text and gift image layered over the scene. Elements are created
/// once; each frame only rewrites the styles of items still animating.
pub struct Overlay {
    script: GreetingScript,
    lines: Vec<web::HtmlElement>,
    applied: Vec<Option<Reveal>>,
    image: Option<web::HtmlElement>,
    image_applied: Option<Reveal>,
}

impl Overlay {
    pub fn build(document: &web::Document, script: GreetingScript) -> anyhow::Result<Self> {
        let root: web::HtmlElement = dom::by_id(document, OVERLAY_ID)?;
        root.set_inner_html("");
        let mut lines = Vec::with_capacity(script.len());
        for item in &script.items {
            let el = document
                .create_element("p")
                .map_err(|e| anyhow::anyhow!("create_element: {:?}", e))?
                .dyn_into::<web::HtmlElement>()
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            el.set_class_name(item.kind.class_name());
            el.set_text_content(Some(&item.text));
            paint(&el, Reveal::HIDDEN);
            root.append_child(&el)
                .map_err(|e| anyhow::anyhow!("append_child: {:?}", e))?;
            lines.push(el);
        }
        let image = gift_image(document);
        log::info!("[overlay] {} lines", lines.len());
        Ok(Self {
            applied: vec![None; lines.len()],
            script,
            lines,
            image,
            image_applied: None,
        })
    }

    pub fn script(&self) -> &GreetingScript {
        &self.script
    }

    pub fn apply(&mut self, elapsed: f32) {
        for (i, el) in self.lines.iter().enumerate() {
            let reveal = self.script.reveal(i, elapsed);
            if self.applied[i] != Some(reveal) {
                paint(el, reveal);
                self.applied[i] = Some(reveal);
            }
        }
        if let Some(img) = &self.image {
            let reveal = IMAGE_TIMING.reveal(elapsed);
            if self.image_applied != Some(reveal) {
                paint(img, reveal);
                self.image_applied = Some(reveal);
            }
        }
    }
}

fn paint(el: &web::HtmlElement, reveal: Reveal) {
    dom::set_style(el, "opacity", &format!("{:.3}", reveal.opacity));
    dom::set_style(
        el,
        "transform",
        &format!("translateY({:.2}px)", reveal.offset_y),
    );
}

// Missing or broken image degrades to no image.
fn gift_image(document: &web::Document) -> Option<web::HtmlElement> {
    let img: web::HtmlImageElement = match dom::by_id(document, GIFT_IMAGE_ID) {
        Ok(img) => img,
        Err(e) => {
            log::warn!("[overlay] {}", e);
            return None;
        }
    };
    let on_error = img.clone();
    dom::add_error_listener(&img, move || {
        log::warn!("[overlay] gift image failed to load; hiding it");
        dom::set_style(&on_error, "display", "none");
    });
    img.set_src(GIFT_IMAGE_URL);
    paint(&img, Reveal::HIDDEN);
    Some(img.into())
}
