use crate::constants::AUDIO_TOGGLE_ID;
use crate::dom;
use rose_core::playback::{Playback, PlaybackCommand, TRACK_URL};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Looping background track plus the floating mute button.
#[derive(Clone)]
pub struct MusicPlayer {
    audio: web::HtmlAudioElement,
    button: Option<web::HtmlElement>,
    state: Rc<RefCell<Playback>>,
}

impl MusicPlayer {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let audio = web::HtmlAudioElement::new_with_src(TRACK_URL)
            .map_err(|e| anyhow::anyhow!("audio element: {:?}", e))?;
        audio.set_loop(true);
        let button = match dom::by_id::<web::HtmlElement>(document, AUDIO_TOGGLE_ID) {
            Ok(b) => Some(b),
            Err(e) => {
                log::warn!("[audio] {}", e);
                None
            }
        };
        let player = Self {
            audio,
            button,
            state: Rc::new(RefCell::new(Playback::new())),
        };

        let on_error = player.clone();
        dom::add_error_listener(&player.audio, move || {
            on_error.state.borrow_mut().on_load_error();
            on_error.sync_button();
        });

        let on_click = player.clone();
        dom::add_click_listener(document, AUDIO_TOGGLE_ID, move || on_click.toggle());

        player.sync_button();
        Ok(player)
    }

    /// Try to start playback without a user gesture. Browsers usually refuse.
    pub fn autoplay(&self) {
        let player = self.clone();
        spawn_local(async move {
            let allowed = player.play().await;
            player.state.borrow_mut().on_autoplay(allowed);
            player.sync_button();
        });
    }

    fn toggle(&self) {
        let command = self.state.borrow_mut().toggle();
        self.sync_button();
        match command {
            PlaybackCommand::Pause => {
                _ = self.audio.pause();
            }
            PlaybackCommand::Play => {
                let player = self.clone();
                spawn_local(async move {
                    if !player.play().await {
                        player.state.borrow_mut().on_play_rejected();
                        player.sync_button();
                    }
                });
            }
        }
    }

    async fn play(&self) -> bool {
        match self.audio.play() {
            Ok(promise) => match JsFuture::from(promise).await {
                Ok(_) => true,
                Err(e) => {
                    log::info!("[audio] play() rejected: {:?}", e);
                    false
                }
            },
            Err(e) => {
                log::info!("[audio] play() threw: {:?}", e);
                false
            }
        }
    }

    fn sync_button(&self) {
        let Some(button) = &self.button else {
            return;
        };
        let state = self.state.borrow();
        _ = button.set_attribute("aria-label", state.aria_label());
        button.set_text_content(Some(state.icon()));
    }
}
