//! Background-music toggle state.
//!
//! The browser decides whether `play()` succeeds, so the state machine only
//! tracks what the button should show and what the frontend must do next.

pub const TRACK_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/e/e0/Kevin_MacLeod_-_Erik_Satie_Gymnopedie_No_1.ogg";

/// Action the frontend should apply to the media element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Pause,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Playback {
    playing: bool,
    /// The media failed to load; toggling still works but nothing will sound.
    unavailable: bool,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_unavailable(&self) -> bool {
        self.unavailable
    }

    /// Outcome of the autoplay attempt made on mount.
    pub fn on_autoplay(&mut self, allowed: bool) {
        self.playing = allowed;
        if allowed {
            log::info!("[audio] autoplay started");
        } else {
            log::info!("[audio] autoplay blocked, waiting for the button");
        }
    }

    /// Flip the intended state and report what the media element must do.
    pub fn toggle(&mut self) -> PlaybackCommand {
        self.playing = !self.playing;
        if self.playing {
            PlaybackCommand::Play
        } else {
            PlaybackCommand::Pause
        }
    }

    /// A `play()` promise was rejected after a toggle.
    pub fn on_play_rejected(&mut self) {
        self.playing = false;
    }

    pub fn on_load_error(&mut self) {
        log::warn!("[audio] track failed to load");
        self.unavailable = true;
        self.playing = false;
    }

    /// Accessible label for the toggle button.
    pub fn aria_label(&self) -> &'static str {
        if self.playing {
            "Mute music"
        } else {
            "Play music"
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.playing {
            "🔊"
        } else {
            "🔇"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_forces_pause_but_toggle_still_flips() {
        let mut p = Playback::new();
        p.on_autoplay(true);
        p.on_load_error();
        assert!(!p.is_playing());
        assert!(p.is_unavailable());
        assert_eq!(p.toggle(), PlaybackCommand::Play);
    }
}
