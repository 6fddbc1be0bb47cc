//! Timing for the greeting overlay: which text is visible, how far it has
//! faded in, and when the petal rain should start.
//!
//! Everything here is a pure function of seconds since mount, so the DOM side
//! only has to copy `opacity` and `offset_y` onto the elements each frame.

use crate::ease::CubicBezier;

pub const DEFAULT_RECIPIENT: &str = "Navaneetha";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextKind {
    Title,
    Message,
    Subtext,
}

impl TextKind {
    /// CSS class used for the element.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Title => "greeting-title",
            Self::Message => "greeting-message",
            Self::Subtext => "greeting-subtext",
        }
    }
}

/// One timed reveal: fade in from transparent while sliding from `from_y` to 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub delay: f32,
    pub duration: f32,
    /// Starting vertical offset in CSS pixels.
    pub from_y: f32,
    pub curve: CubicBezier,
}

impl Timing {
    pub const fn new(delay: f32, duration: f32, from_y: f32) -> Self {
        Self {
            delay,
            duration,
            from_y,
            curve: CubicBezier::EASE_OUT,
        }
    }

    pub const fn with_curve(mut self, curve: CubicBezier) -> Self {
        self.curve = curve;
        self
    }

    pub fn end(&self) -> f32 {
        self.delay + self.duration
    }

    /// Raw linear progress in \[0, 1\].
    pub fn progress(&self, elapsed: f32) -> f32 {
        if !elapsed.is_finite() || elapsed <= self.delay {
            return 0.0;
        }
        if self.duration <= 0.0 || elapsed >= self.end() {
            return 1.0;
        }
        (elapsed - self.delay) / self.duration
    }

    pub fn reveal(&self, elapsed: f32) -> Reveal {
        let eased = self.curve.apply(self.progress(elapsed));
        Reveal {
            opacity: eased,
            offset_y: self.from_y * (1.0 - eased),
        }
    }
}

/// Visual state of one element at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub opacity: f32,
    pub offset_y: f32,
}

impl Reveal {
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        offset_y: 0.0,
    };

    pub fn is_settled(&self) -> bool {
        self.opacity >= 1.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    pub kind: TextKind,
    pub text: String,
    pub timing: Timing,
    /// Completion of this item starts the petal rain.
    pub triggers_rain: bool,
}

impl TextItem {
    fn new(kind: TextKind, text: impl Into<String>, timing: Timing) -> Self {
        Self {
            kind,
            text: text.into(),
            timing,
            triggers_rain: false,
        }
    }
}

/// The ordered greeting: one title, a few messages and a closing line.
#[derive(Clone, Debug, PartialEq)]
pub struct GreetingScript {
    pub items: Vec<TextItem>,
}

const TITLE: Timing = Timing::new(0.5, 1.5, -20.0);
const MESSAGE_DURATION: f32 = 1.0;
const MESSAGE_RISE: f32 = 20.0;
const SUBTEXT: Timing = Timing::new(8.5, 1.5, 0.0).with_curve(CubicBezier::EASE_IN_OUT);

fn title_for(name: &str) -> String {
    format!("Happy Rose Day, {name} 🌹")
}

fn messages(lines: &[&str], first_delay: f32, step: f32) -> Vec<TextItem> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let delay = first_delay + i as f32 * step;
            TextItem::new(
                TextKind::Message,
                *line,
                Timing::new(delay, MESSAGE_DURATION, MESSAGE_RISE),
            )
        })
        .collect()
}

impl GreetingScript {
    /// Four-step greeting that ends in the petal rain.
    pub fn personal(name: &str) -> Self {
        let mut items = vec![TextItem::new(TextKind::Title, title_for(name), TITLE)];
        items.extend(messages(
            &[
                "I know the MBA exams have been exhausting lately, and your body hasn’t really gotten the rest it deserves.",
                "This is just a small, quiet reminder to slow down for a moment and be gentle with yourself today.",
                "Hope this brings a little calm in between everything.",
            ],
            2.5,
            2.0,
        ));
        let mut closing = TextItem::new(
            TextKind::Subtext,
            "Just wanted to make you smile today.",
            SUBTEXT,
        );
        closing.triggers_rain = true;
        items.push(closing);
        Self { items }
    }

    /// Shorter literary variant without a rain trigger.
    pub fn quote(name: &str) -> Self {
        let mut items = vec![TextItem::new(TextKind::Title, title_for(name), TITLE)];
        items.extend(messages(
            &[
                "What's in a name? That which we call a rose",
                "By any other word would smell as sweet.",
            ],
            2.5,
            2.0,
        ));
        items.push(TextItem::new(
            TextKind::Subtext,
            "William Shakespeare",
            Timing::new(6.5, 1.5, 0.0).with_curve(CubicBezier::EASE_IN_OUT),
        ));
        Self { items }
    }

    /// Pick a script by its query-string name. Unknown names fall back to the
    /// personal greeting.
    pub fn by_name(variant: Option<&str>, name: &str) -> Self {
        match variant {
            Some("quote") => Self::quote(name),
            _ => Self::personal(name),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn reveal(&self, index: usize, elapsed: f32) -> Reveal {
        self.items
            .get(index)
            .map_or(Reveal::HIDDEN, |item| item.timing.reveal(elapsed))
    }

    /// Seconds at which the rain-triggering item finishes, if any.
    pub fn rain_at(&self) -> Option<f32> {
        self.items
            .iter()
            .find(|item| item.triggers_rain)
            .map(|item| item.timing.end())
    }

    pub fn rain_due(&self, elapsed: f32) -> bool {
        self.rain_at().is_some_and(|at| elapsed >= at)
    }

    /// Seconds until every item is fully visible.
    pub fn finished_at(&self) -> f32 {
        self.items
            .iter()
            .map(|item| item.timing.end())
            .fold(0.0, f32::max)
    }
}

impl Default for GreetingScript {
    fn default() -> Self {
        Self::personal(DEFAULT_RECIPIENT)
    }
}

/// Fade-and-rise of the animated image in the corner.
pub const IMAGE_TIMING: Timing = Timing::new(2.0, 1.0, 50.0).with_curve(CubicBezier::EASE_IN_OUT);

/// Clean up a recipient name from the query string. Blank input yields the
/// default recipient.
pub fn recipient_name(raw: Option<&str>) -> String {
    let trimmed: String = raw
        .map(str::trim)
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_control())
        .take(40)
        .collect();
    if trimmed.is_empty() {
        DEFAULT_RECIPIENT.to_owned()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtext_eases_in_and_out() {
        let script = GreetingScript::default();
        let last = script.len() - 1;
        let half = script.reveal(last, 8.5 + 0.75);
        assert!((half.opacity - 0.5).abs() < 1e-3);
        assert_eq!(half.offset_y, 0.0);
        // Slow start, slow finish
        assert!(script.reveal(last, 8.5 + 0.3).opacity < 0.2);
        assert!(script.reveal(last, 8.5 + 1.2).opacity > 0.8);
    }

    #[test]
    fn gift_image_uses_the_symmetric_curve() {
        assert_eq!(IMAGE_TIMING.curve, CubicBezier::EASE_IN_OUT);
        let half = IMAGE_TIMING.reveal(2.5);
        assert!((half.opacity - 0.5).abs() < 1e-3);
        assert!((half.offset_y - 25.0).abs() < 0.1);
    }

    #[test]
    fn quote_script_never_rains() {
        let script = GreetingScript::by_name(Some("quote"), "Ada");
        assert!(script.rain_at().is_none());
        assert!(!script.rain_due(1_000.0));
        assert!(script.items[0].text.contains("Ada"));
    }

    #[test]
    fn names_are_trimmed() {
        assert_eq!(recipient_name(Some("  Ada \n")), "Ada");
        assert_eq!(recipient_name(Some("   ")), DEFAULT_RECIPIENT);
        assert_eq!(recipient_name(None), DEFAULT_RECIPIENT);
    }
}
