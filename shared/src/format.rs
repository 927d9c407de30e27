//! Text formatting for display: `**` emphasis splitting and small label helpers.

use crate::models::{Diet, Message};
use crate::prompt::{WELCOME_INTRO, WELCOME_QUESTIONS};

/// Emphasis marker.
pub const MARKER: &str = "**";

/// A run of text that is either plain or emphasized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

/// Display form of a transcript message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The fixed welcome template, never marker-split.
    Welcome {
        intro: &'static str,
        questions: &'static [&'static str],
    },
    /// One entry per input line.
    Lines(Vec<Vec<Segment>>),
}

/// Split one line on `**`; odd-indexed pieces are emphasized.
///
/// Empty pieces are kept so the emphasis parity of the rest is preserved.
pub fn split_emphasis(line: &str) -> Vec<Segment> {
    line.split(MARKER)
        .enumerate()
        .map(|(i, piece)| Segment {
            text: piece.to_string(),
            emphasized: i % 2 == 1,
        })
        .collect()
}

/// Split text into lines, then each line into emphasis segments.
pub fn render(text: &str) -> Vec<Vec<Segment>> {
    text.split('\n').map(split_emphasis).collect()
}

/// Render a transcript message.
pub fn render_message(message: &Message) -> Rendered {
    if message.is_welcome {
        Rendered::Welcome {
            intro: WELCOME_INTRO,
            questions: &WELCOME_QUESTIONS,
        }
    } else {
        Rendered::Lines(render(&message.text))
    }
}

/// Currency display, `₹5` or `₹7.5`.
pub fn price(amount: f64) -> String {
    format!("₹{}", amount)
}

pub fn diet_label(diet: Diet) -> &'static str {
    match diet {
        Diet::Vegetarian => "Veg",
        Diet::NonVegetarian => "Non-Veg",
    }
}
