//! Terminal rendering of the list and the chat transcript.

use crossterm::style::Stylize;
use shared::format::{diet_label, price};
use shared::{render, render_message, FoodItem, ListState, Message, Rendered, Segment};

/// Hint shown whenever a retry is the way out.
pub const RETRY_HINT: &str = "Type /retry to try again.";

/// One line of segments, emphasized runs in bold.
pub fn styled_line(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.emphasized {
                segment.text.as_str().bold().to_string()
            } else {
                segment.text.clone()
            }
        })
        .collect()
}

fn styled_text(text: &str) -> String {
    render(text)
        .iter()
        .map(|line| styled_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Card line for a single item.
pub fn item_line(item: &FoodItem) -> String {
    format!(
        "#{:<3} {}  {}  ★{}  {}  {} kcal",
        item.id,
        styled_text(&item.name),
        price(item.price),
        item.rating,
        diet_label(item.diet),
        item.calories
    )
}

fn items_block(items: &[FoodItem]) -> String {
    if items.is_empty() {
        return format!("No food items found. {}", RETRY_HINT);
    }
    items.iter().map(item_line).collect::<Vec<_>>().join("\n")
}

/// Whole list screen for the given state.
pub fn list_view(state: &ListState) -> String {
    match state {
        ListState::Idle => String::new(),
        ListState::Loading { .. } => "Loading menu...".to_string(),
        ListState::Refreshing { items } => format!("{}\n(refreshing...)", items_block(items)),
        ListState::Ready { items } => items_block(items),
        ListState::Failed { message, items } if items.is_empty() => {
            format!("{}\n{}", message.as_str().red(), RETRY_HINT)
        }
        ListState::Failed { message, items } => format!(
            "{}\n{}\n{}",
            items_block(items),
            message.as_str().red(),
            RETRY_HINT
        ),
    }
}

/// One transcript entry.
pub fn message_view(message: &Message) -> String {
    let speaker = if message.is_user { "You" } else { "Assistant" };
    match render_message(message) {
        Rendered::Welcome { intro, questions } => {
            let mut out = format!("{}: {}", speaker.bold(), intro);
            for (i, question) in questions.iter().enumerate() {
                out.push_str(&format!("\n  {}. {}", i + 1, question));
            }
            out
        }
        Rendered::Lines(lines) => {
            let body = lines
                .iter()
                .map(|line| styled_line(line))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}: {}", speaker.bold(), body)
        }
    }
}
