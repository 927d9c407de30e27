//! Prompt construction for the menu assistant.

use crate::format::{diet_label, price};
use crate::models::FoodItem;

/// Instruction placed before the catalog.
pub const PREAMBLE: &str = "You are a friendly food assistant for a restaurant menu. \
Recommend items from the list below that best match the customer's request. \
Consider price, rating, dietary preference (veg or non-veg) and calories, \
and briefly explain each pick. Highlight item names in **bold**. \
Only recommend items that appear in the list.";

/// Opening line of the welcome message.
pub const WELCOME_INTRO: &str = "Hi! I can help you choose something from the menu. Tell me a little about what you want:";

/// Fixed questions shown in the welcome message.
pub const WELCOME_QUESTIONS: [&str; 4] = [
    "What is your budget?",
    "Do you prefer veg or non-veg?",
    "Do you have a calorie target?",
    "Any cuisine you are in the mood for?",
];

/// Plain-text form of the welcome message stored in the transcript.
pub fn welcome_text() -> String {
    let mut text = WELCOME_INTRO.to_string();
    for (i, question) in WELCOME_QUESTIONS.iter().enumerate() {
        text.push_str(&format!("\n{}. {}", i + 1, question));
    }
    text
}

/// One catalog line, e.g. `Soup (Price: ₹5, Rating: 4.2, Veg, 120 kcal)`.
pub fn describe_item(item: &FoodItem) -> String {
    format!(
        "{} (Price: {}, Rating: {}, {}, {} kcal)",
        item.name,
        price(item.price),
        item.rating,
        diet_label(item.diet),
        item.calories
    )
}

/// Full prompt for one user turn.
pub fn build_prompt(items: &[FoodItem], question: &str) -> String {
    let catalog = items
        .iter()
        .map(describe_item)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\nAvailable food items:\n{}\n\nCustomer question: {}",
        PREAMBLE, catalog, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Diet;

    fn item(id: i64, name: &str, price: f64, diet: Diet) -> FoodItem {
        FoodItem {
            id,
            name: name.to_string(),
            price,
            rating: 4.2,
            diet,
            calories: 120,
            image_url: "u".to_string(),
        }
    }

    #[test]
    fn test_describe_item() {
        assert_eq!(
            describe_item(&item(2, "Soup", 5.0, Diet::Vegetarian)),
            "Soup (Price: ₹5, Rating: 4.2, Veg, 120 kcal)"
        );
        assert_eq!(
            describe_item(&item(3, "Kebab", 7.5, Diet::NonVegetarian)),
            "Kebab (Price: ₹7.5, Rating: 4.2, Non-Veg, 120 kcal)"
        );
    }

    #[test]
    fn test_build_prompt_lists_every_item_once_per_line() {
        let items = vec![
            item(1, "Cake", 3.0, Diet::Vegetarian),
            item(2, "Soup", 5.0, Diet::Vegetarian),
        ];
        let prompt = build_prompt(&items, "something sweet under 4?");

        assert!(prompt.starts_with(PREAMBLE));
        assert!(prompt.contains("Cake (Price: ₹3, Rating: 4.2, Veg, 120 kcal)\nSoup (Price: ₹5"));
        assert!(prompt.ends_with("Customer question: something sweet under 4?"));
    }

    #[test]
    fn test_build_prompt_with_empty_catalog() {
        let prompt = build_prompt(&[], "hello");
        assert!(prompt.contains("Available food items:\n\n"));
    }

    #[test]
    fn test_welcome_text_numbers_questions() {
        let text = welcome_text();
        assert!(text.starts_with(WELCOME_INTRO));
        assert!(text.contains("\n1. What is your budget?"));
        assert!(text.ends_with("4. Any cuisine you are in the mood for?"));
    }
}
