//! Shared library for the food menu screen.
//!
//! This crate provides the data-service and language-model clients, the list
//! and assistant controllers, and the text helpers used by the front-end.

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fakes;
pub mod format;
pub mod list;
pub mod model;
pub mod models;
pub mod prompt;

pub use assistant::{AssistantSession, SubmitOutcome};
pub use catalog::{FoodCatalog, RestCatalog};
pub use config::Config;
pub use error::{Error, Result};
pub use format::{render, render_message, split_emphasis, Rendered, Segment};
pub use list::{ListController, ListState};
pub use model::{GeminiClient, LanguageModel};
pub use models::{Diet, FoodItem, Message};
