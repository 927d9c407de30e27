//! Menu screen - food list with a chat assistant, in the terminal.
//!
//! Loads the food list on start and keeps it on screen. `/refresh` re-fetches
//! in the background, `/retry` runs a full load, `/list` redraws, and any other
//! line is sent to the assistant. Only one assistant request runs at a time.

mod view;

use std::sync::Arc;

use anyhow::Context;
use shared::{
    AssistantSession, Config, GeminiClient, ListController, ListState, RestCatalog,
    SubmitOutcome,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application state
struct AppState {
    list: ListController,
    assistant: AssistantSession,
}

impl AppState {
    fn new(config: &Config) -> anyhow::Result<Self> {
        let http_client = config
            .http_client()
            .context("Failed to build HTTP client")?;

        let catalog = RestCatalog::from_config(http_client.clone(), config);
        let model = GeminiClient::from_config(http_client, config);

        Ok(Self {
            list: ListController::new(Arc::new(catalog)),
            assistant: AssistantSession::new(Arc::new(model)),
        })
    }
}

/// Commands typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Refresh,
    Retry,
    List,
    Transcript,
    Quit,
    Chat(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "/refresh" => Command::Refresh,
        "/retry" => Command::Retry,
        "/list" => Command::List,
        "/chat" => Command::Transcript,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Chat(line),
    }
}

/// Redraw the list on every state change.
async fn watch_list(mut rx: tokio::sync::watch::Receiver<ListState>) {
    while rx.changed().await.is_ok() {
        let rendered = view::list_view(&rx.borrow_and_update());
        if !rendered.is_empty() {
            println!("{}\n", rendered);
        }
    }
}

fn spawn_submit(state: &Arc<AppState>, text: String) {
    let state = Arc::clone(state);
    tokio::spawn(async move {
        // Snapshot at send time; later refreshes do not change this request.
        let items = state.list.items();
        match state.assistant.submit(&text, &items).await {
            SubmitOutcome::Replied(message) | SubmitOutcome::Failed(message) => {
                println!("{}\n", view::message_view(&message));
            }
            SubmitOutcome::Busy => {
                println!("Still waiting for the previous answer...\n");
            }
            SubmitOutcome::Ignored => {}
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let state = Arc::new(AppState::new(&config)?);
    info!(table = %config.food_table, model = %config.gemini_model, "Menu screen starting");

    let watcher = tokio::spawn(watch_list(state.list.subscribe()));
    state.list.load().await;

    for message in state.assistant.transcript() {
        println!("{}\n", view::message_view(&message));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "Failed to read input");
                break;
            }
        };

        match parse_command(&line) {
            Command::Refresh => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    state.list.refresh().await;
                });
            }
            Command::Retry => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    state.list.load().await;
                });
            }
            Command::List => println!("{}\n", view::list_view(&state.list.state())),
            Command::Transcript => {
                for message in state.assistant.transcript() {
                    println!("{}\n", view::message_view(&message));
                }
            }
            Command::Quit => break,
            Command::Chat(text) => spawn_submit(&state, text.to_string()),
        }
    }

    watcher.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command(" /refresh "), Command::Refresh);
        assert_eq!(parse_command("/retry"), Command::Retry);
        assert_eq!(parse_command("/exit"), Command::Quit);
        assert_eq!(parse_command("veg under 200?"), Command::Chat("veg under 200?"));
    }

    #[test]
    fn test_unknown_slash_is_chat() {
        assert_eq!(parse_command("/menu"), Command::Chat("/menu"));
    }
}
