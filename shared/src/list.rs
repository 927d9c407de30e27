//! Food list lifecycle: load, refresh, and failure handling.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::catalog::FoodCatalog;
use crate::models::FoodItem;

/// Lifecycle of the displayed food list.
///
/// Every state after the first fetch attempt carries the items currently on
/// screen, so a failing or in-flight fetch never blanks the list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    /// Nothing requested yet.
    Idle,
    /// Full-screen load in flight.
    Loading { items: Arc<[FoodItem]> },
    /// Pull-to-refresh in flight.
    Refreshing { items: Arc<[FoodItem]> },
    /// Last fetch succeeded.
    Ready { items: Arc<[FoodItem]> },
    /// Last fetch failed; `items` is whatever was shown before.
    Failed {
        message: String,
        items: Arc<[FoodItem]>,
    },
}

impl ListState {
    pub fn items(&self) -> Arc<[FoodItem]> {
        match self {
            ListState::Idle => Arc::from(Vec::new()),
            ListState::Loading { items }
            | ListState::Refreshing { items }
            | ListState::Ready { items }
            | ListState::Failed { items, .. } => Arc::clone(items),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading { .. })
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self, ListState::Refreshing { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FetchMode {
    Load,
    Refresh,
}

/// Owns the food list and its fetch lifecycle.
///
/// `load` and `refresh` are not mutually exclusive: overlapping calls race
/// and whichever response resolves last wins.
pub struct ListController {
    catalog: Arc<dyn FoodCatalog>,
    state: watch::Sender<ListState>,
}

impl ListController {
    /// Create a controller over the given catalog.
    pub fn new(catalog: Arc<dyn FoodCatalog>) -> Self {
        let (state, _) = watch::channel(ListState::Idle);
        Self { catalog, state }
    }

    /// Full load, shown with a blocking spinner.
    pub async fn load(&self) -> ListState {
        self.fetch(FetchMode::Load).await
    }

    /// Same as `load`, but keeps the current list visible with a light indicator.
    pub async fn refresh(&self) -> ListState {
        self.fetch(FetchMode::Refresh).await
    }

    async fn fetch(&self, mode: FetchMode) -> ListState {
        // Entering either in-flight state drops any previous error.
        self.state.send_modify(|state| {
            let items = state.items();
            *state = match mode {
                FetchMode::Load => ListState::Loading { items },
                FetchMode::Refresh => ListState::Refreshing { items },
            };
        });

        let result = self.catalog.fetch_all().await;

        self.state.send_modify(|state| {
            *state = match result {
                Ok(fetched) => {
                    let items = normalize(fetched);
                    info!(count = items.len(), ?mode, "Food list updated");
                    ListState::Ready {
                        items: Arc::from(items),
                    }
                }
                Err(e) => {
                    warn!(error = %e, ?mode, "Failed to fetch food list");
                    ListState::Failed {
                        message: e.to_string(),
                        items: state.items(),
                    }
                }
            };
        });

        self.state()
    }

    /// Current state.
    pub fn state(&self) -> ListState {
        self.state.borrow().clone()
    }

    /// Snapshot of the displayed items.
    pub fn items(&self) -> Arc<[FoodItem]> {
        self.state.borrow().items()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.borrow().is_refreshing()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error().map(str::to_string)
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().items().is_empty()
    }

    /// Receive every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.subscribe()
    }
}

/// Sort by id ascending and drop repeated ids, keeping the first occurrence.
fn normalize(mut items: Vec<FoodItem>) -> Vec<FoodItem> {
    items.sort_by_key(|item| item.id);

    let mut seen = HashSet::with_capacity(items.len());
    let before = items.len();
    items.retain(|item| seen.insert(item.id));

    if items.len() != before {
        warn!(dropped = before - items.len(), "Dropped duplicate food ids");
    }
    items
}
