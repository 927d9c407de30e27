//! Scripted in-memory stand-ins for the data service and the model endpoint.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::catalog::FoodCatalog;
use crate::model::LanguageModel;
use crate::models::{Diet, FoodItem};
use crate::{Error, Result};

/// Build a plain vegetarian item for fixtures.
pub fn sample_item(id: i64, name: &str) -> FoodItem {
    FoodItem {
        id,
        name: name.to_string(),
        price: 5.0,
        rating: 4.0,
        diet: Diet::Vegetarian,
        calories: 200,
        image_url: format!("https://img.example/{}.png", id),
    }
}

/// Release handle for a gated fake.
#[derive(Clone)]
pub struct GateHandle(Arc<Semaphore>);

impl GateHandle {
    /// Let one held (or future) call through.
    pub fn release(&self) {
        self.0.add_permits(1);
    }
}

/// Holds each call until released, when enabled.
#[derive(Default)]
struct Gate(Mutex<Option<Arc<Semaphore>>>);

impl Gate {
    fn enable(&self) -> GateHandle {
        let mut slot = self.0.lock().unwrap_or_else(|e| e.into_inner());
        GateHandle(Arc::clone(
            slot.get_or_insert_with(|| Arc::new(Semaphore::new(0))),
        ))
    }

    async fn pass(&self) {
        let semaphore = self.0.lock().unwrap_or_else(|e| e.into_inner()).clone();
        if let Some(semaphore) = semaphore {
            if let Ok(permit) = semaphore.acquire().await {
                permit.forget();
            }
        }
    }
}

/// Catalog returning scripted responses in order.
#[derive(Default)]
pub struct FakeCatalog {
    responses: Mutex<VecDeque<Result<Vec<FoodItem>>>>,
    gate: Gate,
    calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, items: Vec<FoodItem>) {
        self.push(Ok(items));
    }

    pub fn push_err(&self, error: Error) {
        self.push(Err(error));
    }

    fn push(&self, response: Result<Vec<FoodItem>>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
    }

    /// Make every subsequent fetch wait for one `release` on the returned handle.
    pub fn gate(&self) -> GateHandle {
        self.gate.enable()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FoodCatalog for FakeCatalog {
    async fn fetch_all(&self) -> Result<Vec<FoodItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.pass().await;
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(Error::Internal("no scripted catalog response".into())))
    }
}

/// Model returning scripted replies and recording every prompt it receives.
#[derive(Default)]
pub struct FakeModel {
    replies: Mutex<VecDeque<Result<String>>>,
    prompts: Mutex<Vec<String>>,
    gate: Gate,
}

impl FakeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.push(Ok(reply.into()));
    }

    pub fn push_err(&self, error: Error) {
        self.push(Err(error));
    }

    fn push(&self, reply: Result<String>) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
    }

    /// Make every subsequent request wait for one `release` on the returned handle.
    pub fn gate(&self) -> GateHandle {
        self.gate.enable()
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.to_string());
        self.gate.pass().await;
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(Error::Internal("no scripted model reply".into())))
    }
}
