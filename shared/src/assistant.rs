//! Chat session with the menu assistant.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::model::LanguageModel;
use crate::models::{FoodItem, Message};
use crate::prompt::{build_prompt, welcome_text};

/// What happened to one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, nothing appended.
    Ignored,
    /// Another request is still pending, nothing appended.
    Busy,
    /// The model replied; the reply was appended.
    Replied(Message),
    /// The request failed; an `Error: ...` message was appended.
    Failed(Message),
}

/// Marks the session pending until dropped.
struct PendingGuard<'a>(&'a AtomicBool);

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Linear conversation with the model.
///
/// At most one request is in flight; the transcript is append-only and always
/// starts with the welcome message.
pub struct AssistantSession {
    model: Arc<dyn LanguageModel>,
    transcript: Mutex<Vec<Message>>,
    pending: AtomicBool,
}

impl AssistantSession {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            transcript: Mutex::new(vec![Message::welcome(welcome_text())]),
            pending: AtomicBool::new(false),
        }
    }

    /// Send one user turn.
    ///
    /// `items` is read once, before the request is sent; later list updates
    /// do not affect a request already in flight.
    pub async fn submit(&self, text: &str, items: &[FoodItem]) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        // Held for the whole request; released on every return path.
        let Some(_pending) = PendingGuard::acquire(&self.pending) else {
            debug!("Submission rejected while a request is pending");
            return SubmitOutcome::Busy;
        };

        self.push(Message::user(text));

        let prompt = build_prompt(items, text);
        debug!(items = items.len(), prompt_len = prompt.len(), "Built assistant prompt");

        match self.model.generate(&prompt).await {
            Ok(reply) => {
                info!(reply_len = reply.len(), "Assistant replied");
                let message = Message::assistant(reply);
                self.push(message.clone());
                SubmitOutcome::Replied(message)
            }
            Err(e) => {
                warn!(error = %e, "Assistant request failed");
                let message = Message::assistant(format!("Error: {}", e));
                self.push(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// True while a request is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Copy of the transcript.
    pub fn transcript(&self) -> Vec<Message> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn push(&self, message: Message) {
        self.lock().push(message);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Message>> {
        self.transcript.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{sample_item, FakeModel};
    use crate::Error;

    #[test]
    fn test_starts_with_welcome_only() {
        let session = AssistantSession::new(Arc::new(FakeModel::new()));
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 1);
        assert!(transcript[0].is_welcome);
        assert!(!transcript[0].is_user);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let model = Arc::new(FakeModel::new());
        let session = AssistantSession::new(model.clone());

        assert_eq!(session.submit("   \n\t", &[]).await, SubmitOutcome::Ignored);
        assert_eq!(session.len(), 1);
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_reply_appended_after_user_turn() {
        let model = Arc::new(FakeModel::new());
        model.push_reply("Try the **Cake**");
        let session = AssistantSession::new(model.clone());

        let outcome = session.submit("hello", &[sample_item(1, "Cake")]).await;

        assert_eq!(outcome, SubmitOutcome::Replied(Message::assistant("Try the **Cake**")));
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1], Message::user("hello"));
        assert_eq!(transcript[2], Message::assistant("Try the **Cake**"));
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn test_failure_becomes_error_message() {
        let model = Arc::new(FakeModel::new());
        model.push_err(Error::service(429, "Resource has been exhausted"));
        let session = AssistantSession::new(model);

        let outcome = session.submit("cheap veg?", &[]).await;

        let expected = Message::assistant("Error: Service error (429): Resource has been exhausted");
        assert_eq!(outcome, SubmitOutcome::Failed(expected.clone()));
        assert_eq!(session.transcript().last(), Some(&expected));
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn test_welcome_never_sent_to_model() {
        let model = Arc::new(FakeModel::new());
        model.push_reply("ok");
        let session = AssistantSession::new(model.clone());

        session.submit("hi", &[]).await;

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(!prompts[0].contains(&welcome_text()));
    }
}
