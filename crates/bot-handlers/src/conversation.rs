//! In-memory registry of per-user conversations.
//!
//! A conversation lives from the moment user picks a language until the flow
//! ends. While it waits for user input, messages from that user are routed to
//! it with [`Conversations::deliver`] instead of being ignored.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use teloxide::types::MessageId;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use common::types::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    MenuShown,
    AwaitingLanguageCode,
    AwaitingText,
    Translating,
}

/// Outcome of waiting for the next message from user
#[derive(Debug, PartialEq, Eq)]
pub enum WaitResult<T> {
    Matched(T),
    TimedOut,
    Canceled,
    /// User started a newer conversation
    Replaced,
}

/// Text message received from user while a conversation waits for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incoming {
    pub text: String,
    pub message_id: MessageId,
}

#[derive(Debug)]
struct Entry {
    id: u64,
    state: FlowState,
    token: CancellationToken,
    replaced: Arc<AtomicBool>,
    waiter: Option<oneshot::Sender<Incoming>>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    entries: HashMap<UserId, Entry>,
}

#[derive(Debug, Clone, Default)]
pub struct Conversations {
    inner: Arc<Mutex<Inner>>,
}

impl Conversations {
    pub fn new() -> Self {
        Self::default()
    }
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
    /// Start new conversation for user, previous one is canceled
    pub fn start(&self, user: UserId) -> Conversation {
        let token = CancellationToken::new();
        let replaced = Arc::new(AtomicBool::new(false));
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        let entry = Entry {
            id,
            state: FlowState::MenuShown,
            token: token.clone(),
            replaced: replaced.clone(),
            waiter: None,
        };
        if let Some(old) = inner.entries.insert(user, entry) {
            log::debug!("replacing conversation {} of user {user}", old.id);
            old.replaced.store(true, Ordering::SeqCst);
            old.token.cancel();
        }

        Conversation {
            registry: self.clone(),
            user,
            id,
            token,
            replaced,
        }
    }
    pub fn state(&self, user: UserId) -> Option<FlowState> {
        self.lock().entries.get(&user).map(|e| e.state)
    }
    /// Pass message to conversation waiting for it
    ///
    /// Returns `false` if nobody waits for messages from this user
    pub fn deliver(&self, user: UserId, incoming: Incoming) -> bool {
        let waiter = self
            .lock()
            .entries
            .get_mut(&user)
            .and_then(|e| e.waiter.take());
        match waiter {
            Some(tx) => tx.send(incoming).is_ok(),
            None => false,
        }
    }
    /// Cancel conversation of user, returns `false` if there was none
    pub fn cancel(&self, user: UserId) -> bool {
        match self.lock().entries.remove(&user) {
            Some(entry) => {
                entry.token.cancel();
                true
            }
            None => false,
        }
    }
    /// Cancel conversations of all users, used on shutdown
    pub fn cancel_all(&self) -> usize {
        let entries: Vec<_> = self.lock().entries.drain().collect();
        for (_, entry) in &entries {
            entry.token.cancel();
        }
        entries.len()
    }
}

/// Handle to the active conversation of a single user
///
/// Dropping it removes the conversation from registry
#[derive(Debug)]
pub struct Conversation {
    registry: Conversations,
    user: UserId,
    id: u64,
    token: CancellationToken,
    replaced: Arc<AtomicBool>,
}

impl Conversation {
    pub fn user(&self) -> UserId {
        self.user
    }
    pub fn set_state(&self, state: FlowState) {
        if let Some(entry) = self.entry(&mut self.registry.lock()) {
            entry.state = state;
        }
    }
    fn entry<'a>(&self, inner: &'a mut Inner) -> Option<&'a mut Entry> {
        inner.entries.get_mut(&self.user).filter(|e| e.id == self.id)
    }
    fn ended(&self) -> WaitResult<Incoming> {
        if self.replaced.load(Ordering::SeqCst) {
            WaitResult::Replaced
        } else {
            WaitResult::Canceled
        }
    }
    /// Start accepting messages from user in `state`
    ///
    /// Message sent before [`Listener::wait`] is called is kept until then
    pub fn listen(&self, state: FlowState) -> Listener<'_> {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.registry.lock();
        let rx = self.entry(&mut inner).map(|entry| {
            entry.state = state;
            entry.waiter = Some(tx);
            rx
        });
        Listener {
            conversation: self,
            rx,
        }
    }
    /// Wait for the next message from user, at most `window`
    pub async fn wait(&self, state: FlowState, window: Duration) -> WaitResult<Incoming> {
        self.listen(state).wait(window).await
    }
}

/// Pending subscription to the next message of user
#[derive(Debug)]
pub struct Listener<'a> {
    conversation: &'a Conversation,
    rx: Option<oneshot::Receiver<Incoming>>,
}

impl Listener<'_> {
    pub async fn wait(mut self, window: Duration) -> WaitResult<Incoming> {
        let conversation = self.conversation;
        let Some(rx) = self.rx.take() else {
            return conversation.ended();
        };

        tokio::select! {
            _ = conversation.token.cancelled() => conversation.ended(),
            res = tokio::time::timeout(window, rx) => match res {
                Ok(Ok(incoming)) => WaitResult::Matched(incoming),
                Ok(Err(_)) => conversation.ended(),
                Err(_) => WaitResult::TimedOut,
            },
        }
    }
}

impl Drop for Listener<'_> {
    fn drop(&mut self) {
        let conversation = self.conversation;
        if let Some(entry) = conversation.entry(&mut conversation.registry.lock()) {
            entry.waiter = None;
        }
    }
}

impl Drop for Conversation {
    fn drop(&mut self) {
        let mut inner = self.registry.lock();
        if inner.entries.get(&self.user).is_some_and(|e| e.id == self.id) {
            inner.entries.remove(&self.user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: UserId = UserId(1);
    const WINDOW: Duration = Duration::from_secs(5);

    fn incoming(text: &str) -> Incoming {
        Incoming {
            text: text.to_string(),
            message_id: MessageId(10),
        }
    }

    async fn wait_for_state(conversations: &Conversations, state: FlowState) {
        while conversations.state(USER) != Some(state) {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    #[tokio::test]
    async fn test_deliver_to_waiting_conversation() {
        let conversations = Conversations::new();
        assert!(!conversations.deliver(USER, incoming("nobody listens")));

        let conversation = conversations.start(USER);
        assert_eq!(conversations.state(USER), Some(FlowState::MenuShown));

        let wait = tokio::spawn(async move {
            let res = conversation.wait(FlowState::AwaitingText, WINDOW).await;
            drop(conversation);
            res
        });
        wait_for_state(&conversations, FlowState::AwaitingText).await;
        while !conversations.deliver(USER, incoming("hello")) {
            tokio::task::yield_now().await;
        }

        assert_eq!(wait.await.unwrap(), WaitResult::Matched(incoming("hello")));
        assert_eq!(conversations.state(USER), None);
    }

    #[tokio::test]
    async fn test_wait_times_out() {
        let conversations = Conversations::new();
        let conversation = conversations.start(USER);

        let res = conversation
            .wait(FlowState::AwaitingLanguageCode, Duration::from_millis(20))
            .await;
        assert_eq!(res, WaitResult::TimedOut);
        // nobody waits after timeout
        assert!(!conversations.deliver(USER, incoming("late")));
    }

    #[tokio::test]
    async fn test_cancel_waiting_conversation() {
        let conversations = Conversations::new();
        let conversation = conversations.start(USER);

        let wait = tokio::spawn(async move {
            let res = conversation.wait(FlowState::AwaitingText, WINDOW).await;
            drop(conversation);
            res
        });
        wait_for_state(&conversations, FlowState::AwaitingText).await;

        assert!(conversations.cancel(USER));
        assert_eq!(wait.await.unwrap(), WaitResult::Canceled);
        assert!(!conversations.cancel(USER));
    }

    #[tokio::test]
    async fn test_new_conversation_replaces_old() {
        let conversations = Conversations::new();
        let old = conversations.start(USER);
        let new = conversations.start(USER);

        assert_eq!(old.wait(FlowState::AwaitingText, WINDOW).await, WaitResult::Replaced);

        // dropping replaced handle keeps the new conversation
        drop(old);
        new.set_state(FlowState::Translating);
        assert_eq!(conversations.state(USER), Some(FlowState::Translating));
    }

    #[tokio::test]
    async fn test_replaced_while_listening() {
        let conversations = Conversations::new();
        let old = conversations.start(USER);
        let listener = old.listen(FlowState::AwaitingText);

        let _new = conversations.start(USER);
        assert_eq!(listener.wait(WINDOW).await, WaitResult::Replaced);
        assert_eq!(conversations.state(USER), Some(FlowState::MenuShown));
    }

    #[tokio::test]
    async fn test_message_before_wait_is_kept() {
        let conversations = Conversations::new();
        let conversation = conversations.start(USER);

        // user answers while prompt is still being sent
        let listener = conversation.listen(FlowState::AwaitingText);
        assert_eq!(conversations.state(USER), Some(FlowState::AwaitingText));
        assert!(conversations.deliver(USER, incoming("early")));

        assert_eq!(listener.wait(WINDOW).await, WaitResult::Matched(incoming("early")));
    }

    #[tokio::test]
    async fn test_dropped_listener_stops_accepting() {
        let conversations = Conversations::new();
        let conversation = conversations.start(USER);

        drop(conversation.listen(FlowState::AwaitingText));
        assert!(!conversations.deliver(USER, incoming("late")));
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let conversations = Conversations::new();
        let first = conversations.start(USER);
        let second = conversations.start(UserId(2));

        assert_eq!(conversations.cancel_all(), 2);
        assert_eq!(first.wait(FlowState::AwaitingText, WINDOW).await, WaitResult::Canceled);
        assert_eq!(second.wait(FlowState::AwaitingText, WINDOW).await, WaitResult::Canceled);
        assert_eq!(conversations.state(USER), None);
    }
}
