//! End-to-end exercises of the list-and-detail flow against the public API:
//! fetch ordering, optimistic sends, subscription teardown, and the one-shot
//! login redirect.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Duration, TimeZone, Utc};

use lumio_core::local::MemoryStore;
use lumio_core::models::{Conversation, Message, MessageKind};
use lumio_core::realtime::{Scope, SubscriptionHandle, SubscriptionSlot};
use lumio_core::session::{remember_requested_path, take_requested_path};
use lumio_core::view::{ThreadState, draft_is_sendable};

fn conversation(id: &str, minutes_ago: i64) -> Conversation {
    Conversation {
        id: id.to_string(),
        title: Some(format!("chat {id}")),
        is_group: false,
        created_at: Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()
            - Duration::minutes(minutes_ago),
    }
}

fn message(id: &str, conversation_id: &str) -> Message {
    Message {
        id: id.to_string(),
        conversation_id: conversation_id.to_string(),
        sender_id: "u1".to_string(),
        content: format!("message {id}"),
        kind: MessageKind::Text,
        created_at: Utc::now(),
    }
}

struct CountingHandle {
    scope: Scope,
    closes: Rc<RefCell<usize>>,
}

impl SubscriptionHandle for CountingHandle {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn close(&mut self) {
        *self.closes.borrow_mut() += 1;
    }
}

#[test]
fn switching_conversations_replaces_thread_and_subscription_together() {
    let mut state: ThreadState<Conversation, Message> = ThreadState::new();
    let mut slot = SubscriptionSlot::new();
    let closes = Rc::new(RefCell::new(0));

    // Newest-first list; the first row becomes active.
    state.load_parents(vec![conversation("c-new", 0), conversation("c-old", 60)]);
    assert_eq!(state.active.as_deref(), Some("c-new"));

    let mut open_for_active = |state: &ThreadState<Conversation, Message>| {
        let id = state.active.clone().unwrap();
        slot.replace(Box::new(CountingHandle {
            scope: Scope::messages_in(&id),
            closes: Rc::clone(&closes),
        }));
    };
    open_for_active(&state);
    assert!(state.replace_detail("c-new", vec![message("m1", "c-new")]));

    // Switch: the old thread clears, one subscription dies, one opens.
    assert!(state.activate("c-old"));
    open_for_active(&state);
    assert!(state.detail.is_empty());
    assert_eq!(*closes.borrow(), 1);
    assert_eq!(slot.scope().unwrap().value, "c-old");

    // The slow fetch for the previous conversation lands late and is dropped.
    assert!(!state.replace_detail("c-new", vec![message("m2", "c-new")]));
    assert!(state.detail.is_empty());

    // An optimistic send and its live echo both append; nothing deduplicates.
    assert!(draft_is_sendable("hello"));
    let draft = Message::draft("c-old".into(), "u1".into(), "hello".into());
    state.append_detail(draft.clone());
    state.append_detail(message("server-echo", "c-old"));
    assert_eq!(state.detail.len(), 2);

    // Teardown on unmount closes the remaining subscription.
    slot.clear();
    assert_eq!(*closes.borrow(), 2);
}

#[test]
fn login_redirect_round_trip() {
    let store = MemoryStore::new();
    remember_requested_path(&store, "/app");
    let target = take_requested_path(&store).unwrap_or_else(|| "/app".to_string());
    assert_eq!(target, "/app");
    // Second login with nothing remembered falls back to the default.
    let target = take_requested_path(&store).unwrap_or_else(|| "/app".to_string());
    assert_eq!(target, "/app");
    assert!(take_requested_path(&store).is_none());
}
