use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a live subscription watches: insert events on one table, filtered by
/// equality on a parent-identifier column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub table: String,
    pub column: String,
    pub value: String,
}

impl Scope {
    pub fn new(table: &str, column: &str, value: &str) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub fn messages_in(conversation_id: &str) -> Self {
        Self::new("messages", "conversation_id", conversation_id)
    }

    pub fn channel_messages_in(channel_id: &str) -> Self {
        Self::new("channel_messages", "channel_id", channel_id)
    }

    /// Wire topic: `<table>:<column>=eq.<value>`.
    pub fn topic(&self) -> String {
        format!("{}:{}=eq.{}", self.table, self.column, self.value)
    }

    pub fn parse_topic(topic: &str) -> Option<Self> {
        let (table, filter) = topic.split_once(':')?;
        let (column, value) = filter.split_once("=eq.")?;
        if table.is_empty() || column.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self::new(table, column, value))
    }
}

/// Frames the client sends on the realtime socket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientFrame {
    Subscribe { topic: String },
    Unsubscribe { topic: String },
}

/// Frames the backend delivers. Ordering is whatever the transport provides;
/// the client does no resequencing or gap detection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerFrame {
    Insert { topic: String, record: Value },
    Error { message: String },
}

/// A live subscription the UI can tear down.
pub trait SubscriptionHandle {
    fn scope(&self) -> &Scope;
    /// Idempotent: closing an already-closed subscription is a no-op.
    fn close(&mut self);
}

/// Holds the single live subscription of one view instance. Replacing the
/// handle closes the previous one first, so switching the active item can
/// never accumulate subscriptions; dropping the slot closes whatever is left.
#[derive(Default)]
pub struct SubscriptionSlot {
    current: Option<Box<dyn SubscriptionHandle>>,
}

impl SubscriptionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, handle: Box<dyn SubscriptionHandle>) {
        self.clear();
        self.current = Some(handle);
    }

    pub fn clear(&mut self) {
        if let Some(mut handle) = self.current.take() {
            handle.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn scope(&self) -> Option<&Scope> {
        self.current.as_deref().map(|handle| handle.scope())
    }
}

impl Drop for SubscriptionSlot {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeHandle {
        scope: Scope,
        closed: Rc<RefCell<Vec<String>>>,
    }

    impl FakeHandle {
        fn boxed(value: &str, closed: &Rc<RefCell<Vec<String>>>) -> Box<dyn SubscriptionHandle> {
            Box::new(Self {
                scope: Scope::messages_in(value),
                closed: Rc::clone(closed),
            })
        }
    }

    impl SubscriptionHandle for FakeHandle {
        fn scope(&self) -> &Scope {
            &self.scope
        }

        fn close(&mut self) {
            self.closed.borrow_mut().push(self.scope.value.clone());
        }
    }

    #[test]
    fn topic_round_trip() {
        let scope = Scope::channel_messages_in("ch-9");
        assert_eq!(scope.topic(), "channel_messages:channel_id=eq.ch-9");
        assert_eq!(Scope::parse_topic(&scope.topic()).unwrap(), scope);
    }

    #[test]
    fn malformed_topics_do_not_parse() {
        assert!(Scope::parse_topic("messages").is_none());
        assert!(Scope::parse_topic("messages:conversation_id=lt.5").is_none());
        assert!(Scope::parse_topic(":conversation_id=eq.x").is_none());
    }

    #[test]
    fn frames_use_the_tagged_wire_shape() {
        let frame = ClientFrame::Subscribe { topic: "messages:conversation_id=eq.c1".into() };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["event"], "subscribe");

        let incoming = serde_json::json!({
            "event": "insert",
            "topic": "messages:conversation_id=eq.c1",
            "record": { "id": "m1" }
        });
        let frame: ServerFrame = serde_json::from_value(incoming).unwrap();
        match frame {
            ServerFrame::Insert { topic, record } => {
                assert_eq!(topic, "messages:conversation_id=eq.c1");
                assert_eq!(record["id"], "m1");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn switching_n_times_closes_exactly_the_previous_subscription() {
        let closed = Rc::new(RefCell::new(Vec::new()));
        let mut slot = SubscriptionSlot::new();

        for i in 0..5 {
            slot.replace(FakeHandle::boxed(&format!("c{i}"), &closed));
        }

        // Four teardowns for five switches, in order, and the last one live.
        assert_eq!(*closed.borrow(), vec!["c0", "c1", "c2", "c3"]);
        assert!(slot.is_open());
        assert_eq!(slot.scope().unwrap().value, "c4");
    }

    #[test]
    fn clear_and_drop_both_tear_down() {
        let closed = Rc::new(RefCell::new(Vec::new()));
        let mut slot = SubscriptionSlot::new();
        slot.replace(FakeHandle::boxed("a", &closed));
        slot.clear();
        assert!(!slot.is_open());
        assert_eq!(closed.borrow().len(), 1);
        // clear on an empty slot is a no-op
        slot.clear();
        assert_eq!(closed.borrow().len(), 1);

        {
            let mut slot = SubscriptionSlot::new();
            slot.replace(FakeHandle::boxed("b", &closed));
        }
        assert_eq!(*closed.borrow(), vec!["a", "b"]);
    }
}
