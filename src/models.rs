use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::view::Keyed;

/// Authenticated user as returned by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Auth session: bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Shape of the `profiles(...)` embed on messages and stories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenderProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_group: bool,
    pub created_at: DateTime<Utc>,
}

/// Row shape of the membership-filtered conversation select, where each
/// membership row embeds its conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipRow {
    pub conversation_id: String,
    #[serde(default)]
    pub conversations: Option<Conversation>,
}

/// Unwrap the embedded conversations and order them newest-first. The outer
/// membership rows carry no ordering of their own.
pub fn conversations_from_memberships(rows: Vec<MembershipRow>) -> Vec<Conversation> {
    let mut conversations: Vec<Conversation> =
        rows.into_iter().filter_map(|row| row.conversations).collect();
    conversations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    conversations
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Image => "image",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for MessageKind {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "text" => Ok(MessageKind::Text),
            "image" => Ok(MessageKind::Image),
            other => Err(format!("Unknown message kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Locally-identified draft for the optimistic append. The server assigns
    /// its own id on insert; the draft is never reconciled against it.
    pub fn draft(conversation_id: String, sender_id: String, content: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            conversation_id,
            sender_id,
            content,
            kind: MessageKind::Text,
            created_at: Utc::now(),
        }
    }

    /// Durable-write payload: same content, no local id.
    pub fn to_insert(&self) -> NewMessage {
        NewMessage {
            conversation_id: self.conversation_id.clone(),
            sender_id: self.sender_id.clone(),
            content: self.content.clone(),
            kind: MessageKind::Text,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewChannel {
    pub name: String,
    pub description: Option<String>,
    pub created_by: String,
}

impl NewChannel {
    /// A channel needs a non-empty name; rejected before any network call.
    pub fn validated(
        name: &str,
        description: &str,
        created_by: String,
    ) -> Result<Self, crate::errors::ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(crate::errors::ClientError::EmptyField { field_name: "name".to_string() });
        }
        let description = description.trim();
        Ok(Self {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            created_by,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMessage {
    pub id: String,
    pub channel_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "profiles", default)]
    pub sender: Option<SenderProfile>,
}

impl ChannelMessage {
    pub fn draft(channel_id: String, sender_id: String, content: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            channel_id,
            sender_id,
            content,
            created_at: Utc::now(),
            sender: None,
        }
    }

    pub fn to_insert(&self) -> NewChannelMessage {
        NewChannelMessage {
            channel_id: self.channel_id.clone(),
            sender_id: self.sender_id.clone(),
            content: self.content.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewChannelMessage {
    pub channel_id: String,
    pub sender_id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub user_id: String,
    pub media_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(rename = "profiles", default)]
    pub author: Option<SenderProfile>,
}

impl Story {
    /// Stories stay visible for 24 hours after posting.
    pub fn default_expiry(posted_at: DateTime<Utc>) -> DateTime<Utc> {
        posted_at + Duration::hours(24)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewStory {
    pub user_id: String,
    pub media_url: String,
    pub caption: Option<String>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Keyed for Conversation {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Channel {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_messages_get_unique_local_ids() {
        let a = Message::draft("c1".into(), "u1".into(), "hi".into());
        let b = Message::draft("c1".into(), "u1".into(), "hi".into());
        assert_ne!(a.id, b.id);
        assert_eq!(a.kind, MessageKind::Text);
    }

    #[test]
    fn insert_payload_drops_the_local_id() {
        let draft = Message::draft("c1".into(), "u1".into(), "hello".into());
        let payload = serde_json::to_value(draft.to_insert()).unwrap();
        assert!(payload.get("id").is_none());
        assert_eq!(payload["conversation_id"], "c1");
        assert_eq!(payload["type"], "text");
    }

    #[test]
    fn message_kind_wire_name_is_type() {
        let json = serde_json::json!({
            "id": "m1",
            "conversation_id": "c1",
            "sender_id": "u1",
            "content": "hey",
            "type": "text",
            "created_at": "2026-01-05T10:00:00Z"
        });
        let msg: Message = serde_json::from_value(json).unwrap();
        assert_eq!(msg.kind, MessageKind::Text);
    }

    #[test]
    fn channel_message_embed_is_optional() {
        let json = serde_json::json!({
            "id": "cm1",
            "channel_id": "ch1",
            "sender_id": "u1",
            "content": "hello",
            "created_at": "2026-01-05T10:00:00Z"
        });
        let msg: ChannelMessage = serde_json::from_value(json).unwrap();
        assert!(msg.sender.is_none());

        let json = serde_json::json!({
            "id": "cm2",
            "channel_id": "ch1",
            "sender_id": "u1",
            "content": "hello",
            "created_at": "2026-01-05T10:00:00Z",
            "profiles": { "display_name": "Ada" }
        });
        let msg: ChannelMessage = serde_json::from_value(json).unwrap();
        assert_eq!(msg.sender.unwrap().display_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn channel_names_must_be_non_empty() {
        let err = NewChannel::validated("   ", "desc", "u1".into()).unwrap_err();
        assert!(err.is_validation());

        let channel = NewChannel::validated(" dev ", "  ", "u1".into()).unwrap();
        assert_eq!(channel.name, "dev");
        assert!(channel.description.is_none());
    }

    #[test]
    fn memberships_unwrap_to_conversations_newest_first() {
        use chrono::TimeZone;
        let conv = |id: &str, day: u32| Conversation {
            id: id.to_string(),
            title: None,
            is_group: false,
            created_at: Utc.with_ymd_and_hms(2026, 1, day, 0, 0, 0).unwrap(),
        };
        let rows = vec![
            MembershipRow { conversation_id: "c1".into(), conversations: Some(conv("c1", 3)) },
            MembershipRow { conversation_id: "gone".into(), conversations: None },
            MembershipRow { conversation_id: "c2".into(), conversations: Some(conv("c2", 7)) },
        ];
        let out = conversations_from_memberships(rows);
        assert_eq!(
            out.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["c2", "c1"]
        );
    }

    #[test]
    fn story_expiry_is_a_day_out() {
        let posted = Utc::now();
        assert_eq!(Story::default_expiry(posted) - posted, Duration::hours(24));
    }

    #[test]
    fn unknown_message_kind_is_rejected() {
        assert!(MessageKind::try_from("gif".to_string()).is_err());
        assert_eq!(MessageKind::try_from("TEXT".to_string()).unwrap(), MessageKind::Text);
    }
}
