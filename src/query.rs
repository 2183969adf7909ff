use chrono::{DateTime, SecondsFormat, Utc};

/// Sort direction, rendered as the REST API's `.asc` / `.desc` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn suffix(self) -> &'static str {
        match self {
            Order::Ascending => "asc",
            Order::Descending => "desc",
        }
    }
}

/// Builder for a row select against the hosted REST API
/// (`/rest/v1/<table>?select=...`). Filter values are percent-encoded;
/// parameters render in insertion order after `select`.
#[derive(Debug, Clone)]
pub struct Select {
    table: String,
    columns: String,
    params: Vec<(String, String)>,
}

impl Select {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: "*".to_string(),
            params: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", urlencoding::encode(value))));
        self
    }

    pub fn gte(mut self, column: &str, value: &str) -> Self {
        self.params
            .push((column.to_string(), format!("gte.{}", urlencoding::encode(value))));
        self
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.params
            .push(("order".to_string(), format!("{column}.{}", order.suffix())));
        self
    }

    /// Order an embedded resource, e.g. `conversations.order=created_at.desc`.
    pub fn order_ref(mut self, referenced: &str, column: &str, order: Order) -> Self {
        self.params.push((
            format!("{referenced}.order"),
            format!("{column}.{}", order.suffix()),
        ));
        self
    }

    /// Render as `<table>?<query>`, ready to append to the REST base URL.
    pub fn build(&self) -> String {
        let mut query = format!("{}?select={}", self.table, urlencoding::encode(&self.columns));
        for (key, value) in &self.params {
            query.push('&');
            query.push_str(key);
            query.push('=');
            query.push_str(value);
        }
        query
    }
}

// ── The canonical view queries ───────────────────────────────────────────────

/// Conversations visible to `user_id`, via the membership table with the
/// conversation row embedded, newest conversation first.
pub fn conversations_for_member(user_id: &str) -> Select {
    Select::from("conversation_members")
        .columns("conversation_id,conversations(id,title,is_group,created_at)")
        .eq("user_id", user_id)
        .order_ref("conversations", "created_at", Order::Descending)
}

/// Messages of one conversation, oldest first.
pub fn messages_in(conversation_id: &str) -> Select {
    Select::from("messages")
        .eq("conversation_id", conversation_id)
        .order("created_at", Order::Ascending)
}

/// All channels, newest first.
pub fn channels_newest_first() -> Select {
    Select::from("channels").order("created_at", Order::Descending)
}

/// Messages of one channel with the sender's display name embedded,
/// oldest first.
pub fn channel_messages_in(channel_id: &str) -> Select {
    Select::from("channel_messages")
        .columns("*,profiles(display_name)")
        .eq("channel_id", channel_id)
        .order("created_at", Order::Ascending)
}

/// Stories that have not expired as of `now`, newest first. Expiry is
/// filtered server-side only; rows already delivered are not re-checked.
pub fn active_stories(now: DateTime<Utc>) -> Select {
    Select::from("stories")
        .columns("*,profiles(display_name,avatar_url)")
        .gte("expires_at", &now.to_rfc3339_opts(SecondsFormat::Secs, true))
        .order("created_at", Order::Descending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn select_renders_filters_and_order() {
        let q = Select::from("messages")
            .eq("conversation_id", "abc-123")
            .order("created_at", Order::Ascending)
            .build();
        assert_eq!(
            q,
            "messages?select=%2A&conversation_id=eq.abc-123&order=created_at.asc"
        );
    }

    #[test]
    fn filter_values_are_percent_encoded() {
        let q = Select::from("channels").eq("name", "dev & ops").build();
        assert!(q.contains("name=eq.dev%20%26%20ops"));
    }

    #[test]
    fn membership_query_embeds_and_orders_the_referenced_table() {
        let q = conversations_for_member("u-1").build();
        assert!(q.starts_with("conversation_members?select="));
        assert!(q.contains("conversations%28id%2Ctitle%2Cis_group%2Ccreated_at%29"));
        assert!(q.contains("user_id=eq.u-1"));
        assert!(q.ends_with("conversations.order=created_at.desc"));
    }

    #[test]
    fn channels_list_is_newest_first() {
        assert_eq!(
            channels_newest_first().build(),
            "channels?select=%2A&order=created_at.desc"
        );
    }

    #[test]
    fn story_query_filters_expiry_server_side() {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
        let q = active_stories(now).build();
        assert!(q.contains("expires_at=gte.2026-01-05T12%3A00%3A00Z"));
        assert!(q.contains("order=created_at.desc"));
    }
}
