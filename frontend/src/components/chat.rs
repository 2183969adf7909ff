use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use lumio_core::models::{Conversation, MembershipRow, Message, conversations_from_memberships};
use lumio_core::query;
use lumio_core::realtime::{Scope, SubscriptionSlot};
use lumio_core::view::{ThreadState, draft_is_sendable};

use crate::api;
use crate::session::SessionCtx;
use crate::ws;

/// Direct-chat view: membership-filtered conversation list, message thread,
/// live subscription bound to the active conversation, optimistic composer.
#[component]
pub fn ChatSection() -> impl IntoView {
    let session = expect_context::<SessionCtx>();
    let me = session.user_id().unwrap_or_default();

    let (state, set_state) = signal(ThreadState::<Conversation, Message>::new());
    let (input, set_input) = signal(String::new());
    let (search, set_search) = signal(String::new());
    let slot = StoredValue::new_local(SubscriptionSlot::new());

    on_cleanup(move || slot.update_value(|s| s.clear()));

    // Load the conversation list once on mount.
    {
        let user_id = me.clone();
        spawn_local(async move {
            match api::select_rows::<MembershipRow>(&query::conversations_for_member(&user_id))
                .await
            {
                Ok(rows) => {
                    set_state.update(|s| s.load_parents(conversations_from_memberships(rows)));
                }
                Err(e) => log::error!("Failed to fetch conversations: {e}"),
            }
        });
    }

    // Refetch the thread and move the live subscription whenever the active
    // conversation changes. The memo keeps message appends from re-running
    // this.
    let active_id = Memo::new(move |_| state.with(|s| s.active.clone()));
    Effect::new(move |_| {
        let Some(id) = active_id.get() else {
            slot.update_value(|s| s.clear());
            return;
        };

        let on_insert = move |record| match serde_json::from_value::<Message>(record) {
            Ok(message) => set_state.update(|s| s.append_detail(message)),
            Err(e) => log::error!("Bad live message payload: {e}"),
        };
        match ws::open_insert_stream(Scope::messages_in(&id), on_insert) {
            Ok(sub) => slot.update_value(|s| s.replace(Box::new(sub))),
            Err(e) => {
                slot.update_value(|s| s.clear());
                log::error!("Subscribe failed: {e}");
            }
        }

        // The fetch is tagged with the conversation it was issued for, so a
        // slow response cannot overwrite a newer selection's thread.
        let requested = id.clone();
        spawn_local(async move {
            match api::select_rows::<Message>(&query::messages_in(&requested)).await {
                Ok(rows) => set_state.update(|s| {
                    s.replace_detail(&requested, rows);
                }),
                Err(e) => log::error!("Failed to fetch messages: {e}"),
            }
        });
    });

    let sender = me.clone();
    let send = move || {
        let text = input.get_untracked();
        if !draft_is_sendable(&text) {
            return;
        }
        let Some(active) = state.with_untracked(|s| s.active.clone()) else {
            return;
        };

        let draft = Message::draft(active, sender.clone(), text);
        set_input.set(String::new());
        // Optimistic append; the durable write follows and is never
        // reconciled with this entry.
        set_state.update(|s| s.append_detail(draft.clone()));

        spawn_local(async move {
            if let Err(e) = api::insert_row("messages", &draft.to_insert()).await {
                log::error!("Send message failed: {e}");
            }
        });
    };

    let send_on_enter = {
        let send = send.clone();
        move |ev: ev::KeyboardEvent| {
            if ev.key() == "Enter" {
                ev.prevent_default();
                send();
            }
        }
    };
    let send_on_click = {
        let send = send.clone();
        move |_| send()
    };

    view! {
        <div class="section-grid">
            <aside class="panel list-panel">
                <input
                    class="search-input"
                    placeholder="Search chats..."
                    prop:value=search
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <div class="scroll-list">
                    <For
                        each=move || {
                            let term = search.get().to_lowercase();
                            state.with(|s| {
                                s.parents
                                    .iter()
                                    .filter(|c| {
                                        c.title
                                            .as_deref()
                                            .unwrap_or("Chat")
                                            .to_lowercase()
                                            .contains(&term)
                                    })
                                    .cloned()
                                    .collect::<Vec<_>>()
                            })
                        }
                        key=|c| c.id.clone()
                        let:conversation
                    >
                        {
                            let id = conversation.id.clone();
                            let id_active = conversation.id.clone();
                            let title = conversation
                                .title
                                .clone()
                                .unwrap_or_else(|| "Direct chat".to_string());
                            let opened = conversation.created_at.format("%d %b %Y").to_string();
                            view! {
                                <button
                                    class="list-item"
                                    class:active=move || {
                                        state.with(|s| s.active.as_deref() == Some(id_active.as_str()))
                                    }
                                    on:click=move |_| {
                                        set_state.update(|s| {
                                            s.activate(&id);
                                        })
                                    }
                                >
                                    <span class="item-title">{title}</span>
                                    <span class="item-meta">{opened}</span>
                                </button>
                            }
                        }
                    </For>
                    {move || {
                        state
                            .with(|s| s.parents.is_empty())
                            .then(|| view! { <p class="muted">"No conversations yet."</p> })
                    }}
                </div>
            </aside>

            <section class="panel thread-panel">
                {move || {
                    if state.with(|s| s.active.is_none()) {
                        return view! {
                            <div class="screen-center muted">
                                "Select a conversation to start chatting."
                            </div>
                        }
                        .into_any();
                    }
                    let title = state.with(|s| {
                        s.active_parent()
                            .and_then(|c| c.title.clone())
                            .unwrap_or_else(|| "Conversation".to_string())
                    });
                    view! {
                        <header class="thread-header">
                            <span class="item-title">{title}</span>
                            <span class="live-dot" title="Realtime enabled" />
                        </header>
                    }
                    .into_any()
                }}

                <div class="scroll-list thread-body">
                    <For
                        each=move || state.with(|s| s.detail.clone())
                        key=|m| m.id.clone()
                        let:message
                    >
                        {
                            let mine = message.sender_id == me;
                            let stamp = message.created_at.format("%H:%M").to_string();
                            view! {
                                <div class="bubble-row" class:mine=mine>
                                    <div class="bubble">
                                        <p>{message.content.clone()}</p>
                                        <span class="stamp">{stamp}</span>
                                    </div>
                                </div>
                            }
                        }
                    </For>
                    {move || {
                        (state.with(|s| s.active.is_some() && s.detail.is_empty()))
                            .then(|| view! { <p class="muted">"Start the conversation..."</p> })
                    }}
                </div>

                {move || {
                    state.with(|s| s.active.is_some()).then(|| {
                        let on_keydown = send_on_enter.clone();
                        let on_click = send_on_click.clone();
                        view! {
                            <div class="composer">
                                <input
                                    placeholder="Type a message"
                                    prop:value=input
                                    on:input=move |ev| set_input.set(event_target_value(&ev))
                                    on:keydown=on_keydown
                                />
                                <button class="send-btn" on:click=on_click>
                                    "Send"
                                </button>
                            </div>
                        }
                    })
                }}
            </section>
        </div>
    }
}
