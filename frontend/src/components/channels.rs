use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use lumio_core::models::{Channel, ChannelMessage, NewChannel};
use lumio_core::query;
use lumio_core::realtime::{Scope, SubscriptionSlot};
use lumio_core::view::{ThreadState, draft_is_sendable};

use crate::api;
use crate::session::SessionCtx;
use crate::ws;

/// Broadcast-channel view: unfiltered channel list, create-channel modal,
/// message feed with sender names, live subscription on the active channel.
#[component]
pub fn ChannelSection() -> impl IntoView {
    let session = expect_context::<SessionCtx>();
    let me = session.user_id().unwrap_or_default();

    let (state, set_state) = signal(ThreadState::<Channel, ChannelMessage>::new());
    let (input, set_input) = signal(String::new());
    let (modal_open, set_modal_open) = signal(false);
    let (new_name, set_new_name) = signal(String::new());
    let (new_description, set_new_description) = signal(String::new());
    let slot = StoredValue::new_local(SubscriptionSlot::new());

    on_cleanup(move || slot.update_value(|s| s.clear()));

    spawn_local(async move {
        match api::select_rows::<Channel>(&query::channels_newest_first()).await {
            Ok(rows) => set_state.update(|s| s.load_parents(rows)),
            Err(e) => log::error!("Failed to fetch channels: {e}"),
        }
    });

    let active_id = Memo::new(move |_| state.with(|s| s.active.clone()));
    Effect::new(move |_| {
        let Some(id) = active_id.get() else {
            slot.update_value(|s| s.clear());
            return;
        };

        let on_insert = move |record| match serde_json::from_value::<ChannelMessage>(record) {
            Ok(message) => set_state.update(|s| s.append_detail(message)),
            Err(e) => log::error!("Bad live channel payload: {e}"),
        };
        match ws::open_insert_stream(Scope::channel_messages_in(&id), on_insert) {
            Ok(sub) => slot.update_value(|s| s.replace(Box::new(sub))),
            Err(e) => {
                slot.update_value(|s| s.clear());
                log::error!("Subscribe failed: {e}");
            }
        }

        let requested = id.clone();
        spawn_local(async move {
            match api::select_rows::<ChannelMessage>(&query::channel_messages_in(&requested)).await
            {
                Ok(rows) => set_state.update(|s| {
                    s.replace_detail(&requested, rows);
                }),
                Err(e) => log::error!("Failed to fetch channel messages: {e}"),
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

        let draft = ChannelMessage::draft(active, sender.clone(), text);
        set_input.set(String::new());
        set_state.update(|s| s.append_detail(draft.clone()));

        spawn_local(async move {
            if let Err(e) = api::insert_row("channel_messages", &draft.to_insert()).await {
                log::error!("Send channel message failed: {e}");
            }
        });
    };

    let creator = me;
    let create_channel = move || {
        let payload = match NewChannel::validated(
            &new_name.get_untracked(),
            &new_description.get_untracked(),
            creator.clone(),
        ) {
            Ok(payload) => payload,
            // Rejected before any network call; the modal simply stays open.
            Err(e) => {
                log::debug!("Channel not created: {e}");
                return;
            }
        };
        spawn_local(async move {
            match api::insert_returning::<Channel>("channels", &payload).await {
                Ok(channel) => {
                    set_state.update(|s| s.insert_parent_front(channel));
                    set_modal_open.set(false);
                    set_new_name.set(String::new());
                    set_new_description.set(String::new());
                }
                Err(e) => log::error!("Create channel failed: {e}"),
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
                <div class="panel-header">
                    <h3>"Channels"</h3>
                    <button class="pill-btn" on:click=move |_| set_modal_open.set(true)>
                        "Create"
                    </button>
                </div>
                <div class="scroll-list">
                    <For
                        each=move || state.with(|s| s.parents.clone())
                        key=|c| c.id.clone()
                        let:channel
                    >
                        {
                            let id = channel.id.clone();
                            let id_active = channel.id.clone();
                            let name = channel.name.clone();
                            let description = channel.description.clone().unwrap_or_default();
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
                                    <span class="item-title">{name}</span>
                                    <span class="item-meta">{description}</span>
                                </button>
                            }
                        }
                    </For>
                    {move || {
                        state
                            .with(|s| s.parents.is_empty())
                            .then(|| view! { <p class="muted">"No channels yet."</p> })
                    }}
                </div>
            </aside>

            <section class="panel thread-panel">
                {move || {
                    if state.with(|s| s.active.is_none()) {
                        return view! {
                            <div class="screen-center muted">"Select or create a channel."</div>
                        }
                        .into_any();
                    }
                    let name = state.with(|s| {
                        s.active_parent().map(|c| c.name.clone()).unwrap_or_else(|| "Channel".into())
                    });
                    view! {
                        <header class="thread-header">
                            <span class="item-title">{name}</span>
                            <span class="item-meta">"Broadcast · realtime"</span>
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
                            let sender = message
                                .sender
                                .as_ref()
                                .and_then(|p| p.display_name.clone())
                                .unwrap_or_else(|| "User".to_string());
                            let stamp = message.created_at.format("%H:%M").to_string();
                            view! {
                                <div class="feed-item">
                                    <div class="feed-meta">
                                        <span>{sender}</span>
                                        <span>{stamp}</span>
                                    </div>
                                    <p>{message.content.clone()}</p>
                                </div>
                            }
                        }
                    </For>
                    {move || {
                        (state.with(|s| s.active.is_some() && s.detail.is_empty()))
                            .then(|| view! { <p class="muted">"No messages yet."</p> })
                    }}
                </div>

                {move || {
                    state.with(|s| s.active.is_some()).then(|| {
                        let on_keydown = send_on_enter.clone();
                        let on_click = send_on_click.clone();
                        view! {
                            <div class="composer">
                                <input
                                    placeholder="Message"
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

            {move || {
                modal_open.get().then(|| {
                    let create = create_channel.clone();
                    view! {
                        <div class="modal-backdrop">
                            <div class="panel modal">
                                <div class="panel-header">
                                    <h4>"Create channel"</h4>
                                    <button
                                        class="ghost-btn"
                                        on:click=move |_| set_modal_open.set(false)
                                    >
                                        "Close"
                                    </button>
                                </div>
                                <input
                                    placeholder="Name"
                                    prop:value=new_name
                                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                                />
                                <textarea
                                    placeholder="Description"
                                    prop:value=new_description
                                    on:input=move |ev| {
                                        set_new_description.set(event_target_value(&ev))
                                    }
                                />
                                <button class="send-btn wide" on:click=move |_| create()>
                                    "Create"
                                </button>
                            </div>
                        </div>
                    }
                })
            }}
        </div>
    }
}
