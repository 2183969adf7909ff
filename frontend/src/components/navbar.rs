use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use lumio_core::session::SessionState;

use crate::session::SessionCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Chats,
    Stories,
    Channels,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Chats, Tab::Stories, Tab::Channels];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Chats => "Chats",
            Tab::Stories => "Stories",
            Tab::Channels => "Channels",
        }
    }
}

/// App header: tab switcher, account chip, sign-out.
#[component]
pub fn Navbar(active: ReadSignal<Tab>, set_active: WriteSignal<Tab>) -> impl IntoView {
    let session = expect_context::<SessionCtx>();
    let navigate = use_navigate();

    let email = move || {
        session.state.with(|s| match s {
            SessionState::Authenticated(user) => {
                user.email.clone().unwrap_or_else(|| "You".to_string())
            }
            _ => "You".to_string(),
        })
    };

    let sign_out = move |_| {
        session.sign_out();
        navigate("/login", Default::default());
    };

    view! {
        <header class="app-navbar">
            <div class="brand">"Lumio"</div>
            <nav class="tab-row">
                {Tab::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <button
                                class="tab-btn"
                                class:active=move || active.get() == tab
                                on:click=move |_| set_active.set(tab)
                            >
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="account-chip">
                <span class="item-title">{email}</span>
                <button class="ghost-btn" on:click=sign_out>
                    "Sign out"
                </button>
            </div>
        </header>
    }
}
