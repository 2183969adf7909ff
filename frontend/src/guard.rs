use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use lumio_core::session::{SessionState, remember_requested_path};

use crate::browser::BrowserStore;
use crate::session::SessionCtx;

/// Renders children only for an authenticated session. While the session is
/// still resolving it shows a placeholder and performs no redirect; once
/// resolved as unauthenticated it records the requested path for a one-time
/// post-login return and replaces the history entry with `/login`.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionCtx>();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if session.state.get() == SessionState::Unauthenticated {
            if let Ok(store) = BrowserStore::local() {
                let requested = window()
                    .location()
                    .pathname()
                    .unwrap_or_default();
                if !requested.is_empty() {
                    remember_requested_path(&store, &requested);
                }
            }
            navigate("/login", NavigateOptions { replace: true, ..Default::default() });
        }
    });

    view! {
        {move || match session.state.get() {
            SessionState::Loading => view! {
                <div class="screen-center muted">"Loading..."</div>
            }
            .into_any(),
            SessionState::Authenticated(_) => children(),
            SessionState::Unauthenticated => ().into_any(),
        }}
    }
}
