use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use lumio_core::session::take_requested_path;

use crate::api;
use crate::browser::BrowserStore;
use crate::session::SessionCtx;

/// Where a fresh login lands when no pre-login path was remembered.
pub const APP_ROOT: &str = "/app";

/// Consume the one-shot redirect target recorded by the route guard.
pub fn post_login_target() -> String {
    BrowserStore::local()
        .ok()
        .and_then(|store| take_requested_path(&store))
        .unwrap_or_else(|| APP_ROOT.to_string())
}

#[component]
pub fn Login() -> impl IntoView {
    let session = expect_context::<SessionCtx>();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let submit = move |_| {
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::sign_in(&email.get_untracked(), &password.get_untracked()).await {
                Ok(granted) => {
                    session.establish(granted);
                    navigate(&post_login_target(), Default::default());
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="screen-center auth-screen">
            <div class="panel auth-card">
                <h1>"Login"</h1>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                <button class="send-btn wide" disabled=busy on:click=submit>
                    {move || if busy.get() { "Signing in..." } else { "Login" }}
                </button>
                <p class="muted">
                    "No account? " <A href="/signup">"Sign up"</A>
                </p>
            </div>
        </div>
    }
}
