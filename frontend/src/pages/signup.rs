use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use lumio_core::models::NewProfile;

use crate::api;
use crate::pages::login::post_login_target;
use crate::session::SessionCtx;

#[component]
pub fn Signup() -> impl IntoView {
    let session = expect_context::<SessionCtx>();
    let navigate = use_navigate();

    let (display_name, set_display_name) = signal(String::new());
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
            match api::sign_up(&email.get_untracked(), &password.get_untracked()).await {
                Ok(granted) => {
                    let profile = NewProfile {
                        id: granted.user.id.clone(),
                        display_name: display_name.get_untracked().trim().to_string(),
                    };
                    session.establish(granted);
                    // The account exists either way; a failed profile insert is
                    // logged, not surfaced.
                    if let Err(e) = api::insert_row("profiles", &profile).await {
                        log::error!("Profile creation failed: {e}");
                    }
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
                <h1>"Create account"</h1>
                <input
                    type="text"
                    placeholder="Display name"
                    prop:value=display_name
                    on:input=move |ev| set_display_name.set(event_target_value(&ev))
                />
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
                    {move || if busy.get() { "Creating account..." } else { "Sign up" }}
                </button>
                <p class="muted">
                    "Already have an account? " <A href="/login">"Login"</A>
                </p>
            </div>
        </div>
    }
}
