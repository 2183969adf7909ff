use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use lumio_core::contact::ContactForm;
use lumio_core::errors::ClientError;

use crate::api;
use crate::pages::landing::{StoreNav, cart_count};

#[component]
pub fn ContactPage() -> impl IntoView {
    let badge = RwSignal::new(cart_count());

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (message, set_message) = signal(String::new());
    let (trap, set_trap) = signal(String::new());
    let (status, set_status) = signal(None::<String>);
    let (sending, set_sending) = signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = ContactForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            message: message.get_untracked(),
            trap: trap.get_untracked(),
        };
        // Validation happens before any network call.
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(ClientError::InvalidEmail { .. }) => {
                set_status.set(Some("Please enter a valid email address.".to_string()));
                return;
            }
            Err(ClientError::Blocked) => {
                set_status.set(Some("Submission blocked.".to_string()));
                set_trap.set(String::new());
                return;
            }
            Err(e) => {
                set_status.set(Some(e.to_string()));
                return;
            }
        };

        set_status.set(Some("Sending...".to_string()));
        set_sending.set(true);
        spawn_local(async move {
            match api::insert_row("contact_messages", &payload).await {
                Ok(()) => {
                    set_status.set(Some("Message sent successfully!".to_string()));
                    set_name.set(String::new());
                    set_email.set(String::new());
                    set_message.set(String::new());
                }
                Err(e) => set_status.set(Some(format!("Error: {e}"))),
            }
            set_sending.set(false);
        });
    };

    view! {
        <div class="store-shell">
            <StoreNav count=badge />
            <section class="screen-center">
                <form class="panel contact-card" on:submit=submit>
                    <h2>"Get in touch"</h2>
                    <input
                        name="name"
                        placeholder="Name"
                        prop:value=name
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    <input
                        name="email"
                        placeholder="Email"
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <textarea
                        name="message"
                        placeholder="How can we help?"
                        prop:value=message
                        on:input=move |ev| set_message.set(event_target_value(&ev))
                    />
                    // Honeypot: hidden from humans, tempting to bots.
                    <input
                        name="company"
                        class="trap-field"
                        tabindex="-1"
                        autocomplete="off"
                        prop:value=trap
                        on:input=move |ev| set_trap.set(event_target_value(&ev))
                    />
                    <p class="form-status" role="status" aria-live="polite">
                        {move || status.get().unwrap_or_default()}
                    </p>
                    <button class="send-btn wide" type="submit" disabled=sending>
                        {move || if sending.get() { "Sending..." } else { "Send message" }}
                    </button>
                </form>
            </section>
        </div>
    }
}
