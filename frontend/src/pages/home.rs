use leptos::prelude::*;

use crate::components::channels::ChannelSection;
use crate::components::chat::ChatSection;
use crate::components::navbar::{Navbar, Tab};
use crate::components::stories::StorySection;

/// The guarded app shell: tab state lives here and is passed down, never
/// shared as a global.
#[component]
pub fn Home() -> impl IntoView {
    let (tab, set_tab) = signal(Tab::Chats);

    view! {
        <div class="app-shell">
            <Navbar active=tab set_active=set_tab />
            <main class="app-main">
                {move || match tab.get() {
                    Tab::Chats => view! { <ChatSection /> }.into_any(),
                    Tab::Stories => view! { <StorySection /> }.into_any(),
                    Tab::Channels => view! { <ChannelSection /> }.into_any(),
                }}
            </main>
        </div>
    }
}
