use chrono::Utc;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use lumio_core::models::{NewStory, Story};
use lumio_core::object_store;
use lumio_core::query;

use crate::api;
use crate::config;
use crate::session::SessionCtx;

/// Stories view: active (non-expired) stories newest first, an upload flow
/// (object upload, then the row insert carrying the public URL), and a
/// viewer modal. Expiry is only filtered at fetch time; a story already on
/// screen does not vanish when it lapses mid-session.
#[component]
pub fn StorySection() -> impl IntoView {
    let session = expect_context::<SessionCtx>();

    let (stories, set_stories) = signal(Vec::<Story>::new());
    let (selected, set_selected) = signal(None::<Story>);
    let (caption, set_caption) = signal(String::new());
    let (uploading, set_uploading) = signal(false);
    let picked_file = RwSignal::new_local(None::<web_sys::File>);

    spawn_local(async move {
        match api::select_rows::<Story>(&query::active_stories(Utc::now())).await {
            Ok(rows) => set_stories.set(rows),
            Err(e) => log::error!("Failed to fetch stories: {e}"),
        }
    });

    let on_file = move |ev: ev::Event| {
        let element: web_sys::HtmlInputElement = event_target(&ev);
        picked_file.set(element.files().and_then(|list| list.get(0)));
    };

    let post = move || {
        // A file is required; the caption is optional.
        let Some(file) = picked_file.get_untracked() else {
            return;
        };
        let Some(user_id) = session.user_id() else {
            return;
        };
        set_uploading.set(true);
        let caption_text = caption.get_untracked();

        spawn_local(async move {
            let millis = js_sys::Date::now() as i64;
            let path = object_store::upload_path(&user_id, millis, &file.name());
            match api::upload_object(object_store::STORIES_BUCKET, &path, &file).await {
                Ok(stored) => {
                    let media_url = object_store::public_url(
                        &config::backend_url(),
                        object_store::STORIES_BUCKET,
                        &stored,
                    );
                    let payload = NewStory {
                        user_id,
                        media_url,
                        caption: (!caption_text.trim().is_empty())
                            .then(|| caption_text.trim().to_string()),
                        expires_at: Story::default_expiry(Utc::now()),
                    };
                    match api::insert_returning::<Story>("stories", &payload).await {
                        Ok(story) => {
                            set_stories.update(|list| list.insert(0, story.clone()));
                            set_selected.set(Some(story));
                            set_caption.set(String::new());
                            picked_file.set(None);
                        }
                        Err(e) => log::error!("Insert story failed: {e}"),
                    }
                }
                Err(e) => log::error!("Story upload failed: {e}"),
            }
            set_uploading.set(false);
        });
    };

    view! {
        <div class="stack">
            <section class="panel">
                <h2>"Stories"</h2>
                <div class="story-strip">
                    <For each=move || stories.get() key=|s| s.id.clone() let:story>
                        {
                            let author = story
                                .author
                                .as_ref()
                                .and_then(|p| p.display_name.clone())
                                .unwrap_or_else(|| "User".to_string());
                            let open = story.clone();
                            view! {
                                <button
                                    class="story-chip"
                                    on:click=move |_| set_selected.set(Some(open.clone()))
                                >
                                    <span class="story-ring" />
                                    <span class="item-meta">{author}</span>
                                </button>
                            }
                        }
                    </For>
                    {move || {
                        stories
                            .with(|s| s.is_empty())
                            .then(|| view! { <p class="muted">"No active stories."</p> })
                    }}
                </div>
            </section>

            <section class="panel">
                <h3>"Add your story"</h3>
                <div class="upload-row">
                    <input type="file" accept="image/*" on:change=on_file />
                    <textarea
                        placeholder="Caption"
                        prop:value=caption
                        on:input=move |ev| set_caption.set(event_target_value(&ev))
                    />
                    <button
                        class="send-btn"
                        disabled=move || uploading.get()
                        on:click=move |_| post()
                    >
                        {move || if uploading.get() { "Uploading..." } else { "Post" }}
                    </button>
                </div>
            </section>

            {move || {
                selected.get().map(|story| {
                    let caption = story.caption.clone().unwrap_or_default();
                    view! {
                        <div class="modal-backdrop">
                            <div class="panel modal story-viewer">
                                <button
                                    class="ghost-btn close"
                                    on:click=move |_| set_selected.set(None)
                                >
                                    "Close"
                                </button>
                                <img src=story.media_url.clone() alt="story" />
                                <p>{caption}</p>
                            </div>
                        </div>
                    }
                })
            }}
        </div>
    }
}
