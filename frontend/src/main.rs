mod api;
mod browser;
mod components;
mod config;
mod guard;
mod pages;
mod session;
mod ws;

use leptos::mount::mount_to_body;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::guard::RequireAuth;
use crate::pages::{CartPage, ContactPage, Home, Landing, Login, Signup};
use crate::session::SessionCtx;

/// Root application component: storefront routes are public, the app root is
/// guarded, anything else bounces to the landing page.
#[component]
fn App() -> impl IntoView {
    let session = SessionCtx::provide();
    session.init();

    view! {
        <Router>
            <Routes fallback=|| view! { <Redirect path="/" /> }>
                <Route path=path!("/") view=Landing />
                <Route path=path!("/cart") view=CartPage />
                <Route path=path!("/contact") view=ContactPage />
                <Route path=path!("/login") view=Login />
                <Route path=path!("/signup") view=Signup />
                <Route
                    path=path!("/app")
                    view=|| {
                        view! {
                            <RequireAuth>
                                <Home />
                            </RequireAuth>
                        }
                    }
                />
            </Routes>
        </Router>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
