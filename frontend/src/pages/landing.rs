use leptos::prelude::*;
use leptos_router::components::A;

use lumio_core::cart::{CATALOG, Cart, format_price};
use lumio_core::local::{CookieConsent, cookie_consent, set_cookie_consent};

use crate::browser::BrowserStore;

/// Current persisted cart size, zero when storage is unavailable.
pub fn cart_count() -> usize {
    BrowserStore::local()
        .map(|store| Cart::new(&store).count())
        .unwrap_or(0)
}

/// Storefront header shared by the marketing pages, with the live cart badge.
#[component]
pub fn StoreNav(count: RwSignal<usize>) -> impl IntoView {
    let cart_label = move || {
        let n = count.get();
        if n > 0 { format!("Cart ({n})") } else { "Cart".to_string() }
    };

    view! {
        <header class="store-nav">
            <A href="/">
                <span class="brand">"Lumio"</span>
            </A>
            <nav class="nav-links">
                <A href="/">"Packages"</A>
                <A href="/contact">"Contact"</A>
                <A href="/cart">{cart_label}</A>
                <A href="/login">"Sign in"</A>
            </nav>
        </header>
    }
}

/// Marketing landing page: pricing cards with add-to-cart and the
/// cookie-consent banner.
#[component]
pub fn Landing() -> impl IntoView {
    let badge = RwSignal::new(cart_count());
    let (just_added, set_just_added) = signal(None::<&'static str>);

    let add_to_cart = move |product_id: &'static str| match BrowserStore::local() {
        Ok(store) => {
            let cart = Cart::new(&store);
            cart.add(product_id);
            badge.set(cart.count());
            set_just_added.set(Some(product_id));
            gloo_timers::callback::Timeout::new(1200, move || set_just_added.set(None)).forget();
        }
        Err(e) => log::error!("Cart unavailable: {e}"),
    };

    view! {
        <div class="store-shell">
            <StoreNav count=badge />
            <section class="hero">
                <h1>"Websites that talk back"</h1>
                <p class="muted">
                    "Storefront packages with chat, stories and broadcast channels built in."
                </p>
                <A href="/contact">
                    <span class="send-btn">"Talk to us"</span>
                </A>
            </section>
            <section class="pricing-grid">
                {CATALOG
                    .iter()
                    .map(|product| {
                        let id = product.id;
                        let price = format_price(product.price);
                        view! {
                            <div class="panel price-card">
                                <h3>{product.name}</h3>
                                <p class="price">{price}</p>
                                <button class="send-btn" on:click=move |_| add_to_cart(id)>
                                    {move || {
                                        if just_added.get() == Some(id) {
                                            "Added!"
                                        } else {
                                            "Add to cart"
                                        }
                                    }}
                                </button>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>
            <CookieBanner />
        </div>
    }
}

#[component]
fn CookieBanner() -> impl IntoView {
    let (consent, set_consent) = signal(
        BrowserStore::local()
            .map(|store| cookie_consent(&store))
            .unwrap_or(CookieConsent::Unset),
    );

    let choose = move |accepted: bool| {
        if let Ok(store) = BrowserStore::local() {
            set_cookie_consent(&store, accepted);
        }
        set_consent.set(if accepted { CookieConsent::Accepted } else { CookieConsent::Declined });
    };

    view! {
        {move || {
            (consent.get() == CookieConsent::Unset)
                .then(|| {
                    view! {
                        <div class="cookie-banner">
                            <p>"We use cookies to keep your cart and session working."</p>
                            <button class="send-btn" on:click=move |_| choose(true)>
                                "Accept"
                            </button>
                            <button class="ghost-btn" on:click=move |_| choose(false)>
                                "Decline"
                            </button>
                        </div>
                    }
                })
        }}
    }
}
