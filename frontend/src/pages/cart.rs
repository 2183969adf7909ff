use leptos::prelude::*;

use lumio_core::cart::{Cart, format_price, product, totals};

use crate::browser::BrowserStore;
use crate::pages::landing::{StoreNav, cart_count};

/// Cart page: persisted items with per-row remove, the VAT summary, and the
/// demo checkout. No payment is captured and no order row is written
/// anywhere; checkout renders a client-side summary only.
#[component]
pub fn CartPage() -> impl IntoView {
    let badge = RwSignal::new(cart_count());
    let (items, set_items) = signal(
        BrowserStore::local()
            .map(|store| Cart::new(&store).items())
            .unwrap_or_default(),
    );
    let (summary, set_summary) = signal(None::<Vec<String>>);

    let remove = move |index: usize| {
        if let Ok(store) = BrowserStore::local() {
            let cart = Cart::new(&store);
            cart.remove(index);
            set_items.set(cart.items());
            badge.set(cart.count());
            set_summary.set(None);
        }
    };

    let checkout = move |_| {
        let current = items.get_untracked();
        if current.is_empty() {
            return;
        }
        let mut lines: Vec<String> = current
            .iter()
            .filter_map(|item| product(&item.id))
            .map(|p| format!("{} — {}", p.name, format_price(p.price)))
            .collect();
        let t = totals(&current);
        lines.push(format!("Total — {}", format_price(t.total)));
        set_summary.set(Some(lines));
    };

    view! {
        <div class="store-shell">
            <StoreNav count=badge />
            <section class="cart-layout">
                <div class="cart-items">
                    <h2>"Your cart"</h2>
                    {move || {
                        let current = items.get();
                        if current.is_empty() {
                            return view! {
                                <div class="panel">
                                    <p class="muted">"Your cart is empty."</p>
                                </div>
                            }
                            .into_any();
                        }
                        current
                            .iter()
                            .enumerate()
                            .filter_map(|(index, item)| {
                                let found = product(&item.id)?;
                                Some(
                                    view! {
                                        <div class="panel cart-row">
                                            <div>
                                                <h3>{found.name}</h3>
                                                <p class="price">{format_price(found.price)}</p>
                                            </div>
                                            <button
                                                class="ghost-btn"
                                                on:click=move |_| remove(index)
                                            >
                                                "Remove"
                                            </button>
                                        </div>
                                    },
                                )
                            })
                            .collect_view()
                            .into_any()
                    }}
                </div>

                <aside class="panel cart-summary">
                    <h3>"Summary"</h3>
                    {move || {
                        let t = totals(&items.get());
                        view! {
                            <dl>
                                <dt>"Subtotal"</dt>
                                <dd>{format_price(t.subtotal)}</dd>
                                <dt>"VAT (20%)"</dt>
                                <dd>{format_price(t.tax)}</dd>
                                <dt>"Total"</dt>
                                <dd class="grand-total">{format_price(t.total)}</dd>
                            </dl>
                        }
                    }}
                    <button
                        class="send-btn wide"
                        disabled=move || items.with(|i| i.is_empty())
                        on:click=checkout
                    >
                        "Checkout"
                    </button>
                    {move || {
                        summary.get().map(|lines| {
                            view! {
                                <div class="order-summary">
                                    <h4>"Your order"</h4>
                                    <ul>
                                        {lines
                                            .into_iter()
                                            .map(|line| view! { <li>{line}</li> })
                                            .collect_view()}
                                    </ul>
                                    <p class="muted">
                                        "Demo checkout — no payment is captured."
                                    </p>
                                </div>
                            }
                        })
                    }}
                </aside>
            </section>
        </div>
    }
}
