// templates/pages/home.rs

use crate::templates::{components::card, desktop_layout};
use maud::{html, Markup};

pub fn home_page(model_loaded: bool) -> Markup {
    desktop_layout(
        "Home",
        html! {
            main class="container" {
                h1 { "🏠 AI-Powered Airbnb Pricer (Madrid)" }
                p {
                    "Discover the optimal nightly price for your Madrid short-term rental, "
                    "or browse listings the model thinks are underpriced."
                }

                (card("Model status", html! {
                    @if model_loaded {
                        p { "Pricing model and column schema are loaded. Predictions are live." }
                    } @else {
                        p { "⚠️ The pricing model is not loaded; prediction requests will fail until the artifacts are restored." }
                    }
                }))

                (card("For hosts", html! {
                    p { "Describe your place, click your exact spot on the map, and get a suggested nightly price in euros." }
                    a href="/host" { "Price my place →" }
                }))

                (card("For investors", html! {
                    p { "Every listing is scored against the model offline; the ones priced under their predicted value are surfaced here." }
                    a href="/invest" { "Find bargains →" }
                }))
            }
        },
    )
}
