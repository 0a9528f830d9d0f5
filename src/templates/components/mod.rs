use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// The suggested-price metric returned by the host estimator form.
pub fn price_card(price_euros: f64) -> Markup {
    html! {
        section class="card" {
            h3 { "Suggested Nightly Price" }
            p class="metric" { "€ " (format!("{price_euros:.2}")) }
        }
    }
}

/// Inline error shown in place of the price when an estimate fails.
pub fn error_card(message: &str) -> Markup {
    html! {
        section class="card error-card" {
            p { (message) }
        }
    }
}
