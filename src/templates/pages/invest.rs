// templates/pages/invest.rs

use crate::domain::bargains::BargainListing;
use crate::domain::boundaries::NeighbourhoodBoundaries;
use crate::templates::desktop_layout;
use maud::{html, Markup, PreEscaped};

const TABLE_LIMIT: usize = 50;

pub struct InvestVm<'a> {
    /// Positive-residual listings, best first.
    pub opportunities: &'a [BargainListing],
    pub boundaries: Option<&'a NeighbourhoodBoundaries>,
}

/// The investor dashboard: listings priced under the model's valuation,
/// as a table and as map markers.
pub fn invest_page(vm: &InvestVm) -> Markup {
    desktop_layout(
        "Find bargains",
        html! {
            link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
            script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" {}

            main class="container" {
                h1 { "💶 Underpriced Listings" }
                p {
                    (vm.opportunities.len())
                    " listings are currently priced under their predicted value. "
                    "Scores are refreshed offline; what you see here is the last batch."
                }

                div class="columns" {
                    div {
                        table {
                            thead {
                                tr {
                                    th { "Listing" }
                                    th { "Asking €" }
                                    th { "Predicted €" }
                                    th { "Upside €" }
                                }
                            }
                            tbody {
                                @for o in vm.opportunities.iter().take(TABLE_LIMIT) {
                                    tr {
                                        td { a href=(o.listing_url) target="_blank" { "open" } }
                                        td { (format!("{:.2}", o.price)) }
                                        td { (format!("{:.2}", o.predicted_price)) }
                                        td { (format!("{:.2}", o.residual())) }
                                    }
                                }
                            }
                        }
                        @if vm.opportunities.len() > TABLE_LIMIT {
                            p { "Showing the top " (TABLE_LIMIT) " by upside; the map has them all." }
                        }
                    }
                    div {
                        div id="map" {}
                    }
                }
            }

            script { (PreEscaped(page_data(vm))) }
            script { (PreEscaped(INVEST_MAP_JS)) }
        },
    )
}

fn page_data(vm: &InvestVm) -> String {
    format!(
        "const OPPORTUNITIES = {};\nconst BOUNDARIES = {};",
        serde_json::to_string(vm.opportunities).unwrap_or_else(|_| "[]".to_string()),
        vm.boundaries.map(|b| b.raw_json()).unwrap_or("null"),
    )
}

const INVEST_MAP_JS: &str = r#"
const map = L.map('map').setView([40.4168, -3.7038], 12);
L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', { maxZoom: 19 }).addTo(map);

if (BOUNDARIES) {
  L.geoJSON(BOUNDARIES, {
    style: { color: '#666666', weight: 1, fillColor: '#888888', fillOpacity: 0.08 },
  }).addTo(map);
}

OPPORTUNITIES.forEach((o) => {
  const upside = (o.predicted_price - o.price).toFixed(2);
  L.circleMarker([o.latitude, o.longitude], {
    radius: 6, color: '#FF5A5F', fillColor: '#FF5A5F', fillOpacity: 0.8,
  })
    .bindPopup(
      '€' + o.price.toFixed(2) + ' asking, €' + o.predicted_price.toFixed(2)
      + ' predicted (+€' + upside + ')<br><a href="' + o.listing_url + '" target="_blank">open listing</a>'
    )
    .addTo(map);
});
"#;
