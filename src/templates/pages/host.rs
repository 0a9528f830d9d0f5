// templates/pages/host.rs

use crate::domain::boundaries::NeighbourhoodBoundaries;
use crate::domain::query::{District, RoomType};
use crate::geos::MADRID_DISTRICTS;
use crate::templates::desktop_layout;
use maud::{html, Markup, PreEscaped};

/// The host estimator: property details on the left, the map and the
/// estimate on the right. The form posts to /host/estimate via htmx and
/// swaps the price card in place; clicking the map moves the marker and
/// rewrites the hidden coordinate fields.
pub fn host_page(boundaries: Option<&NeighbourhoodBoundaries>) -> Markup {
    desktop_layout(
        "Price my place",
        html! {
            link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
            script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" {}

            main class="container" {
                h1 { "📍 Property Details" }
                div class="columns" {
                    form hx-post="/host/estimate" hx-target="#estimate-result" hx-swap="innerHTML" {
                        label for="district-select" { "1. District" }
                        select name="neighbourhood" id="district-select" {
                            @for d in District::ALL {
                                option value=(d.name()) selected[d == District::Centro] { (d.name()) }
                            }
                        }

                        label for="barrio-select" { "2. Neighbourhood" }
                        select name="barrio" id="barrio-select" {
                            @for b in crate::geos::neighbourhoods_of("Centro") {
                                option value=(b) { (b) }
                            }
                        }

                        label for="room_type" { "Room type" }
                        select name="room_type" id="room_type" {
                            @for r in RoomType::ALL {
                                option value=(r.name()) { (r.name()) }
                            }
                        }

                        label for="accommodates" { "Accommodates" }
                        input type="number" name="accommodates" id="accommodates" min="1" value="4";
                        label for="bedrooms" { "Bedrooms" }
                        input type="number" name="bedrooms" id="bedrooms" min="0" value="2";
                        label for="beds" { "Beds" }
                        input type="number" name="beds" id="beds" min="1" value="2";
                        label for="bathrooms" { "Bathrooms" }
                        input type="number" name="bathrooms" id="bathrooms" min="0" step="0.5" value="1.0";

                        h4 { "✨ Amenities" }
                        div class="amenities" {
                            label { input type="checkbox" name="has_ac"; "AC" }
                            label { input type="checkbox" name="has_pool"; "Pool" }
                            label { input type="checkbox" name="has_elevator"; "Elevator" }
                            label { input type="checkbox" name="has_parking"; "Parking" }
                        }

                        h4 { "🚀 Host Simulator" }
                        label { input type="checkbox" name="host_is_superhost"; "I am a Superhost 🌟" }
                        label for="review_scores_rating" { "Average review score" }
                        input type="number" name="review_scores_rating" id="review_scores_rating"
                            min="0" max="5" step="0.05" value="4.75";
                        label for="number_of_reviews" { "Number of reviews" }
                        input type="number" name="number_of_reviews" id="number_of_reviews" min="0" value="10";

                        input type="hidden" name="latitude" id="latitude" value="40.4168";
                        input type="hidden" name="longitude" id="longitude" value="-3.7038";

                        button type="submit" class="primary" { "🔮 Predict Optimal Price" }
                    }

                    div {
                        h2 { "🗺️ Location" }
                        p { "Click the map to set your exact spot." }
                        div id="map" {}
                        div id="estimate-result" {}
                    }
                }
            }

            script { (PreEscaped(page_data(boundaries))) }
            script { (PreEscaped(HOST_MAP_JS)) }
        },
    )
}

/// Static data the map script needs: the district → neighbourhood table and
/// the boundary overlay (or null when the file was not loaded).
fn page_data(boundaries: Option<&NeighbourhoodBoundaries>) -> String {
    let mut geography = serde_json::Map::new();
    for (district, hoods) in MADRID_DISTRICTS {
        geography.insert(
            district.to_string(),
            serde_json::Value::from(hoods.to_vec()),
        );
    }
    format!(
        "const GEOGRAPHY = {};\nconst BOUNDARIES = {};",
        serde_json::Value::Object(geography),
        boundaries.map(|b| b.raw_json()).unwrap_or("null"),
    )
}

const HOST_MAP_JS: &str = r#"
const map = L.map('map').setView([40.4168, -3.7038], 13);
L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', { maxZoom: 19 }).addTo(map);
const marker = L.marker([40.4168, -3.7038]).addTo(map);

const districtSelect = document.getElementById('district-select');
const barrioSelect = document.getElementById('barrio-select');
let overlay = null;

map.on('click', (e) => {
  marker.setLatLng(e.latlng);
  document.getElementById('latitude').value = e.latlng.lat.toFixed(6);
  document.getElementById('longitude').value = e.latlng.lng.toFixed(6);
});

function styleFor(feature) {
  const props = feature.properties || {};
  if (props.neighbourhood_group === districtSelect.value) {
    return { color: '#FF5A5F', weight: 2, fillColor: '#FF5A5F', fillOpacity: 0.35 };
  }
  return { color: '#666666', weight: 1, fillColor: '#888888', fillOpacity: 0.12 };
}

function redrawOverlay() {
  if (!BOUNDARIES) return;
  if (overlay) overlay.remove();
  overlay = L.geoJSON(BOUNDARIES, { style: styleFor }).addTo(map);
}

function refreshBarrios() {
  barrioSelect.innerHTML = '';
  (GEOGRAPHY[districtSelect.value] || []).forEach((b) => {
    const option = document.createElement('option');
    option.value = b;
    option.textContent = b;
    barrioSelect.appendChild(option);
  });
}

districtSelect.addEventListener('change', () => {
  refreshBarrios();
  redrawOverlay();
});
redrawOverlay();
"#;
