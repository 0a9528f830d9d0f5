use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Madrid Pricer" }
                script src="https://unpkg.com/htmx.org@1.9.12" defer {};
                style { (maud::PreEscaped(BASE_CSS)) }
            }
            body {
                header class="topbar" {
                    h3 { "Madrid Pricer" }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/host" { "Price my place" } }
                            li { a href="/invest" { "Find bargains" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}

const BASE_CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
.topbar { display: flex; align-items: center; gap: 2rem; padding: 0.5rem 1.5rem;
          box-shadow: 0 1px 4px rgba(0,0,0,0.15); }
.topbar nav ul { display: flex; gap: 1.25rem; list-style: none; padding: 0; }
.topbar a { color: #222; text-decoration: none; }
.topbar a:hover { color: #FF5A5F; }
main.container { max-width: 1100px; margin: 1.5rem auto; padding: 0 1rem; }
.card { border: 1px solid #ddd; border-radius: 8px; padding: 1rem 1.25rem; margin: 1rem 0; }
.columns { display: flex; gap: 2rem; align-items: flex-start; }
.columns > * { flex: 1; }
.metric { font-size: 2.2rem; font-weight: 700; color: #FF5A5F; }
.error-card { border-color: #dc2626; color: #dc2626; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #eee; }
#map { height: 420px; border-radius: 8px; }
form label { display: block; margin-top: 0.6rem; font-size: 0.9rem; }
form input[type=number], form select { padding: 0.35rem; font-size: 1rem; width: 100%; max-width: 16rem; }
button.primary { margin-top: 1rem; background: #FF5A5F; color: white; border: none;
                 padding: 0.6rem 1.4rem; border-radius: 6px; font-size: 1rem; cursor: pointer; }
.amenities { display: flex; gap: 1.25rem; margin-top: 0.5rem; }
.amenities label { display: inline-flex; gap: 0.3rem; margin: 0; }
"#;
