use super::AppState;
use axum::extract::State;
use axum::response::Html;

const INDEX_TEMPLATE: &str = include_str!("index.html");
const DEFAULT_SERVICE_PLACEHOLDER: &str = "{{default_service}}";

pub(crate) async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_page.to_string())
}

pub(crate) fn render_index(default_service: &str) -> String {
    INDEX_TEMPLATE.replace(DEFAULT_SERVICE_PLACEHOLDER, &escape_html(default_service))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
