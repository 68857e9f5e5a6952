//! HTML front page.

use axum::{extract::State, response::Html};

use crate::{health::SERVICE_NAME, state::AppState};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.predictor.model_info()))
}

pub fn render_index(model_info: &str) -> String {
    INDEX_TEMPLATE
        .replace("{{ service }}", &escape_html(SERVICE_NAME))
        .replace("{{ version }}", &escape_html(env!("CARGO_PKG_VERSION")))
        .replace("{{ model_info }}", &escape_html(model_info))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_placeholder() {
        let html = render_index("SVR model");
        assert!(html.contains("SVR model"));
        assert!(html.contains(SERVICE_NAME));
        assert!(html.contains(env!("CARGO_PKG_VERSION")));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn model_info_is_escaped() {
        let html = render_index("<b>\"fast\" & loose</b>");
        assert!(html.contains("&lt;b&gt;&quot;fast&quot; &amp; loose&lt;/b&gt;"));
    }
}
