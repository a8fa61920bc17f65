//! Rendering of [`DisplayState`] for the response area.
//!
//! Server and user text always goes through [`escape_text`]; the only markup
//! derived from content is the `<br>` that replaces newlines in the reply.

use shared::domain::{element_ids, ClassificationView, DisplayState};

pub const LOADING_MESSAGE: &str = "Processando, aguarde...";

/// Sink for display state transitions (the response container).
pub trait ResponseView {
    fn show(&mut self, state: &DisplayState);
}

/// Escapes text so it is inserted as characters, never as markup.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn format_reply(reply: &str) -> String {
    escape_text(reply).replace('\n', "<br>")
}

/// Inner HTML of the response container for `state`.
pub fn render_html(state: &DisplayState) -> String {
    match state {
        DisplayState::Hidden => String::new(),
        DisplayState::Loading => format!(r#"<div class="loading">{LOADING_MESSAGE}</div>"#),
        DisplayState::Error(message) => {
            format!(r#"<div class="erro">{}</div>"#, escape_text(message))
        }
        DisplayState::Result(view) => render_result_html(view),
    }
}

fn render_result_html(view: &ClassificationView) -> String {
    format!(
        concat!(
            "<p><strong>Texto Enviado:</strong></p>\n",
            "<div class=\"texto-original-cliente\">{original}</div>\n",
            "<hr class=\"linha-divisoria\">\n",
            "<p><strong>Categoria:</strong> {category}</p>\n",
            "<p><strong>Resposta automática:</strong></p>\n",
            "<div class=\"resposta-sugerida\">{reply}</div>",
        ),
        original = escape_text(&view.original_text),
        category = escape_text(&view.category),
        reply = format_reply(&view.reply),
    )
}

/// The full response container element, hidden while there is nothing to show.
pub fn render_container(state: &DisplayState) -> String {
    let display = if state.is_visible() { "block" } else { "none" };
    format!(
        r#"<div id="{id}" style="display:{display}">{inner}</div>"#,
        id = element_ids::RESPONSE_CONTAINER,
        inner = render_html(state),
    )
}

/// Terminal rendering.
pub fn render_plain(state: &DisplayState) -> String {
    match state {
        DisplayState::Hidden => String::new(),
        DisplayState::Loading => LOADING_MESSAGE.to_string(),
        DisplayState::Error(message) => message.clone(),
        DisplayState::Result(view) => format!(
            "Texto Enviado:\n{}\n\n----\nCategoria: {}\nResposta automática:\n{}",
            view.original_text, view.category, view.reply
        ),
    }
}

/// In-memory response container: visibility plus inner HTML.
#[derive(Debug, Default)]
pub struct HtmlView {
    visible: bool,
    inner_html: String,
    transitions: Vec<&'static str>,
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Labels of every state shown so far, oldest first.
    pub fn transitions(&self) -> &[&'static str] {
        &self.transitions
    }
}

impl ResponseView for HtmlView {
    fn show(&mut self, state: &DisplayState) {
        self.visible = state.is_visible();
        self.inner_html = render_html(state);
        self.transitions.push(state.label());
    }
}
