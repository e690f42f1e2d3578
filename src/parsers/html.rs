//! Display rendering for polled console text

/// Line break marker used in rendered output
pub const LINE_BREAK: &str = "<br />";

/// Render console text for interpolation into an HTML fragment
///
/// Markup-significant characters are escaped and every line break
/// (`\n`, `\r\n` or a lone `\r`) becomes [`LINE_BREAK`].
pub fn render_html(text: &str) -> String {
    let mut rendered = String::with_capacity(text.len() + text.len() / 8);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '&' => rendered.push_str("&amp;"),
            '<' => rendered.push_str("&lt;"),
            '>' => rendered.push_str("&gt;"),
            '"' => rendered.push_str("&quot;"),
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    rendered.push_str(LINE_BREAK);
                }
            }
            '\n' => rendered.push_str(LINE_BREAK),
            other => rendered.push(other),
        }
    }

    rendered
}
