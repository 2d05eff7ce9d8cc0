//! Markup escaping for untrusted posting text.

/// Line-break marker inserted for `\r\n` and `\n`.
pub const LINE_BREAK: &str = "<br>";

/// Escape characters significant in HTML and turn newlines into `<br>`.
///
/// The replacement order matters: `&` goes first so the entities produced
/// by later steps are not escaped again, and the line-break markers come
/// last so their `<` survives.
pub fn escape_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace("\r\n", LINE_BREAK)
        .replace('\n', LINE_BREAK)
}
