/// Escapes the five XML-unsafe characters for use in attribute values.
///
/// Single pass: an input that already contains `&amp;` is escaped again, so
/// callers must hand in raw text, never pre-encoded entities.
pub fn escape_xml_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
