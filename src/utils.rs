use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::DateTime;

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Prepares untrusted text for `XmlWriter`, which leaves `&` untouched.
/// Characters XML 1.0 forbids become U+FFFD; markup characters become entities.
pub fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c if !is_xml_char(c) => escaped.push('\u{FFFD}'),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Picks a MIME type for a downloaded image, preferring the server's
/// `Content-Type` and falling back to the URL's extension.
pub fn image_mime(content_type: Option<&str>, url: &str) -> String {
    if let Some(mime) = content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .filter(|ct| ct.starts_with("image/"))
    {
        return mime.to_string();
    }

    // Steam CDN urls carry a cache-busting query, e.g. `header.jpg?t=1700000000`
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let extension = path
        .rsplit('/')
        .next()
        .and_then(|file| file.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
    .to_string()
}

pub fn data_uri(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(data))
}

pub fn format_last_seen(unix_seconds: Option<i64>) -> String {
    unix_seconds
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|time| time.format("%d/%m/%Y %H:%M UTC").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            xml_escape(r#"<b>Tom & "Jerry's"</b>"#),
            "&lt;b&gt;Tom &amp; &quot;Jerry&#39;s&quot;&lt;/b&gt;"
        );
        assert_eq!(xml_escape("Half-Life"), "Half-Life");
    }

    #[test]
    fn replaces_characters_xml_forbids() {
        assert_eq!(xml_escape("Ana\u{1b}[31m"), "Ana\u{FFFD}[31m");
        assert_eq!(xml_escape("a\u{0}b\u{FFFE}\u{FFFF}"), "a\u{FFFD}b\u{FFFD}\u{FFFD}");
        assert_eq!(xml_escape("tab\there\r\n"), "tab\there\r\n");
        assert_eq!(xml_escape("\u{1F3AE} \u{FFFD}"), "\u{1F3AE} \u{FFFD}");
    }

    #[test]
    fn mime_prefers_content_type() {
        assert_eq!(
            image_mime(Some("image/png; charset=binary"), "https://cdn/x.jpg"),
            "image/png"
        );
    }

    #[test]
    fn mime_falls_back_to_extension() {
        assert_eq!(
            image_mime(Some("application/octet-stream"), "https://cdn/apps/70/header.PNG?t=1"),
            "image/png"
        );
        assert_eq!(image_mime(None, "https://cdn/apps/70/header.jpg?t=1"), "image/jpeg");
        assert_eq!(image_mime(None, "https://cdn/apps/70/header"), "image/jpeg");
    }

    #[test]
    fn data_uri_is_base64() {
        assert_eq!(data_uri("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn last_seen_formatting() {
        assert_eq!(format_last_seen(Some(0)), "01/01/1970 00:00 UTC");
        assert_eq!(format_last_seen(Some(1_700_000_000)), "14/11/2023 22:13 UTC");
        assert_eq!(format_last_seen(None), "N/A");
    }
}
