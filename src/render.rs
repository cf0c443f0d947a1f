// src/render.rs

use crate::codec;

/// Compiled-in page header, used when the header blob is absent.
pub const DEFAULT_HEADER: &str = "<!DOCTYPE html>\n\
<html>\n\
<head>\n\
<meta charset=\"utf-8\"/>\n\
<title>Guest book</title>\n\
<style>\n\
p { background-color: LightGray; white-space: pre; margin: 50px; padding: 20px; }\n\
</style>\n\
</head>\n\
<body lang=\"en-US\" dir=\"ltr\">\n\
<a href=\"/api/getForm\">Click here to add an entry</a><br/>\n";

/// Compiled-in page footer, used when the footer blob is absent.
pub const DEFAULT_FOOTER: &str =
    "<a href=\"/api/getForm\">Click here to add an entry</a></body></html>\n";

/// Compiled-in submission form, used when the form blob is absent.
pub const DEFAULT_FORM: &str = "<!DOCTYPE html>\n\
<html>\n\
<head><meta charset=\"utf-8\"/><title>Sign the guest book</title></head>\n\
<body>\n\
<form method=\"post\" action=\"/api/write\">\n\
<textarea name=\"message\" rows=\"8\" cols=\"60\"></textarea><br/>\n\
<input type=\"submit\" value=\"Sign\"/>\n\
</form>\n\
</body>\n\
</html>\n";

/// Renders the stored log into an HTML fragment, one paragraph per entry.
///
/// The paragraph shape matches what the original substitution pipeline
/// produced for a well-formed record, but timestamp and message are escaped
/// here instead of being spliced in verbatim.
pub fn render_log(log: &str) -> String {
    let mut out = String::new();
    for entry in codec::parse_log(log) {
        out.push_str("<p>Signed in on: ");
        out.push_str(&htmlescape::encode_minimal(&entry.timestamp));
        out.push('\n');
        out.push_str(&htmlescape::encode_minimal(&entry.message));
        out.push_str("\n</p>\n\n");
    }
    out
}

/// Full page: header fragment + rendered log + footer fragment.
pub fn render_page(header: &str, log: &str, footer: &str) -> String {
    format!("{}{}{}", header, render_log(log), footer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_entry;
    use chrono::{Local, TimeZone};

    fn record(message: &str) -> String {
        encode_entry(message, Local.with_ymd_and_hms(2020, 4, 15, 9, 30, 5).unwrap())
    }

    #[test]
    fn rendered_entry_carries_message_and_timestamp_prefix() {
        let html = render_log(&record("Hello World"));
        assert!(html.contains("Signed in on: 2020-04-15 09:30:05"));
        assert!(html.contains("Hello World"));
        assert!(html.starts_with("<p>"));
        assert!(html.trim_end().ends_with("</p>"));
    }

    #[test]
    fn message_markup_is_escaped() {
        let html = render_log(&record("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn empty_log_renders_to_nothing() {
        assert_eq!(render_log(""), "");
    }

    #[test]
    fn page_wraps_fragment_in_header_and_footer() {
        let page = render_page(DEFAULT_HEADER, &record("hi"), DEFAULT_FOOTER);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.ends_with("</body></html>\n"));
        assert!(page.contains("Signed in on:"));
    }

    #[test]
    fn newest_entry_is_rendered_first() {
        let log = format!("{}{}", record("B"), record("A"));
        let html = render_log(&log);
        let b = html.find("B").unwrap();
        let a = html.find("A").unwrap();
        assert!(b < a);
    }
}
