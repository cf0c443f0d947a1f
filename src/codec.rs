// src/codec.rs

use crate::error::{GuestbookError, Result};
use crate::models::Entry;
use chrono::{DateTime, Local};

/// Wall-clock format used inside stored records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const RECORD_PREFIX: &str = "<Entry timestamp=\"";
const RECORD_OPEN_END: &str = "\">\n";
const RECORD_TERMINATOR: &str = "\n</Entry>\n\n";

/// Decodes a form-urlencoded text: '+' becomes a space, %XX becomes the byte
/// it names. The decoded bytes must form valid UTF-8.
pub fn percent_decode(raw: &str) -> Result<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hex = bytes.get(i + 1..i + 3).ok_or_else(|| {
                    GuestbookError::Decode(format!("truncated percent escape at byte {}", i))
                })?;
                if !hex[0].is_ascii_hexdigit() || !hex[1].is_ascii_hexdigit() {
                    return Err(GuestbookError::Decode(format!(
                        "invalid percent escape \"%{}\" at byte {}",
                        String::from_utf8_lossy(hex),
                        i
                    )));
                }
                // Both digits checked above, so this cannot fail.
                let value = u8::from_str_radix(std::str::from_utf8(hex).unwrap_or("0"), 16)
                    .unwrap_or(0);
                out.push(value);
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out)
        .map_err(|e| GuestbookError::Decode(format!("decoded body is not valid UTF-8: {}", e)))
}

/// Decodes a submitted request body into the message text: the whole body is
/// percent-decoded first, then a leading "message=" field marker is stripped.
/// The body of the form page is urlencoded with a single field of that name.
pub fn decode_form_body(raw: &str) -> Result<String> {
    let text = percent_decode(raw)?;
    match text.strip_prefix("message=") {
        Some(message) => Ok(message.to_string()),
        None => Ok(text),
    }
}

/// Encodes one message into its stored record. Pure; the message is embedded
/// verbatim, so escaping for display is the renderer's job.
pub fn encode_entry(message: &str, timestamp: DateTime<Local>) -> String {
    format!(
        "{}{}{}{}{}",
        RECORD_PREFIX,
        timestamp.format(TIMESTAMP_FORMAT),
        RECORD_OPEN_END,
        message,
        RECORD_TERMINATOR
    )
}

/// Splits the stored log into entries, most recent first. Chunks that do not
/// look like a record are skipped rather than failing the whole log: the
/// encoder never escaped message text, so old blobs may contain records whose
/// bodies collide with the record delimiters.
pub fn parse_log(log: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    for chunk in log.split(RECORD_TERMINATOR) {
        if chunk.is_empty() {
            continue;
        }
        match parse_record(chunk) {
            Some(entry) => entries.push(entry),
            None => {
                tracing::warn!(chunk_len = chunk.len(), "skipping malformed record in stored log")
            }
        }
    }
    entries
}

fn parse_record(chunk: &str) -> Option<Entry> {
    let rest = chunk.strip_prefix(RECORD_PREFIX)?;
    let (timestamp, message) = rest.split_once(RECORD_OPEN_END)?;
    Some(Entry {
        timestamp: timestamp.to_string(),
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Local> {
        Local.with_ymd_and_hms(2020, 4, 15, 9, 30, 5).unwrap()
    }

    #[test]
    fn percent_decode_plain_text_passes_through() {
        assert_eq!(percent_decode("hello").unwrap(), "hello");
    }

    #[test]
    fn percent_decode_plus_and_escapes() {
        assert_eq!(percent_decode("Hello+World%21").unwrap(), "Hello World!");
        assert_eq!(percent_decode("%C3%A9").unwrap(), "é");
    }

    #[test]
    fn percent_decode_rejects_bad_escape() {
        assert!(percent_decode("bad%zzseq").is_err());
        assert!(percent_decode("truncated%2").is_err());
        assert!(percent_decode("%").is_err());
    }

    #[test]
    fn percent_decode_rejects_invalid_utf8() {
        // 0xFF is never valid UTF-8.
        assert!(percent_decode("%FF").is_err());
    }

    #[test]
    fn form_body_strips_field_marker() {
        assert_eq!(decode_form_body("message=Hello+World").unwrap(), "Hello World");
    }

    #[test]
    fn form_body_without_marker_is_used_as_is() {
        assert_eq!(decode_form_body("just+text").unwrap(), "just text");
    }

    #[test]
    fn encode_produces_the_fixed_record_shape() {
        let record = encode_entry("hi there", ts());
        assert_eq!(
            record,
            "<Entry timestamp=\"2020-04-15 09:30:05\">\nhi there\n</Entry>\n\n"
        );
    }

    #[test]
    fn parse_inverts_encode() {
        let log = encode_entry("first", ts());
        let entries = parse_log(&log);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp, "2020-04-15 09:30:05");
        assert_eq!(entries[0].message, "first");
    }

    #[test]
    fn parse_empty_log_yields_no_entries() {
        assert!(parse_log("").is_empty());
    }

    #[test]
    fn parse_keeps_newest_first_order() {
        let log = format!("{}{}", encode_entry("B", ts()), encode_entry("A", ts()));
        let messages: Vec<_> = parse_log(&log).into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["B", "A"]);
    }

    #[test]
    fn parse_preserves_blank_lines_inside_a_message() {
        let log = encode_entry("para one\n\npara two", ts());
        let entries = parse_log(&log);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "para one\n\npara two");
    }

    #[test]
    fn parse_skips_garbage_between_records() {
        let log = format!("not a record\n</Entry>\n\n{}", encode_entry("ok", ts()));
        let entries = parse_log(&log);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "ok");
    }

    #[test]
    fn empty_message_round_trips() {
        let entries = parse_log(&encode_entry("", ts()));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "");
    }
}
