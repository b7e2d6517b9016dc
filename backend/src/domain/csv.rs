//! CSV rendering for the admin export.
//!
//! One row per record, `id,content,ip,created_at` header, every field
//! double-quoted. Embedded quotes are doubled and embedded newlines collapse
//! to a single space so each record stays on one physical line.

use chrono::SecondsFormat;

use super::feedback::FeedbackRecord;

/// Column order shared by the header and every data row.
const HEADERS: [&str; 4] = ["id", "content", "ip", "created_at"];

/// Render records as a CSV document.
#[must_use]
pub fn render(records: &[FeedbackRecord]) -> String {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(HEADERS.join(","));
    for record in records {
        let fields = [
            field(&record.id.to_string()),
            field(&record.content),
            field(&record.ip),
            field(&record.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ];
        rows.push(fields.join(","));
    }
    rows.join("\n")
}

/// Quote a single field value.
fn field(value: &str) -> String {
    let flattened = value
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ");
    format!("\"{}\"", flattened.replace('"', "\"\""))
}
