//! Work dump line parser
//!
//! Parsing is pure: it produces a `WorkRecord` holding the book fields and
//! the referenced author ids. Names are filled in later by the resolver,
//! which needs storage access.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use crate::dump::parse_payload;
use crate::parser::{optional_array, optional_object, optional_string, required_string};
use crate::record::Book;
use crate::reference::{author_id, work_id};
use crate::{Error, Result};

/// Layout of `created.value`: `yyyy-MM-ddTHH:mm:ss.SSSSSS`
pub const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Separator byte expected at each fixed offset of `created.value`
const CREATED_SEPARATORS: [(usize, u8); 6] = [
    (4, b'-'),
    (7, b'-'),
    (10, b'T'),
    (13, b':'),
    (16, b':'),
    (19, b'.'),
];

const CREATED_LEN: usize = 26;

/// A parsed work whose author names are not resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRecord {
    /// Book with every field except `author_ids`/`author_names`
    pub book: Book,
    /// Referenced author ids in dump order, `None` if the work lists none
    pub author_ids: Option<Vec<String>>,
}

/// Parse one work dump line.
pub fn parse_work(line: &str) -> Result<WorkRecord> {
    let obj = parse_payload(line)?;

    let mut book = Book::new(work_id(&required_string(&obj, "key")?), optional_string(&obj, "title"));

    if let Some(description) = optional_object(&obj, "description") {
        book.description = Some(optional_string(description, "value"));
    }

    let author_ids = optional_array(&obj, "authors")
        .map(|entries| entries.iter().map(author_ref).collect::<Result<Vec<_>>>())
        .transpose()?;

    book.cover_ids = optional_array(&obj, "covers")
        .map(|covers| covers.iter().map(cover_id).collect::<Result<Vec<_>>>())
        .transpose()?;

    if let Some(created) = optional_object(&obj, "created") {
        let value = created
            .get("value")
            .and_then(Value::as_str)
            .ok_or(Error::MissingField("created.value"))?;
        book.published_date = Some(parse_published_date(value)?);
    }

    Ok(WorkRecord { book, author_ids })
}

/// Author id from an `authors` entry shaped `{"author": {"key": "/authors/.."}}`
fn author_ref(entry: &Value) -> Result<String> {
    entry
        .get("author")
        .and_then(|author| author.get("key"))
        .and_then(Value::as_str)
        .map(author_id)
        .ok_or_else(|| Error::InvalidField {
            field: "authors",
            reason: format!("entry without author.key: {}", entry),
        })
}

fn cover_id(cover: &Value) -> Result<String> {
    match cover {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        other => Err(Error::InvalidField {
            field: "covers",
            reason: format!("unsupported cover id: {}", other),
        }),
    }
}

/// Parse a `created.value` timestamp, keeping only the calendar date.
pub fn parse_published_date(value: &str) -> Result<NaiveDate> {
    let invalid = |reason: String| Error::InvalidDate {
        value: value.to_string(),
        reason,
    };

    let bytes = value.as_bytes();
    if bytes.len() != CREATED_LEN {
        return Err(invalid(format!("expected {} characters", CREATED_LEN)));
    }
    for (idx, &b) in bytes.iter().enumerate() {
        let expected = CREATED_SEPARATORS.iter().find(|(pos, _)| *pos == idx).map(|(_, sep)| *sep);
        let ok = match expected {
            Some(sep) => b == sep,
            None => b.is_ascii_digit(),
        };
        if !ok {
            return Err(invalid(format!("unexpected character at offset {}", idx)));
        }
    }
    // chrono's %S takes 60 as a leap second
    if &value[17..19] > "59" {
        return Err(invalid("second out of range".to_string()));
    }

    NaiveDateTime::parse_from_str(value, CREATED_FORMAT)
        .map(|timestamp| timestamp.date())
        .map_err(|e| invalid(e.to_string()))
}
