//! Record parsers - dump line to typed record
//!
//! Every field is read through one of the extraction rules below, each of
//! which states what happens when the field is absent or of the wrong type.

pub mod author;
pub mod work;

pub use author::parse_author;
pub use work::{parse_work, parse_published_date, WorkRecord};

use serde_json::{Map, Value};
use crate::{Error, Result};

type Object = Map<String, Value>;

/// String field, `""` if absent or not a string.
pub fn optional_string(obj: &Object, field: &str) -> String {
    obj.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// String field that must be present.
pub fn required_string(obj: &Object, field: &'static str) -> Result<String> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(Error::MissingField(field))
}

/// Nested object, `None` if absent or not an object.
pub fn optional_object<'a>(obj: &'a Object, field: &str) -> Option<&'a Object> {
    obj.get(field).and_then(Value::as_object)
}

/// Nested array, `None` if absent or not an array.
pub fn optional_array<'a>(obj: &'a Object, field: &str) -> Option<&'a Vec<Value>> {
    obj.get(field).and_then(Value::as_array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Object {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_optional_string_defaults() {
        let obj = object(json!({"name": "Mark Twain", "count": 3, "none": null}));
        assert_eq!(optional_string(&obj, "name"), "Mark Twain");
        assert_eq!(optional_string(&obj, "count"), "");
        assert_eq!(optional_string(&obj, "none"), "");
        assert_eq!(optional_string(&obj, "absent"), "");
    }

    #[test]
    fn test_required_string() {
        let obj = object(json!({"key": "/works/OL1W", "bad": 1}));
        assert_eq!(required_string(&obj, "key").unwrap(), "/works/OL1W");
        assert!(matches!(required_string(&obj, "bad"), Err(Error::MissingField("bad"))));
        assert!(matches!(required_string(&obj, "absent"), Err(Error::MissingField("absent"))));
    }

    #[test]
    fn test_optional_containers() {
        let obj = object(json!({"created": {"value": "x"}, "covers": [1], "description": "plain"}));
        assert!(optional_object(&obj, "created").is_some());
        assert!(optional_object(&obj, "description").is_none());
        assert_eq!(optional_array(&obj, "covers").map(Vec::len), Some(1));
        assert!(optional_array(&obj, "created").is_none());
    }
}
