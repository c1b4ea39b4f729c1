//! Author dump line parser

use crate::dump::parse_payload;
use crate::parser::optional_string;
use crate::record::Author;
use crate::reference::author_id;
use crate::Result;

/// Parse one author dump line.
///
/// A missing `key` yields an empty id rather than an error.
pub fn parse_author(line: &str) -> Result<Author> {
    let obj = parse_payload(line)?;

    Ok(Author {
        id: author_id(&optional_string(&obj, "key")),
        name: optional_string(&obj, "name"),
        personal_name: optional_string(&obj, "personal_name"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_parse_author_line() {
        let line = "/type/author\t/authors/OL1A\t1\t2008-04-01T03:28:50.625462\t{\"key\": \"/authors/OL1A\", \"name\": \"Mark Twain\"}";
        let author = parse_author(line).unwrap();
        assert_eq!(author, Author::new("OL1A", "Mark Twain", ""));
    }

    #[test]
    fn test_parse_author_personal_name() {
        let line = r#"x	{"key": "/authors/OL2A", "name": "Twain", "personal_name": "Samuel Clemens", "birth_date": "1835"}"#;
        let author = parse_author(line).unwrap();
        assert_eq!(author.personal_name, "Samuel Clemens");
    }

    #[test]
    fn test_parse_author_degraded_record() {
        let author = parse_author(r#"{"name": 42}"#).unwrap();
        assert_eq!(author, Author::default());
    }

    #[test]
    fn test_parse_author_failures() {
        assert!(matches!(parse_author("/type/author\tno payload"), Err(Error::MissingJson)));
        assert!(matches!(parse_author("x\t{\"key\": "), Err(Error::Json(_))));
    }
}
