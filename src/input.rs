//! Reading the documents piped into the tool.
//!
//! A document is an optional header of `key: value` lines, an empty line,
//! and a JSON payload. The payload is either a bare array or the API's
//! listing envelope, `{ "data": [...] }`. Documents that start with the
//! JSON itself have no header.

use serde::de::DeserializeOwned;
use serde_json::{self, Value};

use std::collections::HashMap;
use std::io::{BufReader, Read};

use error::InputError;

pub type Header = HashMap<String, String>;

pub fn read_document<T, R>(mut input: BufReader<R>) -> Result<(Header, Vec<T>), InputError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut input_buf = String::new();
    input.read_to_string(&mut input_buf)?;
    parse_document(&input_buf)
}

pub fn parse_document<T: DeserializeOwned>(document: &str) -> Result<(Header, Vec<T>), InputError> {
    let trimmed = document.trim_start();
    let (header_section, payload) = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        ("", trimmed)
    } else {
        match document.find("\n\n") {
            Some(idx) => (&document[..idx], &document[idx + 2..]),
            None => (document, ""),
        }
    };

    let header = parse_header(header_section)?;
    let items = parse_payload(payload)?;

    Ok((header, items))
}

fn parse_header(section: &str) -> Result<Header, InputError> {
    let mut header = HashMap::new();

    for (idx, line) in section.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry: Vec<&str> = line.splitn(2, ": ").collect();
        if entry.len() != 2 {
            return Err(InputError::Header {
                line: idx + 1,
                content: line.to_owned(),
            });
        }
        trace!("Got key '{}' with value '{}'.", entry[0], entry[1]);

        header.insert(entry[0].trim().to_owned(), entry[1].to_owned());
    }

    Ok(header)
}

fn parse_payload<T: DeserializeOwned>(payload: &str) -> Result<Vec<T>, InputError> {
    if payload.trim().is_empty() {
        return Err(InputError::Shape);
    }

    let value: Value = serde_json::from_str(payload)?;
    let items = match value {
        array @ Value::Array(_) => array,
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(data @ Value::Array(_)) => data,
            _ => return Err(InputError::Shape),
        },
        _ => return Err(InputError::Shape),
    };

    Ok(serde_json::from_value(items)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use block::{TimeBlock, User};

    const BLOCKS: &'static str = r#"[
        { "_id": "a", "startTime": "2024-03-01T09:00:00", "endTime": "2024-03-01T12:00:00",
          "attachedUser": "u1", "style": "trabajo" }
    ]"#;

    #[test]
    fn bare_array_has_no_header() {
        let (header, blocks): (_, Vec<TimeBlock>) = parse_document(BLOCKS).unwrap();
        assert!(header.is_empty());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, "a");
    }

    #[test]
    fn envelope_is_unwrapped() {
        let doc = format!(r#"{{ "data": {}, "page": 1, "limit": 24 }}"#, BLOCKS);
        let (_, blocks): (_, Vec<TimeBlock>) = parse_document(&doc).unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn header_precedes_payload() {
        let doc = format!("timeblocks.date: 2024-03-01\nsource: api\n\n{}", BLOCKS);
        let (header, blocks): (_, Vec<TimeBlock>) = parse_document(&doc).unwrap();

        assert_eq!(header["timeblocks.date"], "2024-03-01");
        assert_eq!(header["source"], "api");
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn users_listing() {
        let doc = r#"{ "data": [ { "_id": "u1", "name": "Ana", "phoneNumber": "(57) 312", "email": "a@b.co" } ] }"#;
        let (_, users): (_, Vec<User>) = parse_document(doc).unwrap();
        assert_eq!(users[0].name, "Ana");
        assert_eq!(users[0].address, "");
    }

    #[test]
    fn malformed_header_line_is_reported() {
        let doc = format!("timeblocks.date=2024-03-01\n\n{}", BLOCKS);
        match parse_document::<TimeBlock>(&doc) {
            Err(InputError::Header { line, .. }) => assert_eq!(line, 1),
            other => panic!("unexpected result: {:?}", other.map(|(h, _)| h)),
        }
    }

    #[test]
    fn missing_payload_and_wrong_shapes() {
        for doc in &["key: value\n", r#"{ "items": [] }"#, r#"{ "data": {} }"#] {
            match parse_document::<TimeBlock>(doc) {
                Err(InputError::Shape) => {}
                other => panic!("unexpected result for {:?}: {:?}", doc, other.map(|(h, _)| h)),
            }
        }
    }

    #[test]
    fn bad_json_is_a_json_error() {
        match parse_document::<TimeBlock>("[ { \"startTime\": ") {
            Err(InputError::Json(_)) => {}
            other => panic!("unexpected result: {:?}", other.map(|(h, _)| h)),
        }
    }
}
