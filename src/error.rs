use serde_json;

use std::fmt;
use std::io;

/// What a malformed string was supposed to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Date,
    Time,
    Transport,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            FormatKind::Date => "date (expected YYYY-MM-DD)",
            FormatKind::Time => "time (expected HH:MM)",
            FormatKind::Transport => "transport string (expected YYYY-MM-DDTHH:MM:SS)",
        })
    }
}

/// The single error kind of the date/time core: an input that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
#[fail(display = "malformed {}: {:?}", kind, input)]
pub struct FormatError {
    pub kind: FormatKind,
    pub input: String,
}

impl FormatError {
    pub fn new(kind: FormatKind, input: &str) -> Self {
        FormatError {
            kind,
            input: input.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Fail)]
pub enum ProjectionError {
    #[fail(display = "{}", _0)]
    Format(#[cause] FormatError),
    #[fail(display = "block {} - {} ends before it starts on the timeline", start, end)]
    Overnight { start: String, end: String },
}

impl From<FormatError> for ProjectionError {
    fn from(e: FormatError) -> Self {
        ProjectionError::Format(e)
    }
}

#[derive(Debug, Fail)]
pub enum InputError {
    #[fail(display = "could not read input: {}", _0)]
    Io(#[cause] io::Error),
    #[fail(display = "invalid JSON payload: {}", _0)]
    Json(#[cause] serde_json::Error),
    #[fail(display = "invalid header line {}: {:?}", line, content)]
    Header { line: usize, content: String },
    #[fail(display = "expected a JSON array or an object holding a \"data\" array")]
    Shape,
}

impl From<io::Error> for InputError {
    fn from(e: io::Error) -> Self {
        InputError::Io(e)
    }
}

impl From<serde_json::Error> for InputError {
    fn from(e: serde_json::Error) -> Self {
        InputError::Json(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
#[fail(display = "invalid value {:?} for {}", value, key)]
pub struct ConfigError {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
#[fail(display = "unknown user field {:?}", _0)]
pub struct UnknownField(pub String);

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
#[fail(display = "{}: {}", field, message)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: &str) -> Self {
        ValidationError {
            field,
            message: message.to_owned(),
        }
    }
}

/// Every field error found by one form validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors(pub Vec<ValidationError>);

impl FormErrors {
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "invalid form: {}", messages.join("; "))
    }
}

impl ::failure::Fail for FormErrors {}
