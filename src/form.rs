//! New block and new user forms: field validation and the payloads the API
//! accepts for creation.

use regex::Regex;

use block::Style;
use datetime::{combine, parse_date, parse_time, time_to_minutes, to_transport_string};
use error::{FormErrors, ValidationError};

/// Everything the API's email check accepts.
const EMAIL_PATTERN: &'static str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Digits a phone number needs, country code included.
const MIN_PHONE_DIGITS: usize = 11;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlock {
    pub start_time: String,
    pub end_time: String,
    pub attached_user: String,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
}

/// Raw input of the new block form: a `YYYY-MM-DD` date and two `HH:MM` times.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlockForm {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub attached_user: String,
    pub style: Style,
}

impl NewBlockForm {
    pub fn new(date: &str, start_time: &str, end_time: &str, attached_user: &str) -> Self {
        NewBlockForm {
            date: date.trim().to_owned(),
            start_time: start_time.trim().to_owned(),
            end_time: end_time.trim().to_owned(),
            attached_user: attached_user.trim().to_owned(),
            style: Style::Trabajo,
        }
    }

    pub fn with_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.style = style.into();
        self
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = Vec::new();

        if self.date.is_empty() {
            errors.push(ValidationError::new("date", "a date is required"));
        } else if parse_date(&self.date).is_err() {
            errors.push(ValidationError::new("date", "expected a YYYY-MM-DD date"));
        }

        let start = required_time(
            &self.start_time,
            "startTime",
            "a start time is required",
            &mut errors,
        );
        let end = required_time(
            &self.end_time,
            "endTime",
            "an end time is required",
            &mut errors,
        );
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.push(ValidationError::new(
                    "endTime",
                    "the end time must be after the start time",
                ));
            }
        }

        if self.attached_user.is_empty() {
            errors.push(ValidationError::new("attachedUser", "a user must be selected"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormErrors(errors))
        }
    }

    /// Validates the form and builds the creation payload with local,
    /// offset-free transport strings.
    pub fn submit(&self) -> Result<CreateBlock, FormErrors> {
        self.validate()?;

        let start = combine(&self.date, &self.start_time)
            .map_err(|e| single("startTime", &e.to_string()))?;
        let end = combine(&self.date, &self.end_time)
            .map_err(|e| single("endTime", &e.to_string()))?;

        Ok(CreateBlock {
            start_time: to_transport_string(&start),
            end_time: to_transport_string(&end),
            attached_user: self.attached_user.clone(),
            style: self.style.clone(),
        })
    }
}

fn required_time(
    value: &str,
    field: &'static str,
    missing: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<u32> {
    if value.is_empty() {
        errors.push(ValidationError::new(field, missing));
        return None;
    }
    match parse_time(value).and_then(|_| time_to_minutes(value)) {
        Ok(minutes) => Some(minutes),
        Err(_) => {
            errors.push(ValidationError::new(field, "expected an HH:MM time"));
            None
        }
    }
}

fn single(field: &'static str, message: &str) -> FormErrors {
    FormErrors(vec![ValidationError::new(field, message)])
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUserForm {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
}

impl NewUserForm {
    pub fn new(name: &str, phone_number: &str, email: &str, address: &str) -> Self {
        NewUserForm {
            name: name.trim().to_owned(),
            phone_number: phone_number.trim().to_owned(),
            email: email.trim().to_owned(),
            address: address.trim().to_owned(),
        }
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "a name is required"));
        }

        if digits(&self.phone_number).len() < MIN_PHONE_DIGITS {
            errors.push(ValidationError::new(
                "phoneNumber",
                "the phone number needs at least 11 digits",
            ));
        }

        if self.email.is_empty() {
            errors.push(ValidationError::new("email", "an email is required"));
        } else if !is_valid_email(&self.email) {
            errors.push(ValidationError::new("email", "enter a valid email address"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormErrors(errors))
        }
    }

    pub fn submit(&self) -> Result<CreateUser, FormErrors> {
        self.validate()?;

        Ok(CreateUser {
            name: self.name.clone(),
            phone_number: format_phone_number(&self.phone_number),
            email: self.email.clone(),
            address: self.address.clone(),
        })
    }
}

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(EMAIL_PATTERN).expect("Failed to compile EMAIL_RE regex");
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Formats the digits of `value` as `(XX) XXX-XXX-XXXX`, as far as there are
/// digits. Anything past the twelfth digit is dropped.
pub fn format_phone_number(value: &str) -> String {
    let numbers = digits(value);
    let n = numbers.len();

    if n <= 2 {
        format!("({}", numbers)
    } else if n <= 5 {
        format!("({}) {}", &numbers[..2], &numbers[2..])
    } else if n <= 8 {
        format!("({}) {}-{}", &numbers[..2], &numbers[2..5], &numbers[5..])
    } else {
        format!(
            "({}) {}-{}-{}",
            &numbers[..2],
            &numbers[2..5],
            &numbers[5..8],
            &numbers[8..n.min(12)]
        )
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}
