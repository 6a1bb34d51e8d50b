//! Searching the user table by free text over a chosen set of fields.

use std::str::FromStr;

use block::User;
use error::UnknownField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    PhoneNumber,
    Email,
    Address,
}

/// Searched when no field is selected.
pub const ALL_FIELDS: [UserField; 4] = [
    UserField::Name,
    UserField::PhoneNumber,
    UserField::Email,
    UserField::Address,
];

impl UserField {
    pub fn value<'a>(&self, user: &'a User) -> &'a str {
        match *self {
            UserField::Name => &user.name,
            UserField::PhoneNumber => &user.phone_number,
            UserField::Email => &user.email,
            UserField::Address => &user.address,
        }
    }
}

impl FromStr for UserField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(UserField::Name),
            "phoneNumber" => Ok(UserField::PhoneNumber),
            "email" => Ok(UserField::Email),
            "address" => Ok(UserField::Address),
            other => Err(UnknownField(other.to_owned())),
        }
    }
}

/// Case-insensitive substring match of `filter` against any of `fields`.
pub fn matches(user: &User, filter: &str, fields: &[UserField]) -> bool {
    if filter.is_empty() {
        return true;
    }

    let needle = filter.to_lowercase();
    let fields = if fields.is_empty() { &ALL_FIELDS[..] } else { fields };

    fields
        .iter()
        .any(|field| field.value(user).to_lowercase().contains(&needle))
}

pub fn filter_users<'a>(users: &'a [User], filter: &str, fields: &[UserField]) -> Vec<&'a User> {
    users
        .iter()
        .filter(|user| matches(user, filter, fields))
        .collect()
}
