//! Timeline projection and form handling for a time block booking
//! dashboard. The API speaks local wall-clock time with no offset; this
//! crate keeps it that way from the date picker to the drawn timeline.

extern crate chrono;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate palette;
extern crate pdf_canvas;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

#[cfg(test)]
extern crate tempfile;

pub mod block;
pub mod config;
pub mod context;
pub mod datetime;
pub mod error;
pub mod form;
pub mod input;
pub mod reports;
pub mod timeline;
pub mod users;
pub mod util;
