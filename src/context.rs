//! State shared between the date picker, the timeline and the forms.
//!
//! A single owned value with explicit setters; anything that needs to react
//! to a change subscribes instead of polling.

use block::TimeBlock;
use datetime::{current_local_date, format_date, parse_date};
use error::FormatError;

#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// The selected day, as `YYYY-MM-DD`.
    Date(String),
    /// How many blocks are loaded now.
    Blocks(usize),
}

pub struct ViewContext {
    date: String,
    blocks: Vec<TimeBlock>,
    subscribers: Vec<Box<dyn FnMut(&Change)>>,
}

impl ViewContext {
    /// A context on today's local date with nothing loaded.
    pub fn new() -> Self {
        ViewContext {
            date: current_local_date(),
            blocks: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&Change) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Selects another day. The date is normalized to `YYYY-MM-DD`.
    pub fn set_date(&mut self, date: &str) -> Result<(), FormatError> {
        let date = format_date(&parse_date(date.trim())?);
        if date != self.date {
            self.date = date;
            let change = Change::Date(self.date.clone());
            self.notify(&change);
        }
        Ok(())
    }

    /// Goes back to today, as clearing the date picker does.
    pub fn reset_date(&mut self) {
        let today = current_local_date();
        if today != self.date {
            self.date = today;
            let change = Change::Date(self.date.clone());
            self.notify(&change);
        }
    }

    pub fn set_blocks(&mut self, blocks: Vec<TimeBlock>) {
        self.blocks = blocks;
        let change = Change::Blocks(self.blocks.len());
        self.notify(&change);
    }

    fn notify(&mut self, change: &Change) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(change);
        }
    }
}

impl Default for ViewContext {
    fn default() -> Self {
        ViewContext::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded(context: &mut ViewContext) -> Rc<RefCell<Vec<Change>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        context.subscribe(move |change| sink.borrow_mut().push(change.clone()));
        seen
    }

    #[test]
    fn starts_on_today() {
        let context = ViewContext::new();
        assert_eq!(context.date(), current_local_date());
        assert!(context.blocks().is_empty());
    }

    #[test]
    fn date_changes_are_normalized_and_announced() {
        let mut context = ViewContext::new();
        let seen = recorded(&mut context);

        context.set_date("1999-1-5").unwrap();
        assert_eq!(context.date(), "1999-01-05");

        // Same day again is not a change.
        context.set_date("1999-01-05").unwrap();

        assert_eq!(*seen.borrow(), vec![Change::Date(String::from("1999-01-05"))]);
    }

    #[test]
    fn bad_date_leaves_state_alone() {
        let mut context = ViewContext::new();
        let seen = recorded(&mut context);
        let before = context.date().to_owned();

        assert!(context.set_date("tomorrow").is_err());
        assert_eq!(context.date(), before);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn reset_returns_to_today() {
        let mut context = ViewContext::new();
        context.set_date("1999-01-05").unwrap();
        let seen = recorded(&mut context);

        context.reset_date();
        assert_eq!(context.date(), current_local_date());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn loading_blocks_notifies_every_subscriber() {
        let mut context = ViewContext::new();
        let first = recorded(&mut context);
        let second = recorded(&mut context);

        context.set_blocks(Vec::new());
        assert_eq!(*first.borrow(), vec![Change::Blocks(0)]);
        assert_eq!(*second.borrow(), vec![Change::Blocks(0)]);
    }
}
