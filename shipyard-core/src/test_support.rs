//! Test doubles shared by unit and behaviour tests.

use std::sync::{Mutex, PoisonError};

use crate::WarningSink;

/// [`WarningSink`] that keeps every message in memory.
///
/// # Examples
///
/// ```
/// use shipyard_core::WarningSink;
/// use shipyard_core::test_support::CollectingWarnings;
///
/// let sink = CollectingWarnings::default();
/// sink.warn("dropping ship");
/// assert_eq!(sink.messages(), ["dropping ship"]);
/// ```
#[derive(Debug, Default)]
pub struct CollectingWarnings {
    messages: Mutex<Vec<String>>,
}

impl CollectingWarnings {
    /// Messages received so far, in arrival order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl WarningSink for CollectingWarnings {
    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}
