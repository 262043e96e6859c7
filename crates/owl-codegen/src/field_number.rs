//! Field number assignment
//!
//! Protobuf reserves 19000-19999 for the implementation, so every number
//! handed out here lies in `1..19000`.

use crate::{Error, Result};
use std::collections::HashMap;
use tracing::warn;
use xxhash_rust::xxh64::xxh64;

/// First field number that may not be used
pub const MAX_FIELD_NUMBER: u32 = 19000;

/// Compute a field number.
///
/// In deterministic mode the concatenated `parts` are hashed with XXH64
/// (seed 0) and reduced into `1..=19000`; the counter is returned
/// unchanged. Otherwise the counter is incremented and returned as the
/// field number.
///
/// Returns `(field_number, next_counter)`.
///
/// # Errors
///
/// Returns [`Error::FieldNumbersExhausted`] when the ascending counter
/// reaches [`MAX_FIELD_NUMBER`].
pub fn field_number<S: AsRef<str>>(
    deterministic: bool,
    counter: u32,
    parts: &[S],
) -> Result<(u32, u32)> {
    if deterministic {
        let key: String = parts.iter().map(AsRef::as_ref).collect();
        let hash = xxh64(key.as_bytes(), 0);
        // The remainder is below MAX_FIELD_NUMBER, so it always fits.
        let number = (hash % u64::from(MAX_FIELD_NUMBER)) as u32 + 1;
        return Ok((number, counter));
    }

    let next = counter + 1;
    if next >= MAX_FIELD_NUMBER {
        return Err(Error::FieldNumbersExhausted { counter: next });
    }

    Ok((next, next))
}

/// Hands out the field numbers of one message.
///
/// Create one assigner per message; the ascending counter starts at zero
/// and is never shared between messages or renders. In deterministic mode
/// numbers that were already handed out in the same message are reported
/// with a warning.
#[derive(Debug)]
pub struct FieldNumberAssigner {
    deterministic: bool,
    counter: u32,
    message: String,
    assigned: HashMap<u32, String>,
}

impl FieldNumberAssigner {
    /// Create an assigner for the message `message`
    pub fn new(deterministic: bool, message: impl Into<String>) -> Self {
        Self {
            deterministic,
            counter: 0,
            message: message.into(),
            assigned: HashMap::new(),
        }
    }

    /// Assign the number for `field`, keyed by `parts`.
    ///
    /// # Errors
    ///
    /// See [`field_number`].
    pub fn assign<S: AsRef<str>>(&mut self, field: &str, parts: &[S]) -> Result<u32> {
        let (number, counter) = field_number(self.deterministic, self.counter, parts)?;
        self.counter = counter;

        if let Some(previous) = self.assigned.get(&number) {
            warn!(
                message = %self.message,
                number,
                first = %previous,
                second = %field,
                "Field number collision"
            );
        } else {
            self.assigned.insert(number, field.to_string());
        }

        Ok(number)
    }

    /// Current value of the ascending counter
    pub fn counter(&self) -> u32 {
        self.counter
    }
}
