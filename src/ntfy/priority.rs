use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Message priority, 1 (min) to 5 (max) with 3 as the server default
///
/// Zero means "unset" and lets the server apply its default. Negative values
/// are accepted but normalized to zero when a message is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(i8);

impl Priority {
    pub const UNSET: Priority = Priority(0);
    pub const MIN: Priority = Priority(1);
    pub const LOW: Priority = Priority(2);
    pub const DEFAULT: Priority = Priority(3);
    pub const HIGH: Priority = Priority(4);
    pub const MAX: Priority = Priority(5);

    pub const fn new(value: i8) -> Self {
        Priority(value)
    }

    pub const fn value(self) -> i8 {
        self.0
    }

    /// Value sent on the wire; negatives collapse to zero
    pub fn normalized(self) -> i8 {
        self.0.max(0)
    }
}

impl From<i8> for Priority {
    fn from(value: i8) -> Self {
        Priority(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid priority '{0}': expected 1-5 or one of min, low, default, high, max, urgent")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "min" => Ok(Priority::MIN),
            "2" | "low" => Ok(Priority::LOW),
            "3" | "default" => Ok(Priority::DEFAULT),
            "4" | "high" => Ok(Priority::HIGH),
            "5" | "max" | "urgent" => Ok(Priority::MAX),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}
