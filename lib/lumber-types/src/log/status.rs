/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::fmt;

use chrono::{DateTime, Local};

/// Severity of a configuration-time status message. Distinct from record
/// levels: status events describe the wiring of the runtime itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

impl StatusLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLevel::Info => "INFO",
            StatusLevel::Warning => "WARN",
            StatusLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message emitted by the logging runtime while a configuration is being
/// applied. Not persisted beyond the configuration call that produced it.
#[derive(Clone, Debug)]
pub struct StatusEvent {
    pub level: StatusLevel,
    pub message: String,
    pub time: DateTime<Local>,
}

impl StatusEvent {
    pub fn new(level: StatusLevel, message: impl Into<String>) -> Self {
        StatusEvent {
            level,
            message: message.into(),
            time: Local::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_order() {
        assert!(StatusLevel::Info < StatusLevel::Warning);
        assert!(StatusLevel::Warning < StatusLevel::Error);
    }

    #[test]
    fn level_names() {
        assert_eq!(StatusLevel::Info.as_str(), "INFO");
        assert_eq!(StatusLevel::Warning.as_str(), "WARN");
        assert_eq!(StatusLevel::Error.to_string(), "ERROR");
    }
}
