//! Error code table and code classification.
//!
//! Codes below zero are logic errors (a fault on the server side), codes above
//! zero are business errors (the request was understood but rejected), and
//! `0` is reserved for success.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;

pub const SUCCESS: i64 = 0;
pub const UNKNOWN_ERROR: i64 = -1;
pub const NOT_LOGGED_IN: i64 = 1000;
/// Emitted together with a `401 Unauthorized` status line.
pub const UNAUTHORIZED: i64 = 10000;

pub const SUCCESS_MESSAGE: &str = "SUCCESS";

/// Which side of the wire a code blames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeKind {
    Success,
    /// Negative code: unexpected server-side condition.
    Logic,
    /// Positive code: caller-side fault.
    Business,
}

impl CodeKind {
    pub fn of(code: i64) -> Self {
        match code.cmp(&0) {
            std::cmp::Ordering::Less => CodeKind::Logic,
            std::cmp::Ordering::Equal => CodeKind::Success,
            std::cmp::Ordering::Greater => CodeKind::Business,
        }
    }
}

/// Immutable mapping from code to its default human-readable message.
///
/// Code `0` always maps to [`SUCCESS_MESSAGE`] and cannot be overridden.
/// Build one at startup, wrap it in an `Arc` and share it; nothing mutates
/// it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCodeTable {
    entries: BTreeMap<i64, String>,
}

impl ErrorCodeTable {
    /// A table holding only the success sentinel.
    pub fn empty() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(SUCCESS, SUCCESS_MESSAGE.to_string());
        Self { entries }
    }

    /// Add or replace the message for `code`. Attempts to replace code `0`
    /// are ignored.
    pub fn with_code(mut self, code: i64, message: impl Into<String>) -> Self {
        if code == SUCCESS {
            tracing::warn!("Ignoring attempt to override the SUCCESS message");
            return self;
        }
        self.entries.insert(code, message.into());
        self
    }

    /// Merge entries from a JSON object such as `{"2001": "Order not found"}`.
    pub fn merge_json(self, raw: &str) -> Result<Self, CoreError> {
        let parsed: BTreeMap<String, String> = serde_json::from_str(raw)
            .map_err(|e| CoreError::InvalidCodeTable(e.to_string()))?;

        parsed.into_iter().try_fold(self, |table, (key, message)| {
            let code: i64 = key.trim().parse().map_err(|_| {
                CoreError::InvalidCodeTable(format!("code key '{key}' is not an integer"))
            })?;
            Ok(table.with_code(code, message))
        })
    }

    pub fn message(&self, code: i64) -> Option<&str> {
        self.entries.get(&code).map(String::as_str)
    }

    pub fn contains(&self, code: i64) -> bool {
        self.entries.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.entries.iter().map(|(code, msg)| (*code, msg.as_str()))
    }
}

impl Default for ErrorCodeTable {
    /// The stock table: unknown error, success, and the 100x account codes.
    fn default() -> Self {
        Self::empty()
            .with_code(UNKNOWN_ERROR, "Unknown error")
            // Session missing or expired; clients may need to re-authenticate.
            .with_code(NOT_LOGGED_IN, "Not logged in, please log in first")
            .with_code(1001, "Please enter account and password")
            .with_code(1002, "Invalid account")
            .with_code(1003, "Account does not exist")
            .with_code(1004, "Invalid password")
            .with_code(1005, "Incorrect password")
            .with_code(1006, "Mobile number does not exist")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
