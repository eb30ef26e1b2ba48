// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::time::Duration;
use thiserror::Error;

use crate::browser::BrowserError;
use crate::config::SettingsError;
use crate::imap::ImapError;

/// Failures surfaced to a test scenario.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Malformed, empty or unsupported tabular file
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{column} mismatch - Expected: \"{expected}\", Found: \"{actual}\"")]
    FieldMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    #[error("No download started within {0:?}")]
    DownloadTimeout(Duration),

    #[error("Mailbox connection failed: {0}")]
    MailConnection(String),

    #[error("Filter API did not become available within {0:?}")]
    FilterIntrospectionTimeout(Duration),

    #[error("Invalid filter value: {0}")]
    InvalidFilterValue(String),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("IMAP error: {0}")]
    Imap(#[from] ImapError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] SettingsError),
}

pub type Result<T> = std::result::Result<T, CheckError>;
