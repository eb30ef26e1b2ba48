// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::time::Duration;
use thiserror::Error;

use crate::browser::locator::Locator;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Element not found: {0}")]
    ElementNotFound(Locator),

    #[error("Timed out after {timeout:?} waiting for {locator} to become {state}")]
    WaitTimeout {
        locator: Locator,
        state: &'static str,
        timeout: Duration,
    },

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Script evaluation failed: {0}")]
    Evaluation(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Browser session closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
