// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The browser-automation capability consumed by pages, downloads and the
//! filter introspector.
//!
//! Any automation backend that can locate elements, wait on their visibility,
//! surface download events and evaluate page scripts can implement
//! [`BrowserSession`].

pub mod error;
pub mod locator;

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::sync::oneshot;

pub use error::BrowserError;
pub use locator::Locator;

/// Receives the next download started by the page.
pub type DownloadReceiver = oneshot::Receiver<Box<dyn Download>>;

/// A file the browser has started downloading.
#[async_trait]
pub trait Download: Send + Sync {
    /// File name proposed by the server
    fn suggested_filename(&self) -> String;

    /// Writes the downloaded stream to `path`, replacing any existing file
    async fn save_as(&self, path: &Path) -> Result<(), BrowserError>;
}

#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigates to an absolute URL
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    async fn click(&self, locator: &Locator) -> Result<(), BrowserError>;

    /// Replaces the value of an input
    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), BrowserError>;

    /// Types `value` one key at a time with `key_delay` between presses
    async fn type_text(&self, locator: &Locator, value: &str, key_delay: Duration) -> Result<(), BrowserError>;

    async fn text_content(&self, locator: &Locator) -> Result<Option<String>, BrowserError>;

    async fn is_visible(&self, locator: &Locator) -> Result<bool, BrowserError>;

    async fn wait_for_visible(&self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError>;

    async fn wait_for_hidden(&self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError>;

    /// Registers interest in the next download event.
    ///
    /// Must be called before the action that starts the download.
    async fn expect_download(&self) -> Result<DownloadReceiver, BrowserError>;

    /// Evaluates a JavaScript expression in the page, awaiting promises
    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value, BrowserError>;
}
