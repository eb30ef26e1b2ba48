// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Library core for beastcheck, the BeastInsights end-to-end test toolkit.

// --- Modules ---
pub mod browser;
pub mod config;
pub mod download;
pub mod error;
pub mod filter;
pub mod imap;
pub mod mail;
pub mod pages;
pub mod setup;
pub mod utils;

// CONSOLIDATED PRELUDE
pub mod prelude {
    // Config
    pub use crate::config::{Credentials, Settings};
    pub use crate::error::{CheckError, Result};

    // Browser and pages
    pub use crate::browser::{BrowserError, BrowserSession, Download, Locator};
    pub use crate::pages::AllPages;

    // Reports
    pub use crate::download::{verify_file, DownloadedFile, Downloader, FieldExpectation, FileFormat, TabularRecord};
    pub use crate::filter::{AppliedDateRange, FilterIntrospector};

    // Mail
    pub use crate::imap::{ImapConnector, ImapError, MailboxConnector, MailboxSession};
    pub use crate::mail::{ExtractedLink, MailPoller, MailSearchCriterion, PollOptions};

    // Common Libs
    pub use log::{debug, error, info, trace, warn};
    pub use std::sync::Arc;
}
