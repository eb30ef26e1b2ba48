// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Publicly export key modules and types
pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use client::{ImapConnector, MailboxConnector};
pub use error::ImapError;
pub use session::{MailboxSession, DEFAULT_FOLDER};
pub use types::SearchCriteria;
