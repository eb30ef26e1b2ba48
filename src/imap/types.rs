// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// IMAP SEARCH criteria understood by [`MailboxSession::search`](crate::imap::session::MailboxSession::search).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    All,
    From(String),
}

impl SearchCriteria {
    /// Criteria matching the given sender, or every message when none is set.
    pub fn from_sender(sender: Option<&str>) -> Self {
        match sender {
            Some(sender) if !sender.trim().is_empty() => SearchCriteria::From(sender.trim().to_string()),
            _ => SearchCriteria::All,
        }
    }

    /// Renders the criteria as an IMAP SEARCH query string.
    pub fn to_query(&self) -> String {
        match self {
            SearchCriteria::All => "ALL".to_string(),
            SearchCriteria::From(sender) => format!("FROM {}", quote(sender)),
        }
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
