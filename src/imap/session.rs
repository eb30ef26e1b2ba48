// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::Debug;

use async_trait::async_trait;
use futures_util::io::{AsyncRead, AsyncWrite};
use futures_util::stream::TryStreamExt;
use log::debug;

use crate::imap::{error::ImapError, types::SearchCriteria};

// Define a constant for the folder polled when none is configured
pub const DEFAULT_FOLDER: &str = "INBOX";

/// Operations the mail poller needs from an authenticated mailbox session.
///
/// A session is owned by exactly one poll loop and must be logged out by it.
#[async_trait]
pub trait MailboxSession: Send {
    /// Selects a folder for subsequent searches
    async fn select_folder(&mut self, name: &str) -> Result<(), ImapError>;

    /// Returns the UIDs matching the criteria, in ascending order
    async fn search(&mut self, criteria: &SearchCriteria) -> Result<Vec<u32>, ImapError>;

    /// Fetches the full RFC 822 message for a UID without setting \Seen
    async fn fetch_raw_message(&mut self, uid: u32) -> Result<Option<Vec<u8>>, ImapError>;

    /// Logs out and releases the connection
    async fn logout(&mut self) -> Result<(), ImapError>;
}

/// [`MailboxSession`] backed by an async-imap session over any compatible stream.
#[derive(Debug)]
pub struct AsyncImapSessionWrapper<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Debug + Send,
{
    session: async_imap::Session<T>,
}

impl<T> AsyncImapSessionWrapper<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Debug + Send,
{
    pub fn new(session: async_imap::Session<T>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl<T> MailboxSession for AsyncImapSessionWrapper<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Debug + Send,
{
    async fn select_folder(&mut self, name: &str) -> Result<(), ImapError> {
        self.session
            .select(name)
            .await
            .map(|_| ())
            .map_err(|e| ImapError::InvalidMailbox(format!("{}: {}", name, e)))
    }

    async fn search(&mut self, criteria: &SearchCriteria) -> Result<Vec<u32>, ImapError> {
        let query = criteria.to_query();
        debug!("UID SEARCH {}", query);
        let found = self.session.uid_search(&query).await?;
        let mut uids: Vec<u32> = found.into_iter().collect();
        uids.sort_unstable();
        Ok(uids)
    }

    async fn fetch_raw_message(&mut self, uid: u32) -> Result<Option<Vec<u8>>, ImapError> {
        let sequence = uid.to_string();
        // BODY.PEEK leaves the message unread
        let fetches: Vec<_> = self
            .session
            .uid_fetch(&sequence, "BODY.PEEK[]")
            .await?
            .try_collect()
            .await
            .map_err(|e| ImapError::Fetch(e.to_string()))?;

        Ok(fetches
            .iter()
            .find_map(|fetch| fetch.body())
            .map(|body| body.to_vec()))
    }

    async fn logout(&mut self) -> Result<(), ImapError> {
        self.session.logout().await.map_err(ImapError::from)
    }
}
