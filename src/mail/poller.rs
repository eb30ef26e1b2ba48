// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Polls a mailbox until a fresh message with a password-reset link arrives.
//!
//! The poller owns one mailbox session per call and logs it out on every
//! exit: link found, timeout, or error. Messages dated at or before the
//! cutoff are ignored so a stale reset mail left in the inbox is never used.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use tokio::time::{sleep, timeout, Instant};

use crate::config::{ImapSettings, MailPollSettings};
use crate::error::{CheckError, Result};
use crate::imap::{ImapConnector, MailboxConnector, MailboxSession, SearchCriteria, DEFAULT_FOLDER};
use crate::mail::link::extract_reset_link;
use crate::mail::message::MailMessage;

const LOGOUT_TIMEOUT: Duration = Duration::from_secs(10);

/// Which messages qualify.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailSearchCriterion {
    pub sender: Option<String>,
    /// Case-insensitive substring of the subject
    pub subject_contains: Option<String>,
    /// Exclusive lower bound on the message date
    pub received_after: Option<DateTime<Utc>>,
}

impl MailSearchCriterion {
    pub fn from_settings(settings: &MailPollSettings) -> Self {
        Self {
            sender: settings.sender.clone(),
            subject_contains: settings.subject_contains.clone(),
            received_after: None,
        }
    }

    pub fn received_after(mut self, cutoff: DateTime<Utc>) -> Self {
        self.received_after = Some(cutoff);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5 * 60),
            poll_interval: Duration::from_secs(5),
        }
    }
}

impl From<&MailPollSettings> for PollOptions {
    fn from(settings: &MailPollSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            poll_interval: settings.poll_interval(),
        }
    }
}

/// A link pulled out of a qualifying message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    pub value: String,
    pub message: MailMessage,
}

/// Lifecycle of one [`MailPoller::wait_for_matching_email`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Connecting,
    Polling,
    Found,
    TimedOut,
    Error,
}

/// Why a candidate message was passed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotNewerThanCutoff,
    SubjectMismatch,
    NoResetLink,
}

/// Applies the cutoff, subject and link rules to one message, in that order.
pub fn evaluate_message(criteria: &MailSearchCriterion, message: &MailMessage) -> std::result::Result<String, Rejection> {
    if let Some(cutoff) = criteria.received_after {
        if message.received_at.timestamp_millis() <= cutoff.timestamp_millis() {
            return Err(Rejection::NotNewerThanCutoff);
        }
    }

    if let Some(needle) = criteria.subject_contains.as_deref() {
        if !message.subject.to_lowercase().contains(&needle.to_lowercase()) {
            return Err(Rejection::SubjectMismatch);
        }
    }

    extract_reset_link(message.searchable_body()).ok_or(Rejection::NoResetLink)
}

pub struct MailPoller {
    connector: Arc<dyn MailboxConnector>,
    folder: String,
}

impl MailPoller {
    pub fn new(connector: Arc<dyn MailboxConnector>) -> Self {
        Self {
            connector,
            folder: DEFAULT_FOLDER.to_string(),
        }
    }

    /// Poller connecting to the configured IMAP account and folder.
    pub fn from_settings(settings: &ImapSettings) -> Self {
        Self::new(Arc::new(ImapConnector::new(settings.clone()))).with_folder(&settings.folder)
    }

    pub fn with_folder(mut self, folder: &str) -> Self {
        self.folder = folder.to_string();
        self
    }

    /// Waits for a message matching `criteria` that carries a reset link.
    ///
    /// Returns `Ok(None)` when `options.timeout` elapses first; callers should
    /// treat that as a failed scenario.
    pub async fn wait_for_matching_email(
        &self,
        criteria: &MailSearchCriterion,
        options: PollOptions,
    ) -> Result<Option<ExtractedLink>> {
        debug!("Mail poll state: {:?}", PollState::Connecting);
        let mut session = self
            .connector
            .connect()
            .await
            .map_err(|e| CheckError::MailConnection(e.to_string()))?;

        let selected = match timeout(options.timeout, session.select_folder(&self.folder)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("selecting {} timed out after {:?}", self.folder, options.timeout)),
        };
        if let Err(reason) = selected {
            close_session(session.as_mut()).await;
            return Err(CheckError::MailConnection(reason));
        }

        debug!("Mail poll state: {:?}", PollState::Polling);
        // Bounds mailbox calls that stall past the deadline
        let outcome = match timeout(options.timeout, self.poll(session.as_mut(), criteria, options)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                debug!("Mailbox call still pending at the deadline");
                Ok(None)
            }
        };
        close_session(session.as_mut()).await;

        let state = match &outcome {
            Ok(Some(_)) => PollState::Found,
            Ok(None) => PollState::TimedOut,
            Err(_) => PollState::Error,
        };
        debug!("Mail poll state: {:?}", state);
        if state == PollState::TimedOut {
            warn!("No matching email arrived in {} within {:?}", self.folder, options.timeout);
        }
        outcome
    }

    async fn poll(
        &self,
        session: &mut dyn MailboxSession,
        criteria: &MailSearchCriterion,
        options: PollOptions,
    ) -> Result<Option<ExtractedLink>> {
        let start = Instant::now();
        let search = SearchCriteria::from_sender(criteria.sender.as_deref());
        let mut attempt = 0u32;

        while start.elapsed() < options.timeout {
            attempt += 1;
            let uids = session.search(&search).await?;
            debug!("Poll #{}: {} message(s) match {}", attempt, uids.len(), search.to_query());

            if let Some(&latest) = uids.last() {
                match session.fetch_raw_message(latest).await? {
                    Some(raw) => match MailMessage::parse(&raw) {
                        Some(message) => match evaluate_message(criteria, &message) {
                            Ok(value) => {
                                info!("Found link in message '{}' from {}", message.subject, message.from_header);
                                return Ok(Some(ExtractedLink { value, message }));
                            }
                            Err(reason) => debug!("Skipping UID {} ({:?}): {}", latest, reason, message.subject),
                        },
                        None => debug!("UID {} is not a parseable message", latest),
                    },
                    None => debug!("UID {} returned no body", latest),
                }
            }

            let remaining = options.timeout.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                break;
            }
            sleep(options.poll_interval.min(remaining)).await;
        }
        Ok(None)
    }
}

async fn close_session(session: &mut dyn MailboxSession) {
    match timeout(LOGOUT_TIMEOUT, session.logout()).await {
        Ok(Ok(())) => debug!("Mailbox session logged out"),
        Ok(Err(e)) => warn!("Failed to logout mailbox session: {}", e),
        Err(_) => warn!("Mailbox logout did not complete within {:?}", LOGOUT_TIMEOUT),
    }
}
