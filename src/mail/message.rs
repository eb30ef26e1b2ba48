// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use chrono::{DateTime, TimeZone, Utc};
use mail_parser::{HeaderValue, Message};

/// The parts of a fetched message the poller inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub subject: String,
    pub from_header: String,
    pub html_body: String,
    pub text_body: String,
    /// `Date` header; the Unix epoch when absent or unparseable
    pub received_at: DateTime<Utc>,
}

impl MailMessage {
    /// Parses a raw RFC 822 message. Returns `None` when the bytes are not a message.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        let message = Message::parse(raw)?;

        let received_at = message
            .date()
            .and_then(|date| Utc.timestamp_opt(date.to_timestamp(), 0).single())
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Some(Self {
            subject: message.subject().unwrap_or_default().to_string(),
            from_header: from_text(message.from()),
            html_body: message.body_html(0).map(|body| body.into_owned()).unwrap_or_default(),
            text_body: message.body_text(0).map(|body| body.into_owned()).unwrap_or_default(),
            received_at,
        })
    }

    /// Body searched for links: HTML when present, else plain text.
    pub fn searchable_body(&self) -> &str {
        if self.html_body.is_empty() {
            &self.text_body
        } else {
            &self.html_body
        }
    }
}

fn from_text(value: &HeaderValue) -> String {
    let format_addr = |name: Option<&str>, address: Option<&str>| match (name, address) {
        (Some(name), Some(address)) => format!("\"{}\" <{}>", name, address),
        (None, Some(address)) => address.to_string(),
        (Some(name), None) => name.to_string(),
        (None, None) => String::new(),
    };

    match value {
        HeaderValue::Address(addr) => format_addr(addr.name.as_deref(), addr.address.as_deref()),
        HeaderValue::AddressList(list) => list
            .iter()
            .map(|addr| format_addr(addr.name.as_deref(), addr.address.as_deref()))
            .collect::<Vec<_>>()
            .join(", "),
        HeaderValue::Text(text) => text.to_string(),
        _ => String::new(),
    }
}
