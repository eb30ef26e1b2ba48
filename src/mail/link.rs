// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use regex::Regex;

/// Finds the first anchor whose href mentions "reset" or "password"
/// (case-insensitive) and returns the href with HTML entities unescaped.
pub fn extract_reset_link(body: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref RESET_LINK_RE: Regex = Regex::new(
            r#"(?i)<a\s+[^>]*href=["']([^"']*(?:reset|password)[^"']*)["'][^>]*>"#
        ).unwrap();
    }

    RESET_LINK_RE
        .captures(body)
        .and_then(|cap| cap.get(1))
        .map(|href| href.as_str())
        .map(unescape_entities)
}

/// Reverses the entity escaping mail templates apply to URLs.
pub fn unescape_entities(value: &str) -> String {
    value.replace("&amp;", "&").replace("&quot;", "\"").replace("&#x3D;", "=")
}
