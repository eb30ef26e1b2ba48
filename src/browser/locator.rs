// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Lazy references to page elements.
//!
//! A [`Locator`] only describes how to find an element. The browser
//! collaborator resolves it each time an interaction or wait is performed, so
//! a locator built before navigation stays valid afterwards.

use std::fmt;

/// How an element is identified on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// `data-testid` attribute
    TestId(String),
    /// ARIA role with an optional accessible name
    Role { role: String, name: Option<String> },
    /// Visible text content
    Text(String),
    /// `alt` attribute of images
    AltText(String),
    Css(String),
    XPath(String),
    /// The n-th (zero based) match of the inner locator
    Nth { inner: Box<Locator>, index: usize },
}

impl Locator {
    pub fn test_id(id: impl Into<String>) -> Self {
        Locator::TestId(id.into())
    }

    pub fn role(role: impl Into<String>, name: Option<&str>) -> Self {
        Locator::Role {
            role: role.into(),
            name: name.map(str::to_string),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Locator::Text(text.into())
    }

    pub fn alt_text(text: impl Into<String>) -> Self {
        Locator::AltText(text.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator::XPath(expression.into())
    }

    pub fn nth(self, index: usize) -> Self {
        Locator::Nth {
            inner: Box::new(self),
            index,
        }
    }

    pub fn first(self) -> Self {
        self.nth(0)
    }

    /// Selector string in Playwright's selector-engine syntax.
    pub fn to_selector(&self) -> String {
        match self {
            Locator::TestId(id) => format!("internal:testid=[data-testid=\"{}\"s]", id),
            Locator::Role { role, name: Some(name) } => format!("internal:role={}[name=\"{}\"i]", role, name),
            Locator::Role { role, name: None } => format!("internal:role={}", role),
            Locator::Text(text) => format!("internal:text=\"{}\"i", text),
            Locator::AltText(text) => format!("internal:attr=[alt=\"{}\"i]", text),
            Locator::Css(selector) => format!("css={}", selector),
            Locator::XPath(expression) => format!("xpath={}", expression),
            Locator::Nth { inner, index } => format!("{} >> nth={}", inner.to_selector(), index),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::TestId(id) => write!(f, "test id '{}'", id),
            Locator::Role { role, name: Some(name) } => write!(f, "role {} named '{}'", role, name),
            Locator::Role { role, name: None } => write!(f, "role {}", role),
            Locator::Text(text) => write!(f, "text '{}'", text),
            Locator::AltText(text) => write!(f, "alt text '{}'", text),
            Locator::Css(selector) => write!(f, "css '{}'", selector),
            Locator::XPath(expression) => write!(f, "xpath '{}'", expression),
            Locator::Nth { inner, index } => write!(f, "{} #{}", inner, index),
        }
    }
}
