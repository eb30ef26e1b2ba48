// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::browser::{BrowserSession, Locator};
use crate::error::Result;
use crate::pages::{EXPECT_TIMEOUT, SLOW_TIMEOUT};

const KEY_DELAY: Duration = Duration::from_millis(100);
const LOGIN_TOAST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct LoginPage {
    session: Arc<dyn BrowserSession>,
    base_url: String,
}

impl LoginPage {
    pub fn new(session: Arc<dyn BrowserSession>, base_url: &str) -> Self {
        Self {
            session,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn logo(&self) -> Locator {
        Locator::alt_text("beastinsights-logo").first()
    }

    pub fn sign_in_text(&self) -> Locator {
        Locator::text("Sign in to your Account")
    }

    pub fn username_label(&self) -> Locator {
        Locator::css("[for=\"usernameOrEmail\"]")
    }

    pub fn username_input(&self) -> Locator {
        Locator::css("#usernameOrEmail")
    }

    pub fn password_label(&self) -> Locator {
        Locator::css("[for=\"password\"]")
    }

    pub fn password_input(&self) -> Locator {
        Locator::css("#password")
    }

    pub fn forgot_password_link(&self) -> Locator {
        Locator::text("Forgot Password?")
    }

    pub fn login_button(&self) -> Locator {
        Locator::test_id("login-button")
    }

    pub fn login_success_toast(&self) -> Locator {
        Locator::text("Logged in successfully")
    }

    pub async fn navigate(&self) -> Result<()> {
        let url = format!("{}/", self.base_url);
        self.session.goto(&url).await?;
        Ok(())
    }

    pub async fn expect_sign_in_modal(&self) -> Result<()> {
        for locator in [
            self.logo(),
            self.sign_in_text(),
            self.username_label(),
            self.username_input(),
            self.password_label(),
            self.password_input(),
            self.forgot_password_link(),
            self.login_button(),
        ] {
            self.session.wait_for_visible(&locator, EXPECT_TIMEOUT).await?;
        }
        Ok(())
    }

    pub async fn click_forgot_password_link(&self) -> Result<()> {
        let link = self.forgot_password_link();
        self.session.wait_for_visible(&link, SLOW_TIMEOUT).await?;
        self.session.click(&link).await?;
        Ok(())
    }

    /// Types credentials key by key and waits for the success toast.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        self.expect_sign_in_modal().await?;
        self.session.type_text(&self.username_input(), username, KEY_DELAY).await?;
        self.session.type_text(&self.password_input(), password, KEY_DELAY).await?;
        self.session.click(&self.login_button()).await?;
        self.session
            .wait_for_visible(&self.login_success_toast(), LOGIN_TOAST_TIMEOUT)
            .await?;
        info!("Logged in as {}", username);
        Ok(())
    }
}
