// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use crate::browser::{BrowserSession, Locator};
use crate::error::Result;
use crate::pages::SLOW_TIMEOUT;

pub struct ResetPasswordPage {
    session: Arc<dyn BrowserSession>,
}

impl ResetPasswordPage {
    pub fn new(session: Arc<dyn BrowserSession>) -> Self {
        Self { session }
    }

    pub fn heading(&self) -> Locator {
        Locator::text("Set New Password")
    }

    pub fn password_input(&self) -> Locator {
        Locator::css("#password")
    }

    pub fn confirm_password_input(&self) -> Locator {
        Locator::css("#confirmPassword")
    }

    pub fn submit_button(&self) -> Locator {
        Locator::test_id("submit-button")
    }

    pub fn success_toast(&self) -> Locator {
        Locator::text("Password changed successfully")
    }

    /// Opens the link extracted from the reset mail.
    pub async fn open(&self, reset_link: &str) -> Result<()> {
        self.session.goto(reset_link).await?;
        self.expect_page().await
    }

    pub async fn expect_page(&self) -> Result<()> {
        for locator in [
            self.heading(),
            self.password_input(),
            self.confirm_password_input(),
            self.submit_button(),
        ] {
            self.session.wait_for_visible(&locator, SLOW_TIMEOUT).await?;
        }
        Ok(())
    }

    pub async fn submit_new_password(&self, password: &str, confirmation: &str) -> Result<()> {
        self.session.fill(&self.password_input(), password).await?;
        self.session.fill(&self.confirm_password_input(), confirmation).await?;
        self.session.click(&self.submit_button()).await?;
        Ok(())
    }

    /// The toast must appear and then go away.
    pub async fn expect_success_toast(&self) -> Result<()> {
        let toast = self.success_toast();
        self.session.wait_for_visible(&toast, SLOW_TIMEOUT).await?;
        self.session.wait_for_hidden(&toast, SLOW_TIMEOUT).await?;
        Ok(())
    }
}
