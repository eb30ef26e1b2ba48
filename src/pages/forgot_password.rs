// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::Arc;
use std::time::Duration;

use crate::browser::{BrowserSession, Locator};
use crate::error::Result;
use crate::pages::SLOW_TIMEOUT;

// The backend sends the mail after the click returns
const SEND_SETTLE: Duration = Duration::from_secs(2);

pub struct ForgotPasswordPage {
    session: Arc<dyn BrowserSession>,
}

impl ForgotPasswordPage {
    pub fn new(session: Arc<dyn BrowserSession>) -> Self {
        Self { session }
    }

    pub fn heading(&self) -> Locator {
        Locator::text("Forgot Password?")
    }

    pub fn instructions(&self) -> Locator {
        Locator::text("Enter the email that you used")
    }

    pub fn email_input(&self) -> Locator {
        Locator::css("#email")
    }

    pub fn send_mail_button(&self) -> Locator {
        Locator::test_id("send-mail-button")
    }

    pub fn success_toast(&self) -> Locator {
        Locator::text("Password reset link sent successfully. You can close this window now.")
    }

    pub async fn expect_modal(&self) -> Result<()> {
        for locator in [self.heading(), self.instructions(), self.email_input(), self.send_mail_button()] {
            self.session.wait_for_visible(&locator, SLOW_TIMEOUT).await?;
        }
        Ok(())
    }

    pub async fn fill_email(&self, email: &str) -> Result<()> {
        let input = self.email_input();
        self.session.wait_for_visible(&input, SLOW_TIMEOUT).await?;
        self.session.fill(&input, email).await?;
        Ok(())
    }

    pub async fn click_send_mail(&self) -> Result<()> {
        let button = self.send_mail_button();
        self.session.wait_for_visible(&button, SLOW_TIMEOUT).await?;
        self.session.click(&button).await?;
        tokio::time::sleep(SEND_SETTLE).await;
        Ok(())
    }

    pub async fn expect_success_toast(&self) -> Result<()> {
        self.session.wait_for_visible(&self.success_toast(), SLOW_TIMEOUT).await?;
        Ok(())
    }
}
