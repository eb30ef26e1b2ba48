// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::browser::{BrowserSession, Locator};
use crate::error::Result;
use crate::pages::{EXPECT_TIMEOUT, SLOW_TIMEOUT};

const TOUR_TIMEOUT: Duration = Duration::from_secs(90);

pub struct DashboardPage {
    session: Arc<dyn BrowserSession>,
}

impl DashboardPage {
    pub fn new(session: Arc<dyn BrowserSession>) -> Self {
        Self { session }
    }

    pub fn tour_popover(&self) -> Locator {
        Locator::css("#driver-popover-content")
    }

    pub fn tour_close_button(&self) -> Locator {
        Locator::css("#custom-close-btn")
    }

    pub fn snapshot_heading(&self) -> Locator {
        Locator::role("heading", Some("Snapshot"))
    }

    /// Dismisses the onboarding tour shown after login.
    pub async fn skip_onboarding_tour(&self) -> Result<()> {
        let popover = self.tour_popover();
        self.session.wait_for_visible(&popover, TOUR_TIMEOUT).await?;
        if self.session.is_visible(&popover).await? {
            self.session.click(&self.tour_close_button()).await?;
        } else {
            debug!("Onboarding tour closed by itself");
        }
        self.session.wait_for_hidden(&popover, EXPECT_TIMEOUT).await?;
        Ok(())
    }

    pub async fn expect_dashboard(&self) -> Result<()> {
        self.session.wait_for_visible(&self.snapshot_heading(), SLOW_TIMEOUT).await?;
        Ok(())
    }
}
