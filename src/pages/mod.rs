// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Page modules for the BeastInsights screens the scenarios drive.
//!
//! Each page holds a handle to the shared [`BrowserSession`] and exposes its
//! locators plus the interactions a scenario needs.

pub mod bin_routing;
pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod reset_password;

use std::sync::Arc;
use std::time::Duration;

use crate::browser::BrowserSession;
use crate::config::Settings;
use crate::download::Downloader;

pub use bin_routing::{BinRoutingInsight, BinRoutingPage};
pub use dashboard::DashboardPage;
pub use forgot_password::ForgotPasswordPage;
pub use login::LoginPage;
pub use reset_password::ResetPasswordPage;

/// Default wait for an assertion on visibility.
pub const EXPECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Wait used for elements that depend on a backend round trip.
pub const SLOW_TIMEOUT: Duration = Duration::from_secs(60);

/// Every page, built over one browser session.
pub struct AllPages {
    pub session: Arc<dyn BrowserSession>,
    pub login: LoginPage,
    pub dashboard: DashboardPage,
    pub forgot_password: ForgotPasswordPage,
    pub reset_password: ResetPasswordPage,
    pub bin_routing: BinRoutingPage,
}

impl AllPages {
    pub fn new(session: Arc<dyn BrowserSession>, settings: &Settings) -> Self {
        let downloader = Downloader::from_settings(session.clone(), &settings.downloads);
        Self {
            login: LoginPage::new(session.clone(), &settings.base_url),
            dashboard: DashboardPage::new(session.clone()),
            forgot_password: ForgotPasswordPage::new(session.clone()),
            reset_password: ResetPasswordPage::new(session.clone()),
            bin_routing: BinRoutingPage::new(session.clone(), downloader),
            session,
        }
    }
}
