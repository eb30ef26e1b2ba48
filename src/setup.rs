// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Shared steps that scenarios run before their own assertions.

use chrono::Utc;
use log::info;

use crate::config::Credentials;
use crate::error::Result;
use crate::mail::{ExtractedLink, MailPoller, MailSearchCriterion, PollOptions};
use crate::pages::AllPages;

/// Opens the app, signs in and dismisses the onboarding tour.
pub async fn sign_in(pages: &AllPages, credentials: &Credentials) -> Result<()> {
    pages.login.navigate().await?;
    pages.login.login(&credentials.username, &credentials.password).await?;
    pages.dashboard.skip_onboarding_tour().await?;
    info!("Signed in and ready on the dashboard");
    Ok(())
}

/// Submits the forgot-password form for `email` and waits for the reset mail.
///
/// Only messages received after the form was submitted are considered.
pub async fn request_reset_link(
    pages: &AllPages,
    poller: &MailPoller,
    email: &str,
    criteria: MailSearchCriterion,
    options: PollOptions,
) -> Result<Option<ExtractedLink>> {
    pages.login.navigate().await?;
    pages.login.click_forgot_password_link().await?;
    pages.forgot_password.expect_modal().await?;
    pages.forgot_password.fill_email(email).await?;

    let cutoff = Utc::now();
    pages.forgot_password.click_send_mail().await?;
    pages.forgot_password.expect_success_toast().await?;

    poller
        .wait_for_matching_email(&criteria.received_after(cutoff), options)
        .await
}
