// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Unit tests for the reset-mail poller against a scripted mailbox
#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{Duration as ChronoDuration, Utc};

    use beastcheck::error::CheckError;
    use beastcheck::mail::{MailPoller, MailSearchCriterion, PollOptions};

    use crate::mocks::{raw_email, MockConnector, MockMailbox, RESET_HTML, RESET_LINK};

    fn poller(mailbox: &Arc<MockMailbox>) -> MailPoller {
        MailPoller::new(Arc::new(MockConnector { mailbox: mailbox.clone() }))
    }

    fn fast_options() -> PollOptions {
        PollOptions {
            timeout: Duration::from_millis(300),
            poll_interval: Duration::from_millis(20),
        }
    }

    fn reset_criteria() -> MailSearchCriterion {
        MailSearchCriterion {
            sender: Some("notifications@beastinsights.co".to_string()),
            subject_contains: Some("reset".to_string()),
            received_after: None,
        }
    }

    #[tokio::test]
    async fn test_returns_link_from_fresh_message() {
        let cutoff = Utc::now() - ChronoDuration::minutes(5);
        let mailbox = MockMailbox::new();
        mailbox.deliver(11, raw_email("Reset your password", Utc::now(), RESET_HTML));

        let found = poller(&mailbox)
            .wait_for_matching_email(&reset_criteria().received_after(cutoff), fast_options())
            .await
            .expect("poll should succeed")
            .expect("link should be found");

        assert_eq!(found.value, RESET_LINK);
        assert_eq!(found.message.subject, "Reset your password");
        assert!(mailbox.tracker.select_called.load(Ordering::SeqCst));
        assert!(mailbox.logged_out());
    }

    #[tokio::test]
    async fn test_stale_message_is_ignored_until_timeout() {
        let cutoff = Utc::now();
        let mailbox = MockMailbox::new();
        mailbox.deliver(3, raw_email("Reset your password", cutoff - ChronoDuration::hours(1), RESET_HTML));

        let outcome = poller(&mailbox)
            .wait_for_matching_email(&reset_criteria().received_after(cutoff), fast_options())
            .await
            .expect("timeout is not an error");

        assert!(outcome.is_none());
        assert!(mailbox.searches() > 1, "poller should keep searching until the deadline");
        assert!(mailbox.logged_out());
    }

    #[tokio::test]
    async fn test_message_arriving_on_later_poll_is_found() {
        let cutoff = Utc::now() - ChronoDuration::seconds(30);
        let mailbox = MockMailbox::new();
        mailbox.deliver(1, raw_email("Reset your password", cutoff - ChronoDuration::days(1), RESET_HTML));
        mailbox.deliver_on_attempt(2, raw_email("Password reset request", Utc::now(), RESET_HTML), 3);

        let found = poller(&mailbox)
            .wait_for_matching_email(&reset_criteria().received_after(cutoff), fast_options())
            .await
            .unwrap()
            .expect("second message should match");

        assert_eq!(found.message.subject, "Password reset request");
        assert_eq!(mailbox.searches(), 3);
        assert!(mailbox.logged_out());
    }

    #[tokio::test]
    async fn test_subject_mismatch_times_out() {
        let mailbox = MockMailbox::new();
        mailbox.deliver(5, raw_email("Weekly digest", Utc::now(), RESET_HTML));

        let outcome = poller(&mailbox)
            .wait_for_matching_email(&reset_criteria(), fast_options())
            .await
            .unwrap();

        assert!(outcome.is_none());
        assert!(mailbox.logged_out());
    }

    #[tokio::test]
    async fn test_message_without_reset_link_times_out() {
        let mailbox = MockMailbox::new();
        mailbox.deliver(5, raw_email("Reset your password", Utc::now(), "<p>Contact support</p>"));

        let outcome = poller(&mailbox)
            .wait_for_matching_email(&reset_criteria(), fast_options())
            .await
            .unwrap();

        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn test_connection_failure_is_reported() {
        let mailbox = MockMailbox::new();
        mailbox.fail_connect.store(true, Ordering::SeqCst);

        let result = poller(&mailbox)
            .wait_for_matching_email(&reset_criteria(), fast_options())
            .await;

        assert!(matches!(result, Err(CheckError::MailConnection(_))));
        assert!(!mailbox.logged_out());
    }

    #[tokio::test]
    async fn test_select_failure_still_logs_out() {
        let mailbox = MockMailbox::new();
        mailbox.fail_select.store(true, Ordering::SeqCst);

        let result = poller(&mailbox)
            .with_folder("Missing")
            .wait_for_matching_email(&reset_criteria(), fast_options())
            .await;

        assert!(matches!(result, Err(CheckError::MailConnection(_))));
        assert!(mailbox.logged_out());
        assert_eq!(mailbox.searches(), 0);
    }

    #[tokio::test]
    async fn test_search_failure_still_logs_out() {
        let mailbox = MockMailbox::new();
        mailbox.fail_search.store(true, Ordering::SeqCst);

        let result = poller(&mailbox)
            .wait_for_matching_email(&reset_criteria(), fast_options())
            .await;

        assert!(matches!(result, Err(CheckError::Imap(_))));
        assert!(mailbox.logged_out());
    }

    #[tokio::test]
    async fn test_stalled_search_ends_at_deadline_and_logs_out() {
        let mailbox = MockMailbox::new();
        mailbox.stall_search.store(true, Ordering::SeqCst);

        let outcome = tokio::time::timeout(
            Duration::from_secs(3),
            poller(&mailbox).wait_for_matching_email(&reset_criteria(), fast_options()),
        )
        .await
        .expect("poll must honour its own timeout");

        assert!(matches!(outcome, Ok(None)));
        assert!(mailbox.logged_out());
    }

    #[tokio::test]
    async fn test_fetch_failure_still_logs_out() {
        let mailbox = MockMailbox::new();
        mailbox.deliver(9, raw_email("Reset your password", Utc::now(), RESET_HTML));
        mailbox.fail_fetch.store(true, Ordering::SeqCst);

        let result = poller(&mailbox)
            .wait_for_matching_email(&reset_criteria(), fast_options())
            .await;

        assert!(matches!(result, Err(CheckError::Imap(_))));
        assert!(mailbox.logged_out());
    }

    #[tokio::test]
    async fn test_logout_failure_keeps_found_link() {
        let mailbox = MockMailbox::new();
        mailbox.deliver(4, raw_email("Reset your password", Utc::now(), RESET_HTML));
        mailbox.fail_logout.store(true, Ordering::SeqCst);

        let found = poller(&mailbox)
            .wait_for_matching_email(&reset_criteria(), fast_options())
            .await
            .expect("logout failure must not replace the outcome");

        assert_eq!(found.map(|link| link.value).as_deref(), Some(RESET_LINK));
        assert!(mailbox.logged_out());
    }

    #[tokio::test]
    async fn test_logout_failure_keeps_timeout_outcome() {
        let mailbox = MockMailbox::new();
        mailbox.fail_logout.store(true, Ordering::SeqCst);

        let outcome = poller(&mailbox)
            .wait_for_matching_email(&reset_criteria(), fast_options())
            .await;

        assert!(matches!(outcome, Ok(None)));
        assert!(mailbox.logged_out());
    }
}
